use ring::digest::{Context, SHA256};

use crate::error::{BlockchainError, Result};
use data_encoding::HEXLOWER;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch with sub-second precision.
pub fn current_timestamp() -> Result<f64> {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| BlockchainError::Clock(format!("System time error: {e}")))?;

    Ok(duration.as_secs_f64())
}

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// SHA-256 over the UTF-8 bytes of `text`, lowercase hex encoded.
pub fn sha256_hex(text: &str) -> String {
    HEXLOWER.encode(&sha256_digest(text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_current_timestamp_is_recent() {
        let ts = current_timestamp().unwrap();
        // 2020-01-01 as a floor
        assert!(ts > 1_577_836_800.0);
    }
}
