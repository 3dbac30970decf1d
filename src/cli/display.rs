use crate::core::BlockSnapshot;

/// Human-readable, block-by-block view of a chain
pub fn render_chain(blocks: &[BlockSnapshot]) -> String {
    let mut out = String::new();

    for (i, block) in blocks.iter().enumerate() {
        out.push_str("=============================================\n");
        out.push_str(&format!("Block #{}\n", block.index));
        out.push_str(&format!("Previous Hash : {}\n", block.previous_hash));
        out.push_str(&format!("Current Hash  : {}\n", block.hash));
        out.push_str(&format!("Merkle Root   : {}\n", block.merkle_root));
        out.push_str(&format!("Timestamp     : {}\n", block.timestamp));
        out.push_str(&format!("Difficulty    : {}\n", block.difficulty));
        out.push_str(&format!("Nonce         : {}\n", block.nonce));
        out.push_str("=============================================\n");

        if i + 1 < blocks.len() {
            out.push_str("      ||\n");
            out.push_str("      ||\n");
            out.push_str("      \\/\n");
        }
    }

    out
}
