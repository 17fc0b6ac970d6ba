/// Display colors for tags.
///
/// Colors are derived from the tag text and never persisted, so the same tag
/// renders with the same color on every client.
pub const TAG_PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD", "#D4A5A5", "#9B59B6", "#3498DB",
];

pub fn tag_color(tag: &str) -> &'static str {
    // FNV-1a: stable across releases, unlike std's DefaultHasher
    let mut hash: u32 = 0x811c_9dc5;
    for byte in tag.to_lowercase().bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    TAG_PALETTE[(hash as usize) % TAG_PALETTE.len()]
}
