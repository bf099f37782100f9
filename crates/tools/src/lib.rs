pub mod config_file;
pub mod logger;
pub mod render;
pub mod seed;

/// Format a nest fingerprint as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_fingerprint(fingerprint: u64) -> String {
    format!("0x{fingerprint:016x}")
}
