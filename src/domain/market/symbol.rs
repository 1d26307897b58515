/// Symbol used when the caller does not name one.
pub const DEFAULT_SYMBOL: &str = "BTCUSDT";

/// Normalizes a user supplied instrument name to the exchange form
/// (`" ethusdt "` -> `"ETHUSDT"`), falling back to `default` when empty.
pub fn normalize_symbol(input: Option<&str>, default: &str) -> String {
    match input.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_uppercase(),
        _ => default.trim().to_uppercase(),
    }
}
