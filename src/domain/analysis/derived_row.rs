use serde::Serialize;

/// Per-candle features produced by the indicator engine.
///
/// Every field at index `i` depends only on candles `0..=i`. Flags that need a
/// predecessor are `false` when it does not exist; window-based values are
/// `None` until their window is full and must not feed any signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DerivedRow {
    pub index: usize,
    pub timestamp: i64,
    pub close: f64,

    // Market structure (one bar back)
    pub higher_high: bool,
    pub higher_low: bool,
    pub lower_high: bool,
    pub lower_low: bool,
    pub bullish_mss: bool,
    pub bearish_mss: bool,
    pub bullish_ob: bool,
    pub bearish_ob: bool,

    // Gaps and structure breaks (two bars back)
    pub fvg_bullish: bool,
    pub fvg_bearish: bool,
    pub break_of_structure: bool,

    // Single/double candle patterns
    pub doji: bool,
    pub hammer: bool,
    pub engulfing_bullish: bool,

    // Rolling levels
    pub liquidity_high: Option<f64>,
    pub liquidity_low: Option<f64>,
    pub support: Option<f64>,
    pub resistance: Option<f64>,

    // Momentum and trend
    pub rsi: Option<f64>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
}

impl DerivedRow {
    /// True once every window-based field carries a value.
    pub fn is_fully_defined(&self) -> bool {
        [
            self.liquidity_high,
            self.liquidity_low,
            self.support,
            self.resistance,
            self.rsi,
            self.ema_fast,
            self.ema_slow,
            self.macd,
            self.macd_signal,
            self.macd_histogram,
        ]
        .iter()
        .all(Option::is_some)
    }
}
