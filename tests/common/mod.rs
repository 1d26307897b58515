#![allow(dead_code)]

use smc_analyst::domain::market::Candle;

pub const HOUR_MS: i64 = 3_600_000;
pub const START_MS: i64 = 1_700_000_000_000;

pub fn candle(i: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle::new(START_MS + i as i64 * HOUR_MS, open, high, low, close, 1_000.0)
}

/// close = 100 + i, open = previous close, wicks of 0.5 on each side
pub fn uptrend(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let close = 100.0 + i as f64;
            let open = close - 1.0;
            candle(i, open, close + 0.5, open - 0.5, close)
        })
        .collect()
}

/// close = 200 - i, open = previous close, wicks of 0.5 on each side
pub fn downtrend(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let close = 200.0 - i as f64;
            let open = close + 1.0;
            candle(i, open, open + 0.5, close - 0.5, close)
        })
        .collect()
}

pub fn flat(n: usize, price: f64) -> Vec<Candle> {
    (0..n).map(|i| candle(i, price, price, price, price)).collect()
}

/// Uptrend whose second to last bar is a small bearish pullback and whose
/// last bar engulfs it.
pub fn uptrend_with_engulfing_finish() -> Vec<Candle> {
    let mut candles = uptrend(58);
    candles.push(candle(58, 158.0, 158.5, 157.0, 157.5));
    candles.push(candle(59, 157.5, 160.5, 157.2, 160.0));
    candles
}
