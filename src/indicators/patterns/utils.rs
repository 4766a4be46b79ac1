/// Scores emitted for a detected pattern
pub const BULLISH: i32 = 100;
pub const BEARISH: i32 = -100;
pub const NONE: i32 = 0;

/// Borrowed OHLC columns of equal length
#[derive(Debug, Clone, Copy)]
pub struct Candles<'a> {
    pub open: &'a [f64],
    pub high: &'a [f64],
    pub low: &'a [f64],
    pub close: &'a [f64],
}

impl<'a> Candles<'a> {
    pub fn new(open: &'a [f64], high: &'a [f64], low: &'a [f64], close: &'a [f64]) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn body(&self, index: usize) -> f64 {
        body_size(self.open[index], self.close[index])
    }

    pub fn range(&self, index: usize) -> f64 {
        self.high[index] - self.low[index]
    }

    pub fn upper_shadow(&self, index: usize) -> f64 {
        upper_shadow(self.high[index], self.open[index], self.close[index])
    }

    pub fn lower_shadow(&self, index: usize) -> f64 {
        lower_shadow(self.low[index], self.open[index], self.close[index])
    }

    pub fn is_bullish(&self, index: usize) -> bool {
        is_bullish(self.open[index], self.close[index])
    }

    pub fn is_bearish(&self, index: usize) -> bool {
        is_bearish(self.open[index], self.close[index])
    }
}

// Helper functions for pattern recognition
pub fn is_bullish(open: f64, close: f64) -> bool {
    close > open
}

pub fn is_bearish(open: f64, close: f64) -> bool {
    close < open
}

pub fn body_size(open: f64, close: f64) -> f64 {
    (open - close).abs()
}

pub fn upper_shadow(high: f64, open: f64, close: f64) -> f64 {
    high - open.max(close)
}

pub fn lower_shadow(low: f64, open: f64, close: f64) -> f64 {
    open.min(close) - low
}

// Closes rose over the `periods` bars before `index`
pub fn has_uptrend(candles: &Candles, index: usize, periods: usize) -> bool {
    if index < periods {
        return false;
    }

    (1..periods).all(|i| candles.close[index - i] >= candles.close[index - (i + 1)])
}

// Closes fell over the `periods` bars before `index`
pub fn has_downtrend(candles: &Candles, index: usize, periods: usize) -> bool {
    if index < periods {
        return false;
    }

    (1..periods).all(|i| candles.close[index - i] <= candles.close[index - (i + 1)])
}
