use super::utils::*;

// Doji: very small body compared to the range
pub fn doji(candles: &Candles, index: usize, _penetration: f64) -> i32 {
    let range = candles.range(index);
    if range <= 0.0 {
        return NONE;
    }

    if candles.body(index) / range < 0.1 {
        BULLISH
    } else {
        NONE
    }
}

// Hammer: small body, long lower shadow, little upper shadow, after a decline
pub fn hammer(candles: &Candles, index: usize, _penetration: f64) -> i32 {
    let range = candles.range(index);
    if range <= 0.0 || !has_downtrend(candles, index, 3) {
        return NONE;
    }

    let body_ratio = candles.body(index) / range;
    let upper_ratio = candles.upper_shadow(index) / range;
    let lower_ratio = candles.lower_shadow(index) / range;

    if body_ratio < 0.33 && lower_ratio > 0.6 && upper_ratio < 0.1 {
        BULLISH
    } else {
        NONE
    }
}

// Inverted Hammer: small body, long upper shadow, little lower shadow, after a decline
pub fn inverted_hammer(candles: &Candles, index: usize, _penetration: f64) -> i32 {
    let range = candles.range(index);
    if range <= 0.0 || !has_downtrend(candles, index, 3) {
        return NONE;
    }

    let body_ratio = candles.body(index) / range;
    let upper_ratio = candles.upper_shadow(index) / range;
    let lower_ratio = candles.lower_shadow(index) / range;

    if body_ratio < 0.33 && upper_ratio > 0.6 && lower_ratio < 0.1 {
        BULLISH
    } else {
        NONE
    }
}

// Spinning Top: small body between shadows of similar length; sign follows candle color
pub fn spinning_top(candles: &Candles, index: usize, _penetration: f64) -> i32 {
    let range = candles.range(index);
    if range <= 0.0 {
        return NONE;
    }

    let body_ratio = candles.body(index) / range;
    let upper_ratio = candles.upper_shadow(index) / range;
    let lower_ratio = candles.lower_shadow(index) / range;

    let is_spinning_top = body_ratio < 0.33
        && upper_ratio > 0.25
        && lower_ratio > 0.25
        && (upper_ratio / lower_ratio) < 2.0
        && (lower_ratio / upper_ratio) < 2.0;

    if !is_spinning_top {
        NONE
    } else if candles.is_bearish(index) {
        BEARISH
    } else {
        BULLISH
    }
}
