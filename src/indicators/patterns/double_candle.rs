use super::utils::*;

// Engulfing: the current body engulfs the previous, opposite-colored body
pub fn engulfing(candles: &Candles, index: usize, _penetration: f64) -> i32 {
    if index < 1 {
        return NONE;
    }
    let prev = index - 1;

    let (curr_open, curr_close) = (candles.open[index], candles.close[index]);
    let (prev_open, prev_close) = (candles.open[prev], candles.close[prev]);

    if candles.is_bullish(index) && candles.is_bearish(prev) && curr_open <= prev_close && curr_close >= prev_open {
        return BULLISH;
    }
    if candles.is_bearish(index) && candles.is_bullish(prev) && curr_open >= prev_close && curr_close <= prev_open {
        return BEARISH;
    }

    NONE
}

// Harami: a small body contained in the previous, opposite-colored body
pub fn harami(candles: &Candles, index: usize, _penetration: f64) -> i32 {
    if index < 1 {
        return NONE;
    }
    let prev = index - 1;

    if candles.body(index) >= candles.body(prev) {
        return NONE;
    }

    let (curr_open, curr_close) = (candles.open[index], candles.close[index]);
    let (prev_open, prev_close) = (candles.open[prev], candles.close[prev]);

    if candles.is_bullish(index) && candles.is_bearish(prev) && curr_open > prev_close && curr_close < prev_open {
        return BULLISH;
    }
    if candles.is_bearish(index) && candles.is_bullish(prev) && curr_open < prev_close && curr_close > prev_open {
        return BEARISH;
    }

    NONE
}

// Piercing Line: after a decline, a bullish bar opens below the previous low
// and closes above the midpoint of the previous bearish body. The depth is
// fixed, so the penetration argument is ignored.
pub fn piercing_line(candles: &Candles, index: usize, _penetration: f64) -> i32 {
    if index < 1 || !has_downtrend(candles, index, 3) {
        return NONE;
    }
    let prev = index - 1;

    if !(candles.is_bearish(prev) && candles.is_bullish(index)) {
        return NONE;
    }
    if candles.open[index] >= candles.low[prev] {
        return NONE;
    }

    let midpoint = candles.close[prev] + candles.body(prev) * 0.5;
    if candles.close[index] > midpoint && candles.close[index] < candles.open[prev] {
        BULLISH
    } else {
        NONE
    }
}

// Dark Cloud Cover: after a rise, a bearish bar opens above the previous high
// and closes more than `penetration` into the previous bullish body
pub fn dark_cloud_cover(candles: &Candles, index: usize, penetration: f64) -> i32 {
    if index < 1 || !has_uptrend(candles, index, 3) {
        return NONE;
    }
    let prev = index - 1;

    if !(candles.is_bullish(prev) && candles.is_bearish(index)) {
        return NONE;
    }
    if candles.open[index] <= candles.high[prev] {
        return NONE;
    }

    let penetration_point = candles.close[prev] - candles.body(prev) * penetration;
    if candles.close[index] < penetration_point && candles.close[index] > candles.open[prev] {
        BEARISH
    } else {
        NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bullish_and_bearish_engulfing() {
        let candles = Candles::new(&[10.0, 9.0, 11.5], &[10.5, 11.5, 11.6], &[8.5, 8.8, 8.0], &[9.2, 11.0, 8.5]);
        assert_eq!(engulfing(&candles, 0, 0.0), NONE);
        assert_eq!(engulfing(&candles, 1, 0.0), BULLISH);
        assert_eq!(engulfing(&candles, 2, 0.0), BEARISH);
    }

    #[test]
    fn detects_harami() {
        let candles = Candles::new(&[12.0, 10.5], &[12.5, 11.2], &[9.5, 10.2], &[10.0, 11.0]);
        assert_eq!(harami(&candles, 1, 0.0), BULLISH);
    }

    #[test]
    fn detects_piercing_line() {
        let open = [15.0, 14.0, 13.0, 12.0, 9.5];
        let high = [15.2, 14.2, 13.2, 12.2, 11.6];
        let low = [13.8, 12.8, 11.8, 9.8, 9.4];
        let close = [14.0, 13.0, 12.0, 10.0, 11.5];
        let candles = Candles::new(&open, &high, &low, &close);
        assert_eq!(piercing_line(&candles, 4, 0.0), BULLISH);
    }

    #[test]
    fn piercing_line_depth_is_the_body_midpoint() {
        let open = [15.0, 14.0, 13.0, 12.0, 9.5];
        let high = [15.2, 14.2, 13.2, 12.2, 11.6];
        let low = [13.8, 12.8, 11.8, 9.8, 9.4];
        let shallow = Candles::new(&open, &high, &low, &[14.0, 13.0, 12.0, 10.0, 10.8]);
        assert_eq!(piercing_line(&shallow, 4, 0.0), NONE);
        assert_eq!(piercing_line(&shallow, 4, 0.1), NONE);

        let deep = Candles::new(&open, &high, &low, &[14.0, 13.0, 12.0, 10.0, 11.5]);
        assert_eq!(piercing_line(&deep, 4, 0.9), BULLISH);
    }
}
