use super::utils::*;

// Morning Star: long bearish bar, small star gapping down, bullish bar closing
// more than `penetration` into the first body
pub fn morning_star(candles: &Candles, index: usize, penetration: f64) -> i32 {
    if index < 2 {
        return NONE;
    }
    let (first, second, third) = (index - 2, index - 1, index);

    let first_body = candles.body(first);
    if first_body <= 0.0 || !candles.is_bearish(first) || !candles.is_bullish(third) {
        return NONE;
    }

    let first_close = candles.close[first];
    let star_is_small = candles.body(second) < 0.3 * first_body;
    let gaps_down = candles.open[second].max(candles.close[second]) < first_close;
    let closes_into_first = (candles.close[third] - first_close) / first_body > penetration;

    if star_is_small && gaps_down && closes_into_first {
        BULLISH
    } else {
        NONE
    }
}

// Evening Star: long bullish bar, small star gapping up, bearish bar closing
// more than `penetration` into the first body
pub fn evening_star(candles: &Candles, index: usize, penetration: f64) -> i32 {
    if index < 2 {
        return NONE;
    }
    let (first, second, third) = (index - 2, index - 1, index);

    let first_body = candles.body(first);
    if first_body <= 0.0 || !candles.is_bullish(first) || !candles.is_bearish(third) {
        return NONE;
    }

    let first_close = candles.close[first];
    let star_is_small = candles.body(second) < 0.3 * first_body;
    let gaps_up = candles.open[second].min(candles.close[second]) > first_close;
    let closes_into_first = (first_close - candles.close[third]) / first_body > penetration;

    if star_is_small && gaps_up && closes_into_first {
        BEARISH
    } else {
        NONE
    }
}

// Three White Soldiers: three rising bullish bars, each opening inside the
// previous body, with short upper shadows
pub fn three_white_soldiers(candles: &Candles, index: usize, _penetration: f64) -> i32 {
    if index < 2 {
        return NONE;
    }
    let bars = [index - 2, index - 1, index];

    if !bars.iter().all(|&i| candles.is_bullish(i)) {
        return NONE;
    }

    let steps_up = bars.windows(2).all(|pair| {
        let (prev, curr) = (pair[0], pair[1]);
        candles.close[curr] > candles.close[prev]
            && candles.open[curr] > candles.open[prev]
            && candles.open[curr] < candles.close[prev]
    });
    let short_upper_shadows = bars
        .iter()
        .all(|&i| candles.upper_shadow(i) < 0.3 * candles.body(i));

    if steps_up && short_upper_shadows {
        BULLISH
    } else {
        NONE
    }
}

// Three Black Crows: three falling bearish bars, each opening inside the
// previous body, with short lower shadows
pub fn three_black_crows(candles: &Candles, index: usize, _penetration: f64) -> i32 {
    if index < 2 {
        return NONE;
    }
    let bars = [index - 2, index - 1, index];

    if !bars.iter().all(|&i| candles.is_bearish(i)) {
        return NONE;
    }

    let steps_down = bars.windows(2).all(|pair| {
        let (prev, curr) = (pair[0], pair[1]);
        candles.close[curr] < candles.close[prev]
            && candles.open[curr] < candles.open[prev]
            && candles.open[curr] > candles.close[prev]
    });
    let short_lower_shadows = bars
        .iter()
        .all(|&i| candles.lower_shadow(i) < 0.3 * candles.body(i));

    if steps_down && short_lower_shadows {
        BEARISH
    } else {
        NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_morning_and_evening_star() {
        let morning = Candles::new(&[12.0, 9.6, 9.9], &[12.1, 9.8, 11.6], &[9.9, 9.3, 9.8], &[10.0, 9.5, 11.5]);
        assert_eq!(morning_star(&morning, 2, 0.3), BULLISH);
        assert_eq!(evening_star(&morning, 2, 0.3), NONE);

        let evening = Candles::new(&[10.0, 12.4, 12.1], &[12.1, 12.7, 12.2], &[9.9, 12.3, 10.4], &[12.0, 12.5, 10.5]);
        assert_eq!(evening_star(&evening, 2, 0.3), BEARISH);
        assert_eq!(evening_star(&evening, 2, 0.9), NONE);
    }

    #[test]
    fn detects_three_white_soldiers() {
        let candles = Candles::new(&[10.0, 10.5, 11.5], &[11.1, 12.1, 13.1], &[9.9, 10.4, 11.4], &[11.0, 12.0, 13.0]);
        assert_eq!(three_white_soldiers(&candles, 2, 0.0), BULLISH);
        assert_eq!(three_black_crows(&candles, 2, 0.0), NONE);
    }

    #[test]
    fn detects_three_black_crows() {
        let candles = Candles::new(&[13.0, 12.5, 11.5], &[13.1, 12.6, 11.6], &[11.9, 10.9, 9.9], &[12.0, 11.0, 10.0]);
        assert_eq!(three_black_crows(&candles, 2, 0.0), BEARISH);
    }
}
