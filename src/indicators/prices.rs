// Per-bar price transforms

pub struct PriceCalculator;

impl PriceCalculator {
    // (open + high + low + close) / 4
    pub fn average_price(open: &[f64], high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        (0..close.len())
            .map(|i| (open[i] + high[i] + low[i] + close[i]) / 4.0)
            .collect()
    }

    // (high + low) / 2
    pub fn median_price(high: &[f64], low: &[f64]) -> Vec<f64> {
        high.iter().zip(low).map(|(h, l)| (h + l) / 2.0).collect()
    }

    // (high + low + close) / 3
    pub fn typical_price(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        (0..close.len())
            .map(|i| (high[i] + low[i] + close[i]) / 3.0)
            .collect()
    }

    // (high + low + 2 * close) / 4
    pub fn weighted_close(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        (0..close.len())
            .map(|i| (high[i] + low[i] + 2.0 * close[i]) / 4.0)
            .collect()
    }

    // Balance of power: (close - open) / (high - low), zero on a flat bar
    pub fn balance_of_power(open: &[f64], high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        (0..close.len())
            .map(|i| {
                let range = high[i] - low[i];
                if range > 0.0 {
                    (close[i] - open[i]) / range
                } else {
                    0.0
                }
            })
            .collect()
    }
}
