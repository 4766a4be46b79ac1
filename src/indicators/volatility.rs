use super::streaming::{Next, StandardDeviation, WilderAverage};
use crate::backend::BackendError;

pub struct VolatilityCalculator;

impl VolatilityCalculator {
    // Calculate True Range
    // TR = max(high - low, |high - prev_close|, |low - prev_close|); the first bar has no
    // previous close and uses high - low
    pub fn calculate_true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        (0..close.len())
            .map(|i| {
                let range = high[i] - low[i];
                if i == 0 {
                    return range;
                }
                let prev_close = close[i - 1];
                range
                    .max((high[i] - prev_close).abs())
                    .max((low[i] - prev_close).abs())
            })
            .collect()
    }

    // Calculate ATR (Average True Range) with Wilder smoothing
    pub fn calculate_atr(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        period: usize,
    ) -> Result<Vec<f64>, BackendError> {
        let mut atr = WilderAverage::new(period)?;
        Ok(Self::calculate_true_range(high, low, close)
            .into_iter()
            .map(|tr| atr.next(tr))
            .collect())
    }

    // Calculate NATR (Normalized ATR - as percentage of close price)
    pub fn calculate_natr(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        period: usize,
    ) -> Result<Vec<f64>, BackendError> {
        let atr = Self::calculate_atr(high, low, close, period)?;
        Ok(atr
            .iter()
            .zip(close)
            .map(|(&atr, &c)| if c > 0.0 { atr / c * 100.0 } else { f64::NAN })
            .collect())
    }

    // Calculate Standard Deviation scaled by `deviations`
    pub fn calculate_standard_deviation(
        close: &[f64],
        period: usize,
        deviations: f64,
    ) -> Result<Vec<f64>, BackendError> {
        let mut stddev = StandardDeviation::new(period)?;
        Ok(close.iter().map(|&c| stddev.next(c) * deviations).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_range_uses_previous_close() {
        let tr = VolatilityCalculator::calculate_true_range(&[10.0, 12.0], &[8.0, 11.0], &[9.0, 11.5]);
        assert_eq!(tr, vec![2.0, 3.0]);
    }

    #[test]
    fn atr_of_constant_range() {
        let high = vec![11.0; 20];
        let low = vec![9.0; 20];
        let close = vec![10.0; 20];
        let atr = VolatilityCalculator::calculate_atr(&high, &low, &close, 14).unwrap();
        assert!(atr[12].is_nan());
        assert_eq!(atr[13], 2.0);
        assert_eq!(atr[19], 2.0);

        let natr = VolatilityCalculator::calculate_natr(&high, &low, &close, 14).unwrap();
        assert_eq!(natr[19], 20.0);
    }
}
