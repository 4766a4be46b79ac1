use super::streaming::{ExponentialMovingAverage, Next};
use crate::backend::BackendError;

pub struct VolumeCalculator;

impl VolumeCalculator {
    // Calculate OBV (On Balance Volume), starting from the first bar's volume
    pub fn calculate_obv(close: &[f64], volume: &[f64]) -> Vec<f64> {
        let mut results = Vec::with_capacity(close.len());
        let mut obv = 0.0;

        for i in 0..close.len() {
            if i == 0 {
                obv = volume[0];
            } else if close[i] > close[i - 1] {
                obv += volume[i];
            } else if close[i] < close[i - 1] {
                obv -= volume[i];
            }
            // If equal, OBV remains unchanged
            results.push(obv);
        }

        results
    }

    // Calculate Accumulation/Distribution Line
    pub fn calculate_ad_line(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Vec<f64> {
        let mut ad_line = 0.0;

        (0..close.len())
            .map(|i| {
                // Money Flow Multiplier, zero on a flat bar
                let range = high[i] - low[i];
                let mfm = if range > 0.0 {
                    ((close[i] - low[i]) - (high[i] - close[i])) / range
                } else {
                    0.0
                };
                ad_line += mfm * volume[i];
                ad_line
            })
            .collect()
    }

    // Calculate Chaikin Oscillator = EMA(fast) - EMA(slow) of the A/D line
    pub fn calculate_chaikin_oscillator(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        volume: &[f64],
        fast_period: usize,
        slow_period: usize,
    ) -> Result<Vec<f64>, BackendError> {
        if fast_period >= slow_period {
            return Err(BackendError::InvalidParameter {
                name: "fast".to_string(),
                reason: "fast period must be less than slow period".to_string(),
            });
        }

        let mut fast_ema = ExponentialMovingAverage::new(fast_period)?;
        let mut slow_ema = ExponentialMovingAverage::new(slow_period)?;

        Ok(Self::calculate_ad_line(high, low, close, volume)
            .into_iter()
            .map(|ad| fast_ema.next(ad) - slow_ema.next(ad))
            .collect())
    }
}
