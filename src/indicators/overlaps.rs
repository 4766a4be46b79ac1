use super::streaming::{ExponentialMovingAverage, Next, SimpleMovingAverage, StandardDeviation};
use crate::backend::BackendError;

pub struct OverlapCalculator;

impl OverlapCalculator {
    // Calculate SMA (Simple Moving Average)
    pub fn calculate_sma(close: &[f64], period: usize) -> Result<Vec<f64>, BackendError> {
        let mut sma = SimpleMovingAverage::new(period)?;
        Ok(close.iter().map(|&c| sma.next(c)).collect())
    }

    // Calculate EMA (Exponential Moving Average)
    pub fn calculate_ema(close: &[f64], period: usize) -> Result<Vec<f64>, BackendError> {
        let mut ema = ExponentialMovingAverage::new(period)?;
        Ok(close.iter().map(|&c| ema.next(c)).collect())
    }

    // Calculate WMA (Weighted Moving Average), weights 1..=period with the newest heaviest
    pub fn calculate_wma(close: &[f64], period: usize) -> Result<Vec<f64>, BackendError> {
        let mut results = vec![f64::NAN; close.len()];
        if period == 0 {
            return Err(BackendError::InvalidParameter {
                name: "length".to_string(),
                reason: "period must be greater than 0".to_string(),
            });
        }

        let denominator = (period * (period + 1)) as f64 / 2.0;
        for (i, window) in close.windows(period).enumerate() {
            let weighted: f64 = window
                .iter()
                .enumerate()
                .map(|(w, value)| (w + 1) as f64 * value)
                .sum();
            results[i + period - 1] = weighted / denominator;
        }

        Ok(results)
    }

    // Calculate TRIMA, an SMA of an SMA whose two windows add up to `period + 1`
    pub fn calculate_trima(close: &[f64], period: usize) -> Result<Vec<f64>, BackendError> {
        let first = (period + 1) / 2;
        let second = period + 1 - first;
        let mut inner = SimpleMovingAverage::new(first)?;
        let mut outer = SimpleMovingAverage::new(second)?;

        Ok(close
            .iter()
            .map(|&c| {
                let smoothed = inner.next(c);
                if smoothed.is_nan() {
                    f64::NAN
                } else {
                    outer.next(smoothed)
                }
            })
            .collect())
    }

    // Calculate MIDPOINT: (highest + lowest close) / 2 over the period
    pub fn calculate_midpoint(close: &[f64], period: usize) -> Result<Vec<f64>, BackendError> {
        Self::calculate_midprice(close, close, period)
    }

    // Calculate MIDPRICE: (highest high + lowest low) / 2 over the period
    pub fn calculate_midprice(high: &[f64], low: &[f64], period: usize) -> Result<Vec<f64>, BackendError> {
        if period == 0 {
            return Err(BackendError::InvalidParameter {
                name: "length".to_string(),
                reason: "period must be greater than 0".to_string(),
            });
        }
        Ok(midpoint(high, low, period))
    }

    // Calculate Bollinger Bands, returned as (upper, middle, lower)
    pub fn calculate_bollinger_bands(
        close: &[f64],
        period: usize,
        deviation_multiplier: f64,
    ) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), BackendError> {
        let mut sma = SimpleMovingAverage::new(period)?;
        let mut stddev = StandardDeviation::new(period)?;

        let mut upper = Vec::with_capacity(close.len());
        let mut middle = Vec::with_capacity(close.len());
        let mut lower = Vec::with_capacity(close.len());

        for &c in close {
            let mid = sma.next(c);
            let dev = stddev.next(c) * deviation_multiplier;
            upper.push(mid + dev);
            middle.push(mid);
            lower.push(mid - dev);
        }

        Ok((upper, middle, lower))
    }

    // Calculate VWAP, cumulative over the whole range using the typical price
    pub fn calculate_vwap(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Vec<f64> {
        let mut cumulative_pv = 0.0;
        let mut cumulative_volume = 0.0;

        high.iter()
            .zip(low)
            .zip(close)
            .zip(volume)
            .map(|(((&h, &l), &c), &v)| {
                cumulative_pv += (h + l + c) / 3.0 * v;
                cumulative_volume += v;
                if cumulative_volume == 0.0 {
                    f64::NAN
                } else {
                    cumulative_pv / cumulative_volume
                }
            })
            .collect()
    }

    // Calculate Ichimoku lines: tenkan, kijun, senkou A, senkou B and chikou.
    // Senkou spans are shifted forward and chikou backward by `shift` rows,
    // both clipped to the frame.
    pub fn calculate_ichimoku(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        tenkan: usize,
        kijun: usize,
        senkou_b: usize,
        shift: usize,
    ) -> Result<Vec<Vec<f64>>, BackendError> {
        for (name, period) in [("tenkan", tenkan), ("kijun", kijun), ("senkou_b", senkou_b)] {
            if period == 0 {
                return Err(BackendError::InvalidParameter {
                    name: name.to_string(),
                    reason: "period must be greater than 0".to_string(),
                });
            }
        }

        let len = close.len();
        let tenkan_sen = midpoint(high, low, tenkan);
        let kijun_sen = midpoint(high, low, kijun);
        let senkou_b_base = midpoint(high, low, senkou_b);

        let mut senkou_a = vec![f64::NAN; len];
        let mut senkou_b_line = vec![f64::NAN; len];
        for i in shift..len {
            senkou_a[i] = (tenkan_sen[i - shift] + kijun_sen[i - shift]) / 2.0;
            senkou_b_line[i] = senkou_b_base[i - shift];
        }

        let mut chikou = vec![f64::NAN; len];
        for i in 0..len.saturating_sub(shift) {
            chikou[i] = close[i + shift];
        }

        Ok(vec![tenkan_sen, kijun_sen, senkou_a, senkou_b_line, chikou])
    }
}

// (highest high + lowest low) / 2 over a rolling window
fn midpoint(high: &[f64], low: &[f64], period: usize) -> Vec<f64> {
    let mut results = vec![f64::NAN; high.len()];
    if period == 0 || high.len() < period {
        return results;
    }

    for i in (period - 1)..high.len() {
        let start = i + 1 - period;
        let highest = high[start..=i].iter().copied().fold(f64::MIN, f64::max);
        let lowest = low[start..=i].iter().copied().fold(f64::MAX, f64::min);
        results[i] = (highest + lowest) / 2.0;
    }

    results
}
