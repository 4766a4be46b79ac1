// Streaming indicator state machines used by the native formulas.
// Each emits NaN until its window is filled.

use crate::backend::BackendError;
use std::collections::VecDeque;

/// The `Next` trait is used for indicators that consume one value at a time
pub trait Next<T> {
    type Output;
    fn next(&mut self, input: T) -> Self::Output;
}

fn check_period(period: usize) -> Result<(), BackendError> {
    if period == 0 {
        return Err(BackendError::InvalidParameter {
            name: "length".to_string(),
            reason: "period must be greater than 0".to_string(),
        });
    }
    Ok(())
}

/// Simple Moving Average
pub struct SimpleMovingAverage {
    period: usize,
    window: VecDeque<f64>,
    sum: f64,
}

impl SimpleMovingAverage {
    pub fn new(period: usize) -> Result<Self, BackendError> {
        check_period(period)?;
        Ok(Self {
            period,
            window: VecDeque::with_capacity(period + 1),
            sum: 0.0,
        })
    }
}

impl Next<f64> for SimpleMovingAverage {
    type Output = f64;

    fn next(&mut self, input: f64) -> Self::Output {
        self.window.push_back(input);
        self.sum += input;
        if self.window.len() > self.period {
            if let Some(old) = self.window.pop_front() {
                self.sum -= old;
            }
        }

        if self.window.len() < self.period {
            f64::NAN
        } else {
            self.sum / self.period as f64
        }
    }
}

/// Exponential Moving Average, seeded with the SMA of the first window
pub struct ExponentialMovingAverage {
    period: usize,
    alpha: f64,
    value: Option<f64>,
    index: usize,
    sum: f64,
}

impl ExponentialMovingAverage {
    pub fn new(period: usize) -> Result<Self, BackendError> {
        check_period(period)?;
        Ok(Self {
            period,
            alpha: 2.0 / (period as f64 + 1.0),
            value: None,
            index: 0,
            sum: 0.0,
        })
    }
}

impl Next<f64> for ExponentialMovingAverage {
    type Output = f64;

    fn next(&mut self, input: f64) -> Self::Output {
        let value = match self.value {
            Some(prev) => input * self.alpha + prev * (1.0 - self.alpha),
            None => {
                // Accumulate values for the seed SMA
                self.sum += input;
                self.index += 1;
                if self.index < self.period {
                    return f64::NAN;
                }
                self.sum / self.period as f64
            }
        };
        self.value = Some(value);
        value
    }
}

/// Wilder smoothing: SMA seed, then `(prev * (n - 1) + x) / n`
pub struct WilderAverage {
    period: usize,
    value: Option<f64>,
    index: usize,
    sum: f64,
}

impl WilderAverage {
    pub fn new(period: usize) -> Result<Self, BackendError> {
        check_period(period)?;
        Ok(Self {
            period,
            value: None,
            index: 0,
            sum: 0.0,
        })
    }
}

impl Next<f64> for WilderAverage {
    type Output = f64;

    fn next(&mut self, input: f64) -> Self::Output {
        let value = match self.value {
            Some(prev) => (prev * (self.period - 1) as f64 + input) / self.period as f64,
            None => {
                self.sum += input;
                self.index += 1;
                if self.index < self.period {
                    return f64::NAN;
                }
                self.sum / self.period as f64
            }
        };
        self.value = Some(value);
        value
    }
}

/// Relative Strength Index (RSI) indicator
pub struct RelativeStrengthIndex {
    prev_value: Option<f64>,
    avg_gain: WilderAverage,
    avg_loss: WilderAverage,
}

impl RelativeStrengthIndex {
    pub fn new(period: usize) -> Result<Self, BackendError> {
        Ok(Self {
            prev_value: None,
            avg_gain: WilderAverage::new(period)?,
            avg_loss: WilderAverage::new(period)?,
        })
    }
}

impl Next<f64> for RelativeStrengthIndex {
    type Output = f64;

    fn next(&mut self, input: f64) -> Self::Output {
        let prev = match self.prev_value.replace(input) {
            Some(prev) => prev,
            None => return f64::NAN,
        };

        let change = input - prev;
        let avg_gain = self.avg_gain.next(change.max(0.0));
        let avg_loss = self.avg_loss.next((-change).max(0.0));

        if avg_gain.is_nan() || avg_loss.is_nan() {
            f64::NAN
        } else if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        }
    }
}

/// MACD (Moving Average Convergence Divergence) output
pub struct MacdOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Moving Average Convergence Divergence
pub struct MovingAverageConvergenceDivergence {
    fast_ema: ExponentialMovingAverage,
    slow_ema: ExponentialMovingAverage,
    signal_ema: ExponentialMovingAverage,
}

impl MovingAverageConvergenceDivergence {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Result<Self, BackendError> {
        if fast_period >= slow_period {
            return Err(BackendError::InvalidParameter {
                name: "fast".to_string(),
                reason: "fast period must be less than slow period".to_string(),
            });
        }

        Ok(Self {
            fast_ema: ExponentialMovingAverage::new(fast_period)?,
            slow_ema: ExponentialMovingAverage::new(slow_period)?,
            signal_ema: ExponentialMovingAverage::new(signal_period)?,
        })
    }
}

impl Next<f64> for MovingAverageConvergenceDivergence {
    type Output = MacdOutput;

    fn next(&mut self, input: f64) -> Self::Output {
        let fast = self.fast_ema.next(input);
        let slow = self.slow_ema.next(input);
        let macd = fast - slow;

        // The signal line only starts once the MACD line is defined
        let signal = if macd.is_nan() {
            f64::NAN
        } else {
            self.signal_ema.next(macd)
        };

        MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        }
    }
}

/// Commodity Channel Index, fed with typical prices
pub struct CommodityChannelIndex {
    period: usize,
    typical_prices: VecDeque<f64>,
}

impl CommodityChannelIndex {
    pub fn new(period: usize) -> Result<Self, BackendError> {
        check_period(period)?;
        Ok(Self {
            period,
            typical_prices: VecDeque::with_capacity(period + 1),
        })
    }
}

impl Next<f64> for CommodityChannelIndex {
    type Output = f64;

    fn next(&mut self, typical_price: f64) -> Self::Output {
        self.typical_prices.push_back(typical_price);
        if self.typical_prices.len() > self.period {
            self.typical_prices.pop_front();
        }

        if self.typical_prices.len() < self.period {
            return f64::NAN;
        }

        let sma = self.typical_prices.iter().sum::<f64>() / self.period as f64;
        let mean_deviation = self
            .typical_prices
            .iter()
            .map(|p| (p - sma).abs())
            .sum::<f64>()
            / self.period as f64;

        if mean_deviation == 0.0 {
            return 0.0;
        }

        (typical_price - sma) / (0.015 * mean_deviation)
    }
}

/// Money Flow Index, fed with (typical price, volume)
pub struct MoneyFlowIndex {
    period: usize,
    positive_flows: VecDeque<f64>,
    negative_flows: VecDeque<f64>,
    prev_typical_price: Option<f64>,
}

impl MoneyFlowIndex {
    pub fn new(period: usize) -> Result<Self, BackendError> {
        check_period(period)?;
        Ok(Self {
            period,
            positive_flows: VecDeque::with_capacity(period + 1),
            negative_flows: VecDeque::with_capacity(period + 1),
            prev_typical_price: None,
        })
    }
}

impl Next<(f64, f64)> for MoneyFlowIndex {
    type Output = f64;

    fn next(&mut self, (typical_price, volume): (f64, f64)) -> Self::Output {
        let prev = match self.prev_typical_price.replace(typical_price) {
            Some(prev) => prev,
            None => return f64::NAN,
        };

        let money_flow = typical_price * volume;
        let (positive, negative) = if typical_price > prev {
            (money_flow, 0.0)
        } else if typical_price < prev {
            (0.0, money_flow)
        } else {
            (0.0, 0.0)
        };

        self.positive_flows.push_back(positive);
        self.negative_flows.push_back(negative);
        if self.positive_flows.len() > self.period {
            self.positive_flows.pop_front();
            self.negative_flows.pop_front();
        }

        if self.positive_flows.len() < self.period {
            return f64::NAN;
        }

        let positive_sum = self.positive_flows.iter().sum::<f64>();
        let negative_sum = self.negative_flows.iter().sum::<f64>();

        if positive_sum + negative_sum == 0.0 {
            return 50.0;
        }
        if negative_sum == 0.0 {
            return 100.0;
        }

        let money_ratio = positive_sum / negative_sum;
        100.0 - (100.0 / (1.0 + money_ratio))
    }
}

/// How [`RateOfChange`] compares a price with the one `period` bars back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// `price - old` (momentum)
    Difference,
    /// `(price - old) / old * 100`
    Percent,
    /// `(price - old) / old`
    Fraction,
    /// `price / old`
    Ratio,
    /// `price / old * 100`
    Ratio100,
}

/// Change over `period` bars
pub struct RateOfChange {
    period: usize,
    prices: VecDeque<f64>,
    change: Change,
}

impl RateOfChange {
    pub fn new(period: usize) -> Result<Self, BackendError> {
        Self::with_change(period, Change::Percent)
    }

    /// Plain difference instead of percent (momentum)
    pub fn absolute(period: usize) -> Result<Self, BackendError> {
        Self::with_change(period, Change::Difference)
    }

    pub fn with_change(period: usize, change: Change) -> Result<Self, BackendError> {
        check_period(period)?;
        Ok(Self {
            period,
            prices: VecDeque::with_capacity(period + 2),
            change,
        })
    }
}

impl Next<f64> for RateOfChange {
    type Output = f64;

    fn next(&mut self, price: f64) -> Self::Output {
        self.prices.push_back(price);
        if self.prices.len() > self.period + 1 {
            self.prices.pop_front();
        }

        let old_price = match self.prices.front() {
            Some(&old) if self.prices.len() > self.period => old,
            _ => return f64::NAN,
        };

        if self.change == Change::Difference {
            return price - old_price;
        }
        if old_price == 0.0 {
            return f64::NAN;
        }
        match self.change {
            Change::Difference => price - old_price,
            Change::Percent => (price - old_price) / old_price * 100.0,
            Change::Fraction => (price - old_price) / old_price,
            Change::Ratio => price / old_price,
            Change::Ratio100 => price / old_price * 100.0,
        }
    }
}

/// Population standard deviation over a rolling window
pub struct StandardDeviation {
    period: usize,
    values: VecDeque<f64>,
}

impl StandardDeviation {
    pub fn new(period: usize) -> Result<Self, BackendError> {
        check_period(period)?;
        Ok(Self {
            period,
            values: VecDeque::with_capacity(period + 1),
        })
    }
}

impl Next<f64> for StandardDeviation {
    type Output = f64;

    fn next(&mut self, input: f64) -> Self::Output {
        self.values.push_back(input);
        if self.values.len() > self.period {
            self.values.pop_front();
        }

        if self.values.len() < self.period {
            return f64::NAN;
        }

        let mean = self.values.iter().sum::<f64>() / self.period as f64;
        let variance = self
            .values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / self.period as f64;

        variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<N: Next<f64, Output = f64>>(mut indicator: N, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| indicator.next(x)).collect()
    }

    #[test]
    fn sma_window() {
        let out = run(SimpleMovingAverage::new(3).unwrap(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(out[1].is_nan());
        assert_eq!(&out[2..], &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn ema_is_seeded_with_sma() {
        let out = run(ExponentialMovingAverage::new(3).unwrap(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(out[1].is_nan());
        assert_eq!(out[2], 2.0);
        assert_eq!(out[3], 3.0);
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(SimpleMovingAverage::new(0).is_err());
        assert!(RelativeStrengthIndex::new(0).is_err());
        assert!(MovingAverageConvergenceDivergence::new(26, 12, 9).is_err());
    }

    #[test]
    fn rsi_of_rising_series_is_100() {
        let input: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let out = run(RelativeStrengthIndex::new(14).unwrap(), &input);
        assert!(out[13].is_nan());
        assert_eq!(out[14], 100.0);
        assert_eq!(out[19], 100.0);
    }

    #[test]
    fn rsi_stays_in_range() {
        let input: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.9).sin() * 3.0).collect();
        let out = run(RelativeStrengthIndex::new(14).unwrap(), &input);
        assert!(out.iter().filter(|v| !v.is_nan()).all(|&v| (0.0..=100.0).contains(&v)));
    }

    #[test]
    fn roc_and_momentum() {
        let input = [10.0, 11.0, 12.0, 15.0];
        let roc = run(RateOfChange::new(2).unwrap(), &input);
        assert!(roc[1].is_nan());
        assert!((roc[2] - 20.0).abs() < 1e-12);
        let mom = run(RateOfChange::absolute(2).unwrap(), &input);
        assert_eq!(mom[3], 4.0);
    }

    #[test]
    fn ratio_variants() {
        let input = [10.0, 11.0, 12.5];
        let fraction = run(RateOfChange::with_change(2, Change::Fraction).unwrap(), &input);
        assert!((fraction[2] - 0.25).abs() < 1e-12);
        let ratio = run(RateOfChange::with_change(2, Change::Ratio).unwrap(), &input);
        assert!((ratio[2] - 1.25).abs() < 1e-12);
        let ratio100 = run(RateOfChange::with_change(2, Change::Ratio100).unwrap(), &input);
        assert!((ratio100[2] - 125.0).abs() < 1e-12);

        let from_zero = run(RateOfChange::with_change(1, Change::Ratio).unwrap(), &[0.0, 1.0]);
        assert!(from_zero[1].is_nan());
    }

    #[test]
    fn standard_deviation_of_constant_is_zero() {
        let out = run(StandardDeviation::new(4).unwrap(), &[5.0; 6]);
        assert!(out[2].is_nan());
        assert_eq!(out[5], 0.0);
    }
}
