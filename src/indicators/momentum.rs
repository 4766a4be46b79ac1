use super::streaming::{
    Change, CommodityChannelIndex, MoneyFlowIndex, MovingAverageConvergenceDivergence, Next, RateOfChange,
    RelativeStrengthIndex, WilderAverage,
};
use crate::backend::BackendError;

pub struct MomentumCalculator;

impl MomentumCalculator {
    // Calculate RSI (Relative Strength Index)
    pub fn calculate_rsi(close: &[f64], period: usize) -> Result<Vec<f64>, BackendError> {
        let mut rsi = RelativeStrengthIndex::new(period)?;
        Ok(close.iter().map(|&c| rsi.next(c)).collect())
    }

    // Calculate MACD, returned as (macd, signal, histogram)
    pub fn calculate_macd(
        close: &[f64],
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    ) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), BackendError> {
        let mut macd = MovingAverageConvergenceDivergence::new(fast_period, slow_period, signal_period)?;

        let mut line = Vec::with_capacity(close.len());
        let mut signal = Vec::with_capacity(close.len());
        let mut histogram = Vec::with_capacity(close.len());

        for &c in close {
            let out = macd.next(c);
            line.push(out.macd);
            signal.push(out.signal);
            histogram.push(out.histogram);
        }

        Ok((line, signal, histogram))
    }

    // Calculate CCI (Commodity Channel Index) from the typical price
    pub fn calculate_cci(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        period: usize,
    ) -> Result<Vec<f64>, BackendError> {
        let mut cci = CommodityChannelIndex::new(period)?;
        Ok(typical_prices(high, low, close)
            .map(|tp| cci.next(tp))
            .collect())
    }

    // Calculate MFI (Money Flow Index)
    pub fn calculate_mfi(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        volume: &[f64],
        period: usize,
    ) -> Result<Vec<f64>, BackendError> {
        let mut mfi = MoneyFlowIndex::new(period)?;
        Ok(typical_prices(high, low, close)
            .zip(volume)
            .map(|(tp, &v)| mfi.next((tp, v)))
            .collect())
    }

    // Calculate ROC (Rate of Change, percent)
    pub fn calculate_roc(close: &[f64], period: usize) -> Result<Vec<f64>, BackendError> {
        let mut roc = RateOfChange::new(period)?;
        Ok(close.iter().map(|&c| roc.next(c)).collect())
    }

    // Calculate Momentum (price difference over the period)
    pub fn calculate_momentum(close: &[f64], period: usize) -> Result<Vec<f64>, BackendError> {
        let mut mom = RateOfChange::absolute(period)?;
        Ok(close.iter().map(|&c| mom.next(c)).collect())
    }

    // ROCP, ROCR and ROCR100
    pub fn calculate_change(close: &[f64], period: usize, change: Change) -> Result<Vec<f64>, BackendError> {
        let mut roc = RateOfChange::with_change(period, change)?;
        Ok(close.iter().map(|&c| roc.next(c)).collect())
    }

    // Calculate CMO (Chande Momentum Oscillator) from Wilder-smoothed gains and losses
    pub fn calculate_cmo(close: &[f64], period: usize) -> Result<Vec<f64>, BackendError> {
        let mut gains = WilderAverage::new(period)?;
        let mut losses = WilderAverage::new(period)?;
        let mut results = Vec::with_capacity(close.len());

        for (i, &c) in close.iter().enumerate() {
            if i == 0 {
                results.push(f64::NAN);
                continue;
            }
            let change = c - close[i - 1];
            let gain = gains.next(change.max(0.0));
            let loss = losses.next((-change).max(0.0));
            let total = gain + loss;
            results.push(if total.is_nan() {
                f64::NAN
            } else if total == 0.0 {
                0.0
            } else {
                (gain - loss) / total * 100.0
            });
        }

        Ok(results)
    }

    // Calculate Williams %R: -100 * (highest high - close) / (highest high - lowest low)
    pub fn calculate_willr(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        period: usize,
    ) -> Result<Vec<f64>, BackendError> {
        if period == 0 {
            return Err(BackendError::InvalidParameter {
                name: "length".to_string(),
                reason: "period must be greater than 0".to_string(),
            });
        }

        let mut results = vec![f64::NAN; close.len()];
        for i in period.saturating_sub(1)..close.len() {
            let start = i + 1 - period;
            let highest = high[start..=i].iter().copied().fold(f64::MIN, f64::max);
            let lowest = low[start..=i].iter().copied().fold(f64::MAX, f64::min);
            let range = highest - lowest;
            results[i] = if range > 0.0 {
                -100.0 * (highest - close[i]) / range
            } else {
                0.0
            };
        }

        Ok(results)
    }
}

fn typical_prices<'a>(
    high: &'a [f64],
    low: &'a [f64],
    close: &'a [f64],
) -> impl Iterator<Item = f64> + 'a {
    high.iter()
        .zip(low)
        .zip(close)
        .map(|((h, l), c)| (h + l + c) / 3.0)
}
