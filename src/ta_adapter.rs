//! Adapter over the streaming indicators of the `ta` crate.
//!
//! `ta` emits a value from the first bar on, so every output has its warm-up
//! rows masked to undefined before it leaves this module.

use ta::indicators::{
    AverageTrueRange, BollingerBands, CommodityChannelIndex, ExponentialMovingAverage,
    KeltnerChannel, MoneyFlowIndex, MovingAverageConvergenceDivergence, OnBalanceVolume,
    RateOfChange, RelativeStrengthIndex, SimpleMovingAverage, StandardDeviation,
};
use ta::{DataItem, Next};

use crate::backend::{Backend, BackendError, IndicatorBackend, RawOutput};
use crate::dispatch::Params;
use crate::frame::{Column, PriceFrame, Usable};

const CLOSE: &[Column] = &[Column::Close];
const CLOSE_VOLUME: &[Column] = &[Column::Close, Column::Volume];
const HLC: &[Column] = &[Column::High, Column::Low, Column::Close];
const HLCV: &[Column] = &[Column::High, Column::Low, Column::Close, Column::Volume];

pub struct TaCrateBackend;

impl IndicatorBackend for TaCrateBackend {
    fn backend(&self) -> Backend {
        Backend::Ta
    }

    fn self_check(&self) -> Result<(), String> {
        SimpleMovingAverage::new(1)
            .map(|_| ())
            .map_err(|err| format!("ta crate rejected a trivial indicator: {:?}", err))
    }

    fn compute(
        &self,
        function: &str,
        frame: &PriceFrame,
        params: &Params,
    ) -> Result<RawOutput, BackendError> {
        match function {
            "sma" => {
                let period = params.period("length")?;
                let mut sma = build("length", SimpleMovingAverage::new(period))?;
                close_series(frame, period - 1, |c| sma.next(c))
            }
            "ema" => {
                let period = params.period("length")?;
                let mut ema = build("length", ExponentialMovingAverage::new(period))?;
                close_series(frame, period - 1, |c| ema.next(c))
            }
            "bbands" => {
                let period = params.period("length")?;
                let mut bands = build("length", BollingerBands::new(period, params.float("std")?))?;
                let usable = frame.usable(CLOSE);
                let (mut upper, mut middle, mut lower) = (Vec::new(), Vec::new(), Vec::new());
                for &c in usable.column(0) {
                    let out = bands.next(c);
                    upper.push(out.upper);
                    middle.push(out.average);
                    lower.push(out.lower);
                }
                Ok(columns(&usable, vec![
                    (upper, period - 1),
                    (middle, period - 1),
                    (lower, period - 1),
                ]))
            }
            "rsi" => {
                let period = params.period("length")?;
                let mut rsi = build("length", RelativeStrengthIndex::new(period))?;
                close_series(frame, period, |c| rsi.next(c))
            }
            "macd" => {
                let fast = params.period("fast")?;
                let slow = params.period("slow")?;
                let signal_period = params.period("signal")?;
                let mut macd = build(
                    "fast",
                    MovingAverageConvergenceDivergence::new(fast, slow, signal_period),
                )?;
                let usable = frame.usable(CLOSE);
                let (mut line, mut signal, mut hist) = (Vec::new(), Vec::new(), Vec::new());
                for &c in usable.column(0) {
                    let out = macd.next(c);
                    line.push(out.macd);
                    signal.push(out.signal);
                    hist.push(out.histogram);
                }
                let signal_warmup = slow + signal_period - 2;
                Ok(columns(&usable, vec![
                    (line, slow - 1),
                    (signal, signal_warmup),
                    (hist, signal_warmup),
                ]))
            }
            "cci" => {
                let period = params.period("length")?;
                let mut cci = build("length", CommodityChannelIndex::new(period))?;
                bar_series(frame, HLC, period - 1, |bar| cci.next(bar))
            }
            "mfi" => {
                let period = params.period("length")?;
                let mut mfi = build("length", MoneyFlowIndex::new(period))?;
                bar_series(frame, HLCV, period, |bar| mfi.next(bar))
            }
            "roc" => {
                let period = params.period("length")?;
                let mut roc = build("length", RateOfChange::new(period))?;
                close_series(frame, period, |c| roc.next(c))
            }
            "atr" => {
                let period = params.period("length")?;
                let mut atr = build("length", AverageTrueRange::new(period))?;
                bar_series(frame, HLC, period - 1, |bar| atr.next(bar))
            }
            "stddev" => {
                let period = params.period("length")?;
                let deviations = params.float("nbdev")?;
                let mut stddev = build("length", StandardDeviation::new(period))?;
                close_series(frame, period - 1, |c| stddev.next(c) * deviations)
            }
            "kc" => {
                let period = params.period("length")?;
                let mut channel = build("length", KeltnerChannel::new(period, params.float("scalar")?))?;
                let usable = frame.usable(HLC);
                let bars = data_items(&usable, HLC)?;
                let (mut upper, mut middle, mut lower) = (Vec::new(), Vec::new(), Vec::new());
                for bar in &bars {
                    let out = channel.next(bar);
                    upper.push(out.upper);
                    middle.push(out.average);
                    lower.push(out.lower);
                }
                Ok(columns(&usable, vec![
                    (upper, period - 1),
                    (middle, period - 1),
                    (lower, period - 1),
                ]))
            }
            "obv" => {
                let mut obv = OnBalanceVolume::default();
                bar_series(frame, CLOSE_VOLUME, 0, |bar| obv.next(bar))
            }
            other => Err(BackendError::UnknownFunction {
                backend: Backend::Ta,
                function: other.to_string(),
            }),
        }
    }
}

fn build<T>(name: &str, indicator: ta::errors::Result<T>) -> Result<T, BackendError> {
    indicator.map_err(|err| BackendError::InvalidParameter {
        name: name.to_string(),
        reason: format!("{:?}", err),
    })
}

fn mask(values: &mut [f64], warmup: usize) {
    let end = warmup.min(values.len());
    values[..end].iter_mut().for_each(|v| *v = f64::NAN);
}

fn close_series<F>(frame: &PriceFrame, warmup: usize, mut step: F) -> Result<RawOutput, BackendError>
where
    F: FnMut(f64) -> f64,
{
    let usable = frame.usable(CLOSE);
    let mut values: Vec<f64> = usable.column(0).iter().map(|&c| step(c)).collect();
    mask(&mut values, warmup);
    Ok(RawOutput::Series(usable.expand(&values)))
}

fn bar_series<F>(
    frame: &PriceFrame,
    inputs: &[Column],
    warmup: usize,
    mut step: F,
) -> Result<RawOutput, BackendError>
where
    F: FnMut(&DataItem) -> f64,
{
    let usable = frame.usable(inputs);
    let bars = data_items(&usable, inputs)?;
    let mut values: Vec<f64> = bars.iter().map(|bar| step(bar)).collect();
    mask(&mut values, warmup);
    Ok(RawOutput::Series(usable.expand(&values)))
}

fn columns(usable: &Usable, outputs: Vec<(Vec<f64>, usize)>) -> RawOutput {
    RawOutput::Columns(
        outputs
            .into_iter()
            .map(|(mut values, warmup)| {
                mask(&mut values, warmup);
                usable.expand(&values)
            })
            .collect(),
    )
}

fn input<'a>(usable: &'a Usable, inputs: &[Column], column: Column) -> Option<&'a [f64]> {
    inputs
        .iter()
        .position(|&c| c == column)
        .map(|index| usable.column(index))
}

// `ta` wants whole bars; columns an indicator does not read are filled from
// the close so the bar passes DataItem's own sanity checks.
fn data_items(usable: &Usable, inputs: &[Column]) -> Result<Vec<DataItem>, BackendError> {
    let close = input(usable, inputs, Column::Close).unwrap_or(&[]);
    let high = input(usable, inputs, Column::High).unwrap_or(close);
    let low = input(usable, inputs, Column::Low).unwrap_or(close);
    let volume = input(usable, inputs, Column::Volume);

    (0..close.len())
        .map(|i| {
            DataItem::builder()
                .open(close[i])
                .high(high[i])
                .low(low[i])
                .close(close[i])
                .volume(volume.map_or(0.0, |v| v[i]))
                .build()
                .map_err(|err| BackendError::Computation(format!("ta rejected bar {}: {:?}", i, err)))
        })
        .collect()
}
