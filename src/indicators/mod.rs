//! Formulas implemented in this crate: the backend of last resort.
//!
//! Every formula runs on the rows where its inputs are present; skipped rows
//! come back undefined.

pub mod momentum;
pub mod overlaps;
pub mod patterns;
pub mod prices;
pub mod streaming;
pub mod volatility;
pub mod volume;

pub use self::momentum::MomentumCalculator;
pub use self::overlaps::OverlapCalculator;
pub use self::patterns::{Candles, PatternRecognizer};
pub use self::prices::PriceCalculator;
pub use self::volatility::VolatilityCalculator;
pub use self::volume::VolumeCalculator;

use self::streaming::Change;
use crate::backend::{Backend, BackendError, IndicatorBackend, RawOutput};
use crate::dispatch::Params;
use crate::frame::{Column, PriceFrame, Usable};

const CLOSE: &[Column] = &[Column::Close];
const CLOSE_VOLUME: &[Column] = &[Column::Close, Column::Volume];
const HL: &[Column] = &[Column::High, Column::Low];
const HLC: &[Column] = &[Column::High, Column::Low, Column::Close];
const HLCV: &[Column] = &[Column::High, Column::Low, Column::Close, Column::Volume];
const OHLC: &[Column] = &[Column::Open, Column::High, Column::Low, Column::Close];

pub struct NativeBackend;

impl IndicatorBackend for NativeBackend {
    fn backend(&self) -> Backend {
        Backend::Native
    }

    fn self_check(&self) -> Result<(), String> {
        Ok(())
    }

    fn compute(
        &self,
        function: &str,
        frame: &PriceFrame,
        params: &Params,
    ) -> Result<RawOutput, BackendError> {
        match function {
            // Overlap studies
            "sma" => series(frame, CLOSE, |u| {
                OverlapCalculator::calculate_sma(u.column(0), params.period("length")?)
            }),
            "ema" => series(frame, CLOSE, |u| {
                OverlapCalculator::calculate_ema(u.column(0), params.period("length")?)
            }),
            "wma" => series(frame, CLOSE, |u| {
                OverlapCalculator::calculate_wma(u.column(0), params.period("length")?)
            }),
            "trima" => series(frame, CLOSE, |u| {
                OverlapCalculator::calculate_trima(u.column(0), params.period("length")?)
            }),
            "midpoint" => series(frame, CLOSE, |u| {
                OverlapCalculator::calculate_midpoint(u.column(0), params.period("length")?)
            }),
            "midprice" => series(frame, HL, |u| {
                OverlapCalculator::calculate_midprice(u.column(0), u.column(1), params.period("length")?)
            }),
            "bbands" => columns(frame, CLOSE, |u| {
                let (upper, middle, lower) = OverlapCalculator::calculate_bollinger_bands(
                    u.column(0),
                    params.period("length")?,
                    params.float("std")?,
                )?;
                Ok(vec![upper, middle, lower])
            }),
            "vwap" => series(frame, HLCV, |u| {
                Ok(OverlapCalculator::calculate_vwap(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    u.column(3),
                ))
            }),
            "ichimoku" => columns(frame, HLC, |u| {
                OverlapCalculator::calculate_ichimoku(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    params.period("tenkan")?,
                    params.period("kijun")?,
                    params.period("senkou_b")?,
                    params.period("shift")?,
                )
            }),

            // Price transforms
            "avgprice" => series(frame, OHLC, |u| {
                Ok(PriceCalculator::average_price(u.column(0), u.column(1), u.column(2), u.column(3)))
            }),
            "medprice" => series(frame, HL, |u| Ok(PriceCalculator::median_price(u.column(0), u.column(1)))),
            "typprice" => series(frame, HLC, |u| {
                Ok(PriceCalculator::typical_price(u.column(0), u.column(1), u.column(2)))
            }),
            "wclprice" => series(frame, HLC, |u| {
                Ok(PriceCalculator::weighted_close(u.column(0), u.column(1), u.column(2)))
            }),

            // Momentum
            "rsi" => series(frame, CLOSE, |u| {
                MomentumCalculator::calculate_rsi(u.column(0), params.period("length")?)
            }),
            "macd" => columns(frame, CLOSE, |u| {
                let (macd, signal, hist) = MomentumCalculator::calculate_macd(
                    u.column(0),
                    params.period("fast")?,
                    params.period("slow")?,
                    params.period("signal")?,
                )?;
                Ok(vec![macd, signal, hist])
            }),
            "cci" => series(frame, HLC, |u| {
                MomentumCalculator::calculate_cci(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    params.period("length")?,
                )
            }),
            "mfi" => series(frame, HLCV, |u| {
                MomentumCalculator::calculate_mfi(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    u.column(3),
                    params.period("length")?,
                )
            }),
            "roc" => series(frame, CLOSE, |u| {
                MomentumCalculator::calculate_roc(u.column(0), params.period("length")?)
            }),
            "mom" => series(frame, CLOSE, |u| {
                MomentumCalculator::calculate_momentum(u.column(0), params.period("length")?)
            }),

            "rocp" => series(frame, CLOSE, |u| {
                MomentumCalculator::calculate_change(u.column(0), params.period("length")?, Change::Fraction)
            }),
            "rocr" => series(frame, CLOSE, |u| {
                MomentumCalculator::calculate_change(u.column(0), params.period("length")?, Change::Ratio)
            }),
            "rocr100" => series(frame, CLOSE, |u| {
                MomentumCalculator::calculate_change(u.column(0), params.period("length")?, Change::Ratio100)
            }),
            "cmo" => series(frame, CLOSE, |u| {
                MomentumCalculator::calculate_cmo(u.column(0), params.period("length")?)
            }),
            "willr" => series(frame, HLC, |u| {
                MomentumCalculator::calculate_willr(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    params.period("length")?,
                )
            }),
            "bop" => series(frame, OHLC, |u| {
                Ok(PriceCalculator::balance_of_power(u.column(0), u.column(1), u.column(2), u.column(3)))
            }),

            // Volatility
            "atr" => series(frame, HLC, |u| {
                VolatilityCalculator::calculate_atr(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    params.period("length")?,
                )
            }),
            "natr" => series(frame, HLC, |u| {
                VolatilityCalculator::calculate_natr(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    params.period("length")?,
                )
            }),
            "trange" => series(frame, HLC, |u| {
                Ok(VolatilityCalculator::calculate_true_range(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                ))
            }),
            "stddev" => series(frame, CLOSE, |u| {
                VolatilityCalculator::calculate_standard_deviation(
                    u.column(0),
                    params.period("length")?,
                    params.float("nbdev")?,
                )
            }),

            // Volume
            "obv" => series(frame, CLOSE_VOLUME, |u| {
                Ok(VolumeCalculator::calculate_obv(u.column(0), u.column(1)))
            }),
            "ad" => series(frame, HLCV, |u| {
                Ok(VolumeCalculator::calculate_ad_line(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    u.column(3),
                ))
            }),
            "adosc" => series(frame, HLCV, |u| {
                VolumeCalculator::calculate_chaikin_oscillator(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    u.column(3),
                    params.period("fast")?,
                    params.period("slow")?,
                )
            }),

            pattern if PatternRecognizer::is_supported(pattern) => candlestick(frame, pattern, params),

            other => Err(BackendError::UnknownFunction {
                backend: Backend::Native,
                function: other.to_string(),
            }),
        }
    }
}

// Run a single-output formula on the usable rows
fn series<F>(frame: &PriceFrame, inputs: &[Column], formula: F) -> Result<RawOutput, BackendError>
where
    F: FnOnce(&Usable) -> Result<Vec<f64>, BackendError>,
{
    let usable = frame.usable(inputs);
    let values = formula(&usable)?;
    Ok(RawOutput::Series(usable.expand(&values)))
}

// Run a multi-output formula on the usable rows
fn columns<F>(frame: &PriceFrame, inputs: &[Column], formula: F) -> Result<RawOutput, BackendError>
where
    F: FnOnce(&Usable) -> Result<Vec<Vec<f64>>, BackendError>,
{
    let usable = frame.usable(inputs);
    let values = formula(&usable)?;
    Ok(RawOutput::Columns(
        values.iter().map(|column| usable.expand(column)).collect(),
    ))
}

fn candlestick(frame: &PriceFrame, function: &str, params: &Params) -> Result<RawOutput, BackendError> {
    let usable = frame.usable(OHLC);
    let candles = Candles::new(usable.column(0), usable.column(1), usable.column(2), usable.column(3));
    let penetration = params.get("penetration").unwrap_or(0.0);

    let scores = PatternRecognizer::recognize(function, &candles, penetration).ok_or_else(|| {
        BackendError::UnknownFunction {
            backend: Backend::Native,
            function: function.to_string(),
        }
    })?;

    if usable.is_complete() {
        Ok(RawOutput::Signals(scores))
    } else {
        let scores: Vec<f64> = scores.into_iter().map(f64::from).collect();
        Ok(RawOutput::Series(usable.expand(&scores)))
    }
}
