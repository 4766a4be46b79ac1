// Backend entry point and plumbing shared by the TA-Lib wrappers
use std::os::raw::{c_double, c_int};
use std::sync::OnceLock;

use tracing::{debug, info};

use super::ffi;
use super::oscillators::OscillatorIndicators;
use super::overlaps::OverlapIndicators;
use super::patterns::PatternIndicators;
use super::prices::PriceIndicators;
use super::volatility::VolatilityIndicators;
use super::volume::VolumeIndicators;
use crate::backend::{Backend, BackendError, IndicatorBackend, RawOutput};
use crate::dispatch::Params;
use crate::frame::{Column, PriceFrame, Usable};

const CLOSE: &[Column] = &[Column::Close];
const CLOSE_VOLUME: &[Column] = &[Column::Close, Column::Volume];
const HL: &[Column] = &[Column::High, Column::Low];
const HLC: &[Column] = &[Column::High, Column::Low, Column::Close];
const HLCV: &[Column] = &[Column::High, Column::Low, Column::Close, Column::Volume];
const OHLC: &[Column] = &[Column::Open, Column::High, Column::Low, Column::Close];

// Signatures shared by many TA-Lib functions
pub(super) type RealPeriodFn = unsafe extern "C" fn(
    c_int,
    c_int,
    *const c_double,
    c_int,
    *mut c_int,
    *mut c_int,
    *mut c_double,
) -> c_int;

pub(super) type HlcPeriodFn = unsafe extern "C" fn(
    c_int,
    c_int,
    *const c_double,
    *const c_double,
    *const c_double,
    c_int,
    *mut c_int,
    *mut c_int,
    *mut c_double,
) -> c_int;

pub(super) type HlPeriodFn = unsafe extern "C" fn(
    c_int,
    c_int,
    *const c_double,
    *const c_double,
    c_int,
    *mut c_int,
    *mut c_int,
    *mut c_double,
) -> c_int;

pub(super) type HlcFn = unsafe extern "C" fn(
    c_int,
    c_int,
    *const c_double,
    *const c_double,
    *const c_double,
    *mut c_int,
    *mut c_int,
    *mut c_double,
) -> c_int;

pub(super) type OhlcFn = unsafe extern "C" fn(
    c_int,
    c_int,
    *const c_double,
    *const c_double,
    *const c_double,
    *const c_double,
    *mut c_int,
    *mut c_int,
    *mut c_double,
) -> c_int;

/// TA-Lib output on compacted rows: `columns[k][i]` belongs to row `begin + i`.
pub(super) struct Lookback {
    pub begin: usize,
    pub columns: Vec<Vec<f64>>,
}

impl Lookback {
    pub fn empty(outputs: usize) -> Self {
        Lookback {
            begin: 0,
            columns: vec![Vec::new(); outputs],
        }
    }
}

pub struct TaLibBackend;

impl TaLibBackend {
    // TA_Initialize must run once before any other call
    fn initialize() -> Result<(), String> {
        static INIT: OnceLock<c_int> = OnceLock::new();
        let ret_code = *INIT.get_or_init(|| unsafe { ffi::TA_Initialize() });
        if ret_code != ffi::TA_SUCCESS {
            return Err(format!("TA_Initialize failed with return code {}", ret_code));
        }
        Ok(())
    }
}

impl IndicatorBackend for TaLibBackend {
    fn backend(&self) -> Backend {
        Backend::TaLib
    }

    fn self_check(&self) -> Result<(), String> {
        Self::initialize()?;
        info!("TA-Lib initialized");
        Ok(())
    }

    fn compute(
        &self,
        function: &str,
        frame: &PriceFrame,
        params: &Params,
    ) -> Result<RawOutput, BackendError> {
        Self::initialize().map_err(BackendError::Computation)?;
        debug!("Calling TA_{} on {} rows", function, frame.len());

        match function {
            // Overlap studies
            "SMA" | "EMA" | "WMA" | "DEMA" | "TEMA" | "TRIMA" | "KAMA" | "MIDPOINT" => run(frame, CLOSE, |u| {
                OverlapIndicators::moving_average(function, u.column(0), period(params, "length")?)
            }),
            "T3" => run(frame, CLOSE, |u| {
                OverlapIndicators::t3(u.column(0), period(params, "length")?, params.float("vfactor")?)
            }),
            "MIDPRICE" => run(frame, HL, |u| {
                OverlapIndicators::midprice(u.column(0), u.column(1), period(params, "length")?)
            }),
            "BBANDS" => run(frame, CLOSE, |u| {
                OverlapIndicators::bbands(u.column(0), period(params, "length")?, params.float("std")?)
            }),

            // Momentum
            "RSI" | "ROC" | "MOM" | "CMO" | "TRIX" | "ROCP" | "ROCR" | "ROCR100" => run(frame, CLOSE, |u| {
                OscillatorIndicators::single(function, u.column(0), period(params, "length")?)
            }),
            "MACD" => run(frame, CLOSE, |u| {
                OscillatorIndicators::macd(
                    u.column(0),
                    period(params, "fast")?,
                    period(params, "slow")?,
                    period(params, "signal")?,
                )
            }),
            "APO" | "PPO" => run(frame, CLOSE, |u| {
                OscillatorIndicators::price_oscillator(
                    function,
                    u.column(0),
                    period(params, "fast")?,
                    period(params, "slow")?,
                )
            }),
            "CCI" | "ADX" | "ADXR" | "DX" | "PLUS_DI" | "MINUS_DI" | "WILLR" => run(frame, HLC, |u| {
                OscillatorIndicators::hlc(
                    function,
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    period(params, "length")?,
                )
            }),
            "PLUS_DM" | "MINUS_DM" | "AROONOSC" => run(frame, HL, |u| {
                OscillatorIndicators::hl(function, u.column(0), u.column(1), period(params, "length")?)
            }),
            "ULTOSC" => run(frame, HLC, |u| {
                OscillatorIndicators::ultosc(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    [period(params, "short")?, period(params, "medium")?, period(params, "long")?],
                )
            }),
            "BOP" => run(frame, OHLC, |u| {
                PriceIndicators::from_ohlc(function, u.column(0), u.column(1), u.column(2), u.column(3))
            }),
            "MFI" => run(frame, HLCV, |u| {
                OscillatorIndicators::mfi(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    u.column(3),
                    period(params, "length")?,
                )
            }),
            "STOCH" => run(frame, HLC, |u| {
                OscillatorIndicators::stoch(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    period(params, "fastk")?,
                    period(params, "slowk")?,
                    period(params, "slowd")?,
                )
            }),
            "STOCHRSI" => run(frame, CLOSE, |u| {
                OscillatorIndicators::stoch_rsi(
                    u.column(0),
                    period(params, "length")?,
                    period(params, "fastk")?,
                    period(params, "fastd")?,
                )
            }),

            // Volatility
            "ATR" | "NATR" => run(frame, HLC, |u| {
                VolatilityIndicators::range(
                    function,
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    period(params, "length")?,
                )
            }),
            "TRANGE" => run(frame, HLC, |u| {
                VolatilityIndicators::true_range(u.column(0), u.column(1), u.column(2))
            }),
            "STDDEV" => run(frame, CLOSE, |u| {
                VolatilityIndicators::stddev(u.column(0), period(params, "length")?, params.float("nbdev")?)
            }),

            // Price transforms
            "AVGPRICE" => run(frame, OHLC, |u| {
                PriceIndicators::from_ohlc(function, u.column(0), u.column(1), u.column(2), u.column(3))
            }),
            "MEDPRICE" => run(frame, HL, |u| PriceIndicators::median(u.column(0), u.column(1))),
            "TYPPRICE" | "WCLPRICE" => run(frame, HLC, |u| {
                PriceIndicators::from_hlc(function, u.column(0), u.column(1), u.column(2))
            }),

            // Volume
            "OBV" => run(frame, CLOSE_VOLUME, |u| VolumeIndicators::obv(u.column(0), u.column(1))),
            "AD" => run(frame, HLCV, |u| {
                VolumeIndicators::ad(u.column(0), u.column(1), u.column(2), u.column(3))
            }),
            "ADOSC" => run(frame, HLCV, |u| {
                VolumeIndicators::adosc(
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    u.column(3),
                    period(params, "fast")?,
                    period(params, "slow")?,
                )
            }),

            pattern if PatternIndicators::is_supported(pattern) => run(frame, OHLC, |u| {
                PatternIndicators::recognize(
                    pattern,
                    u.column(0),
                    u.column(1),
                    u.column(2),
                    u.column(3),
                    params.get("penetration").unwrap_or(0.0),
                )
            }),

            other => Err(BackendError::UnknownFunction {
                backend: Backend::TaLib,
                function: other.to_string(),
            }),
        }
    }
}

// Run a wrapper on the usable rows and place its output back on the frame
fn run<F>(frame: &PriceFrame, inputs: &[Column], wrapper: F) -> Result<RawOutput, BackendError>
where
    F: FnOnce(&Usable) -> Result<Lookback, BackendError>,
{
    let usable = frame.usable(inputs);
    let out = wrapper(&usable)?;

    if usable.is_complete() {
        return Ok(RawOutput::Trailing {
            begin: out.begin,
            columns: out.columns,
        });
    }

    let mut columns = Vec::with_capacity(out.columns.len());
    for column in out.columns {
        if out.begin + column.len() > usable.len() {
            return Err(BackendError::Computation(format!(
                "TA-Lib returned {} values from row {} for {} rows",
                column.len(),
                out.begin,
                usable.len()
            )));
        }
        let mut compact = vec![f64::NAN; out.begin];
        compact.extend(column);
        compact.resize(usable.len(), f64::NAN);
        columns.push(usable.expand(&compact));
    }
    Ok(RawOutput::Columns(columns))
}

pub(super) fn period(params: &Params, name: &str) -> Result<c_int, BackendError> {
    let value = params.period(name)?;
    c_int::try_from(value).map_err(|_| BackendError::InvalidParameter {
        name: name.to_string(),
        reason: format!("{} does not fit a C int", value),
    })
}

pub(super) fn end_index(len: usize) -> Result<c_int, BackendError> {
    c_int::try_from(len.saturating_sub(1))
        .map_err(|_| BackendError::Computation(format!("{} rows exceed the TA-Lib index range", len)))
}

// Check the return code and trim the scratch buffers to what TA-Lib wrote
pub(super) fn finish(
    function: &str,
    ret_code: c_int,
    out_beg_idx: c_int,
    out_nb_element: c_int,
    mut columns: Vec<Vec<f64>>,
) -> Result<Lookback, BackendError> {
    if ret_code != ffi::TA_SUCCESS {
        return Err(BackendError::ReturnCode {
            function: format!("TA_{}", function),
            code: ret_code,
        });
    }
    let count = usize::try_from(out_nb_element).unwrap_or(0);
    for column in &mut columns {
        column.truncate(count);
    }
    Ok(Lookback {
        begin: usize::try_from(out_beg_idx).unwrap_or(0),
        columns,
    })
}

pub(super) fn real_period(
    function: &str,
    call: RealPeriodFn,
    input: &[f64],
    period: c_int,
) -> Result<Lookback, BackendError> {
    if input.is_empty() {
        return Ok(Lookback::empty(1));
    }

    let mut out_beg_idx: c_int = 0;
    let mut out_nb_element: c_int = 0;
    let mut out_data = vec![0.0; input.len()];

    let ret_code = unsafe {
        call(
            0,
            end_index(input.len())?,
            input.as_ptr(),
            period,
            &mut out_beg_idx,
            &mut out_nb_element,
            out_data.as_mut_ptr(),
        )
    };

    finish(function, ret_code, out_beg_idx, out_nb_element, vec![out_data])
}

pub(super) fn hlc_period(
    function: &str,
    call: HlcPeriodFn,
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: c_int,
) -> Result<Lookback, BackendError> {
    if close.is_empty() {
        return Ok(Lookback::empty(1));
    }
    same_length(&[high, low, close])?;

    let mut out_beg_idx: c_int = 0;
    let mut out_nb_element: c_int = 0;
    let mut out_data = vec![0.0; close.len()];

    let ret_code = unsafe {
        call(
            0,
            end_index(close.len())?,
            high.as_ptr(),
            low.as_ptr(),
            close.as_ptr(),
            period,
            &mut out_beg_idx,
            &mut out_nb_element,
            out_data.as_mut_ptr(),
        )
    };

    finish(function, ret_code, out_beg_idx, out_nb_element, vec![out_data])
}

pub(super) fn hl_period(
    function: &str,
    call: HlPeriodFn,
    high: &[f64],
    low: &[f64],
    period: c_int,
) -> Result<Lookback, BackendError> {
    if high.is_empty() {
        return Ok(Lookback::empty(1));
    }
    same_length(&[high, low])?;

    let mut out_beg_idx: c_int = 0;
    let mut out_nb_element: c_int = 0;
    let mut out_data = vec![0.0; high.len()];

    let ret_code = unsafe {
        call(
            0,
            end_index(high.len())?,
            high.as_ptr(),
            low.as_ptr(),
            period,
            &mut out_beg_idx,
            &mut out_nb_element,
            out_data.as_mut_ptr(),
        )
    };

    finish(function, ret_code, out_beg_idx, out_nb_element, vec![out_data])
}

pub(super) fn hlc(
    function: &str,
    call: HlcFn,
    high: &[f64],
    low: &[f64],
    close: &[f64],
) -> Result<Lookback, BackendError> {
    if close.is_empty() {
        return Ok(Lookback::empty(1));
    }
    same_length(&[high, low, close])?;

    let mut out_beg_idx: c_int = 0;
    let mut out_nb_element: c_int = 0;
    let mut out_data = vec![0.0; close.len()];

    let ret_code = unsafe {
        call(
            0,
            end_index(close.len())?,
            high.as_ptr(),
            low.as_ptr(),
            close.as_ptr(),
            &mut out_beg_idx,
            &mut out_nb_element,
            out_data.as_mut_ptr(),
        )
    };

    finish(function, ret_code, out_beg_idx, out_nb_element, vec![out_data])
}

pub(super) fn ohlc(
    function: &str,
    call: OhlcFn,
    open: &[f64],
    high: &[f64],
    low: &[f64],
    close: &[f64],
) -> Result<Lookback, BackendError> {
    if close.is_empty() {
        return Ok(Lookback::empty(1));
    }
    same_length(&[open, high, low, close])?;

    let mut out_beg_idx: c_int = 0;
    let mut out_nb_element: c_int = 0;
    let mut out_data = vec![0.0; close.len()];

    let ret_code = unsafe {
        call(
            0,
            end_index(close.len())?,
            open.as_ptr(),
            high.as_ptr(),
            low.as_ptr(),
            close.as_ptr(),
            &mut out_beg_idx,
            &mut out_nb_element,
            out_data.as_mut_ptr(),
        )
    };

    finish(function, ret_code, out_beg_idx, out_nb_element, vec![out_data])
}

pub(super) fn same_length(inputs: &[&[f64]]) -> Result<(), BackendError> {
    let len = inputs.first().map_or(0, |input| input.len());
    if inputs.iter().any(|input| input.len() != len) {
        return Err(BackendError::Computation(
            "input arrays must have the same length".to_string(),
        ));
    }
    Ok(())
}
