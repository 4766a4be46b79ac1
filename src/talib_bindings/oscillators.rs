// Momentum oscillators
use std::os::raw::{c_double, c_int};

use super::common::{
    end_index, finish, hl_period, hlc_period, real_period, same_length, HlPeriodFn, HlcPeriodFn, Lookback,
    RealPeriodFn,
};
use super::ffi;
use crate::backend::{Backend, BackendError};

type PriceOscillatorFn = unsafe extern "C" fn(
    c_int,
    c_int,
    *const c_double,
    c_int,
    c_int,
    c_int,
    *mut c_int,
    *mut c_int,
    *mut c_double,
) -> c_int;

pub struct OscillatorIndicators;

impl OscillatorIndicators {
    // One close series, one period
    pub fn single(function: &str, close: &[f64], period: c_int) -> Result<Lookback, BackendError> {
        let call: RealPeriodFn = match function {
            "RSI" => ffi::TA_RSI,
            "ROC" => ffi::TA_ROC,
            "MOM" => ffi::TA_MOM,
            "CMO" => ffi::TA_CMO,
            "TRIX" => ffi::TA_TRIX,
            "ROCP" => ffi::TA_ROCP,
            "ROCR" => ffi::TA_ROCR,
            "ROCR100" => ffi::TA_ROCR100,
            other => return Err(unknown(other)),
        };
        real_period(function, call, close, period)
    }

    // High/low/close, one period
    pub fn hlc(
        function: &str,
        high: &[f64],
        low: &[f64],
        close: &[f64],
        period: c_int,
    ) -> Result<Lookback, BackendError> {
        let call: HlcPeriodFn = match function {
            "CCI" => ffi::TA_CCI,
            "ADX" => ffi::TA_ADX,
            "WILLR" => ffi::TA_WILLR,
            "ADXR" => ffi::TA_ADXR,
            "DX" => ffi::TA_DX,
            "PLUS_DI" => ffi::TA_PLUS_DI,
            "MINUS_DI" => ffi::TA_MINUS_DI,
            other => return Err(unknown(other)),
        };
        hlc_period(function, call, high, low, close, period)
    }

    // Directional movement and the Aroon oscillator: high/low, one period
    pub fn hl(function: &str, high: &[f64], low: &[f64], period: c_int) -> Result<Lookback, BackendError> {
        let call: HlPeriodFn = match function {
            "PLUS_DM" => ffi::TA_PLUS_DM,
            "MINUS_DM" => ffi::TA_MINUS_DM,
            "AROONOSC" => ffi::TA_AROONOSC,
            other => return Err(unknown(other)),
        };
        hl_period(function, call, high, low, period)
    }

    // APO and PPO over simple moving averages
    pub fn price_oscillator(
        function: &str,
        close: &[f64],
        fast_period: c_int,
        slow_period: c_int,
    ) -> Result<Lookback, BackendError> {
        let call: PriceOscillatorFn = match function {
            "APO" => ffi::TA_APO,
            "PPO" => ffi::TA_PPO,
            other => return Err(unknown(other)),
        };
        if close.is_empty() {
            return Ok(Lookback::empty(1));
        }

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut out_data = vec![0.0; close.len()];

        let ret_code = unsafe {
            call(
                0,
                end_index(close.len())?,
                close.as_ptr(),
                fast_period,
                slow_period,
                ffi::TA_MATYPE_SMA,
                &mut out_beg_idx,
                &mut out_nb_element,
                out_data.as_mut_ptr(),
            )
        };

        finish(function, ret_code, out_beg_idx, out_nb_element, vec![out_data])
    }

    pub fn ultosc(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        periods: [c_int; 3],
    ) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(1));
        }
        same_length(&[high, low, close])?;

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut out_data = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_ULTOSC(
                0,
                end_index(close.len())?,
                high.as_ptr(),
                low.as_ptr(),
                close.as_ptr(),
                periods[0],
                periods[1],
                periods[2],
                &mut out_beg_idx,
                &mut out_nb_element,
                out_data.as_mut_ptr(),
            )
        };

        finish("ULTOSC", ret_code, out_beg_idx, out_nb_element, vec![out_data])
    }

    pub fn macd(
        close: &[f64],
        fast_period: c_int,
        slow_period: c_int,
        signal_period: c_int,
    ) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(3));
        }

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut macd = vec![0.0; close.len()];
        let mut signal = vec![0.0; close.len()];
        let mut hist = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_MACD(
                0,
                end_index(close.len())?,
                close.as_ptr(),
                fast_period,
                slow_period,
                signal_period,
                &mut out_beg_idx,
                &mut out_nb_element,
                macd.as_mut_ptr(),
                signal.as_mut_ptr(),
                hist.as_mut_ptr(),
            )
        };

        finish("MACD", ret_code, out_beg_idx, out_nb_element, vec![macd, signal, hist])
    }

    pub fn mfi(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        volume: &[f64],
        period: c_int,
    ) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(1));
        }
        same_length(&[high, low, close, volume])?;

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut out_data = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_MFI(
                0,
                end_index(close.len())?,
                high.as_ptr(),
                low.as_ptr(),
                close.as_ptr(),
                volume.as_ptr(),
                period,
                &mut out_beg_idx,
                &mut out_nb_element,
                out_data.as_mut_ptr(),
            )
        };

        finish("MFI", ret_code, out_beg_idx, out_nb_element, vec![out_data])
    }

    // Slow stochastic, SMA smoothing for both lines
    pub fn stoch(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        fastk_period: c_int,
        slowk_period: c_int,
        slowd_period: c_int,
    ) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(2));
        }
        same_length(&[high, low, close])?;

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut slow_k = vec![0.0; close.len()];
        let mut slow_d = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_STOCH(
                0,
                end_index(close.len())?,
                high.as_ptr(),
                low.as_ptr(),
                close.as_ptr(),
                fastk_period,
                slowk_period,
                ffi::TA_MATYPE_SMA,
                slowd_period,
                ffi::TA_MATYPE_SMA,
                &mut out_beg_idx,
                &mut out_nb_element,
                slow_k.as_mut_ptr(),
                slow_d.as_mut_ptr(),
            )
        };

        finish("STOCH", ret_code, out_beg_idx, out_nb_element, vec![slow_k, slow_d])
    }

    pub fn stoch_rsi(
        close: &[f64],
        period: c_int,
        fastk_period: c_int,
        fastd_period: c_int,
    ) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(2));
        }

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut fast_k = vec![0.0; close.len()];
        let mut fast_d = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_STOCHRSI(
                0,
                end_index(close.len())?,
                close.as_ptr(),
                period,
                fastk_period,
                fastd_period,
                ffi::TA_MATYPE_SMA,
                &mut out_beg_idx,
                &mut out_nb_element,
                fast_k.as_mut_ptr(),
                fast_d.as_mut_ptr(),
            )
        };

        finish("STOCHRSI", ret_code, out_beg_idx, out_nb_element, vec![fast_k, fast_d])
    }
}

fn unknown(function: &str) -> BackendError {
    BackendError::UnknownFunction {
        backend: Backend::TaLib,
        function: function.to_string(),
    }
}
