// Overlap studies
use std::os::raw::c_int;

use super::common::{end_index, finish, hl_period, real_period, Lookback, RealPeriodFn};
use super::ffi;
use crate::backend::{Backend, BackendError};

pub struct OverlapIndicators;

impl OverlapIndicators {
    // Moving averages and MIDPOINT share one signature
    pub fn moving_average(function: &str, close: &[f64], period: c_int) -> Result<Lookback, BackendError> {
        let call: RealPeriodFn = match function {
            "SMA" => ffi::TA_SMA,
            "EMA" => ffi::TA_EMA,
            "WMA" => ffi::TA_WMA,
            "DEMA" => ffi::TA_DEMA,
            "TEMA" => ffi::TA_TEMA,
            "TRIMA" => ffi::TA_TRIMA,
            "KAMA" => ffi::TA_KAMA,
            "MIDPOINT" => ffi::TA_MIDPOINT,
            other => {
                return Err(BackendError::UnknownFunction {
                    backend: Backend::TaLib,
                    function: other.to_string(),
                })
            }
        };
        real_period(function, call, close, period)
    }

    // Bollinger Bands over an SMA, symmetric deviations
    pub fn bbands(close: &[f64], period: c_int, deviations: f64) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(3));
        }

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut upper = vec![0.0; close.len()];
        let mut middle = vec![0.0; close.len()];
        let mut lower = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_BBANDS(
                0,
                end_index(close.len())?,
                close.as_ptr(),
                period,
                deviations,
                deviations,
                ffi::TA_MATYPE_SMA,
                &mut out_beg_idx,
                &mut out_nb_element,
                upper.as_mut_ptr(),
                middle.as_mut_ptr(),
                lower.as_mut_ptr(),
            )
        };

        finish("BBANDS", ret_code, out_beg_idx, out_nb_element, vec![upper, middle, lower])
    }

    // Tillson T3, `vfactor` between 0 and 1
    pub fn t3(close: &[f64], period: c_int, vfactor: f64) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(1));
        }

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut out_data = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_T3(
                0,
                end_index(close.len())?,
                close.as_ptr(),
                period,
                vfactor,
                &mut out_beg_idx,
                &mut out_nb_element,
                out_data.as_mut_ptr(),
            )
        };

        finish("T3", ret_code, out_beg_idx, out_nb_element, vec![out_data])
    }

    pub fn midprice(high: &[f64], low: &[f64], period: c_int) -> Result<Lookback, BackendError> {
        hl_period("MIDPRICE", ffi::TA_MIDPRICE, high, low, period)
    }
}
