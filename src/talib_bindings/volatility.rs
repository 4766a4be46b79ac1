// Volatility indicators
use std::os::raw::c_int;

use super::common::{end_index, finish, hlc, hlc_period, HlcPeriodFn, Lookback};
use super::ffi;
use crate::backend::{Backend, BackendError};

pub struct VolatilityIndicators;

impl VolatilityIndicators {
    // ATR and NATR
    pub fn range(
        function: &str,
        high: &[f64],
        low: &[f64],
        close: &[f64],
        period: c_int,
    ) -> Result<Lookback, BackendError> {
        let call: HlcPeriodFn = match function {
            "ATR" => ffi::TA_ATR,
            "NATR" => ffi::TA_NATR,
            other => {
                return Err(BackendError::UnknownFunction {
                    backend: Backend::TaLib,
                    function: other.to_string(),
                })
            }
        };
        hlc_period(function, call, high, low, close, period)
    }

    pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Result<Lookback, BackendError> {
        hlc("TRANGE", ffi::TA_TRANGE, high, low, close)
    }

    pub fn stddev(close: &[f64], period: c_int, deviations: f64) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(1));
        }

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut out_data = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_STDDEV(
                0,
                end_index(close.len())?,
                close.as_ptr(),
                period,
                deviations,
                &mut out_beg_idx,
                &mut out_nb_element,
                out_data.as_mut_ptr(),
            )
        };

        finish("STDDEV", ret_code, out_beg_idx, out_nb_element, vec![out_data])
    }
}
