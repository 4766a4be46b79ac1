// Price transforms and balance of power: one value per bar, no lookback
use std::os::raw::c_int;

use super::common::{end_index, finish, hlc, ohlc, same_length, HlcFn, Lookback, OhlcFn};
use super::ffi;
use crate::backend::{Backend, BackendError};

pub struct PriceIndicators;

impl PriceIndicators {
    // TYPPRICE and WCLPRICE
    pub fn from_hlc(function: &str, high: &[f64], low: &[f64], close: &[f64]) -> Result<Lookback, BackendError> {
        let call: HlcFn = match function {
            "TYPPRICE" => ffi::TA_TYPPRICE,
            "WCLPRICE" => ffi::TA_WCLPRICE,
            other => return Err(unknown(other)),
        };
        hlc(function, call, high, low, close)
    }

    // AVGPRICE and BOP
    pub fn from_ohlc(
        function: &str,
        open: &[f64],
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<Lookback, BackendError> {
        let call: OhlcFn = match function {
            "AVGPRICE" => ffi::TA_AVGPRICE,
            "BOP" => ffi::TA_BOP,
            other => return Err(unknown(other)),
        };
        ohlc(function, call, open, high, low, close)
    }

    pub fn median(high: &[f64], low: &[f64]) -> Result<Lookback, BackendError> {
        if high.is_empty() {
            return Ok(Lookback::empty(1));
        }
        same_length(&[high, low])?;

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut out_data = vec![0.0; high.len()];

        let ret_code = unsafe {
            ffi::TA_MEDPRICE(
                0,
                end_index(high.len())?,
                high.as_ptr(),
                low.as_ptr(),
                &mut out_beg_idx,
                &mut out_nb_element,
                out_data.as_mut_ptr(),
            )
        };

        finish("MEDPRICE", ret_code, out_beg_idx, out_nb_element, vec![out_data])
    }
}

fn unknown(function: &str) -> BackendError {
    BackendError::UnknownFunction {
        backend: Backend::TaLib,
        function: function.to_string(),
    }
}
