// Volume indicators
use std::os::raw::c_int;

use super::common::{end_index, finish, same_length, Lookback};
use super::ffi;
use crate::backend::BackendError;

pub struct VolumeIndicators;

impl VolumeIndicators {
    pub fn obv(close: &[f64], volume: &[f64]) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(1));
        }
        same_length(&[close, volume])?;

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut out_data = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_OBV(
                0,
                end_index(close.len())?,
                close.as_ptr(),
                volume.as_ptr(),
                &mut out_beg_idx,
                &mut out_nb_element,
                out_data.as_mut_ptr(),
            )
        };

        finish("OBV", ret_code, out_beg_idx, out_nb_element, vec![out_data])
    }

    // Chaikin accumulation/distribution line
    pub fn ad(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(1));
        }
        same_length(&[high, low, close, volume])?;

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut out_data = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_AD(
                0,
                end_index(close.len())?,
                high.as_ptr(),
                low.as_ptr(),
                close.as_ptr(),
                volume.as_ptr(),
                &mut out_beg_idx,
                &mut out_nb_element,
                out_data.as_mut_ptr(),
            )
        };

        finish("AD", ret_code, out_beg_idx, out_nb_element, vec![out_data])
    }

    pub fn adosc(
        high: &[f64],
        low: &[f64],
        close: &[f64],
        volume: &[f64],
        fast_period: c_int,
        slow_period: c_int,
    ) -> Result<Lookback, BackendError> {
        if close.is_empty() {
            return Ok(Lookback::empty(1));
        }
        same_length(&[high, low, close, volume])?;

        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut out_data = vec![0.0; close.len()];

        let ret_code = unsafe {
            ffi::TA_ADOSC(
                0,
                end_index(close.len())?,
                high.as_ptr(),
                low.as_ptr(),
                close.as_ptr(),
                volume.as_ptr(),
                fast_period,
                slow_period,
                &mut out_beg_idx,
                &mut out_nb_element,
                out_data.as_mut_ptr(),
            )
        };

        finish("ADOSC", ret_code, out_beg_idx, out_nb_element, vec![out_data])
    }
}
