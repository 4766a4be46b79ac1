// Candlestick pattern recognition
use std::os::raw::c_int;

use super::common::{end_index, finish, same_length, Lookback};
use super::ffi::{self, CandleFn, PenetrationCandleFn};
use crate::backend::{Backend, BackendError};

enum Recognizer {
    Plain(CandleFn),
    WithPenetration(PenetrationCandleFn),
}

pub struct PatternIndicators;

impl PatternIndicators {
    fn recognizer(function: &str) -> Option<Recognizer> {
        let recognizer = match function {
            "CDLDOJI" => Recognizer::Plain(ffi::TA_CDLDOJI),
            "CDLSPINNINGTOP" => Recognizer::Plain(ffi::TA_CDLSPINNINGTOP),
            "CDLHAMMER" => Recognizer::Plain(ffi::TA_CDLHAMMER),
            "CDLINVERTEDHAMMER" => Recognizer::Plain(ffi::TA_CDLINVERTEDHAMMER),
            "CDLSHOOTINGSTAR" => Recognizer::Plain(ffi::TA_CDLSHOOTINGSTAR),
            "CDLENGULFING" => Recognizer::Plain(ffi::TA_CDLENGULFING),
            "CDLHARAMI" => Recognizer::Plain(ffi::TA_CDLHARAMI),
            "CDLPIERCING" => Recognizer::Plain(ffi::TA_CDLPIERCING),
            "CDLDARKCLOUDCOVER" => Recognizer::WithPenetration(ffi::TA_CDLDARKCLOUDCOVER),
            "CDLMORNINGSTAR" => Recognizer::WithPenetration(ffi::TA_CDLMORNINGSTAR),
            "CDLEVENINGSTAR" => Recognizer::WithPenetration(ffi::TA_CDLEVENINGSTAR),
            "CDL3WHITESOLDIERS" => Recognizer::Plain(ffi::TA_CDL3WHITESOLDIERS),
            "CDL3BLACKCROWS" => Recognizer::Plain(ffi::TA_CDL3BLACKCROWS),
            "CDL2CROWS" => Recognizer::Plain(ffi::TA_CDL2CROWS),
            "CDL3INSIDE" => Recognizer::Plain(ffi::TA_CDL3INSIDE),
            "CDL3LINESTRIKE" => Recognizer::Plain(ffi::TA_CDL3LINESTRIKE),
            "CDL3OUTSIDE" => Recognizer::Plain(ffi::TA_CDL3OUTSIDE),
            "CDL3STARSINSOUTH" => Recognizer::Plain(ffi::TA_CDL3STARSINSOUTH),
            "CDLADVANCEBLOCK" => Recognizer::Plain(ffi::TA_CDLADVANCEBLOCK),
            "CDLBELTHOLD" => Recognizer::Plain(ffi::TA_CDLBELTHOLD),
            "CDLBREAKAWAY" => Recognizer::Plain(ffi::TA_CDLBREAKAWAY),
            "CDLCLOSINGMARUBOZU" => Recognizer::Plain(ffi::TA_CDLCLOSINGMARUBOZU),
            "CDLCONCEALBABYSWALL" => Recognizer::Plain(ffi::TA_CDLCONCEALBABYSWALL),
            "CDLCOUNTERATTACK" => Recognizer::Plain(ffi::TA_CDLCOUNTERATTACK),
            "CDLDOJISTAR" => Recognizer::Plain(ffi::TA_CDLDOJISTAR),
            "CDLDRAGONFLYDOJI" => Recognizer::Plain(ffi::TA_CDLDRAGONFLYDOJI),
            "CDLGAPSIDESIDEWHITE" => Recognizer::Plain(ffi::TA_CDLGAPSIDESIDEWHITE),
            "CDLGRAVESTONEDOJI" => Recognizer::Plain(ffi::TA_CDLGRAVESTONEDOJI),
            "CDLHANGINGMAN" => Recognizer::Plain(ffi::TA_CDLHANGINGMAN),
            "CDLHARAMICROSS" => Recognizer::Plain(ffi::TA_CDLHARAMICROSS),
            "CDLHIGHWAVE" => Recognizer::Plain(ffi::TA_CDLHIGHWAVE),
            "CDLHIKKAKE" => Recognizer::Plain(ffi::TA_CDLHIKKAKE),
            "CDLHIKKAKEMOD" => Recognizer::Plain(ffi::TA_CDLHIKKAKEMOD),
            "CDLHOMINGPIGEON" => Recognizer::Plain(ffi::TA_CDLHOMINGPIGEON),
            "CDLIDENTICAL3CROWS" => Recognizer::Plain(ffi::TA_CDLIDENTICAL3CROWS),
            "CDLINNECK" => Recognizer::Plain(ffi::TA_CDLINNECK),
            "CDLKICKING" => Recognizer::Plain(ffi::TA_CDLKICKING),
            "CDLKICKINGBYLENGTH" => Recognizer::Plain(ffi::TA_CDLKICKINGBYLENGTH),
            "CDLLADDERBOTTOM" => Recognizer::Plain(ffi::TA_CDLLADDERBOTTOM),
            "CDLLONGLEGGEDDOJI" => Recognizer::Plain(ffi::TA_CDLLONGLEGGEDDOJI),
            "CDLLONGLINE" => Recognizer::Plain(ffi::TA_CDLLONGLINE),
            "CDLMARUBOZU" => Recognizer::Plain(ffi::TA_CDLMARUBOZU),
            "CDLMATCHINGLOW" => Recognizer::Plain(ffi::TA_CDLMATCHINGLOW),
            "CDLONNECK" => Recognizer::Plain(ffi::TA_CDLONNECK),
            "CDLRICKSHAWMAN" => Recognizer::Plain(ffi::TA_CDLRICKSHAWMAN),
            "CDLRISEFALL3METHODS" => Recognizer::Plain(ffi::TA_CDLRISEFALL3METHODS),
            "CDLSEPARATINGLINES" => Recognizer::Plain(ffi::TA_CDLSEPARATINGLINES),
            "CDLSHORTLINE" => Recognizer::Plain(ffi::TA_CDLSHORTLINE),
            "CDLSTALLEDPATTERN" => Recognizer::Plain(ffi::TA_CDLSTALLEDPATTERN),
            "CDLSTICKSANDWICH" => Recognizer::Plain(ffi::TA_CDLSTICKSANDWICH),
            "CDLTAKURI" => Recognizer::Plain(ffi::TA_CDLTAKURI),
            "CDLTASUKIGAP" => Recognizer::Plain(ffi::TA_CDLTASUKIGAP),
            "CDLTHRUSTING" => Recognizer::Plain(ffi::TA_CDLTHRUSTING),
            "CDLTRISTAR" => Recognizer::Plain(ffi::TA_CDLTRISTAR),
            "CDLUNIQUE3RIVER" => Recognizer::Plain(ffi::TA_CDLUNIQUE3RIVER),
            "CDLUPSIDEGAP2CROWS" => Recognizer::Plain(ffi::TA_CDLUPSIDEGAP2CROWS),
            "CDLXSIDEGAP3METHODS" => Recognizer::Plain(ffi::TA_CDLXSIDEGAP3METHODS),
            "CDLABANDONEDBABY" => Recognizer::WithPenetration(ffi::TA_CDLABANDONEDBABY),
            "CDLEVENINGDOJISTAR" => Recognizer::WithPenetration(ffi::TA_CDLEVENINGDOJISTAR),
            "CDLMORNINGDOJISTAR" => Recognizer::WithPenetration(ffi::TA_CDLMORNINGDOJISTAR),
            "CDLMATHOLD" => Recognizer::WithPenetration(ffi::TA_CDLMATHOLD),
            _ => return None,
        };
        Some(recognizer)
    }

    pub fn is_supported(function: &str) -> bool {
        Self::recognizer(function).is_some()
    }

    // Scores are +100 bullish, -100 bearish, 0 none. Bars inside the
    // recognizer's lookback score 0 like any bar without the pattern.
    pub fn recognize(
        function: &str,
        open: &[f64],
        high: &[f64],
        low: &[f64],
        close: &[f64],
        penetration: f64,
    ) -> Result<Lookback, BackendError> {
        let recognizer = Self::recognizer(function).ok_or_else(|| BackendError::UnknownFunction {
            backend: Backend::TaLib,
            function: function.to_string(),
        })?;

        if close.is_empty() {
            return Ok(Lookback::empty(1));
        }
        same_length(&[open, high, low, close])?;

        let end = end_index(close.len())?;
        let mut out_beg_idx: c_int = 0;
        let mut out_nb_element: c_int = 0;
        let mut out_data: Vec<c_int> = vec![0; close.len()];

        let ret_code = unsafe {
            match recognizer {
                Recognizer::Plain(call) => call(
                    0,
                    end,
                    open.as_ptr(),
                    high.as_ptr(),
                    low.as_ptr(),
                    close.as_ptr(),
                    &mut out_beg_idx,
                    &mut out_nb_element,
                    out_data.as_mut_ptr(),
                ),
                Recognizer::WithPenetration(call) => call(
                    0,
                    end,
                    open.as_ptr(),
                    high.as_ptr(),
                    low.as_ptr(),
                    close.as_ptr(),
                    penetration,
                    &mut out_beg_idx,
                    &mut out_nb_element,
                    out_data.as_mut_ptr(),
                ),
            }
        };

        let scores = out_data.into_iter().map(f64::from).collect();
        let out = finish(function, ret_code, out_beg_idx, out_nb_element, vec![scores])?;
        Ok(score_every_bar(out, close.len()))
    }
}

fn score_every_bar(out: Lookback, rows: usize) -> Lookback {
    let begin = out.begin;
    let columns = out
        .columns
        .into_iter()
        .map(|column| {
            let mut scores = vec![0.0; begin];
            scores.extend(column);
            scores.resize(rows, 0.0);
            scores
        })
        .collect();
    Lookback { begin: 0, columns }
}
