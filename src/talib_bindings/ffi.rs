// Raw bindings to the TA-Lib C API
//
// Every function computes rows startIdx..=endIdx and writes outNbElement
// values, the first of which belongs to row outBegIdx.
#![allow(non_snake_case)]

use std::os::raw::{c_double, c_int};

// Return codes
pub const TA_SUCCESS: c_int = 0;

// MA type for BBANDS, STOCH, STOCHRSI, APO and PPO smoothing
pub const TA_MATYPE_SMA: c_int = 0;

#[link(name = "ta-lib")]
extern "C" {
    pub fn TA_Initialize() -> c_int;

    // Overlap studies
    pub fn TA_SMA(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_EMA(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_WMA(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_DEMA(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_TEMA(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_BBANDS(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        optInNbDevUp: c_double,
        optInNbDevDn: c_double,
        optInMAType: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outRealUpperBand: *mut c_double,
        outRealMiddleBand: *mut c_double,
        outRealLowerBand: *mut c_double,
    ) -> c_int;

    // Momentum
    pub fn TA_RSI(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_MACD(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInFastPeriod: c_int,
        optInSlowPeriod: c_int,
        optInSignalPeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outMACD: *mut c_double,
        outMACDSignal: *mut c_double,
        outMACDHist: *mut c_double,
    ) -> c_int;

    pub fn TA_CCI(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_MFI(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        inVolume: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_ROC(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_MOM(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_ADX(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_WILLR(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_STOCH(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInFastK_Period: c_int,
        optInSlowK_Period: c_int,
        optInSlowK_MAType: c_int,
        optInSlowD_Period: c_int,
        optInSlowD_MAType: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outSlowK: *mut c_double,
        outSlowD: *mut c_double,
    ) -> c_int;

    pub fn TA_STOCHRSI(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        optInFastK_Period: c_int,
        optInFastD_Period: c_int,
        optInFastD_MAType: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outFastK: *mut c_double,
        outFastD: *mut c_double,
    ) -> c_int;

    // Volatility
    pub fn TA_ATR(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_NATR(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_TRANGE(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_STDDEV(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        optInNbDev: c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    // Volume
    pub fn TA_OBV(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        inVolume: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_AD(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        inVolume: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_ADOSC(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        inVolume: *const c_double,
        optInFastPeriod: c_int,
        optInSlowPeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;
}

// Candlestick recognizers share one of two signatures
pub type CandleFn = unsafe extern "C" fn(
    startIdx: c_int,
    endIdx: c_int,
    inOpen: *const c_double,
    inHigh: *const c_double,
    inLow: *const c_double,
    inClose: *const c_double,
    outBegIdx: *mut c_int,
    outNbElement: *mut c_int,
    outInteger: *mut c_int,
) -> c_int;

pub type PenetrationCandleFn = unsafe extern "C" fn(
    startIdx: c_int,
    endIdx: c_int,
    inOpen: *const c_double,
    inHigh: *const c_double,
    inLow: *const c_double,
    inClose: *const c_double,
    optInPenetration: c_double,
    outBegIdx: *mut c_int,
    outNbElement: *mut c_int,
    outInteger: *mut c_int,
) -> c_int;

#[link(name = "ta-lib")]
extern "C" {
    pub fn TA_CDLDOJI(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLSPINNINGTOP(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLHAMMER(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLINVERTEDHAMMER(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLSHOOTINGSTAR(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLENGULFING(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLHARAMI(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLPIERCING(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLDARKCLOUDCOVER(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInPenetration: c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLMORNINGSTAR(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInPenetration: c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLEVENINGSTAR(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInPenetration: c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDL3WHITESOLDIERS(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDL3BLACKCROWS(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;
}

// Less common studies and the rest of the candlestick set
#[link(name = "ta-lib")]
extern "C" {
    // Overlap studies
    pub fn TA_TRIMA(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_KAMA(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_MIDPOINT(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_T3(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        optInVFactor: c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_MIDPRICE(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;


    // Momentum
    pub fn TA_CMO(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_TRIX(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_ROCP(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_ROCR(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_ROCR100(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_APO(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInFastPeriod: c_int,
        optInSlowPeriod: c_int,
        optInMAType: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_PPO(
        startIdx: c_int,
        endIdx: c_int,
        inReal: *const c_double,
        optInFastPeriod: c_int,
        optInSlowPeriod: c_int,
        optInMAType: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_ADXR(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_DX(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_PLUS_DI(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_MINUS_DI(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_PLUS_DM(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_MINUS_DM(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_AROONOSC(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        optInTimePeriod: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_ULTOSC(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInTimePeriod1: c_int,
        optInTimePeriod2: c_int,
        optInTimePeriod3: c_int,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_BOP(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;


    // Price transforms
    pub fn TA_AVGPRICE(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_MEDPRICE(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_TYPPRICE(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    pub fn TA_WCLPRICE(
        startIdx: c_int,
        endIdx: c_int,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outReal: *mut c_double,
    ) -> c_int;

    // Remaining candlestick recognizers
    pub fn TA_CDL2CROWS(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDL3INSIDE(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDL3LINESTRIKE(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDL3OUTSIDE(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDL3STARSINSOUTH(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLADVANCEBLOCK(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLBELTHOLD(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLBREAKAWAY(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLCLOSINGMARUBOZU(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLCONCEALBABYSWALL(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLCOUNTERATTACK(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLDOJISTAR(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLDRAGONFLYDOJI(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLGAPSIDESIDEWHITE(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLGRAVESTONEDOJI(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLHANGINGMAN(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLHARAMICROSS(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLHIGHWAVE(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLHIKKAKE(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLHIKKAKEMOD(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLHOMINGPIGEON(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLIDENTICAL3CROWS(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLINNECK(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLKICKING(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLKICKINGBYLENGTH(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLLADDERBOTTOM(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLLONGLEGGEDDOJI(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLLONGLINE(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLMARUBOZU(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLMATCHINGLOW(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLONNECK(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLRICKSHAWMAN(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLRISEFALL3METHODS(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLSEPARATINGLINES(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLSHORTLINE(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLSTALLEDPATTERN(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLSTICKSANDWICH(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLTAKURI(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLTASUKIGAP(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLTHRUSTING(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLTRISTAR(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLUNIQUE3RIVER(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLUPSIDEGAP2CROWS(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLXSIDEGAP3METHODS(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLABANDONEDBABY(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInPenetration: c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLEVENINGDOJISTAR(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInPenetration: c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLMORNINGDOJISTAR(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInPenetration: c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;

    pub fn TA_CDLMATHOLD(
        startIdx: c_int,
        endIdx: c_int,
        inOpen: *const c_double,
        inHigh: *const c_double,
        inLow: *const c_double,
        inClose: *const c_double,
        optInPenetration: c_double,
        outBegIdx: *mut c_int,
        outNbElement: *mut c_int,
        outInteger: *mut c_int,
    ) -> c_int;
}
