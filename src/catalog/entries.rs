// Built-in indicator definitions
use super::{Category, IndicatorSpec};
use crate::backend::BackendError;
use crate::dispatch::Params;
use crate::frame::Column;

const CLOSE: &[Column] = &[Column::Close];
const CLOSE_VOLUME: &[Column] = &[Column::Close, Column::Volume];
const HL: &[Column] = &[Column::High, Column::Low];
const HLC: &[Column] = &[Column::High, Column::Low, Column::Close];
const HLCV: &[Column] = &[Column::High, Column::Low, Column::Close, Column::Volume];
const OHLC: &[Column] = &[Column::Open, Column::High, Column::Low, Column::Close];

const BANDS: &[&str] = &["upper", "middle", "lower"];

type Rows = Result<usize, BackendError>;

// Windows are the row count at which every output of every backend first has
// a value. Saturating arithmetic keeps huge periods from wrapping; they just
// exceed any frame.

fn length(params: &Params) -> Rows {
    params.period("length")
}

// Changes and Wilder smoothing need one bar before the first full period
fn length_and_one(params: &Params) -> Rows {
    Ok(params.period("length")?.saturating_add(1))
}

// `times` chained averages of `length`, each adding `length - 1` of warm-up
fn chained(params: &Params, times: usize, extra: usize) -> Rows {
    let warmup = params.period("length")?.saturating_sub(1).saturating_mul(times);
    Ok(warmup.saturating_add(1).saturating_add(extra))
}

fn fast_slow(params: &Params) -> Rows {
    Ok(params.period("fast")?.max(params.period("slow")?))
}

fn macd(params: &Params) -> Rows {
    let signal = params.period("signal")?;
    Ok(fast_slow(params)?.saturating_add(signal - 1))
}

fn ichimoku(params: &Params) -> Rows {
    let widest = params
        .period("tenkan")?
        .max(params.period("kijun")?)
        .max(params.period("senkou_b")?);
    Ok(widest.saturating_add(params.period("shift")?))
}

fn stoch(params: &Params) -> Rows {
    let rows = params
        .period("fastk")?
        .saturating_add(params.period("slowk")?)
        .saturating_add(params.period("slowd")?);
    Ok(rows - 2)
}

fn stochrsi(params: &Params) -> Rows {
    let rows = params
        .period("length")?
        .saturating_add(params.period("fastk")?)
        .saturating_add(params.period("fastd")?);
    Ok(rows - 1)
}

fn ultosc(params: &Params) -> Rows {
    let longest = params
        .period("short")?
        .max(params.period("medium")?)
        .max(params.period("long")?);
    Ok(longest.saturating_add(1))
}

pub(super) fn builtin() -> Vec<IndicatorSpec> {
    let mut specs = Vec::new();
    specs.extend(overlaps());
    specs.extend(prices());
    specs.extend(momentum());
    specs.extend(directional_movement());
    specs.extend(volatility());
    specs.extend(volume());
    specs.extend(patterns());
    specs
}

fn overlaps() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec::new("sma", "Simple Moving Average", Category::Overlap)
            .inputs(CLOSE)
            .param("length", 20.0)
            .window(length)
            .talib("SMA")
            .ta("sma")
            .native("sma"),
        IndicatorSpec::new("ema", "Exponential Moving Average", Category::Overlap)
            .inputs(CLOSE)
            .param("length", 20.0)
            .window(length)
            .talib("EMA")
            .ta("ema")
            .native("ema"),
        IndicatorSpec::new("wma", "Weighted Moving Average", Category::Overlap)
            .inputs(CLOSE)
            .param("length", 20.0)
            .window(length)
            .talib("WMA")
            .native("wma"),
        IndicatorSpec::new("dema", "Double Exponential Moving Average", Category::Overlap)
            .inputs(CLOSE)
            .param("length", 30.0)
            .window(|p| chained(p, 2, 0))
            .talib("DEMA"),
        IndicatorSpec::new("tema", "Triple Exponential Moving Average", Category::Overlap)
            .inputs(CLOSE)
            .param("length", 30.0)
            .window(|p| chained(p, 3, 0))
            .talib("TEMA"),
        IndicatorSpec::new("trima", "Triangular Moving Average", Category::Overlap)
            .inputs(CLOSE)
            .param("length", 30.0)
            .window(length)
            .talib("TRIMA")
            .native("trima"),
        IndicatorSpec::new("kama", "Kaufman Adaptive Moving Average", Category::Overlap)
            .inputs(CLOSE)
            .param("length", 30.0)
            .window(length_and_one)
            .talib("KAMA"),
        IndicatorSpec::new("t3", "Triple Exponential Moving Average (T3)", Category::Overlap)
            .inputs(CLOSE)
            .param("length", 5.0)
            .param("vfactor", 0.7)
            .window(|p| chained(p, 6, 0))
            .talib("T3"),
        IndicatorSpec::new("midpoint", "MidPoint over Period", Category::Overlap)
            .inputs(CLOSE)
            .param("length", 14.0)
            .window(length)
            .talib("MIDPOINT")
            .native("midpoint"),
        IndicatorSpec::new("midprice", "Midpoint Price over Period", Category::Overlap)
            .inputs(HL)
            .param("length", 14.0)
            .window(length)
            .talib("MIDPRICE")
            .native("midprice"),
        IndicatorSpec::new("bbands", "Bollinger Bands", Category::Overlap)
            .inputs(CLOSE)
            .param("length", 20.0)
            .param("std", 2.0)
            .window(length)
            .outputs(BANDS)
            .talib("BBANDS")
            .ta("bbands")
            .native("bbands"),
        IndicatorSpec::new("vwap", "Volume Weighted Average Price", Category::Overlap)
            .inputs(HLCV)
            .min_bars(1)
            .native("vwap"),
        IndicatorSpec::new("ichimoku", "Ichimoku Cloud", Category::Overlap)
            .inputs(HLC)
            .param("tenkan", 9.0)
            .param("kijun", 26.0)
            .param("senkou_b", 52.0)
            .param("shift", 26.0)
            .window(ichimoku)
            .outputs(&["tenkan", "kijun", "senkou_a", "senkou_b", "chikou"])
            .native("ichimoku"),
    ]
}

// Per-bar price transforms
fn prices() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec::new("avgprice", "Average Price", Category::Overlap)
            .inputs(OHLC)
            .min_bars(1)
            .talib("AVGPRICE")
            .native("avgprice"),
        IndicatorSpec::new("medprice", "Median Price", Category::Overlap)
            .inputs(HL)
            .min_bars(1)
            .talib("MEDPRICE")
            .native("medprice"),
        IndicatorSpec::new("typprice", "Typical Price", Category::Overlap)
            .inputs(HLC)
            .min_bars(1)
            .talib("TYPPRICE")
            .native("typprice"),
        IndicatorSpec::new("wclprice", "Weighted Close Price", Category::Overlap)
            .inputs(HLC)
            .min_bars(1)
            .talib("WCLPRICE")
            .native("wclprice"),
    ]
}

fn momentum() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec::new("rsi", "Relative Strength Index", Category::Momentum)
            .inputs(CLOSE)
            .param("length", 14.0)
            .window(length_and_one)
            .talib("RSI")
            .ta("rsi")
            .native("rsi"),
        IndicatorSpec::new("macd", "Moving Average Convergence Divergence", Category::Momentum)
            .inputs(CLOSE)
            .param("fast", 12.0)
            .param("slow", 26.0)
            .param("signal", 9.0)
            .window(macd)
            .outputs(&["macd", "signal", "hist"])
            .talib("MACD")
            .ta("macd")
            .native("macd"),
        IndicatorSpec::new("apo", "Absolute Price Oscillator", Category::Momentum)
            .inputs(CLOSE)
            .param("fast", 12.0)
            .param("slow", 26.0)
            .window(fast_slow)
            .talib("APO"),
        IndicatorSpec::new("ppo", "Percentage Price Oscillator", Category::Momentum)
            .inputs(CLOSE)
            .param("fast", 12.0)
            .param("slow", 26.0)
            .window(fast_slow)
            .talib("PPO"),
        IndicatorSpec::new("cci", "Commodity Channel Index", Category::Momentum)
            .inputs(HLC)
            .param("length", 20.0)
            .window(length)
            .talib("CCI")
            .ta("cci")
            .native("cci"),
        IndicatorSpec::new("cmo", "Chande Momentum Oscillator", Category::Momentum)
            .inputs(CLOSE)
            .param("length", 14.0)
            .window(length_and_one)
            .talib("CMO")
            .native("cmo"),
        IndicatorSpec::new("mfi", "Money Flow Index", Category::Momentum)
            .inputs(HLCV)
            .param("length", 14.0)
            .window(length_and_one)
            .talib("MFI")
            .ta("mfi")
            .native("mfi"),
        IndicatorSpec::new("roc", "Rate of Change", Category::Momentum)
            .inputs(CLOSE)
            .param("length", 10.0)
            .window(length_and_one)
            .talib("ROC")
            .ta("roc")
            .native("roc"),
        IndicatorSpec::new("rocp", "Rate of Change Percentage", Category::Momentum)
            .inputs(CLOSE)
            .param("length", 10.0)
            .window(length_and_one)
            .talib("ROCP")
            .native("rocp"),
        IndicatorSpec::new("rocr", "Rate of Change Ratio", Category::Momentum)
            .inputs(CLOSE)
            .param("length", 10.0)
            .window(length_and_one)
            .talib("ROCR")
            .native("rocr"),
        IndicatorSpec::new("rocr100", "Rate of Change Ratio 100 Scale", Category::Momentum)
            .inputs(CLOSE)
            .param("length", 10.0)
            .window(length_and_one)
            .talib("ROCR100")
            .native("rocr100"),
        IndicatorSpec::new("mom", "Momentum", Category::Momentum)
            .inputs(CLOSE)
            .param("length", 10.0)
            .window(length_and_one)
            .talib("MOM")
            .native("mom"),
        IndicatorSpec::new("trix", "Triple Smoothed EMA Rate of Change", Category::Momentum)
            .inputs(CLOSE)
            .param("length", 30.0)
            .window(|p| chained(p, 3, 1))
            .talib("TRIX"),
        IndicatorSpec::new("willr", "Williams %R", Category::Momentum)
            .inputs(HLC)
            .param("length", 14.0)
            .window(length)
            .talib("WILLR")
            .native("willr"),
        IndicatorSpec::new("bop", "Balance Of Power", Category::Momentum)
            .inputs(OHLC)
            .min_bars(1)
            .talib("BOP")
            .native("bop"),
        IndicatorSpec::new("stoch", "Stochastic Oscillator", Category::Momentum)
            .inputs(HLC)
            .param("fastk", 14.0)
            .param("slowk", 3.0)
            .param("slowd", 3.0)
            .window(stoch)
            .outputs(&["k", "d"])
            .talib("STOCH"),
        IndicatorSpec::new("stochrsi", "Stochastic RSI", Category::Momentum)
            .inputs(CLOSE)
            .param("length", 14.0)
            .param("fastk", 5.0)
            .param("fastd", 3.0)
            .window(stochrsi)
            .outputs(&["k", "d"])
            .talib("STOCHRSI"),
        IndicatorSpec::new("ultosc", "Ultimate Oscillator", Category::Momentum)
            .inputs(HLC)
            .param("short", 7.0)
            .param("medium", 14.0)
            .param("long", 28.0)
            .window(ultosc)
            .talib("ULTOSC"),
    ]
}

fn directional(
    name: &'static str,
    label: &'static str,
    inputs: &'static [Column],
    window: fn(&Params) -> Rows,
    function: &'static str,
) -> IndicatorSpec {
    IndicatorSpec::new(name, label, Category::Momentum)
        .inputs(inputs)
        .param("length", 14.0)
        .window(window)
        .talib(function)
}

// Wilder's directional movement family
fn directional_movement() -> Vec<IndicatorSpec> {
    vec![
        directional("adx", "Average Directional Index", HLC, |p| chained(p, 2, 1), "ADX"),
        directional("adxr", "Average Directional Index Rating", HLC, |p| chained(p, 3, 1), "ADXR"),
        directional("dx", "Directional Movement Index", HLC, length_and_one, "DX"),
        directional("plus_di", "Plus Directional Indicator", HLC, length_and_one, "PLUS_DI"),
        directional("minus_di", "Minus Directional Indicator", HLC, length_and_one, "MINUS_DI"),
        directional("plus_dm", "Plus Directional Movement", HL, length, "PLUS_DM"),
        directional("minus_dm", "Minus Directional Movement", HL, length, "MINUS_DM"),
        directional("aroonosc", "Aroon Oscillator", HL, length_and_one, "AROONOSC"),
    ]
}

fn volatility() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec::new("atr", "Average True Range", Category::Volatility)
            .inputs(HLC)
            .param("length", 14.0)
            .window(length_and_one)
            .talib("ATR")
            .ta("atr")
            .native("atr"),
        IndicatorSpec::new("natr", "Normalized Average True Range", Category::Volatility)
            .inputs(HLC)
            .param("length", 14.0)
            .window(length_and_one)
            .talib("NATR")
            .native("natr"),
        IndicatorSpec::new("trange", "True Range", Category::Volatility)
            .inputs(HLC)
            .min_bars(2)
            .talib("TRANGE")
            .native("trange"),
        IndicatorSpec::new("stddev", "Standard Deviation", Category::Volatility)
            .inputs(CLOSE)
            .param("length", 20.0)
            .param("nbdev", 1.0)
            .window(length)
            .talib("STDDEV")
            .ta("stddev")
            .native("stddev"),
        IndicatorSpec::new("kc", "Keltner Channel", Category::Volatility)
            .inputs(HLC)
            .param("length", 20.0)
            .param("scalar", 2.0)
            .window(length)
            .outputs(BANDS)
            .ta("kc"),
    ]
}

fn volume() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec::new("obv", "On Balance Volume", Category::Volume)
            .inputs(CLOSE_VOLUME)
            .min_bars(2)
            .talib("OBV")
            .ta("obv")
            .native("obv"),
        IndicatorSpec::new("ad", "Accumulation/Distribution Line", Category::Volume)
            .inputs(HLCV)
            .min_bars(2)
            .talib("AD")
            .native("ad"),
        IndicatorSpec::new("adosc", "Chaikin A/D Oscillator", Category::Volume)
            .inputs(HLCV)
            .param("fast", 3.0)
            .param("slow", 10.0)
            .window(fast_slow)
            .talib("ADOSC")
            .native("adosc"),
    ]
}

// Patterns score every bar; a bar too early to complete the pattern scores 0,
// so the window is just the number of candles in the pattern.
fn pattern(name: &'static str, label: &'static str, candles: usize) -> IndicatorSpec {
    IndicatorSpec::new(name, label, Category::Pattern)
        .inputs(OHLC)
        .min_bars(candles)
}

fn patterns() -> Vec<IndicatorSpec> {
    let mut specs = vec![
        pattern("cdldoji", "Doji", 1).talib("CDLDOJI").native("doji"),
        pattern("cdlspinningtop", "Spinning Top", 1)
            .talib("CDLSPINNINGTOP")
            .native("spinning_top"),
        pattern("cdlhammer", "Hammer", 1)
            .talib("CDLHAMMER")
            .native("hammer"),
        pattern("cdlinvertedhammer", "Inverted Hammer", 1)
            .talib("CDLINVERTEDHAMMER")
            .native("inverted_hammer"),
        pattern("cdlengulfing", "Engulfing Pattern", 2)
            .talib("CDLENGULFING")
            .native("engulfing"),
        pattern("cdlharami", "Harami Pattern", 2)
            .talib("CDLHARAMI")
            .native("harami"),
        // TA-Lib's recognizer has no depth argument; both backends use the body midpoint
        pattern("cdlpiercing", "Piercing Pattern", 2)
            .talib("CDLPIERCING")
            .native("piercing_line"),
        pattern("cdldarkcloudcover", "Dark Cloud Cover", 2)
            .param("penetration", 0.5)
            .talib("CDLDARKCLOUDCOVER")
            .native("dark_cloud_cover"),
        pattern("cdlmorningstar", "Morning Star", 3)
            .param("penetration", 0.3)
            .talib("CDLMORNINGSTAR")
            .native("morning_star"),
        pattern("cdleveningstar", "Evening Star", 3)
            .param("penetration", 0.3)
            .talib("CDLEVENINGSTAR")
            .native("evening_star"),
        pattern("cdl3whitesoldiers", "Three Advancing White Soldiers", 3)
            .talib("CDL3WHITESOLDIERS")
            .native("three_white_soldiers"),
        pattern("cdl3blackcrows", "Three Black Crows", 3)
            .talib("CDL3BLACKCROWS")
            .native("three_black_crows"),
        pattern("cdlabandonedbaby", "Abandoned Baby", 3)
            .param("penetration", 0.3)
            .talib("CDLABANDONEDBABY"),
        pattern("cdleveningdojistar", "Evening Doji Star", 3)
            .param("penetration", 0.3)
            .talib("CDLEVENINGDOJISTAR"),
        pattern("cdlmorningdojistar", "Morning Doji Star", 3)
            .param("penetration", 0.3)
            .talib("CDLMORNINGDOJISTAR"),
        pattern("cdlmathold", "Mat Hold", 5)
            .param("penetration", 0.5)
            .talib("CDLMATHOLD"),
    ];

    specs.extend(TALIB_PATTERNS.iter().map(|&(name, label, candles, function)| {
        pattern(name, label, candles).talib(function)
    }));
    specs
}

// Recognizers only TA-Lib provides, none of which takes a parameter
const TALIB_PATTERNS: &[(&str, &str, usize, &str)] = &[
    ("cdlshootingstar", "Shooting Star", 1, "CDLSHOOTINGSTAR"),
    ("cdlbelthold", "Belt-hold", 1, "CDLBELTHOLD"),
    ("cdlclosingmarubozu", "Closing Marubozu", 1, "CDLCLOSINGMARUBOZU"),
    ("cdldragonflydoji", "Dragonfly Doji", 1, "CDLDRAGONFLYDOJI"),
    ("cdlgravestonedoji", "Gravestone Doji", 1, "CDLGRAVESTONEDOJI"),
    ("cdlhighwave", "High-Wave Candle", 1, "CDLHIGHWAVE"),
    ("cdllongleggeddoji", "Long Legged Doji", 1, "CDLLONGLEGGEDDOJI"),
    ("cdllongline", "Long Line Candle", 1, "CDLLONGLINE"),
    ("cdlmarubozu", "Marubozu", 1, "CDLMARUBOZU"),
    ("cdlrickshawman", "Rickshaw Man", 1, "CDLRICKSHAWMAN"),
    ("cdlshortline", "Short Line Candle", 1, "CDLSHORTLINE"),
    ("cdltakuri", "Takuri", 1, "CDLTAKURI"),
    ("cdlcounterattack", "Counterattack", 2, "CDLCOUNTERATTACK"),
    ("cdldojistar", "Doji Star", 2, "CDLDOJISTAR"),
    ("cdlhangingman", "Hanging Man", 2, "CDLHANGINGMAN"),
    ("cdlharamicross", "Harami Cross Pattern", 2, "CDLHARAMICROSS"),
    ("cdlhomingpigeon", "Homing Pigeon", 2, "CDLHOMINGPIGEON"),
    ("cdlinneck", "In-Neck Pattern", 2, "CDLINNECK"),
    ("cdlkicking", "Kicking", 2, "CDLKICKING"),
    ("cdlkickingbylength", "Kicking by Length", 2, "CDLKICKINGBYLENGTH"),
    ("cdlmatchinglow", "Matching Low", 2, "CDLMATCHINGLOW"),
    ("cdlonneck", "On-Neck Pattern", 2, "CDLONNECK"),
    ("cdlseparatinglines", "Separating Lines", 2, "CDLSEPARATINGLINES"),
    ("cdlthrusting", "Thrusting Pattern", 2, "CDLTHRUSTING"),
    ("cdl2crows", "Two Crows", 3, "CDL2CROWS"),
    ("cdl3inside", "Three Inside Up/Down", 3, "CDL3INSIDE"),
    ("cdl3outside", "Three Outside Up/Down", 3, "CDL3OUTSIDE"),
    ("cdl3starsinsouth", "Three Stars In The South", 3, "CDL3STARSINSOUTH"),
    ("cdladvanceblock", "Advance Block", 3, "CDLADVANCEBLOCK"),
    ("cdlgapsidesidewhite", "Up/Down-gap side-by-side white lines", 3, "CDLGAPSIDESIDEWHITE"),
    ("cdlhikkake", "Hikkake Pattern", 3, "CDLHIKKAKE"),
    ("cdlidentical3crows", "Identical Three Crows", 3, "CDLIDENTICAL3CROWS"),
    ("cdlstalledpattern", "Stalled Pattern", 3, "CDLSTALLEDPATTERN"),
    ("cdlsticksandwich", "Stick Sandwich", 3, "CDLSTICKSANDWICH"),
    ("cdltasukigap", "Tasuki Gap", 3, "CDLTASUKIGAP"),
    ("cdltristar", "Tristar Pattern", 3, "CDLTRISTAR"),
    ("cdlunique3river", "Unique 3 River", 3, "CDLUNIQUE3RIVER"),
    ("cdlupsidegap2crows", "Upside Gap Two Crows", 3, "CDLUPSIDEGAP2CROWS"),
    ("cdlxsidegap3methods", "Upside/Downside Gap Three Methods", 3, "CDLXSIDEGAP3METHODS"),
    ("cdl3linestrike", "Three-Line Strike", 4, "CDL3LINESTRIKE"),
    ("cdlconcealbabyswall", "Concealing Baby Swallow", 4, "CDLCONCEALBABYSWALL"),
    ("cdlhikkakemod", "Modified Hikkake Pattern", 4, "CDLHIKKAKEMOD"),
    ("cdlbreakaway", "Breakaway", 5, "CDLBREAKAWAY"),
    ("cdlladderbottom", "Ladder Bottom", 5, "CDLLADDERBOTTOM"),
    ("cdlrisefall3methods", "Rising/Falling Three Methods", 5, "CDLRISEFALL3METHODS"),
];
