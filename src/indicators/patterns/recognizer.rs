use super::utils::Candles;
use super::{double_candle, single_candle, triple_candle};

type Detector = fn(&Candles, usize, f64) -> i32;

pub struct PatternRecognizer;

impl PatternRecognizer {
    fn detector(function: &str) -> Option<Detector> {
        let detector: Detector = match function {
            // Single candle patterns
            "doji" => single_candle::doji,
            "hammer" => single_candle::hammer,
            "inverted_hammer" => single_candle::inverted_hammer,
            "spinning_top" => single_candle::spinning_top,

            // Double candle patterns
            "engulfing" => double_candle::engulfing,
            "harami" => double_candle::harami,
            "piercing_line" => double_candle::piercing_line,
            "dark_cloud_cover" => double_candle::dark_cloud_cover,

            // Triple candle patterns
            "morning_star" => triple_candle::morning_star,
            "evening_star" => triple_candle::evening_star,
            "three_white_soldiers" => triple_candle::three_white_soldiers,
            "three_black_crows" => triple_candle::three_black_crows,

            _ => return None,
        };
        Some(detector)
    }

    pub fn is_supported(function: &str) -> bool {
        Self::detector(function).is_some()
    }

    /// Score every bar for one pattern: +100 bullish, -100 bearish, 0 none.
    pub fn recognize(function: &str, candles: &Candles, penetration: f64) -> Option<Vec<i32>> {
        let detector = Self::detector(function)?;
        Some(
            (0..candles.len())
                .map(|i| detector(candles, i, penetration))
                .collect(),
        )
    }
}
