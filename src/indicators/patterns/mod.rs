// Candlestick pattern recognition
mod double_candle;
mod recognizer;
mod single_candle;
mod triple_candle;
mod utils;

// Public exports
pub use recognizer::PatternRecognizer;
pub use utils::{Candles, BEARISH, BULLISH, NONE};
