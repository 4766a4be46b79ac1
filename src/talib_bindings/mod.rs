// TA-Lib backend, compiled with the `talib` feature
mod common;
mod ffi;
mod oscillators;
mod overlaps;
mod patterns;
mod prices;
mod volatility;
mod volume;

pub use common::TaLibBackend;
