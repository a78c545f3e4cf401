pub mod models;
pub mod utils;

// Data models exchanged between the indicator engine and its hosts
// (candle collectors feeding it, chart renderers consuming its output).
