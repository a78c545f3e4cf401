// Time helpers shared by the engine and its hosts.

/// Millisecond timestamp to whole seconds, truncating toward zero.
pub fn millis_to_secs(millis: i64) -> i64 {
    millis / 1000
}
