// Incremental extension of one key by a single appended candle
use super::snapshot::KeyEntry;
use shared::models::Candle;

/// Feeds `candle` through the key's saved state. Rejected keys pass through unchanged.
pub(super) fn append_key(mut entry: KeyEntry, candle: &Candle, available: usize) -> KeyEntry {
    if let Some(state) = entry.state.as_mut() {
        state.push(candle, &mut entry.outputs);
    }
    entry.refresh_status(available);
    entry
}
