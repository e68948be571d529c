use tracing::warn;

use crate::io::kv_store::{DARK_MODE_KEY, KeyValueStore, StorageError};
use crate::model::preference::DisplayMode;
use crate::ops::idea_ops::{read_slot, write_slot};

/// Stored display mode. Absent or unreadable means light.
pub fn display_mode(storage: &impl KeyValueStore) -> DisplayMode {
    match read_slot::<bool>(storage, DARK_MODE_KEY) {
        Ok(dark) => DisplayMode::from_dark(dark),
        Err(e) => {
            warn!(error = %e, "could not load display mode");
            DisplayMode::Light
        }
    }
}

pub fn set_display_mode(
    storage: &mut impl KeyValueStore,
    mode: DisplayMode,
) -> Result<(), StorageError> {
    write_slot(storage, DARK_MODE_KEY, &mode.is_dark())
}
