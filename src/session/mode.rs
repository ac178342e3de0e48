//! Record/Playback mode selection

use tracing::info;

use crate::cassette::{Cassette, CassetteStore};
use crate::Result;

/// Operating mode, fixed for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Capture live responses into the cassette
    Record,
    /// Serve requests from a previously recorded cassette
    Playback,
}

impl Mode {
    /// Whether this is record mode
    #[must_use]
    pub fn is_record(self) -> bool {
        self == Self::Record
    }

    /// Whether this is playback mode
    #[must_use]
    pub fn is_playback(self) -> bool {
        self == Self::Playback
    }
}

/// Select the mode for a session from cassette presence
///
/// An existing cassette file means Playback with the full cassette loaded;
/// otherwise Record with a fresh empty cassette, first persisted on the
/// first captured entry.
pub(crate) fn select(store: &CassetteStore, name: &str) -> Result<(Mode, Cassette)> {
    if store.exists(name) {
        let cassette = store.load(name)?;
        info!("Using cassette '{}' ({} entries)", name, cassette.len());
        Ok((Mode::Playback, cassette))
    } else {
        info!("Recording new cassette '{}'", name);
        Ok((Mode::Record, Cassette::new()))
    }
}
