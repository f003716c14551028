//! Team Splitter - ten-player roster editor and balanced team generator
//!
//! Core modules:
//! - `player`: Player records, roster, input normalization
//! - `splitter`: Deterministic rating-based team split
//! - `storage`: Key-value backends (LocalStorage on web, memory elsewhere)
//! - `store`: Roster and split persistence with default fallback
//! - `session`: User actions, independent of the DOM
//! - `render`: HTML fragments for the table and team view

pub mod player;
pub mod render;
pub mod session;
pub mod splitter;
pub mod storage;
pub mod store;

pub use player::{Player, RawPlayer, Roster, default_roster, normalize};
pub use session::Session;
pub use splitter::{SplitError, Team, TeamSplit, split};
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use store::{RosterStore, StoreConfig};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Application constants
pub mod consts {
    /// Players needed for a split
    pub const ROSTER_SIZE: usize = 10;

    /// Rating bounds (inclusive)
    pub const MIN_RATING: u32 = 1;
    pub const MAX_RATING: u32 = 100;

    /// LocalStorage keys
    pub const ROSTER_KEY: &str = "equiposFifa_players";
    pub const SPLIT_KEY: &str = "equiposFifa_lastTeams";
}
