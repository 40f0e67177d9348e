pub mod cache;
pub mod config;
pub mod draw;
pub mod error;
pub mod grid;
pub mod pattern;
pub mod proc;

use std::time::Duration;

pub use cache::{advance, get_snapshot_sequence, SnapshotSequence};
pub use error::{BuildError, PatternError};
pub use grid::{Snapshot, Window};
pub use pattern::Pattern;
pub use proc::{next_state, Engine};

/// Region of the plane shown, relative to the gun's top-left corner.
pub const WINDOW: Window = Window::new(-5, -5, 60, 30);

/// Generations stored, two full periods of the gun.
pub const GENERATIONS: usize = 92;

/// Period of the gun as seen through [`WINDOW`].
pub const PERIOD: usize = 46;

pub const SLOW_DELAY: Duration = Duration::from_secs(1);
pub const FAST_DELAY: Duration = Duration::from_millis(200);
