//! # HabitDeck Core Library
//!
//! This library provides the core business logic for the HabitDeck habit
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI being a thin layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Habit Store**: owns the ordered habit list and its persistence;
//!   load is fail-open (missing or corrupt data falls back to defaults)
//! - **Streak Tracker**: a small date-aware state machine that reconciles
//!   the streak at launch and credits it at most once per calendar day
//! - **Session**: the single mutation surface; every toggle saves the list,
//!   re-evaluates the streak, and returns the resulting events
//! - **Storage**: SQLite-backed key-value store and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Session`]: owns the habit list and streak state for one app run
//! - [`HabitStore`]: load / save / toggle against the key-value store
//! - [`StreakTracker`]: launch reconciliation and completion evaluation
//! - [`Calendar`]: timezone-aware "same day" / "yesterday" comparisons

pub mod calendar;
pub mod error;
pub mod events;
pub mod habit;
pub mod session;
pub mod storage;
pub mod store;
pub mod streak;

pub use calendar::Calendar;
pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use habit::{Habit, HabitList, DEFAULT_HABITS};
pub use session::Session;
pub use storage::{Config, KvStore, MemoryStore, SqliteStore};
pub use store::HabitStore;
pub use streak::{StreakState, StreakTracker};
