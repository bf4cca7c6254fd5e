//! Session events.
//!
//! Every state change produces an Event. There is no reactive binding in
//! the core: mutation methods return the events they caused, and launch-time
//! reconciliation records its events on the session for the caller to read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A habit's completion flag was flipped.
    HabitToggled {
        id: Uuid,
        name: String,
        is_completed: bool,
        at: DateTime<Utc>,
    },
    /// A habit's display label was edited.
    HabitRenamed {
        id: Uuid,
        name: String,
        at: DateTime<Utc>,
    },
    /// All habits became complete for the first time today.
    StreakAdvanced {
        current_streak: u32,
        at: DateTime<Utc>,
    },
    /// Launch reconciliation found a gap and zeroed the streak.
    StreakReset {
        previous: u32,
        at: DateTime<Utc>,
    },
}
