//! Streak tracking state machine.
//!
//! The streak counts consecutive calendar days on which every habit was
//! complete at the moment of evaluation. The state is the pair
//! (current_streak, last_completion); the transition logic is:
//!
//! - at launch, reconcile the persisted pair against today: a last
//!   completion of today or yesterday keeps the streak alive, anything
//!   else zeroes it;
//! - after every habit save, credit the streak if all habits are complete
//!   and today has not been credited yet. At most one credit per calendar
//!   day, and un-completing a habit never takes a credit back.
//!
//! Persistence here is best-effort: a failed write leaves the in-memory
//! state authoritative and self-corrects on the next successful write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::habit::HabitList;
use crate::storage::KvStore;

pub(crate) const STREAK_KEY: &str = "current_streak";
pub(crate) const LAST_COMPLETION_KEY: &str = "last_completion_date";

/// Persisted streak state.
///
/// Invariant: `current_streak` is 0 whenever `last_completion` is absent
/// or stale relative to today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    pub last_completion: Option<DateTime<Utc>>,
}

/// Streak transition logic over a key-value store.
pub struct StreakTracker;

impl StreakTracker {
    /// Read persisted streak state. Missing or unreadable fields default
    /// to zero / absent.
    pub fn load(kv: &dyn KvStore) -> StreakState {
        let current_streak = match kv.get_int(STREAK_KEY) {
            Ok(Some(n)) if n >= 0 => n as u32,
            _ => 0,
        };
        let last_completion = kv.get_timestamp(LAST_COMPLETION_KEY).unwrap_or(None);
        StreakState {
            current_streak,
            last_completion,
        }
    }

    /// Reconcile the persisted streak against today at launch.
    ///
    /// A last completion on today's date means the streak was already
    /// credited; yesterday means it is still alive pending today's
    /// completion. Any other relation -- an older gap, or a future date
    /// left behind by a backwards clock -- zeroes the streak, and the
    /// reset is persisted immediately.
    pub fn reconcile_on_launch(
        kv: &mut dyn KvStore,
        calendar: &Calendar,
        now: DateTime<Utc>,
    ) -> StreakState {
        let mut state = Self::load(&*kv);

        let alive = match state.last_completion {
            None => false, // never credited; the streak must already be 0
            Some(t) => calendar.is_same_day(t, now) || calendar.is_yesterday(t, now),
        };

        if !alive && state.current_streak != 0 {
            state.current_streak = 0;
            let _ = kv.set_int(STREAK_KEY, 0);
        }
        state
    }

    /// Evaluate the just-saved habit list and credit the streak if today
    /// qualifies.
    ///
    /// Returns true when the streak advanced. An empty list never
    /// qualifies, and a day already credited is a no-op, which makes the
    /// credit a one-way ratchet per calendar day.
    pub fn evaluate_completion(
        kv: &mut dyn KvStore,
        calendar: &Calendar,
        now: DateTime<Utc>,
        state: &mut StreakState,
        habits: &HabitList,
    ) -> bool {
        if !habits.all_complete() {
            return false;
        }
        if let Some(t) = state.last_completion {
            if calendar.is_same_day(t, now) {
                return false;
            }
        }

        state.current_streak += 1;
        state.last_completion = Some(now);
        let _ = kv.set_int(STREAK_KEY, state.current_streak as i64);
        let _ = kv.set_timestamp(LAST_COMPLETION_KEY, now);
        true
    }
}
