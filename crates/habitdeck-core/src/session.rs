//! Application session.
//!
//! A `Session` owns the habit list and the streak state for one app run and
//! is the only mutation surface. Instead of reactive bindings, every
//! mutation is an explicit sequence -- flip, save, evaluate -- and returns
//! the [`Event`]s it produced. Launch-time reconciliation records its events
//! on the session for front-ends to read back.
//!
//! All operations are synchronous and single-threaded: mutations arrive one
//! user action at a time, so save-then-evaluate completes before the next
//! toggle is processed.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::calendar::Calendar;
use crate::events::Event;
use crate::habit::HabitList;
use crate::storage::KvStore;
use crate::store::HabitStore;
use crate::streak::{StreakState, StreakTracker};

/// In-memory session over a key-value store.
pub struct Session {
    kv: Box<dyn KvStore>,
    calendar: Calendar,
    habits: HabitList,
    streak: StreakState,
    launch_events: Vec<Event>,
}

impl Session {
    /// Open a session: load habits (or seed defaults) and reconcile the
    /// persisted streak against today.
    ///
    /// Never fails: storage is fail-open and corrupt data degrades to
    /// fresh state rather than blocking startup.
    pub fn open(kv: Box<dyn KvStore>, calendar: Calendar) -> Self {
        Self::open_at(kv, calendar, Utc::now())
    }

    /// `open` with an explicit "now", for deterministic tests.
    pub fn open_at(mut kv: Box<dyn KvStore>, calendar: Calendar, now: DateTime<Utc>) -> Self {
        let habits = HabitStore::load(kv.as_ref());
        let before = StreakTracker::load(kv.as_ref());
        let streak = StreakTracker::reconcile_on_launch(kv.as_mut(), &calendar, now);

        let mut launch_events = Vec::new();
        if streak.current_streak < before.current_streak {
            launch_events.push(Event::StreakReset {
                previous: before.current_streak,
                at: now,
            });
        }

        Self {
            kv,
            calendar,
            habits,
            streak,
            launch_events,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn habits(&self) -> &HabitList {
        &self.habits
    }

    pub fn streak(&self) -> u32 {
        self.streak.current_streak
    }

    pub fn last_completion(&self) -> Option<DateTime<Utc>> {
        self.streak.last_completion
    }

    /// Events produced by launch reconciliation (e.g. a streak reset).
    pub fn launch_events(&self) -> &[Event] {
        &self.launch_events
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Flip one habit's completion flag.
    ///
    /// Saves the list and re-evaluates the streak. Returns the events
    /// produced: `HabitToggled`, then `StreakAdvanced` if this toggle made
    /// today a qualifying day. An unknown id returns no events.
    pub fn toggle(&mut self, id: Uuid) -> Vec<Event> {
        self.toggle_at(id, Utc::now())
    }

    /// `toggle` with an explicit "now", for deterministic tests.
    pub fn toggle_at(&mut self, id: Uuid, now: DateTime<Utc>) -> Vec<Event> {
        let habit = match HabitStore::toggle(&mut self.habits, id) {
            Some(habit) => habit,
            None => return Vec::new(),
        };
        HabitStore::save(self.kv.as_mut(), &self.habits);

        let mut events = vec![Event::HabitToggled {
            id: habit.id,
            name: habit.name,
            is_completed: habit.is_completed,
            at: now,
        }];
        if StreakTracker::evaluate_completion(
            self.kv.as_mut(),
            &self.calendar,
            now,
            &mut self.streak,
            &self.habits,
        ) {
            events.push(Event::StreakAdvanced {
                current_streak: self.streak.current_streak,
                at: now,
            });
        }
        events
    }

    /// Edit a habit's display label. Persists like any other mutation;
    /// the streak is re-evaluated because every save is, though a rename
    /// alone cannot change completion state.
    pub fn rename(&mut self, id: Uuid, name: impl Into<String>) -> Vec<Event> {
        self.rename_at(id, name, Utc::now())
    }

    /// `rename` with an explicit "now", for deterministic tests.
    pub fn rename_at(
        &mut self,
        id: Uuid,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Vec<Event> {
        let name = match self.habits.rename(id, name) {
            Some(habit) => habit.name.clone(),
            None => return Vec::new(),
        };
        HabitStore::save(self.kv.as_mut(), &self.habits);

        let mut events = vec![Event::HabitRenamed { id, name, at: now }];
        if StreakTracker::evaluate_completion(
            self.kv.as_mut(),
            &self.calendar,
            now,
            &mut self.streak,
            &self.habits,
        ) {
            events.push(Event::StreakAdvanced {
                current_streak: self.streak.current_streak,
                at: now,
            });
        }
        events
    }

    /// Tear down the session and hand the store back (e.g. to reopen it
    /// as a simulated relaunch in tests).
    pub fn into_store(self) -> Box<dyn KvStore> {
        self.kv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn day(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap()
    }

    fn open(kv: Box<dyn KvStore>, d: u32, h: u32) -> Session {
        Session::open_at(kv, Calendar::utc(), day(d, h))
    }

    fn complete_all(session: &mut Session, d: u32) {
        let ids: Vec<Uuid> = session.habits().iter().map(|h| h.id).collect();
        for id in ids {
            session.toggle_at(id, day(d, 9));
        }
    }

    #[test]
    fn test_fresh_install_defaults() {
        let session = open(Box::new(MemoryStore::default()), 10, 8);
        assert_eq!(session.habits().len(), 13);
        assert!(session.habits().iter().all(|h| !h.is_completed));
        assert_eq!(session.streak(), 0);
        assert!(session.launch_events().is_empty());
    }

    #[test]
    fn test_completing_all_advances_streak_once() {
        let mut session = open(Box::new(MemoryStore::default()), 10, 8);
        let ids: Vec<Uuid> = session.habits().iter().map(|h| h.id).collect();

        let (last, rest) = ids.split_last().unwrap();
        for id in rest {
            let events = session.toggle_at(*id, day(10, 9));
            assert_eq!(events.len(), 1, "no credit until the last habit");
        }
        let events = session.toggle_at(*last, day(10, 9));
        assert!(matches!(
            events.as_slice(),
            [Event::HabitToggled { .. }, Event::StreakAdvanced { current_streak: 1, .. }]
        ));
        assert_eq!(session.streak(), 1);
        assert_eq!(session.last_completion(), Some(day(10, 9)));
    }

    #[test]
    fn test_toggle_unknown_id_is_silent() {
        let mut session = open(Box::new(MemoryStore::default()), 10, 8);
        assert!(session.toggle_at(Uuid::new_v4(), day(10, 9)).is_empty());
    }

    #[test]
    fn test_ratchet_survives_untoggle_and_retoggle() {
        let mut session = open(Box::new(MemoryStore::default()), 10, 8);
        complete_all(&mut session, 10);
        assert_eq!(session.streak(), 1);

        let id = session.habits().iter().next().unwrap().id;
        session.toggle_at(id, day(10, 12)); // off
        assert_eq!(session.streak(), 1, "credit is a one-way ratchet");
        let events = session.toggle_at(id, day(10, 13)); // back on
        assert_eq!(events.len(), 1, "same day is not credited twice");
        assert_eq!(session.streak(), 1);
    }

    #[test]
    fn test_relaunch_same_day_preserves_state() {
        let mut session = open(Box::new(MemoryStore::default()), 10, 8);
        complete_all(&mut session, 10);

        let session = open(session.into_store(), 10, 22);
        assert_eq!(session.streak(), 1);
        assert!(session.habits().iter().all(|h| h.is_completed));
        assert!(session.launch_events().is_empty());
    }

    #[test]
    fn test_relaunch_next_day_keeps_streak_alive() {
        let mut session = open(Box::new(MemoryStore::default()), 10, 8);
        complete_all(&mut session, 10);

        let mut session = open(session.into_store(), 11, 8);
        assert_eq!(session.streak(), 1, "yesterday keeps the streak");

        // Completion flags are not date-aware; only the streak is. The
        // habits persist as completed, so one off/on round qualifies D+1.
        let id = session.habits().iter().next().unwrap().id;
        session.toggle_at(id, day(11, 9));
        session.toggle_at(id, day(11, 9));
        assert_eq!(session.streak(), 2);
    }

    #[test]
    fn test_relaunch_after_gap_resets() {
        let mut session = open(Box::new(MemoryStore::default()), 10, 8);
        complete_all(&mut session, 10);

        let session = open(session.into_store(), 13, 8);
        assert_eq!(session.streak(), 0);
        assert_eq!(
            session.launch_events(),
            &[Event::StreakReset {
                previous: 1,
                at: day(13, 8)
            }]
        );
    }

    #[test]
    fn test_rename_persists_and_emits() {
        let mut session = open(Box::new(MemoryStore::default()), 10, 8);
        let id = session.habits().iter().next().unwrap().id;

        let events = session.rename_at(id, "Pray at dawn", day(10, 9));
        assert!(matches!(events.as_slice(), [Event::HabitRenamed { .. }]));

        let session = open(session.into_store(), 10, 10);
        assert_eq!(session.habits().get(id).unwrap().name, "Pray at dawn");
    }
}
