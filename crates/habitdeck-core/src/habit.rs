//! Habit data model.
//!
//! A habit is a named daily checkbox. The list preserves insertion order
//! (display order only; it carries no semantics) and enforces id uniqueness.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed default set seeded on a fresh install.
pub const DEFAULT_HABITS: [&str; 13] = [
    "Pray Fajr",
    "Drink 2L water",
    "Eat Bananas",
    "Eat 6 eggs a day",
    "Exercise 30 min",
    "Pray Zohr",
    "Meditate 10 min",
    "Read 10 pages",
    "Pray Asar",
    "No junk food",
    "Pray Maghrib",
    "Eat Dinner with family",
    "Pray Isha",
];

/// A single tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Assigned once at creation, immutable thereafter.
    pub id: Uuid,
    /// Display label, mutable only by explicit edit.
    pub name: String,
    pub is_completed: bool,
}

impl Habit {
    /// Create a new incomplete habit with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_completed: false,
        }
    }
}

/// Ordered list of habits with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitList {
    habits: Vec<Habit>,
}

impl HabitList {
    /// The default list: 13 named habits, all incomplete.
    pub fn default_set() -> Self {
        Self {
            habits: DEFAULT_HABITS.iter().copied().map(Habit::new).collect(),
        }
    }

    /// Build a list from decoded entries, keeping the first occurrence of
    /// each id. Persisted data is not trusted to uphold the invariant.
    pub fn from_vec(habits: Vec<Habit>) -> Self {
        let mut list = Self::default();
        for habit in habits {
            list.push(habit);
        }
        list
    }

    /// Append a habit. Returns false (and drops the entry) on a duplicate id.
    pub fn push(&mut self, habit: Habit) -> bool {
        if self.habits.iter().any(|h| h.id == habit.id) {
            return false;
        }
        self.habits.push(habit);
        true
    }

    pub fn get(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// True only when the list is non-empty and every entry is complete.
    /// An empty list never counts as a qualifying day.
    pub fn all_complete(&self) -> bool {
        !self.habits.is_empty() && self.habits.iter().all(|h| h.is_completed)
    }

    /// Flip the completion flag for the matching id.
    ///
    /// Returns the habit after the flip, or `None` for an unknown id.
    pub fn toggle(&mut self, id: Uuid) -> Option<&Habit> {
        let habit = self.habits.iter_mut().find(|h| h.id == id)?;
        habit.is_completed = !habit.is_completed;
        Some(habit)
    }

    /// Change the display label for the matching id.
    pub fn rename(&mut self, id: Uuid, name: impl Into<String>) -> Option<&Habit> {
        let habit = self.habits.iter_mut().find(|h| h.id == id)?;
        habit.name = name.into();
        Some(habit)
    }
}
