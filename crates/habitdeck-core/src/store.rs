//! Habit list persistence.
//!
//! The list is serialized as a single JSON blob under one key, addressed by
//! habit id rather than array index, so reordering the display never breaks
//! persistence. The store is fail-open: habit data is low-stakes, so missing
//! or corrupt data becomes a fresh default list instead of a startup error,
//! and write failures are dropped (the in-memory list stays authoritative).

use uuid::Uuid;

use crate::habit::{Habit, HabitList};
use crate::storage::KvStore;

pub(crate) const HABITS_KEY: &str = "saved_habits";

/// Load / save / toggle for the habit list.
pub struct HabitStore;

impl HabitStore {
    /// Read the persisted list, or the default set on a fresh install.
    ///
    /// Decode errors are swallowed and treated as "absent"; this never
    /// fails the caller.
    pub fn load(kv: &dyn KvStore) -> HabitList {
        if let Ok(Some(json)) = kv.get_blob(HABITS_KEY) {
            if let Ok(habits) = serde_json::from_str::<Vec<Habit>>(&json) {
                return HabitList::from_vec(habits);
            }
        }
        HabitList::default_set()
    }

    /// Serialize and write the list. Best-effort: failures are silent and
    /// the next successful save self-corrects.
    pub fn save(kv: &mut dyn KvStore, list: &HabitList) {
        if let Ok(json) = serde_json::to_string(list) {
            let _ = kv.set_blob(HABITS_KEY, &json);
        }
    }

    /// Flip the completion flag for `id`. Unknown ids are a no-op.
    ///
    /// This is the sole mutation entry point exposed to the UI layer;
    /// callers follow it with [`save`](Self::save) and streak evaluation.
    pub fn toggle(list: &mut HabitList, id: Uuid) -> Option<Habit> {
        list.toggle(id).cloned()
    }
}
