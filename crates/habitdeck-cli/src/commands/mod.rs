pub mod config;
pub mod habit;
pub mod streak;

use habitdeck_core::{Config, Event, Session, SqliteStore};

/// Open the session over the on-disk store using the configured calendar.
pub fn open_session() -> Result<Session, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = SqliteStore::open()?;
    Ok(Session::open(Box::new(store), config.calendar()))
}

/// Print the human-readable notice for a streak event, if any.
pub fn report_streak_events(events: &[Event]) {
    for event in events {
        match event {
            Event::StreakAdvanced { current_streak, .. } => {
                println!("🔥 All habits done -- streak is now {current_streak}!");
            }
            Event::StreakReset { previous, .. } => {
                println!("Streak of {previous} expired -- starting over.");
            }
            _ => {}
        }
    }
}
