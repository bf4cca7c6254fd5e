use clap::Subcommand;
use habitdeck_core::{Config, Session};
use uuid::Uuid;

use super::{open_session, report_streak_events};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List today's habits
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a habit's completion flag
    Toggle {
        /// Habit reference: 1-based position or UUID
        habit: String,
    },
    /// Rename a habit
    Rename {
        /// Habit reference: 1-based position or UUID
        habit: String,
        /// New display label
        name: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session()?;
    match action {
        HabitAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(session.habits())?);
            } else {
                let config = Config::load_or_default();
                println!("{}", config.greeting);
                report_streak_events(session.launch_events());
                for (i, habit) in session.habits().iter().enumerate() {
                    let mark = if habit.is_completed { "x" } else { " " };
                    println!("{:>2}. [{mark}] {}", i + 1, habit.name);
                }
                println!("Streak: {} day(s)", session.streak());
            }
        }
        HabitAction::Toggle { habit } => {
            let id = resolve(&session, &habit)?;
            let events = session.toggle(id);
            if events.is_empty() {
                eprintln!("no such habit: {habit}");
                std::process::exit(1);
            }
            if let Some(habit) = session.habits().get(id) {
                let state = if habit.is_completed { "done" } else { "not done" };
                println!("{} -> {state}", habit.name);
            }
            report_streak_events(&events);
        }
        HabitAction::Rename { habit, name } => {
            let id = resolve(&session, &habit)?;
            let events = session.rename(id, name);
            if events.is_empty() {
                eprintln!("no such habit: {habit}");
                std::process::exit(1);
            }
            println!("ok");
        }
    }
    Ok(())
}

/// Resolve a habit reference: a 1-based list position or a full UUID.
fn resolve(session: &Session, reference: &str) -> Result<Uuid, Box<dyn std::error::Error>> {
    if let Ok(position) = reference.parse::<usize>() {
        return session
            .habits()
            .iter()
            .nth(position.wrapping_sub(1))
            .map(|h| h.id)
            .ok_or_else(|| format!("no habit at position {position}").into());
    }
    Ok(Uuid::parse_str(reference)?)
}
