use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::Serialize;

use super::open_session;

#[derive(Subcommand)]
pub enum StreakAction {
    /// Print the current streak
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct StreakStatus {
    current_streak: u32,
    last_completion: Option<DateTime<Utc>>,
    completed: usize,
    total: usize,
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StreakAction::Status { json } => {
            let session = open_session()?;
            let status = StreakStatus {
                current_streak: session.streak(),
                last_completion: session.last_completion(),
                completed: session.habits().iter().filter(|h| h.is_completed).count(),
                total: session.habits().len(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("Streak: {} day(s)", status.current_streak);
                println!("Habits complete: {}/{}", status.completed, status.total);
                match status.last_completion {
                    Some(t) => println!("Last credited: {}", t.format("%Y-%m-%d %H:%M UTC")),
                    None => println!("Last credited: never"),
                }
            }
        }
    }
    Ok(())
}
