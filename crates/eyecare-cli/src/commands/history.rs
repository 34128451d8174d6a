use chrono::Utc;
use clap::Subcommand;
use eyecare_core::storage::{Database, HistoryStore};
use eyecare_core::catalog;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List completed sessions, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show today's completion count
    Today,
    /// Delete all history
    Clear,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let store = HistoryStore::new(&db);

    match action {
        HistoryAction::List { json } => {
            let records = store.load();
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("no completed sessions yet");
            } else {
                for r in &records {
                    let title = catalog::find(&r.exercise_id)
                        .map(|e| e.title)
                        .unwrap_or(r.exercise_id.as_str());
                    println!("{}  {title}", r.date.format("%Y-%m-%d %H:%M"));
                }
            }
        }
        HistoryAction::Today => {
            println!("{}", store.count_on(Utc::now()));
        }
        HistoryAction::Clear => {
            store.clear()?;
            println!("history cleared");
        }
    }
    Ok(())
}
