use clap::Subcommand;
use eyecare_core::catalog;

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// List all exercises
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one exercise in detail
    Show {
        /// Exercise id (e.g. "figure-eight")
        id: String,
    },
}

pub fn run(action: ExerciseAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ExerciseAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(catalog::all())?);
            } else {
                for e in catalog::all() {
                    println!(
                        "{:<16} {:<20} {:>4}s  {:?}",
                        e.id, e.title, e.duration_secs, e.difficulty
                    );
                }
            }
        }
        ExerciseAction::Show { id } => match catalog::find(&id) {
            Some(e) => {
                println!("{} ({})", e.title, e.id);
                println!("{}", e.description);
                println!("motion: {:?}  duration: {}s  difficulty: {:?}",
                    e.motion, e.duration_secs, e.difficulty);
                println!();
                for (i, step) in e.instructions.iter().enumerate() {
                    println!("  {}. {step}", i + 1);
                }
            }
            None => {
                // Not-found is a rendered condition, not a failure.
                println!("exercise not found: {id}");
            }
        },
    }
    Ok(())
}
