use std::time::Duration;

use clap::Subcommand;
use eyecare_core::storage::{Config, Database, HistoryRecord, HistoryStore};
use eyecare_core::{catalog, Event, Player, SessionStatus};

const PLAYER_KEY: &str = "session_player";

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start an exercise session
    Start {
        /// Exercise id (see `exercise list`)
        exercise_id: String,
    },
    /// Pause the running session
    Pause,
    /// Resume the paused session
    Resume,
    /// Reset the session to not-started
    Reset,
    /// Abandon the session
    Exit,
    /// Advance the session by the wall-clock time since the last tick
    Tick,
    /// Print current session state as JSON
    Status,
    /// Drive the session to completion, rendering progress
    Watch,
}

fn load_player(db: &Database) -> Option<Player> {
    let json = db.kv_get(PLAYER_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

fn save_player(db: &Database, player: &Player) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(player)?;
    db.kv_set(PLAYER_KEY, &json)?;
    Ok(())
}

/// Append the history record for a completion event. The player's one-shot
/// completion latch guarantees this runs at most once per session.
fn record_completion(db: &Database, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    if let Event::SessionCompleted { exercise_id, .. } = event {
        HistoryStore::new(db).append(HistoryRecord::completed_now(exercise_id))?;
    }
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SessionAction::Start { exercise_id } => {
            let Some(exercise) = catalog::find(&exercise_id) else {
                println!("exercise not found: {exercise_id}");
                return Ok(());
            };
            let config = Config::load()?;
            let mut player = Player::new(exercise);
            if config.player.show_ready_screen {
                player.ready();
                println!("{} -- {}", exercise.title, exercise.description);
                for (i, step) in exercise.instructions.iter().enumerate() {
                    println!("  {}. {step}", i + 1);
                }
            }
            if let Some(event) = player.start() {
                print_event(&event)?;
            }
            save_player(&db, &player)?;
        }
        SessionAction::Pause => {
            let Some(mut player) = load_player(&db) else {
                println!("no active session");
                return Ok(());
            };
            match player.status() {
                SessionStatus::Running => {
                    if let Some(event) = player.toggle_pause() {
                        record_completion(&db, &event)?;
                        print_event(&event)?;
                    }
                    save_player(&db, &player)?;
                }
                other => println!("cannot pause from {other:?}"),
            }
        }
        SessionAction::Resume => {
            let Some(mut player) = load_player(&db) else {
                println!("no active session");
                return Ok(());
            };
            match player.status() {
                SessionStatus::Paused => {
                    if let Some(event) = player.toggle_pause() {
                        print_event(&event)?;
                    }
                    save_player(&db, &player)?;
                }
                other => println!("cannot resume from {other:?}"),
            }
        }
        SessionAction::Reset => {
            let Some(mut player) = load_player(&db) else {
                println!("no active session");
                return Ok(());
            };
            if let Some(event) = player.reset() {
                print_event(&event)?;
            }
            save_player(&db, &player)?;
        }
        SessionAction::Exit => {
            let Some(mut player) = load_player(&db) else {
                println!("no active session");
                return Ok(());
            };
            if let Some(event) = player.exit() {
                print_event(&event)?;
            }
            db.kv_delete(PLAYER_KEY)?;
        }
        SessionAction::Tick => {
            let Some(mut player) = load_player(&db) else {
                println!("no active session");
                return Ok(());
            };
            match player.tick() {
                Some(event) => {
                    record_completion(&db, &event)?;
                    print_event(&event)?;
                }
                None => print_event(&player.snapshot())?,
            }
            save_player(&db, &player)?;
        }
        SessionAction::Status => {
            match load_player(&db) {
                Some(player) => print_event(&player.snapshot())?,
                None => println!("no active session"),
            }
        }
        SessionAction::Watch => {
            let Some(mut player) = load_player(&db) else {
                println!("no active session");
                return Ok(());
            };
            if player.status() != SessionStatus::Running {
                println!("session is not running (status: {:?})", player.status());
                return Ok(());
            }
            watch(&db, &mut player)?;
        }
    }
    Ok(())
}

/// Foreground loop: one fine-grained animation tick per interval, one
/// rendered line per countdown second. The loop owns its interval and
/// stops on completion, so no periodic work leaks past the session.
fn watch(db: &Database, player: &mut Player) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let interval = Duration::from_millis(config.player.tick_interval_ms.max(10));
    let mut last_remaining = player.remaining_secs();
    render_line(player);

    loop {
        std::thread::sleep(interval);
        if let Some(event) = player.tick() {
            record_completion(db, &event)?;
            save_player(db, player)?;
            println!();
            print_event(&event)?;
            println!("session complete");
            return Ok(());
        }
        if player.remaining_secs() != last_remaining {
            last_remaining = player.remaining_secs();
            save_player(db, player)?;
            render_line(player);
        }
    }
}

fn render_line(player: &Player) {
    let f = player.frame();
    println!(
        "{:>4}s remaining  x={:+7.1} y={:+7.1} scale={:.2} {}",
        player.remaining_secs(),
        f.x,
        f.y,
        f.scale,
        if f.eyes_open { "open" } else { "closed" },
    );
}
