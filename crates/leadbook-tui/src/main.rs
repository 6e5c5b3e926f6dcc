mod actions;
mod app;
mod ui;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use crate::actions::execute_action;
use crate::app::App;
use leadbook_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "leadbook", version, about = "cadastro e acompanhamento de contatos")]
struct Args {
    #[arg(long)]
    db_path: Option<PathBuf>,
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let db_path = resolve_db_path(args.db_path)?;

    init_logging(&db_path, args.verbose)?;

    let store = Store::open(&db_path)?;
    store.migrate()?;

    // init() takes over the screen and installs a restoring panic hook.
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &store, &mut App::new());
    ratatui::restore();
    result
}

fn resolve_db_path(arg: Option<PathBuf>) -> Result<PathBuf> {
    let Some(path) = arg else {
        return Ok(paths::default_db_path());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let created = !parent.exists();
        fs::create_dir_all(parent)
            .with_context(|| format!("criar diretório {}", parent.display()))?;
        if created {
            #[cfg(unix)]
            make_dir_private(parent)?;
        }
    }
    Ok(path)
}

/// The terminal owns stdout and stderr while the UI runs, so log lines go to
/// a file next to the database instead.
fn init_logging(db_path: &Path, verbose: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let log_path = db_path.with_extension("log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("abrir arquivo de log {}", log_path.display()))?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

// Everything the UI reacts to comes through the keyboard, so the loop can
// block on the next event instead of polling on a timer.
fn run(terminal: &mut DefaultTerminal, store: &Store, app: &mut App) -> Result<()> {
    while !app.should_quit {
        while let Some(action) = app.next_action() {
            if let Err(err) = execute_action(app, store, action) {
                app.set_error(err.to_string());
            }
        }

        terminal.draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            break;
        }

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }

    Ok(())
}

#[cfg(unix)]
fn make_dir_private(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
        .with_context(|| format!("restringir permissões de {}", dir.display()))
}
