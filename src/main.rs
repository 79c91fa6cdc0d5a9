use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use sprintboard::{keymap, ui, App, Config, Control, Event, JsonStore};

fn main() -> ExitCode {
    let config = Config::from_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("sprintboard: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> sprintboard::Result<()> {
    // Store first: the log file lives inside it by default.
    let mut store = JsonStore::open(&config.data_dir)?;
    setup_logging(&config.log_file);
    tracing::info!("sprintboard starting, dir={}", store.root().display());

    let app = App::load(&store)?;
    tracing::info!("loaded {} work items", app.board().len());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app, &mut store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("sprintboard stopped");
    Ok(result?)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    store: &mut JsonStore,
) -> io::Result<()> {
    let size = terminal.size()?;
    (app, _) = app.apply(
        Event::Resize {
            width: size.width,
            height: size.height,
        },
        store,
    );

    loop {
        terminal.draw(|f| ui::draw(f, &app.view()))?;

        let Some(event) = keymap::map_event(event::read()?) else {
            continue;
        };
        let (next, control) = app.apply(event, store);
        app = next;
        if control == Control::Quit {
            return Ok(());
        }
    }
}

/// Log to `log_path`; stdout and stderr belong to the board while it runs.
fn setup_logging(log_path: &Path) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init();
    }
}
