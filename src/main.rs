//! waymark: scroll-synchronised section navigation for markdown documents.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use waymark::{app_state, config, formats, input, ui};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "Scroll-synchronised section navigation for markdown documents", long_about = None)]
struct Args {
    /// Markdown file to read
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Section to open at, as a URL fragment (e.g. `#section-pricing`); bare input is read as a fragment
    #[arg(long, value_name = "FRAGMENT")]
    goto: Option<String>,

    /// Attention window inset from the top of the viewport, in percent
    #[arg(long, value_name = "PERCENT")]
    attention_top: Option<u8>,

    /// Attention window inset from the bottom of the viewport, in percent
    #[arg(long, value_name = "PERCENT")]
    attention_bottom: Option<u8>,

    /// Print the final navigation state as JSON on exit
    #[arg(long)]
    dump: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if let Some(top) = args.attention_top {
        cfg.attention_top = top;
    }
    if let Some(bottom) = args.attention_bottom {
        cfg.attention_bottom = bottom;
    }

    init_logging(&cfg)?;

    let format = formats::markdown::MarkdownFormat;
    let page = input::load_page(&args.path, &format)?;
    if page.sections.is_empty() {
        eprintln!("No sections found in {}", args.path.display());
        return Ok(());
    }
    tracing::info!(
        path = %args.path.display(),
        sections = page.sections.len(),
        anchors = page.anchors.len(),
        "loaded document"
    );

    let state = app_state::AppState::new(args.path, page, &cfg)?;
    run_tui(state, args.goto.as_deref(), args.dump)
}

/// Logs go to the configured file; the terminal belongs to the TUI.
fn init_logging(cfg: &config::Config) -> io::Result<()> {
    if cfg.log_file.is_empty() {
        return Ok(());
    }
    let file = File::create(&cfg.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("WAYMARK_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_tui(mut app: app_state::AppState, goto: Option<&str>, dump: bool) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Size the pane before deep-linking so margins are computed against the real height
    let size = terminal.size()?;
    let area = Rect::new(0, 0, size.width, size.height);
    app.viewport.resize(u32::from(ui::document_height(area)));
    if let Some(fragment) = goto {
        app.goto(fragment);
    }

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    } else if dump {
        let json = app.snapshot().to_json().map_err(io::Error::other)?;
        println!("{json}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> io::Result<()> {
    loop {
        app.tick()?;
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(FRAME)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.current_view {
            app_state::View::Document => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('j') | KeyCode::Down => app.viewport.scroll_by(1),
                KeyCode::Char('k') | KeyCode::Up => app.viewport.scroll_by(-1),
                KeyCode::PageDown | KeyCode::Char(' ') => app.viewport.page(true),
                KeyCode::PageUp => app.viewport.page(false),
                KeyCode::Tab => app.select_next(),
                KeyCode::BackTab => app.select_prev(),
                KeyCode::Enter => {
                    app.activate_selected();
                }
                KeyCode::Char('r') => {
                    if let Err(e) = app.reload() {
                        app.message = Some(format!("Error reloading: {e}"));
                    }
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char(':') => {
                    app.current_view = app_state::View::Command;
                    app.command_buffer.clear();
                    app.message = None;
                }
                _ => {}
            },
            app_state::View::Command => match key.code {
                KeyCode::Char(c) => app.command_buffer.push(c),
                KeyCode::Backspace => {
                    app.command_buffer.pop();
                }
                KeyCode::Enter => {
                    if app.run_command() == app_state::Outcome::Quit {
                        return Ok(());
                    }
                }
                KeyCode::Esc => {
                    app.current_view = app_state::View::Document;
                    app.command_buffer.clear();
                }
                _ => {}
            },
        }
    }
}
