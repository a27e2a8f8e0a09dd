mod app;
mod config;
mod event;
mod logging;
mod ui;
mod vault;

use std::env;
use std::io;
use std::process;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use config::Config;
use event::run_app;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("totion {}", VERSION);
    println!("A small modal terminal editor for Markdown notes");
    println!();
    println!("USAGE:");
    println!("    totion [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
    println!("    -d, --dir        Print notes directory path");
    println!("    -l, --log        Print log file path");
    println!();
    println!("KEYS:");
    println!("    Ctrl+N           New note");
    println!("    Ctrl+L           List notes (/ to filter)");
    println!("    Enter            Create or open the note");
    println!("    Ctrl+S           Save and close the note");
    println!("    Esc              Back (discards unsaved edits)");
    println!("    Ctrl+C, q        Quit");
}

fn main() -> anyhow::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = env::args().collect();
    let flag = args.get(1).map(String::as_str);

    match flag {
        Some("-v" | "--version") => {
            println!("totion {}", VERSION);
            return Ok(());
        }
        Some("-h" | "--help") => {
            print_help();
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load().context("cannot locate the notes directory")?;

    match flag {
        None => {}
        Some("-d" | "--dir") => {
            println!("{}", config.vault_dir().display());
            return Ok(());
        }
        Some("-l" | "--log") => {
            println!("{}", config.log_path().display());
            return Ok(());
        }
        Some(arg) => {
            eprintln!("Unknown option: {}", arg);
            eprintln!("Run 'totion --help' for usage information");
            process::exit(2);
        }
    }

    logging::init(config.log_path());

    // The vault must exist before the terminal is taken over.
    let mut app = App::new(config).context("cannot prepare the notes directory")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("terminal event loop failed")?;
    log::info!("bye");
    Ok(())
}
