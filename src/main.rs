use std::io::{self, BufRead, Write};

use clap::Parser;

use chess_match::app::App;
use chess_match::config::Config;
use chess_match::console;
use chess_match::error::AppError;
use chess_match::storage::{MemoryStore, ResultStore, SqliteStore};

fn main() {
    let config = Config::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let outcome = if config.in_memory {
        play(MemoryStore::new(), &config)
    } else {
        SqliteStore::open(&config.database)
            .map_err(AppError::from)
            .and_then(|store| play(store, &config))
    };

    if let Err(e) = outcome {
        eprintln!("chess-match: {}", e);
        std::process::exit(1);
    }
}

fn play<S: ResultStore>(store: S, config: &Config) -> Result<(), AppError> {
    let mut app = App::new(store)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let white = match &config.white {
        Some(name) => name.clone(),
        None => ask_name(&mut input, "White")?,
    };
    let black = match &config.black {
        Some(name) => name.clone(),
        None => ask_name(&mut input, "Black")?,
    };

    console::run(&mut app, input, io::stdout(), &white, &black)
}

fn ask_name<R: BufRead>(input: &mut R, color: &str) -> Result<String, AppError> {
    print!("Name of the {} player: ", color);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let name = line.trim();
    Ok(if name.is_empty() {
        color.to_string()
    } else {
        name.to_string()
    })
}
