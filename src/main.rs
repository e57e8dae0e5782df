mod app;
mod cli;
mod console;
mod error;
mod logging;
mod model;
mod store;
mod util;

use std::io;

use clap::Parser;
use tracing::debug;

use crate::app::GoalService;
use crate::cli::Cli;
use crate::console::Console;
use crate::error::AppError;
use crate::store::{DocumentStore, JsonFileStore};

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let Cli { data_file } = Cli::parse();
    let data_path = match data_file {
        Some(path) => path,
        None => store::resolve_data_path()?,
    };
    let store = JsonFileStore::new(data_path);
    debug!(path = %store.path().display(), "using data file");
    store.ensure_initialized()?;
    // A corrupt data file stops the program before the menu is shown.
    store.load()?;

    let service = GoalService::new(store);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    console::run_menu(&service, &mut console)
}
