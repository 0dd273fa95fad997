use anyhow::{Context, Result};
use hangman::cli::{CliInterface, parse_cli};
use hangman::logging::{init_logging, level_for_verbosity};
use hangman::session::Session;
use hangman::tui::TuiInterface;
use std::io;

fn main() -> Result<()> {
    let cli = parse_cli();

    // stderr output would corrupt the full-screen interface
    let log_file = match (&cli.log_file, cli.tui) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(std::env::temp_dir().join("hangman.log")),
        (None, false) => None,
    };
    init_logging(level_for_verbosity(cli.verbose), log_file.as_deref())
        .context("failed to open log file")?;

    let config = cli.config();
    log::info!(
        "Using word list {} and stats {}",
        config.words_path.display(),
        config.stats_path.display()
    );
    let mut session = Session::new(config);

    if cli.tui {
        let mut tui = TuiInterface::new().context("failed to initialize terminal")?;
        session.run(&mut tui)?;
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        session.run(&mut interface)?;
    }
    Ok(())
}
