//! `gradebook` - CLI for student score records
//!
//! This binary provides one-shot commands for each record operation and an
//! interactive shell that keeps a single session open.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;

use gradebook::cli::{handlers, shell, Cli, Command, ConfigCommand, RecordCommand, RenderOptions};
use gradebook::{init_logging, Config, Gradebook, RecordStore, Session};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, letting --data-file win over every other source
    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(path) = cli.data_file.clone() {
        config.storage.data_file = Some(path);
    }

    match cli.command {
        Command::Record(record_cmd) => handle_record(&config, &record_cmd),
        Command::Shell => handle_shell(&config),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_gradebook(config: &Config) -> anyhow::Result<Gradebook> {
    let path = config.data_file();
    let store = RecordStore::new(&path).atomic(config.storage.atomic_save);
    Gradebook::open(store).with_context(|| format!("could not open {}", path.display()))
}

fn handle_record(config: &Config, cmd: &RecordCommand) -> anyhow::Result<()> {
    let mut book = open_gradebook(config)?;
    let mut session = Session::new();
    let opts = RenderOptions::from_config(&config.display);

    let mut stdout = io::stdout().lock();
    handlers::execute(cmd, &mut book, &mut session, opts, &mut stdout)?;

    if matches!(cmd, RecordCommand::Premium(p) if p.upgrade) {
        writeln!(
            stdout,
            "Note: premium access lasts for one session. Use `gradebook shell` to keep it."
        )?;
    }
    Ok(())
}

fn handle_shell(config: &Config) -> anyhow::Result<()> {
    let mut book = open_gradebook(config)?;
    let mut session = Session::new();
    let opts = RenderOptions::from_config(&config.display);

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    shell::run(stdin, &mut stdout, &mut book, &mut session, opts)?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data file:          {}", config.data_file().display());
                println!("  Atomic save:        {}", config.storage.atomic_save);
                println!();
                println!("[Display]");
                println!("  Decimals:           {}", config.display.decimals);
                println!("  Format:             {:?}", config.display.format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
