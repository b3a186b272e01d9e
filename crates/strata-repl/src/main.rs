//! `strata-repl` — terminal front end for the simulated StrataDB playground

use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use strata_repl::frontend::{meta_help, paint, BANNER};
use strata_repl::{MetaCommand, ReplConfig, Session};

#[derive(Debug, Parser)]
#[command(name = "strata-repl", version, about = "Simulated StrataDB REPL")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prompt string
    #[arg(long)]
    prompt: Option<String>,

    /// Branch every session starts on
    #[arg(long)]
    branch: Option<String>,

    /// File to keep line history in
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Log every evaluated command to stderr
    #[arg(long)]
    trace: bool,

    /// Run the lines of this file instead of reading from the terminal
    script: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<(ReplConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => ReplConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ReplConfig::default(),
        };
        if let Some(prompt) = self.prompt {
            config.prompt = prompt;
        }
        if let Some(branch) = self.branch {
            config.main_branch = branch;
        }
        if self.history_file.is_some() {
            config.history_file = self.history_file;
        }
        if self.no_color {
            config.color = false;
        }
        if self.trace {
            config.trace = true;
        }
        Ok((config, self.script))
    }
}

fn init_logging(trace: bool) {
    let default = if trace { "strata_repl=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_output(output: &str, color: bool) {
    if output.is_empty() {
        return;
    }
    if color {
        println!("{}", paint(output));
    } else {
        println!("{}", output);
    }
}

fn run_script(session: &mut Session, path: &Path) -> Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let prompt = session.config().prompt.clone();
    let color = session.config().color;

    for line in source.lines() {
        if let Some(entry) = session.submit(line) {
            println!("{}{}", prompt, entry.input);
            print_output(&entry.output, color);
        }
    }
    info!(lines = session.history().len(), "script finished");
    Ok(())
}

/// Handle a `:` command. Returns `false` when the REPL should exit.
fn run_meta(session: &mut Session, command: MetaCommand) -> bool {
    match command {
        MetaCommand::Reset => {
            session.reset();
            println!("Session reset.");
        }
        MetaCommand::Status => println!("{}", session.status()),
        MetaCommand::History => {
            let prompt = &session.config().prompt;
            for entry in session.history() {
                println!("{}{}", prompt, entry.input);
                if !entry.output.is_empty() {
                    println!("{}", entry.output);
                }
            }
        }
        MetaCommand::Help => println!("{}", meta_help()),
        MetaCommand::Quit => return false,
        MetaCommand::Unknown(name) => {
            println!("Unknown command :{} (try :help)", name);
        }
    }
    true
}

fn run_interactive(session: &mut Session) -> Result<()> {
    let editor_config = Config::builder()
        .max_history_size(session.config().max_history)
        .context("invalid history size")?
        .auto_add_history(true)
        .build();
    let mut editor =
        DefaultEditor::with_config(editor_config).context("failed to start line editor")?;

    let history_file = session.config().history_file.clone();
    if let Some(path) = &history_file {
        if editor.load_history(path).is_err() {
            debug!(path = %path.display(), "no previous history");
        }
    }

    println!("{}", BANNER);
    loop {
        let prompt = session.config().prompt.clone();
        match editor.readline(&prompt) {
            Ok(line) => {
                if let Some(meta) = MetaCommand::parse(&line) {
                    if !run_meta(session, meta) {
                        break;
                    }
                    continue;
                }
                let color = session.config().color;
                if let Some(entry) = session.submit(&line) {
                    print_output(&entry.output, color);
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("failed to read line"),
        }
    }

    if let Some(path) = &history_file {
        editor
            .save_history(path)
            .with_context(|| format!("failed to save history to {}", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, script) = cli.into_config()?;
    init_logging(config.trace);

    let mut session = Session::new(config);
    match script {
        Some(path) => run_script(&mut session, &path),
        None => run_interactive(&mut session),
    }
}
