use anyhow::Result;
use argh::FromArgs;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io;
use tinysh::{InteractiveReader, Shell};

const WELCOME_MESSAGE: &str = "Welcome to Tiny Shell.\nType 'exit' to quit.";

#[derive(FromArgs)]
/// A tiny interactive shell with file redirections and a status-reporting prompt.
struct ShellArgs {
    #[argh(switch, short = 'q')]
    /// do not print the welcome banner
    quiet: bool,

    #[argh(switch, short = 'v')]
    /// log debug details to stderr
    verbose: bool,
}

fn main() -> Result<()> {
    let args: ShellArgs = argh::from_env();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Never)?;

    if !args.quiet {
        println!("{}", WELCOME_MESSAGE);
    }

    Shell::new(InteractiveReader::new()?, io::stdout(), io::stderr()).repl()
}
