mod app;
mod clock;
mod command;
mod config;
mod consts;
mod game;
mod leaderboard;
mod notify;
mod ui;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use crate::leaderboard::JsonFileStore;
use crate::notify::LogNotifier;
use crate::warning::Warning;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use log::LevelFilter;
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: mutasnake [<options>]\n",
    "\n",
    "Play snake with mutating power-ups in the terminal.\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>      Read configuration from the given file\n",
    "  -p, --player <ID>        Record scores under the given player ID\n",
    "      --log-level <LEVEL>  Set the log level [default: info]\n",
    "  -h, --help               Display this help message and exit\n",
    "  -V, --version            Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    player: Option<String>,
    log_level: Option<LevelFilter>,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('p') | Arg::Long("player") => {
                    args.player = Some(parser.value()?.string()?);
                }
                Arg::Long("log-level") => {
                    args.log_level = Some(parser.value()?.parse::<LevelFilter>()?);
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}

fn main() -> ExitCode {
    match Cli::from_parser(Parser::from_env()) {
        Ok(Cli::Run(args)) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("mutasnake: {e:?}");
                ExitCode::FAILURE
            }
        },
        Ok(Cli::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Cli::Version) => {
            println!("mutasnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("mutasnake: {e}");
            eprintln!("Run `mutasnake --help` for usage.");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let config = match args.config {
        Some(ref path) => Config::load(path, false),
        None => Config::load(&Config::default_path()?, true),
    }
    .context("failed to load configuration")?;
    let log_file = config
        .files
        .log_file()
        .context("failed to determine path to log file")?;
    init_logging(&log_file, args.log_level.unwrap_or(config.logging.level))?;
    let player = args
        .player
        .or_else(|| config.player.id.clone())
        .unwrap_or_else(|| String::from(consts::ANONYMOUS_PLAYER));
    let store = JsonFileStore::new(
        config
            .files
            .leaderboard_file()
            .context("failed to determine path to leaderboard file")?
            .into_owned(),
    );
    log::info!("Using leaderboard file {}", store.path().display());
    let (leaderboard, load_error) = leaderboard::load_or_default(&store);
    let warning = load_error.map(|e| Warning::from_error(&*e));
    let app = App::new(
        Game::new(config.rules),
        leaderboard,
        store,
        LogNotifier::new(player.clone()),
        player,
    )
    .with_warning(warning);
    let terminal = ratatui::init();
    let r = app.run(terminal);
    ratatui::restore();
    ignore_broken_pipe(r).context("terminal I/O failed")
}

/// Append log messages at or above `level` to the file at `path`
fn init_logging(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    WriteLogger::init(level, simplelog::Config::default(), file)
        .context("failed to initialize logging")?;
    Ok(())
}

fn ignore_broken_pipe(r: io::Result<()>) -> io::Result<()> {
    match r {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        r => r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Cli, lexopt::Error> {
        Cli::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).unwrap(), Cli::Run(Arguments::default()));
    }

    #[test]
    fn all_args() {
        assert_eq!(
            parse(&["-c", "snake.toml", "--player", "0xabc", "--log-level", "debug"]).unwrap(),
            Cli::Run(Arguments {
                config: Some(PathBuf::from("snake.toml")),
                player: Some(String::from("0xabc")),
                log_level: Some(LevelFilter::Debug),
            })
        );
    }

    #[rstest]
    #[case(&["-h"], Cli::Help)]
    #[case(&["--help"], Cli::Help)]
    #[case(&["-p", "alice", "--help"], Cli::Help)]
    #[case(&["-V"], Cli::Version)]
    #[case(&["--version"], Cli::Version)]
    fn help_and_version(#[case] args: &[&str], #[case] cli: Cli) {
        assert_eq!(parse(args).unwrap(), cli);
    }

    #[rstest]
    #[case(&["--log-level", "loud"])]
    #[case(&["--player"])]
    #[case(&["extra"])]
    #[case(&["--wraparound"])]
    fn bad_args(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }

    #[test]
    fn broken_pipe_is_ok() {
        assert!(ignore_broken_pipe(Err(io::Error::from(ErrorKind::BrokenPipe))).is_ok());
        assert!(ignore_broken_pipe(Err(io::Error::from(ErrorKind::Other))).is_err());
        assert!(ignore_broken_pipe(Ok(())).is_ok());
    }
}
