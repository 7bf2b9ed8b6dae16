mod app;
mod audio;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod settings;
mod store;
mod ui;
mod util;
use crate::app::App;
use crate::audio::TerminalBell;
use crate::config::Config;
use crate::game::Game;
use crate::store::{FileStore, MemoryStore, Store};
use anyhow::Context;
use lexopt::{Arg, Parser};
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "\
Usage: torsnake [<options>]

Play Snake on a board whose edges wrap around

Options:
  -c, --config <file>   Read configuration from the given file
      --no-save         Do not load or save high scores & settings
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

/// What the program was asked to do on the command line
#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("no-save") => args.no_save = true,
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    no_save: bool,
}

impl Arguments {
    fn run(self) -> ExitCode {
        let app = match self.setup() {
            Ok(app) => app,
            Err(e) => {
                eprintln!("torsnake: {e:#}");
                return ExitCode::from(2);
            }
        };
        let terminal = ratatui::init();
        let r = app.run(terminal);
        ratatui::restore();
        log::info!("Exiting");
        io_exit(r)
    }

    /// Load the configuration, start logging, and open the data store
    fn setup(self) -> anyhow::Result<App<Box<dyn Store>>> {
        let config = match self.config {
            Some(path) => Config::load(&path, false)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => match Config::default_path() {
                Ok(path) => Config::load(&path, true)
                    .with_context(|| format!("failed to load {}", path.display()))?,
                Err(_) => Config::default(),
            },
        };
        init_logging(&config);
        log::info!(
            "Starting {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        let store: Box<dyn Store> = if self.no_save || !config.files.save_data {
            log::info!("High scores & settings will not be saved");
            Box::new(MemoryStore::default())
        } else if let Some(dir) = config.data_dir() {
            log::info!("Using data directory {}", dir.display());
            Box::new(FileStore::new(&dir))
        } else {
            log::warn!(
                "Could not determine local data directory; high scores & settings will not be saved"
            );
            Box::new(MemoryStore::default())
        };
        let game = Game::new(store, config.grid());
        let volume = game.snapshot().settings.volume;
        Ok(App::new(game, TerminalBell::new(io::stdout(), volume)))
    }
}

/// Send log messages to the configured log file.  If the file cannot be
/// opened, the game runs without logging.
fn init_logging(config: &Config) {
    let Some(path) = config.log_file() else {
        return;
    };
    match open_log_file(&path) {
        Ok(fp) => {
            if let Err(e) = WriteLogger::init(config.log_level, simplelog::Config::default(), fp) {
                eprintln!("torsnake: failed to initialize logging: {e}");
            }
        }
        Err(e) => eprintln!("torsnake: warning: logging disabled: {e}"),
    }
}

/// Open `path` for appending, creating it and its parent directories as
/// needed
fn open_log_file(path: &Path) -> io::Result<fs_err::File> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run(args)) => args.run(),
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("torsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("I/O error: {e}");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
