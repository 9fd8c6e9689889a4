mod app;
mod cache;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod logo;
mod util;
use crate::app::App;
use crate::cache::{AssetCache, BundledAssets, Offline};
use crate::config::{Config, TileCount};
use crate::game::Game;
use crate::highscore::HighScore;
use crate::logo::Banner;
use anyhow::Context;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use lexopt::{Arg, Parser, ValueExt};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Environment variable holding the log filter directives
static LOG_ENV_VAR: &str = "NEON_SNAKE_LOG";

static USAGE: &str = concat!(
    "Usage: neon-snake [<options>]\n",
    "\n",
    "Play snake in the terminal\n",
    "\n",
    "Options:\n",
    "  --config <file>     Read configuration from the given file\n",
    "  --tile-count <n>    Set the number of tiles along each side of the board\n",
    "  -h, --help          Display this help message and exit\n",
    "  -V, --version       Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                Arg::Long("config") => args.config = Some(PathBuf::from(parser.value()?)),
                Arg::Long("tile-count") => {
                    args.tile_count = Some(parser.value()?.parse::<TileCount>()?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Cli::Run(args) => args.run(),
            Cli::Help => {
                let mut out = io::stdout().lock();
                out.write_all(USAGE.as_bytes())?;
                out.flush()?;
                Ok(())
            }
            Cli::Version => {
                let mut out = io::stdout().lock();
                writeln!(out, "neon-snake {}", env!("CARGO_PKG_VERSION"))?;
                out.flush()?;
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    tile_count: Option<TileCount>,
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        let config = match self.config {
            Some(path) => Config::load(&path, false),
            None => Config::default_path().and_then(|path| Config::load(&path, true)),
        }
        .context("failed to load configuration")?;
        if let Some(path) = config.log_file() {
            init_logging(path)?;
        }
        let grid = self.tile_count.unwrap_or(config.game.tile_count).grid();
        let high_score = HighScore::load(config.high_score_path());
        let mut cache = AssetCache::new(consts::CACHE_NAME);
        if let Err(e) = cache.install(consts::ASSETS, &BundledAssets) {
            tracing::warn!(cache = cache.name(), error = ?e, "Could not install asset cache");
        }
        let banner = Banner::load(&cache, &Offline);
        tracing::info!(
            tile_count = grid.tile_count(),
            high_score = high_score.best(),
            "Starting neon-snake"
        );
        let app = App::new(Game::new(grid, high_score, banner));
        run_ui(app).context("terminal I/O failed")?;
        tracing::info!("Exiting");
        Ok(())
    }
}

/// Send log events to `path`, filtered by the directives in the
/// `NEON_SNAKE_LOG` environment variable (default: `info`)
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(anyhow::Error::from_boxed)
        .context("failed to install log subscriber")
}

fn run_ui(app: App) -> io::Result<()> {
    let terminal = ratatui::init();
    let r = crossterm::execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .and_then(|()| app.run(terminal));
    let cleanup = crossterm::execute!(io::stdout(), DisableFocusChange, DisableMouseCapture);
    ratatui::restore();
    r.and(cleanup)
}

fn main() -> ExitCode {
    let r = Cli::from_parser(Parser::from_env());
    let cli = match r {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("neon-snake: {e}");
            eprintln!("Run `neon-snake --help` for usage");
            return ExitCode::from(2);
        }
    };
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Fatal error");
            eprintln!("neon-snake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|ioe| ioe.kind() == ErrorKind::BrokenPipe)
}
