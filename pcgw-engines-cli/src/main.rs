//! pcgw-engines CLI
//!
//! Builds a game-engine catalog from PCGamingWiki: engine listing, game
//! listing, and a normalized game listing with engine versions folded into
//! their family.

mod commands;
mod error;
mod spinner;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::Log;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use pcgw_engines_core::SortOrder;
use pcgw_engines_wiki::{GameQuery, Settings};

use commands::CatalogPaths;
use commands::config::{run_config_path, run_config_show};
use commands::engines::run_engines;
use commands::games::run_games;
use commands::normalize::run_normalize;
use commands::synonyms::run_synonyms;
use error::CliError;

#[derive(Parser)]
#[command(name = "pcgw-engines")]
#[command(about = "Build a game engine catalog from PCGamingWiki", long_about = None)]
struct Cli {
    /// Directory holding the catalog CSV files (defaults to current directory)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Log every request and per-engine count
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch engines, fetch games, then normalize
    Run {
        /// Game query to use (joined, per-engine)
        #[arg(long, default_value_t = GameQuery::Joined)]
        strategy: GameQuery,

        /// Row order of the normalized file (source, engine-title)
        #[arg(long)]
        order: Option<SortOrder>,
    },

    /// Fetch the engine listing into engines_list.csv
    Engines,

    /// Fetch the game listing into games.csv
    Games {
        /// Game query to use (joined, per-engine). per-engine reads engines_list.csv
        #[arg(long, default_value_t = GameQuery::Joined)]
        strategy: GameQuery,
    },

    /// Fold engine versions in games.csv into games_generalized.csv
    Normalize {
        /// Row order of the normalized file (source, engine-title)
        #[arg(long)]
        order: Option<SortOrder>,
    },

    /// List the engine families and their known variants
    Synonyms,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the config file path
    Path,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let dir = cli.dir.unwrap_or_else(|| PathBuf::from("."));
    let paths = CatalogPaths::in_dir(&dir);
    // Progress bars would interleave with debug output
    let quiet = cli.verbose;
    let command = cli.command.unwrap_or(Commands::Run {
        strategy: GameQuery::default(),
        order: None,
    });

    match command {
        Commands::Run { strategy, order } => {
            let settings = Settings::load()?;
            run_engines(&settings, &paths, quiet)?;
            run_games(&settings, &paths, strategy, quiet)?;
            run_normalize(&paths, order.unwrap_or(settings.normalize.order))?;
        }
        Commands::Engines => {
            let settings = Settings::load()?;
            run_engines(&settings, &paths, quiet)?;
        }
        Commands::Games { strategy } => {
            let settings = Settings::load()?;
            run_games(&settings, &paths, strategy, quiet)?;
        }
        Commands::Normalize { order } => {
            let settings = Settings::load()?;
            run_normalize(&paths, order.unwrap_or(settings.normalize.order))?;
        }
        Commands::Synonyms => run_synonyms(),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(&Settings::load()?)?,
            ConfigAction::Path => run_config_path()?,
        },
    }

    Ok(())
}

/// Info and debug lines go to stdout as plain text; warnings and errors go to
/// stderr. Only this tool's crates are raised to debug by `--verbose`;
/// `RUST_LOG` overrides both.
fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = format!("warn,pcgw_engines={level}");

    let build = |target: env_logger::Target| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&default_filter))
            .target(target)
            .format(write_plain)
            .build()
    };
    let logger = SplitLogger {
        out: build(env_logger::Target::Stdout),
        err: build(env_logger::Target::Stderr),
    };

    let max_level = logger.out.filter();
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(max_level);
    }
}

fn write_plain(buf: &mut env_logger::fmt::Formatter, record: &log::Record) -> std::io::Result<()> {
    match record.level() {
        log::Level::Info => writeln!(buf, "{}", record.args()),
        level => writeln!(buf, "{level}: {}", record.args()),
    }
}

fn is_diagnostic(level: log::Level) -> bool {
    level <= log::Level::Warn
}

struct SplitLogger {
    out: env_logger::Logger,
    err: env_logger::Logger,
}

impl Log for SplitLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.out.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if is_diagnostic(record.level()) {
            self.err.log(record);
        } else {
            self.out.log(record);
        }
    }

    fn flush(&self) {
        self.out.flush();
        self.err.flush();
    }
}
