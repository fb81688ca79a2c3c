#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # coursekit
//!
//! Command line entry point. `coursekit stats` prints grading statistics of
//! the current repository, `coursekit configure` prepares lesson slides.

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use bpaf::*;
use coursekit::{
    config::{Exemptions, GradingPolicy},
    slides::{self, SlidesEnv},
    stats::{self, LogError, Palette, ReportOptions},
};
use dotenvy::dotenv;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Supported commit formats, shown below `coursekit stats --help`.
const COMMIT_FORMATS: &str = "\
Supported commit formats:

    Corrected UNIT/NAME: PTS1 + PTS2 = PTSSUM
    Amended correction UNIT/NAME: PTS1 + PTS2 = PTSSUM
    Imported UNIT/NAME: PTS1 + PTS2 = PTSSUM

where UNIT is the decimal number of the unit which was corrected, NAME is the
name of the student (only one word), PTS1 is the number of main points which
were achieved, PTS2 is the number of additional points which were achieved and
PTSSUM is the sum of the points achieved. NAME/UNIT is accepted as well, and
either the sum or the addends may be left out.";

/// Options of `coursekit stats`.
#[derive(Debug, Clone)]
struct StatsArgs {
    /// Show the state column
    show_state:   bool,
    /// Print CSV instead of a table
    csv:          bool,
    /// Do not use ANSI colors
    no_color:     bool,
    /// Override the current unit
    current_unit: Option<u32>,
    /// Additional exempt commits
    exempt:       Vec<String>,
    /// Repository to read the log of
    repo:         Option<PathBuf>,
    /// Saved log to read instead of running git
    log:          Option<PathBuf>,
}

/// Options of `coursekit configure`.
#[derive(Debug, Clone)]
struct ConfigureArgs {
    /// Course root
    root:        Option<PathBuf>,
    /// Regenerate every slides file
    force:       bool,
    /// New author
    author:      Option<String>,
    /// New contact
    contact:     Option<String>,
    /// New extra title page line
    title_extra: Option<String>,
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Print grading statistics
    Stats(StatsArgs),
    /// Configure lesson slides
    Configure(ConfigureArgs),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    let show_state = short('s')
        .long("show-state")
        .help(
            "Show an additional column describing the state of the student (one of okay, \
             unlikely, failed, passed)",
        )
        .switch();
    let csv = short('c')
        .long("csv")
        .help("Give the relevant data in CSV output. Columns are headed properly, in German though.")
        .switch();
    let no_color = short('n')
        .long("no-color")
        .help("Do not use ANSI colour codes in the output.")
        .switch();
    let current_unit = short('u')
        .long("current-unit")
        .help("Number of units concluded so far, defaults to the highest unit in the log")
        .argument::<u32>("UNIT")
        .optional();
    let exempt = short('e')
        .long("exempt")
        .help("Commit to ignore without a warning, may be given several times")
        .argument::<String>("COMMIT")
        .many();
    let repo = short('C')
        .long("repo")
        .help("Repository to read the commit log of")
        .argument::<PathBuf>("DIR")
        .optional();
    let log = long("log")
        .help("Read the output of `git log --format=oneline` from FILE instead of running git")
        .argument::<PathBuf>("FILE")
        .optional();

    let stats = construct!(StatsArgs {
        show_state,
        csv,
        no_color,
        current_unit,
        exempt,
        repo,
        log
    })
    .to_options()
    .descr(
        "Parses git commit messages and calculates some statistics for the students. Students \
         are automatically added as they're found in the commitlog. Only the newest commit for \
         given unit and student tuple is taken into account.",
    )
    .footer(COMMIT_FORMATS)
    .command("stats")
    .help("Print grading statistics from the commit log")
    .map(Cmd::Stats);

    let root = long("root")
        .help("Course root containing the lessons directory, defaults to the current directory")
        .argument::<PathBuf>("DIR")
        .optional();
    let force = short('f')
        .long("force")
        .help("Regenerate every slides file")
        .switch();
    let author = long("author")
        .help("Author shown on the title pages, remembered for later runs")
        .argument::<String>("NAME")
        .optional();
    let contact = long("contact")
        .help("Contact shown on the title pages, remembered for later runs")
        .argument::<String>("CONTACT")
        .optional();
    let title_extra = long("title-extra")
        .help("Extra title page line, remembered for later runs")
        .argument::<String>("TEXT")
        .optional();

    let configure = construct!(ConfigureArgs {
        root,
        force,
        author,
        contact,
        title_extra
    })
    .to_options()
    .descr("Discovers lessons, scaffolds their slides and writes the Makefile")
    .command("configure")
    .help("Prepare lesson slides and the Makefile")
    .map(Cmd::Configure);

    let cmd = construct!([stats, configure]);

    cmd.to_options()
        .descr("Tools for course repositories")
        .version(env!("CARGO_PKG_VERSION"))
        .run()
}

/// Prints grading statistics.
async fn run_stats(args: StatsArgs) -> Result<()> {
    let policy = GradingPolicy::from_env();
    let exemptions = Exemptions::from_env_with(&args.exempt);

    let log = match &args.log {
        Some(path) => stats::read_log_file(path)?,
        None => stats::git_log(args.repo.as_deref()).await?,
    };

    let roster = stats::collect(&log, &policy, &exemptions)?;

    let output = if args.csv {
        stats::render_csv(&roster, &policy)
    } else {
        let options = ReportOptions {
            show_state:   args.show_state,
            palette:      Palette::new(!args.no_color),
            current_unit: args.current_unit,
        };
        stats::render_table(&roster, &policy, &options)
    };
    print!("{output}");

    Ok(())
}

/// Runs the configurator.
fn run_configure(args: ConfigureArgs) -> Result<()> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Could not determine current directory")?,
    };
    let overrides = SlidesEnv {
        author:      args.author,
        contact:     args.contact,
        title_extra: args.title_extra,
    };

    slides::configure(&root, args.force, overrides)?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let result = match options() {
        Cmd::Stats(args) => run_stats(args).await,
        Cmd::Configure(args) => run_configure(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            match e.downcast_ref::<LogError>() {
                Some(log_error) => ExitCode::from(u8::try_from(log_error.exit_code()).unwrap_or(1)),
                None => ExitCode::FAILURE,
            }
        }
    }
}
