//! CLI entry point for bucktree

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use bucktree::{
    Filter, KeyParser, ListingError, ListingFormat, SortBy, TreeBuilder, TreeConfig, TreeError,
    TreeRenderer, read_listing, write_json,
};
use clap::{ArgAction, Parser, ValueEnum};
use log::debug;
use termcolor::{Ansi, BufferedStandardStream, ColorChoice, NoColor, WriteColor};
use thiserror::Error;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode, to_stdout: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if !to_stdout {
                return false;
            }
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    Auto,
    Json,
    Ls,
}

impl From<InputFormat> for ListingFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Auto => ListingFormat::Auto,
            InputFormat::Json => ListingFormat::Json,
            InputFormat::Ls => ListingFormat::Ls,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortKey {
    Name,
    Size,
    Version,
    Time,
}

#[derive(Parser, Debug)]
#[command(name = "bucktree")]
#[command(about = "List the contents of a bucket listing as a tree")]
#[command(version, disable_help_flag = true)]
struct Args {
    /// Bucket name, used as the root when no prefix is given
    #[arg(short = 'b', long = "bucket")]
    bucket: String,

    /// Key prefix the listing was made with; becomes the root
    #[arg(short = 'p', long = "prefix")]
    prefix: Option<String>,

    /// Listing to read (`aws s3api list-objects` JSON or `aws s3 ls` text), stdin if omitted
    #[arg(long = "input", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Listing format
    #[arg(long = "format", default_value = "auto")]
    format: InputFormat,

    /// Output to file instead of stdout
    #[arg(short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// All files are listed, including names starting with '.'
    #[arg(short = 'a')]
    all: bool,

    /// List directories only
    #[arg(short = 'd')]
    dirs_only: bool,

    /// Print the full path prefix for each entry
    #[arg(short = 'f')]
    full_path: bool,

    /// Descend only N levels deep (0 = unlimited)
    #[arg(short = 'L', value_name = "N", default_value = "0")]
    level: usize,

    /// List only files matching the glob pattern
    #[arg(short = 'P', value_name = "PATTERN")]
    pattern: Option<String>,

    /// Do not list entries matching the glob pattern
    #[arg(short = 'I', value_name = "PATTERN")]
    ignore: Option<String>,

    /// Ignore case when pattern matching
    #[arg(long = "ignore-case")]
    ignore_case: bool,

    /// Quote names with double quotes
    #[arg(short = 'Q')]
    quote: bool,

    /// Print the size in bytes of each entry
    #[arg(short = 's')]
    size: bool,

    /// Print sizes in a more human readable way
    #[arg(short = 'h')]
    human: bool,

    /// Print the date of last modification
    #[arg(short = 'D')]
    date: bool,

    /// Report directory sizes as the total of their contents
    #[arg(long = "du")]
    du: bool,

    /// Sort by version (natural number ordering)
    #[arg(short = 'v')]
    version_sort: bool,

    /// Sort by last modification time
    #[arg(short = 't')]
    time_sort: bool,

    /// Leave entries unsorted
    #[arg(short = 'U')]
    unsorted: bool,

    /// Reverse the order of the sort
    #[arg(short = 'r')]
    reverse: bool,

    /// List directories before files (-U disables)
    #[arg(long = "dirsfirst")]
    dirs_first: bool,

    /// Select sort
    #[arg(long = "sort", value_name = "KEY")]
    sort: Option<SortKey>,

    /// Don't print indentation lines
    #[arg(short = 'i')]
    no_indent: bool,

    /// Turn colorization on always
    #[arg(short = 'C')]
    colorize: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Print the tree as JSON
    #[arg(long = "json")]
    json: bool,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

impl Args {
    fn sort_by(&self) -> SortBy {
        if self.time_sort {
            return SortBy::Time;
        }
        if self.version_sort {
            return SortBy::Version;
        }
        match self.sort {
            Some(SortKey::Size) => SortBy::Size,
            Some(SortKey::Version) => SortBy::Version,
            Some(SortKey::Time) => SortBy::Time,
            Some(SortKey::Name) | None => SortBy::Name,
        }
    }

    fn tree_config(&self) -> TreeConfig {
        let mode = if self.colorize {
            ColorMode::Always
        } else {
            self.color
        };
        TreeConfig {
            all_files: self.all,
            dirs_only: self.dirs_only,
            full_path: self.full_path,
            byte_size: self.size,
            human_size: self.human,
            quote_names: self.quote,
            show_mod_time: self.date,
            colorize: !self.json && should_use_color(mode, self.output.is_none()),
            depth_limit: self.level,
            no_sort: self.unsorted,
            reverse_sort: self.reverse,
            dirs_first: self.dirs_first,
            sort_by: self.sort_by(),
            include_pattern: self.pattern.clone(),
            exclude_pattern: self.ignore.clone(),
            ignore_case: self.ignore_case,
            no_indent: self.no_indent,
            dir_sizes: self.du,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error("cannot open '{}': {source}", path.display())]
    Input { path: PathBuf, source: io::Error },

    #[error("cannot create '{}': {source}", path.display())]
    Output { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("bucktree: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = args.tree_config();
    // Bad patterns fail before anything is read or written.
    let filter = Filter::new(&config)?;

    let records = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path).map_err(|source| AppError::Input {
                path: path.to_path_buf(),
                source,
            })?;
            read_listing(io::BufReader::new(file), args.format.into())?
        }
        _ => read_listing(io::stdin().lock(), args.format.into())?,
    };

    let parser = KeyParser::new(&args.bucket, args.prefix.as_deref());
    let (tree, report) = TreeBuilder::new(parser).build(records);
    debug!("{} records skipped", report.skipped());

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| AppError::Output {
                path: path.clone(),
                source,
            })?;
            let writer = BufWriter::new(file);
            if config.colorize {
                emit(Ansi::new(writer), &tree, &config, &filter, args.json)?;
            } else {
                emit(NoColor::new(writer), &tree, &config, &filter, args.json)?;
            }
        }
        None => {
            // Terminal and environment checks already happened in should_use_color.
            let choice = if config.colorize {
                ColorChoice::Always
            } else {
                ColorChoice::Never
            };
            emit(
                BufferedStandardStream::stdout(choice),
                &tree,
                &config,
                &filter,
                args.json,
            )?;
        }
    }
    Ok(())
}

/// Render to `out` and flush it, whether or not rendering succeeded.
fn emit<W: WriteColor>(
    mut out: W,
    tree: &bucktree::Tree,
    config: &TreeConfig,
    filter: &Filter,
    json: bool,
) -> Result<(), TreeError> {
    let result = if json {
        write_json(tree, config, filter, &mut out).map(|_| ())
    } else {
        let renderer = TreeRenderer::new(config, filter);
        renderer
            .render(tree, &mut out)
            .and_then(|counts| renderer.finish(counts, &mut out))
    };
    let flushed = out.flush();
    result?;
    flushed?;
    Ok(())
}
