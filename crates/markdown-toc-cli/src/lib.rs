mod console;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{debug, warn, LevelFilter};
use markdown_toc_config::{Config, FileSettings, LoadOptions};
use markdown_toc_core::{FsMarkdown, MaxDepth, Reporter, Severity, Toc};
use walkdir::WalkDir;

pub use console::ConsoleReporter;

type CliToc = Toc<FsMarkdown, ConsoleReporter>;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if cli.global.no_color {
        ConsoleReporter::set_color(false);
    }

    let mut options = LoadOptions::default();
    if let Some(path) = &cli.global.config {
        options = options.with_override_path(path);
    }
    let config = Config::load(options)?;
    for layer in &config.sources.layers {
        debug!("config layer: {}", layer.describe());
    }

    let mut toc = Toc::new(FsMarkdown, ConsoleReporter);
    toc.set_max_depth(MaxDepth::new(
        cli.global.max_depth.unwrap_or(config.toc.max_depth),
    ));

    let files = collect_files(&cli.command.files().paths, &config.files, toc.reporter());

    let code = match cli.command {
        Command::Insert(_) => handle_insert(&toc, &files),
        Command::DryRun(args) => handle_dry_run(&toc, &files, args.diff),
        Command::Check(_) => handle_check(&toc, &files),
    };
    Ok(code)
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn handle_insert(toc: &CliToc, files: &[PathBuf]) -> i32 {
    let reporter = toc.reporter();
    let mut failed = false;

    for path in files {
        reporter.report(
            Severity::Info,
            &format!("generating toc for {}", path.display()),
        );
        if let Err(err) = toc.apply_toc(path) {
            reporter.report(Severity::Warning, &err.to_string());
            failed = true;
        }
    }

    i32::from(failed)
}

fn handle_dry_run(toc: &CliToc, files: &[PathBuf], diff: bool) -> i32 {
    let reporter = toc.reporter();
    let mut failed = false;

    for path in files {
        let rendered = if diff {
            toc.preview(path).map(Option::unwrap_or_default)
        } else {
            toc.dry_run(path)
        };

        match rendered {
            Ok(output) => {
                if !diff {
                    reporter.report(Severity::Info, &format!("toc of {}", path.display()));
                }
                let output = output.trim_end_matches('\n');
                if !output.is_empty() {
                    reporter.report(Severity::Plain, output);
                }
            }
            Err(err) => {
                reporter.report(Severity::Warning, &err.to_string());
                failed = true;
            }
        }
    }

    i32::from(failed)
}

fn handle_check(toc: &CliToc, files: &[PathBuf]) -> i32 {
    let reporter = toc.reporter();
    let mut all_valid = true;

    for path in files {
        let valid = match toc.validate(path) {
            Ok(valid) => valid,
            Err(err) => {
                reporter.report(Severity::Error, &err.to_string());
                false
            }
        };

        if valid {
            reporter.report(
                Severity::Success,
                &format!("validation of {} passed", path.display()),
            );
        } else {
            reporter.report(
                Severity::Error,
                &format!("validation of {} failed", path.display()),
            );
            all_valid = false;
        }
    }

    if all_valid {
        reporter.report(Severity::Success, "validation passed");
        0
    } else {
        reporter.report(Severity::Error, "validation failed");
        1
    }
}

/// Expand the path arguments into the files to process, in order.
///
/// Directories are walked for files with a markdown extension; excluded
/// and missing paths are skipped.
fn collect_files<R: Reporter>(
    paths: &[PathBuf],
    settings: &FileSettings,
    reporter: &R,
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if settings.is_excluded(path) {
            debug!("skipping excluded path {}", path.display());
            continue;
        }

        if path.is_dir() {
            walk_directory(path, settings, &mut files);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            reporter.report(
                Severity::Warning,
                &format!("{} does not exist, skipping", path.display()),
            );
        }
    }

    files
}

fn walk_directory(root: &Path, settings: &FileSettings, files: &mut Vec<PathBuf>) {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !settings.is_excluded(entry.path()));

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() && settings.is_markdown(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(err) => warn!("failed to walk {}: {err}", root.display()),
        }
    }
}

#[derive(Parser)]
#[command(
    name = "markdown-toc-gen",
    author,
    version,
    about = "Generate, update and check markdown tables of contents",
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Deepest heading level (number of `#`) listed in the toc
    #[arg(short = 'd', long = "max-depth", value_name = "DEPTH", global = true)]
    max_depth: Option<u8>,
    /// Use this configuration file on top of the discovered ones
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Disable coloured output
    #[arg(long = "no-color", global = true)]
    no_color: bool,
    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Insert or update the toc between the placeholders
    #[command(alias = "update")]
    Insert(FileArgs),
    /// Print the toc without changing any file
    DryRun(DryRunArgs),
    /// Check that every toc is up to date
    Check(FileArgs),
}

impl Command {
    fn files(&self) -> &FileArgs {
        match self {
            Command::Insert(args) | Command::Check(args) => args,
            Command::DryRun(args) => &args.files,
        }
    }
}

#[derive(Args)]
struct FileArgs {
    /// Markdown files or directories to process
    #[arg(value_name = "FILES", required = true, action = ArgAction::Append)]
    paths: Vec<PathBuf>,
}

#[derive(Args)]
struct DryRunArgs {
    #[command(flatten)]
    files: FileArgs,
    /// Print the unified diff `insert` would apply instead of the toc
    #[arg(long)]
    diff: bool,
}
