mod config;
mod error;
mod input;
mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use render::{OutputFormat, Renderer};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::CliError;

const SUBCOMMANDS: &[&str] = &["render", "test", "help"];
// Flags whose value is the next argument.
const VALUE_FLAGS: &[&str] = &["-f", "--format", "-c", "--config", "--category"];

#[derive(Parser)]
#[command(name = "vbible", version, about = "Scripture annotation renderer")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a passage file to Markdown or HTML
    Render(RenderArgs),

    /// Run .test.toml render fixtures
    Test(TestArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Passage file (.json or .toml)
    file: PathBuf,

    /// Output format (defaults to the config file, then markdown)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Path to a vbible.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// On partial overlaps keep the earlier mark whole
    #[arg(long)]
    overlap_keep_left: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.toml file or directory containing them
    path: PathBuf,

    /// Run only fixtures in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Markdown,
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Html => OutputFormat::Html,
        }
    }
}

fn main() {
    let mut args: Vec<String> = std::env::args().collect();
    insert_default_subcommand(&mut args);

    let cli = Cli::parse_from(&args);
    init_tracing(cli.verbose, cli.no_color);

    match cli.command {
        Command::Render(render_args) => do_render(render_args, cli.no_color),
        Command::Test(test_args) => {
            if test_args.list_categories {
                test_runner::list_categories(&test_args.path);
                return;
            }
            let exit_code =
                test_runner::run_tests(&test_args.path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

/// `vbible [flags] passage.json` works like `vbible render [flags] passage.json`.
fn insert_default_subcommand(args: &mut Vec<String>) {
    let mut rest = args.iter().skip(1);
    let mut first_pos = None;
    while let Some(arg) = rest.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            rest.next();
        } else if !arg.starts_with('-') {
            first_pos = Some(arg);
            break;
        }
    }
    if first_pos.is_some_and(|a| !SUBCOMMANDS.contains(&a.as_str())) {
        args.insert(1, "render".to_string());
    }
}

fn init_tracing(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .init();
}

/// The config file (if any) with command-line overrides applied.
fn resolve_config(args: &RenderArgs) -> Result<Config, CliError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(format) = args.format {
        config.format = format.into();
    }
    if args.overlap_keep_left {
        config.render.overlap_keep_right = false;
    }
    Ok(config)
}

fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn do_render(args: RenderArgs, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let config = match resolve_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let source = match read_source(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.display().to_string(), source.clone());

    let passage = match input::parse_passage(&args.file, &source) {
        Ok(p) => p,
        Err(error) => {
            let writer = StandardStream::stderr(color_choice);
            let term_config = term::Config::default();
            let diagnostic = error.to_diagnostic(file_id, &source);
            let _ =
                term::emit_to_write_style(&mut writer.lock(), &term_config, &files, &diagnostic);
            process::exit(1);
        }
    };

    tracing::debug!(
        file = %args.file.display(),
        format = ?config.format,
        overlap_keep_right = config.render.overlap_keep_right,
        "rendering passage"
    );
    let output = Renderer::new(config.format)
        .with_options(config.render)
        .render(&passage);
    println!("{}", output);
}
