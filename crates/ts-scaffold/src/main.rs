//! ts-scaffold - Project scaffolding for TypeScript libraries

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use scaffold_core::commands::{self, CopyTemplatesArgs, InitArgs};
use scaffold_core::{is_cancellation, ClackUi, PackageManager, ProcessRunner, Settings};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Template tree shipped in the repository, used when nothing else is configured
const BUNDLED_TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

#[derive(Parser, Debug)]
#[command(name = "ts-scaffold")]
#[command(about = "CLI for scaffolding TypeScript library packages")]
#[command(version)]
pub struct Args {
    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long = "cwd", global = true)]
    pub cwd: Option<PathBuf>,

    /// Directory containing templates (for development use)
    #[arg(long = "template-dir", global = true, env = "TS_SCAFFOLD_TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up a new library project in the project directory
    Init(CliInitArgs),
    /// Copy starter templates into the project
    CopyTemplates(CliCopyTemplatesArgs),
    /// Copy a single template into the project
    CopyTemplate(CliCopyTemplateArgs),
    /// Add entry points to the project
    #[command(name = "add-entrypoints")]
    AddEntrypoints(CliAddEntrypointsArgs),
}

#[derive(ClapArgs, Debug)]
pub struct CliInitArgs {
    /// Package manager to use
    #[arg(short, long, value_parser = parse_package_manager)]
    pub package_manager: Option<PackageManager>,

    /// Extra entry points
    #[arg(short, long, num_args = 1..)]
    pub entry_points: Vec<String>,
}

impl From<CliInitArgs> for InitArgs {
    fn from(args: CliInitArgs) -> Self {
        InitArgs {
            package_manager: args.package_manager,
            entry_points: args.entry_points,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct CliCopyTemplatesArgs {
    /// Override existing files without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Include react specific code
    #[arg(short, long)]
    pub react: bool,

    /// File paths - package specific templates need to be prefixed e.g. yarn:.yarnrc.yml
    pub filenames: Vec<String>,
}

impl From<CliCopyTemplatesArgs> for CopyTemplatesArgs {
    fn from(args: CliCopyTemplatesArgs) -> Self {
        CopyTemplatesArgs {
            yes: args.yes,
            // Absent flag means "ask"
            react: args.react.then_some(true),
            filenames: args.filenames,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct CliCopyTemplateArgs {
    /// Override existing file without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Include react specific code
    #[arg(short, long)]
    pub react: bool,

    /// Template path, optionally prefixed with a package manager
    pub filename: String,
}

#[derive(ClapArgs, Debug)]
pub struct CliAddEntrypointsArgs {
    /// Entry point names; asked interactively when omitted
    pub entrypoints: Vec<String>,
}

fn parse_package_manager(s: &str) -> Result<PackageManager, String> {
    s.parse().map_err(|_| {
        format!(
            "must be one of supported: {}",
            PackageManager::supported_ids().join(", ")
        )
    })
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "ts_scaffold=debug,scaffold_core=debug"
    } else {
        "ts_scaffold=warn,scaffold_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn execute(args: Args) -> Result<()> {
    let settings = Settings::resolve(args.cwd, args.template_dir, Path::new(BUNDLED_TEMPLATES))?;
    let mut ui = ClackUi::new();
    debug!("Running {:?}", args.command);

    match args.command {
        Command::Init(init_args) => {
            commands::init(&settings, init_args.into(), &mut ui, &ProcessRunner).await
        }
        Command::CopyTemplates(copy_args) => {
            commands::copy_templates(&settings, copy_args.into(), &mut ui)
                .await
                .map(|_| ())
        }
        Command::CopyTemplate(copy_args) => commands::copy_single_template(
            &settings,
            &copy_args.filename,
            copy_args.yes,
            copy_args.react,
            &mut ui,
        )
        .await
        .map(|_| ()),
        Command::AddEntrypoints(add_args) => {
            commands::add_entrypoints(&settings, &add_args.entrypoints, &mut ui).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);

    let result = execute(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Cancelled at a prompt
        Err(e) if is_cancellation(&e) => {
            ClackUi::cancelled();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
