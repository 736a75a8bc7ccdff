mod cmd;
mod output;
mod prompt;
mod root;

use clap::{Parser, Subcommand};
use cmd::generate::{GenerateArgs, RunOptions};
use std::path::PathBuf;
use strapgen_core::GenError;

#[derive(Parser)]
#[command(
    name = "strapgen",
    about = "Scaffold policies, lifecycles, and custom routes in a Strapi project",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from src/api/ or package.json)
    #[arg(long, global = true, env = "STRAPGEN_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Never prompt; fail when a required flag is missing
    #[arg(long, global = true)]
    no_interactive: bool,

    #[command(flatten)]
    generate: GenerateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the APIs found under src/api
    Apis,

    /// List core routes and lifecycle events accepted by --route
    Events,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Some(Commands::Apis) => cmd::apis::run(&root, cli.json),
        Some(Commands::Events) => cmd::events::run(cli.json),
        None => cmd::generate::run(
            &root,
            cli.generate,
            RunOptions {
                json: cli.json,
                interactive: !cli.no_interactive,
            },
        ),
    };

    if let Err(e) = result {
        let user_input = e
            .chain()
            .filter_map(|c| c.downcast_ref::<GenError>())
            .any(GenError::is_user_input);
        if user_input {
            // Nothing has been written; report and stop.
            eprintln!("{e}");
            std::process::exit(2);
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
