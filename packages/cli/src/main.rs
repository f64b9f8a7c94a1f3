mod commands;
mod config;
mod page_file;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    block, compile, init, meta, registry, BlockArgs, CompileArgs, InitArgs, MetaArgs, RegistryArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - Landing page builder
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor and compiler activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagecraft project
    Init(InitArgs),

    /// Add, remove, reorder and edit blocks of a page
    Block(BlockArgs),

    /// Show or edit page title, description and slug
    Meta(MetaArgs),

    /// Export pages to React source and image files
    Compile(CompileArgs),

    /// List the available block types
    Registry(RegistryArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PAGECRAFT_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();

            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Block(args) => block(args, &cwd),
                Command::Meta(args) => meta(args, &cwd),
                Command::Compile(args) => compile(args, &cwd),
                Command::Registry(args) => registry(args),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
