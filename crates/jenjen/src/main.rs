use clap::{ArgAction, Parser, Subcommand};
use jenjen::JenjenConfig;
use jenjen::commands::{ast, generate, verify};
use tracing_subscriber::EnvFilter;

/// Generate jennifer code that rebuilds a Go file
#[derive(Parser)]
#[command(name = "jenjen", version, about)]
struct Cli {
    /// More logging: -v for debug, -vv for trace (RUST_LOG wins when set)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the jennifer program for a Go file
    #[command(name = "gen")]
    Generate(generate::GenerateArgs),
    /// Print the parsed syntax tree as JSON
    Ast(ast::AstArgs),
    /// Run the generated program and compare its output with the input
    Verify(verify::VerifyArgs),
}

fn setup_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: only changes the signal disposition back to the POSIX default.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn run(cli: Cli) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;
    let config = JenjenConfig::load(&root);
    match &cli.command {
        Command::Generate(args) => generate::run(args, &config),
        Command::Ast(args) => ast::run(args, &config),
        Command::Verify(args) => verify::run(args, &config),
    }
}

fn main() {
    reset_sigpipe();
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
