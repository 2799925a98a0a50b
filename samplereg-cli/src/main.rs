//! samplereg CLI - scientific sample registration
//!
//! Entry point for the `samplereg` command-line tool:
//! - Run the sample service (`serve`)
//! - Manage users and list samples (`users`, `samples`)
//! - Fill and submit the registration form (`register`)
//! - Check a form offline (`validate`)

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "samplereg",
    author,
    version,
    about = "Register scientific samples against a sample service",
    long_about = "Pick a user, enter a sample label, proposal number and the inner/outer \
                  diameters, and submit the record. Also runs the backing service."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    endpoint: commands::EndpointArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the sample service (users and samples over HTTP)
    Serve(commands::serve::ServeArgs),
    /// List or add users
    Users(commands::users::UsersArgs),
    /// List registered samples
    Samples(commands::samples::SamplesArgs),
    /// Fill out and submit the registration form
    Register(commands::register::RegisterArgs),
    /// Validate form values without submitting
    Validate(commands::validate::ValidateArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Users(args) => commands::run_users(args, &cli.endpoint).await?,
        Commands::Samples(args) => commands::run_samples(args, &cli.endpoint).await?,
        Commands::Register(args) => commands::run_register(args, &cli.endpoint).await?,
        Commands::Validate(args) => commands::run_validate(args)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
