//! User commands: list, add

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use samplereg_core::SampleApi;

use super::{EndpointArgs, OutputFormat};

#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommands,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// List selectable users
    List(ListArgs),
    /// Register a new user
    Add(AddArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Full name of the user
    pub name: String,
}

pub async fn run_users(args: UsersArgs, endpoint: &EndpointArgs) -> Result<()> {
    let (_, api) = endpoint.resolve()?;

    match args.command {
        UsersCommands::List(list) => {
            let users = api.list_users().await.context("Failed to fetch users")?;
            if list.json || list.output == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else if users.is_empty() {
                println!("(no users)");
            } else {
                for user in &users {
                    println!("{:>4}  {}", user.id, user.name);
                }
            }
        }
        UsersCommands::Add(add) => {
            let user = api
                .create_user(&add.name)
                .await
                .with_context(|| format!("Failed to add user '{}'", add.name))?;
            println!("✓ Added {} (id: {})", user.name, user.id);
        }
    }

    Ok(())
}
