//! User CLI commands

use clap::Subcommand;

use super::emit_listing;
use crate::display::format_user_list;
use crate::error::SpendResult;
use crate::export::OutputFormat;
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Add {
        /// Unique user name
        name: String,
        /// Contact email
        #[arg(short, long)]
        email: Option<String>,
    },

    /// List all users
    List,
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    format: OutputFormat,
    cmd: UserCommands,
) -> SpendResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Add { name, email } => {
            let user = service.create(&name, email.as_deref())?;
            println!("Created user: {}", user.name);
            println!("  ID: {}", user.id);
        }

        UserCommands::List => {
            let users = service.list()?;
            emit_listing(&users, format, || format_user_list(&users))?;
        }
    }

    Ok(())
}
