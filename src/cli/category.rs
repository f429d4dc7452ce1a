//! Category CLI commands
//!
//! Implements CLI commands for listing and managing a user's categories.

use clap::Subcommand;

use super::emit_listing;
use crate::display::format_category_list;
use crate::error::SpendResult;
use crate::export::OutputFormat;
use crate::models::User;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List the default categories plus your own
    List,

    /// Create a personal category
    #[command(alias = "create")]
    Add {
        /// Category name
        name: String,
        /// Display color as #RRGGBB
        #[arg(short, long, default_value = "#6B7280")]
        color: String,
        /// Icon shown next to the name
        #[arg(short, long, default_value = "")]
        icon: String,
    },

    /// Delete one of your own categories
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    user: &User,
    format: OutputFormat,
    cmd: CategoryCommands,
) -> SpendResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list(user.id)?;
            emit_listing(&categories, format, || {
                format_category_list(&categories, user.id)
            })?;
        }

        CategoryCommands::Add { name, color, icon } => {
            let category = service.create(user.id, &name, &color, &icon)?;
            println!("Created category: {}", category);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Delete { category } => {
            let deleted = service.delete(user.id, &category)?;
            println!("Deleted category: {}", deleted.name);
        }
    }

    Ok(())
}
