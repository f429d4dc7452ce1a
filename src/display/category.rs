//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, UserId};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Scope")]
    scope: &'static str,
}

/// Format the categories visible to a user
pub fn format_category_list(categories: &[Category], viewer: UserId) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'spendtrack init' to create default categories.\n"
            .to_string();
    }

    let rows: Vec<_> = categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id.short(),
            name: c.to_string(),
            color: c.color.clone(),
            scope: match c.owner_id {
                None => "default",
                Some(owner) if owner == viewer => "own",
                Some(_) => "other",
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_category_list() {
        let viewer = UserId::new();
        let categories = vec![
            Category::global("Food", "#EF4444", "🍕"),
            Category::new("Coffee", "#A855F7", "☕", viewer),
        ];

        let text = format_category_list(&categories, viewer);
        assert!(text.contains("🍕 Food"));
        assert!(text.contains("default"));
        assert!(text.contains("own"));
    }

    #[test]
    fn test_empty_list_hints_init() {
        assert!(format_category_list(&[], UserId::new()).contains("spendtrack init"));
    }
}
