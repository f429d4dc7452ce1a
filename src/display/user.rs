//! User display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::User;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Since")]
    since: String,
}

pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users yet. Add one with 'spendtrack user add <name>'.\n".to_string();
    }

    let rows: Vec<_> = users
        .iter()
        .map(|u| UserRow {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone().unwrap_or_default(),
            since: u.created_at.format("%Y-%m-%d").to_string(),
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
    fn test_format_user_list() {
        let users = vec![User::new("Alice").with_email("alice@example.com")];
        let text = format_user_list(&users);
        assert!(text.contains("Alice"));
        assert!(text.contains("alice@example.com"));
        assert!(format_user_list(&[]).contains("user add"));
    }
}
