//! Users that tasks can be assigned to.
//!
//! The board only reads users: it shows names for assignee ids and offers
//! them as editor choices. Assignee ids are never checked against this list.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Developer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
    #[serde(default)]
    pub team: Option<String>,
}

impl User {
    fn fixture(id: &str, name: &str, email: &str, role: Role, team: Option<&str>) -> Self {
        let handle = name.split_whitespace().next().unwrap_or(id).to_lowercase();
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: format!("https://i.pravatar.cc/150?u={handle}"),
            role,
            team: team.map(str::to_string),
        }
    }

    /// Two-letter initials used as an avatar stand-in on cards.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// The built-in user directory.
pub fn directory() -> &'static [User] {
    static USERS: OnceLock<Vec<User>> = OnceLock::new();
    USERS.get_or_init(|| {
        vec![
            User::fixture("u1", "Sarah Chen", "sarah.chen@company.com", Role::Admin, None),
            User::fixture("u2", "Michael Rodriguez", "michael.r@company.com", Role::Manager, Some("t1")),
            User::fixture("u3", "Emily Watson", "emily.w@company.com", Role::Developer, Some("t1")),
            User::fixture("u4", "James Kim", "james.kim@company.com", Role::Developer, Some("t2")),
            User::fixture("u5", "Priya Patel", "priya.p@company.com", Role::Manager, Some("t2")),
        ]
    })
}

pub fn find<'a>(users: &'a [User], id: &str) -> Option<&'a User> {
    users.iter().find(|u| u.id == id)
}

/// Display name for an assignee id; unknown ids show as themselves.
pub fn display_name(users: &[User], assignee: Option<&str>) -> String {
    match assignee.filter(|a| !a.is_empty()) {
        None => "Unassigned".to_string(),
        Some(id) => find(users, id).map(|u| u.name.clone()).unwrap_or_else(|| id.to_string()),
    }
}
