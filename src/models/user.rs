use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Operator,
    Viewer,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "ADMIN"),
            UserRole::Operator => write!(f, "OPERATOR"),
            UserRole::Viewer => write!(f, "VIEWER"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "OPERATOR" => Ok(UserRole::Operator),
            "VIEWER" => Ok(UserRole::Viewer),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// A dashboard account. Usernames are unique and stored lowercase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
    pub password_hash: String,
}

/// Public view of a user — everything except the credential.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        UserView {
            id: u.id.clone(),
            username: u.username.clone(),
            full_name: u.full_name.clone(),
            role: u.role,
        }
    }
}

pub fn find_by_username<'a>(users: &'a [User], username: &str) -> Option<&'a User> {
    let needle = username.trim().to_lowercase();
    users.iter().find(|u| u.username == needle)
}

/// True when removing `user_id` would leave no admin accounts.
pub fn is_last_admin(users: &[User], user_id: &str) -> bool {
    users
        .iter()
        .filter(|u| u.role == UserRole::Admin)
        .all(|u| u.id == user_id)
}
