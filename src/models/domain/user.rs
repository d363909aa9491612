use serde::{Deserialize, Serialize};
use std::fmt;

/// Backends serialise the owning user either as a primary key or a username.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(i64),
    Username(String),
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRef::Id(id) => write!(f, "user #{}", id),
            UserRef::Username(name) => f.write_str(name),
        }
    }
}

/// Response of `GET /users/auth-check/`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default)]
    pub username: Option<String>,
}
