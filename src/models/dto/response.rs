use serde::Deserialize;

/// `POST /users/token/`. The credential itself travels in an HTTP-only cookie;
/// some backend revisions also echo it in `access`, which is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub username: Option<String>,
}

/// `POST /users/token/refresh/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub username: Option<String>,
}
