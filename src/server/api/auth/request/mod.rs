use serde::Deserialize;

/// Login form submission.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Login {
    /// Login name.
    pub username: String,
    /// Raw password.
    pub password: String,
    /// Local path to return to after logging in.
    pub next: String,
}

/// Query of the login page.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Next {
    /// Local path to return to after logging in.
    pub next: Option<String>,
}
