use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_ROLE: &str = "user";

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// User record as returned by the auth server. The password hash stays on the
/// server side.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub cell_phone: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
