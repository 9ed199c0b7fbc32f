//! Wire DTOs for the auth endpoints.
//!
//! DESIGN
//! ======
//! The API is lenient about shapes (numeric or string ids, role lists as
//! names or as `{name, ...}` objects), so the deserializers here normalize
//! once and the rest of the crate only sees strings.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{FieldErrors, parse_field_errors};

/// The authenticated identity as returned by `GET /api/user`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    /// Coarse-grained authorization labels (e.g. `"admin"`, `"technician"`).
    #[serde(default, deserialize_with = "deserialize_names")]
    pub roles: Vec<String>,
    /// Fine-grained authorization labels (e.g. `"manage farmers"`).
    #[serde(default, deserialize_with = "deserialize_names")]
    pub permissions: Vec<String>,
    /// Everything else the API sends, kept for display.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response envelope of `POST /api/login`, `/api/register` and `/api/refresh`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_field_errors")]
    pub errors: FieldErrors,
}

impl AuthResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Either a username-style login or an email address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginIdentity {
    Login(String),
    Email(String),
}

/// Body of `POST /api/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    #[serde(flatten)]
    pub identity: LoginIdentity,
    pub password: String,
}

impl Credentials {
    pub fn login(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self { identity: LoginIdentity::Login(login.into()), password: password.into() }
    }

    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { identity: LoginIdentity::Email(email.into()), password: password.into() }
    }
}

/// Body of `POST /api/register`. Fields beyond the common four are passed
/// through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept `"42"` or `42` for identifiers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

/// Accept `["admin"]` or `[{"id": 1, "name": "admin"}]`; `null` is empty.
fn deserialize_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let Value::Array(items) = value else {
        return Err(D::Error::custom("expected a list of names"));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(name) => Ok(name),
            Value::Object(mut obj) => match obj.remove("name") {
                Some(Value::String(name)) => Ok(name),
                _ => Err(D::Error::custom("named entry without a string `name`")),
            },
            other => Err(D::Error::custom(format!("unexpected entry in name list: {other}"))),
        })
        .collect()
}

fn deserialize_field_errors<'de, D>(deserializer: D) -> Result<FieldErrors, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(parse_field_errors).unwrap_or_default())
}
