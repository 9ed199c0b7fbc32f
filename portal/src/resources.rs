//! Listing queries and mutations for the dashboard's managed entities.
//!
//! Listings go through [`InfiniteQuery`](crate::pagination::InfiniteQuery);
//! each query type here only knows its endpoint and how its filters map to
//! query parameters. Mutations are thin wrappers returning the API's JSON.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::ApiError;
use crate::http::{ApiRequest, HttpClient, Transport};
use crate::pagination::ListQuery;
use crate::types::deserialize_id;

pub const USERS_PATH: &str = "/api/users";
pub const FARMERS_PATH: &str = "/api/farmers";
pub const TECHNICIANS_PATH: &str = "/api/my-technicians";
pub const CROP_PLANTINGS_PATH: &str = "/api/crop-plantings";
pub const CATEGORIES_PATH: &str = "/api/categories";
pub const NOTIFICATIONS_PATH: &str = "/api/notifications";

/// Filter value meaning "no filter".
pub const ALL: &str = "all";

/// A listing row: an id plus whatever columns the endpoint returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Column `key` rendered as text; `None` for missing, null, or nested values.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub read_at: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.data.get("message").and_then(Value::as_str)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    pub by: String,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self { by: "created_at".to_owned(), direction: SortDirection::Desc }
    }
}

impl Sort {
    fn params(&self, out: &mut Vec<(&'static str, String)>) {
        out.push(("sortBy", self.by.clone()));
        out.push(("sortDirection", self.direction.as_str().to_owned()));
    }
}

/// `None` and the empty string both mean "no filter".
fn filter_or_all(value: Option<&String>) -> String {
    value.filter(|v| !v.is_empty()).map_or_else(|| ALL.to_owned(), Clone::clone)
}

fn present(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v.as_str() != ALL).cloned()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub search: String,
    pub role: Option<String>,
    pub sort: Sort,
}

impl ListQuery for UserQuery {
    type Item = Record;

    fn endpoint(&self) -> &'static str {
        USERS_PATH
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("search", self.search.clone()), ("role", filter_or_all(self.role.as_ref()))];
        self.sort.params(&mut params);
        params
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FarmerQuery {
    pub search: String,
    pub association: Option<String>,
    pub sort: Sort,
}

impl ListQuery for FarmerQuery {
    type Item = Record;

    fn endpoint(&self) -> &'static str {
        FARMERS_PATH
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("search", self.search.clone()),
            ("association", filter_or_all(self.association.as_ref())),
        ];
        self.sort.params(&mut params);
        params
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TechnicianQuery {
    pub search: String,
}

impl ListQuery for TechnicianQuery {
    type Item = Record;

    fn endpoint(&self) -> &'static str {
        TECHNICIANS_PATH
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![("search", self.search.clone())]
    }
}

/// Crop plantings omit unset filters entirely instead of sending `all`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CropPlantingQuery {
    pub search: String,
    pub status: Option<String>,
    pub category: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort: Sort,
}

impl ListQuery for CropPlantingQuery {
    type Item = Record;

    fn endpoint(&self) -> &'static str {
        CROP_PLANTINGS_PATH
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("search", self.search.clone())];
        let optional = [
            ("status", &self.status),
            ("category_id", &self.category),
            ("date_from", &self.date_from),
            ("date_to", &self.date_to),
        ];
        for (key, value) in optional {
            if let Some(value) = present(value.as_ref()) {
                params.push((key, value));
            }
        }
        self.sort.params(&mut params);
        params
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NotificationQuery;

impl ListQuery for NotificationQuery {
    type Item = Notification;

    fn endpoint(&self) -> &'static str {
        NOTIFICATIONS_PATH
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// The inbox's first page is requested without a cursor.
    fn first_cursor(&self) -> Option<&'static str> {
        None
    }
}

fn user_endpoint(user_id: &str) -> String {
    format!("{USERS_PATH}/{user_id}")
}

fn user_profile_endpoint(user_id: &str) -> String {
    format!("{USERS_PATH}/{user_id}/profile")
}

fn user_permissions_endpoint(user_id: &str) -> String {
    format!("{USERS_PATH}/{user_id}/permissions")
}

fn notification_endpoint(notification_id: &str) -> String {
    format!("{NOTIFICATIONS_PATH}/{notification_id}")
}

fn notification_read_endpoint(notification_id: &str) -> String {
    format!("{NOTIFICATIONS_PATH}/{notification_id}/read")
}

/// `POST /api/users`.
///
/// # Errors
///
/// Returns the API error; validation failures carry field errors.
pub async fn create_user<T: Transport>(client: &HttpClient<T>, user: Value) -> Result<Value, ApiError> {
    client.send(&ApiRequest::post(USERS_PATH).json(user)).await
}

/// `PUT /api/users/{id}`.
///
/// # Errors
///
/// Returns the API error; validation failures carry field errors.
pub async fn update_user<T: Transport>(client: &HttpClient<T>, user_id: &str, user: Value) -> Result<Value, ApiError> {
    client.send(&ApiRequest::put(user_endpoint(user_id)).json(user)).await
}

/// `DELETE /api/users/{id}`.
///
/// # Errors
///
/// Returns the API error.
pub async fn delete_user<T: Transport>(client: &HttpClient<T>, user_id: &str) -> Result<Value, ApiError> {
    client.send(&ApiRequest::delete(user_endpoint(user_id))).await
}

/// `GET /api/users/{id}/profile`.
///
/// # Errors
///
/// Returns the API error.
pub async fn user_profile<T: Transport>(client: &HttpClient<T>, user_id: &str) -> Result<Value, ApiError> {
    client.send(&ApiRequest::get(user_profile_endpoint(user_id))).await
}

/// `PUT /api/users/{id}/permissions` with body `{permissions}`.
///
/// # Errors
///
/// Returns the API error.
pub async fn update_user_permissions<T: Transport>(
    client: &HttpClient<T>,
    user_id: &str,
    permissions: &[String],
) -> Result<Value, ApiError> {
    let request = ApiRequest::put(user_permissions_endpoint(user_id)).json(json!({ "permissions": permissions }));
    client.send(&request).await
}

/// `POST /api/farmers`.
///
/// # Errors
///
/// Returns the API error; validation failures carry field errors.
pub async fn create_farmer<T: Transport>(client: &HttpClient<T>, farmer: Value) -> Result<Value, ApiError> {
    client.send(&ApiRequest::post(FARMERS_PATH).json(farmer)).await
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryList {
    Bare(Vec<Category>),
    Wrapped { data: Vec<Category> },
}

/// `GET /api/categories`, accepting a bare list or a `{data: [...]}` wrapper.
///
/// # Errors
///
/// Returns the API error, or `Decode` for an unrecognized shape.
pub async fn categories<T: Transport>(client: &HttpClient<T>) -> Result<Vec<Category>, ApiError> {
    let list = client.send_json::<CategoryList>(&ApiRequest::get(CATEGORIES_PATH)).await?;
    Ok(match list {
        CategoryList::Bare(items) | CategoryList::Wrapped { data: items } => items,
    })
}

/// `PATCH /api/notifications/{id}/read`.
///
/// # Errors
///
/// Returns the API error.
pub async fn mark_notification_read<T: Transport>(
    client: &HttpClient<T>,
    notification_id: &str,
) -> Result<Value, ApiError> {
    client.send(&ApiRequest::patch(notification_read_endpoint(notification_id))).await
}

/// `PATCH /api/notifications/mark-all-read`.
///
/// # Errors
///
/// Returns the API error.
pub async fn mark_all_notifications_read<T: Transport>(client: &HttpClient<T>) -> Result<Value, ApiError> {
    client.send(&ApiRequest::patch(format!("{NOTIFICATIONS_PATH}/mark-all-read"))).await
}

/// `DELETE /api/notifications/{id}`.
///
/// # Errors
///
/// Returns the API error.
pub async fn delete_notification<T: Transport>(client: &HttpClient<T>, notification_id: &str) -> Result<Value, ApiError> {
    client.send(&ApiRequest::delete(notification_endpoint(notification_id))).await
}
