//! Session store for the current dashboard user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`Session`] is created by the application root and handed to the
//! navigation guard, pages, and anything that needs to know who is signed in.
//! Clones share state. Tests build a fresh instance per case.
//!
//! CONCURRENCY
//! ===========
//! Everything runs on one thread; operations suspend only at network calls.
//! A session check in flight is stored as a shared future so overlapping
//! callers (two guarded navigations racing, a page mount plus the guard)
//! await the same request instead of issuing duplicates.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::error::{ApiError, FieldErrors, errors_or_general};
use crate::http::{ApiRequest, HttpClient, REFRESH_PATH, Transport};
use crate::routes::RouteName;
use crate::types::{AuthResponse, Credentials, Registration, User};

pub const USER_PATH: &str = "/api/user";
pub const LOGIN_PATH: &str = "/api/login";
pub const REGISTER_PATH: &str = "/api/register";
pub const LOGOUT_PATH: &str = "/api/logout";

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const LOGOUT_FAILED: &str = "Logout failed";
const REFRESH_FAILED: &str = "Token refresh failed";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing checked yet.
    Idle,
    /// A session check is in flight and no user is known.
    Checking,
    Authenticated,
    Anonymous,
}

/// Plain snapshot of the session, cheap to clone into reactive UI state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub roles: BTreeSet<String>,
    pub permissions: BTreeSet<String>,
    /// Any session operation is in flight.
    pub loading: bool,
    /// A session check specifically is in flight.
    pub checking: bool,
    pub error: Option<String>,
    /// Set once the first session check (or a login) has settled. Never reset.
    pub initialized: bool,
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        if self.user.is_some() {
            SessionStatus::Authenticated
        } else if self.checking {
            SessionStatus::Checking
        } else if self.initialized {
            SessionStatus::Anonymous
        } else {
            SessionStatus::Idle
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.is_authenticated() && self.roles.contains(role)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_authenticated() && self.permissions.contains(permission)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|permission| self.has_permission(permission))
    }

    fn adopt(&mut self, user: User) {
        self.roles = user.roles.iter().cloned().collect();
        self.permissions = user.permissions.iter().cloned().collect();
        self.user = Some(user);
    }

    fn clear_identity(&mut self) {
        self.user = None;
        self.roles.clear();
        self.permissions.clear();
    }
}

/// Result of `login`/`register`/`refresh_token`. Failures carry a display
/// message and field-keyed errors for the form; they are never raised.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthOutcome {
    Success(AuthResponse),
    Failure { message: String, errors: FieldErrors },
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Success(_) => None,
            Self::Failure { errors, .. } => Some(errors),
        }
    }
}

/// Client-side navigation hook invoked after login, register and logout.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn navigate(&self, path: &str) {
        self(path);
    }
}

/// Navigator for hosts without a router.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNavigation;

impl Navigator for NoNavigation {
    fn navigate(&self, _path: &str) {}
}

type CheckFuture = Shared<LocalBoxFuture<'static, Result<User, ApiError>>>;
type Listener = Rc<dyn Fn(&SessionState)>;

struct Inner<T> {
    client: HttpClient<T>,
    state: RefCell<SessionState>,
    in_flight: RefCell<Option<CheckFuture>>,
    navigator: Box<dyn Navigator>,
    listeners: RefCell<Vec<Listener>>,
}

/// Shared session context. Cloning is cheap and shares state.
pub struct Session<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Session<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Transport + 'static> Session<T> {
    pub fn new(client: HttpClient<T>, navigator: impl Navigator + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                client,
                state: RefCell::new(SessionState::default()),
                in_flight: RefCell::new(None),
                navigator: Box::new(navigator),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn client(&self) -> &HttpClient<T> {
        &self.inner.client
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Register `listener` to receive a snapshot after every state change.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn is_authenticated(&self) -> bool {
        self.with_state(SessionState::is_authenticated)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.with_state(|s| s.has_role(role))
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.with_state(|s| s.has_permission(permission))
    }

    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        self.with_state(|s| s.has_any_permission(permissions))
    }

    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|s| s.error = Some(message));
    }

    pub fn clear_error(&self) {
        self.update(|s| s.error = None);
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        f(&mut self.inner.state.borrow_mut());
        let snapshot = self.snapshot();
        let listeners = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Fetch the current identity from `GET /api/user`.
    ///
    /// Joins a check already in flight instead of issuing a second request.
    /// On failure the identity is cleared; either way the session ends up
    /// initialized.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the identity request.
    pub async fn check_session(&self) -> Result<User, ApiError> {
        self.in_flight_check().await
    }

    fn in_flight_check(&self) -> CheckFuture {
        let existing = self.inner.in_flight.borrow().clone();
        if let Some(check) = existing {
            tracing::trace!("joining in-flight session check");
            return check;
        }

        self.update(|s| {
            s.loading = true;
            s.checking = true;
            s.error = None;
        });

        let session = self.clone();
        let check = async move {
            let result = session.inner.client.send_json::<User>(&ApiRequest::get(USER_PATH)).await;
            session.inner.in_flight.borrow_mut().take();
            let adopted = match &result {
                Ok(user) => {
                    tracing::debug!(user_id = %user.id, "session active");
                    Some(user.clone())
                }
                Err(err) => {
                    tracing::debug!(error = %err, "no active session");
                    None
                }
            };
            session.update(|s| {
                s.loading = false;
                s.checking = false;
                s.initialized = true;
                match adopted {
                    Some(user) => s.adopt(user),
                    None => s.clear_identity(),
                }
            });
            result
        }
        .boxed_local()
        .shared();

        *self.inner.in_flight.borrow_mut() = Some(check.clone());
        check
    }

    /// Run the first session check unless a user is already known. Failure
    /// leaves the session anonymous and initialized.
    pub async fn init(&self) {
        if self.with_state(|s| s.initialized && s.user.is_some()) {
            tracing::trace!("session already initialized");
            return;
        }
        if let Err(err) = self.check_session().await {
            tracing::debug!(error = %err, "session init finished without a user");
        }
    }

    /// Re-fetch the identity to populate roles and permissions.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the identity request; the
    /// session is left untouched in that case.
    pub async fn load_roles(&self) -> Result<User, ApiError> {
        let user = self.inner.client.send_json::<User>(&ApiRequest::get(USER_PATH)).await?;
        tracing::debug!(user_id = %user.id, roles = ?user.roles, "roles loaded");
        let adopted = user.clone();
        self.update(|s| s.adopt(adopted));
        Ok(user)
    }

    /// Sign in via `POST /api/login` and navigate to the dashboard on success.
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        match serde_json::to_value(credentials) {
            Ok(body) => {
                let request = ApiRequest::post(LOGIN_PATH).json(body).without_refresh();
                self.authenticate(&request, LOGIN_FAILED).await
            }
            Err(err) => self.reject(&ApiError::from(err), LOGIN_FAILED),
        }
    }

    /// Create an account via `POST /api/register`; same contract as [`Self::login`].
    pub async fn register(&self, registration: &Registration) -> AuthOutcome {
        match serde_json::to_value(registration) {
            Ok(body) => {
                let request = ApiRequest::post(REGISTER_PATH).json(body).without_refresh();
                self.authenticate(&request, REGISTRATION_FAILED).await
            }
            Err(err) => self.reject(&ApiError::from(err), REGISTRATION_FAILED),
        }
    }

    async fn authenticate(&self, request: &ApiRequest, fallback: &str) -> AuthOutcome {
        self.update(|s| {
            s.clear_identity();
            s.loading = true;
            s.error = None;
        });

        match self.inner.client.send_json::<AuthResponse>(request).await {
            Ok(response) if response.is_success() => {
                let user = response.user.clone();
                self.update(|s| {
                    s.loading = false;
                    if let Some(user) = user {
                        s.adopt(user);
                        s.initialized = true;
                    }
                });
                tracing::info!(path = %request.path, "authenticated");
                self.inner.navigator.navigate(RouteName::Dashboard.path());
                AuthOutcome::Success(response)
            }
            Ok(response) => {
                let message = response.message.filter(|m| !m.is_empty()).unwrap_or_else(|| fallback.to_owned());
                self.fail(message, response.errors)
            }
            Err(err) => self.reject(&err, fallback),
        }
    }

    fn reject(&self, err: &ApiError, fallback: &str) -> AuthOutcome {
        tracing::warn!(error = %err, "{fallback}");
        let message = err.server_message().unwrap_or(fallback).to_owned();
        self.fail(message, err.field_errors())
    }

    fn fail(&self, message: String, errors: FieldErrors) -> AuthOutcome {
        let errors = errors_or_general(errors, &message);
        let recorded = message.clone();
        self.update(|s| {
            s.loading = false;
            s.error = Some(recorded);
        });
        AuthOutcome::Failure { message, errors }
    }

    /// Sign out via `POST /api/logout`. Local session data is cleared and the
    /// login route is shown even when the request fails.
    ///
    /// # Errors
    ///
    /// Returns the error of the logout request after clearing local state.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.update(|s| s.loading = true);
        let result = self.inner.client.send(&ApiRequest::post(LOGOUT_PATH)).await.map(drop);
        let error = result
            .as_ref()
            .err()
            .map(|err| err.server_message().unwrap_or(LOGOUT_FAILED).to_owned());
        if let Err(err) = &result {
            tracing::warn!(error = %err, "logout request failed; clearing local session anyway");
        }
        self.update(|s| {
            s.loading = false;
            s.initialized = true;
            s.clear_identity();
            s.error = error;
        });
        self.inner.navigator.navigate(RouteName::Login.path());
        result
    }

    /// Explicitly refresh the session via `POST /api/refresh`, adopting the
    /// returned user. Failure signs the user out locally and shows the login
    /// route.
    pub async fn refresh_token(&self) -> AuthOutcome {
        let request = ApiRequest::post(REFRESH_PATH).without_refresh();
        let outcome = match self.inner.client.send_json::<AuthResponse>(&request).await {
            Ok(response) if response.is_success() => {
                let user = response.user.clone();
                self.update(|s| {
                    s.error = None;
                    if let Some(user) = user {
                        s.adopt(user);
                    }
                });
                return AuthOutcome::Success(response);
            }
            Ok(response) => {
                let message = response.message.filter(|m| !m.is_empty()).unwrap_or_else(|| REFRESH_FAILED.to_owned());
                self.fail(message, response.errors)
            }
            Err(err) => self.reject(&err, REFRESH_FAILED),
        };
        self.update(SessionState::clear_identity);
        self.inner.navigator.navigate(RouteName::Login.path());
        outcome
    }
}
