//! Static route table of the dashboard.
//!
//! Each route carries the metadata the navigation guard reads. Nested pages
//! (`/dashboard/admin`) repeat their parent's requirements explicitly so a
//! descriptor is self-contained.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::session::SessionState;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TECHNICIAN: &str = "technician";
pub const ROLE_ASSOCIATION: &str = "association";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// Only reachable while signed out (login, register).
    pub requires_guest: bool,
    /// Membership in any one of these roles grants access.
    pub required_roles: &'static [&'static str],
}

impl RouteMeta {
    pub const PUBLIC: Self = Self { requires_auth: false, requires_guest: false, required_roles: &[] };
    pub const GUEST: Self = Self { requires_auth: false, requires_guest: true, required_roles: &[] };
    pub const AUTH: Self = Self { requires_auth: true, requires_guest: false, required_roles: &[] };

    pub const fn roles(roles: &'static [&'static str]) -> Self {
        Self { requires_auth: true, requires_guest: false, required_roles: roles }
    }

    /// Whether reaching the route needs a signed-in user.
    pub fn is_protected(&self) -> bool {
        self.requires_auth || !self.required_roles.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteName {
    /// `/`: forwards to the dashboard or the login page.
    Home,
    Login,
    Register,
    Dashboard,
    Admin,
    Users,
    Farmers,
    Technicians,
    CropPlantings,
    Notifications,
    NotFound,
}

impl RouteName {
    pub const ALL: [Self; 11] = [
        Self::Home,
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Admin,
        Self::Users,
        Self::Farmers,
        Self::Technicians,
        Self::CropPlantings,
        Self::Notifications,
        Self::NotFound,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Admin => "/dashboard/admin",
            Self::Users => "/users",
            Self::Farmers => "/farmers",
            Self::Technicians => "/technicians",
            Self::CropPlantings => "/crop-plantings",
            Self::Notifications => "/notifications",
            Self::NotFound => "/not-found",
        }
    }

    pub const fn meta(self) -> RouteMeta {
        match self {
            Self::Home | Self::NotFound => RouteMeta::PUBLIC,
            Self::Login | Self::Register => RouteMeta::GUEST,
            Self::Dashboard | Self::Notifications => RouteMeta::AUTH,
            Self::Admin | Self::Users => RouteMeta::roles(&[ROLE_ADMIN]),
            Self::Farmers | Self::CropPlantings => RouteMeta::roles(&[ROLE_ADMIN, ROLE_TECHNICIAN]),
            Self::Technicians => RouteMeta::roles(&[ROLE_ADMIN, ROLE_ASSOCIATION]),
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Sign in",
            Self::Register => "Create account",
            Self::Dashboard => "Dashboard",
            Self::Admin => "Administration",
            Self::Users => "Users",
            Self::Farmers => "Farmers",
            Self::Technicians => "Technicians",
            Self::CropPlantings => "Crop plantings",
            Self::Notifications => "Notifications",
            Self::NotFound => "Not found",
        }
    }

    /// Resolve a browser path (query string and trailing slash ignored).
    /// Unknown paths resolve to [`RouteName::NotFound`].
    pub fn match_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized && *route != Self::NotFound)
            .unwrap_or(Self::NotFound)
    }

    /// Where `/` forwards for the given session.
    pub fn landing(state: &SessionState) -> Self {
        if state.is_authenticated() { Self::Dashboard } else { Self::Login }
    }
}
