//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control happens before a page mounts, in
//! `components::guarded`.

pub mod admin;
pub mod crop_plantings;
pub mod dashboard;
pub mod farmers;
pub mod login;
pub mod not_found;
pub mod notifications;
pub mod register;
pub mod technicians;
pub mod users;
