//! Application state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` bridges the `portal` session store into reactive signals;
//! `ui` holds presentation-only state (theme, sidebar, notices).

pub mod session;
pub mod ui;
