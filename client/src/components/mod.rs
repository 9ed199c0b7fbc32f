//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the dashboard chrome and listing surfaces while
//! reading/writing shared state from Leptos context providers.

pub mod guarded;
pub mod notice_banner;
pub mod record_list;
pub mod sidebar;
pub mod toolbar;
