//! Local UI chrome state (theme, sidebar, notices).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the session store so
//! rendering controls can evolve independently of API data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Severity of a banner notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    /// CSS modifier class for the banner.
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "notice notice--info",
            Self::Success => "notice notice--success",
            Self::Error => "notice notice--error",
        }
    }
}

/// A one-line message shown above the page content until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// UI state for theme, navigation sidebar and the current notice.
///
/// Provided via context as `RwSignal<UiState>`.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub dark_mode: bool,
    pub sidebar_open: bool,
    pub notice: Option<Notice>,
}

impl UiState {
    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice { kind, text: text.into() });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
