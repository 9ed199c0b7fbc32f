use super::*;

#[test]
fn ui_state_default_is_light_closed_and_quiet() {
    let state = UiState::default();
    assert!(!state.dark_mode);
    assert!(!state.sidebar_open);
    assert!(state.notice.is_none());
}

#[test]
fn notify_replaces_previous_notice() {
    let mut state = UiState::default();
    state.notify(NoticeKind::Info, "first");
    state.notify(NoticeKind::Error, "second");
    assert_eq!(
        state.notice,
        Some(Notice { kind: NoticeKind::Error, text: "second".to_owned() })
    );
}

#[test]
fn dismiss_notice_clears_it() {
    let mut state = UiState::default();
    state.notify(NoticeKind::Success, "saved");
    state.dismiss_notice();
    assert!(state.notice.is_none());
}

#[test]
fn notice_kind_classes_are_distinct() {
    assert_eq!(NoticeKind::Error.class(), "notice notice--error");
    assert_ne!(NoticeKind::Info.class(), NoticeKind::Success.class());
}
