//! Plain-text rendering of command results.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use portal::guard::Navigation;
use portal::session::SessionState;
use serde::Serialize;

fn labels<'a>(names: impl IntoIterator<Item = &'a String>) -> String {
    let joined = names.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() { "-".to_owned() } else { joined }
}

pub fn describe_session(state: &SessionState) -> String {
    let Some(user) = &state.user else {
        return "not signed in".to_owned();
    };
    format!(
        "signed in as {} <{}> (id {})\nroles: {}\npermissions: {}",
        user.name,
        user.email,
        user.id,
        labels(&state.roles),
        labels(&state.permissions)
    )
}

pub fn describe_navigation(navigation: &Navigation) -> String {
    match navigation {
        Navigation::Proceed => "proceed".to_owned(),
        Navigation::Redirect(redirect) => match redirect.notice {
            Some(notice) => format!("redirect {} ({notice})", redirect.to.path()),
            None => format!("redirect {}", redirect.to.path()),
        },
    }
}

/// One compact JSON document per line.
pub fn json_lines<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        lines.push(serde_json::to_string(item)?);
    }
    Ok(lines.join("\n"))
}
