//! Theme initialization and toggle.
//!
//! Reads the stored preference from `localStorage` (`"dark"` or `"light"`
//! under `theme`) and applies it as the `dark` class on `<html>`. Without a
//! stored preference the system `prefers-color-scheme` decides.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort browser-only behavior; native builds no-op so
//! the rest of the crate stays testable off the browser.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[cfg(feature = "csr")]
const STORAGE_KEY: &str = "theme";
const DARK: &str = "dark";
const LIGHT: &str = "light";

/// Resolve a stored value against the system preference. Unknown values
/// count as "not stored".
pub fn resolve_preference(stored: Option<&str>, system_dark: bool) -> bool {
    match stored {
        Some(DARK) => true,
        Some(LIGHT) => false,
        _ => system_dark,
    }
}

/// The value persisted for a theme.
pub fn storage_value(dark: bool) -> &'static str {
    if dark { DARK } else { LIGHT }
}

/// Read the dark mode preference: stored value first, then the system.
pub fn read_preference() -> bool {
    #[cfg(feature = "csr")]
    {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let stored = window
            .local_storage()
            .ok()
            .flatten()
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
        let system_dark = window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .is_some_and(|mq| mq.matches());
        resolve_preference(stored.as_deref(), system_dark)
    }
    #[cfg(not(feature = "csr"))]
    {
        resolve_preference(None, false)
    }
}

/// Add or remove the `dark` class on the `<html>` element.
pub fn apply(dark: bool) {
    #[cfg(feature = "csr")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.document_element())
        {
            if let Err(err) = el.class_list().toggle_with_force(DARK, dark) {
                tracing::warn!(error = ?err, "failed to apply theme class");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        tracing::trace!(dark, "theme apply skipped outside the browser");
    }
}

/// Flip the theme, apply it and persist the new preference.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    #[cfg(feature = "csr")]
    {
        if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
            if let Err(err) = storage.set_item(STORAGE_KEY, storage_value(next)) {
                tracing::warn!(error = ?err, "failed to persist theme");
            }
        }
    }
    next
}
