//! Login page accepting an email address or a username.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use portal::error::FieldErrors;
use portal::session::AuthOutcome;
use portal::types::Credentials;

use crate::state::session::use_session;
use crate::util::form::{first_error, general_error, non_blank};

/// Build credentials from the form. Input containing `@` signs in by email,
/// anything else by username.
fn validate_login_input(identifier: &str, password: &str) -> Result<Credentials, &'static str> {
    let Some(identifier) = non_blank(identifier) else {
        return Err("Enter your email or username.");
    };
    if password.is_empty() {
        return Err("Enter your password.");
    }
    if identifier.contains('@') {
        Ok(Credentials::email(identifier, password))
    } else {
        Ok(Credentials::login(identifier, password))
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_session();
    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = move || ctx.state().get().loading;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy() {
            return;
        }
        errors.set(FieldErrors::new());
        let credentials = match validate_login_input(&identifier.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        info.set(String::new());

        let session = ctx.session();
        leptos::task::spawn_local(async move {
            // Success navigates to the dashboard from inside the session.
            if let AuthOutcome::Failure { message, errors: field_errors } = session.login(&credentials).await {
                password.set(String::new());
                info.set(message);
                errors.set(field_errors);
            }
        });
    };

    let field_error = move |field: &'static str| move || errors.with(|e| first_error(e, field));

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Agriboard"</h1>
                <p class="auth-card__subtitle">"Sign in to continue"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">
                        "Email or username"
                        <input
                            class="auth-input"
                            type="text"
                            autocomplete="username"
                            prop:value=move || identifier.get()
                            on:input=move |ev| identifier.set(event_target_value(&ev))
                        />
                    </label>
                    <p class="auth-field-error">{field_error("email")}{field_error("login")}</p>
                    <label class="auth-label">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <p class="auth-field-error">{field_error("password")}</p>
                    <button class="auth-button" type="submit" disabled=busy>
                        {move || if busy() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty() && errors.with(|e| general_error(e).is_none())>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <Show when=move || errors.with(|e| general_error(e).is_some())>
                    <p class="auth-message auth-message--error">
                        {move || errors.with(general_error).unwrap_or_default()}
                    </p>
                </Show>
                <p class="auth-card__footer">
                    "No account yet? "
                    <A href="/register">"Create one"</A>
                </p>
            </div>
        </div>
    }
}
