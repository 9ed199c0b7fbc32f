//! Account registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;
use portal::error::FieldErrors;
use portal::session::AuthOutcome;
use portal::types::Registration;

use crate::state::session::use_session;
use crate::util::form::{first_error, general_error, non_blank};

/// Raw form input, before validation.
#[derive(Clone, Debug, Default)]
struct RegisterForm {
    name: String,
    email: String,
    password: String,
    password_confirmation: String,
}

/// Client-side checks only; length and uniqueness rules are enforced by the
/// API and come back as field errors.
fn validate_registration(form: &RegisterForm) -> Result<Registration, &'static str> {
    let Some(name) = non_blank(&form.name) else {
        return Err("Enter your name.");
    };
    let Some(email) = non_blank(&form.email).filter(|e| e.contains('@')) else {
        return Err("Enter a valid email address.");
    };
    if form.password.is_empty() {
        return Err("Choose a password.");
    }
    if form.password != form.password_confirmation {
        return Err("Passwords do not match.");
    }
    Ok(Registration {
        name,
        email,
        password: form.password.clone(),
        password_confirmation: form.password_confirmation.clone(),
        ..Registration::default()
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_session();
    let form = RwSignal::new(RegisterForm::default());
    let info = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = move || ctx.state().get().loading;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy() {
            return;
        }
        errors.set(FieldErrors::new());
        let registration = match form.with(validate_registration) {
            Ok(registration) => registration,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        info.set(String::new());

        let session = ctx.session();
        leptos::task::spawn_local(async move {
            if let AuthOutcome::Failure { message, errors: field_errors } = session.register(&registration).await {
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
                <p class="auth-card__subtitle">"Create an account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">
                        "Name"
                        <input
                            class="auth-input"
                            type="text"
                            autocomplete="name"
                            prop:value=move || form.with(|f| f.name.clone())
                            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        />
                    </label>
                    <p class="auth-field-error">{field_error("name")}</p>
                    <label class="auth-label">
                        "Email"
                        <input
                            class="auth-input"
                            type="email"
                            autocomplete="email"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <p class="auth-field-error">{field_error("email")}</p>
                    <label class="auth-label">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                    </label>
                    <p class="auth-field-error">{field_error("password")}</p>
                    <label class="auth-label">
                        "Confirm password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.with(|f| f.password_confirmation.clone())
                            on:input=move |ev| form.update(|f| f.password_confirmation = event_target_value(&ev))
                        />
                    </label>
                    <button class="auth-button" type="submit" disabled=busy>
                        {move || if busy() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty() && errors.with(|e| general_error(e).is_none())>
                    <p class="auth-message auth-message--error">{move || info.get()}</p>
                </Show>
                <Show when=move || errors.with(|e| general_error(e).is_some())>
                    <p class="auth-message auth-message--error">
                        {move || errors.with(general_error).unwrap_or_default()}
                    </p>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? "
                    <A href="/login">"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
