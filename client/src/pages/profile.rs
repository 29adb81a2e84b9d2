//! Profile editor for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads `GET /users/{id}` for the session's user, saves with
//! `PUT /users/{id}`, and on success refreshes the user embedded in the
//! session so the sidebar and later reloads see the new details.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::net::api;
use crate::net::types::{ProfileUpdate, User};
use crate::state::auth::use_auth;
use crate::state::toast::{ToastKind, notify, notify_api_error, use_toasts};
use crate::util::fetch::{spawn_fetch, use_liveness};
use crate::util::password;

/// Raw form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct ProfileForm {
    name: String,
    email: String,
    phone: String,
    new_password: String,
    confirmation: String,
}

impl ProfileForm {
    fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    fn clear_passwords(&mut self) {
        self.new_password.clear();
        self.confirmation.clear();
    }

    /// Validate and build the request body. An empty new password leaves the
    /// password unchanged.
    fn to_update(&self) -> Result<ProfileUpdate, String> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() {
            return Err("Name is required.".to_owned());
        }
        if !email.contains('@') {
            return Err("Enter a valid email address.".to_owned());
        }
        let password = if self.new_password.is_empty() {
            None
        } else {
            password::validate(&self.new_password, &self.confirmation).map_err(|e| e.to_string())?;
            Some(self.new_password.clone())
        };
        let phone = self.phone.trim();
        Ok(ProfileUpdate {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: (!phone.is_empty()).then(|| phone.to_owned()),
            password,
        })
    }
}

fn text_field(
    form: RwSignal<ProfileForm>,
    label: &'static str,
    kind: &'static str,
    get: fn(&ProfileForm) -> String,
    set: fn(&mut ProfileForm, String),
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            <input
                class="form-field__input"
                type=kind
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        </label>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let liveness = use_liveness();

    let session_user = auth.snapshot().user.unwrap_or_default();
    let user_id = session_user.id.clone();
    let form = RwSignal::new(ProfileForm::from_user(&session_user));
    let loading = RwSignal::new(!user_id.is_empty());
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    if !user_id.is_empty() {
        let http = auth.http().clone();
        let id = user_id.clone();
        let request = async move { api::fetch_user(&http, &id).await };
        spawn_fetch(&liveness, request, move |result| {
            match result {
                Ok(user) => form.set(ProfileForm::from_user(&user)),
                Err(e) => notify_api_error(toasts, "profile: fetch", &e),
            }
            loading.set(false);
        });
    }

    let strength = move || form.with(|f| password::score(&f.new_password));
    let can_edit = !user_id.is_empty();

    let on_submit = {
        let auth = auth.clone();
        let user_id = user_id.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if saving.get_untracked() || user_id.is_empty() {
                return;
            }
            let update = match form.with_untracked(ProfileForm::to_update) {
                Ok(update) => update,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            error.set(None);
            saving.set(true);

            let http = auth.http().clone();
            let id = user_id.clone();
            let submitted = update.clone();
            let request = async move { api::update_user(&http, &id, &update).await };
            let auth = auth.clone();
            spawn_fetch(&liveness, request, move |result| {
                match result {
                    Ok(reply) => {
                        match auth.apply_profile_update(&submitted, reply) {
                            Some(user) => form.set(ProfileForm::from_user(&user)),
                            None => form.update(ProfileForm::clear_passwords),
                        }
                        notify(toasts, ToastKind::Success, "Profile saved.");
                    }
                    Err(e) => notify_api_error(toasts, "profile: save", &e),
                }
                saving.set(false);
            });
        }
    };

    view! {
        <section class="page profile-page">
            <header class="page__header">
                <h1>"Profile"</h1>
            </header>
            <Show when=move || !can_edit>
                <p class="page__status">"This account has no user record to edit."</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page__status">"Loading profile..."</p> }>
                <form class="profile-form" on:submit=on_submit.clone()>
                    {text_field(form, "Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                    {text_field(form, "Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {text_field(form, "Phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
                    {text_field(form, "New password", "password", |f| f.new_password.clone(), |f, v| f.new_password = v)}
                    <div class="strength-meter" data-score=move || strength().to_string()>
                        <div class="strength-meter__bar"></div>
                        <span class="strength-meter__label">
                            {move || if form.with(|f| f.new_password.is_empty()) { "" } else { password::label(strength()) }}
                        </span>
                    </div>
                    {text_field(form, "Confirm password", "password", |f| f.confirmation.clone(), |f, v| f.confirmation = v)}
                    <Show when=move || error.with(Option::is_some)>
                        <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button class="btn btn--primary" type="submit" disabled=move || saving.get() || !can_edit>
                        {move || if saving.get() { "Saving..." } else { "Save changes" }}
                    </button>
                </form>
            </Show>
        </section>
    }
}
