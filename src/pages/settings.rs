use leptos::prelude::*;

use crate::config::Settings;
use crate::storage::BrowserStorage;
use crate::theme::{SettingsContext, Theme};

/// One labelled text input bound to a field of the draft settings.
#[component]
fn SettingField(
    id: &'static str,
    label: &'static str,
    #[prop(optional)] placeholder: &'static str,
    value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                id=id
                type="text"
                class="input"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = expect_context::<SettingsContext>();
    let draft = RwSignal::new(ctx.settings.get_untracked());
    let (status, set_status) = signal::<Option<String>>(None);

    let save = move |_| {
        let mut settings = draft.get_untracked();
        settings.api_base_url = settings.api_base_url.trim().trim_end_matches('/').to_string();
        match settings.save(&BrowserStorage) {
            Ok(()) => {
                draft.set(settings.clone());
                ctx.settings.set(settings);
                set_status.set(Some("Settings saved".to_string()));
            }
            Err(e) => set_status.set(Some(format!("Failed to save: {}", e))),
        }
    };

    let reset = move |_| match Settings::reset(&BrowserStorage) {
        Ok(defaults) => {
            draft.set(defaults.clone());
            ctx.settings.set(defaults);
            set_status.set(Some("Defaults restored".to_string()));
        }
        Err(e) => set_status.set(Some(format!("Failed to reset: {}", e))),
    };

    let field = move |read: fn(&Settings) -> String, write: fn(&mut Settings, String)| {
        (
            Signal::derive(move || draft.with(read)),
            Callback::new(move |value: String| draft.update(|s| write(s, value))),
        )
    };
    let (api_url, set_api_url) = field(|s| s.api_base_url.clone(), |s, v| s.api_base_url = v);
    let (sender_name, set_sender_name) = field(|s| s.sender.name.clone(), |s, v| s.sender.name = v);
    let (sender_email, set_sender_email) =
        field(|s| s.sender.email.clone(), |s, v| s.sender.email = v);
    let (sender_phone, set_sender_phone) =
        field(|s| s.sender.phone.clone(), |s, v| s.sender.phone = v);
    let (log_level, set_log_level) = field(|s| s.log_level.clone(), |s, v| s.log_level = v);

    view! {
        <div class="page settings-page">
            <h2>"Settings"</h2>

            <section class="settings-section">
                <h3>"Service"</h3>
                <p class="section-description">"Where cover letters are generated and modified."</p>
                <SettingField
                    id="api-base-url"
                    label="API Base URL"
                    placeholder="http://localhost:8000"
                    value=api_url
                    on_input=set_api_url
                />
            </section>

            <section class="settings-section">
                <h3>"Letterhead"</h3>
                <p class="section-description">"Printed at the top of the exported PDF."</p>
                <SettingField id="sender-name" label="Name" value=sender_name on_input=set_sender_name />
                <SettingField id="sender-email" label="Email" value=sender_email on_input=set_sender_email />
                <SettingField id="sender-phone" label="Phone" value=sender_phone on_input=set_sender_phone />
            </section>

            <section class="settings-section">
                <h3>"Appearance"</h3>
                <div class="form-group">
                    <label for="theme-select">"Theme"</label>
                    <select
                        id="theme-select"
                        class="input"
                        prop:value=move || draft.with(|s| s.theme.as_str())
                        on:change=move |ev| {
                            let theme = Theme::from_value(&event_target_value(&ev));
                            draft.update(|s| s.theme = theme);
                        }
                    >
                        <option value="system">"System"</option>
                        <option value="light">"Light"</option>
                        <option value="dark">"Dark"</option>
                    </select>
                </div>
                <SettingField
                    id="log-level"
                    label="Log Level (applies on reload)"
                    placeholder="info"
                    value=log_level
                    on_input=set_log_level
                />
            </section>

            <div class="input-row">
                <button class="btn btn-save" on:click=save>"Save"</button>
                <button class="btn" on:click=reset>"Reset to Defaults"</button>
            </div>
            <Show when=move || status.get().is_some()>
                <span class="status-text">{move || status.get().unwrap_or_default()}</span>
            </Show>
        </div>
    }
}
