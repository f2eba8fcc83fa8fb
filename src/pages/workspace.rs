//! The generation workspace: CV, company and job description in; a letter
//! to refine and download out.

use chrono::Local;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{HttpLetterApi, LetterApi};
use crate::components::letter_preview::LetterPreview;
use crate::components::modification_form::ModificationForm;
use crate::components::resume_picker::ResumePicker;
use crate::components::version_info::VersionInfo;
use crate::export::{download, export_letter};
use crate::letter::SessionPhase;
use crate::theme::SettingsContext;
use crate::workspace::WorkspaceContext;

#[component]
pub fn WorkspacePage() -> impl IntoView {
    let ctx = expect_context::<SettingsContext>();

    let workspace = expect_context::<WorkspaceContext>();
    let WorkspaceContext {
        company_name,
        job_description,
        cv_file,
        library,
        session,
    } = workspace;

    let on_error = Callback::new(move |message: String| {
        session.update(|s| s.report_error(message));
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let inputs = workspace.form_inputs();
        let Some(pending) = session.try_update(|s| s.begin_generate(&inputs)).flatten() else {
            return;
        };
        let base_url = ctx.settings.with_untracked(|s| s.api_base_url.clone());

        spawn_local(async move {
            let api = HttpLetterApi::new(base_url);
            let result = api.generate_cover_letter(&pending.request).await;
            session.update(|s| {
                s.finish_generate(pending.token, result);
            });
        });
    };

    let on_modify = Callback::new(move |_: ()| {
        let Some(pending) = session.try_update(|s| s.begin_modify()).flatten() else {
            return;
        };
        let base_url = ctx.settings.with_untracked(|s| s.api_base_url.clone());

        spawn_local(async move {
            let api = HttpLetterApi::new(base_url);
            let result = api.modify_cover_letter(&pending.request).await;
            session.update(|s| {
                s.finish_modify(pending.token, result);
            });
        });
    });

    let on_export = move |_| {
        let sender = ctx.settings.with_untracked(|s| s.sender.clone());
        let company = company_name.get_untracked();
        let text = session.with_untracked(|s| s.text().to_string());

        let saved = export_letter(&text, &company, &sender, Local::now().date_naive())
            .and_then(|exported| {
                download::save_pdf(&exported.file_name, &exported.bytes)?;
                Ok(exported.unsupported_note())
            });
        match saved {
            Ok(Some(note)) => session.update(|s| s.report_error(note)),
            Ok(None) => {}
            Err(e) => session.update(|s| s.report_error(e.to_string())),
        }
    };

    view! {
        <div class="page workspace-page">
            <style>{include_str!("workspace.css")}</style>
            <h2>"Cover Letter Generator"</h2>
            <p class="page-description">
                "Upload your CV, describe the role, and get a tailored cover letter you can refine and download."
            </p>

            <form class="generate-form" on:submit=on_submit>
                <ResumePicker library=library cv_file=cv_file on_error=on_error />

                <div class="form-group">
                    <label for="company_name">"Company Name"</label>
                    <input
                        id="company_name"
                        type="text"
                        class="input"
                        required
                        prop:value=move || company_name.get()
                        on:input=move |ev| company_name.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="job_description">"Job Description"</label>
                    <textarea
                        id="job_description"
                        class="input"
                        rows="8"
                        required
                        prop:value=move || job_description.get()
                        on:input=move |ev| job_description.set(event_target_value(&ev))
                    ></textarea>
                </div>

                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || session.with(|s| s.is_generating())
                >
                    {move || {
                        if session.with(|s| s.is_generating()) {
                            "Generating..."
                        } else {
                            "Generate Cover Letter"
                        }
                    }}
                </button>
            </form>

            {move || {
                session
                    .with(|s| s.error().map(str::to_string))
                    .map(|message| view! { <div class="error-message">{message}</div> })
            }}

            {move || {
                let message = match session.with(|s| s.phase()) {
                    SessionPhase::Generating => "Generating your cover letter...",
                    SessionPhase::Modifying => "Applying your changes...",
                    SessionPhase::Idle | SessionPhase::Ready => return None,
                };
                Some(view! { <div class="loading">{message}</div> })
            }}

            <Show when=move || session.with(|s| s.has_letter())>
                <section class="result-section">
                    <div class="result-header">
                        <h3>"Your Cover Letter"</h3>
                        <VersionInfo session=session />
                    </div>
                    <LetterPreview session=session company_name=company_name />
                    <div class="result-actions">
                        <button type="button" class="btn btn-primary" on:click=on_export>
                            "Download as PDF"
                        </button>
                    </div>
                    <ModificationForm session=session on_modify=on_modify />
                </section>
            </Show>
        </div>
    }
}
