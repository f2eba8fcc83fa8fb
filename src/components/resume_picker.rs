use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::error::AppError;
use crate::resume::{self, BrowserDialogs, CvFile, ResumeLibrary};
use crate::storage::BrowserStorage;

/// CV upload plus the saved-CV dropdown.
///
/// Keeps `cv_file` and the library's selection marker in step: picking a
/// saved CV fills `cv_file`, a fresh upload clears the marker, and
/// deleting the selected CV clears both.
#[component]
pub fn ResumePicker(
    library: RwSignal<ResumeLibrary>,
    cv_file: RwSignal<Option<CvFile>>,
    /// Receives user-visible failure messages.
    on_error: Callback<String>,
) -> impl IntoView {
    let on_file_change = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            return;
        };

        spawn_local(async move {
            let upload = match read_cv_file(file).await {
                Ok(upload) => upload,
                Err(e) => {
                    on_error.run(e.to_string());
                    return;
                }
            };

            let mut updated = library.get_untracked();
            let mut form_file = cv_file.get_untracked();
            let result = resume::accept_upload(
                &mut updated,
                &BrowserStorage,
                &BrowserDialogs,
                &mut form_file,
                upload,
            )
            .await;
            cv_file.set(form_file);
            library.set(updated);
            if let Err(e) = result {
                on_error.run(e.to_string());
            }
        });
    };

    let on_select = move |ev: web_sys::Event| {
        let name = event_target_value(&ev);
        let mut updated = library.get_untracked();
        let mut form_file = cv_file.get_untracked();
        match resume::select_saved(&mut updated, &mut form_file, &name) {
            Ok(true) => {
                cv_file.set(form_file);
                library.set(updated);
            }
            Ok(false) => {}
            Err(e) => on_error.run(e.to_string()),
        }
    };

    let on_delete = move |_| {
        let Some(name) = library.with_untracked(|l| l.selected().map(str::to_string)) else {
            return;
        };
        spawn_local(async move {
            let mut updated = library.get_untracked();
            let mut form_file = cv_file.get_untracked();
            match resume::delete_saved(
                &mut updated,
                &BrowserStorage,
                &BrowserDialogs,
                &mut form_file,
                &name,
            )
            .await
            {
                Ok(true) => {
                    cv_file.set(form_file);
                    library.set(updated);
                }
                Ok(false) => {}
                Err(e) => on_error.run(e.to_string()),
            }
        });
    };

    view! {
        <div class="form-group">
            <label for="cv_file">"Upload your CV (PDF)"</label>
            <div class="cv-selection">
                <Show when=move || library.with(|l| !l.is_empty())>
                    <div class="saved-cvs">
                        <label for="saved_cv">"Or select a saved CV:"</label>
                        <select
                            id="saved_cv"
                            class="input"
                            prop:value=move || {
                                library.with(|l| l.selected().unwrap_or_default().to_string())
                            }
                            on:change=on_select
                        >
                            <option value="">"-- Select a saved CV --"</option>
                            {move || {
                                library.with(|l| {
                                    l.saved()
                                        .iter()
                                        .map(|cv| {
                                            let name = cv.name.clone();
                                            let value = name.clone();
                                            view! { <option value=value>{name}</option> }
                                        })
                                        .collect_view()
                                })
                            }}
                        </select>
                        <Show when=move || library.with(|l| l.selected().is_some())>
                            <button
                                type="button"
                                class="btn btn-delete delete-cv-button"
                                on:click=on_delete
                            >
                                "Delete Selected CV"
                            </button>
                        </Show>
                    </div>
                </Show>
                <input
                    type="file"
                    id="cv_file"
                    name="cv_file"
                    accept=".pdf"
                    required=move || library.with(|l| l.selected().is_none())
                    on:change=on_file_change
                />
                {move || {
                    cv_file.with(|f| f.as_ref().map(|f| (f.file_name.clone(), f.bytes.len())))
                        .map(|(name, size)| view! {
                            <p class="input-hint">{format!("Using {} ({} KB)", name, size.div_ceil(1024))}</p>
                        })
                }}
            </div>
        </div>
    }
}

/// Read an uploaded file's bytes.
async fn read_cv_file(file: web_sys::File) -> Result<CvFile, AppError> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen_futures::JsFuture;

    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| AppError::Decode(format!("Failed to read file: {:?}", e)))?
        .dyn_into()
        .map_err(|_| AppError::Decode("Failed to convert to ArrayBuffer".to_string()))?;

    let bytes = Uint8Array::new(&array_buffer).to_vec();
    Ok(CvFile::new(file.name(), file.type_(), bytes))
}
