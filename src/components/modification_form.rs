use leptos::prelude::*;

use crate::letter::LetterSession;

/// Free-text instructions for revising the current letter.
#[component]
pub fn ModificationForm(session: RwSignal<LetterSession>, on_modify: Callback<()>) -> impl IntoView {
    view! {
        <div class="modification-section">
            <h3>"Modify Cover Letter"</h3>
            <div class="form-group">
                <label for="modification_notes">"Modification Notes"</label>
                <textarea
                    id="modification_notes"
                    class="input"
                    rows="4"
                    placeholder="Example: Make it more formal, emphasize leadership skills, etc."
                    prop:value=move || session.with(|s| s.modification_notes().to_string())
                    on:input=move |ev| {
                        let notes = event_target_value(&ev);
                        session.update(|s| s.set_modification_notes(notes));
                    }
                ></textarea>
            </div>
            <button
                type="button"
                class="btn btn-save"
                disabled=move || session.with(|s| !s.can_modify())
                on:click=move |_| on_modify.run(())
            >
                {move || {
                    if session.with(|s| s.is_modifying()) {
                        "Modifying..."
                    } else {
                        "Modify Cover Letter"
                    }
                }}
            </button>
        </div>
    }
}
