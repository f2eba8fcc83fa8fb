use leptos::prelude::*;

use crate::letter::{format_timestamp, LetterSession};

/// Version counter and last-modified time of the current letter.
#[component]
pub fn VersionInfo(session: RwSignal<LetterSession>) -> impl IntoView {
    view! {
        <div class="version-info">
            <span>{move || format!("Version: {}", session.with(|s| s.version()))}</span>
            {move || {
                session
                    .with(|s| s.last_modified())
                    .map(|ts| view! {
                        <span>{format!("Last modified: {}", format_timestamp(ts))}</span>
                    })
            }}
        </div>
    }
}
