use chrono::Local;
use leptos::prelude::*;

use crate::export::LetterLayout;
use crate::letter::LetterSession;
use crate::theme::SettingsContext;

/// On-screen rendition of the letter in the same block structure the PDF
/// export uses.
#[component]
pub fn LetterPreview(
    session: RwSignal<LetterSession>,
    company_name: RwSignal<String>,
) -> impl IntoView {
    let ctx = expect_context::<SettingsContext>();

    let layout = move || {
        let sender = ctx.settings.with(|s| s.sender.clone());
        let company = company_name.get();
        session.with(|s| LetterLayout::new(s.text(), &company, &sender, Local::now().date_naive()))
    };

    view! {
        <div class="cover-letter-pdf">
            {move || {
                let layout = layout();
                let sender_lines = layout
                    .sender
                    .iter()
                    .enumerate()
                    .map(|(i, line)| {
                        let class = if i == 0 { "sender-name" } else { "sender-line" };
                        view! { <p class=class>{line.clone()}</p> }
                    })
                    .collect_view();
                let recipient = layout
                    .recipient
                    .iter()
                    .map(|line| view! { <p>{line.clone()}</p> })
                    .collect_view();
                let body = layout
                    .paragraphs
                    .iter()
                    .map(|p| {
                        if p.is_empty() {
                            view! { <div class="paragraph-gap"></div> }.into_any()
                        } else {
                            view! { <p class="letter-paragraph">{p.clone()}</p> }.into_any()
                        }
                    })
                    .collect_view();

                view! {
                    <div class="letter-sender">{sender_lines}</div>
                    <div class="letter-date">{layout.date.clone()}</div>
                    <div class="letter-recipient">{recipient}</div>
                    <div class="letter-body">{body}</div>
                    <div class="letter-closing">
                        <p>{layout.closing.clone()}</p>
                        <p class="sender-name">{layout.signature.clone()}</p>
                    </div>
                }
            }}
        </div>
    }
}
