use super::types::SaveChoice;

/// Confirmation port used by the résumé library.
///
/// The browser implementation blocks on `window.confirm`/`window.prompt`;
/// tests script the answers.
#[allow(async_fn_in_trait)]
pub trait ResumeDialogs {
    /// Ask whether to keep `file_name` for later, and under which name.
    async fn offer_save(&self, file_name: &str) -> SaveChoice;

    /// Ask before removing the saved résumé called `name`.
    async fn confirm_delete(&self, name: &str) -> bool;
}

/// Native browser dialogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDialogs;

impl ResumeDialogs for BrowserDialogs {
    async fn offer_save(&self, file_name: &str) -> SaveChoice {
        let Some(window) = web_sys::window() else {
            return SaveChoice::declined();
        };

        let accepted = window
            .confirm_with_message("Would you like to save this CV for future use?")
            .unwrap_or(false);
        if !accepted {
            return SaveChoice::declined();
        }

        let name = window
            .prompt_with_message_and_default("Enter a name for this CV:", file_name)
            .ok()
            .flatten();
        SaveChoice { accepted, name }
    }

    async fn confirm_delete(&self, name: &str) -> bool {
        web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "Are you sure you want to delete the CV: {}?",
                    name
                ))
                .ok()
            })
            .unwrap_or(false)
    }
}
