use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::sidebar::Sidebar;
use crate::config::Settings;
use crate::pages::settings::SettingsPage;
use crate::pages::workspace::WorkspacePage;
use crate::resume::ResumeLibrary;
use crate::storage::BrowserStorage;
use crate::theme::{apply_theme, SettingsContext};
use crate::workspace::WorkspaceContext;

#[component]
pub fn App() -> impl IntoView {
    let settings = RwSignal::new(Settings::load(&BrowserStorage));
    provide_context(SettingsContext { settings });
    provide_context(WorkspaceContext::new(ResumeLibrary::load(&BrowserStorage)));

    // Apply theme to DOM whenever the settings change
    Effect::new(move |_| {
        let theme = settings.with(|s| s.theme);
        apply_theme(theme);
    });

    view! {
        <Router>
            <style>{include_str!("app.css")}</style>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=WorkspacePage />
                        <Route path=path!("/settings") view=SettingsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
