use cover_letter_generator::app::App;
use cover_letter_generator::config::Settings;
use cover_letter_generator::logging;
use cover_letter_generator::storage::BrowserStorage;

fn main() {
    let settings = Settings::load(&BrowserStorage);
    logging::init(&settings.log_level);
    tracing::info!("Starting cover letter workspace (api: {})", settings.api_base_url);

    leptos::mount::mount_to_body(App);
}
