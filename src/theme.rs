use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::Settings;

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a `<select>` value; anything unknown means "follow the system".
    pub fn from_value(value: &str) -> Self {
        match value {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::System,
        }
    }
}

/// Settings shared by every page, provided by `App`.
#[derive(Clone, Copy)]
pub struct SettingsContext {
    pub settings: RwSignal<Settings>,
}

/// Apply the theme by setting or removing the `data-theme` attribute on `<html>`.
/// `System` removes the attribute so the CSS `prefers-color-scheme` query decides.
pub fn apply_theme(theme: Theme) {
    if let Some(window) = web_sys::window() {
        if let Some(doc) = window.document() {
            if let Some(html) = doc.document_element() {
                let _ = match theme {
                    Theme::Light | Theme::Dark => html.set_attribute("data-theme", theme.as_str()),
                    Theme::System => html.remove_attribute("data-theme"),
                };
            }
        }
    }
}
