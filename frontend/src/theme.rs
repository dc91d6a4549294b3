//! Light/dark theme preference: persisted in local storage under `"theme"`,
//! applied by toggling the `dark-mode` class on `<body>`, and synced across
//! windows by observing `storage` events from other tabs.

use gloo_events::EventListener;
use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::JsCast;
use web_sys::StorageEvent;
use yew::Callback;

const STORAGE_KEY: &str = "theme";
const DARK_CLASS: &str = "dark-mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    // Storage events carry the raw serialized value, which gloo stores
    // JSON-encoded; tolerate the surrounding quotes.
    fn parse(value: &str) -> Option<Theme> {
        match value.trim_matches('"') {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Reads the persisted preference, defaulting to light.
pub fn load() -> Theme {
    LocalStorage::get::<String>(STORAGE_KEY)
        .ok()
        .and_then(|v| Theme::parse(&v))
        .unwrap_or(Theme::Light)
}

pub fn store(theme: Theme) {
    if let Err(err) = LocalStorage::set(STORAGE_KEY, theme.as_str()) {
        log::warn!("failed to persist theme: {err}");
    }
}

/// Applies the theme to the document body.
pub fn apply(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let result = match theme {
        Theme::Dark => body.class_list().add_1(DARK_CLASS),
        Theme::Light => body.class_list().remove_1(DARK_CLASS),
    };
    if let Err(err) = result {
        log::warn!("failed to apply theme class: {:?}", err);
    }
}

/// Subscribes to theme changes made by other windows. Keep the returned
/// listener alive for as long as the subscription should hold.
pub fn watch(on_change: Callback<Theme>) -> EventListener {
    let window = web_sys::window().expect("no global `window` exists");
    EventListener::new(&window, "storage", move |event| {
        let Some(event) = event.dyn_ref::<StorageEvent>() else {
            return;
        };
        if event.key().as_deref() != Some(STORAGE_KEY) {
            return;
        }
        if let Some(theme) = event.new_value().as_deref().and_then(Theme::parse) {
            on_change.emit(theme);
        }
    })
}
