//! Light/dark theme, persisted and applied as the `dark` class on `<html>`.

use leptos::prelude::*;

use crate::browser;

const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Stored choice wins; otherwise follow the system preference.
    pub fn resolve(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored {
            Some("dark") => Theme::Dark,
            Some("light") => Theme::Light,
            _ if prefers_dark => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Clone, Copy)]
pub struct ThemeState {
    theme: RwSignal<Theme>,
}

impl ThemeState {
    pub fn init() -> Self {
        let theme = Theme::resolve(browser::storage_get(STORAGE_KEY).as_deref(), browser::prefers_dark());
        apply(theme);
        Self { theme: RwSignal::new(theme) }
    }

    pub fn get(&self) -> Theme {
        self.theme.get()
    }

    pub fn toggle(&self) {
        let next = self.theme.get_untracked().toggled();
        self.theme.set(next);
        browser::storage_set(STORAGE_KEY, next.as_str());
        apply(next);
    }
}

fn apply(theme: Theme) {
    let Some(root) = browser::document_root() else { return };
    let classes = root.class_list();
    let result = match theme {
        Theme::Dark => classes.add_1("dark"),
        Theme::Light => classes.remove_1("dark"),
    };
    if let Err(e) = result {
        log::warn!("could not apply theme: {:?}", e);
    }
}
