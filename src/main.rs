//! FrontEndFix Frontend Entry Point

mod app;
mod browser;
mod commands;
mod components;
mod config;
mod context;
mod markdown;
mod models;
mod notify;
mod pages;
mod resource;
mod routes;
mod session;
mod store;
mod theme;

use app::App;
use leptos::prelude::*;
use supabase_lite::Client;

fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("configuration error, app not mounted: {}", e);
            return;
        }
    };
    log::info!("starting against {}", config.url());

    mount_to_body(move || view! { <App client=Client::new(config) /> });
}
