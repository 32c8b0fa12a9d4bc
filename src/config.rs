//! Build-time configuration.
//!
//! `SUPABASE_URL` and `SUPABASE_ANON_KEY` are baked in when the bundle is built.

use supabase_lite::config::{ANON_KEY_VAR, URL_VAR};
use supabase_lite::{ClientConfig, ConfigError};

fn build_env(name: &str) -> Option<String> {
    let value = match name {
        URL_VAR => option_env!("SUPABASE_URL"),
        ANON_KEY_VAR => option_env!("SUPABASE_ANON_KEY"),
        _ => None,
    };
    value.map(str::to_string)
}

pub fn load() -> Result<ClientConfig, ConfigError> {
    ClientConfig::from_lookup(build_env)
}
