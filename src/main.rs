//! Prefbind - preference inspector
//!
//! Opens the user's preference store, loads every setting group and prints
//! each setting with its current value.

use std::sync::Arc;

use {
    prefbind::{
        AppDefaults, JsonPreferenceStore, RestCredentials, SETTING_TABLE, SettingsRegistry,
        error::ResultExt,
    },
    tracing::info,
    tracing_subscriber::EnvFilter,
};

/// Main entry point for the preference inspector.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = JsonPreferenceStore::open_default().add_context("Opening preference store")?;
    info!("Using preferences at {}", store.path().display());

    let mut credentials = RestCredentials::default();
    let registry =
        SettingsRegistry::initialize(Arc::new(store), &AppDefaults::from_env(), &mut credentials);

    for ((key, value), spec) in registry.entries().into_iter().zip(&SETTING_TABLE) {
        println!("{:<10} {:<24} {}", spec.group.as_str(), key, value);
    }
    println!(
        "REST credentials: {}",
        if credentials.is_empty() { "unset" } else { "set" }
    );

    Ok(())
}
