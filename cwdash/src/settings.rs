use std::{
    env,
    path::{Path, PathBuf},
};

use config::{Config, File};
use log::debug;
use serde::Deserialize;

use crate::cli::Args;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub account_id: Option<u64>,
    pub per_page: Option<u32>,
    pub max_pages: Option<u32>,
    pub max_elapsed_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub refresh_secs: Option<u64>,
}

const CONFIG_DIR_NAME: &str = env!("CARGO_PKG_NAME");

// XDG_CONFIG_HOME, falling back to $HOME/.config
fn get_xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config));
    }

    if let Ok(home) = env::var("HOME") {
        return Some(PathBuf::from(home).join(".config"));
    }

    None
}

pub fn config_file_path() -> Option<PathBuf> {
    get_xdg_config_path().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
}

pub fn load_settings(config_path: &Path) -> anyhow::Result<Settings> {
    if !config_path.exists() {
        return Ok(Settings::default());
    }

    Config::builder()
        .add_source(File::from(config_path).required(false))
        .build()?
        .try_deserialize()
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to deserialize config file {}: {}",
                config_path.display(),
                e
            )
        })
}

/// Fills every option not given on the command line or environment from the settings.
pub fn apply_settings(args: &Args, settings: Settings) -> Args {
    let mut new_args = args.clone();

    macro_rules! apply_if_unset {
        ($field:ident) => {
            apply_if_unset!($field, $field)
        };
        ($field:ident, $setting:ident) => {
            if new_args.$field.is_none() {
                new_args.$field = settings.$setting.clone();
            }
        };
    }

    apply_if_unset!(base_url);
    apply_if_unset!(token);
    apply_if_unset!(account_id);
    apply_if_unset!(per_page);
    apply_if_unset!(max_pages);
    apply_if_unset!(max_elapsed, max_elapsed_secs);
    apply_if_unset!(request_timeout, request_timeout_secs);
    apply_if_unset!(refresh, refresh_secs);

    new_args
}

pub fn merge_settings_with_args(args: &Args) -> anyhow::Result<Args> {
    let settings = match config_file_path() {
        Some(config_path) => load_settings(&config_path)?,
        None => Settings::default(),
    };

    let new_args = apply_settings(args, settings);

    debug!(
        "merged config: base_url={:?} account_id={:?} token set={}",
        new_args.base_url,
        new_args.account_id,
        new_args.token.as_deref().is_some_and(|t| !t.is_empty())
    );

    Ok(new_args)
}
