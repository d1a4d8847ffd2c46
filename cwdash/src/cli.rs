use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::config::{self, DashboardConfig};
use crate::presenter::OutputFormat;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Helpdesk server URL [default: https://suporte.amssergipe.com.br]
    #[arg(long, env = "CHATWOOT_BASE_URL")]
    pub base_url: Option<String>,

    /// API access token, sent as the Authorization header. Nothing is fetched without it
    #[arg(long, env = "CHATWOOT_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Account to list conversations for, unless the widget payload names one [default: 1]
    #[arg(long, env = "CHATWOOT_ACCOUNT_ID")]
    pub account_id: Option<u64>,

    /// JSON payload reported by the chat widget once loaded
    #[arg(long, value_name = "FILE")]
    pub widget_payload: Option<PathBuf>,

    /// Conversations requested per page [default: 20]
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Give up when the listing has more pages than this [default: 500]
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Give up when fetching all pages takes longer than this [default: 300]
    #[arg(long, value_name = "SECONDS")]
    pub max_elapsed: Option<u64>,

    /// Timeout of a single page request [default: 30]
    #[arg(long, value_name = "SECONDS")]
    pub request_timeout: Option<u64>,

    /// Keep running and refetch on this interval
    #[arg(long, value_name = "SECONDS")]
    pub refresh: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Show a conversation only once when pages overlap
    #[arg(long)]
    pub dedupe: bool,

    /// Log verbosity
    #[arg(short, long, value_name = "LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Resolves the remaining options against the built-in defaults.
    pub fn dashboard_config(&self, account_id: u64) -> DashboardConfig {
        let defaults = DashboardConfig::default();

        DashboardConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            credential: self.token.clone().unwrap_or(defaults.credential),
            account_id,
            per_page: self.per_page.unwrap_or(defaults.per_page).max(1),
            max_pages: self.max_pages.unwrap_or(defaults.max_pages).max(1),
            max_elapsed: self
                .max_elapsed
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_elapsed),
            request_timeout: self
                .request_timeout
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    pub fn configured_account_id(&self) -> u64 {
        self.account_id.unwrap_or(config::DEFAULT_ACCOUNT_ID)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}
