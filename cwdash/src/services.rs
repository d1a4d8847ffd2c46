use std::{future::Future, sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::api::chatwoot::{ChatwootApi, ChatwootClient};
use crate::bootstrap::WidgetBootstrap;
use crate::cli::Args;
use crate::config::DashboardConfig;
use crate::dashboard::{Commit, Dashboard};
use crate::pagination;
use crate::presenter::{self, LOADING_MESSAGE, OutputFormat};
use crate::settings;

/// Output options shared by both run modes.
#[derive(Debug, Clone, Copy)]
struct View {
    format: OutputFormat,
    dedupe: bool,
}

impl View {
    fn print(&self, dashboard: &Dashboard) -> Result<()> {
        let state = dashboard.render_state(Utc::now(), self.dedupe);
        if let Some(output) = presenter::render(&state, self.format)? {
            println!("{}", output);
        }
        Ok(())
    }
}

pub async fn run(args: Args) -> Result<()> {
    let args = settings::merge_settings_with_args(&args)?;

    run_dashboard(&args, |config| {
        ChatwootClient::new(config).context("Failed to build helpdesk client")
    })
    .await
}

/// Runs the dashboard against the API returned by `connect`.
///
/// `connect` is only called once the widget is ready and a credential is
/// configured; otherwise the empty state is rendered and nothing is requested.
pub async fn run_dashboard<A, C>(args: &Args, connect: C) -> Result<()>
where
    A: ChatwootApi + 'static,
    C: FnOnce(&DashboardConfig) -> Result<A>,
{
    let view = View {
        format: args.format,
        dedupe: args.dedupe,
    };

    let bootstrap = WidgetBootstrap::load(args.widget_payload.as_deref());
    if !bootstrap.ready {
        let reason = bootstrap
            .error
            .unwrap_or_else(|| "widget did not report ready".to_string());
        error!("{}", reason);
        view.print(&Dashboard::new())?;
        bail!("widget bootstrap failed: {}", reason);
    }

    // captured once; refreshes keep using it
    let account_id = bootstrap.account_id(args.configured_account_id());
    let config = args.dashboard_config(account_id);

    if !config.has_credential() {
        warn!("no API token configured, conversations will not be fetched");
        view.print(&Dashboard::new())?;
        return Ok(());
    }

    let api = connect(&config)?;
    info!(
        "listing conversations of account {} at {}",
        config.account_id, config.base_url
    );

    match args.refresh_interval() {
        Some(interval) => {
            let term = Term::stdout();
            watch(Arc::new(api), &config, interval, ctrl_c(), |dashboard| {
                term.clear_screen()?;
                view.print(dashboard)
            })
            .await
        }
        None => run_once(&api, &config, view).await,
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("interrupted, stopping refresh");
}

fn loading_spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message(LOADING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

async fn run_once<A>(api: &A, config: &DashboardConfig, view: View) -> Result<()>
where
    A: ChatwootApi + ?Sized,
{
    let mut dashboard = Dashboard::new();
    let generation = dashboard.begin_fetch();

    let spinner = loading_spinner()?;
    let result = pagination::fetch_all_conversations_with_progress(
        api,
        config.account_id,
        &config.limits(),
        |meta, _| {
            spinner.set_message(format!(
                "{} {}/{}",
                LOADING_MESSAGE, meta.current_page, meta.total_pages
            ))
        },
    )
    .await;
    spinner.finish_and_clear();

    let commit = dashboard.complete(generation, result);
    view.print(&dashboard)?;

    match commit {
        Commit::Failed(e) => Err(e.into()),
        Commit::Applied(_) | Commit::Stale => Ok(()),
    }
}

/// Refetches on every tick of `interval` until `shutdown` resolves.
///
/// A tick that arrives while the previous fetch is still loading is skipped,
/// so at most one fetch is in flight and a slow server still gets its result
/// committed. `on_change` runs after every state change.
pub async fn watch<A, S, F>(
    api: Arc<A>,
    config: &DashboardConfig,
    interval: Duration,
    shutdown: S,
    mut on_change: F,
) -> Result<()>
where
    A: ChatwootApi + 'static,
    S: Future<Output = ()>,
    F: FnMut(&Dashboard) -> Result<()>,
{
    let limits = config.limits();
    let account_id = config.account_id;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    let mut dashboard = Dashboard::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if dashboard.is_loading() {
                    debug!("previous fetch still running, skipping refresh");
                    continue;
                }

                let generation = dashboard.begin_fetch();
                let api = Arc::clone(&api);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result =
                        pagination::fetch_all_conversations(api.as_ref(), account_id, &limits)
                            .await;
                    // receiver is gone only during shutdown
                    let _ = tx.send((generation, result));
                });
            }
            Some((generation, result)) = rx.recv() => {
                if let Commit::Stale = dashboard.complete(generation, result) {
                    continue;
                }
            }
            _ = &mut shutdown => break,
        }

        on_change(&dashboard)?;
    }

    Ok(())
}
