//! `watch` command handler.
//!
//! The default mode registers a repeating poll job and emits one JSON line
//! per cycle that found new comments; `--once` runs a single cycle for
//! host-managed scheduling. Cycle failures are logged, never fatal to the
//! running scheduler.

use std::sync::Arc;
use std::time::Duration;

use linkpulse_core::{AppConfig, ConfigError};
use linkpulse_engine::{detect_new_comments, CommentCycleResult, PollWindow};
use linkpulse_linkedin::LinkedinClient;
use tokio_cron_scheduler::{Job, JobScheduler};

/// Poll the tracked posts for new comments.
///
/// URNs passed on the command line override the configured watch list. An
/// empty list is not an error: each cycle logs the skip and emits nothing.
///
/// # Errors
///
/// Returns an error when the access token is missing (checked before any
/// network call), when a `--once` cycle fails, or when the scheduler cannot
/// be set up.
pub(crate) async fn run(config: &AppConfig, urns: Vec<String>, once: bool) -> anyhow::Result<()> {
    let access_token = config
        .access_token
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("LINKEDIN_ACCESS_TOKEN".to_string()))?;

    let targets = if urns.is_empty() {
        config.post_urns.clone()
    } else {
        urns
    };

    let client = LinkedinClient::with_base_url(
        access_token,
        &config.api_version,
        &config.user_agent,
        config.request_timeout_secs,
        &config.api_base_url,
    )?;

    if once {
        let window = PollWindow::starting_now(config.poll_interval_secs);
        if let Some(event) = detect_new_comments(&client, &targets, window).await? {
            print_event(&event)?;
        }
        return Ok(());
    }

    run_scheduler(client, targets, config.poll_interval_secs).await
}

/// Registers the repeating poll job and blocks until shutdown is requested.
async fn run_scheduler(
    client: LinkedinClient,
    targets: Vec<String>,
    interval_secs: u64,
) -> anyhow::Result<()> {
    let client = Arc::new(client);
    let targets = Arc::new(targets);

    let mut scheduler = JobScheduler::new().await?;
    let job = Job::new_repeated_async(
        Duration::from_secs(interval_secs),
        move |uuid, mut lock| {
            let client = Arc::clone(&client);
            let targets = Arc::clone(&targets);

            Box::pin(async move {
                tracing::info!("scheduler: starting comment poll cycle");
                let window = PollWindow::starting_now(interval_secs);
                match detect_new_comments(&client, &targets, window).await {
                    Ok(Some(event)) => {
                        if let Err(e) = print_event(&event) {
                            tracing::error!(error = %e, "scheduler: failed to emit event");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!(error = %e, "scheduler: comment poll cycle failed");
                    }
                }
                match lock.next_tick_for_job(uuid).await {
                    Ok(Some(next)) => {
                        tracing::info!(next_poll = %next, "scheduler: comment poll cycle complete");
                    }
                    _ => tracing::info!("scheduler: comment poll cycle complete"),
                }
            })
        },
    )?;
    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(interval_secs, "scheduler: watching for new comments");
    shutdown_signal().await;

    scheduler.shutdown().await?;
    Ok(())
}

fn print_event(event: &CommentCycleResult) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping the watch scheduler");
}
