//! Collection mode: fetch → extract → persist for every configured nick.
//!
//! Strictly sequential. Per-nick failures are logged and skipped rather than
//! propagated so a single bad page or insert does not abort the full run;
//! the run as a whole only errors when no nick produced a score.

use std::time::Duration;

use sqlx::SqlitePool;

use scoretrack_core::Config;
use scoretrack_db::insert_score;
use scoretrack_scraper::{extract_score, PageClient};

const REQUEST_TIMEOUT_SECS: u64 = 15;
const USER_AGENT: &str = "scoretrack/0.1 (score tracker)";

/// Per-run counters. `succeeded` counts nicks whose page yielded a score;
/// `missing` counts pages fetched without a parseable score; `failed` counts
/// fetch and store errors.
#[derive(Debug, Default)]
pub(crate) struct CollectTotals {
    pub attempted: usize,
    pub succeeded: usize,
    pub missing: usize,
    pub failed: usize,
}

/// Runs collection across all configured platforms and nicks.
///
/// When `dry_run` is `true`, pages are still fetched and scores extracted and
/// logged, but nothing is written to the store.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, or if every attempted
/// nick failed to produce a score.
pub(crate) async fn run_collect(
    pool: &SqlitePool,
    config: &Config,
    dry_run: bool,
) -> anyhow::Result<CollectTotals> {
    let client = PageClient::new(REQUEST_TIMEOUT_SECS, USER_AGENT)?;
    let mut totals = CollectTotals::default();

    for (platform, platform_config) in &config.platforms {
        let pattern = platform_config.pattern()?;
        tracing::debug!(
            platform = %platform,
            regexp = %platform_config.regexp,
            "collecting platform"
        );

        for (nick, url) in &platform_config.nicks {
            totals.attempted += 1;

            match client.fetch_page(url).await {
                Ok(body) => {
                    let score = extract_score(&pattern, &body);
                    match score {
                        Some(value) => {
                            tracing::info!(
                                platform = %platform,
                                nick = %nick,
                                score = value,
                                "score collected"
                            );
                            totals.succeeded += 1;
                        }
                        None => {
                            tracing::warn!(
                                platform = %platform,
                                nick = %nick,
                                url = %url,
                                "no score matched on page"
                            );
                            totals.missing += 1;
                        }
                    }

                    if dry_run {
                        tracing::debug!(
                            platform = %platform,
                            nick = %nick,
                            "dry-run: skipping persistence"
                        );
                    } else if let Err(e) = insert_score(pool, platform, nick, score).await {
                        tracing::error!(
                            platform = %platform,
                            nick = %nick,
                            error = %e,
                            "failed to persist observation"
                        );
                        totals.failed += 1;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        platform = %platform,
                        nick = %nick,
                        url = %url,
                        error = %e,
                        "failed to fetch page"
                    );
                    totals.failed += 1;
                }
            }

            // Throttle between requests so remote hosts are not hammered.
            if let Some(delay) = platform_config.delay {
                if delay > 0 {
                    tokio::time::sleep(Duration::from_secs(delay)).await;
                }
            }
        }
    }

    if totals.failed > 0 {
        tracing::warn!(
            failed = totals.failed,
            attempted = totals.attempted,
            "some nicks failed during collection"
        );
    }

    if totals.attempted > 0 && totals.succeeded == 0 {
        anyhow::bail!(
            "all {} configured nicks failed to produce a score",
            totals.attempted
        );
    }

    Ok(totals)
}
