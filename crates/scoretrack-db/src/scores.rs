//! Database operations for the `score` table.

use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::DbError;

/// One (day, nick) aggregate from the trailing query window.
#[derive(Debug, Clone, sqlx::FromRow)]
struct DailyScore {
    /// `date(timestamp)` — calendar day as `YYYY-MM-DD`.
    day: String,
    nick: String,
    score: i64,
}

/// Date-aligned per-nick score series for one platform.
///
/// Invariant: every sequence in `scores` has length `dates.len()` and is
/// aligned index-for-index with `dates` (ascending). Nicks that joined
/// tracking later are left-padded with zeros, which makes "no data yet"
/// indistinguishable from a real zero score — acceptable for monotonically
/// increasing metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesSet {
    /// Distinct observation days, ascending.
    pub dates: Vec<String>,
    /// Nick → day-ascending per-day maximum scores.
    pub scores: BTreeMap<String, Vec<i64>>,
}

impl SeriesSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Appends one observation. The timestamp is taken by the store at insert
/// time; rows are never updated or deleted.
///
/// `score` is `None` when the collection attempt produced no parseable
/// value; the row still records that the attempt happened.
///
/// Returns the id of the inserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails. The caller decides whether
/// to continue with the next nick.
pub async fn insert_score(
    pool: &SqlitePool,
    platform: &str,
    nick: &str,
    score: Option<i64>,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO score (platform, nick, score) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(platform)
    .bind(nick)
    .bind(score)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Per-day maximum score per nick for `platform` over the trailing
/// `days`-day window, normalized into a [`SeriesSet`].
///
/// Rows with a NULL score (failed extractions) are excluded from the
/// aggregation. The result is recomputed fresh on every call.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn query_window(
    pool: &SqlitePool,
    platform: &str,
    days: u32,
) -> Result<SeriesSet, DbError> {
    let window = format!("-{days} days");
    let rows = sqlx::query_as::<_, DailyScore>(
        "SELECT date(timestamp) AS day, nick, MAX(score) AS score \
         FROM score \
         WHERE platform = ?1 \
           AND score IS NOT NULL \
           AND timestamp > datetime('now', ?2) \
         GROUP BY day, nick \
         ORDER BY day, nick",
    )
    .bind(platform)
    .bind(&window)
    .fetch_all(pool)
    .await?;

    Ok(build_series_set(&rows))
}

/// Fold day-ordered aggregates into a date-aligned, zero-padded series set.
fn build_series_set(rows: &[DailyScore]) -> SeriesSet {
    let mut dates: Vec<String> = Vec::new();
    let mut scores: BTreeMap<String, Vec<i64>> = BTreeMap::new();

    // Rows arrive day-ascending, so a new day always differs from the last.
    for row in rows {
        if dates.last().map(String::as_str) != Some(row.day.as_str()) {
            dates.push(row.day.clone());
        }
        scores.entry(row.nick.clone()).or_default().push(row.score);
    }

    // Left-pad nicks that lack leading days so every sequence lines up with
    // the date axis.
    let axis_len = dates.len();
    for series in scores.values_mut() {
        if series.len() < axis_len {
            let mut padded = vec![0; axis_len - series.len()];
            padded.append(series);
            *series = padded;
        }
    }

    SeriesSet { dates, scores }
}
