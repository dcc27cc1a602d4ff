//! Plot mode: render the trailing-window series for one platform to a PNG.

use std::path::Path;

use plotters::prelude::*;
use sqlx::SqlitePool;

use scoretrack_db::{query_window, SeriesSet};

const CHART_SIZE: (u32, u32) = (1024, 768);

/// Queries the trailing window for `platform` and writes a line chart to
/// `output`, one line per nick over the aligned date axis.
///
/// # Errors
///
/// Returns an error if the query fails, the window holds no observations,
/// or the chart cannot be rendered.
pub(crate) async fn run_plot(
    pool: &SqlitePool,
    platform: &str,
    days: u32,
    output: &Path,
) -> anyhow::Result<()> {
    let series = query_window(pool, platform, days).await?;
    if series.is_empty() {
        anyhow::bail!("no observations for platform '{platform}' in the last {days} days");
    }

    render_chart(&series, platform, output)?;
    tracing::info!(
        platform = %platform,
        nicks = series.scores.len(),
        days = series.dates.len(),
        output = %output.display(),
        "chart written"
    );
    Ok(())
}

/// Single static render; dates map onto integer x positions so the axis
/// stays evenly spaced regardless of gaps between observation days.
fn render_chart(series: &SeriesSet, platform: &str, output: &Path) -> anyhow::Result<()> {
    let x_max = i32::try_from(series.dates.len())? - 1;
    let y_peak = series
        .scores
        .values()
        .flat_map(|values| values.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1);

    let root = BitMapBackend::new(output, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(platform, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_max.max(1), 0..y_peak + y_peak / 10 + 1)?;

    let dates = series.dates.clone();
    chart
        .configure_mesh()
        .x_labels(series.dates.len())
        .x_label_formatter(&move |x| {
            usize::try_from(*x)
                .ok()
                .and_then(|i| dates.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .y_desc("score")
        .draw()?;

    for (idx, (nick, values)) in series.scores.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        let points: Vec<(i32, i64)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i32::try_from(i).unwrap_or(i32::MAX), *v))
            .collect();
        let peak = values.iter().copied().max().unwrap_or(0);

        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(format!("{nick} ({peak})"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
