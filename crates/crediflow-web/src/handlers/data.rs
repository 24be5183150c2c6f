//! Dataset visualization — full table, describe, histogram, correlation.
//!
//! The CSV is re-read on every request; the selected histogram column
//! travels as a GET query parameter so the page stays stateless.

use axum::{
    extract::{Query, State},
    response::Html,
};
use crediflow_common::CrediflowError;
use crediflow_dataset::{ColumnStats, CorrelationMatrix, Dataset, Histogram};
use serde::Deserialize;
use tracing::warn;

use crate::handlers::{escape_html, NAV_HTML};
use crate::state::SharedState;

/// Bin count for the histogram, matching the original visualization.
pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Deserialize)]
pub struct DataQuery {
    pub column: Option<String>,
}

pub async fn data_page(
    State(state): State<SharedState>,
    Query(query): Query<DataQuery>,
) -> Html<String> {
    let path = state.config.dataset.csv_path.clone();
    match Dataset::from_path(&path) {
        Ok(dataset) => Html(render_data_page(&dataset, query.column.as_deref())),
        Err(err) => {
            warn!("Dataset {} could not be loaded: {}", path, err);
            Html(render_load_error(&path, &err))
        }
    }
}

fn page_shell(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Data Visualization — Crediflow</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
<div class="app-container">
{NAV_HTML}
<main class="main-content">
    <div class="page-header">
        <div>
            <h1 class="page-title">📊 Data Visualization</h1>
            <p class="text-muted">Dataset overview, statistics, histogram and correlation</p>
        </div>
    </div>
{body}
</main>
</div>
</body>
</html>"#
    )
}

fn render_load_error(path: &str, err: &CrediflowError) -> String {
    page_shell(&format!(
        r#"<div class="alert alert-danger">❌ The dataset file <code>{}</code> could not be loaded: {}</div>"#,
        escape_html(path),
        escape_html(&err.to_string())
    ))
}

fn render_data_page(dataset: &Dataset, requested_column: Option<&str>) -> String {
    let numeric = dataset.numeric_columns();

    // Fall back to the first numeric column when the query names a column
    // that is missing or not numeric.
    let selected = requested_column
        .filter(|name| numeric.iter().any(|c| c.name() == *name))
        .or_else(|| numeric.first().map(|c| c.name()));

    let histogram_html = match selected {
        Some(column) => match dataset.histogram(column, HISTOGRAM_BINS) {
            Ok(hist) => format!(
                "{}\n{}",
                render_column_selector(&numeric.iter().map(|c| c.name()).collect::<Vec<_>>(), column),
                render_histogram_svg(&hist)
            ),
            Err(err) => format!(
                r#"<div class="alert alert-danger">Histogram failed: {}</div>"#,
                escape_html(&err.to_string())
            ),
        },
        None => {
            r#"<div class="alert alert-warning">⚠️ No numeric columns available for a histogram.</div>"#
                .to_string()
        }
    };

    let body = format!(
        r#"<div class="alert alert-success">✅ Dataset loaded: {rows} rows, {cols} columns.</div>

    <div class="card">
        <div class="card-header">🧾 Full data</div>
        <div class="table-container table-scroll">{table}</div>
    </div>

    <div class="card">
        <div class="card-header">📌 Descriptive statistics</div>
        <div class="table-container">{describe}</div>
    </div>

    <div class="card">
        <div class="card-header">📊 Histogram</div>
        {histogram}
    </div>

    <div class="card">
        <div class="card-header">📈 Correlation matrix</div>
        {correlation}
    </div>"#,
        rows = dataset.row_count(),
        cols = dataset.columns().len(),
        table = render_table(dataset),
        describe = render_describe(&dataset.describe()),
        histogram = histogram_html,
        correlation = render_correlation(&dataset.correlation_matrix()),
    );

    page_shell(&body)
}

fn render_table(dataset: &Dataset) -> String {
    let header: String = dataset
        .columns()
        .iter()
        .map(|c| format!("<th>{}</th>", escape_html(c.name())))
        .collect();

    let rows: String = (0..dataset.row_count())
        .map(|r| {
            let cells: String = dataset
                .columns()
                .iter()
                .map(|c| {
                    let cell = c.raw_values().get(r).map(String::as_str).unwrap_or("");
                    format!("<td>{}</td>", escape_html(cell))
                })
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    format!(r#"<table class="table"><thead><tr>{header}</tr></thead><tbody>{rows}</tbody></table>"#)
}

fn fmt_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.2}")
    }
}

fn render_describe(described: &[(String, ColumnStats)]) -> String {
    if described.is_empty() {
        return r#"<p class="text-muted">No numeric columns to describe.</p>"#.to_string();
    }

    let header: String = described
        .iter()
        .map(|(name, _)| format!("<th>{}</th>", escape_html(name)))
        .collect();

    let rows: [(&str, fn(&ColumnStats) -> String); 8] = [
        ("count", |s| s.count.to_string()),
        ("mean", |s| fmt_stat(s.mean)),
        ("std", |s| fmt_stat(s.std)),
        ("min", |s| fmt_stat(s.min)),
        ("25%", |s| fmt_stat(s.q25)),
        ("50%", |s| fmt_stat(s.median)),
        ("75%", |s| fmt_stat(s.q75)),
        ("max", |s| fmt_stat(s.max)),
    ];

    let body: String = rows
        .iter()
        .map(|(label, f)| {
            let cells: String = described
                .iter()
                .map(|(_, stats)| format!("<td>{}</td>", f(stats)))
                .collect();
            format!("<tr><th>{label}</th>{cells}</tr>")
        })
        .collect();

    format!(r#"<table class="table"><thead><tr><th></th>{header}</tr></thead><tbody>{body}</tbody></table>"#)
}

fn render_column_selector(columns: &[&str], selected: &str) -> String {
    let options: String = columns
        .iter()
        .map(|name| {
            let sel = if *name == selected { " selected" } else { "" };
            format!(
                r#"<option value="{v}"{sel}>{v}</option>"#,
                v = escape_html(name)
            )
        })
        .collect();

    format!(
        r#"<form method="GET" action="/data" class="selector-form">
        <label for="column">🧮 Numeric column:</label>
        <select id="column" name="column" class="form-control" onchange="this.form.submit()">{options}</select>
        <noscript><button type="submit" class="btn btn-outline">Show</button></noscript>
    </form>"#
    )
}

fn render_histogram_svg(hist: &Histogram) -> String {
    const WIDTH: f64 = 720.0;
    const HEIGHT: f64 = 280.0;
    const BASELINE: f64 = 250.0;

    if hist.bins.is_empty() {
        return r#"<p class="text-muted">No values to plot.</p>"#.to_string();
    }

    let max_count = hist.max_count().max(1) as f64;
    let bar_width = WIDTH / hist.bins.len() as f64;

    let bars: String = hist
        .bins
        .iter()
        .enumerate()
        .map(|(i, bin)| {
            let h = (bin.count as f64 / max_count) * (BASELINE - 20.0);
            let x = i as f64 * bar_width;
            format!(
                r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="hist-bar"><title>[{lo:.2}, {hi:.2}): {count}</title></rect>"#,
                x = x + 1.0,
                y = BASELINE - h,
                w = (bar_width - 2.0).max(1.0),
                h = h,
                lo = bin.lo,
                hi = bin.hi,
                count = bin.count,
            )
        })
        .collect();

    let first = &hist.bins[0];
    let last = &hist.bins[hist.bins.len() - 1];

    format!(
        r#"<p class="chart-title">Histogram of {name}</p>
    <svg viewBox="0 0 {WIDTH} {HEIGHT}" class="histogram" role="img" aria-label="Histogram of {name}">
        {bars}
        <line x1="0" y1="{BASELINE}" x2="{WIDTH}" y2="{BASELINE}" class="axis"/>
        <text x="0" y="{label_y}" class="axis-label">{lo:.1}</text>
        <text x="{WIDTH}" y="{label_y}" text-anchor="end" class="axis-label">{hi:.1}</text>
    </svg>"#,
        name = escape_html(&hist.column),
        bars = bars,
        label_y = BASELINE + 18.0,
        lo = first.lo,
        hi = last.hi,
    )
}

/// Blue for negative r, red for positive, fading to white at zero.
fn heat_color(r: f64) -> String {
    if r.is_nan() {
        return "#e5e7eb".to_string();
    }
    let t = r.clamp(-1.0, 1.0);
    let blend = |from: u8, to: u8, t: f64| (from as f64 + (to as f64 - from as f64) * t) as u8;
    let (red, green, blue) = if t >= 0.0 {
        (blend(255, 239, t), blend(255, 68, t), blend(255, 68, t))
    } else {
        (blend(255, 59, -t), blend(255, 130, -t), blend(255, 246, -t))
    };
    format!("rgb({red},{green},{blue})")
}

fn render_correlation(matrix: &CorrelationMatrix) -> String {
    if matrix.is_empty() {
        return r#"<p class="text-muted">No numeric columns to correlate.</p>"#.to_string();
    }

    let header: String = matrix
        .labels()
        .iter()
        .map(|name| format!(r#"<th class="rotate">{}</th>"#, escape_html(name)))
        .collect();

    let body: String = matrix
        .labels()
        .iter()
        .enumerate()
        .map(|(i, row_name)| {
            let cells: String = (0..matrix.labels().len())
                .map(|j| {
                    let r = matrix.get(i, j);
                    let text = if r.is_nan() {
                        "—".to_string()
                    } else {
                        format!("{r:.2}")
                    };
                    format!(
                        r#"<td style="background-color:{}">{}</td>"#,
                        heat_color(r),
                        text
                    )
                })
                .collect();
            format!("<tr><th>{}</th>{cells}</tr>", escape_html(row_name))
        })
        .collect();

    format!(
        r#"<div class="table-container"><table class="table heatmap"><thead><tr><th></th>{header}</tr></thead><tbody>{body}</tbody></table></div>"#
    )
}
