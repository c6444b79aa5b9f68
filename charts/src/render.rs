//! The chart set. Every renderer is side-effect-only: `Ok(Some(path))` on
//! success, `Ok(None)` when the required series is empty (logged, no file),
//! `Err` only for local rendering/IO failures.

use anyhow::Result;
use hubcore::abbreviate_count;
use hubcore::aggregate::merge;
use hubcore::classify::OTHER_CATEGORY;
use hubcore::{ModelRecord, Snapshot};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

use crate::trend::TrendTable;

/// Category palette shared across all charts.
const CATEGORY_COLORS: &[(&str, RGBColor)] = &[
    ("Language Models", RGBColor(0xFF, 0x6B, 0x6B)),
    ("Multimodal", RGBColor(0x4E, 0xCD, 0xC4)),
    ("Image Generation", RGBColor(0x45, 0xB7, 0xD1)),
    ("Video Generation", RGBColor(0x96, 0xCE, 0xB4)),
    ("Speech Synthesis", RGBColor(0xFF, 0xD3, 0x6B)),
    ("Speech Recognition", RGBColor(0xDD, 0xA0, 0xDD)),
    ("Document Understanding", RGBColor(0x98, 0xD8, 0xC8)),
    ("Embeddings", RGBColor(0xE8, 0xC5, 0x4A)),
    ("Image Understanding", RGBColor(0xBB, 0x8F, 0xCE)),
    ("Other", RGBColor(0xAE, 0xB6, 0xBF)),
];

const FALLBACK_COLOR: RGBColor = RGBColor(0xAE, 0xB6, 0xBF);

fn category_color(category: Option<&str>) -> RGBColor {
    let name = category.unwrap_or(OTHER_CATEGORY);
    CATEGORY_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

fn record_color(record: &ModelRecord) -> RGBColor {
    category_color(record.tech_category.as_deref())
}

fn truncate_label(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(max).collect();
        short.push_str("..");
        short
    }
}

/// Top trending models, two horizontal bar panels: downloads and likes.
pub fn leaderboard(snapshot: &Snapshot, out_dir: &Path) -> Result<Option<PathBuf>> {
    let top: Vec<&ModelRecord> = snapshot.trending_models.iter().take(10).collect();
    if top.is_empty() {
        tracing::info!("no trending models, skipping leaderboard");
        return Ok(None);
    }
    let path = out_dir.join(format!("leaderboard_{}.png", snapshot.date));

    let root = BitMapBackend::new(&path, (1600, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(&format!("Top Models - {}", snapshot.date), ("sans-serif", 28))?;
    let (left, right) = root.split_horizontally(800);

    let downloads: Vec<(String, u64, RGBColor)> = top
        .iter()
        .map(|m| (truncate_label(m.name(), 25), m.downloads, record_color(m)))
        .collect();
    let likes: Vec<(String, u64, RGBColor)> = top
        .iter()
        .map(|m| (truncate_label(m.name(), 25), m.likes, record_color(m)))
        .collect();

    draw_bar_panel(&left, "By Downloads", "Downloads", &downloads, true)?;
    draw_bar_panel(&right, "By Likes", "Likes", &likes, false)?;
    root.present()?;
    Ok(Some(path.clone()))
}

/// Category distribution: pie on the left, bars on the right.
pub fn tech_distribution(snapshot: &Snapshot, out_dir: &Path) -> Result<Option<PathBuf>> {
    let dist = &snapshot.statistics.tech_distribution;
    if dist.is_empty() {
        tracing::info!("no category data, skipping distribution chart");
        return Ok(None);
    }
    let path = out_dir.join(format!("tech_distribution_{}.png", snapshot.date));

    let mut entries: Vec<(&String, &u64)> = dist.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));

    let sizes: Vec<f64> = entries.iter().map(|(_, count)| **count as f64).collect();
    let colors: Vec<RGBColor> = entries
        .iter()
        .map(|(name, _)| category_color(Some(name.as_str())))
        .collect();
    let labels: Vec<String> = entries.iter().map(|(name, _)| name.to_string()).collect();

    let root = BitMapBackend::new(&path, (1400, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        &format!("Category Distribution - {}", snapshot.date),
        ("sans-serif", 26),
    )?;
    let (left, right) = root.split_horizontally(700);

    let center = (350, 330);
    let radius = 250.0;
    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 15).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 13).into_font().color(&BLACK));
    left.draw(&pie)?;

    let bars: Vec<(String, u64, RGBColor)> = entries
        .iter()
        .map(|(name, count)| (name.to_string(), **count, category_color(Some(name.as_str()))))
        .collect();
    draw_bar_panel(&right, "Count per Category", "Models", &bars, false)?;
    root.present()?;
    Ok(Some(path.clone()))
}

/// Downloads vs likes scatter over the union of the snapshot lists; bubble
/// size follows likes, color follows category.
pub fn bubble_chart(snapshot: &Snapshot, out_dir: &Path) -> Result<Option<PathBuf>> {
    let union = merge(vec![
        snapshot.trending_models.clone(),
        snapshot.most_downloaded.iter().take(10).cloned().collect(),
        snapshot.most_liked.iter().take(10).cloned().collect(),
    ]);
    let models: Vec<&ModelRecord> = union.iter().take(20).collect();
    if models.len() < 3 {
        tracing::info!(count = models.len(), "not enough models for the bubble chart");
        return Ok(None);
    }
    let path = out_dir.join(format!("bubble_chart_{}.png", snapshot.date));

    let max_x = models.iter().map(|m| m.downloads).max().unwrap_or(0).max(1) as f64 * 1.1;
    let max_y = models.iter().map(|m| m.likes).max().unwrap_or(0).max(1) as f64 * 1.15;

    let root = BitMapBackend::new(&path, (1400, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Model Popularity - {}", snapshot.date), ("sans-serif", 26))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..max_x, 0f64..max_y)?;
    chart
        .configure_mesh()
        .x_desc("Downloads")
        .y_desc("Likes")
        .x_label_formatter(&|v: &f64| abbreviate_count(*v as u64))
        .label_style(("sans-serif", 14))
        .draw()?;

    // one series per category so the legend carries one entry each
    let mut categories: Vec<&str> = models
        .iter()
        .map(|m| m.tech_category.as_deref().unwrap_or(OTHER_CATEGORY))
        .collect();
    categories.sort_unstable();
    categories.dedup();

    for category in categories {
        let color = category_color(Some(category));
        chart
            .draw_series(
                models
                    .iter()
                    .filter(|m| m.tech_category.as_deref().unwrap_or(OTHER_CATEGORY) == category)
                    .map(|m| {
                        Circle::new(
                            (m.downloads as f64, m.likes as f64),
                            bubble_radius(m.likes),
                            color.mix(0.6).filled(),
                        )
                    }),
            )?
            .label(category)
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(Some(path.clone()))
}

fn bubble_radius(likes: u64) -> i32 {
    ((likes as f64).sqrt() * 0.8).clamp(4.0, 40.0) as i32
}

/// Most active organizations, top 15 horizontal bars.
pub fn org_ranking(snapshot: &Snapshot, out_dir: &Path) -> Result<Option<PathBuf>> {
    let orgs = &snapshot.statistics.top_organizations;
    if orgs.is_empty() {
        tracing::info!("no organization data, skipping ranking chart");
        return Ok(None);
    }
    let path = out_dir.join(format!("org_ranking_{}.png", snapshot.date));

    let top: Vec<_> = orgs.iter().take(15).collect();
    let n = top.len().max(1);
    let bars: Vec<(String, u64, RGBColor)> = top
        .iter()
        .enumerate()
        .map(|(i, org)| {
            // graded hue keeps adjacent bars distinguishable
            let t = i as f64 / n as f64;
            let (r, g, b) = HSLColor(0.55 - 0.30 * t, 0.55, 0.45).rgb();
            (org.name.clone(), org.count, RGBColor(r, g, b))
        })
        .collect();

    let root = BitMapBackend::new(&path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        &format!("Active Organizations - {}", snapshot.date),
        ("sans-serif", 26),
    )?;
    draw_bar_panel(&root, "", "Model Count", &bars, false)?;
    root.present()?;
    Ok(Some(path.clone()))
}

/// Frequency-weighted keyword layout: font size scales with count, words
/// flow left to right and wrap into rows.
pub fn wordcloud(snapshot: &Snapshot, out_dir: &Path) -> Result<Option<PathBuf>> {
    let keywords = &snapshot.statistics.tech_keywords;
    if keywords.is_empty() {
        tracing::info!("no keyword data, skipping word cloud");
        return Ok(None);
    }
    let path = out_dir.join(format!("wordcloud_{}.png", snapshot.date));

    const WIDTH: i32 = 1200;
    const HEIGHT: i32 = 600;
    let root = BitMapBackend::new(&path, (WIDTH as u32, HEIGHT as u32)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        &format!("Tech Keywords - {}", snapshot.date),
        ("sans-serif", 26),
    )?;

    let max = keywords.iter().map(|k| k.count).max().unwrap_or(1).max(1) as f64;
    let palette: Vec<RGBColor> = CATEGORY_COLORS.iter().map(|(_, c)| *c).collect();

    let mut x = 30;
    let mut y = 60;
    let mut row_height = 0;
    for (i, keyword) in keywords.iter().enumerate() {
        let size = 14 + ((keyword.count as f64 / max) * 46.0) as i32;
        // rough glyph-width estimate, enough for a flow layout
        let width = keyword.keyword.chars().count() as i32 * size * 6 / 10 + 18;
        if x + width > WIDTH - 30 {
            x = 30;
            y += row_height + 16;
            row_height = 0;
        }
        if y > HEIGHT - 80 {
            break;
        }
        let color = palette[i % palette.len()];
        root.draw(&Text::new(
            keyword.keyword.clone(),
            (x, y),
            ("sans-serif", size).into_font().color(&color),
        ))?;
        x += width;
        row_height = row_height.max(size);
    }
    root.present()?;
    Ok(Some(path.clone()))
}

/// One line per category across the archived snapshot history.
pub fn trend_chart(table: &TrendTable, date: &str, out_dir: &Path) -> Result<Option<PathBuf>> {
    if table.dates.len() < 2 || table.categories.is_empty() {
        tracing::info!(dates = table.dates.len(), "not enough history for the trend chart");
        return Ok(None);
    }
    let path = out_dir.join(format!("trend_chart_{date}.png"));

    let max = table.rows.iter().flatten().copied().max().unwrap_or(0).max(1) as f64;
    let n = table.dates.len();

    let root = BitMapBackend::new(&path, (1400, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Category Trends - {date}"), ("sans-serif", 26))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..(n - 1) as f64, 0f64..max * 1.1)?;
    chart
        .configure_mesh()
        .x_labels(n)
        .x_label_formatter(&|v: &f64| table.dates.get(v.round() as usize).cloned().unwrap_or_default())
        .y_desc("Models")
        .label_style(("sans-serif", 13))
        .draw()?;

    for (col, category) in table.categories.iter().enumerate() {
        let color = category_color(Some(category.as_str()));
        chart
            .draw_series(LineSeries::new(
                table
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(row, counts)| (row as f64, counts[col] as f64)),
                color.stroke_width(2),
            ))?
            .label(category.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2)));
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(Some(path.clone()))
}

/// Horizontal bars, highest value on top. Value labels are abbreviated when
/// `abbreviate` is set (download-sized numbers) and printed raw otherwise.
fn draw_bar_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    x_desc: &str,
    items: &[(String, u64, RGBColor)],
    abbreviate: bool,
) -> Result<()> {
    let max = items.iter().map(|(_, value, _)| *value).max().unwrap_or(0).max(1) as f64;
    let n = items.len() as i32;

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(180);
    if !title.is_empty() {
        builder.caption(title, ("sans-serif", 22));
    }
    let mut chart = builder.build_cartesian_2d(0f64..max * 1.15, 0i32..n)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(items.len())
        .y_label_formatter(&|slot: &i32| {
            let idx = n - 1 - *slot;
            if idx < 0 {
                return String::new();
            }
            items
                .get(idx as usize)
                .map(|(label, _, _)| label.clone())
                .unwrap_or_default()
        })
        .x_label_formatter(&|v: &f64| {
            if abbreviate {
                abbreviate_count(*v as u64)
            } else {
                format!("{}", *v as u64)
            }
        })
        .x_desc(x_desc)
        .label_style(("sans-serif", 13))
        .draw()?;

    chart.draw_series(items.iter().enumerate().map(|(i, (_, value, color))| {
        let slot = n - 1 - i as i32; // rank 1 at the top
        Rectangle::new([(0.0, slot), (*value as f64, slot + 1)], color.filled())
    }))?;
    Ok(())
}
