//! Per-category charts: violin plots and the genre/cluster heatmap.

use crate::style::{blues, bounds, category_label, kde, palette_color};
use anyhow::{ensure, Result};
use data_loader::GenreClusterTable;
use plotters::prelude::*;
use std::path::Path;

const KDE_POINTS: usize = 100;

/// One KDE violin per group, mirrored around the group's x position.
pub fn violin_plot(
    path: &Path,
    groups: &[(String, Vec<f64>)],
    title: &str,
    y_desc: &str,
) -> Result<()> {
    ensure!(!groups.is_empty(), "no groups to plot");
    ensure!(
        groups.iter().all(|(_, values)| !values.is_empty()),
        "every group needs at least one value"
    );

    let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    let (lo, hi) = bounds(&all);
    let pad = (hi - lo) * 0.15;
    let (y_min, y_max) = (lo - pad, hi + pad);

    let root = SVGBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = groups.iter().map(|(label, _)| label.clone()).collect();
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..groups.len() as f64 - 0.5, y_min..y_max)?;

    let label_fmt = |x: &f64| category_label(&labels, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len())
        .x_label_formatter(&label_fmt)
        .y_desc(y_desc)
        .draw()?;

    let ys: Vec<f64> = (0..KDE_POINTS)
        .map(|i| y_min + (y_max - y_min) * i as f64 / (KDE_POINTS - 1) as f64)
        .collect();

    for (idx, (_, values)) in groups.iter().enumerate() {
        let density = kde(values, &ys);
        let peak = density.iter().copied().fold(0.0, f64::max);
        if peak <= 0.0 {
            continue;
        }
        let center = idx as f64;
        let half_width = |d: f64| 0.4 * d / peak;

        let outline: Vec<(f64, f64)> = ys
            .iter()
            .zip(&density)
            .map(|(&y, &d)| (center + half_width(d), y))
            .chain(
                ys.iter()
                    .zip(&density)
                    .rev()
                    .map(|(&y, &d)| (center - half_width(d), y)),
            )
            .collect();

        let color = palette_color(idx);
        chart.draw_series(std::iter::once(Polygon::new(outline, color.mix(0.6).filled())))?;

        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        let median = sorted[sorted.len() / 2];
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(center - 0.1, median), (center + 0.1, median)],
            BLACK.stroke_width(2),
        )))?;
    }

    root.present()?;
    tracing::info!("Wrote violin plot to {:?}", path);
    Ok(())
}

/// Genre (rows) by cluster (columns) proportions, each cell annotated.
pub fn heatmap_plot(path: &Path, table: &GenreClusterTable) -> Result<()> {
    ensure!(
        !table.genres.is_empty() && !table.clusters.is_empty(),
        "genre/cluster table is empty"
    );
    ensure!(
        table.proportions.len() == table.genres.len()
            && table
                .proportions
                .iter()
                .all(|row| row.len() == table.clusters.len()),
        "proportion matrix does not match {} genres x {} clusters",
        table.genres.len(),
        table.clusters.len()
    );

    let root = SVGBackend::new(path, (1000, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let n_rows = table.genres.len();
    let n_cols = table.clusters.len();
    let mut chart = ChartBuilder::on(&root)
        .caption("Proportion of Each Genre in Each Cluster", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(120)
        .build_cartesian_2d(-0.5..n_cols as f64 - 0.5, -0.5..n_rows as f64 - 0.5)?;

    // Row 0 is drawn at the top
    let row_labels: Vec<String> = table.genres.iter().rev().cloned().collect();
    let x_fmt = |x: &f64| category_label(&table.clusters, *x);
    let y_fmt = |y: &f64| category_label(&row_labels, *y);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n_cols)
        .y_labels(n_rows)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .x_desc("Cluster")
        .y_desc("Genre")
        .draw()?;

    let cells: Vec<(f64, f64, f64)> = table
        .proportions
        .iter()
        .enumerate()
        .flat_map(|(row, values)| {
            let y = (n_rows - 1 - row) as f64;
            values
                .iter()
                .enumerate()
                .map(move |(col, &value)| (col as f64, y, value))
        })
        .collect();

    chart.draw_series(cells.iter().map(|&(x, y, value)| {
        Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], blues(value).filled())
    }))?;
    chart.draw_series(cells.iter().map(|&(x, y, value)| {
        let color = if value > 0.5 { WHITE } else { BLACK };
        Text::new(
            format!("{:.2}", value),
            (x - 0.12, y + 0.05),
            ("sans-serif", 14).into_font().color(&color),
        )
    }))?;

    root.present()?;
    tracing::info!("Wrote genre/cluster heatmap to {:?}", path);
    Ok(())
}
