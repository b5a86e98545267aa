//! Distribution charts: histograms, scatter and bar plots.

use crate::style::{
    bounds, category_label, histogram, padded_bounds, palette_color, EDGE_NAVY, SCORE_BLUE,
    SENTIMENT_ORANGE,
};
use anyhow::{ensure, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const HISTOGRAM_BINS: usize = 40;

/// Average score and sentiment histograms side by side.
pub fn two_plot_distribution(path: &Path, scores: &[f64], sentiments: &[f64]) -> Result<()> {
    ensure!(!scores.is_empty(), "no scores to plot");
    ensure!(!sentiments.is_empty(), "no sentiment scores to plot");

    let root = SVGBackend::new(path, (1200, 500)).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(600);

    draw_histogram(&left, scores, "Distribution of Score", "Score", SCORE_BLUE)?;
    draw_histogram(
        &right,
        sentiments,
        "Distribution of Sentiment Score",
        "Sentiment Score",
        SENTIMENT_ORANGE,
    )?;

    root.present()?;
    tracing::info!("Wrote score distributions to {:?}", path);
    Ok(())
}

fn draw_histogram(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    values: &[f64],
    title: &str,
    x_desc: &str,
    color: RGBColor,
) -> Result<()> {
    let (min, width, counts) = histogram(values, HISTOGRAM_BINS);
    let max_count = counts.iter().copied().max().unwrap_or(0).max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(min..min + width * counts.len() as f64, 0.0..max_count * 1.1)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(idx, &count)| {
        let x0 = min + width * idx as f64;
        Rectangle::new([(x0, 0.0), (x0 + width, count as f64)], color.filled())
    }))?;
    chart.draw_series(counts.iter().enumerate().map(|(idx, &count)| {
        let x0 = min + width * idx as f64;
        Rectangle::new([(x0, 0.0), (x0 + width, count as f64)], EDGE_NAVY.stroke_width(1))
    }))?;
    Ok(())
}

/// Sentiment (x) against average score (y), one translucent dot per book.
pub fn scatter_plot(path: &Path, sentiments: &[f64], scores: &[f64]) -> Result<()> {
    ensure!(!sentiments.is_empty(), "no points to plot");
    ensure!(
        sentiments.len() == scores.len(),
        "got {} sentiment values but {} scores",
        sentiments.len(),
        scores.len()
    );

    let root = SVGBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_bounds(sentiments, 0.05);
    let (y_min, y_max) = padded_bounds(scores, 0.05);
    let mut chart = ChartBuilder::on(&root)
        .caption("Sentiment vs. Average Score", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("VADER Sentiment Score")
        .y_desc("Average Score")
        .draw()?;

    chart.draw_series(
        sentiments
            .iter()
            .zip(scores)
            .map(|(&x, &y)| Circle::new((x, y), 3, SCORE_BLUE.mix(0.5).filled())),
    )?;

    root.present()?;
    tracing::info!("Wrote scatter plot to {:?}", path);
    Ok(())
}

/// Vertical bars of `(label, count)`, in the given order.
pub fn bar_plot(path: &Path, counts: &[(String, usize)]) -> Result<()> {
    ensure!(!counts.is_empty(), "no bars to plot");

    let root = SVGBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = counts.iter().map(|(label, _)| label.clone()).collect();
    let values: Vec<f64> = counts.iter().map(|(_, count)| *count as f64).collect();
    let (_, max) = bounds(&values);

    let mut chart = ChartBuilder::on(&root)
        .caption("Number of Books per Genre", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..counts.len() as f64 - 0.5, 0.0..max.max(1.0) * 1.1)?;

    let label_fmt = |x: &f64| category_label(&labels, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(counts.len())
        .x_label_formatter(&label_fmt)
        .x_desc("Genre")
        .y_desc("Count")
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(idx, &value)| {
        let x = idx as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, value)], palette_color(idx).filled())
    }))?;

    root.present()?;
    tracing::info!("Wrote bar plot to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_two_plot_distribution_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist.svg");

        let scores: Vec<f64> = (0..100).map(|i| 1.0 + (i % 40) as f64 / 10.0).collect();
        let sentiments: Vec<f64> = (0..100).map(|i| (i as f64 / 50.0) - 1.0).collect();
        two_plot_distribution(&path, &scores, &sentiments).unwrap();

        let svg = read(&path);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Distribution of Score"));
        assert!(svg.contains("Distribution of Sentiment Score"));
    }

    #[test]
    fn test_scatter_rejects_mismatched_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.svg");

        assert!(scatter_plot(&path, &[0.1, 0.2], &[4.0]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_scatter_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.svg");

        scatter_plot(&path, &[0.1, 0.5, -0.3], &[4.0, 3.5, 2.0]).unwrap();
        let svg = read(&path);
        assert!(svg.contains("Sentiment vs. Average Score"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_bar_plot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.svg");
        let counts = vec![("Fiction".to_string(), 12), ("Academic".to_string(), 5)];

        bar_plot(&path, &counts).unwrap();
        let svg = read(&path);
        assert!(svg.contains("Number of Books per Genre"));
        assert!(bar_plot(&path, &[]).is_err());
    }
}
