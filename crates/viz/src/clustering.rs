//! Charts for choosing and inspecting the book clusters.

use crate::style::{padded_bounds, palette_color, SCORE_BLUE, SENTIMENT_ORANGE};
use anyhow::{ensure, Result};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Inertia (left) and silhouette score (right) against the number of clusters.
pub fn elbow_silhouette_plot(
    path: &Path,
    k_values: &[usize],
    inertia: &[f64],
    silhouette: &[f64],
) -> Result<()> {
    ensure!(!k_values.is_empty(), "no cluster counts to plot");
    ensure!(
        k_values.len() == inertia.len() && k_values.len() == silhouette.len(),
        "expected {} inertia and silhouette values, got {} and {}",
        k_values.len(),
        inertia.len(),
        silhouette.len()
    );

    let root = SVGBackend::new(path, (1200, 500)).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(600);

    let ks: Vec<f64> = k_values.iter().map(|&k| k as f64).collect();
    let (k_min, k_max) = padded_bounds(&ks, 0.05);

    for (area, values, title, y_desc, color) in [
        (&left, inertia, "Elbow Method", "Inertia", SCORE_BLUE),
        (&right, silhouette, "Silhouette Score", "Silhouette Score", SENTIMENT_ORANGE),
    ] {
        let (y_min, y_max) = padded_bounds(values, 0.1);
        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(k_min..k_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Number of Clusters")
            .y_desc(y_desc)
            .x_labels(k_values.len())
            .x_label_formatter(&|x| format!("{:.0}", x))
            .draw()?;

        chart.draw_series(LineSeries::new(
            ks.iter().copied().zip(values.iter().copied()),
            color.stroke_width(2),
        ))?;
        chart.draw_series(
            ks.iter()
                .zip(values)
                .map(|(&k, &v)| Circle::new((k, v), 4, color.filled())),
        )?;
    }

    root.present()?;
    tracing::info!("Wrote elbow/silhouette plot to {:?}", path);
    Ok(())
}

/// Group point indices by label, labels in sorted order
fn group_by_label<'a>(labels: &'a [String]) -> BTreeMap<&'a str, Vec<usize>> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        groups.entry(label.as_str()).or_default().push(idx);
    }
    groups
}

/// 2D projection of the clustered books, colored by cluster.
pub fn cluster_projection_2d(path: &Path, points: &[[f64; 2]], labels: &[String]) -> Result<()> {
    ensure!(!points.is_empty(), "no points to plot");
    ensure!(
        points.len() == labels.len(),
        "got {} points but {} cluster labels",
        points.len(),
        labels.len()
    );

    let root = SVGBackend::new(path, (900, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let xs: Vec<f64> = points.iter().map(|p| p[0]).collect();
    let ys: Vec<f64> = points.iter().map(|p| p[1]).collect();
    let (x_min, x_max) = padded_bounds(&xs, 0.05);
    let (y_min, y_max) = padded_bounds(&ys, 0.05);

    let mut chart = ChartBuilder::on(&root)
        .caption("Book Clusters (2D Projection)", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Component 1")
        .y_desc("Component 2")
        .draw()?;

    for (group, (label, members)) in group_by_label(labels).into_iter().enumerate() {
        let color = palette_color(group);
        chart
            .draw_series(
                members
                    .iter()
                    .map(|&idx| Circle::new((points[idx][0], points[idx][1]), 3, color.mix(0.7).filled())),
            )?
            .label(format!("Cluster {label}"))
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    tracing::info!("Wrote 2D cluster projection to {:?}", path);
    Ok(())
}

/// 3D projection of the clustered books, colored by cluster.
pub fn cluster_projection_3d(path: &Path, points: &[[f64; 3]], labels: &[String]) -> Result<()> {
    ensure!(!points.is_empty(), "no points to plot");
    ensure!(
        points.len() == labels.len(),
        "got {} points but {} cluster labels",
        points.len(),
        labels.len()
    );

    let root = SVGBackend::new(path, (900, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let axis = |i: usize| -> Vec<f64> { points.iter().map(|p| p[i]).collect() };
    let (x_min, x_max) = padded_bounds(&axis(0), 0.05);
    let (y_min, y_max) = padded_bounds(&axis(1), 0.05);
    let (z_min, z_max) = padded_bounds(&axis(2), 0.05);

    let mut chart = ChartBuilder::on(&root)
        .caption("Book Clusters (3D Projection)", ("sans-serif", 22))
        .margin(20)
        .build_cartesian_3d(x_min..x_max, y_min..y_max, z_min..z_max)?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.3;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart.configure_axes().draw()?;

    for (group, (label, members)) in group_by_label(labels).into_iter().enumerate() {
        let color = palette_color(group);
        chart
            .draw_series(members.iter().map(|&idx| {
                let [x, y, z] = points[idx];
                Circle::new((x, y, z), 3, color.mix(0.7).filled())
            }))?
            .label(format!("Cluster {label}"))
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    tracing::info!("Wrote 3D cluster projection to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_elbow_silhouette_plot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("elbow.svg");

        elbow_silhouette_plot(
            &path,
            &[2, 3, 4, 5],
            &[120.0, 80.0, 65.0, 60.0],
            &[0.31, 0.42, 0.38, 0.33],
        )
        .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Elbow Method"));
        assert!(svg.contains("Silhouette Score"));
    }

    #[test]
    fn test_elbow_rejects_mismatched_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("elbow.svg");
        assert!(elbow_silhouette_plot(&path, &[2, 3], &[1.0], &[0.5, 0.4]).is_err());
    }

    #[test]
    fn test_cluster_projection_2d_has_legend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clusters.svg");
        let points = [[0.0, 0.1], [0.2, 0.3], [1.0, 1.2], [1.1, 0.9]];

        cluster_projection_2d(&path, &points, &labels(&["0", "0", "1", "1"])).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Cluster 0"));
        assert!(svg.contains("Cluster 1"));
    }

    #[test]
    fn test_cluster_projection_3d() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clusters3d.svg");
        let points = [[0.0, 0.1, 0.2], [1.0, 1.1, 0.9], [0.5, 0.4, 0.6]];

        cluster_projection_3d(&path, &points, &labels(&["0", "1", "2"])).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Cluster 2"));
        assert!(cluster_projection_3d(&path, &points, &labels(&["0"])).is_err());
    }

    #[test]
    fn test_group_by_label_sorts_labels() {
        let labels = labels(&["b", "a", "b"]);
        let groups = group_by_label(&labels);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(groups["b"], vec![0, 2]);
    }
}
