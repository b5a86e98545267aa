//! SVG charts for exploring the book dataset and its clusters.
//!
//! Every function validates its input before touching the output path and
//! writes a single SVG file.

pub mod categorical;
pub mod clustering;
pub mod distribution;
pub mod style;

pub use categorical::{heatmap_plot, violin_plot};
pub use clustering::{cluster_projection_2d, cluster_projection_3d, elbow_silhouette_plot};
pub use distribution::{bar_plot, scatter_plot, two_plot_distribution};
