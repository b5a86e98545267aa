//! Shared colors and small numeric helpers for the charts.

use plotters::style::RGBColor;

pub const SCORE_BLUE: RGBColor = RGBColor(0x2e, 0x59, 0xa7);
pub const SENTIMENT_ORANGE: RGBColor = RGBColor(0xfc, 0xac, 0x3d);
pub const EDGE_NAVY: RGBColor = RGBColor(0x00, 0x00, 0x80);

/// Categorical palette for clusters and genres
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

pub fn palette_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// White to dark blue
pub fn blues(value: f64) -> RGBColor {
    let t = value.clamp(0.0, 1.0);
    let lerp = |from: f64, to: f64| (from + (to - from) * t).round() as u8;
    RGBColor(lerp(247.0, 8.0), lerp(251.0, 48.0), lerp(255.0, 107.0))
}

/// Min and max of finite values, widened when they coincide
pub fn bounds(values: &[f64]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }
    (min, max)
}

/// Bounds padded by `fraction` of the span on both sides
pub fn padded_bounds(values: &[f64], fraction: f64) -> (f64, f64) {
    let (min, max) = bounds(values);
    let pad = (max - min) * fraction;
    (min - pad, max + pad)
}

/// Equal-width histogram: returns (min, bin width, counts)
pub fn histogram(values: &[f64], bins: usize) -> (f64, f64, Vec<usize>) {
    let bins = bins.max(1);
    let (min, max) = bounds(values);
    let width = (max - min) / bins as f64;

    let mut counts = vec![0; bins];
    for &value in values.iter().filter(|v| v.is_finite()) {
        let idx = (((value - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    (min, width, counts)
}

/// Gaussian kernel density estimate at `points` (Silverman bandwidth)
pub fn kde(values: &[f64], points: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    if values.is_empty() {
        return vec![0.0; points.len()];
    }
    let mean = values.iter().sum::<f64>() / n;
    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    let bandwidth = if std > 0.0 {
        1.06 * std * n.powf(-0.2)
    } else {
        0.05
    };

    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    points
        .iter()
        .map(|&x| {
            values
                .iter()
                .map(|&v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm
        })
        .collect()
}

/// Label for an integer tick on a categorical axis
pub fn category_label(labels: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}
