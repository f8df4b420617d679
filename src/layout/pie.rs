use std::collections::HashMap;
use std::f64::consts::PI;

use serde::Serialize;

use crate::config::PieConfig;
use crate::ir::ChartCollection;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSliceLayout {
    pub label: String,
    pub value: f64,
    pub percent: f64,
    /// Radians, clockwise from 12 o'clock.
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: String,
    pub label_x: f64,
    pub label_y: f64,
}

impl PieSliceLayout {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieLayout {
    pub width: f64,
    pub height: f64,
    pub center: (f64, f64),
    pub radius: f64,
    pub inner_radius: f64,
    pub total: f64,
    pub title: Option<String>,
    pub slices: Vec<PieSliceLayout>,
}

/// Point on a circle for an angle measured clockwise from 12 o'clock.
pub fn polar_point(center: (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    (center.0 + radius * angle.sin(), center.1 - radius * angle.cos())
}

pub fn compute_pie_layout(
    collection: &ChartCollection,
    config: &PieConfig,
    palette: &[String],
) -> PieLayout {
    let size = config.size.max(1.0);
    let radius = (size / 2.0 - config.margin).max(1.0);
    let center = (size / 2.0, size / 2.0);
    let inner_radius = radius * config.inner_radius_ratio.clamp(0.0, 0.95);

    let total: f64 = collection.items.iter().map(|item| item.value.max(0.0)).sum();
    let even_split = total <= 0.0;
    let count = collection.items.len().max(1) as f64;

    let mut color_map: HashMap<String, String> = HashMap::new();
    let mut color_index: usize = 0;
    let mut resolve_color = |label: &str| -> String {
        if let Some(color) = color_map.get(label) {
            return color.clone();
        }
        let color = palette
            .get(color_index % palette.len().max(1))
            .cloned()
            .unwrap_or_else(|| "#999999".to_string());
        color_index += 1;
        color_map.insert(label.to_string(), color.clone());
        color
    };

    let mut slices = Vec::with_capacity(collection.items.len());
    let mut angle = 0.0_f64;
    for item in &collection.items {
        let value = item.value.max(0.0);
        let share = if even_split { 1.0 / count } else { value / total };
        let span = share * PI * 2.0;
        let (label_x, label_y) =
            polar_point(center, radius * config.label_radius_ratio, angle + span / 2.0);
        slices.push(PieSliceLayout {
            label: item.label.clone(),
            value,
            percent: share * 100.0,
            start_angle: angle,
            end_angle: angle + span,
            color: resolve_color(&item.label),
            label_x,
            label_y,
        });
        angle += span;
    }

    PieLayout {
        width: size,
        height: size,
        center,
        radius,
        inner_radius,
        total,
        title: collection.title.clone(),
        slices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ChartRecord;

    fn collection(values: &[(&str, f64)]) -> ChartCollection {
        ChartCollection {
            title: Some("Share".to_string()),
            desc: None,
            items: values
                .iter()
                .map(|(name, value)| ChartRecord::new(*name, *value))
                .collect(),
        }
    }

    fn palette() -> Vec<String> {
        vec!["#a".to_string(), "#b".to_string()]
    }

    #[test]
    fn slices_cover_the_circle() {
        let layout = compute_pie_layout(
            &collection(&[("A", 1.0), ("B", 3.0)]),
            &PieConfig::default(),
            &palette(),
        );
        assert_eq!(layout.slices.len(), 2);
        assert!((layout.slices[0].percent - 25.0).abs() < 1e-9);
        assert!((layout.slices[1].end_angle - 2.0 * PI).abs() < 1e-9);
        assert_eq!(layout.slices[0].start_angle, 0.0);
        assert_eq!(layout.title.as_deref(), Some("Share"));
    }

    #[test]
    fn zero_total_splits_evenly() {
        let layout = compute_pie_layout(
            &collection(&[("A", 0.0), ("B", -2.0), ("C", 0.0), ("D", 0.0)]),
            &PieConfig::default(),
            &palette(),
        );
        for slice in &layout.slices {
            assert!((slice.sweep() - PI / 2.0).abs() < 1e-9);
            assert_eq!(slice.value, 0.0);
        }
    }

    #[test]
    fn repeated_labels_share_a_color() {
        let layout = compute_pie_layout(
            &collection(&[("A", 1.0), ("B", 1.0), ("A", 1.0)]),
            &PieConfig::default(),
            &palette(),
        );
        assert_eq!(layout.slices[0].color, layout.slices[2].color);
        assert_ne!(layout.slices[0].color, layout.slices[1].color);
    }

    #[test]
    fn polar_point_starts_at_twelve() {
        let (x, y) = polar_point((100.0, 100.0), 50.0, 0.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);
    }
}
