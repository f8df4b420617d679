use std::cmp::Ordering;

use serde::Serialize;

use crate::config::PyramidConfig;
use crate::ir::ChartCollection;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidLevelLayout {
    pub label: String,
    pub value: f64,
    pub center_x: f64,
    pub y: f64,
    pub height: f64,
    pub top_width: f64,
    pub bottom_width: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidLayout {
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    /// Apex first.
    pub levels: Vec<PyramidLevelLayout>,
}

impl PyramidConfig {
    /// Width of the pyramid silhouette at vertical fraction `t` (0 = apex).
    pub fn width_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        self.top_width + (self.base_width - self.top_width) * t
    }
}

pub fn compute_pyramid_layout(
    collection: &ChartCollection,
    config: &PyramidConfig,
    palette: &[String],
) -> PyramidLayout {
    let mut order: Vec<usize> = (0..collection.items.len()).collect();
    if config.sort_by_value {
        order.sort_by(|&a, &b| {
            collection.items[a]
                .value
                .partial_cmp(&collection.items[b].value)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(&b))
        });
    }

    let count = order.len();
    let height = config.height.max(1.0);
    // Gaps never take more than half the height, so levels always fit.
    let gap_count = count.saturating_sub(1) as f64;
    let gap = if gap_count > 0.0 {
        config.level_gap.max(0.0).min(height / 2.0 / gap_count)
    } else {
        0.0
    };
    let level_height = if count == 0 {
        0.0
    } else {
        (height - gap * gap_count) / count as f64
    };
    let center_x = config.width / 2.0;

    let levels = order
        .iter()
        .enumerate()
        .map(|(level, &idx)| {
            let item = &collection.items[idx];
            let y = level as f64 * (level_height + gap);
            PyramidLevelLayout {
                label: item.label.clone(),
                value: item.value,
                center_x,
                y,
                height: level_height,
                top_width: config.width_at(y / height),
                bottom_width: config.width_at((y + level_height) / height),
                color: palette
                    .get(level % palette.len().max(1))
                    .cloned()
                    .unwrap_or_else(|| "#999999".to_string()),
            }
        })
        .collect();

    PyramidLayout {
        width: config.width,
        height,
        title: collection.title.clone(),
        levels,
    }
}
