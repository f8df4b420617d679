use std::cmp::Ordering;
use std::f64::consts::PI;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::WordCloudConfig;
use crate::ir::{DroppedWord, PositionedWord, WordItem};

const FALLBACK_COLOR: &str = "#333333";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCloudLayout {
    pub width: f64,
    pub height: f64,
    /// Placed words, largest value first.
    pub words: Vec<PositionedWord>,
    /// Words whose placement budget ran out, largest value first.
    pub dropped: Vec<DroppedWord>,
}

impl WordCloudLayout {
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Extent covering the canvas and every placed word.
    ///
    /// The spiral may place words past the canvas edges, so renderers size
    /// their viewport from this rather than from `width`/`height`.
    pub fn bounds(&self) -> LayoutBounds {
        let mut bounds = LayoutBounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: self.width,
            max_y: self.height,
        };
        for word in &self.words {
            let (half_w, half_h) = word_extent(word);
            bounds.min_x = bounds.min_x.min(word.x - half_w);
            bounds.max_x = bounds.max_x.max(word.x + half_w);
            bounds.min_y = bounds.min_y.min(word.y - half_h);
            bounds.max_y = bounds.max_y.max(word.y + half_h);
        }
        bounds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl LayoutBounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

// Rough text box: average glyph advance of 0.6em, line box of 1.2em.
fn word_extent(word: &PositionedWord) -> (f64, f64) {
    let chars = word.word.chars().count().max(1) as f64;
    let half_run = word.font_size * 0.3 * chars;
    let half_line = word.font_size * 0.6;
    if word.rotation == 0.0 {
        (half_run.max(half_line), half_line)
    } else {
        (half_line, half_run.max(half_line))
    }
}

/// Lays out a word cloud using the thread-local RNG for rotations.
pub fn compute_word_cloud_layout(
    words: &[WordItem],
    config: &WordCloudConfig,
    palette: &[String],
) -> WordCloudLayout {
    compute_word_cloud_layout_with_rng(words, config, palette, &mut rand::thread_rng())
}

/// Lays out a word cloud with a caller-provided RNG.
///
/// Words are placed largest first by walking an Archimedean spiral out from
/// the center until the word's bounding circle clears every placed word.
/// A word that finds no spot within `config.max_attempts` steps is reported
/// in [`WordCloudLayout::dropped`] instead of being placed.
pub fn compute_word_cloud_layout_with_rng<R: Rng + ?Sized>(
    words: &[WordItem],
    config: &WordCloudConfig,
    palette: &[String],
    rng: &mut R,
) -> WordCloudLayout {
    struct WordDatum<'a> {
        index: usize,
        text: &'a str,
        value: f64,
    }

    let mut sorted: Vec<WordDatum> = words
        .iter()
        .enumerate()
        .map(|(index, word)| WordDatum {
            index,
            text: word.name.as_str(),
            value: if word.value.is_finite() { word.value } else { 0.0 },
        })
        .collect();
    sorted.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });

    let (max_value, min_value) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first.value, last.value),
        _ => (1.0, 1.0),
    };

    let mut placed: Vec<PositionedWord> = Vec::with_capacity(sorted.len());
    let mut dropped: Vec<DroppedWord> = Vec::new();

    for (rank, datum) in sorted.iter().enumerate() {
        let font_size = font_size_for(datum.value, min_value, max_value, config);
        let color = palette
            .get(rank % palette.len().max(1))
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
            .to_string();
        let rotation = pick_rotation(rng, config.rotation_probability);

        match find_position(font_size, &placed, config) {
            Some((x, y)) => placed.push(PositionedWord {
                word: datum.text.to_string(),
                value: datum.value,
                x,
                y,
                font_size,
                color,
                rotation,
            }),
            None => {
                warn!(
                    word = datum.text,
                    attempts = config.max_attempts,
                    "no free spot on the spiral, word dropped"
                );
                dropped.push(DroppedWord {
                    word: datum.text.to_string(),
                    value: datum.value,
                    font_size,
                });
            }
        }
    }

    debug!(
        placed = placed.len(),
        dropped = dropped.len(),
        "word cloud layout computed"
    );

    WordCloudLayout {
        width: config.width,
        height: config.height,
        words: placed,
        dropped,
    }
}

/// Font size for `value`, interpolated over `[min_value, max_value]`.
///
/// An empty or non-finite range yields the midpoint of the configured font sizes.
pub fn font_size_for(value: f64, min_value: f64, max_value: f64, config: &WordCloudConfig) -> f64 {
    let range = max_value - min_value;
    if range == 0.0 || !range.is_finite() {
        return (config.min_font_size + config.max_font_size) / 2.0;
    }
    let t = ((value - min_value) / range).clamp(0.0, 1.0);
    config.min_font_size + (config.max_font_size - config.min_font_size) * t
}

/// True when the approximate bounding circles of two words intersect.
pub fn words_overlap(a: &PositionedWord, b: &PositionedWord, collision_factor: f64) -> bool {
    circles_overlap(
        a.x,
        a.y,
        a.font_size,
        b.x,
        b.y,
        b.font_size,
        collision_factor,
    )
}

fn circles_overlap(
    ax: f64,
    ay: f64,
    a_size: f64,
    bx: f64,
    by: f64,
    b_size: f64,
    collision_factor: f64,
) -> bool {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt() < collision_factor * (a_size + b_size)
}

fn pick_rotation<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> f64 {
    let probability = if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if !rng.gen_bool(probability) {
        return 0.0;
    }
    if rng.gen_bool(0.5) { 90.0 } else { -90.0 }
}

fn find_position(
    font_size: f64,
    placed: &[PositionedWord],
    config: &WordCloudConfig,
) -> Option<(f64, f64)> {
    let (center_x, center_y) = config.center();
    let radius_growth = config.spiral_step * config.angle_step / (2.0 * PI);
    let mut angle = 0.0_f64;
    let mut radius = 0.0_f64;

    for _ in 0..config.max_attempts {
        let x = center_x + radius * angle.cos();
        let y = center_y + radius * angle.sin();
        let free = placed.iter().all(|other| {
            !circles_overlap(
                x,
                y,
                font_size,
                other.x,
                other.y,
                other.font_size,
                config.collision_factor,
            )
        });
        if free {
            return Some((x, y));
        }
        angle += config.angle_step;
        radius += radius_growth;
    }
    None
}
