use infographic_core::{
    Theme, WordCloudConfig, WordCloudLayout, WordItem, compute_word_cloud_layout,
    compute_word_cloud_layout_with_rng, normalize_chart_data, normalize_chart_data_strict,
    normalize_icon_name, parse_payload, render_word_cloud_svg, resolve_icon,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordCloudOptions {
    theme: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    max_attempts: Option<usize>,
    rotation_probability: Option<f64>,
    seed: Option<u64>,
}

fn parse_options(options_json: Option<String>) -> Result<WordCloudOptions, JsValue> {
    match options_json {
        Some(raw) => serde_json::from_str::<WordCloudOptions>(&raw)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(WordCloudOptions::default()),
    }
}

fn build_layout(data_json: &str, options: &WordCloudOptions) -> Result<(WordCloudLayout, Theme), String> {
    let raw = parse_payload(data_json).map_err(|error| error.to_string())?;
    let collection =
        normalize_chart_data(&raw).ok_or_else(|| "payload is not chart data".to_string())?;
    let words = WordItem::from_chart(&collection);

    let theme = options
        .theme
        .as_deref()
        .and_then(Theme::by_name)
        .unwrap_or_default();
    let mut config = WordCloudConfig::default();
    if let Some(width) = options.width {
        config.width = width;
    }
    if let Some(height) = options.height {
        config.height = height;
    }
    if let Some(max_attempts) = options.max_attempts {
        config.max_attempts = max_attempts;
    }
    if let Some(probability) = options.rotation_probability {
        config.rotation_probability = probability;
    }

    let layout = match options.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            compute_word_cloud_layout_with_rng(&words, &config, &theme.word_palette, &mut rng)
        }
        None => compute_word_cloud_layout(&words, &config, &theme.word_palette),
    };
    Ok((layout, theme))
}

/// Canonical chart collection as JSON, or `"null"` when the payload is not chart data.
#[wasm_bindgen]
pub fn normalize_chart(data_json: &str, strict: bool) -> Result<String, JsValue> {
    let raw = parse_payload(data_json).map_err(|error| JsValue::from_str(&error.to_string()))?;
    let collection = if strict {
        normalize_chart_data_strict(&raw)
    } else {
        normalize_chart_data(&raw)
    };
    serde_json::to_string(&collection).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn normalize_icon(name: &str) -> String {
    normalize_icon_name(name)
}

/// Glyph id such as `lucide:bot`, or `undefined` on a miss.
#[wasm_bindgen]
pub fn resolve_icon_id(name: &str) -> Option<String> {
    resolve_icon(name).map(|icon| icon.id().to_string())
}

#[wasm_bindgen]
pub fn layout_word_cloud(data_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = parse_options(options_json)?;
    let (layout, _) = build_layout(data_json, &options).map_err(|error| JsValue::from_str(&error))?;
    serde_json::to_string(&layout).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn render_word_cloud(data_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = parse_options(options_json)?;
    let (layout, theme) =
        build_layout(data_json, &options).map_err(|error| JsValue::from_str(&error))?;
    Ok(render_word_cloud_svg(&layout, &theme))
}

#[cfg(test)]
mod tests {
    use crate::{WordCloudOptions, build_layout, normalize_icon, resolve_icon_id};

    #[test]
    fn seeded_layouts_are_reproducible() {
        let data = r#"[{"name":"alpha","value":5},{"name":"beta","value":3},{"name":"gamma","value":1}]"#;
        let options = WordCloudOptions {
            seed: Some(12),
            rotation_probability: Some(0.5),
            ..WordCloudOptions::default()
        };
        let (first, _) = build_layout(data, &options).expect("layout should succeed");
        let (second, _) = build_layout(data, &options).expect("layout should succeed");
        assert_eq!(first.words, second.words);
        assert_eq!(first.words[0].word, "alpha");
    }

    #[test]
    fn rejects_non_chart_payloads() {
        assert!(build_layout("42", &WordCloudOptions::default()).is_err());
    }

    #[test]
    fn icons_round_trip_through_exports() {
        assert_eq!(normalize_icon("mdi/Robot"), "robot");
        assert_eq!(resolve_icon_id("money"), resolve_icon_id("dollar"));
        assert_eq!(resolve_icon_id("nope"), None);
    }
}
