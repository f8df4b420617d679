use crate::icons::IconOptions;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudConfig {
    pub width: f64,
    pub height: f64,
    pub min_font_size: f64,
    pub max_font_size: f64,
    /// Radians added to the spiral angle per attempt.
    pub angle_step: f64,
    /// Radius gained per full spiral turn.
    pub spiral_step: f64,
    /// Placement attempts per word before it is dropped.
    pub max_attempts: usize,
    /// Collision radius is `collision_factor * (font_a + font_b)`.
    pub collision_factor: f64,
    pub rotation_probability: f64,
}

impl WordCloudConfig {
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            min_font_size: 12.0,
            max_font_size: 48.0,
            angle_step: 0.5,
            spiral_step: 10.0,
            max_attempts: 500,
            collision_factor: 0.4,
            rotation_probability: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieConfig {
    pub size: f64,
    pub margin: f64,
    /// Inner radius as a fraction of the outer radius (0 for a full pie).
    pub inner_radius_ratio: f64,
    /// Label anchor distance as a fraction of the outer radius.
    pub label_radius_ratio: f64,
    pub show_percent: bool,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            size: 320.0,
            margin: 20.0,
            inner_radius_ratio: 0.0,
            label_radius_ratio: 0.65,
            show_percent: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PyramidConfig {
    pub width: f64,
    pub height: f64,
    /// Width of the apex; 0 gives a pointed top.
    pub top_width: f64,
    pub base_width: f64,
    pub level_gap: f64,
    /// Largest value at the base when true, otherwise input order top to bottom.
    pub sort_by_value: bool,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 360.0,
            top_width: 0.0,
            base_width: 440.0,
            level_gap: 4.0,
            sort_by_value: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub word_cloud: WordCloudConfig,
    pub pie: PieConfig,
    pub pyramid: PyramidConfig,
    pub icon: IconOptions,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            word_cloud: WordCloudConfig::default(),
            pie: PieConfig::default(),
            pyramid: PyramidConfig::default(),
            icon: IconOptions::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    muted_text_color: Option<String>,
    background: Option<String>,
    stroke_color: Option<String>,
    word_palette: Option<Vec<String>>,
    chart_palette: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordCloudConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    min_font_size: Option<f64>,
    max_font_size: Option<f64>,
    angle_step: Option<f64>,
    spiral_step: Option<f64>,
    max_attempts: Option<usize>,
    collision_factor: Option<f64>,
    rotation_probability: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PieConfigFile {
    size: Option<f64>,
    margin: Option<f64>,
    inner_radius_ratio: Option<f64>,
    label_radius_ratio: Option<f64>,
    show_percent: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PyramidConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    top_width: Option<f64>,
    base_width: Option<f64>,
    level_gap: Option<f64>,
    sort_by_value: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IconConfigFile {
    size: Option<u32>,
    fallback: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    word_cloud: Option<WordCloudConfigFile>,
    pie: Option<PieConfigFile>,
    pyramid: Option<PyramidConfigFile>,
    icon: Option<IconConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.muted_text_color {
            config.theme.muted_text_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.stroke_color {
            config.theme.stroke_color = v;
        }
        if let Some(v) = vars.word_palette.filter(|colors| !colors.is_empty()) {
            config.theme.word_palette = v;
        }
        if let Some(v) = vars.chart_palette.filter(|colors| !colors.is_empty()) {
            config.theme.chart_palette = v;
        }
    }
    config.render.background = config.theme.background.clone();

    if let Some(cloud) = parsed.word_cloud {
        let target = &mut config.word_cloud;
        if let Some(v) = cloud.width {
            target.width = v;
        }
        if let Some(v) = cloud.height {
            target.height = v;
        }
        if let Some(v) = cloud.min_font_size {
            target.min_font_size = v;
        }
        if let Some(v) = cloud.max_font_size {
            target.max_font_size = v;
        }
        if let Some(v) = cloud.angle_step {
            target.angle_step = v;
        }
        if let Some(v) = cloud.spiral_step {
            target.spiral_step = v;
        }
        if let Some(v) = cloud.max_attempts {
            target.max_attempts = v;
        }
        if let Some(v) = cloud.collision_factor {
            target.collision_factor = v;
        }
        if let Some(v) = cloud.rotation_probability {
            target.rotation_probability = v.clamp(0.0, 1.0);
        }
        config.render.width = target.width as f32;
        config.render.height = target.height as f32;
    }

    if let Some(pie) = parsed.pie {
        if let Some(v) = pie.size {
            config.pie.size = v;
        }
        if let Some(v) = pie.margin {
            config.pie.margin = v;
        }
        if let Some(v) = pie.inner_radius_ratio {
            config.pie.inner_radius_ratio = v.clamp(0.0, 0.95);
        }
        if let Some(v) = pie.label_radius_ratio {
            config.pie.label_radius_ratio = v;
        }
        if let Some(v) = pie.show_percent {
            config.pie.show_percent = v;
        }
    }

    if let Some(pyramid) = parsed.pyramid {
        if let Some(v) = pyramid.width {
            config.pyramid.width = v;
        }
        if let Some(v) = pyramid.height {
            config.pyramid.height = v;
        }
        if let Some(v) = pyramid.top_width {
            config.pyramid.top_width = v;
        }
        if let Some(v) = pyramid.base_width {
            config.pyramid.base_width = v;
        }
        if let Some(v) = pyramid.level_gap {
            config.pyramid.level_gap = v;
        }
        if let Some(v) = pyramid.sort_by_value {
            config.pyramid.sort_by_value = v;
        }
    }

    if let Some(icon) = parsed.icon {
        if let Some(v) = icon.size {
            config.icon.size = v;
        }
        if let Some(v) = icon.fallback {
            config.icon.fallback = v;
        }
    }

    Ok(config)
}
