use serde::{Deserialize, Serialize};

const CLASSIC_WORD_PALETTE: [&str; 5] = ["#2563EB", "#7C3AED", "#DB2777", "#EA580C", "#059669"];

const MODERN_WORD_PALETTE: [&str; 5] = ["#0EA5E9", "#6366F1", "#F43F5E", "#F59E0B", "#10B981"];

const CLASSIC_CHART_PALETTE: [&str; 8] = [
    "#4E79A7", "#F28E2B", "#E15759", "#76B7B2", "#59A14F", "#EDC948", "#B07AA1", "#FF9DA7",
];

const MODERN_CHART_PALETTE: [&str; 8] = [
    "#3B82F6", "#8B5CF6", "#EC4899", "#F97316", "#14B8A6", "#EAB308", "#64748B", "#22C55E",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub muted_text_color: String,
    pub background: String,
    pub stroke_color: String,
    /// Word-cloud colors, cycled by rank.
    pub word_palette: Vec<String>,
    /// Slice/level colors for pie and pyramid layouts.
    pub chart_palette: Vec<String>,
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|value| value.to_string()).collect()
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"Helvetica Neue\", Arial, sans-serif".to_string(),
            font_size: 14.0,
            text_color: "#1F2937".to_string(),
            muted_text_color: "#6B7280".to_string(),
            background: "#FFFFFF".to_string(),
            stroke_color: "#FFFFFF".to_string(),
            word_palette: palette(&CLASSIC_WORD_PALETTE),
            chart_palette: palette(&CLASSIC_CHART_PALETTE),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            text_color: "#0F172A".to_string(),
            muted_text_color: "#64748B".to_string(),
            background: "#F8FAFC".to_string(),
            stroke_color: "#F8FAFC".to_string(),
            word_palette: palette(&MODERN_WORD_PALETTE),
            chart_palette: palette(&MODERN_CHART_PALETTE),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" | "base" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
