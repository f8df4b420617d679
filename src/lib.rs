#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod icons;
pub mod ir;
pub mod layout;
pub mod normalize;
pub mod payload;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, PieConfig, PyramidConfig, RenderConfig, WordCloudConfig, load_config};
pub use icons::{IconOptions, IconRef, IconView, normalize_icon_name, resolve_icon};
pub use ir::{ChartCollection, ChartRecord, DroppedWord, PositionedWord, WordItem};
pub use layout::{
    LayoutBounds, PieLayout, PyramidLayout, WordCloudLayout, compute_pie_layout, compute_pyramid_layout,
    compute_word_cloud_layout, compute_word_cloud_layout_with_rng,
};
pub use normalize::{ChartInput, coerce_number, normalize_chart_data, normalize_chart_data_strict};
pub use payload::{PayloadError, parse_payload};
pub use render::{render_icon_svg, render_pie_svg, render_pyramid_svg, render_word_cloud_svg};
pub use theme::Theme;
