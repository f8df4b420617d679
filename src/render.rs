use crate::config::RenderConfig;
use crate::icons::IconView;
use crate::layout::{
    LayoutBounds, PieLayout, PieSliceLayout, PyramidLayout, WordCloudLayout, polar_point,
};
use crate::theme::Theme;
use anyhow::Result;
use std::f64::consts::PI;
use std::path::Path;

fn canvas_bounds(width: f64, height: f64) -> LayoutBounds {
    LayoutBounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: width,
        max_y: height,
    }
}

fn open_svg(svg: &mut String, bounds: &LayoutBounds, theme: &Theme) {
    let min_x = bounds.min_x.floor();
    let min_y = bounds.min_y.floor();
    let width = bounds.max_x.ceil() - min_x;
    let height = bounds.max_y.ceil() - min_y;
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"{min_x:.0} {min_y:.0} {width:.0} {height:.0}\">",
    ));
    svg.push_str(&format!(
        "<rect x=\"{min_x:.0}\" y=\"{min_y:.0}\" width=\"{width:.0}\" height=\"{height:.0}\" fill=\"{}\"/>",
        theme.background
    ));
}

pub fn render_word_cloud_svg(layout: &WordCloudLayout, theme: &Theme) -> String {
    let mut svg = String::new();
    open_svg(&mut svg, &layout.bounds(), theme);

    for word in &layout.words {
        let transform = if word.rotation != 0.0 {
            format!(
                " transform=\"rotate({:.0} {:.2} {:.2})\"",
                word.rotation, word.x, word.y
            )
        } else {
            String::new()
        };
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{:.1}\" font-weight=\"600\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\"{}>{}</text>",
            word.x,
            word.y,
            escape_xml(&theme.font_family),
            word.font_size,
            word.color,
            transform,
            escape_xml(&word.word)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn slice_path(layout: &PieLayout, slice: &PieSliceLayout) -> String {
    let sweep = slice.sweep();
    let large_arc = if sweep > PI { 1 } else { 0 };
    let outer_start = polar_point(layout.center, layout.radius, slice.start_angle);
    let outer_end = polar_point(layout.center, layout.radius, slice.end_angle);

    if layout.inner_radius <= 0.0 {
        return format!(
            "M {:.2} {:.2} L {:.2} {:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {:.2} {:.2} Z",
            layout.center.0,
            layout.center.1,
            outer_start.0,
            outer_start.1,
            outer_end.0,
            outer_end.1,
            r = layout.radius,
        );
    }

    let inner_start = polar_point(layout.center, layout.inner_radius, slice.start_angle);
    let inner_end = polar_point(layout.center, layout.inner_radius, slice.end_angle);
    format!(
        "M {:.2} {:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {:.2} {:.2} L {:.2} {:.2} A {ir:.2} {ir:.2} 0 {large_arc} 0 {:.2} {:.2} Z",
        outer_start.0,
        outer_start.1,
        outer_end.0,
        outer_end.1,
        inner_end.0,
        inner_end.1,
        inner_start.0,
        inner_start.1,
        r = layout.radius,
        ir = layout.inner_radius,
    )
}

pub fn render_pie_svg(layout: &PieLayout, theme: &Theme, show_percent: bool) -> String {
    let mut svg = String::new();
    open_svg(&mut svg, &canvas_bounds(layout.width, layout.height), theme);

    for slice in &layout.slices {
        if slice.sweep() >= 2.0 * PI - 1e-6 {
            svg.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
                layout.center.0, layout.center.1, layout.radius, slice.color
            ));
            if layout.inner_radius > 0.0 {
                svg.push_str(&format!(
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
                    layout.center.0, layout.center.1, layout.inner_radius, theme.background
                ));
            }
        } else if slice.sweep() > 0.0 {
            svg.push_str(&format!(
                "<path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
                slice_path(layout, slice),
                slice.color,
                theme.stroke_color
            ));
        }
    }

    for slice in &layout.slices {
        if slice.sweep() <= 0.0 {
            continue;
        }
        let text = if show_percent {
            format!("{} {:.0}%", slice.label, slice.percent)
        } else {
            slice.label.clone()
        };
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text>",
            slice.label_x,
            slice.label_y,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.text_color,
            escape_xml(&text)
        ));
    }

    svg.push_str("</svg>");
    svg
}

pub fn render_pyramid_svg(layout: &PyramidLayout, theme: &Theme) -> String {
    let mut svg = String::new();
    open_svg(&mut svg, &canvas_bounds(layout.width, layout.height), theme);

    for level in &layout.levels {
        let top = level.y;
        let bottom = level.y + level.height;
        let half_top = level.top_width / 2.0;
        let half_bottom = level.bottom_width / 2.0;
        svg.push_str(&format!(
            "<polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{}\"/>",
            level.center_x - half_top,
            top,
            level.center_x + half_top,
            top,
            level.center_x + half_bottom,
            bottom,
            level.center_x - half_bottom,
            bottom,
            level.color
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text>",
            level.center_x,
            top + level.height / 2.0,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.text_color,
            escape_xml(&level.label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Icon fragment: a sprite reference for resolved glyphs, centered text otherwise.
pub fn render_icon_svg(view: &IconView, theme: &Theme) -> String {
    match view {
        IconView::Glyph { icon, size } => format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 24 24\" data-icon=\"{id}\"><use href=\"#{id}\"/></svg>",
            id = escape_xml(icon.id()),
        ),
        IconView::Fallback { text, size } => format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\"><text x=\"50%\" y=\"50%\" font-size=\"{:.1}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text></svg>",
            *size as f32 * 0.8,
            theme.text_color,
            escape_xml(text)
        ),
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            println!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PieConfig, WordCloudConfig};
    use crate::icons::IconOptions;
    use crate::ir::{ChartCollection, ChartRecord, WordItem};
    use crate::layout::{compute_pie_layout, compute_word_cloud_layout_with_rng};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn word_cloud_svg_escapes_text() {
        let theme = Theme::classic();
        let mut rng = StdRng::seed_from_u64(1);
        let layout = compute_word_cloud_layout_with_rng(
            &[WordItem::new("R&D", 3.0), WordItem::new("<ops>", 1.0)],
            &WordCloudConfig::default(),
            &theme.word_palette,
            &mut rng,
        );
        let svg = render_word_cloud_svg(&layout, &theme);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("R&amp;D"));
        assert!(svg.contains("&lt;ops&gt;"));
    }

    fn view_box(svg: &str) -> LayoutBounds {
        let start = svg.find("viewBox=\"").expect("viewBox") + "viewBox=\"".len();
        let end = start + svg[start..].find('"').expect("closing quote");
        let parts: Vec<f64> = svg[start..end]
            .split_whitespace()
            .map(|part| part.parse().expect("number"))
            .collect();
        LayoutBounds {
            min_x: parts[0],
            min_y: parts[1],
            max_x: parts[0] + parts[2],
            max_y: parts[1] + parts[3],
        }
    }

    #[test]
    fn word_cloud_view_box_shows_every_placed_word() {
        let theme = Theme::classic();
        let config = WordCloudConfig::default();
        let input: Vec<WordItem> = (0..300)
            .map(|i| WordItem::new(format!("term{i}"), (i % 50) as f64))
            .collect();
        let mut rng = StdRng::seed_from_u64(3);
        let layout =
            compute_word_cloud_layout_with_rng(&input, &config, &theme.word_palette, &mut rng);
        assert_eq!(layout.words.len() + layout.dropped.len(), 300);

        let view = view_box(&render_word_cloud_svg(&layout, &theme));
        for word in &layout.words {
            let reach = config.collision_factor * word.font_size;
            assert!(view.contains(word.x - reach, word.y - reach), "{} clipped", word.word);
            assert!(view.contains(word.x + reach, word.y + reach), "{} clipped", word.word);
        }
    }

    #[test]
    fn pie_view_box_is_the_canvas() {
        let theme = Theme::classic();
        let collection = ChartCollection {
            title: None,
            desc: None,
            items: vec![ChartRecord::new("A", 1.0), ChartRecord::new("B", 2.0)],
        };
        let layout = compute_pie_layout(&collection, &PieConfig::default(), &theme.chart_palette);
        let view = view_box(&render_pie_svg(&layout, &theme, false));
        assert_eq!((view.min_x, view.min_y), (0.0, 0.0));
        assert_eq!((view.width(), view.height()), (layout.width, layout.height));
    }

    #[test]
    fn single_slice_pie_renders_a_circle() {
        let theme = Theme::classic();
        let collection = ChartCollection {
            title: None,
            desc: None,
            items: vec![ChartRecord::new("Only", 5.0)],
        };
        let layout = compute_pie_layout(&collection, &PieConfig::default(), &theme.chart_palette);
        let svg = render_pie_svg(&layout, &theme, true);
        assert!(svg.contains("<circle"));
        assert!(svg.contains("Only 100%"));
    }

    #[test]
    fn icon_fallback_renders_text() {
        let theme = Theme::classic();
        let view = IconView::resolve("not-an-icon", &IconOptions::default());
        let svg = render_icon_svg(&view, &theme);
        assert!(svg.contains("\u{2713}"));
        let view = IconView::resolve("mdi/rocket", &IconOptions::default());
        let svg = render_icon_svg(&view, &theme);
        assert!(svg.contains("data-icon=\"lucide:rocket\""));
    }
}
