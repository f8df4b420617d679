use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use infographic_core::config::WordCloudConfig;
use infographic_core::icons::resolve_icon;
use infographic_core::ir::WordItem;
use infographic_core::layout::compute_word_cloud_layout_with_rng;
use infographic_core::normalize::{normalize_chart_data, normalize_chart_data_strict};
use infographic_core::render::render_word_cloud_svg;
use infographic_core::theme::Theme;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use std::hint::black_box;

fn chart_payload(records: usize) -> Value {
    let items: Vec<Value> = (0..records)
        .map(|i| {
            json!({
                "label": format!("Category {i}"),
                "value": format!("${},{:03}.5", i % 7, i % 1000),
                "series_a": i,
                "series_b": i * 2,
            })
        })
        .collect();
    json!({ "title": "Bench", "desc": "generated", "items": items })
}

fn word_list(count: usize) -> Vec<WordItem> {
    (0..count)
        .map(|i| WordItem::new(format!("word{i}"), ((i * 37) % 101) as f64 + 1.0))
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for records in [10usize, 100, 1000] {
        let payload = chart_payload(records);
        group.bench_with_input(BenchmarkId::new("lenient", records), &payload, |b, data| {
            b.iter(|| black_box(normalize_chart_data(black_box(data))));
        });
        group.bench_with_input(BenchmarkId::new("strict", records), &payload, |b, data| {
            b.iter(|| black_box(normalize_chart_data_strict(black_box(data))));
        });
    }
    group.finish();
}

fn bench_icons(c: &mut Criterion) {
    let names = [
        "mdi/Robot",
        "lucide/brain",
        "AI_Chip",
        "credit card",
        "totally-unknown-xyz",
        "feather/trending_up",
    ];
    c.bench_function("resolve_icon", |b| {
        b.iter(|| {
            for name in names {
                black_box(resolve_icon(black_box(name)));
            }
        });
    });
}

fn bench_word_cloud(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_cloud");
    let theme = Theme::classic();
    let config = WordCloudConfig::default();
    for count in [10usize, 50, 150] {
        let words = word_list(count);
        group.bench_with_input(BenchmarkId::new("layout", count), &words, |b, data| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(7);
                let layout = compute_word_cloud_layout_with_rng(
                    black_box(data),
                    &config,
                    &theme.word_palette,
                    &mut rng,
                );
                black_box(layout.words.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("layout_and_render", count), &words, |b, data| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(7);
                let layout =
                    compute_word_cloud_layout_with_rng(data, &config, &theme.word_palette, &mut rng);
                let svg = render_word_cloud_svg(&layout, &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_normalize, bench_icons, bench_word_cloud
);
criterion_main!(benches);
