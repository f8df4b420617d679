use crate::config::{Config, load_config};
use crate::icons::{IconView, normalize_icon_name, resolve_icon};
use crate::ir::WordItem;
use crate::layout::{
    compute_pie_layout, compute_pyramid_layout, compute_word_cloud_layout,
    compute_word_cloud_layout_with_rng,
};
use crate::normalize::{normalize_chart_data, normalize_chart_data_strict};
use crate::payload::parse_payload;
use crate::render::{
    render_icon_svg, render_pie_svg, render_pyramid_svg, render_word_cloud_svg, write_output_png,
    write_output_svg,
};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "igr", version, about = "Normalize infographic section data and lay it out")]
pub struct Args {
    /// Config JSON file (theme, wordCloud, pie, pyramid, icon)
    #[arg(short = 'c', long = "configFile", global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Payload file (JSON or JSON5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Output file. Defaults to stdout for SVG and JSON.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the canonical chart collection for a payload
    Normalize {
        #[command(flatten)]
        input: InputArgs,
        /// Coerce values and drop records that are not positive
        #[arg(long)]
        strict: bool,
    },
    /// Resolve icon names
    Icon {
        names: Vec<String>,
        /// Emit SVG fragments instead of a JSON report
        #[arg(long)]
        svg: bool,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        fallback: Option<String>,
    },
    /// Lay out a word cloud from chart data
    Wordcloud {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Seed for the rotation choices
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Lay out a pie chart from chart data
    Pie {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Lay out a pyramid from chart data
    Pyramid {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

#[derive(Serialize)]
struct IconReport {
    input: String,
    normalized: String,
    icon: Option<&'static str>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Normalize { input, strict } => {
            let raw = read_payload(input.input.as_deref())?;
            let collection = if strict {
                normalize_chart_data_strict(&raw)
            } else {
                normalize_chart_data(&raw)
            };
            println!("{}", serde_json::to_string_pretty(&collection)?);
        }
        Command::Icon {
            names,
            svg,
            size,
            fallback,
        } => {
            let mut options = config.icon.clone();
            if let Some(size) = size {
                options.size = size;
            }
            if let Some(fallback) = fallback {
                options.fallback = fallback;
            }
            if svg {
                for name in &names {
                    let view = IconView::resolve(name, &options);
                    println!("{}", render_icon_svg(&view, &config.theme));
                }
            } else {
                let reports: Vec<IconReport> = names
                    .iter()
                    .map(|name| IconReport {
                        input: name.clone(),
                        normalized: normalize_icon_name(name),
                        icon: resolve_icon(name).map(|icon| icon.id()),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }
        }
        Command::Wordcloud {
            input,
            output,
            seed,
        } => {
            let raw = read_payload(input.input.as_deref())?;
            let collection = normalize_chart_data(&raw)
                .ok_or_else(|| anyhow::anyhow!("Payload is not chart data"))?;
            let words = WordItem::from_chart(&collection);
            let palette = &config.theme.word_palette;
            let layout = match seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    compute_word_cloud_layout_with_rng(&words, &config.word_cloud, palette, &mut rng)
                }
                None => compute_word_cloud_layout(&words, &config.word_cloud, palette),
            };
            if !layout.dropped.is_empty() {
                tracing::info!(count = layout.dropped.len(), "some words did not fit");
            }
            emit(&output, &config, &layout, || {
                render_word_cloud_svg(&layout, &config.theme)
            })?;
        }
        Command::Pie { input, output } => {
            let raw = read_payload(input.input.as_deref())?;
            let collection = normalize_chart_data_strict(&raw)
                .ok_or_else(|| anyhow::anyhow!("Payload is not chart data"))?;
            let layout = compute_pie_layout(&collection, &config.pie, &config.theme.chart_palette);
            emit(&output, &config, &layout, || {
                render_pie_svg(&layout, &config.theme, config.pie.show_percent)
            })?;
        }
        Command::Pyramid { input, output } => {
            let raw = read_payload(input.input.as_deref())?;
            let collection = normalize_chart_data(&raw)
                .ok_or_else(|| anyhow::anyhow!("Payload is not chart data"))?;
            let layout =
                compute_pyramid_layout(&collection, &config.pyramid, &config.theme.chart_palette);
            emit(&output, &config, &layout, || {
                render_pyramid_svg(&layout, &config.theme)
            })?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn emit<T: Serialize>(
    output: &OutputArgs,
    config: &Config,
    layout: &T,
    render: impl FnOnce() -> String,
) -> Result<()> {
    match output.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(layout)?;
            match output.output.as_deref() {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        OutputFormat::Svg => {
            write_output_svg(&render(), output.output.as_deref())?;
        }
        OutputFormat::Png => {
            let path = ensure_output(&output.output, "png")?;
            write_output_png(&render(), &path, &config.render)?;
        }
    }
    Ok(())
}

fn read_payload(path: Option<&Path>) -> Result<Value> {
    let text = read_input(path)?;
    Ok(parse_payload(&text)?)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_wordcloud_flags() {
        let args = Args::parse_from([
            "igr",
            "wordcloud",
            "-i",
            "words.json",
            "-e",
            "json",
            "--seed",
            "4",
        ]);
        match args.command {
            Command::Wordcloud { input, output, seed } => {
                assert_eq!(input.input, Some(PathBuf::from("words.json")));
                assert!(matches!(output.output_format, OutputFormat::Json));
                assert_eq!(seed, Some(4));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn png_needs_an_output_path() {
        assert!(ensure_output(&None, "png").is_err());
    }
}
