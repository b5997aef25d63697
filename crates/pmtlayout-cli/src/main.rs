//! PMT layout generator for box detectors.
//!
//! Computes PMT positions and orientations on the six inner walls of a box,
//! prints a placement summary, and optionally writes the PMTINFO table,
//! a JSON summary, and an HTML viewer page.
//!
//! Usage:
//!   cargo run -p pmtlayout-cli -- --detector-size 10500,35100,9600
//!   cargo run -p pmtlayout-cli -- --config layout.json --output pmtinfo.json --html view.html
//!   RUST_LOG=debug cargo run -p pmtlayout-cli

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use pmtlayout_logic::config::{validate_config, BoxDimensions, LayoutConfig};
use pmtlayout_logic::diagnostics::Severity;
use pmtlayout_logic::placement::{build_layout, Layout};
use pmtlayout_logic::viewer;

mod report;

#[derive(Parser, Debug)]
#[command(name = "pmtlayout")]
#[command(about = "Generate PMT positions for a box detector", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file with a layout configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lx,Ly,Lz of the detector box in mm (comma-separated)
    #[arg(long, value_name = "LX,LY,LZ")]
    detector_size: Option<BoxDimensions>,

    /// Physical diameter of the PMTs in mm
    #[arg(long)]
    pmt_physical_diameter: Option<f64>,

    /// Active photocathode diameter in mm (used for coverage)
    #[arg(long)]
    pmt_active_diameter: Option<f64>,

    /// Distance from PMT edge to the wall it is mounted on, in mm
    #[arg(long)]
    distance_edge_to_wall: Option<f64>,

    /// Desired photocathode coverage (0.0 to 1.0)
    #[arg(long)]
    desired_photo_coverage: Option<f64>,

    /// Minimum gap from PMT edge to the edge of the detector face, in mm
    #[arg(long)]
    min_pmt_edge_to_face_edge_gap: Option<f64>,

    /// Write the PMTINFO table to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the placement summary as JSON to this file
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Write a three.js viewer page to this file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Resolve the effective configuration: defaults, then the config
    /// file, then explicit flags.
    fn layout_config(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => LayoutConfig::default(),
        };

        if let Some(dims) = self.detector_size {
            config.box_dims = dims;
        }
        let sensor = &mut config.sensor;
        if let Some(d) = self.pmt_physical_diameter {
            sensor.physical_diameter = d;
        }
        if let Some(d) = self.pmt_active_diameter {
            sensor.active_diameter = d;
        }
        if let Some(d) = self.distance_edge_to_wall {
            sensor.standoff = d;
        }
        if let Some(gap) = self.min_pmt_edge_to_face_edge_gap {
            sensor.edge_gap = gap;
        }
        if let Some(coverage) = self.desired_photo_coverage {
            config.desired_coverage = coverage;
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<LayoutConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.layout_config()?;
    let errors = validate_config(&config);
    if !errors.is_empty() {
        for e in &errors {
            log::error!("{e}");
        }
        bail!("invalid configuration ({} errors)", errors.len());
    }

    println!("=== PMT Placement ===\n");
    report::print_config(&config);

    let layout = build_layout(&config);
    for d in &layout.summary.diagnostics {
        match d.severity() {
            Severity::Warning => log::warn!("{d}"),
            Severity::Info => log::info!("{d}"),
        }
    }

    println!();
    report::print_summary(&layout.summary);

    write_outputs(&cli, &config, &layout)?;
    Ok(())
}

fn write_outputs(cli: &Cli, config: &LayoutConfig, layout: &Layout) -> Result<()> {
    if let Some(path) = &cli.output {
        let text = layout
            .pmt_info
            .to_ratdb_json()
            .context("Failed to serialize PMTINFO")?;
        write_file(path, &text)?;
        log::info!("PMTINFO saved to {}", path.display());
    }

    if let Some(path) = &cli.summary_json {
        let text = serde_json::to_string_pretty(&layout.summary)
            .context("Failed to serialize summary")?;
        write_file(path, &text)?;
        log::info!("Summary saved to {}", path.display());
    }

    if let Some(path) = &cli.html {
        if layout.pmt_info.is_empty() {
            log::warn!("No PMTs placed; skipping HTML visualization");
        } else {
            let page = viewer::render_html(
                &config.box_dims,
                &layout.pmt_info,
                config.sensor.physical_diameter,
            )
            .context("Failed to render HTML visualization")?;
            write_file(path, &page)?;
            log::info!("HTML visualization saved to {}", path.display());
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmtlayout_logic::config::SensorSpec;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("pmtlayout").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_no_flags_uses_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.layout_config().unwrap(), LayoutConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&[
            "--detector-size",
            "1000,2000,3000",
            "--pmt-physical-diameter",
            "100",
            "--desired-photo-coverage",
            "0.1",
            "--min-pmt-edge-to-face-edge-gap",
            "5",
        ]);
        let config = cli.layout_config().unwrap();
        assert_eq!(config.box_dims.as_array(), [1000.0, 2000.0, 3000.0]);
        assert_eq!(config.sensor.physical_diameter, 100.0);
        assert_eq!(config.sensor.edge_gap, 5.0);
        assert_eq!(config.desired_coverage, 0.1);
        assert_eq!(
            config.sensor.active_diameter,
            SensorSpec::default().active_diameter
        );
    }

    #[test]
    fn test_bad_detector_size_rejected() {
        let argv = ["pmtlayout", "--detector-size", "1000,2000"];
        assert!(Cli::try_parse_from(argv).is_err());
        let argv = ["pmtlayout", "--detector-size", "1000,x,3000"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(
            &path,
            r#"{ "desired_coverage": 0.3, "sensor": { "standoff": 12.0 } }"#,
        )
        .unwrap();

        let path_arg = path.to_str().unwrap();
        let cli = parse(&["--config", path_arg, "--desired-photo-coverage", "0.05"]);
        let config = cli.layout_config().unwrap();
        assert_eq!(config.sensor.standoff, 12.0);
        assert_eq!(config.desired_coverage, 0.05);
    }

    #[test]
    fn test_outputs_written() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("pmtinfo.json");
        let summary = dir.path().join("summary.json");
        let html = dir.path().join("view.html");
        let cli = parse(&[
            "--detector-size",
            "1000,1000,1000",
            "--pmt-physical-diameter",
            "100",
            "--pmt-active-diameter",
            "80",
            "--desired-photo-coverage",
            "0.1",
            "--output",
            out.to_str().unwrap(),
            "--summary-json",
            summary.to_str().unwrap(),
            "--html",
            html.to_str().unwrap(),
        ]);
        let config = cli.layout_config().unwrap();
        let layout = build_layout(&config);
        write_outputs(&cli, &config, &layout).unwrap();

        let table: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(table["x"].as_array().unwrap().len(), 120);
        assert_eq!(table["name"], "PMTINFO");

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
        assert_eq!(summary["total_placed"], 120);

        assert!(fs::read_to_string(&html).unwrap().contains("THREE.Scene"));
    }
}
