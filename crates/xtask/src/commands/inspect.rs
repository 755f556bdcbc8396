//! Rebuild a saved artifact and print its state
//!
//! Loads content through the runtime handle, rebuilds the artifact, and prints
//! its modules, stats, data stores, and tooltip.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;

use forge_content::ArtifactLoader;
use forge_core::data::DataView;
use forge_core::hooks::{TOOLTIP, TooltipContext};
use forge_core::stats::{BaseStats, MultiplierStats};
use forge_core::{Artifact, ArtifactView, DataKey, DataValue, ModuleEntry};
use forge_runtime::{ContentHandle, HostedArtifact, RuntimeConfig};

/// Rebuild a saved artifact and print its state
#[derive(Parser)]
pub struct Inspect {
    /// Saved artifact (RON)
    #[arg(value_name = "ARTIFACT")]
    artifact: PathBuf,

    /// Content directory (defaults to FORGE_CONTENT_DIR or the shipped content)
    #[arg(short, long, value_name = "DIR")]
    content_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Request the advanced tooltip
    #[arg(long)]
    advanced: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (modules, final stats, tooltip)
    Summary,
    /// Full JSON report
    Json,
    /// Pretty-printed debug format
    Debug,
}

/// Everything `inspect` reports, in serializable form.
#[derive(Serialize)]
struct Report<'a> {
    modules: Vec<&'a ModuleEntry>,
    base: &'a BaseStats,
    multipliers: &'a MultiplierStats,
    persistent: BTreeMap<&'a DataKey, &'a DataValue>,
    volatile: BTreeMap<&'a DataKey, &'a DataValue>,
    tooltip: Vec<String>,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let config = RuntimeConfig {
            content_dir: super::content_dir(self.content_dir),
            ..RuntimeConfig::from_env()
        };
        let handle = ContentHandle::load(&config)?;
        let snapshot = handle.snapshot();

        let data = ArtifactLoader::load(&self.artifact)?;
        let mut hosted = HostedArtifact::new(Artifact::new(data));
        let view = hosted
            .view(&snapshot)
            .with_context(|| format!("Failed to rebuild {}", self.artifact.display()))?;

        let tooltip = view.hook(&TOOLTIP).invoke(&TooltipContext {
            advanced: self.advanced,
        });

        println!(
            "{} {}",
            style("Artifact:").bold().cyan(),
            self.artifact.display()
        );
        println!(
            "{} {}",
            style("Content:").bold().cyan(),
            config.content_dir.display()
        );
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&view, &snapshot, &tooltip),
            OutputFormat::Json => print_json(&view, tooltip)?,
            OutputFormat::Debug => println!("{:#?}", view.stats()),
        }

        Ok(())
    }
}

fn print_summary(view: &ArtifactView<'_>, snapshot: &forge_runtime::Snapshot, tooltip: &[String]) {
    println!("{}", style("=== Artifact Summary ===").bold().green());
    println!();

    println!("{}", style("Modules:").bold().yellow());
    for entry in view.modules() {
        match entry.progress() {
            Some(progress) if entry.is_partial() => println!(
                "  {} {} ({}/{})",
                entry.id(),
                entry.level(),
                progress.amount,
                progress.needed
            ),
            _ => println!("  {} {}", entry.id(), entry.level()),
        }
    }
    println!();

    println!("{}", style("Stats:").bold().yellow());
    for stat in snapshot.content().stats.floats() {
        let multiplier = view.stats().multiplier(stat);
        if multiplier == 1.0 {
            println!("  {}: {}", stat.id(), view.stats().get(stat));
        } else {
            println!(
                "  {}: {} ({} x {})",
                stat.id(),
                view.stats().get(stat),
                view.stats().base_value(stat),
                multiplier
            );
        }
    }
    for stat in snapshot.content().stats.tiers() {
        println!("  {}: tier {}", stat.id(), view.stats().tier(stat));
    }
    println!();

    println!("{}", style("Data:").bold().yellow());
    println!("  Persistent keys: {}", view.persistent_data().len());
    println!("  Volatile keys: {}", view.volatile_data().len());
    println!();

    if !tooltip.is_empty() {
        println!("{}", style("Tooltip:").bold().yellow());
        for line in tooltip {
            println!("  {}", line);
        }
    }
}

fn print_json(view: &ArtifactView<'_>, tooltip: Vec<String>) -> Result<()> {
    let report = Report {
        modules: view.modules().iter().collect(),
        base: view.stats().base(),
        multipliers: view.stats().multipliers(),
        persistent: entries(view.persistent_data()),
        volatile: entries(view.volatile_data()),
        tooltip,
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report to JSON")?;
    println!("{}", json);
    Ok(())
}

fn entries(data: &dyn DataView) -> BTreeMap<&DataKey, &DataValue> {
    data.keys()
        .filter_map(|key| data.get(key).map(|value| (key, value)))
        .collect()
}
