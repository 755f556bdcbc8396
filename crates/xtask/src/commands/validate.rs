//! Load a content directory and report problems
//!
//! Builds every module, cross-checks materials against modules and stats, and
//! rebuilds each saved artifact under `artifacts/` in strict mode.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use forge_content::{ArtifactLoader, Content, ContentFactory};
use forge_core::{EngineConfig, ForgeEnv, artifact::rebuild};

/// Load a content directory and report problems
#[derive(Parser)]
pub struct Validate {
    /// Content directory (defaults to FORGE_CONTENT_DIR or the shipped content)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Treat cross-reference issues as errors
    #[arg(long)]
    strict: bool,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let dir = super::content_dir(self.dir);
        let content = ContentFactory::new(&dir)
            .load()
            .with_context(|| format!("Failed to load content from {}", dir.display()))?;

        println!("{} {}", style("Content:").bold().cyan(), dir.display());
        println!("  Modules: {}", content.registry.len());
        println!("  Materials: {}", content.materials.len());
        println!("  Stats: {}", content.stats.len());
        println!();

        println!("{}", style("Modules:").bold().yellow());
        for module in content.registry.iter() {
            println!(
                "  {} (priority {}, max level {}) [{}]",
                module.id(),
                module.priority(),
                format_max_level(module.max_level()),
                module.capabilities().join(", ")
            );
        }
        println!();

        let issues = content.issues();
        for issue in &issues {
            println!("{} {}", style("warning:").bold().yellow(), issue);
        }

        let failures = rebuild_saved_artifacts(&dir, &content)?;

        if failures > 0 || (self.strict && !issues.is_empty()) {
            anyhow::bail!(
                "validation failed: {} issue(s), {} artifact failure(s)",
                issues.len(),
                failures
            );
        }

        println!("{}", style("Content is valid").bold().green());
        Ok(())
    }
}

/// Rebuilds every `artifacts/*.ron` with unknown modules treated as errors.
/// Returns the number of artifacts that failed.
fn rebuild_saved_artifacts(dir: &Path, content: &Content) -> Result<usize> {
    let artifacts_dir = dir.join("artifacts");
    if !artifacts_dir.is_dir() {
        return Ok(0);
    }

    let strict = EngineConfig {
        tolerate_unknown_modules: false,
        ..content.config.clone()
    };
    let env = ForgeEnv::new(&content.registry, &content.materials, &content.stats, &strict);

    let mut paths: Vec<PathBuf> = std::fs::read_dir(&artifacts_dir)
        .with_context(|| format!("Failed to read {}", artifacts_dir.display()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    paths.sort();

    println!("{}", style("Artifacts:").bold().yellow());
    let mut failures = 0;
    for path in paths {
        let result = ArtifactLoader::load(&path).and_then(|data| Ok(rebuild(&data, &env)?));
        match result {
            Ok(built) => println!(
                "  {} {} ({} modules)",
                style("ok").green(),
                path.display(),
                built.modules.len()
            ),
            Err(error) => {
                failures += 1;
                println!("  {} {}: {:#}", style("failed").red(), path.display(), error);
            }
        }
    }
    println!();

    Ok(failures)
}

fn format_max_level(max_level: u32) -> String {
    if max_level == u32::MAX {
        "unbounded".to_owned()
    } else {
        max_level.to_string()
    }
}
