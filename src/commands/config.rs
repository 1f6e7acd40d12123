use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calgrid_core::Category;
use calgrid_core::config::CalGridConfig;
use clap::Args;
use owo_colors::OwoColorize;

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Store events in this directory from now on
    #[arg(long, value_name = "DIR")]
    pub set_data_dir: Option<PathBuf>,

    /// Category for new events when --category is not given
    #[arg(long, value_name = "CATEGORY")]
    pub set_default_category: Option<Category>,
}

pub fn run(mut config: CalGridConfig, config_path: &Path, args: ConfigArgs) -> Result<()> {
    let changed = apply(&mut config, args);

    if changed {
        config
            .save_to(config_path)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("{}", "Configuration saved".green());
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Events:  {}", config.gateway().path().display());
    println!("{}", "Defaults".bold());
    println!("  Category:  {}", config.default_category);

    Ok(())
}

/// Returns whether anything was changed.
fn apply(config: &mut CalGridConfig, args: ConfigArgs) -> bool {
    let mut changed = false;

    if let Some(dir) = args.set_data_dir {
        config.data_dir = dir;
        changed = true;
    }
    if let Some(category) = args.set_default_category {
        config.default_category = category;
        changed = true;
    }

    changed
}
