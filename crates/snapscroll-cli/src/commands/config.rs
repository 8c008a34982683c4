use std::path::Path;

use anyhow::Result;

use snapscroll_core::AppConfig;

/// Print the effective configuration as TOML
pub fn show(config: &AppConfig, path: &Path) -> Result<()> {
    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration to `path`
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Configuration already exists at {}", path.display());
        println!("\nTo overwrite it with defaults, run:");
        println!("  snapscroll config init --force");
        return Ok(());
    }

    AppConfig::default().save_to(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
