pub mod config;
pub mod layout;
pub mod rotation;
pub mod upload;
pub mod view;
pub mod years;

use std::path::Path;

use anyhow::{Context, Result};
use polaroid_core::config::GalleryConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Read and validate the gallery config, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<GalleryConfig> {
    let Some(path) = path else {
        return Ok(GalleryConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: GalleryConfig = toml::from_str(&contents).context("Invalid gallery config")?;
    config
        .validate()
        .with_context(|| format!("Rejected config {}", path.display()))?;
    Ok(config)
}

pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
