pub mod build;
pub mod export;
pub mod init;
pub mod preview;
pub mod stats;
pub mod validate;

use anyhow::{Context, Result};
use seo_kit_core::config::{SiteConfig, parse_site_toml};
use seo_kit_core::PageRepository;
use std::path::Path;

pub const SITE_TOML: &str = "site.toml";

/// Load site.toml and the page dataset it points at.
///
/// Any failure here is fatal for the calling command: nothing is served or
/// generated from a partially loaded dataset.
pub fn load_site(path: &Path) -> Result<(SiteConfig, PageRepository)> {
    if !path.exists() {
        anyhow::bail!("Site directory does not exist: {}", path.display());
    }

    let site_toml_path = path.join(SITE_TOML);
    if !site_toml_path.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'seo-kit init {}' first",
            SITE_TOML,
            path.display(),
            path.display()
        );
    }

    let site = parse_site_toml(&site_toml_path)
        .with_context(|| format!("Failed to parse {}", site_toml_path.display()))?;

    let pages_path = site.pages_path(path);
    let repo = PageRepository::load(&pages_path, site.deploy_slugs.clone())
        .with_context(|| format!("Failed to load page data from {}", pages_path.display()))?;

    tracing::info!(pages = repo.len(), published = repo.all_slugs().len(), "site loaded");

    Ok((site, repo))
}
