use super::SITE_TOML;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use seo_kit_core::{Metric, PageRecord, Priority};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_SITE_NAME: &str = "Mister Bin";
const PAGES_JSON: &str = "data/pages.json";

/// Escape a string for safe inclusion in a TOML basic string.
///
/// The site.toml template carries comments, so it is written by hand rather
/// than serialized with the toml crate.
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Initialize a site directory with a site.toml and sample page data.
///
/// # Errors
///
/// Returns an error if:
/// - The directory doesn't exist
/// - site.toml already exists in the directory
/// - File operations fail (permissions, disk space, etc.)
pub async fn run(path: PathBuf, name: Option<String>) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    if !path.exists() {
        anyhow::bail!(
            "Directory '{}' does not exist. Create it first: mkdir {}",
            path.display(),
            path.display()
        );
    }

    let site_toml_path = path.join(SITE_TOML);
    if site_toml_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            SITE_TOML,
            site_toml_path.display()
        );
    }

    let name = name.as_deref().unwrap_or(DEFAULT_SITE_NAME);
    fs::write(&site_toml_path, site_toml_template(name)).context("Failed to write site.toml")?;

    let pages_path = path.join(PAGES_JSON);
    if pages_path.exists() {
        println!("✓ Keeping existing {}", PAGES_JSON);
    } else {
        write_sample_pages(&pages_path)?;
        println!("✓ Wrote sample {}", PAGES_JSON);
    }

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml            ← Edit this to set site name, base URL, deploy list");
    println!("  └── data/");
    println!("      └── pages.json       ← Page metadata keyed by slug");

    println!("\nNext steps:");
    println!("  1. Edit site.toml (set base_url)");
    println!("  2. Replace data/pages.json with your page dataset");
    println!("  3. Preview: seo-kit preview {}", path.display());

    Ok(())
}

fn site_toml_template(name: &str) -> String {
    format!(
        r#"# seo-kit site configuration

[site]
name = "{name}"
tagline = "Le guide complet des poubelles, tri selectif et compost"
description = "Trouvez la poubelle ideale : cuisine, tri selectif, compost, cache-poubelle, design."
base_url = "https://example.com"
lang = "fr"

[data]
# Relative to this directory
pages = "{pages}"

# Publish only these slugs (remove the section to publish every page)
[deploy]
slugs = [
    "cache-poubelle",
    "abri-poubelle",
    "poubelle-cuisine",
    "composteur-appartement",
]

[homepage]
high_priority_limit = 12
description_max_chars = 90
related_limit = 8
"#,
        name = toml_escape_string(name),
        pages = PAGES_JSON,
    )
}

fn sample_page(
    slug: &str,
    category: &str,
    title: &str,
    description: Option<&str>,
    priority: Priority,
    volume: Option<u64>,
) -> PageRecord {
    PageRecord {
        slug: slug.to_string(),
        category: category.to_string(),
        title: title.to_string(),
        description: description.map(str::to_string),
        priority,
        haloscan_volume: volume.map(|v| Metric::Number(v.into())),
        haloscan_kd: None,
        haloscan_cpc: None,
    }
}

fn write_sample_pages(pages_path: &Path) -> Result<()> {
    let samples = [
        sample_page(
            "cache-poubelle",
            "cache-poubelle",
            "Cache-poubelle",
            Some("Bois, metal ou composite : comment choisir un cache-poubelle pour le jardin."),
            Priority::Top,
            Some(27100),
        ),
        sample_page(
            "abri-poubelle",
            "cache-poubelle",
            "Abri poubelle",
            None,
            Priority::Top,
            None,
        ),
        sample_page(
            "poubelle-cuisine",
            "type-usage",
            "Poubelle cuisine",
            None,
            Priority::High,
            Some(12100),
        ),
        sample_page(
            "poubelle-bureau",
            "type-usage",
            "Poubelle bureau",
            None,
            Priority::High,
            None,
        ),
        sample_page(
            "composteur-appartement",
            "compost",
            "Composteur d'appartement",
            None,
            Priority::Medium,
            None,
        ),
    ];

    let pages: IndexMap<String, PageRecord> = samples
        .into_iter()
        .map(|p| (p.slug.clone(), p))
        .collect();

    if let Some(parent) = pages_path.parent() {
        fs::create_dir_all(parent).context("Failed to create data directory")?;
    }
    let json = serde_json::to_string_pretty(&pages).context("Failed to encode sample pages")?;
    fs::write(pages_path, json).context("Failed to write sample pages.json")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::load_site;

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string(r#"Le "Bin""#), r#"Le \"Bin\""#);
        assert_eq!(toml_escape_string("a\\b\nc"), "a\\\\b\\nc");
    }

    #[tokio::test]
    async fn test_init_creates_loadable_site() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path().to_path_buf(), Some("Le \"Bin\"".to_string()))
            .await
            .unwrap();

        let (site, repo) = load_site(dir.path()).unwrap();
        assert_eq!(site.site.name, "Le \"Bin\"");
        assert_eq!(repo.len(), 5);
        assert_eq!(
            repo.all_slugs(),
            vec![
                "cache-poubelle",
                "abri-poubelle",
                "poubelle-cuisine",
                "composteur-appartement"
            ]
        );
        assert_eq!(repo.page("poubelle-cuisine").unwrap().volume(), Some(12100.0));
    }

    #[tokio::test]
    async fn test_init_refuses_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SITE_TOML), "").unwrap();

        let result = run(dir.path().to_path_buf(), None).await;
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_init_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path().join("missing"), None).await;
        assert!(result.is_err());
    }
}
