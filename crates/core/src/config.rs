use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HIGH_PRIORITY_LIMIT: usize = 12;
pub const DEFAULT_DESCRIPTION_MAX_CHARS: usize = 90;
pub const DEFAULT_RELATED_LIMIT: usize = 8;

/// Complete site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteMetadata,
    pub data: DataConfig,
    /// Publishing allow-list; `None` publishes every page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy_slugs: Option<Vec<String>>,
    pub homepage: HomepageConfig,
}

/// Site identity and default SEO metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub name: String,
    pub tagline: String,
    pub description: String,
    /// Absolute origin without trailing slash, e.g. `https://example.com`
    pub base_url: String,
    pub lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to pages.json, relative to the site directory
    pub pages: PathBuf,
}

/// Homepage and article layout limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomepageConfig {
    pub high_priority_limit: usize,
    pub description_max_chars: usize,
    pub related_limit: usize,
}

impl Default for HomepageConfig {
    fn default() -> Self {
        Self {
            high_priority_limit: DEFAULT_HIGH_PRIORITY_LIMIT,
            description_max_chars: DEFAULT_DESCRIPTION_MAX_CHARS,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

impl SiteConfig {
    /// Resolve the dataset path against the site directory
    pub fn pages_path(&self, site_dir: &Path) -> PathBuf {
        site_dir.join(&self.data.pages)
    }
}

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    data: RawData,
    #[serde(default)]
    deploy: Option<RawDeploy>,
    #[serde(default)]
    homepage: Option<RawHomepage>,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    name: String,
    #[serde(default)]
    tagline: String,
    #[serde(default)]
    description: String,
    base_url: String,
    #[serde(default = "default_lang")]
    lang: String,
}

#[derive(Debug, Deserialize)]
struct RawData {
    pages: String, // Convert to PathBuf
}

#[derive(Debug, Deserialize)]
struct RawDeploy {
    slugs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawHomepage {
    high_priority_limit: Option<usize>,
    description_max_chars: Option<usize>,
    related_limit: Option<usize>,
}

fn default_lang() -> String {
    "fr".to_string()
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let base_url = raw.site.base_url.trim().trim_end_matches('/').to_string();
    if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        return Err(Error::InvalidData(format!(
            "site.base_url must start with http:// or https://, got '{}'",
            raw.site.base_url
        )));
    }

    let pages = validate_path(&raw.data.pages, "data.pages")?;

    let homepage = match raw.homepage {
        Some(h) => {
            let defaults = HomepageConfig::default();
            let config = HomepageConfig {
                high_priority_limit: h
                    .high_priority_limit
                    .unwrap_or(defaults.high_priority_limit),
                description_max_chars: h
                    .description_max_chars
                    .unwrap_or(defaults.description_max_chars),
                related_limit: h.related_limit.unwrap_or(defaults.related_limit),
            };
            if config.description_max_chars == 0 {
                return Err(Error::InvalidData(
                    "homepage.description_max_chars must be greater than 0".to_string(),
                ));
            }
            config
        }
        None => HomepageConfig::default(),
    };

    Ok(SiteConfig {
        site: SiteMetadata {
            name: raw.site.name,
            tagline: raw.site.tagline,
            description: raw.site.description,
            base_url,
            lang: raw.site.lang,
        },
        data: DataConfig { pages },
        deploy_slugs: raw.deploy.map(|d| d.slugs),
        homepage,
    })
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so a
/// site.toml can only point at files inside its own directory.
///
/// # Examples
///
/// ```text
/// validate_path("data/pages.json", "data.pages")  → Ok(PathBuf)
/// validate_path("/etc/passwd", "data.pages")      → Err("Absolute paths not allowed...")
/// validate_path("../pages.json", "data.pages")    → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    if path
        .components()
        .any(|c| c == std::path::Component::ParentDir)
    {
        return Err(Error::ConfigParse(format!(
            "Parent directory references (..) not allowed in '{}': '{}'",
            field_name, path_str
        )));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"
[site]
name = "Mister Bin"
base_url = "https://misterbin.example/"

[data]
pages = "data/pages.json"
"##;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_site_toml_str(MINIMAL).unwrap();
        assert_eq!(config.site.name, "Mister Bin");
        assert_eq!(config.site.base_url, "https://misterbin.example");
        assert_eq!(config.site.lang, "fr");
        assert_eq!(config.data.pages, PathBuf::from("data/pages.json"));
        assert!(config.deploy_slugs.is_none());
        assert_eq!(config.homepage.high_priority_limit, 12);
        assert_eq!(config.homepage.description_max_chars, 90);
        assert_eq!(config.homepage.related_limit, 8);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r##"
[site]
name = "Mister Bin"
tagline = "Le guide complet des poubelles"
description = "Trouvez la poubelle ideale"
base_url = "https://misterbin.example"
lang = "fr"

[data]
pages = "pages.json"

[deploy]
slugs = ["cache-poubelle", "abri-poubelle"]

[homepage]
high_priority_limit = 6
"##;

        let config = parse_site_toml_str(toml).unwrap();
        assert_eq!(
            config.deploy_slugs,
            Some(vec![
                "cache-poubelle".to_string(),
                "abri-poubelle".to_string()
            ])
        );
        assert_eq!(config.homepage.high_priority_limit, 6);
        assert_eq!(config.homepage.related_limit, 8);
        assert_eq!(
            config.pages_path(Path::new("site")),
            PathBuf::from("site/pages.json")
        );
    }

    #[test]
    fn test_empty_deploy_list_is_kept() {
        let toml = format!("{}\n[deploy]\nslugs = []\n", MINIMAL);
        let config = parse_site_toml_str(&toml).unwrap();
        assert_eq!(config.deploy_slugs, Some(vec![]));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let toml = MINIMAL.replace("https://misterbin.example/", "misterbin.example");
        let result = parse_site_toml_str(&toml);
        assert!(result.unwrap_err().to_string().contains("site.base_url"));
    }

    #[test]
    fn test_rejects_zero_description_length() {
        let toml = format!("{}\n[homepage]\ndescription_max_chars = 0\n", MINIMAL);
        assert!(parse_site_toml_str(&toml).is_err());
    }

    #[test]
    fn test_rejects_missing_data_section() {
        let toml = r##"
[site]
name = "Mister Bin"
base_url = "https://misterbin.example"
"##;
        let result = parse_site_toml_str(toml);
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_validate_path_valid_relative() {
        assert!(validate_path("pages.json", "data.pages").is_ok());
        assert!(validate_path("data/pages.json", "data.pages").is_ok());
    }

    #[test]
    fn test_validate_path_rejects_absolute() {
        let result = validate_path("/etc/passwd", "data.pages");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Absolute paths not allowed")
        );
    }

    #[test]
    fn test_validate_path_rejects_parent_dir() {
        let result = validate_path("../pages.json", "data.pages");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Parent directory references")
        );
        assert!(validate_path("data/../../pages.json", "data.pages").is_err());
    }

    #[test]
    fn test_validate_path_rejects_empty() {
        let result = validate_path("  ", "data.pages");
        assert!(result.unwrap_err().to_string().contains("Empty path"));
    }

    #[test]
    fn test_config_rejects_path_traversal() {
        let toml = MINIMAL.replace("data/pages.json", "../../secret.json");
        let result = parse_site_toml_str(&toml);
        assert!(result.unwrap_err().to_string().contains("data.pages"));
    }
}
