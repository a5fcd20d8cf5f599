use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One content page of the site, keyed by its slug in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Set to the mapping key when loaded into a `PageRepository`
    #[serde(default)]
    pub slug: String,
    pub category: String,
    pub title: String,
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub haloscan_volume: Option<Metric>,
    #[serde(default)]
    pub haloscan_kd: Option<Metric>,
    #[serde(default)]
    pub haloscan_cpc: Option<Metric>,
}

impl PageRecord {
    /// Monthly search volume, only when the upstream value is numeric
    pub fn volume(&self) -> Option<f64> {
        self.haloscan_volume.as_ref().and_then(Metric::as_f64)
    }

    /// Keyword difficulty, only when the upstream value is numeric
    pub fn keyword_difficulty(&self) -> Option<f64> {
        self.haloscan_kd.as_ref().and_then(Metric::as_f64)
    }

    /// Cost per click, only when the upstream value is numeric
    pub fn cpc(&self) -> Option<f64> {
        self.haloscan_cpc.as_ref().and_then(Metric::as_f64)
    }

    /// Whether search metrics have been collected for this page
    pub fn has_metrics(&self) -> bool {
        self.volume().is_some()
    }
}

/// Homepage surfacing tier
///
/// Known tiers are modelled explicitly; anything else the dataset carries
/// is kept verbatim in `Other` so it still groups and filters correctly.
/// Equality and hashing go through `as_str`, so `Other("top")` is `Top`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Top,
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    /// Known tiers, most prominent first
    pub const ALL_KNOWN: [Priority; 4] = [
        Priority::Top,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Top => "top",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        Priority::ALL_KNOWN.iter().any(|p| p.as_str() == self.as_str())
    }
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Priority {}

impl Hash for Priority {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "top" => Priority::Top,
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Other(s),
        }
    }
}

impl From<&str> for Priority {
    fn from(s: &str) -> Self {
        Priority::from(s.to_string())
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search metric as delivered by the keyword tool export.
///
/// The upstream file mixes numbers and strings in these fields, so the value
/// is kept as-is and only `as_f64` decides whether it is usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(serde_json::Number),
    Text(String),
}

impl Metric {
    /// Numeric value; text is never coerced
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Metric::Number(n) => n.as_f64(),
            Metric::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Metric::Number(_))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Number(n) => write!(f, "{}", n),
            Metric::Text(s) => f.write_str(s),
        }
    }
}

/// Number of pages sharing a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Whether `slug` can be used as a URL path segment and a directory name:
/// non-empty and made only of `[a-z0-9-]`
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
