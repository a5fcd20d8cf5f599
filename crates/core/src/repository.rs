use crate::error::Result;
use crate::types::{CategoryCount, PageRecord, Priority};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read-only view over the page dataset.
///
/// The dataset is loaded once and never changes afterwards, so a single
/// instance can be shared between any number of readers (e.g. behind an
/// `Arc` in request handlers) without locking. Every query is total: lookups
/// that match nothing yield `None` or an empty `Vec`.
#[derive(Debug, Clone)]
pub struct PageRepository {
    pages: IndexMap<String, PageRecord>,
    deploy_slugs: Option<Vec<String>>,
    /// (key, declared slug) for records whose `slug` field disagreed with their key
    slug_mismatches: Vec<(String, String)>,
}

impl PageRepository {
    /// Load the dataset from a `pages.json` file.
    ///
    /// `deploy_slugs` is the optional publishing allow-list that scopes
    /// [`PageRepository::all_slugs`].
    pub fn load<P: AsRef<Path>>(path: P, deploy_slugs: Option<Vec<String>>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading page dataset");
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content, deploy_slugs)
    }

    /// Build the repository from JSON text (useful for testing)
    pub fn from_json_str(content: &str, deploy_slugs: Option<Vec<String>>) -> Result<Self> {
        let raw: IndexMap<String, PageRecord> = serde_json::from_str(content)?;
        Ok(Self::from_pages(raw, deploy_slugs))
    }

    /// Build the repository from an already-decoded slug → record mapping
    pub fn from_pages(
        mut pages: IndexMap<String, PageRecord>,
        deploy_slugs: Option<Vec<String>>,
    ) -> Self {
        // The key is the slug everywhere (URLs, paths, related links)
        let mut slug_mismatches = Vec::new();
        for (key, record) in pages.iter_mut() {
            if record.slug != *key {
                let declared = std::mem::replace(&mut record.slug, key.clone());
                if !declared.is_empty() {
                    warn!(key = %key, declared = %declared, "page slug differs from its key");
                    slug_mismatches.push((key.clone(), declared));
                }
            }
        }

        debug!(
            pages = pages.len(),
            allow_list = deploy_slugs.as_ref().map(Vec::len),
            "page dataset ready"
        );

        Self {
            pages,
            deploy_slugs,
            slug_mismatches,
        }
    }

    /// Slugs to publish: the allow-list entries that exist in the dataset
    /// (allow-list order, first occurrence only), or every dataset key when
    /// no allow-list is configured.
    pub fn all_slugs(&self) -> Vec<&str> {
        match &self.deploy_slugs {
            Some(allowed) => {
                let mut seen = std::collections::HashSet::new();
                allowed
                    .iter()
                    .map(String::as_str)
                    .filter(|slug| self.pages.contains_key(*slug) && seen.insert(*slug))
                    .collect()
            }
            None => self.pages.keys().map(String::as_str).collect(),
        }
    }

    pub fn page(&self, slug: &str) -> Option<&PageRecord> {
        self.pages.get(slug)
    }

    pub fn pages_by_category(&self, category: &str) -> Vec<&PageRecord> {
        self.pages
            .values()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn pages_by_priority(&self, priority: &Priority) -> Vec<&PageRecord> {
        self.pages
            .values()
            .filter(|p| &p.priority == priority)
            .collect()
    }

    /// Categories with their page counts, largest first.
    ///
    /// Equal counts keep the order in which the categories first appear.
    pub fn all_categories(&self) -> Vec<CategoryCount> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for page in self.pages.values() {
            *counts.entry(page.category.as_str()).or_insert(0) += 1;
        }

        let mut categories: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect();
        // sort_by is stable
        categories.sort_by(|a, b| b.count.cmp(&a.count));
        categories
    }

    pub fn all_pages(&self) -> Vec<&PageRecord> {
        self.pages.values().collect()
    }

    /// Other pages of the same category as `slug`, in dataset order
    pub fn related_pages(&self, slug: &str, limit: usize) -> Vec<&PageRecord> {
        let Some(page) = self.page(slug) else {
            return Vec::new();
        };

        self.pages
            .iter()
            .filter(|(key, p)| p.category == page.category && key.as_str() != slug)
            .map(|(_, p)| p)
            .take(limit)
            .collect()
    }

    /// Page count per priority tier, in first-encountered order
    pub fn priority_counts(&self) -> Vec<(Priority, usize)> {
        let mut counts: IndexMap<&Priority, usize> = IndexMap::new();
        for page in self.pages.values() {
            *counts.entry(&page.priority).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(priority, count)| (priority.clone(), count))
            .collect()
    }

    pub fn deploy_slugs(&self) -> Option<&[String]> {
        self.deploy_slugs.as_deref()
    }

    /// Allow-list entries with no matching page
    pub fn missing_deploy_slugs(&self) -> Vec<&str> {
        self.deploy_slugs
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|slug| !self.pages.contains_key(*slug))
            .collect()
    }

    /// Records loaded with a `slug` field different from their key, as
    /// (key, declared slug); those records now carry the key as their slug
    pub fn slug_mismatches(&self) -> &[(String, String)] {
        &self.slug_mismatches
    }

    /// Dataset keys paired with their records, in dataset order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &PageRecord)> {
        self.pages.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
