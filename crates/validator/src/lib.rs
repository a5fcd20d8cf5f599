// Dataset checks and statistics for a loaded page repository

use seo_kit_core::{
    CategoryCount, Metric, PageRecord, PageRepository, Priority, is_url_safe_slug,
};

const TOP_CATEGORY_COUNT: usize = 10;

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check a loaded dataset for problems that the typed load step lets through.
///
/// Nothing here prevents the site from being built; errors flag records
/// whose pages would be unreachable or unlabeled, warnings flag data the
/// templates will silently skip.
pub fn validate_dataset(repo: &PageRepository) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (key, declared) in repo.slug_mismatches() {
        report.errors.push(format!(
            "Page '{}' declares a different slug '{}'",
            key, declared
        ));
    }

    for (key, page) in repo.entries() {
        check_page(key, page, &mut report);
    }

    for slug in repo.missing_deploy_slugs() {
        report
            .warnings
            .push(format!("Deploy slug '{}' has no matching page", slug));
    }

    let stats = dataset_stats(repo);
    report.info.push(format!("{} pages", stats.total));
    report
        .info
        .push(format!("{} categories", repo.all_categories().len()));
    report
        .info
        .push(format!("{} pages with search metrics", stats.enriched));
    if repo.deploy_slugs().is_some() {
        report
            .info
            .push(format!("{} pages published", repo.all_slugs().len()));
    }

    report
}

fn check_page(key: &str, page: &PageRecord, report: &mut ValidationReport) {
    if key.is_empty() {
        report.errors.push("Page with empty slug".to_string());
    } else if !is_url_safe_slug(key) {
        report
            .warnings
            .push(format!("Slug '{}' is not URL-safe (expected [a-z0-9-])", key));
    }

    if page.title.trim().is_empty() {
        report.errors.push(format!("Page '{}' has an empty title", key));
    }

    if !page.priority.is_known() {
        report.warnings.push(format!(
            "Page '{}' has unknown priority '{}'",
            key, page.priority
        ));
    }

    let metrics = [
        ("haloscan_volume", &page.haloscan_volume),
        ("haloscan_kd", &page.haloscan_kd),
        ("haloscan_cpc", &page.haloscan_cpc),
    ];
    for (field, value) in metrics {
        if let Some(Metric::Text(text)) = value {
            report.warnings.push(format!(
                "Page '{}' has non-numeric {} '{}'",
                key, field, text
            ));
        }
    }
}

/// Summary counts for a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub total: usize,
    pub enriched: usize,
    /// Known tiers in surfacing order (zero counts included), then any
    /// other tier observed in the data
    pub by_priority: Vec<(Priority, usize)>,
    pub top_categories: Vec<CategoryCount>,
}

pub fn dataset_stats(repo: &PageRepository) -> DatasetStats {
    let observed = repo.priority_counts();
    let count_of = |priority: &Priority| {
        observed
            .iter()
            .find(|(p, _)| p == priority)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    };

    let mut by_priority: Vec<(Priority, usize)> = Priority::ALL_KNOWN
        .iter()
        .map(|p| (p.clone(), count_of(p)))
        .collect();
    by_priority.extend(observed.iter().filter(|(p, _)| !p.is_known()).cloned());

    let mut top_categories = repo.all_categories();
    top_categories.truncate(TOP_CATEGORY_COUNT);

    DatasetStats {
        total: repo.len(),
        enriched: repo.all_pages().iter().filter(|p| p.has_metrics()).count(),
        by_priority,
        top_categories,
    }
}
