use seo_kit_core::{Metric, PageRecord, PageRepository};

const HEADER: [&str; 7] = ["Catégorie", "Slug", "Titre", "Priorité", "Volume", "KD", "CPC"];

/// Export the dataset as CSV, grouped by category and sorted by title
/// within each category.
pub fn export_csv(repo: &PageRepository) -> String {
    let mut pages: Vec<&PageRecord> = repo.all_pages();
    pages.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.title.cmp(&b.title))
    });

    let mut out = String::new();
    push_row(&mut out, HEADER.iter().map(|h| h.to_string()));

    for page in pages {
        push_row(
            &mut out,
            [
                page.category.clone(),
                page.slug.clone(),
                page.title.clone(),
                page.priority.to_string(),
                metric_cell(&page.haloscan_volume),
                metric_cell(&page.haloscan_kd),
                metric_cell(&page.haloscan_cpc),
            ]
            .into_iter(),
        );
    }

    out
}

fn metric_cell(metric: &Option<Metric>) -> String {
    metric.as_ref().map(Metric::to_string).unwrap_or_default()
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>) {
    let row: Vec<String> = cells.map(|c| csv_escape(&c)).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// Quote a CSV field when it contains a separator, quote or line break
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
