// Static site generation: HTML pages, sitemap and CSV export

pub mod export;
pub mod format;
pub mod pages;
pub mod sitemap;

use chrono::NaiveDate;
use seo_kit_core::{PageRepository, SiteConfig, is_url_safe_slug};

pub use export::export_csv;
pub use pages::{STYLESHEET, render_home, render_not_found, render_page};
pub use sitemap::render_sitemap;

pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, html)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
    /// Published slugs left out because they cannot be used as a directory name
    pub skipped: Vec<String>,
}

/// Published slugs that can be written as `<slug>/index.html`
pub fn publishable_slugs(repo: &PageRepository) -> Vec<&str> {
    repo.all_slugs()
        .into_iter()
        .filter(|slug| is_url_safe_slug(slug))
        .collect()
}

/// Render every file of the static site.
///
/// Article pages are produced only for the published slugs, so the
/// deploy allow-list scopes what ends up on disk. Slugs outside
/// `[a-z0-9-]` are skipped and listed in `GeneratedSite::skipped`.
pub fn generate_site(repo: &PageRepository, site: &SiteConfig, lastmod: NaiveDate) -> GeneratedSite {
    let mut pages = Vec::with_capacity(repo.all_slugs().len() + 3);
    let skipped: Vec<String> = repo
        .all_slugs()
        .into_iter()
        .filter(|slug| !is_url_safe_slug(slug))
        .map(String::from)
        .collect();

    pages.push(("index.html".to_string(), render_home(repo, site)));

    for slug in publishable_slugs(repo) {
        if let Some(html) = render_page(repo, site, slug) {
            pages.push((format!("{}/index.html", slug), html));
        }
    }

    pages.push(("404.html".to_string(), render_not_found(site)));
    pages.push((
        "sitemap.xml".to_string(),
        render_sitemap(repo, site, lastmod),
    ));

    GeneratedSite {
        pages,
        assets: vec![("style.css".to_string(), STYLESHEET.as_bytes().to_vec())],
        skipped,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use seo_kit_core::config::parse_site_toml_str;
    use seo_kit_core::{PageRepository, SiteConfig};

    pub const PAGES: &str = r#"{
        "cache-poubelle": {"slug": "cache-poubelle", "category": "cache-poubelle",
            "title": "Cache-poubelle", "description": "Cacher ses poubelles avec style dans le jardin, la cour ou devant la maison sans sacrifier l'accès aux bacs",
            "priority": "top", "haloscan_volume": 27100, "haloscan_kd": 18, "haloscan_cpc": 0.45},
        "abri-poubelle": {"slug": "abri-poubelle", "category": "cache-poubelle",
            "title": "Abri poubelle", "description": "", "priority": "top",
            "haloscan_volume": null, "haloscan_kd": null, "haloscan_cpc": null},
        "poubelle-cuisine": {"slug": "poubelle-cuisine", "category": "type-usage",
            "title": "Poubelle cuisine", "description": "", "priority": "high",
            "haloscan_volume": 12100, "haloscan_kd": "n/a", "haloscan_cpc": null},
        "poubelle-bureau": {"slug": "poubelle-bureau", "category": "type-usage",
            "title": "Poubelle <bureau>", "description": "", "priority": "high",
            "haloscan_volume": "1k", "haloscan_kd": null, "haloscan_cpc": null},
        "bac-50l": {"slug": "bac-50l", "category": "volume",
            "title": "Bac 50L", "description": "", "priority": "low",
            "haloscan_volume": null, "haloscan_kd": null, "haloscan_cpc": null}
    }"#;

    pub fn site(extra: &str) -> SiteConfig {
        let toml = format!(
            r##"
[site]
name = "Mister Bin"
tagline = "Le guide complet des poubelles, tri selectif et compost"
description = "Trouvez la poubelle ideale."
base_url = "https://misterbin.example"

[data]
pages = "data/pages.json"
{}
"##,
            extra
        );
        parse_site_toml_str(&toml).unwrap()
    }

    pub fn repo(site: &SiteConfig) -> PageRepository {
        PageRepository::from_json_str(PAGES, site.deploy_slugs.clone()).unwrap()
    }
}
