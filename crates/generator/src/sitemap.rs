use crate::format::html_escape;
use crate::publishable_slugs;
use chrono::NaiveDate;
use seo_kit_core::{PageRepository, SiteConfig};

/// Render `sitemap.xml` for the homepage and every published slug that
/// gets its own page
pub fn render_sitemap(repo: &PageRepository, site: &SiteConfig, lastmod: NaiveDate) -> String {
    let lastmod = lastmod.format("%Y-%m-%d").to_string();
    let base_url = &site.site.base_url;

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    let paths = std::iter::once(String::from("/"))
        .chain(publishable_slugs(repo).into_iter().map(|slug| format!("/{}", slug)));
    for path in paths {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n  </url>\n",
            html_escape(&format!("{}{}", base_url, path)),
            lastmod
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{repo, site};

    #[test]
    fn test_sitemap_lists_published_pages() {
        let site = site("[deploy]\nslugs = [\"bac-50l\", \"cache-poubelle\"]");
        let xml = render_sitemap(
            &repo(&site),
            &site,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );

        assert!(xml.starts_with("<?xml"));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains("<loc>https://misterbin.example/</loc>"));
        assert!(xml.contains("<lastmod>2025-03-01</lastmod>"));

        let bac = xml.find("/bac-50l</loc>").unwrap();
        let cache = xml.find("/cache-poubelle</loc>").unwrap();
        assert!(bac < cache);
        assert!(!xml.contains("/abri-poubelle</loc>"));
    }
}
