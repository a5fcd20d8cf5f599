use crate::format::{format_category_name, format_number_fr, html_escape, truncate_chars};
use seo_kit_core::{PageRecord, PageRepository, Priority, SiteConfig};

/// Stylesheet shared by every generated page, served as `/style.css`
pub const STYLESHEET: &str = r#":root {
    --green-700: #1f6f43;
    --green-100: #e6f4ea;
    --gray-900: #1d1d1f;
    --gray-600: #5f6368;
    --gray-200: #e5e7eb;
    --radius: 8px;
}
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    line-height: 1.6;
    color: var(--gray-900);
    max-width: 960px;
    margin: 0 auto;
    padding: 1.5rem;
}
a { color: var(--green-700); }
header.site-header { margin-bottom: 2rem; }
header.site-header a { font-weight: 700; font-size: 1.2rem; text-decoration: none; }
section { margin: 2.5rem 0; }
.hero h1 { font-size: 2.4rem; }
.hero p { color: var(--gray-600); }
.section-title { font-size: 1.4rem; margin-bottom: 1rem; }
.card-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
    gap: 1rem;
}
.card {
    border: 1px solid var(--gray-200);
    border-radius: var(--radius);
    padding: 1rem;
    height: 100%;
}
.card:hover { border-color: var(--green-700); }
.card-title { font-weight: 600; color: var(--gray-900); }
.card-meta { color: var(--gray-600); font-size: 0.85rem; }
.page-list { list-style: none; }
.page-list li { padding: 0.4rem 0; border-bottom: 1px solid var(--gray-200); }
.category-grid { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.category-pill {
    display: inline-flex;
    gap: 0.5rem;
    padding: 0.3rem 0.8rem;
    border-radius: 999px;
    background: var(--green-100);
}
.category-count { font-weight: 700; color: var(--green-700); }
.breadcrumb { color: var(--gray-600); font-size: 0.9rem; margin-bottom: 1.5rem; }
.article-header h1 { font-size: 2rem; margin-bottom: 0.5rem; }
.article-tags { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.tag {
    font-size: 0.8rem;
    padding: 0.2rem 0.6rem;
    border-radius: 4px;
    background: var(--gray-200);
}
.article-placeholder {
    margin: 2rem 0;
    padding: 1.5rem;
    border: 1px dashed var(--gray-200);
    border-radius: var(--radius);
    color: var(--gray-600);
}
.related-section h2 { font-size: 1.2rem; margin-bottom: 0.75rem; }
footer { margin-top: 3rem; color: var(--gray-600); font-size: 0.85rem; text-align: center; }
"#;

/// Wrap page content in the shared document shell.
///
/// `title` and `description` must be unescaped; `path` is the canonical
/// path starting with `/`.
fn layout(site: &SiteConfig, title: &str, description: &str, path: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <link rel="canonical" href="{base_url}{path}">
    <meta property="og:title" content="{title}">
    <meta property="og:description" content="{description}">
    <meta property="og:site_name" content="{site_name}">
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <header class="site-header"><a href="/">{site_name}</a></header>
    <main>
{body}
    </main>
    <footer>{site_name}</footer>
</body>
</html>
"#,
        lang = html_escape(&site.site.lang),
        title = html_escape(title),
        description = html_escape(description),
        base_url = html_escape(&site.site.base_url),
        path = html_escape(path),
        site_name = html_escape(&site.site.name),
        body = body,
    )
}

fn page_link(page: &PageRecord) -> String {
    format!(
        r#"<a href="/{}">{}</a>"#,
        html_escape(&page.slug),
        html_escape(&page.title)
    )
}

/// Render the homepage: priority cards, discovery list and category pills
pub fn render_home(repo: &PageRepository, site: &SiteConfig) -> String {
    let categories = repo.all_categories();
    let total: usize = categories.iter().map(|c| c.count).sum();
    let top_pages = repo.pages_by_priority(&Priority::Top);
    let high_pages: Vec<&PageRecord> = repo
        .pages_by_priority(&Priority::High)
        .into_iter()
        .take(site.homepage.high_priority_limit)
        .collect();

    let mut body = String::new();

    let tagline = if site.site.tagline.is_empty() {
        String::new()
    } else {
        format!("{} &mdash; ", html_escape(&site.site.tagline))
    };
    body.push_str(&format!(
        r#"<section class="hero">
    <h1>{}</h1>
    <p>{}{} pages</p>
</section>
"#,
        html_escape(&site.site.name),
        tagline,
        format_number_fr(total as f64)
    ));

    if !top_pages.is_empty() {
        let cards: String = top_pages
            .iter()
            .map(|p| {
                let meta = p
                    .description
                    .as_deref()
                    .map(|d| {
                        format!(
                            r#"
            <div class="card-meta" style="margin-top: 0.3rem">{}</div>"#,
                            html_escape(&truncate_chars(d, site.homepage.description_max_chars))
                        )
                    })
                    .unwrap_or_default();
                format!(
                    r#"
    <a href="/{}" style="text-decoration: none">
        <div class="card">
            <div class="card-title">{}</div>{}
        </div>
    </a>"#,
                    html_escape(&p.slug),
                    html_escape(&p.title),
                    meta
                )
            })
            .collect();

        body.push_str(&format!(
            r#"<section>
    <h2 class="section-title">Pages prioritaires</h2>
    <div class="card-grid">{}
    </div>
</section>
"#,
            cards
        ));
    }

    if !high_pages.is_empty() {
        let items: String = high_pages
            .iter()
            .map(|p| {
                let volume = p
                    .volume()
                    .map(|v| {
                        format!(
                            r#" <span class="card-meta" style="margin-left: 0.75rem">{} rech./mois</span>"#,
                            format_number_fr(v)
                        )
                    })
                    .unwrap_or_default();
                format!("\n        <li>{}{}</li>", page_link(p), volume)
            })
            .collect();

        body.push_str(&format!(
            r#"<section>
    <h2 class="section-title">A decouvrir</h2>
    <ul class="page-list">{}
    </ul>
</section>
"#,
            items
        ));
    }

    let pills: String = categories
        .iter()
        .map(|c| {
            format!(
                r#"
        <div class="category-pill"><span>{}</span><span class="category-count">{}</span></div>"#,
                html_escape(&format_category_name(&c.category)),
                c.count
            )
        })
        .collect();
    body.push_str(&format!(
        r#"<section id="categories">
    <h2 class="section-title">Categories ({})</h2>
    <div class="category-grid">{}
    </div>
</section>"#,
        categories.len(),
        pills
    ));

    let title = if site.site.tagline.is_empty() {
        site.site.name.clone()
    } else {
        format!("{} — {}", site.site.name, site.site.tagline)
    };

    layout(site, &title, &site.site.description, "/", &body)
}

/// Render one article page, or `None` when the slug is not in the dataset
pub fn render_page(repo: &PageRepository, site: &SiteConfig, slug: &str) -> Option<String> {
    let page = repo.page(slug)?;
    let related = repo.related_pages(slug, site.homepage.related_limit);

    let category = html_escape(&page.category);
    let title = html_escape(&page.title);

    let mut tags = vec![
        format!(r#"<span class="tag">{}</span>"#, category),
        format!(
            r#"<span class="tag">priorite : {}</span>"#,
            html_escape(page.priority.as_str())
        ),
    ];
    if let Some(volume) = page.volume() {
        tags.push(format!(
            r#"<span class="tag">{} rech./mois</span>"#,
            format_number_fr(volume)
        ));
    }
    if let Some(kd) = page.haloscan_kd.as_ref().filter(|m| m.is_number()) {
        tags.push(format!(r#"<span class="tag">KD : {}</span>"#, kd));
    }

    let description_html = page
        .description
        .as_deref()
        .map(|d| {
            format!(
                r#"
        <p style="color: var(--gray-600)">{}</p>"#,
                html_escape(d)
            )
        })
        .unwrap_or_default();

    let mut body = format!(
        r#"<nav class="breadcrumb">
    <a href="/">Accueil</a> &rsaquo; <span>{category}</span> &rsaquo; <span>{title}</span>
</nav>
<article>
    <header class="article-header">
        <h1>{title}</h1>{description_html}
        <div class="article-tags" style="margin-top: 0.75rem">
            {tags}
        </div>
    </header>
    <div class="article-placeholder">
        <p>Contenu a venir &mdash; cette page sera enrichie avec des comparatifs produits, guides d&#x27;achat et liens d&#x27;affiliation.</p>
    </div>
</article>"#,
        tags = tags.join("\n            "),
    );

    if !related.is_empty() {
        let items: String = related
            .iter()
            .map(|r| format!("\n        <li>{}</li>", page_link(r)))
            .collect();
        body.push_str(&format!(
            r#"
<section class="related-section">
    <h2>Dans la meme categorie</h2>
    <ul class="page-list">{}
    </ul>
</section>"#,
            items
        ));
    }

    let document_title = format!("{} | {}", page.title, site.site.name);
    let description = page
        .description
        .clone()
        .unwrap_or_else(|| format!("{} — guide, comparatif et meilleurs prix.", page.title));

    Some(layout(
        site,
        &document_title,
        &description,
        &format!("/{}", page.slug),
        &body,
    ))
}

pub fn render_not_found(site: &SiteConfig) -> String {
    let body = r#"<section class="hero">
    <h1>Page introuvable</h1>
    <p>Cette page n&#x27;existe pas ou n&#x27;est pas encore publiee. <a href="/">Retour a l&#x27;accueil</a></p>
</section>"#;
    layout(
        site,
        &format!("Page introuvable | {}", site.site.name),
        &site.site.description,
        "/404",
        body,
    )
}
