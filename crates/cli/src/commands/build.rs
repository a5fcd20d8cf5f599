use super::load_site;
use anyhow::{Context, Result};
use chrono::Local;
use seo_kit_generator::generate_site;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Build static site for deployment
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let (site, repo) = load_site(&path)?;

    println!("✓ Loaded: {}", site.site.name);
    println!("  Pages: {}", repo.len());
    println!("  Published: {}", repo.all_slugs().len());
    for slug in repo.missing_deploy_slugs() {
        eprintln!("   ⚠ Warning: deploy slug has no page: {}", slug);
    }
    println!();

    println!("📄 Rendering pages...");
    let generated = generate_site(&repo, &site, Local::now().date_naive());
    for slug in &generated.skipped {
        eprintln!(
            "   ⚠ Warning: skipping page with unusable slug {:?} (expected [a-z0-9-])",
            slug
        );
    }

    fs::create_dir_all(&output).context("Failed to create output directory")?;
    for (rel_path, html) in &generated.pages {
        write_output(&output, rel_path, html.as_bytes())?;
    }
    println!("   ✓ Wrote {} files", generated.pages.len());

    for (rel_path, data) in &generated.assets {
        write_output(&output, rel_path, data)?;
    }
    println!("   ✓ Wrote {} assets", generated.assets.len());

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

/// Write one generated file below `output`.
///
/// `rel_path` must be a plain relative path: no root, prefix, `.` or `..`
/// components, so nothing can land outside the output directory.
fn write_output(output: &Path, rel_path: &str, contents: &[u8]) -> Result<()> {
    let rel = Path::new(rel_path);
    let is_plain = rel.components().next().is_some()
        && rel.components().all(|c| matches!(c, Component::Normal(_)));
    if !is_plain {
        anyhow::bail!("Refusing to write outside the output directory: '{}'", rel_path);
    }

    let dst = output.join(rel);
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&dst, contents).with_context(|| format!("Failed to write {}", dst.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;

    #[tokio::test]
    async fn test_build_writes_site() {
        let dir = tempfile::tempdir().unwrap();
        init::run(dir.path().to_path_buf(), None).await.unwrap();

        let output = dir.path().join("dist");
        run(dir.path().to_path_buf(), output.clone()).await.unwrap();

        assert!(output.join("index.html").exists());
        assert!(output.join("404.html").exists());
        assert!(output.join("sitemap.xml").exists());
        assert!(output.join("style.css").exists());
        assert!(output.join("cache-poubelle/index.html").exists());
        // Not on the sample allow-list
        assert!(!output.join("poubelle-bureau/index.html").exists());
    }

    #[tokio::test]
    async fn test_build_stays_inside_output() {
        let dir = tempfile::tempdir().unwrap();
        let site_dir = dir.path().join("site");
        fs::create_dir_all(site_dir.join("data")).unwrap();
        fs::write(
            site_dir.join("site.toml"),
            "[site]\nname = \"Mister Bin\"\nbase_url = \"https://misterbin.example\"\n\n[data]\npages = \"data/pages.json\"\n",
        )
        .unwrap();
        fs::write(
            site_dir.join("data/pages.json"),
            r#"{
                "../escaped": {"category": "x", "title": "Escaped", "priority": "top"},
                "": {"category": "x", "title": "Empty", "priority": "top"},
                "bac-50l": {"category": "x", "title": "Bac 50L", "priority": "low"}
            }"#,
        )
        .unwrap();

        let output = site_dir.join("dist");
        run(site_dir.clone(), output.clone()).await.unwrap();

        assert!(output.join("bac-50l/index.html").exists());
        assert!(!site_dir.join("escaped").exists());
        assert!(!output.join("escaped").exists());
        assert!(!dir.path().join("escaped").exists());
    }

    #[test]
    fn test_write_output_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("dist");

        for bad in ["../escaped/index.html", "/index.html", "", "./index.html", "a/../../b"] {
            let result = write_output(&output, bad, b"x");
            assert!(
                result.unwrap_err().to_string().contains("outside the output directory"),
                "accepted {:?}",
                bad
            );
        }
        assert!(!dir.path().join("escaped").exists());

        write_output(&output, "bac-50l/index.html", b"ok").unwrap();
        assert_eq!(fs::read(output.join("bac-50l/index.html")).unwrap(), b"ok");
    }

    #[tokio::test]
    async fn test_build_missing_site() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path().join("nope"), dir.path().join("dist")).await;
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }
}
