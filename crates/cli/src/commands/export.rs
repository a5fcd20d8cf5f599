use super::load_site;
use anyhow::{Context, Result};
use seo_kit_generator::export_csv;
use std::fs;
use std::path::PathBuf;

/// Write the page dataset to a CSV file
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    let (_site, repo) = load_site(&path)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(&output, export_csv(&repo))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("✓ Exported {} pages to {}", repo.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;

    #[tokio::test]
    async fn test_export_sample_site() {
        let dir = tempfile::tempdir().unwrap();
        init::run(dir.path().to_path_buf(), None).await.unwrap();

        let output = dir.path().join("out/pages.csv");
        run(dir.path().to_path_buf(), output.clone()).await.unwrap();

        let csv = fs::read_to_string(&output).unwrap();
        let rows: Vec<&str> = csv.split("\r\n").filter(|line| !line.is_empty()).collect();
        assert_eq!(rows[0], "Catégorie,Slug,Titre,Priorité,Volume,KD,CPC");
        assert_eq!(rows.len(), 1 + 5);
    }

    #[tokio::test]
    async fn test_export_missing_site() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("pages.csv");
        assert!(run(dir.path().to_path_buf(), output.clone()).await.is_err());
        assert!(!output.exists());
    }
}
