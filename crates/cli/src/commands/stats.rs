use super::load_site;
use seo_kit_validator::dataset_stats;
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    let (_site, repo) = load_site(&path)?;
    let stats = dataset_stats(&repo);

    let rule = "=".repeat(50);
    println!("\n{}", rule);
    println!("TOTAL PAGES : {}", stats.total);
    println!("With search metrics : {}", stats.enriched);
    if repo.deploy_slugs().is_some() {
        println!("Published : {}", repo.all_slugs().len());
    }

    println!("\nBy priority :");
    for (priority, count) in &stats.by_priority {
        println!("  {:8} : {}", priority.as_str(), count);
    }

    println!("\nTop {} categories :", stats.top_categories.len());
    for entry in &stats.top_categories {
        println!("  {:40} : {}", entry.category, entry.count);
    }
    println!("{}\n", rule);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;

    #[tokio::test]
    async fn test_stats_sample_site() {
        let dir = tempfile::tempdir().unwrap();
        init::run(dir.path().to_path_buf(), None).await.unwrap();

        run(dir.path().to_path_buf()).await.unwrap();
    }

    #[tokio::test]
    async fn test_stats_missing_site() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path().to_path_buf()).await.is_err());
    }
}
