use super::load_site;
use seo_kit_validator::validate_dataset;
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating site at: {}", path.display());

    let (site, repo) = load_site(&path)?;
    println!("✓ site.toml valid");
    println!("  Site: {} ({})", site.site.name, site.site.base_url);

    let report = validate_dataset(&repo);

    for line in &report.info {
        println!("  {}", line);
    }
    for warning in &report.warnings {
        println!("⚠ {}", warning);
    }
    for error in &report.errors {
        eprintln!("✗ {}", error);
    }

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("\n✓ Page data valid ({} warning(s))", report.warnings.len());
    Ok(())
}
