use anyhow::Context;
use clap::Parser;
use techcat_core::config::TechcatConfig;
use techcat_resolution::{
    load_catalog, load_mentions, load_resolved_catalog, CatalogBuilder, MentionNormalizer,
    ResolutionPipeline, RunReport,
};
use tracing::info;

mod cli;
mod logging;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("techcat error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::init_tracing(
        &config.observability.log_level,
        cli.json_logs || config.observability.json,
    )?;

    match cli.command {
        Commands::Run { mentions, catalog } => {
            let raw = load_mentions(&mentions)?;
            let existing = load_catalog(catalog.as_deref())?;
            let pipeline = ResolutionPipeline::from_config(config)
                .context("failed to construct the resolution pipeline")?;
            let report = pipeline.run(&raw, &existing).await?;
            print_report(&report)
        }
        Commands::Resume { stage, catalog } => {
            let existing = load_catalog(catalog.as_deref())?;
            let pipeline = ResolutionPipeline::from_config(config)
                .context("failed to construct the resolution pipeline")?;
            let report = pipeline
                .resume(stage, &existing)
                .await
                .with_context(|| format!("failed to resume at stage {stage}"))?;
            print_report(&report)
        }
        Commands::Validate {
            catalog_file,
            mentions,
        } => {
            let catalog = load_resolved_catalog(&catalog_file)?;
            let unique = match mentions {
                Some(path) => MentionNormalizer::new().normalize(&load_mentions(&path)?).mentions.len(),
                None => catalog.total_variants(),
            };
            let builder = CatalogBuilder::new(config.output.clone(), &config.naming.industry);
            let report = builder.validate(&catalog, unique);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.passed {
                anyhow::bail!("catalog {} failed validation", catalog_file.display());
            }
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<TechcatConfig> {
    let mut config = match &cli.config {
        Some(path) => TechcatConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TechcatConfig::default(),
    };
    if let Some(dir) = &cli.artifact_dir {
        config.output.artifact_dir = dir.display().to_string();
    }
    config.validate()?;
    Ok(config)
}

fn print_report(report: &RunReport) -> anyhow::Result<()> {
    info!(
        technologies = report.catalog.total_technologies,
        passed = report.validation.passed,
        "catalog written"
    );
    println!("{}", serde_json::to_string_pretty(&report.summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn artifact_dir_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("techcat.toml");
        std::fs::write(&path, "[output]\nartifact_dir = \"from-file\"\n").unwrap();

        let cli = parse(&[
            "techcat",
            "--config",
            path.to_str().unwrap(),
            "--artifact-dir",
            "from-flag",
            "resume",
            "--stage",
            "build",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.output.artifact_dir, "from-flag");
    }

    #[test]
    fn config_file_values_survive_without_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("techcat.toml");
        std::fs::write(&path, "[canonical]\nhigh_tier = 0.9\n").unwrap();

        let cli = parse(&[
            "techcat",
            "--config",
            path.to_str().unwrap(),
            "validate",
            "--catalog-file",
            "catalog.json",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.canonical.high_tier, 0.9);
        assert_eq!(config.output.artifact_dir, "artifacts");
    }

    #[test]
    fn inverted_tiers_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("techcat.toml");
        std::fs::write(&path, "[canonical]\nhigh_tier = 0.7\nmedium_tier = 0.8\n").unwrap();

        let cli = parse(&[
            "techcat",
            "--config",
            path.to_str().unwrap(),
            "validate",
            "--catalog-file",
            "catalog.json",
        ]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cli = parse(&[
            "techcat",
            "--config",
            path.to_str().unwrap(),
            "validate",
            "--catalog-file",
            "catalog.json",
        ]);
        assert!(load_config(&cli).is_err());
    }
}
