use anyhow::{bail, Context, Result};
use quizseq::engines::generation::ConsoleProgressCallback;
use quizseq::{AppConfig, Catalog, EvolutionEngine};
use serde_json::{Map, Value};
use std::env;
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let Some(catalog_path) = args.get(1) else {
        bail!("Usage: quizseq <catalog.json> [generations] [config.toml]");
    };

    let mut config = match args.get(3) {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => AppConfig::default(),
    };
    if let Some(raw) = args.get(2) {
        config.evolution.generations = raw
            .parse()
            .with_context(|| format!("Invalid generation count '{}'", raw))?;
    }
    config.validate()?;
    log::info!("Generations: {}", config.evolution.generations);

    let contents = std::fs::read_to_string(catalog_path)
        .with_context(|| format!("Failed to read catalog {}", catalog_path))?;
    let records: Vec<Map<String, Value>> =
        serde_json::from_str(&contents).context("Catalog must be a JSON array of objects")?;
    let catalog = Catalog::from_json_records(
        records,
        &config.catalog.genre_field,
        config.catalog.id_field.as_deref(),
    )?;
    log::info!(
        "Loaded {} items across {} genres (genre field: {})",
        catalog.len(),
        catalog.genres().len(),
        config.catalog.genre_field
    );

    let mut engine = EvolutionEngine::new(Arc::new(catalog), config.evolution, config.evaluation)?;
    let result = engine.run(ConsoleProgressCallback);

    log::info!(
        "Best total {:.3} found in generation {} (cache: {} entries, {} hits)",
        result.best_score.total,
        result.best_generation,
        result.cache.entries,
        result.cache.hits
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
