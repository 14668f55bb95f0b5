use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use doc_scout::core::registry::SourceRegistry;
use doc_scout::core::AppState;
use doc_scout::search;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = env::args().skip(1);
    let Some(query) = args.next() else {
        eprintln!("usage: doc-scout <query> [source-id ...]");
        std::process::exit(2);
    };
    let source_ids: Vec<String> = args.collect();

    let registry_path = env::var("DOC_SCOUT_SOURCES")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("public_sources.json"));
    let registry = Arc::new(SourceRegistry::load(&registry_path));
    info!(
        "Registry at {}: {} sources configured",
        registry_path.display(),
        registry.len()
    );

    let state = Arc::new(AppState::new(registry)?);
    let ids = (!source_ids.is_empty()).then_some(source_ids);
    let max_results = state.limits.default_max_results;
    let results = search::search_sources(&state, &query, ids.as_deref(), max_results).await;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
