//! CLI entrypoint for node-sensing
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use sensing_application::{
    EnrichNodesUseCase, EnrichmentProgress, LookupQuoteUseCase, LookupStructuredUseCase,
    NoProgress, QuoteProvider, ReasoningOracle, SearchProvider, StructuredProvider,
    ValidateConsensusUseCase,
};
use sensing_domain::{BatchSummary, OutputFormat};
use sensing_infrastructure::{
    ConfigLoader, FileConfig, FredStructuredProvider, OpenAiReasoningOracle, SourcesConfig,
    YahooQuoteProvider, build_client, build_search_chain,
};
use sensing_presentation::{
    Cli, Command, ConsoleFormatter, EnrichArgs, ProgressReporter, SimpleProgress, parse_entities,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let Some(Command::Enrich(args)) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("Config: {}", issue);
    }
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.to_string())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let sources_path = args.sources.clone().unwrap_or_else(|| config.sources.clone());
    let sources = SourcesConfig::load(&sources_path)?;

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let entities = parse_entities(&text)
        .with_context(|| format!("Failed to parse entities from {}", args.input.display()))?;
    info!("Read {} entities from {}", entities.len(), args.input.display());

    // === Dependency Injection ===
    let use_case = build_use_case(&config, &sources, &args, cli.quiet)?;

    let results = use_case.enrich_batch(entities).await;
    let summary = BatchSummary::from_results(&results);

    if let Some(path) = &args.write {
        let json = serde_json::to_string_pretty(&results)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote enriched entities to {}", path.display());
    }

    let format = args
        .output
        .or(config.output.format)
        .unwrap_or(OutputFormat::Summary);
    println!("{}", ConsoleFormatter::format(format, &results, &summary));

    Ok(())
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let Some(file_name) = path.file_name() else {
                bail!("--log-file must name a file: {}", path.display());
            };
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn build_use_case(
    config: &FileConfig,
    sources: &SourcesConfig,
    args: &EnrichArgs,
    quiet: bool,
) -> Result<EnrichNodesUseCase> {
    let client = build_client(config.sensing.request_timeout())?;
    let providers = &config.providers;

    let search: Arc<dyn SearchProvider> = Arc::new(build_search_chain(providers, &client));
    info!("Search chain: {}", search.name());

    let oracle = OpenAiReasoningOracle::new(
        client.clone(),
        providers.oracle_key(),
        providers.oracle_base_url(),
        providers.oracle_model(),
    );
    if !oracle.is_configured() {
        warn!("No reasoning oracle key; news search results cannot be turned into states");
    }
    info!("Reasoning oracle: {}", oracle.model());
    let oracle: Arc<dyn ReasoningOracle> = Arc::new(oracle);

    let mut params = config.sensing.to_params();
    if let Some(concurrency) = args.concurrency {
        params = params.with_max_concurrency(concurrency);
    }

    let validator = ValidateConsensusUseCase::new(search, oracle, params.clone());

    let fred: Arc<dyn StructuredProvider> = Arc::new(FredStructuredProvider::new(
        client.clone(),
        providers.fred_key(),
        sources.fred_series.clone(),
    ));

    let progress: Arc<dyn EnrichmentProgress> = if quiet {
        Arc::new(NoProgress)
    } else if config.output.progress {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress)
    };

    let mut use_case = EnrichNodesUseCase::new(validator, sources.routing.clone(), params)
        .with_structured(LookupStructuredUseCase::new(vec![fred]))
        .with_progress(progress);

    if args.no_quotes || !config.quote.enabled {
        info!("Direct quotes disabled");
    } else {
        let yahoo: Arc<dyn QuoteProvider> = Arc::new(YahooQuoteProvider::new(client));
        use_case = use_case.with_quotes(LookupQuoteUseCase::new(
            yahoo,
            sources.symbols.clone(),
            config.quote.to_retry_params(),
        ));
    }

    Ok(use_case)
}
