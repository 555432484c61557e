use anyhow::Context;
use scout::cli::output::Output;
use scout::cli::{Cli, Commands};
use scout::llm::Provider;
use scout::research::Aggregator;
use scout::utils::toml_config::ScoutConfig;
use scout::workflows::MasterPipeline;
use tracing_subscriber::EnvFilter;

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose { "scout=debug" } else { "scout=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if cli.log_json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    init_tracing(&cli);
    let output = if cli.no_color { Output::no_color() } else { Output::new() };

    let config = ScoutConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    match cli.command {
        Commands::Ask { query, json } => {
            let provider = Provider::from_config(&config)?;
            let llm = provider.create_client()?;
            tracing::info!(provider = provider.name(), model = provider.model(), "LLM client ready");

            let pipeline = MasterPipeline::from_config(&config, llm);
            let (result, steps) = pipeline.run_traced(&query).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output.banner();
                output.info(&format!("Query: {query}"));
                if steps.is_empty() {
                    output.warning("The pipeline stopped early, see the logs for details");
                }
                output.synth_output(&result);
                if cli.verbose {
                    output.steps(&steps);
                }
            }
        }
        Commands::Search { query, limit, types } => {
            let aggregator = Aggregator::from_config(&config);
            let limit = limit.unwrap_or(config.connectors.default_limit);
            let types = (!types.is_empty()).then_some(types.as_slice());

            let docs = aggregator.fetch_all(&query, limit, types).await;
            if docs.is_empty() {
                output.warning("No documents gathered; check connector settings and credentials");
            }
            println!("{}", serde_json::to_string_pretty(&docs)?);
        }
    }

    Ok(())
}
