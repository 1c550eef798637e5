use clap::Parser;

use refnet::cache::ConnectionCache;
use refnet::config::CONFIG;
use refnet::finder::NetworkFinder;
use refnet::search::SerperClient;

#[derive(Parser, Debug)]
#[command(about = "Find potential referral contacts at a company")]
struct Args {
    /// Company to search
    company: String,

    /// How many connections to return
    #[arg(long, default_value_t = 3)]
    count: usize,

    /// Job title used for relevance scoring
    #[arg(long, default_value = "")]
    job_title: String,

    /// Comma-separated skills for the skill-matched tier and skill scoring
    #[arg(long, value_delimiter = ',')]
    skills: Vec<String>,

    /// Skip the generic employee tiers (3 and 4)
    #[arg(long)]
    no_employees: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let args = Args::parse();

    let provider = SerperClient::new(CONFIG.serper_api_key.clone());
    let cache = ConnectionCache::new(&CONFIG.cache_file, CONFIG.cache_ttl_hours);
    let finder = NetworkFinder::new(
        provider,
        cache,
        &CONFIG.primary_institution,
        &CONFIG.peer_institution_keyword,
    );

    let result = finder
        .find_connections_tiered(
            &args.company,
            args.count,
            &args.job_title,
            &args.skills,
            !args.no_employees,
        )
        .await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
