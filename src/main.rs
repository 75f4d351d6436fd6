//! VeriFact command-line entrypoint.

use anyhow::{Context, bail};
use mimalloc::MiMalloc;

use verifact::config::Config;
use verifact::pipeline::FactChecker;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: verifact \"<claim>\" [--query Q]... [--max-results N]";

#[derive(Debug)]
struct Args {
    claim: String,
    queries: Vec<String>,
    max_results: Option<usize>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut claim = None;
    let mut queries = Vec::new();
    let mut max_results = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--query" | "-q" => {
                queries.push(args.next().context("--query needs a value")?);
            }
            "--max-results" | "-n" => {
                let value = args.next().context("--max-results needs a value")?;
                max_results = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid --max-results '{value}'"))?,
                );
            }
            flag if flag.starts_with('-') => bail!("unknown option '{flag}'\n{USAGE}"),
            _ if claim.is_none() => claim = Some(arg),
            _ => bail!("unexpected argument '{arg}'\n{USAGE}"),
        }
    }

    Ok(Args {
        claim: claim.context(USAGE)?,
        queries,
        max_results,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1).peekable();
    if matches!(args.peek().map(String::as_str), Some("--help" | "-h")) {
        println!("{USAGE}");
        return Ok(());
    }
    let args = parse_args(args)?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let max_results = args.max_results.unwrap_or(config.max_results_per_query);

    tracing::info!(
        max_queries = config.max_queries,
        max_results,
        overall_timeout_ms = config.overall_timeout.as_millis() as u64,
        "VeriFact starting"
    );

    let checker = FactChecker::from_config(config)?;

    let report = if args.queries.is_empty() {
        checker.check_claim_auto(&args.claim, max_results).await?
    } else {
        checker
            .check_claim_with_report(&args.claim, &args.queries, max_results)
            .await?
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
