//! Claim-check entry point.
//!
//! [`FactChecker`] validates caller input, runs the retrieval coordinator
//! under the overall deadline and aggregates whatever evidence came back.
//! Only malformed input is an error; every other failure degrades into a
//! valid [`Verdict`].

mod error;


pub use error::{CheckError, SetupError};

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{Span, field, info, instrument, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::constants::{MAX_CLAIM_CHARS, MAX_RESULTS_PER_QUERY_LIMIT, MIN_CLAIM_CHARS};
use crate::credibility::CredibilityTable;
use crate::embedding::{EmbedderConfig, SentenceEmbedder};
use crate::fetch::{HttpFetcher, build_http_client};
use crate::queries::generate_queries;
use crate::retrieval::{EngineHandles, RetrievalCoordinator, RetrievalSettings, RetrievalStats};
use crate::search::FallbackSearchClient;
use crate::stance::{NliClassifier, StanceConfig};
use crate::text::normalize_whitespace;
use crate::verdict::{Verdict, aggregate};

/// Audit record for one claim check.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimReport {
    pub request_id: Uuid,
    /// Claim after whitespace normalisation.
    pub claim: String,
    /// Queries actually issued, after trimming and deduplication.
    pub queries: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub stats: RetrievalStats,
    pub verdict: Verdict,
}

/// Owns the process-wide model handles and runs claim checks.
pub struct FactChecker {
    config: Config,
    coordinator: RetrievalCoordinator,
}

impl FactChecker {
    pub fn new(handles: EngineHandles, config: Config) -> Self {
        let settings = RetrievalSettings::from(&config);
        Self {
            coordinator: RetrievalCoordinator::new(handles, settings),
            config,
        }
    }

    /// Wires the real adapters. Models without a configured path run in stub
    /// mode.
    pub fn from_config(config: Config) -> Result<Self, SetupError> {
        config.validate()?;

        let embedder = SentenceEmbedder::load(EmbedderConfig::from_path(
            config.embedder_path.clone(),
        ))?;
        if embedder.is_stub() {
            warn!("No embedder model configured, using lexical stub embeddings");
        }

        let stance_config = StanceConfig::from_path(config.stance_model_path.clone())
            .with_temperature(config.stance_temperature);
        let classifier = NliClassifier::load(stance_config)?;
        if !classifier.is_model_loaded() {
            warn!("No stance model configured, using lexical stance heuristic");
        }

        let credibility = match config.credibility_path {
            Some(ref path) => CredibilityTable::from_json_file(path)?,
            None => CredibilityTable::builtin(),
        };

        let client = build_http_client(&config.user_agent, config.per_fetch_timeout)?;
        let search = FallbackSearchClient::from_config(&config, client.clone())?;
        let fetcher = HttpFetcher::new(client);

        info!(
            worker_pool = config.worker_pool_size,
            inference_concurrency = config.inference_concurrency,
            credibility_domains = credibility.len(),
            "Fact checker ready"
        );

        let handles = EngineHandles {
            search: Arc::new(search),
            fetcher: Arc::new(fetcher),
            embedder: Arc::new(embedder),
            classifier: Arc::new(classifier),
            credibility: Arc::new(credibility),
        };

        Ok(Self::new(handles, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Checks `claim` against evidence retrieved for `queries`.
    pub async fn check_claim(
        &self,
        claim: &str,
        queries: &[String],
        max_results: usize,
    ) -> Result<Verdict, CheckError> {
        Ok(self
            .check_claim_with_report(claim, queries, max_results)
            .await?
            .verdict)
    }

    /// Like [`check_claim`](Self::check_claim), with request metadata and
    /// retrieval counters.
    #[instrument(skip_all, fields(request_id = field::Empty))]
    pub async fn check_claim_with_report(
        &self,
        claim: &str,
        queries: &[String],
        max_results: usize,
    ) -> Result<ClaimReport, CheckError> {
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", field::display(request_id));

        let started_at = Utc::now();
        let timer = Instant::now();

        let claim = validate_claim(claim)?;
        let queries = validate_queries(queries, self.config.max_queries)?;
        let max_results = validate_max_results(max_results)?;

        info!(
            claim_chars = claim.chars().count(),
            queries = queries.len(),
            max_results,
            "Checking claim"
        );

        let outcome = self
            .coordinator
            .retrieve(&claim, &queries, max_results)
            .await;
        let verdict = aggregate(outcome.evidence);
        let elapsed_ms = timer.elapsed().as_millis() as u64;

        info!(
            label = %verdict.label,
            net_score = verdict.net_score,
            confidence = verdict.confidence,
            evidence = verdict.evidence.len(),
            elapsed_ms,
            "Claim checked"
        );

        Ok(ClaimReport {
            request_id,
            claim,
            queries,
            started_at,
            elapsed_ms,
            stats: outcome.stats,
            verdict,
        })
    }

    /// Generates queries from the claim and checks it.
    pub async fn check_claim_auto(
        &self,
        claim: &str,
        max_results: usize,
    ) -> Result<ClaimReport, CheckError> {
        let claim = validate_claim(claim)?;
        let queries = generate_queries(&claim, self.config.max_queries);
        self.check_claim_with_report(&claim, &queries, max_results)
            .await
    }
}

/// Normalises whitespace and enforces the claim length bounds.
pub fn validate_claim(claim: &str) -> Result<String, CheckError> {
    let claim = normalize_whitespace(claim);
    let chars = claim.chars().count();

    if chars < MIN_CLAIM_CHARS {
        return Err(CheckError::ClaimTooShort {
            chars,
            min: MIN_CLAIM_CHARS,
        });
    }
    if chars > MAX_CLAIM_CHARS {
        return Err(CheckError::ClaimTooLong {
            chars,
            max: MAX_CLAIM_CHARS,
        });
    }

    Ok(claim)
}

/// Trims, drops blanks and duplicates (first occurrence wins).
pub fn validate_queries(queries: &[String], max_queries: usize) -> Result<Vec<String>, CheckError> {
    let mut cleaned: Vec<String> = Vec::with_capacity(queries.len());
    for query in queries {
        let query = normalize_whitespace(query);
        if !query.is_empty() && !cleaned.contains(&query) {
            cleaned.push(query);
        }
    }

    if cleaned.is_empty() {
        return Err(CheckError::NoQueries);
    }
    if cleaned.len() > max_queries {
        return Err(CheckError::TooManyQueries {
            count: cleaned.len(),
            max: max_queries,
        });
    }

    Ok(cleaned)
}

pub fn validate_max_results(max_results: usize) -> Result<usize, CheckError> {
    if !(1..=MAX_RESULTS_PER_QUERY_LIMIT).contains(&max_results) {
        return Err(CheckError::InvalidMaxResults {
            value: max_results,
            max: MAX_RESULTS_PER_QUERY_LIMIT,
        });
    }
    Ok(max_results)
}
