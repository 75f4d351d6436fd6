use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{Instant, sleep_until, timeout, timeout_at};
use tracing::{debug, error, info, instrument, warn};

use super::dedup_key;
use super::error::UnitError;
use super::types::{EngineHandles, RetrievalOutcome, RetrievalSettings, RetrievalStats};
use crate::constants::MIN_DOCUMENT_CHARS;
use crate::credibility::extract_domain;
use crate::embedding::{ClaimEmbeddingCache, TextEmbedder};
use crate::hashing::url_fingerprint;
use crate::relevance::{BestSentence, select_best_sentence};
use crate::search::{SearchError, SearchHit};
use crate::stance::{StanceClassifier, StancePrediction};
use crate::text::split_sentences;
use crate::verdict::Evidence;

type SearchOutput = (usize, Result<Vec<SearchHit>, SearchError>);
type UnitOutput = (String, Result<Evidence, UnitError>);

/// Fans queries out to the search chain and unique URLs out to a bounded
/// worker pool, then collects evidence until done or the deadline fires.
pub struct RetrievalCoordinator {
    handles: EngineHandles,
    settings: RetrievalSettings,
    workers: Arc<Semaphore>,
    inference: Arc<Semaphore>,
    claim_cache: Arc<ClaimEmbeddingCache>,
}

/// Per-claim state shared by the units of one run.
struct UnitContext {
    handles: EngineHandles,
    workers: Arc<Semaphore>,
    inference: Arc<Semaphore>,
    per_fetch_timeout: Duration,
    min_similarity: Option<f64>,
    claim: Arc<str>,
    claim_vector: Arc<Vec<f32>>,
}

impl RetrievalCoordinator {
    pub fn new(handles: EngineHandles, settings: RetrievalSettings) -> Self {
        Self {
            workers: Arc::new(Semaphore::new(settings.worker_pool_size.max(1))),
            inference: Arc::new(Semaphore::new(settings.inference_concurrency.max(1))),
            claim_cache: Arc::new(ClaimEmbeddingCache::new()),
            handles,
            settings,
        }
    }

    pub fn settings(&self) -> &RetrievalSettings {
        &self.settings
    }

    pub fn handles(&self) -> &EngineHandles {
        &self.handles
    }

    /// Retrieves and scores evidence for `claim`.
    ///
    /// Never fails: per-query and per-URL errors are logged and dropped, and
    /// on deadline expiry the evidence completed so far is returned.
    #[instrument(skip_all, fields(queries = queries.len(), max_results))]
    pub async fn retrieve(
        &self,
        claim: &str,
        queries: &[String],
        max_results: usize,
    ) -> RetrievalOutcome {
        let started = Instant::now();
        let deadline = started + self.settings.overall_timeout;
        let mut stats = RetrievalStats {
            queries_issued: queries.len(),
            ..Default::default()
        };

        let mut searches: JoinSet<SearchOutput> = JoinSet::new();
        for (index, query) in queries.iter().enumerate() {
            let search = Arc::clone(&self.handles.search);
            let workers = Arc::clone(&self.workers);
            let query = query.clone();
            searches.spawn(async move {
                let _permit = workers.acquire_owned().await.ok();
                (index, search.search(&query, max_results).await)
            });
        }

        let claim_vector = match timeout_at(deadline, self.embed_claim(claim)).await {
            Ok(Ok(vector)) => vector,
            Ok(Err(e)) => {
                warn!(error = %e, "Claim embedding failed, no evidence can be scored");
                searches.abort_all();
                return RetrievalOutcome {
                    evidence: Vec::new(),
                    stats,
                };
            }
            Err(_) => {
                warn!("Deadline reached while embedding the claim");
                searches.abort_all();
                stats.queries_failed = queries.len();
                stats.deadline_exceeded = true;
                return RetrievalOutcome {
                    evidence: Vec::new(),
                    stats,
                };
            }
        };

        let ctx = Arc::new(UnitContext {
            handles: self.handles.clone(),
            workers: Arc::clone(&self.workers),
            inference: Arc::clone(&self.inference),
            per_fetch_timeout: self.settings.per_fetch_timeout,
            min_similarity: self.settings.min_similarity,
            claim: Arc::from(claim),
            claim_vector,
        });

        let mut seen: HashSet<String> = HashSet::new();
        let mut units: JoinSet<UnitOutput> = JoinSet::new();
        let mut spawned = 0usize;
        let mut evidence = Vec::new();

        let expiry = sleep_until(deadline);
        tokio::pin!(expiry);

        loop {
            if searches.is_empty() && units.is_empty() {
                break;
            }

            tokio::select! {
                biased;

                () = &mut expiry => {
                    stats.deadline_exceeded = true;
                    stats.units_cancelled = units.len();
                    stats.queries_failed += searches.len();
                    warn!(
                        pending_units = units.len(),
                        pending_queries = searches.len(),
                        completed = evidence.len(),
                        "Overall deadline reached, cancelling outstanding work"
                    );
                    searches.abort_all();
                    units.abort_all();
                    break;
                }

                Some(joined) = searches.join_next() => match joined {
                    Ok((index, Ok(hits))) => {
                        debug!(query_index = index, hits = hits.len(), "Search finished");
                        stats.search_hits += hits.len();

                        for hit in hits {
                            let Some(key) = dedup_key(&hit.url) else {
                                continue;
                            };
                            let url_id = url_fingerprint(&key);
                            if !seen.insert(key) {
                                continue;
                            }
                            stats.unique_urls += 1;

                            if spawned >= self.settings.max_documents {
                                stats.urls_over_limit += 1;
                                continue;
                            }
                            spawned += 1;
                            debug!(url_id, url = %hit.url, query_index = index, "Queued document");

                            let ctx = Arc::clone(&ctx);
                            let url = hit.url;
                            units.spawn(async move {
                                let result = process_unit(&ctx, &url).await;
                                (url, result)
                            });
                        }
                    }
                    Ok((index, Err(e))) => {
                        stats.queries_failed += 1;
                        warn!(query_index = index, error = %e, "Search failed for query");
                    }
                    Err(e) => {
                        stats.queries_failed += 1;
                        error!(error = %e, "Search task failed");
                    }
                },

                Some(joined) = units.join_next() => match joined {
                    Ok((url, Ok(item))) => {
                        stats.units_succeeded += 1;
                        debug!(
                            url = %url,
                            stance = %item.stance,
                            similarity = item.similarity,
                            "Evidence collected"
                        );
                        evidence.push(item);
                    }
                    Ok((url, Err(e))) => {
                        stats.units_failed += 1;
                        warn!(url = %url, error = %e, "Dropped document");
                    }
                    Err(e) => {
                        stats.units_failed += 1;
                        error!(error = %e, "Retrieval unit failed");
                    }
                },
            }
        }

        info!(
            evidence = evidence.len(),
            unique_urls = stats.unique_urls,
            units_failed = stats.units_failed,
            units_cancelled = stats.units_cancelled,
            deadline_exceeded = stats.deadline_exceeded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Retrieval finished"
        );

        RetrievalOutcome { evidence, stats }
    }

    async fn embed_claim(&self, claim: &str) -> Result<Arc<Vec<f32>>, UnitError> {
        let permit = Arc::clone(&self.inference).acquire_owned().await?;
        let cache = Arc::clone(&self.claim_cache);
        let embedder = Arc::clone(&self.handles.embedder);
        let claim = claim.to_string();

        let vector = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            cache.get_or_embed(&claim, embedder.as_ref())
        })
        .await??;

        Ok(vector)
    }
}

/// fetch → clean → segment → best sentence → stance, for one unique URL.
async fn process_unit(ctx: &UnitContext, url: &str) -> Result<Evidence, UnitError> {
    let _worker = Arc::clone(&ctx.workers).acquire_owned().await?;

    let text = match timeout(ctx.per_fetch_timeout, ctx.handles.fetcher.fetch(url)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(UnitError::FetchTimeout {
                timeout: ctx.per_fetch_timeout,
            });
        }
    };

    let chars = text.chars().count();
    if chars < MIN_DOCUMENT_CHARS {
        return Err(UnitError::TooShort {
            chars,
            min: MIN_DOCUMENT_CHARS,
        });
    }

    let sentences = split_sentences(&text);
    if sentences.is_empty() {
        return Err(UnitError::NoSentences);
    }

    let permit = Arc::clone(&ctx.inference).acquire_owned().await?;
    let embedder = Arc::clone(&ctx.handles.embedder);
    let classifier = Arc::clone(&ctx.handles.classifier);
    let claim = Arc::clone(&ctx.claim);
    let claim_vector = Arc::clone(&ctx.claim_vector);
    let floor = ctx.min_similarity;

    let (best, prediction) = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        score_document(
            &claim,
            &claim_vector,
            &sentences,
            embedder.as_ref(),
            classifier.as_ref(),
            floor,
        )
    })
    .await??;

    let domain = extract_domain(url);
    let source_weight = ctx.handles.credibility.weight_for(&domain);

    Ok(Evidence {
        url: url.to_string(),
        domain,
        best_sentence: best.sentence,
        similarity: best.similarity,
        stance: prediction.label,
        stance_confidence: prediction.confidence,
        source_weight,
    })
}

fn score_document(
    claim: &str,
    claim_vector: &[f32],
    sentences: &[String],
    embedder: &dyn TextEmbedder,
    classifier: &dyn StanceClassifier,
    floor: Option<f64>,
) -> Result<(BestSentence, StancePrediction), UnitError> {
    let best =
        select_best_sentence(claim_vector, sentences, embedder)?.ok_or(UnitError::NoSentences)?;

    if let Some(floor) = floor
        && best.similarity < floor
    {
        return Err(UnitError::BelowSimilarityFloor {
            similarity: best.similarity,
            floor,
        });
    }

    let prediction = classifier.classify(&best.sentence, claim)?;
    Ok((best, prediction))
}
