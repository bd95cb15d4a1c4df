use anyhow::Result;
use tracing::{debug, info, warn};

use super::SentenceJob;
use crate::annotator::{AnnotationCache, AnnotationService};
use crate::models::NlpToken;

/// Configuration for Stage 1
#[derive(Debug, Clone)]
pub struct Stage1Config {
    /// Maximum retries per sentence when the service call fails
    pub max_retries: u32,
}

impl Default for Stage1Config {
    fn default() -> Self {
        Self { max_retries: 2 }
    }
}

/// Result of Stage 1 annotation
#[derive(Debug)]
pub struct Stage1Result {
    /// Annotations keyed by filtered sentence text
    pub cache: AnnotationCache,
    /// Number of service requests that succeeded
    pub requests: usize,
    /// Sentences whose text was already annotated
    pub reused: usize,
    /// Sentences with nothing left to annotate
    pub skipped: usize,
}

/// Execute Stage 1: fetch annotations from the NLP service
///
/// Sentences are sent one at a time in tier order. Identical filtered texts
/// are annotated once. A sentence that still fails after the configured
/// retries aborts the run.
pub async fn execute_stage1<S: AnnotationService + ?Sized>(
    service: &S,
    jobs: &[SentenceJob],
    config: &Stage1Config,
) -> Result<Stage1Result> {
    let mut result = Stage1Result {
        cache: AnnotationCache::new(),
        requests: 0,
        reused: 0,
        skipped: 0,
    };

    info!(
        "Stage 1: Annotating {} sentences with {}",
        jobs.len(),
        service.model()
    );

    for job in jobs {
        if !job.needs_annotation() {
            result.skipped += 1;
            continue;
        }
        if result.cache.contains(&job.filtered_text) {
            result.reused += 1;
            continue;
        }

        let tokens = annotate_sentence(service, job, config).await?;
        debug!("Sentence {}: {} tokens", job.index, tokens.len());
        result.cache.insert(job.filtered_text.clone(), tokens);
        result.requests += 1;
    }

    info!(
        "Stage 1: {} requests, {} reused, {} without speech",
        result.requests, result.reused, result.skipped
    );

    Ok(result)
}

async fn annotate_sentence<S: AnnotationService + ?Sized>(
    service: &S,
    job: &SentenceJob,
    config: &Stage1Config,
) -> Result<Vec<NlpToken>> {
    let mut attempt = 0;
    loop {
        match service.fetch(&job.filtered_text).await {
            Ok(tokens) => return Ok(tokens),
            Err(e) if attempt < config.max_retries => {
                attempt += 1;
                warn!(
                    "Sentence {}: {} (retry {} of {})",
                    job.index, e, attempt, config.max_retries
                );
            }
            Err(e) => {
                return Err(e.context(format!(
                    "Annotation failed for sentence {} ({:?})",
                    job.index, job.filtered_text
                )));
            }
        }
    }
}
