/// Decision narration for title resolution
///
/// The selector and the batch loop describe what they decide through a
/// `DiagnosticSink`. Sinks are advisory only and never affect control flow.
use std::time::Instant;

use crate::models::Candidate;

/// A single narrated decision
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic<'a> {
    /// A candidate's title equals the query ignoring case
    ExactMatch {
        query: &'a str,
        candidate: &'a Candidate,
    },
    /// A candidate took the lead in the similarity scan
    NewBest {
        query: &'a str,
        candidate: &'a Candidate,
        score: f64,
    },
    /// The best score fell under the confidence gate and the shorthand test ran
    ShorthandCheck {
        query: &'a str,
        candidate: &'a Candidate,
        score: f64,
        passed: bool,
    },
    /// No candidate qualified for the query
    Unresolved { query: &'a str, candidates: usize },
    Progress { processed: usize, total: usize },
    BatchAborted { failed: usize, total: usize },
    BatchCompleted {
        resolved: usize,
        failed: usize,
        total: usize,
    },
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: &Diagnostic<'_>);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _event: &Diagnostic<'_>) {}
}

/// Narrates events through `tracing`, with seconds elapsed since the sink was created
#[derive(Debug, Clone)]
pub struct TracingSink {
    started: Instant,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingSink {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&self, event: &Diagnostic<'_>) {
        let elapsed_s = self.elapsed();
        match event {
            Diagnostic::ExactMatch { query, candidate } => tracing::info!(
                query = %query,
                title = %candidate.title,
                movie_id = %candidate.id,
                elapsed_s,
                "Exact title match"
            ),
            Diagnostic::NewBest {
                query,
                candidate,
                score,
            } => tracing::debug!(
                query = %query,
                title = %candidate.title,
                score = *score,
                elapsed_s,
                "New best candidate"
            ),
            Diagnostic::ShorthandCheck {
                query,
                candidate,
                score,
                passed,
            } => tracing::info!(
                query = %query,
                title = %candidate.title,
                score = *score,
                passed,
                elapsed_s,
                "Low similarity triggered shorthand title check"
            ),
            Diagnostic::Unresolved { query, candidates } => tracing::warn!(
                query = %query,
                candidates,
                elapsed_s,
                "Could not find qualified entry, skipping"
            ),
            Diagnostic::Progress { processed, total } => tracing::info!(
                processed,
                total,
                elapsed_s,
                "Batch progress"
            ),
            Diagnostic::BatchAborted { failed, total } => tracing::error!(
                failed,
                total,
                elapsed_s,
                "Exceeded failure limit, aborting batch"
            ),
            Diagnostic::BatchCompleted {
                resolved,
                failed,
                total,
            } => tracing::info!(
                resolved,
                failed,
                total,
                elapsed_s,
                "Completed processing all titles"
            ),
        }
    }
}
