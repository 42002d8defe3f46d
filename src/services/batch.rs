use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{MatchResult, Query},
    services::{
        diagnostics::{Diagnostic, DiagnosticSink},
        providers::MovieProvider,
        selector::select_with,
    },
};

/// Lifecycle of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Running,
    Completed,
    Aborted,
}

/// Failure accounting for one batch run
///
/// `failed_count` only grows. Once it reaches `failure_threshold` the batch
/// is aborted. The threshold is a tenth of the batch, rounded down, so
/// batches under ten titles abort on their first failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchState {
    total: usize,
    failed_count: usize,
    failure_threshold: usize,
    status: BatchStatus,
}

impl BatchState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            failed_count: 0,
            failure_threshold: total / 10,
            status: BatchStatus::Running,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    pub fn failure_threshold(&self) -> usize {
        self.failure_threshold
    }

    pub fn status(&self) -> BatchStatus {
        self.status
    }

    /// Accounts for one outcome and returns the resulting status
    pub fn record(&mut self, result: &MatchResult) -> BatchStatus {
        if self.status != BatchStatus::Running || result.is_resolved() {
            return self.status;
        }

        self.failed_count += 1;
        if self.failed_count >= self.failure_threshold {
            self.status = BatchStatus::Aborted;
        }
        self.status
    }

    /// Marks a batch that consumed every query without aborting
    pub fn finish(&mut self) -> BatchStatus {
        if self.status == BatchStatus::Running {
            self.status = BatchStatus::Completed;
        }
        self.status
    }
}

/// Outcome for one processed query
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub query: Query,
    pub result: MatchResult,
}

/// What a batch run processed before it stopped
#[derive(Debug, Clone)]
pub struct BatchReport {
    state: BatchState,
    /// Outcomes in query order; shorter than the input when aborted
    pub resolutions: Vec<Resolution>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    /// Failure accounting at the point the run stopped
    pub fn state(&self) -> &BatchState {
        &self.state
    }

    pub fn status(&self) -> BatchStatus {
        self.state.status
    }

    pub fn resolved_count(&self) -> usize {
        self.resolutions
            .iter()
            .filter(|r| r.result.is_resolved())
            .count()
    }

    /// Resolutions of a completed batch, or `BatchAborted`
    pub fn into_resolutions(self) -> AppResult<Vec<Resolution>> {
        match self.state.status {
            BatchStatus::Completed => Ok(self.resolutions),
            _ => Err(AppError::BatchAborted {
                failed: self.state.failed_count,
                total: self.state.total,
            }),
        }
    }
}

/// Resolves a list of queries against a provider, one at a time
///
/// Queries are processed strictly in order; the abort decision depends on the
/// running failure count. Provider errors end the run immediately and are not
/// counted as unresolved titles.
pub struct BatchResolver<'a> {
    provider: &'a dyn MovieProvider,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> BatchResolver<'a> {
    pub fn new(provider: &'a dyn MovieProvider, sink: &'a dyn DiagnosticSink) -> Self {
        Self { provider, sink }
    }

    pub async fn run(&self, queries: &[Query]) -> AppResult<BatchReport> {
        let started_at = Utc::now();
        let mut state = BatchState::new(queries.len());
        let mut resolutions = Vec::with_capacity(queries.len());
        let progress_every = (queries.len() / 10).max(1);

        tracing::info!(
            total = state.total,
            failure_threshold = state.failure_threshold,
            provider = self.provider.name(),
            "Starting batch resolution"
        );

        for (index, query) in queries.iter().enumerate() {
            let candidates = self
                .provider
                .search_movies(query.title(), query.release_year())
                .await?;
            let result = select_with(&candidates, query.title(), self.sink)?;
            let status = state.record(&result);

            resolutions.push(Resolution {
                query: query.clone(),
                result,
            });

            if status == BatchStatus::Aborted {
                self.sink.emit(&Diagnostic::BatchAborted {
                    failed: state.failed_count,
                    total: state.total,
                });
                break;
            }

            let processed = index + 1;
            if processed % progress_every == 0 {
                self.sink.emit(&Diagnostic::Progress {
                    processed,
                    total: state.total,
                });
            }
        }

        if state.finish() == BatchStatus::Completed {
            self.sink.emit(&Diagnostic::BatchCompleted {
                resolved: state.total - state.failed_count,
                failed: state.failed_count,
                total: state.total,
            });
        }

        Ok(BatchReport {
            state,
            resolutions,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
