use crate::{
    error::{AppError, AppResult},
    models::{Candidate, MatchResult},
    services::{
        diagnostics::{Diagnostic, DiagnosticSink, NoopSink},
        similarity::similarity,
    },
};

/// Best scores under this trigger the shorthand title check
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.3;

/// Picks the candidate that best matches `query_title`
///
/// Candidates are expected in provider ranking order; earlier candidates win
/// every tie. Returns `Unresolved` when nothing qualifies and `InvalidInput`
/// only for a blank query title.
pub fn select(candidates: &[Candidate], query_title: &str) -> AppResult<MatchResult> {
    select_with(candidates, query_title, &NoopSink)
}

/// Same as [`select`], narrating each decision to `sink`
pub fn select_with(
    candidates: &[Candidate],
    query_title: &str,
    sink: &dyn DiagnosticSink,
) -> AppResult<MatchResult> {
    if query_title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Query title cannot be empty".to_string(),
        ));
    }

    let query_lower = query_title.to_lowercase();
    let mut best: Option<(&Candidate, f64)> = None;

    // Movies nobody voted on are never trusted
    for candidate in candidates.iter().filter(|c| c.vote_count > 0) {
        if candidate.title.to_lowercase() == query_lower {
            sink.emit(&Diagnostic::ExactMatch {
                query: query_title,
                candidate,
            });
            return Ok(MatchResult::Resolved(candidate.clone()));
        }

        let score = similarity(&candidate.title, query_title);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            sink.emit(&Diagnostic::NewBest {
                query: query_title,
                candidate,
                score,
            });
            best = Some((candidate, score));
        }
    }

    let Some((candidate, score)) = best else {
        sink.emit(&Diagnostic::Unresolved {
            query: query_title,
            candidates: candidates.len(),
        });
        return Ok(MatchResult::Unresolved);
    };

    if score < LOW_CONFIDENCE_THRESHOLD {
        // Abbreviated titles, e.g. "Shang-Chi" for "Shang-Chi and the Legend of the Ten Rings"
        let passed = candidate.title.contains(query_title);
        sink.emit(&Diagnostic::ShorthandCheck {
            query: query_title,
            candidate,
            score,
            passed,
        });
        if !passed {
            sink.emit(&Diagnostic::Unresolved {
                query: query_title,
                candidates: candidates.len(),
            });
            return Ok(MatchResult::Unresolved);
        }
    }

    Ok(MatchResult::Resolved(candidate.clone()))
}
