pub mod batch;
pub mod comparison;
pub mod diagnostics;
pub mod providers;
pub mod selector;
pub mod similarity;

pub use batch::{BatchReport, BatchResolver, BatchState, BatchStatus, Resolution};
pub use diagnostics::{Diagnostic, DiagnosticSink, NoopSink, TracingSink};
pub use providers::{MovieProvider, TmdbProvider};
pub use selector::{select, select_with};
pub use similarity::{edit_distance, similarity};
