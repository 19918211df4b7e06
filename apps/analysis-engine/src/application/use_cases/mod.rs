//! Application use cases.

mod analyze_option;

pub use analyze_option::{
    AnalysisError, AnalysisOutcome, AnalysisRequest, AnalysisSettings, AnalyzeOptionUseCase,
    ExpirationChoice,
};
