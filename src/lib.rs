//! Scoring and risk classification for fleet pre-trip and post-trip inspections.

pub mod config;
pub mod error;
pub mod history;
pub mod inspection;
pub mod scoring;
pub mod telemetry;

pub use error::AppError;
pub use inspection::{Catalog, InspectionSnapshot, SectionAnswers, SectionKind};
pub use scoring::{InspectionScorecard, ScoringEngine, ScoringPolicy, ScoringService};
