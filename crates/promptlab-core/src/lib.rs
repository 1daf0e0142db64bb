//! Core library for promptlab.
//!
//! Offline quality scoring for LLM prompts: four dimension scores, a catalog
//! of eight authoring anti-patterns, and severity-ordered suggestions. No
//! model inference; every result comes from keyword and regex heuristics
//! plus counting statistics, so the same input always scores the same.
//!
//! # Modules
//!
//! - [`analysis`] - Scoring, detection, suggestions and the [`analyze`] entry point
//! - [`catalog`] - Anti-pattern definitions, keyword banks and signal sets
//! - [`text`] - Word, sentence, number and task counts
//! - [`render`] - JSON and Markdown reports
//! - [`enhance`] - Optional remote rewrite via OpenAI or Anthropic
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! let result = promptlab_core::analyze("Write me something about dogs");
//!
//! assert!(result.overall_score() < 5.0);
//! assert!(result.has_anti_pattern("missing_role"));
//! println!("{}", promptlab_core::render::render_markdown(&result, None));
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod enhance;
pub mod error;
pub mod render;
pub mod text;
pub mod word_lists;

pub use analysis::{
    AnalysisResult, DetectedAntiPattern, Dimension, DimensionScore, Rating, analyze, analyze_with,
};
pub use catalog::{AntiPatternDefinition, Catalog, Category, Severity};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use enhance::{EnhanceSettings, EnhancementResult, Provider};
pub use error::{ConfigError, ConfigResult, EnhanceError, EnhanceResult};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
