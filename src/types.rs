//! Core types for spectral_anchorage
//!
//! Build and query configuration, anchor terms, and the confidence levels
//! reported alongside every query result.

use crate::errors::{AnchorageError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Anchor Term
// ============================================================================

/// A term that distinguishes a passage from its confusers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorTerm {
    /// The content stem
    pub term: String,
    /// `idf(term) * (1 - presence among confusers)`
    pub score: f64,
}

impl AnchorTerm {
    pub fn new(term: impl Into<String>, score: f64) -> Self {
        Self {
            term: term.into(),
            score,
        }
    }
}

// ============================================================================
// Confidence
// ============================================================================

/// Margin above which a result is reported as [`ConfidenceLevel::High`].
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 50.0;

/// Margin above which a result is reported as [`ConfidenceLevel::Med`].
pub const MED_CONFIDENCE_THRESHOLD: f64 = 15.0;

/// Suggested token budget for a disambiguating follow-up on low confidence.
pub const LOW_CONFIDENCE_TOKEN_BUDGET: usize = 2000;

/// Lowest reportable margin.
pub const MIN_MARGIN: f64 = 0.1;

/// Highest reportable margin; also the margin when there is no runner-up.
pub const MAX_MARGIN: f64 = 100.0;

/// How far the top candidate stands apart from the runner-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    High,
    Med,
    Low,
}

impl ConfidenceLevel {
    /// Classify a margin. Both thresholds are strict: a margin of exactly 50
    /// is `Med` and exactly 15 is `Low`.
    pub fn from_margin(margin: f64) -> Self {
        if margin > HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceLevel::High
        } else if margin > MED_CONFIDENCE_THRESHOLD {
            ConfidenceLevel::Med
        } else {
            ConfidenceLevel::Low
        }
    }

    /// Upper-case level name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "HIGH",
            ConfidenceLevel::Med => "MED",
            ConfidenceLevel::Low => "LOW",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High confidence",
            ConfidenceLevel::Med => "Medium confidence",
            ConfidenceLevel::Low => "Low confidence, request more context",
        }
    }

    /// Single-character status marker for compact displays
    pub fn symbol(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "+",
            ConfidenceLevel::Med => "~",
            ConfidenceLevel::Low => "?",
        }
    }

    /// Tokens to spend on a follow-up before committing to an answer.
    pub fn token_budget(&self) -> Option<usize> {
        match self {
            ConfidenceLevel::Low => Some(LOW_CONFIDENCE_TOKEN_BUDGET),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence descriptor attached to a query result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    pub level: ConfidenceLevel,
    pub label: String,
    pub symbol: String,
    /// Only set for [`ConfidenceLevel::Low`]
    pub token_budget: Option<usize>,
}

impl Confidence {
    /// Build the descriptor for a margin
    pub fn from_margin(margin: f64) -> Self {
        let level = ConfidenceLevel::from_margin(margin);
        Self {
            level,
            label: level.label().to_string(),
            symbol: level.symbol().to_string(),
            token_budget: level.token_budget(),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

fn default_anchor_k() -> usize {
    5
}
fn default_confuser_k() -> usize {
    5
}
fn default_neighbor_radius() -> usize {
    2
}
fn default_top_n() -> usize {
    5
}
fn default_anchor_weight() -> f64 {
    15.0
}
fn default_neighbor_weight() -> f64 {
    10.0
}

/// Configuration for corpus construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Anchor terms kept per passage
    #[serde(default = "default_anchor_k")]
    pub anchor_k: usize,
    /// Confusers kept per passage (0 = none)
    #[serde(default = "default_confuser_k")]
    pub confuser_k: usize,
    /// Positional window on each side of a passage (0 = no neighbors)
    #[serde(default = "default_neighbor_radius")]
    pub neighbor_radius: usize,
    /// Run the confuser search across passages on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            anchor_k: default_anchor_k(),
            confuser_k: default_confuser_k(),
            neighbor_radius: default_neighbor_radius(),
            parallel: false,
        }
    }
}

impl BuildConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.anchor_k == 0 {
            return Err(AnchorageError::invalid_config("anchor_k must be > 0"));
        }
        Ok(())
    }

    /// Builder method: set anchor terms per passage
    pub fn with_anchor_k(mut self, anchor_k: usize) -> Self {
        self.anchor_k = anchor_k;
        self
    }

    /// Builder method: set confusers per passage
    pub fn with_confuser_k(mut self, confuser_k: usize) -> Self {
        self.confuser_k = confuser_k;
        self
    }

    /// Builder method: set neighbor window radius
    pub fn with_neighbor_radius(mut self, radius: usize) -> Self {
        self.neighbor_radius = radius;
        self
    }

    /// Builder method: toggle parallel confuser search
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Configuration for a single query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Shortlist length
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Margin points per anchor hit the top candidate has over the runner-up
    #[serde(default = "default_anchor_weight")]
    pub anchor_weight: f64,
    /// Margin points for a full neighborhood-resonance advantage
    #[serde(default = "default_neighbor_weight")]
    pub neighbor_weight: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            anchor_weight: default_anchor_weight(),
            neighbor_weight: default_neighbor_weight(),
        }
    }
}

impl QueryConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(AnchorageError::invalid_config("top_n must be > 0"));
        }

        if !self.anchor_weight.is_finite() {
            return Err(AnchorageError::invalid_config(format!(
                "anchor_weight must be finite, got {}",
                self.anchor_weight
            )));
        }

        if !self.neighbor_weight.is_finite() {
            return Err(AnchorageError::invalid_config(format!(
                "neighbor_weight must be finite, got {}",
                self.neighbor_weight
            )));
        }

        Ok(())
    }

    /// Builder method: set shortlist length
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Builder method: set anchor-hit weight
    pub fn with_anchor_weight(mut self, weight: f64) -> Self {
        self.anchor_weight = weight;
        self
    }

    /// Builder method: set neighborhood-resonance weight
    pub fn with_neighbor_weight(mut self, weight: f64) -> Self {
        self.neighbor_weight = weight;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_thresholds_are_strict() {
        assert_eq!(ConfidenceLevel::from_margin(100.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_margin(50.0001), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_margin(50.0), ConfidenceLevel::Med);
        assert_eq!(ConfidenceLevel::from_margin(15.0001), ConfidenceLevel::Med);
        assert_eq!(ConfidenceLevel::from_margin(15.0), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_margin(0.1), ConfidenceLevel::Low);
    }

    #[test]
    fn test_token_budget_only_for_low() {
        assert_eq!(ConfidenceLevel::High.token_budget(), None);
        assert_eq!(ConfidenceLevel::Med.token_budget(), None);
        assert_eq!(
            ConfidenceLevel::Low.token_budget(),
            Some(LOW_CONFIDENCE_TOKEN_BUDGET)
        );

        let confidence = Confidence::from_margin(3.0);
        assert_eq!(confidence.level, ConfidenceLevel::Low);
        assert_eq!(confidence.token_budget, Some(LOW_CONFIDENCE_TOKEN_BUDGET));
    }

    #[test]
    fn test_confidence_level_serde() {
        let json = serde_json::to_string(&ConfidenceLevel::Med).unwrap();
        assert_eq!(json, r#""MED""#);
        let back: ConfidenceLevel = serde_json::from_str(r#""HIGH""#).unwrap();
        assert_eq!(back, ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::Low.to_string(), "LOW");
    }

    #[test]
    fn test_build_config_validation() {
        assert!(BuildConfig::default().validate().is_ok());
        assert!(BuildConfig::default().with_confuser_k(0).validate().is_ok());
        assert!(BuildConfig::default().with_neighbor_radius(0).validate().is_ok());

        let err = BuildConfig::default().with_anchor_k(0).validate().unwrap_err();
        assert!(matches!(err, AnchorageError::InvalidConfig { .. }));
    }

    #[test]
    fn test_query_config_validation() {
        assert!(QueryConfig::default().validate().is_ok());
        assert!(QueryConfig::default().with_top_n(0).validate().is_err());
        assert!(QueryConfig::default()
            .with_anchor_weight(f64::NAN)
            .validate()
            .is_err());
        assert!(QueryConfig::default()
            .with_neighbor_weight(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_defaults() {
        let build = BuildConfig::default();
        assert_eq!(build.anchor_k, 5);
        assert_eq!(build.confuser_k, 5);
        assert_eq!(build.neighbor_radius, 2);
        assert!(!build.parallel);

        let query = QueryConfig::default();
        assert_eq!(query.top_n, 5);
        assert!((query.anchor_weight - 15.0).abs() < 1e-12);
        assert!((query.neighbor_weight - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_config_serde_missing_fields_default() {
        let build: BuildConfig = serde_json::from_str(r#"{"anchor_k": 3}"#).unwrap();
        assert_eq!(build.anchor_k, 3);
        assert_eq!(build.confuser_k, 5);
        assert_eq!(build.neighbor_radius, 2);

        let query: QueryConfig = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(query, QueryConfig::default());
    }
}
