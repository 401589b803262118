//! Output JSON schema definitions for report data.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{Aggregate, HotLine, Summary};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace files the report was built from
    pub source: Vec<String>,

    /// Timestamp when the report was generated
    pub generated_at: String,

    pub body: ReportBody,
}

/// Payload of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportBody {
    Summary(Summary),
    Aggregate(Aggregate),
    HotLines { function: String, lines: Vec<HotLine> },
}

impl Report {
    /// Wrap a body with the current schema version and timestamp
    pub fn new(source: Vec<String>, body: ReportBody) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source,
            generated_at: chrono::Utc::now().to_rfc3339(),
            body,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.body {
            ReportBody::Summary(_) => "summary",
            ReportBody::Aggregate(_) => "aggregate",
            ReportBody::HotLines { .. } => "hot_lines",
        }
    }
}
