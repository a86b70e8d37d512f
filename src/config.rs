//! Pipeline configuration.
//!
//! Defaults reproduce the reference run: the nine-document corpus, the single
//! multi-word stopword entry, the query `"Human computer interaction"` and an
//! index capacity of 32 features. Every field can be overridden from a JSON
//! file; missing fields keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Index capacity hint used by the reference run.
///
/// The index grows past this when the vocabulary is larger.
pub const DEFAULT_NUM_FEATURES: usize = 32;

/// The stopword list of the reference run.
///
/// It is one string, not seven words, so no single token ever matches it.
pub const REFERENCE_STOPWORDS: &[&str] = &["for a of and to the in"];

pub const DEFAULT_QUERY: &str = "Human computer interaction";

pub const DEFAULT_DOCUMENTS: &[&str] = &[
    "Human machine interface for lab abc computer applications",
    "A survey of user opinion of computer system response time",
    "The EPS user interface management system",
    "System and human system engineering testing of EPS",
    "Relation of user perceived response time to error measurement",
    "The generation of random binary unordered trees",
    "The intersection graph of paths in trees",
    "Graph minors IV Widths of trees and well quasi ordering",
    "Graph minors A survey",
];

/// Weights below this magnitude are dropped from TF-IDF vectors.
pub const WEIGHT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Training corpus, one raw string per document.
    pub documents: Vec<String>,
    /// Document queried against the built index.
    pub query: String,
    /// Stopword entries, matched against whole tokens.
    pub stopwords: Vec<String>,
    /// Split each stopword entry on whitespace before matching.
    pub split_stopword_phrases: bool,
    /// Index capacity hint.
    pub num_features: usize,
    /// Scale TF-IDF vectors to unit length.
    pub normalize: bool,
    /// Also report the best `n` hits, ranked.
    pub num_best: Option<usize>,
    /// Also report the document-vs-document similarity matrix.
    pub similarity_matrix: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            documents: DEFAULT_DOCUMENTS.iter().map(|d| d.to_string()).collect(),
            query: DEFAULT_QUERY.to_string(),
            stopwords: REFERENCE_STOPWORDS.iter().map(|s| s.to_string()).collect(),
            split_stopword_phrases: false,
            num_features: DEFAULT_NUM_FEATURES,
            normalize: true,
            num_best: None,
            similarity_matrix: false,
        }
    }
}

impl PipelineConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line overrides; `None` and `false` keep the loaded values.
    pub fn apply_overrides(
        &mut self,
        query: Option<String>,
        num_best: Option<usize>,
        similarity_matrix: bool,
    ) {
        if let Some(query) = query {
            self.query = query;
        }
        if num_best.is_some() {
            self.num_best = num_best;
        }
        self.similarity_matrix |= similarity_matrix;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn defaults_match_reference_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.documents.len(), 9);
        assert_eq!(config.stopwords, vec!["for a of and to the in".to_string()]);
        assert_eq!(config.num_features, 32);
        assert!(config.normalize);
        assert!(!config.split_stopword_phrases);
        assert!(!config.similarity_matrix);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"query": "graph trees", "num_best": 3}"#).unwrap();
        assert_eq!(config.query, "graph trees");
        assert_eq!(config.num_best, Some(3));
        assert_eq!(config.documents.len(), 9);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<PipelineConfig>(r#"{"num_feature": 3}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PipelineConfig::from_json_file("/nonexistent/similarity.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn loads_config_file_from_disk() {
        let file = json_file(
            r#"{
                "documents": ["Graph minors", "Graph trees"],
                "stopwords": ["graph"],
                "num_features": 8,
                "similarity_matrix": true
            }"#,
        );
        let config = PipelineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.documents, vec!["Graph minors", "Graph trees"]);
        assert_eq!(config.stopwords, vec!["graph"]);
        assert_eq!(config.num_features, 8);
        assert!(config.similarity_matrix);
        assert_eq!(config.query, DEFAULT_QUERY);
        assert!(config.normalize);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let file = json_file(r#"{"documents": ["unterminated"#);
        let err = PipelineConfig::from_json_file(file.path()).unwrap_err();
        match err {
            Error::Config { path, .. } => assert_eq!(path, file.path()),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_field_type_is_config_error() {
        let file = json_file(r#"{"num_features": "many"}"#);
        let err = PipelineConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn command_line_overrides_replace_loaded_values() {
        let mut config = PipelineConfig {
            query: "graph trees".into(),
            num_best: Some(3),
            ..PipelineConfig::default()
        };
        config.apply_overrides(Some("human interface".into()), Some(1), true);
        assert_eq!(config.query, "human interface");
        assert_eq!(config.num_best, Some(1));
        assert!(config.similarity_matrix);
    }

    #[test]
    fn absent_overrides_keep_loaded_values() {
        let mut config = PipelineConfig {
            query: "graph trees".into(),
            num_best: Some(3),
            similarity_matrix: true,
            ..PipelineConfig::default()
        };
        config.apply_overrides(None, None, false);
        assert_eq!(config.query, "graph trees");
        assert_eq!(config.num_best, Some(3));
        assert!(config.similarity_matrix);
    }
}
