//! Standard-output trace of a pipeline run.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::vectorizer::{
    evaluate::scoring::Hits, tfidf::TFIDFEngine, BowVector, QueryResult, SimilarityPipeline,
};

/// Snapshot of every artifact the run prints, in print order.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub tokenized_documents: Vec<Vec<String>>,
    pub dictionary: String,
    pub token2id: IndexMap<String, usize>,
    pub corpus: Vec<BowVector>,
    /// Document-vs-document scores, only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Vec<f64>>>,
    pub query: String,
    pub query_bow: BowVector,
    pub missing: IndexMap<String, u32>,
    pub similarities: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<Hits>,
}

impl Trace {
    pub fn new<E>(
        pipeline: &SimilarityPipeline<E>,
        query: &str,
        result: QueryResult,
        num_best: Option<usize>,
    ) -> Self
    where
        E: TFIDFEngine,
    {
        let hits = num_best.map(|n| {
            let mut hits = Hits::from_scores(&result.similarities);
            hits.sort_by_score_desc().truncate(n);
            hits
        });
        Self {
            tokenized_documents: pipeline.tokenized().to_vec(),
            dictionary: pipeline.dictionary().to_string(),
            token2id: pipeline
                .dictionary()
                .token2id()
                .map(|(tok, id)| (tok.to_string(), id))
                .collect(),
            corpus: pipeline.corpus().to_vec(),
            matrix: None,
            query: query.to_string(),
            query_bow: result.bow,
            missing: result.missing,
            similarities: result.similarities,
            hits,
        }
    }

    /// Attach the training-document similarity matrix, printed before the query.
    pub fn with_matrix(mut self, matrix: Vec<Vec<f64>>) -> Self {
        self.matrix = Some(matrix);
        self
    }
}

fn write_str_list(f: &mut fmt::Formatter<'_>, items: &[String]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "'{}'", item)?;
    }
    write!(f, "]")
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, doc) in self.tokenized_documents.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_str_list(f, doc)?;
        }
        writeln!(f, "]")?;

        writeln!(f, "{} ", self.dictionary)?;
        writeln!(f)?;

        write!(f, "{{")?;
        for (i, (tok, id)) in self.token2id.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {}", tok, id)?;
        }
        writeln!(f, "}}")?;

        write!(f, "[")?;
        for (i, bow) in self.corpus.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", bow)?;
        }
        writeln!(f, "]")?;

        if let Some(matrix) = &self.matrix {
            for row in matrix {
                for (j, score) in row.iter().enumerate() {
                    if j > 0 {
                        write!(f, "\t")?;
                    }
                    write!(f, "{:.3}", score)?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", self.query_bow)?;

        write!(f, "[")?;
        for (i, score) in self.similarities.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:.8}", score)?;
        }
        writeln!(f, "]")?;

        if let Some(hits) = &self.hits {
            writeln!(f, "{}", hits)?;
        }
        Ok(())
    }
}
