//! This crate computes document similarity with a bag-of-words / TF-IDF vector space model.
pub mod config;
pub mod error;
pub mod report;
pub mod utils;
pub mod vectorizer;

/// Similarity Pipeline
/// The top-level struct of this crate. It runs the whole build pass over a
/// training corpus and answers similarity queries for new documents.
///
/// Internally, it holds:
/// - The tokenizer (with its stopword set)
/// - The tokenized training documents
/// - The dictionary (token <-> id)
/// - The bag-of-words training corpus
/// - The fitted TF-IDF model
/// - The similarity index
///
/// `SimilarityPipeline<E>` has one generic parameter:
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// Every artifact is built once and never mutated; `query` takes `&self`.
pub use vectorizer::SimilarityPipeline;

/// Result of querying the pipeline with one document.
/// Carries the tokens, the bag-of-words vector, the tokens dropped as unknown,
/// the TF-IDF vector and one similarity score per training document.
pub use vectorizer::QueryResult;

/// Bag-of-words and TF-IDF vector types.
/// Both are `SpVec` sparse vectors sorted by token id.
pub use vectorizer::{BowVector, TFIDFVector};

/// Sparse vector
/// Sorted `(index, value)` pairs with implicit zeros, generic over `num::Num`.
/// Provides dot product, norms, cosine similarity and unit normalization.
///
/// # Serialization
/// Supported, as a sequence of `(index, value)` pairs.
pub use utils::math::vector::SpVec;

/// Dictionary
/// Maps tokens to dense ids `[0, N)` assigned in first-occurrence order.
/// It also tracks the document frequency of every token, which the TF-IDF
/// model can use directly.
///
/// `doc2bow` converts a tokenized document into a bag-of-words vector,
/// silently dropping tokens the dictionary has never seen.
pub use vectorizer::dictionary::Dictionary;

/// Tokenizer and stopword set
/// The tokenizer lowercases a document and splits it into word tokens.
/// Tokens equal to a stopword entry are removed; entries are matched as whole
/// strings, so a multi-word entry never matches anything.
pub use vectorizer::token::{StopWords, Tokenizer};

/// TF IDF Calculation Engine Trait
/// A trait that defines how term frequency and inverse document frequency are
/// computed. `DefaultTFIDFEngine` uses the raw count for TF and
/// `log2(N / df)` for IDF.
///
/// `TFIDFModel<E>` fits IDF weights once and transforms bag-of-words vectors
/// into (optionally unit-normalized) TF-IDF vectors.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine, TFIDFModel};

/// Similarity Index
/// Stores the TF-IDF training corpus and returns one cosine similarity score
/// per stored document for a query vector.
pub use vectorizer::index::SimilarityIndex;

/// Search Hits and Hit Entry structures
/// - `Hits`: holds scored documents and provides sorting by score
/// - `HitEntry`: one training document id and its score
pub use vectorizer::evaluate::scoring::{HitEntry, Hits};

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use report::Trace;
