pub mod dictionary;
pub mod evaluate;
pub mod index;
pub mod tfidf;
pub mod token;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::utils::math::vector::SpVec;
use crate::vectorizer::{
    dictionary::Dictionary,
    index::SimilarityIndex,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine, TFIDFModel},
    token::{StopWords, Tokenizer},
};

/// Bag-of-words vector: (token id, count)
pub type BowVector = SpVec<u32>;

/// TF-IDF vector: (token id, weight)
pub type TFIDFVector = SpVec<f64>;

/// Build-then-query similarity pipeline
///
/// 値が存在する時点で全ての成果物は構築済みで、以後変更されません。
/// `query` は `&self` で動作します
#[derive(Debug, Clone)]
pub struct SimilarityPipeline<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    tokenizer: Tokenizer,
    /// tokenized training documents
    tokenized: Vec<Vec<String>>,
    dictionary: Dictionary,
    /// bag-of-words training corpus
    corpus: Vec<BowVector>,
    model: TFIDFModel<E>,
    index: SimilarityIndex,
}

/// Everything the query path produces for one document
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub tokens: Vec<String>,
    pub bow: BowVector,
    /// tokens dropped because they are not in the dictionary
    pub missing: IndexMap<String, u32>,
    pub tfidf: TFIDFVector,
    /// one score per training document, corpus order
    pub similarities: Vec<f64>,
}

impl<E> SimilarityPipeline<E>
where
    E: TFIDFEngine,
{
    /// Run the build pass described by `config`.
    pub fn build(config: &PipelineConfig) -> Result<Self> {
        let stopwords = if config.split_stopword_phrases {
            StopWords::split_phrases(&config.stopwords)
        } else {
            StopWords::from_words(&config.stopwords)
        };
        Self::build_with(Tokenizer::new(stopwords), &config.documents, config)
    }

    /// Run the build pass over `documents` with an explicit tokenizer.
    pub fn build_with<T>(tokenizer: Tokenizer, documents: &[T], config: &PipelineConfig) -> Result<Self>
    where
        T: AsRef<str>,
    {
        if documents.is_empty() {
            return Err(Error::ConstructionFailed("no documents to index".into()));
        }
        let tokenized = tokenizer.tokenize_all(documents);
        debug!(?tokenized, "tokenized training documents");

        let dictionary = Dictionary::from_documents(&tokenized)?;
        let corpus: Vec<BowVector> = tokenized.iter().map(|doc| dictionary.doc2bow(doc)).collect();
        let model = TFIDFModel::<E>::fit(&corpus, config.normalize)?;
        let index = SimilarityIndex::new(&model.transform_corpus(&corpus), config.num_features)?;
        info!(
            documents = corpus.len(),
            vocabulary = dictionary.len(),
            "similarity pipeline built"
        );

        Ok(Self {
            tokenizer,
            tokenized,
            dictionary,
            corpus,
            model,
            index,
        })
    }

    /// Query the index with a raw document.
    /// 辞書にないtokenは落とされます
    pub fn query(&self, text: &str) -> QueryResult {
        let tokens = self.tokenizer.tokenize(text);
        let (bow, missing) = self.dictionary.doc2bow_with_missing(&tokens);
        let tfidf = self.model.transform(&bow);
        let similarities = self.index.query(&tfidf);
        debug!(query = text, ?similarities, "query scored");
        QueryResult {
            tokens,
            bow,
            missing,
            tfidf,
            similarities,
        }
    }

    /// 学習文書どうしの類似度行列 ([`SimilarityIndex::similarity_matrix`])
    pub fn similarity_matrix(&self) -> Vec<Vec<f64>> {
        self.index.similarity_matrix()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn tokenized(&self) -> &[Vec<String>] {
        &self.tokenized
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn corpus(&self) -> &[BowVector] {
        &self.corpus
    }

    pub fn model(&self) -> &TFIDFModel<E> {
        &self.model
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> PipelineConfig {
        PipelineConfig {
            documents: vec![
                "Rust is fast".into(),
                "Rust is safe".into(),
                "Python is flexible".into(),
            ],
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn build_produces_aligned_artifacts() {
        let pipeline: SimilarityPipeline = SimilarityPipeline::build(&small_config()).unwrap();
        assert_eq!(pipeline.tokenized().len(), 3);
        assert_eq!(pipeline.corpus().len(), 3);
        assert_eq!(pipeline.index().len(), 3);
        assert_eq!(pipeline.dictionary().len(), 6);
    }

    #[test]
    fn query_reports_missing_tokens() {
        let pipeline: SimilarityPipeline = SimilarityPipeline::build(&small_config()).unwrap();
        let result = pipeline.query("rust is memory safe");
        assert_eq!(result.tokens, vec!["rust", "is", "memory", "safe"]);
        assert_eq!(result.bow.nnz(), 3);
        assert_eq!(result.missing.get("memory"), Some(&1));
        assert_eq!(result.similarities.len(), 3);
        // "is" is everywhere so only rust/safe carry weight
        assert!(result.similarities[1] > result.similarities[0]);
        assert_eq!(result.similarities[2], 0.0);
    }

    #[test]
    fn similarity_matrix_compares_training_documents() {
        let pipeline: SimilarityPipeline = SimilarityPipeline::build(&small_config()).unwrap();
        let matrix = pipeline.similarity_matrix();
        assert_eq!(matrix.len(), 3);
        assert!((matrix[0][0] - 1.0).abs() < 1e-12);
        assert!(matrix[0][1] > 0.0);
        assert_eq!(matrix[0][1], matrix[1][0]);
        assert_eq!(matrix[2][0], 0.0);
    }

    #[test]
    fn split_stopwords_remove_common_words() {
        let config = PipelineConfig {
            split_stopword_phrases: true,
            stopwords: vec!["is a".into()],
            ..small_config()
        };
        let pipeline: SimilarityPipeline = SimilarityPipeline::build(&config).unwrap();
        assert_eq!(pipeline.dictionary().token_id("is"), None);
    }

    #[test]
    fn empty_documents_fail() {
        let config = PipelineConfig {
            documents: Vec::new(),
            ..PipelineConfig::default()
        };
        assert!(SimilarityPipeline::<DefaultTFIDFEngine>::build(&config).is_err());
    }
}
