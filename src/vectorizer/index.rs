#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::vectorizer::{evaluate::scoring::Hits, TFIDFVector};

/// Similarity index over a TF-IDF corpus
///
/// 各行はL2正規化して保持するので、コサイン類似度は内積になります。
/// 構築後は読み取り専用です
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityIndex {
    rows: Vec<TFIDFVector>,
    num_features: usize,
}

impl SimilarityIndex {
    /// Build an index from TF-IDF vectors.
    ///
    /// `num_features` is a capacity hint: the index is widened to the highest
    /// id in the corpus when that is larger.
    pub fn new(corpus: &[TFIDFVector], num_features: usize) -> Result<Self> {
        if corpus.is_empty() {
            return Err(Error::ConstructionFailed("empty TF-IDF corpus".into()));
        }
        let required = corpus
            .iter()
            .filter_map(|vec| vec.max_index())
            .max()
            .map_or(0, |max| max + 1);
        let width = if required > num_features {
            warn!(
                requested = num_features,
                required, "corpus has more features than the index capacity, widening"
            );
            required
        } else {
            num_features
        };
        let rows: Vec<TFIDFVector> = corpus
            .iter()
            .map(|vec| {
                let mut row = vec.to_unit();
                row.shrink_to_fit();
                row
            })
            .collect();
        info!(
            "created similarity index of {} documents x {} features ({} non-zeros)",
            rows.len(),
            width,
            rows.iter().map(|r| r.nnz()).sum::<usize>()
        );
        Ok(Self {
            rows,
            num_features: width,
        })
    }

    /// コサイン類似度を学習文書ごとに返します (コーパス順)
    /// 重なる次元がなければ0になります
    pub fn query(&self, vec: &TFIDFVector) -> Vec<f64> {
        let mut query = vec.to_unit();
        query.truncate_dim(self.num_features);
        #[cfg(feature = "parallel")]
        let scores = self.rows.par_iter().map(|row| row.dot(&query)).collect();
        #[cfg(not(feature = "parallel"))]
        let scores = self.rows.iter().map(|row| row.dot(&query)).collect();
        scores
    }

    /// 上位 `num_best` 件をスコアの降順で返します
    pub fn query_hits(&self, vec: &TFIDFVector, num_best: usize) -> Hits {
        let mut hits = Hits::from_scores(&self.query(vec));
        hits.sort_by_score_desc().truncate(num_best);
        hits
    }

    /// 学習文書どうしのコサイン類似度行列 (N x N, コーパス順)
    ///
    /// 行 `i` は文書 `i` を問い合わせたときのスコアです。
    /// 内積は対称に計算されるので `m[i][j] == m[j][i]` になります。
    /// 空の行は対角も0です
    pub fn similarity_matrix(&self) -> Vec<Vec<f64>> {
        let score_row = |row: &TFIDFVector| -> Vec<f64> {
            self.rows.iter().map(|other| row.dot(other)).collect()
        };
        #[cfg(feature = "parallel")]
        let matrix = self.rows.par_iter().map(score_row).collect();
        #[cfg(not(feature = "parallel"))]
        let matrix = self.rows.iter().map(score_row).collect();
        matrix
    }

    #[inline]
    pub fn rows(&self) -> &[TFIDFVector] {
        &self.rows
    }

    #[inline]
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
