use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::WEIGHT_EPSILON;
use crate::error::{Error, Result};
use crate::vectorizer::{dictionary::Dictionary, BowVector, TFIDFVector};

/// TF-IDF計算エンジンのトレイト
/// モデルのジェネリックパラメータとして静的に差し替えます
pub trait TFIDFEngine {
    /// 文書内の出現回数からTFを計算します
    fn tf(count: u32) -> f64;

    /// IDFを計算するメソッド
    /// # Arguments
    /// * `doc_freq` - tokenを含む文書数
    /// * `doc_num` - 全文書数
    /// # Returns
    /// * `f64` - IDF (文書頻度が増えるほど小さくなること)
    fn idf(doc_freq: u64, doc_num: u64) -> f64;
}

/// デフォルトのTF-IDFエンジン
/// TF = 出現回数, IDF = log2(全文書数 / 文書頻度)
///
/// 全文書に出現するtokenのIDFは0になります
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn tf(count: u32) -> f64 {
        count as f64
    }

    #[inline]
    fn idf(doc_freq: u64, doc_num: u64) -> f64 {
        if doc_freq == 0 || doc_num == 0 {
            return 0.0;
        }
        (doc_num as f64 / doc_freq as f64).log2()
    }
}

/// TF-IDF model
/// 学習コーパスから一度だけIDFを計算し、以後は変更しません
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TFIDFModel<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    /// IDF per token id
    idfs: Vec<f64>,
    /// document count
    doc_num: u64,
    /// scale output vectors to unit length
    normalize: bool,
    #[serde(skip)]
    _marker: PhantomData<E>,
}

impl<E> TFIDFModel<E>
where
    E: TFIDFEngine,
{
    /// Fit IDF weights by scanning a bag-of-words corpus.
    pub fn fit(corpus: &[BowVector], normalize: bool) -> Result<Self> {
        if corpus.is_empty() {
            return Err(Error::ConstructionFailed("empty bag-of-words corpus".into()));
        }
        let num_features = corpus
            .iter()
            .filter_map(|bow| bow.max_index())
            .max()
            .map_or(0, |max| max + 1);
        let mut dfs = vec![0_u64; num_features];
        let mut nnz = 0_usize;
        for bow in corpus {
            for (id, _) in bow.raw_iter() {
                dfs[id] += 1;
            }
            nnz += bow.nnz();
        }
        let doc_num = corpus.len() as u64;
        info!(
            "calculating IDF weights for {} documents and {} features ({} matrix non-zeros)",
            doc_num, num_features, nnz
        );
        Ok(Self::from_dfs(&dfs, doc_num, normalize))
    }

    /// Take document frequencies from an already built dictionary.
    pub fn from_dictionary(dictionary: &Dictionary, normalize: bool) -> Result<Self> {
        if dictionary.num_docs() == 0 {
            return Err(Error::ConstructionFailed("dictionary has no documents".into()));
        }
        let dfs: Vec<u64> = (0..dictionary.len()).map(|id| dictionary.dfs(id)).collect();
        Ok(Self::from_dfs(&dfs, dictionary.num_docs(), normalize))
    }

    fn from_dfs(dfs: &[u64], doc_num: u64, normalize: bool) -> Self {
        Self {
            idfs: dfs.iter().map(|&df| E::idf(df, doc_num)).collect(),
            doc_num,
            normalize,
            _marker: PhantomData,
        }
    }

    /// bag-of-wordsをTF-IDFベクトルに変換します
    /// IDFを持たないidと重みがほぼ0の要素は落とされます
    pub fn transform(&self, bow: &BowVector) -> TFIDFVector {
        let mut vec = TFIDFVector::with_capacity(bow.nnz());
        for (id, count) in bow.raw_iter() {
            if let Some(&idf) = self.idfs.get(id) {
                let weight = E::tf(count) * idf;
                if weight.abs() > WEIGHT_EPSILON {
                    vec.push(id, weight);
                }
            }
        }
        if self.normalize {
            vec.to_unit()
        } else {
            vec
        }
    }

    pub fn transform_corpus(&self, corpus: &[BowVector]) -> Vec<TFIDFVector> {
        corpus.iter().map(|bow| self.transform(bow)).collect()
    }

    #[inline]
    pub fn idf(&self, id: usize) -> Option<f64> {
        self.idfs.get(id).copied()
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    #[inline]
    pub fn num_features(&self) -> usize {
        self.idfs.len()
    }

    #[inline]
    pub fn normalize(&self) -> bool {
        self.normalize
    }
}
