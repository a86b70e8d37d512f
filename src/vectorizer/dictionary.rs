use std::collections::BTreeMap;
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::vectorizer::BowVector;

/// token <-> id の対応表
///
/// idは初出順に0から連番で割り当てられ、削除や振り直しはされません。
/// token毎の文書頻度 (いくつの文書に出現したか) も保持します
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dictionary {
    /// id == index
    tokens: IndexSet<String>,
    /// document frequency per id
    dfs: Vec<u64>,
    /// number of documents added
    num_docs: u64,
    /// total number of token positions seen
    num_pos: u64,
    /// total number of (doc, id) non-zero entries
    num_nnz: u64,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from tokenized documents.
    /// A corpus that produces no tokens at all is rejected.
    pub fn from_documents<T>(docs: &[Vec<T>]) -> Result<Self>
    where
        T: AsRef<str>,
    {
        if docs.is_empty() {
            return Err(Error::ConstructionFailed("empty corpus".into()));
        }
        let mut dictionary = Self::new();
        dictionary.add_documents(docs);
        if dictionary.is_empty() {
            return Err(Error::ConstructionFailed("empty vocabulary".into()));
        }
        info!(
            "built {} from {} documents (total {} corpus positions)",
            dictionary, dictionary.num_docs, dictionary.num_pos
        );
        Ok(dictionary)
    }

    /// 文書を順に走査し、未知のtokenに次のidを割り当てます
    pub fn add_documents<T>(&mut self, docs: &[Vec<T>])
    where
        T: AsRef<str>,
    {
        for doc in docs {
            debug!(doc_no = self.num_docs, "adding document to dictionary");
            self.add_document(doc);
        }
    }

    fn add_document<T>(&mut self, doc: &[T])
    where
        T: AsRef<str>,
    {
        let mut seen: IndexSet<usize> = IndexSet::new();
        for token in doc {
            let (id, inserted) = self.tokens.insert_full(token.as_ref().to_string());
            if inserted {
                self.dfs.push(0);
            }
            seen.insert(id);
        }
        for &id in &seen {
            self.dfs[id] += 1;
        }
        self.num_docs += 1;
        self.num_pos += doc.len() as u64;
        self.num_nnz += seen.len() as u64;
    }

    /// 文書をbag-of-wordsに変換します
    /// 辞書にないtokenは無視されます
    ///
    /// # Arguments
    /// * `tokens` - tokenize済みの文書
    ///
    /// # Returns
    /// * `BowVector` - idの昇順の (id, count)
    pub fn doc2bow<T>(&self, tokens: &[T]) -> BowVector
    where
        T: AsRef<str>,
    {
        self.doc2bow_with_missing(tokens).0
    }

    /// `doc2bow` と同じですが、無視したtokenとその出現回数も返します
    pub fn doc2bow_with_missing<T>(&self, tokens: &[T]) -> (BowVector, IndexMap<String, u32>)
    where
        T: AsRef<str>,
    {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        let mut missing: IndexMap<String, u32> = IndexMap::new();
        for token in tokens {
            let token = token.as_ref();
            match self.tokens.get_index_of(token) {
                Some(id) => *counts.entry(id).or_insert(0) += 1,
                None => *missing.entry(token.to_string()).or_insert(0) += 1,
            }
        }
        if !missing.is_empty() {
            debug!(?missing, "ignoring tokens absent from dictionary");
        }
        let mut bow = BowVector::with_capacity(counts.len());
        for (id, count) in counts {
            bow.push(id, count);
        }
        (bow, missing)
    }

    /// bag-of-wordsをtoken列に展開します (idの昇順)
    /// 範囲外のidは無視されます
    pub fn decode(&self, bow: &BowVector) -> Vec<&str> {
        bow.raw_iter()
            .filter_map(|(id, count)| {
                self.token(id)
                    .map(|tok| std::iter::repeat(tok).take(count as usize))
            })
            .flatten()
            .collect()
    }

    #[inline]
    pub fn token_id(&self, token: &str) -> Option<usize> {
        self.tokens.get_index_of(token)
    }

    #[inline]
    pub fn token(&self, id: usize) -> Option<&str> {
        self.tokens.get_index(id).map(String::as_str)
    }

    /// (token, id) をidの昇順で返します
    pub fn token2id(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.tokens.iter().enumerate().map(|(id, tok)| (tok.as_str(), id))
    }

    /// Document frequency of `id`, 0 when out of range.
    #[inline]
    pub fn dfs(&self, id: usize) -> u64 {
        self.dfs.get(id).copied().unwrap_or(0)
    }

    #[inline]
    pub fn num_docs(&self) -> u64 {
        self.num_docs
    }

    #[inline]
    pub fn num_pos(&self) -> u64 {
        self.num_pos
    }

    #[inline]
    pub fn num_nnz(&self) -> u64 {
        self.num_nnz
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// `Dictionary(42 unique tokens: ['human', 'machine', ...]...)`
impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dictionary({} unique tokens: [", self.len())?;
        for (i, tok) in self.tokens.iter().take(5).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", tok)?;
        }
        write!(f, "]")?;
        if self.len() > 5 {
            write!(f, "...")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<Vec<&'static str>> {
        vec![
            vec!["graph", "minors", "trees"],
            vec!["trees", "paths", "trees"],
            vec!["graph", "survey"],
        ]
    }

    #[test]
    fn ids_follow_first_occurrence() {
        let dict = Dictionary::from_documents(&docs()).unwrap();
        let ids: Vec<(&str, usize)> = dict.token2id().collect();
        assert_eq!(
            ids,
            vec![("graph", 0), ("minors", 1), ("trees", 2), ("paths", 3), ("survey", 4)]
        );
    }

    #[test]
    fn tracks_corpus_statistics() {
        let dict = Dictionary::from_documents(&docs()).unwrap();
        assert_eq!(dict.num_docs(), 3);
        assert_eq!(dict.num_pos(), 8);
        assert_eq!(dict.num_nnz(), 7);
        assert_eq!(dict.dfs(2), 2); // trees
        assert_eq!(dict.dfs(0), 2); // graph
        assert_eq!(dict.dfs(99), 0);
    }

    #[test]
    fn doc2bow_counts_and_drops_unknown() {
        let dict = Dictionary::from_documents(&docs()).unwrap();
        let (bow, missing) = dict.doc2bow_with_missing(&["trees", "lab", "graph", "trees"]);
        assert_eq!(bow.as_slice(), &[(0, 1), (2, 2)]);
        assert_eq!(missing.get("lab"), Some(&1));
        assert_eq!(dict.len(), 5);
    }

    #[test]
    fn decode_expands_counts() {
        let dict = Dictionary::from_documents(&docs()).unwrap();
        let bow = dict.doc2bow(&["trees", "paths", "trees"]);
        assert_eq!(dict.decode(&bow), vec!["trees", "trees", "paths"]);
    }

    #[test]
    fn display_shows_first_five_tokens() {
        let dict = Dictionary::from_documents(&docs()).unwrap();
        assert_eq!(
            dict.to_string(),
            "Dictionary(5 unique tokens: ['graph', 'minors', 'trees', 'paths', 'survey'])"
        );
        let bigger = Dictionary::from_documents(&[vec!["a", "b", "c", "d", "e", "f"]]).unwrap();
        assert!(bigger.to_string().ends_with("'e']...)"));
    }

    #[test]
    fn empty_input_fails_construction() {
        let empty: Vec<Vec<String>> = Vec::new();
        assert!(matches!(
            Dictionary::from_documents(&empty),
            Err(Error::ConstructionFailed(_))
        ));
        let blank: Vec<Vec<String>> = vec![Vec::new(), Vec::new()];
        assert!(Dictionary::from_documents(&blank).is_err());
    }
}
