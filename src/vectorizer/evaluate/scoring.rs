use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

/// One scored training document
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEntry {
    /// position of the document in the training corpus
    pub doc_id: usize,
    pub score: f64,
}

/// Structure to store search results
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// スコア列から作成します (doc_idは位置)
    pub fn from_scores(scores: &[f64]) -> Self {
        Hits {
            list: scores
                .iter()
                .enumerate()
                .map(|(doc_id, &score)| HitEntry { doc_id, score })
                .collect(),
        }
    }

    /// Sort results by descending score
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|hit| !hit.score.is_nan());
        // 同点はdoc_idの昇順
        self.list
            .sort_by(|a, b| b.score.total_cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));
        self
    }

    /// Sort results by ascending score
    pub fn sort_by_score_asc(&mut self) -> &mut Self {
        self.list.retain(|hit| !hit.score.is_nan());
        self.list
            .sort_by(|a, b| a.score.total_cmp(&b.score).then(a.doc_id.cmp(&b.doc_id)));
        self
    }

    pub fn truncate(&mut self, len: usize) -> &mut Self {
        self.list.truncate(len);
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Debug for HitEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:.8})", self.doc_id, self.score)
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // Pretty print with alternate formatting: each hit on a new line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {}: {:.6}", hit.doc_id, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

/// `[(0, 0.38249454), (1, 0.24265282)]`
impl fmt::Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.list, f)
    }
}
