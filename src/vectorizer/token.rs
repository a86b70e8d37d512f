use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::REFERENCE_STOPWORDS;

/// Stopword set
/// tokenと完全一致したエントリのみ除外されます
///
/// エントリは単語単位に分割されません。
/// `"for a of and to the in"` のような複数語のエントリはどのtokenとも一致しません
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StopWords {
    entries: IndexSet<String>,
}

impl StopWords {
    /// 空のstopword set
    pub fn none() -> Self {
        Self::default()
    }

    /// The reference stopword list: a single multi-word entry.
    /// Filters nothing in practice.
    pub fn reference() -> Self {
        Self::from_words(REFERENCE_STOPWORDS.iter().copied())
    }

    /// エントリをそのまま保持します
    pub fn from_words<I, T>(words: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            entries: words.into_iter().map(|w| w.as_ref().to_string()).collect(),
        }
    }

    /// 各エントリを空白で分割して個別の単語として保持します
    pub fn split_phrases<I, T>(phrases: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut entries = IndexSet::new();
        for phrase in phrases {
            for word in phrase.as_ref().split_whitespace() {
                entries.insert(word.to_string());
            }
        }
        Self { entries }
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains(token)
    }

    /// 空白を含むためtokenと一致し得ないエントリ
    pub fn unreachable_entries(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|e| e.chars().any(char::is_whitespace))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tokenizer
/// 文書を小文字化し、単語文字 (英数字と`_`) の連続をtokenとして切り出します
/// stopwordと完全一致したtokenは除外されます
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stopwords: StopWords,
}

impl Tokenizer {
    pub fn new(stopwords: StopWords) -> Self {
        for entry in stopwords.unreachable_entries() {
            warn!(
                entry,
                "stopword entry contains whitespace and can never match a token"
            );
        }
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    /// 英数字と `_` を単語文字とみなします
    ///
    /// `\w` とほぼ同じですが、Unicodeの Other_Alphabetic な結合文字
    /// (デーヴァナーガリーの母音記号など) も単語文字になるので、
    /// `"हिंदी"` は分割されず1つのtokenになります
    #[inline]
    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    /// 文書をtokenに分割します
    ///
    /// # Arguments
    /// * `doc` - 生の文書
    ///
    /// # Returns
    /// * `Vec<String>` - 出現順のtoken
    pub fn tokenize(&self, doc: &str) -> Vec<String> {
        let lowered = doc.to_lowercase();
        lowered
            .split(|c: char| !Self::is_word_char(c))
            .filter(|tok| !tok.is_empty() && !self.stopwords.contains(tok))
            .map(str::to_string)
            .collect()
    }

    pub fn tokenize_all<T>(&self, docs: &[T]) -> Vec<Vec<String>>
    where
        T: AsRef<str>,
    {
        docs.iter().map(|doc| self.tokenize(doc.as_ref())).collect()
    }
}
