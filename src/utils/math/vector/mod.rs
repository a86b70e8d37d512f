pub mod math;
pub mod serde;

use std::fmt::{self, Debug};

use num::Num;

/// SpVecは0要素を疎とした過疎ベクトルの実装です
/// (index, value) のペアを保持し、
/// 要素はindexの昇順でソートされ、indexの重複がないことを保証します
///
/// 次元数は持ちません。存在しないindexは0として扱います
#[derive(Clone, PartialEq)]
pub struct SpVec<N>
where
    N: Num + Copy,
{
    entries: Vec<(usize, N)>,
}

impl<N> SpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new() -> Self {
        SpVec { entries: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        SpVec { entries: Vec::with_capacity(cap) }
    }

    /// 要素を末尾に追加します
    /// `index` は直前の要素より大きくなければなりません
    /// 0の値は保持しません
    ///
    /// # Arguments
    /// * `index` - 要素のインデックス
    /// * `value` - 要素の値
    #[inline]
    pub fn push(&mut self, index: usize, value: N) {
        debug_assert!(
            self.entries.last().map_or(true, |(last, _)| *last < index),
            "SpVec indices must be strictly increasing"
        );
        if value != N::zero() {
            self.entries.push((index, value));
        }
    }

    /// 順不同の (index, value) から作成します
    /// 同じindexの値は加算され、結果が0の要素は取り除かれます
    pub fn from_unsorted<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, N)>,
    {
        let mut pairs: Vec<(usize, N)> = pairs.into_iter().collect();
        pairs.sort_by_key(|(idx, _)| *idx);
        let mut entries: Vec<(usize, N)> = Vec::with_capacity(pairs.len());
        for (idx, val) in pairs {
            match entries.last_mut() {
                Some((last, acc)) if *last == idx => *acc = *acc + val,
                _ => entries.push((idx, val)),
            }
        }
        entries.retain(|(_, val)| *val != N::zero());
        SpVec { entries }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        self.entries
            .binary_search_by_key(&index, |(idx, _)| *idx)
            .ok()
            .map(|pos| self.entries[pos].1)
    }

    /// 非ゼロ要素の数
    #[inline]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 最大のインデックス
    #[inline]
    pub fn max_index(&self) -> Option<usize> {
        self.entries.last().map(|(idx, _)| *idx)
    }

    /// 非ゼロ要素を (index, value) の昇順で走査します
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.entries.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[(usize, N)] {
        &self.entries
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
    }

    /// indexが `bound` 以上の要素を取り除きます
    pub fn truncate_dim(&mut self, bound: usize) {
        let keep = self.entries.partition_point(|(idx, _)| *idx < bound);
        self.entries.truncate(keep);
    }
}

impl<N> Default for SpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    fn default() -> Self {
        SpVec::new()
    }
}

impl<N> FromIterator<(usize, N)> for SpVec<N>
where
    N: Num + Copy,
{
    fn from_iter<I: IntoIterator<Item = (usize, N)>>(iter: I) -> Self {
        SpVec::from_unsorted(iter)
    }
}

impl<N: Num + Copy + Debug> Debug for SpVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "SpVec(nnz: {}, {:?})", self.nnz(), self.entries)
        } else {
            f.debug_list().entries(self.entries.iter()).finish()
        }
    }
}

/// `[(0, 1), (6, 1)]` の形式で出力します
impl<N: Num + Copy + fmt::Display> fmt::Display for SpVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (idx, val)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", idx, val)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_skips_zero_values() {
        let mut v: SpVec<u32> = SpVec::new();
        v.push(0, 1);
        v.push(3, 0);
        v.push(5, 2);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.get(3), None);
        assert_eq!(v.get(5), Some(2));
        assert_eq!(v.max_index(), Some(5));
    }

    #[test]
    fn from_unsorted_merges_duplicates() {
        let v = SpVec::from_unsorted(vec![(4, 1u32), (1, 2), (4, 3), (2, 0)]);
        assert_eq!(v.as_slice(), &[(1, 2), (4, 4)]);
    }

    #[test]
    fn truncate_dim_drops_out_of_range() {
        let mut v = SpVec::from_unsorted(vec![(1, 1.0f64), (7, 2.0), (9, 3.0)]);
        v.truncate_dim(8);
        assert_eq!(v.as_slice(), &[(1, 1.0), (7, 2.0)]);
    }

    #[test]
    fn display_matches_pair_list() {
        let v = SpVec::from_unsorted(vec![(6, 1u32), (0, 1)]);
        assert_eq!(v.to_string(), "[(0, 1), (6, 1)]");
        assert_eq!(SpVec::<u32>::new().to_string(), "[]");
    }
}
