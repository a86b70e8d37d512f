use std::cmp::Ordering;

use num::Num;

use super::SpVec;

impl<N> SpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// ドット積を計算するメソッド
    /// 両方のindexを昇順にマージしながら走査します
    ///
    /// # Arguments
    /// * `other` - 他のベクトル
    ///
    /// # Returns
    /// * `f64` - ドット積の結果
    #[inline]
    pub fn dot<M>(&self, other: &SpVec<M>) -> f64
    where
        M: Num + Copy + Into<f64>,
    {
        let a = self.as_slice();
        let b = other.as_slice();
        let mut result = 0_f64;
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let (ia, va) = a[i];
            let (ib, vb) = b[j];
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    result += va.into() * vb.into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.raw_iter()
            .map(|(_, val)| {
                let v: f64 = val.into();
                v * v
            })
            .sum()
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// コサイン類似度
    /// cosθ = A・B / (|A||B|)
    /// どちらかのノルムが0なら0を返します
    pub fn cosine_similarity<M>(&self, other: &SpVec<M>) -> f64
    where
        M: Num + Copy + Into<f64>,
    {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        self.dot(other) / (norm_a * norm_b)
    }
}

impl SpVec<f64> {
    /// L2ノルムが1になるようにスケールしたベクトルを返します
    /// ゼロベクトルはそのまま返します
    pub fn to_unit(&self) -> SpVec<f64> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return self.clone();
        }
        let mut unit = SpVec::with_capacity(self.nnz());
        for (idx, val) in self.raw_iter() {
            unit.push(idx, val / norm);
        }
        unit
    }
}
