use num::Num;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SpVec;

/// (index, value) のシーケンスとしてシリアライズします
impl<N> Serialize for SpVec<N>
where
    N: Num + Copy + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.as_slice().iter())
    }
}

/// 入力の順序は信用せず、from_unsortedで不変条件を復元します
impl<'de, N> Deserialize<'de> for SpVec<N>
where
    N: Num + Copy + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(usize, N)>::deserialize(deserializer)?;
        Ok(SpVec::from_unsorted(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_pair_list() {
        let v = SpVec::from_unsorted(vec![(6, 1u32), (0, 2)]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[[0,2],[6,1]]");
    }

    #[test]
    fn deserialize_restores_order() {
        let v: SpVec<u32> = serde_json::from_str("[[6,1],[0,2],[6,1]]").unwrap();
        assert_eq!(v.as_slice(), &[(0, 2), (6, 2)]);
    }
}
