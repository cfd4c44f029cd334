//! 順位・頻度モジュール（Zipf則の確認用）

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;

/// 頻度降順の (順位, 頻度) 系列
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RankFrequency {
    /// 頻度順のトークン
    pub tokens: Vec<String>,
    /// 1始まりの順位
    pub ranks: Vec<usize>,
    pub frequencies: Vec<usize>,
}

impl RankFrequency {
    /// トークン列を数えて頻度降順に並べる
    ///
    /// 同頻度のトークンは初出順に並ぶ。
    pub fn from_tokens<S: AsRef<str>>(tokens: impl IntoIterator<Item = S>) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut counted: Vec<(String, usize)> = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            match index.get(token) {
                Some(&i) => counted[i].1 += 1,
                None => {
                    index.insert(token.to_string(), counted.len());
                    counted.push((token.to_string(), 1));
                }
            }
        }

        // 安定ソートなので同順位は初出順のまま
        counted.sort_by_key(|&(_, count)| Reverse(count));

        let ranks = (1..=counted.len()).collect();
        let (tokens, frequencies) = counted.into_iter().unzip();
        Self {
            tokens,
            ranks,
            frequencies,
        }
    }

    /// 異なり語数
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// 描画用の (順位, 頻度) 点列
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.ranks
            .iter()
            .zip(&self.frequencies)
            .map(|(&r, &f)| (r as f64, f as f64))
            .collect()
    }

    /// 上位n件を表示用に整形
    pub fn top(&self, n: usize) -> String {
        self.tokens
            .iter()
            .zip(&self.frequencies)
            .take(n)
            .enumerate()
            .map(|(i, (t, f))| format!("  {:>3}. {} ({})", i + 1, t, f))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_and_frequencies() {
        let rf = RankFrequency::from_tokens(["a", "a", "a", "b", "b", "c"]);
        assert_eq!(rf.ranks, [1, 2, 3]);
        assert_eq!(rf.frequencies, [3, 2, 1]);
        assert_eq!(rf.tokens, ["a", "b", "c"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let rf = RankFrequency::from_tokens(["乙", "甲", "丙", "甲", "乙", "丁"]);
        assert_eq!(rf.tokens, ["乙", "甲", "丙", "丁"]);
        assert_eq!(rf.frequencies, [2, 2, 1, 1]);
    }

    #[test]
    fn test_empty() {
        let rf = RankFrequency::from_tokens(Vec::<String>::new());
        assert!(rf.is_empty());
        assert!(rf.points().is_empty());
    }

    #[test]
    fn test_points() {
        let rf = RankFrequency::from_tokens(["x", "y", "x"]);
        assert_eq!(rf.points(), [(1.0, 2.0), (2.0, 1.0)]);
    }
}
