//! N-gramモジュール
//!
//! トークン列の1〜3-gram頻度と、そこから求める情報エントロピーを扱う。
//! 単語列（`String`）にも文字列（`char`）にも使える。

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// トークン列のN-gram頻度
///
/// キーは元のトークン列を借用する。
#[derive(Clone, Debug)]
pub struct NgramCounts<'a, T> {
    /// 1-gram頻度
    pub unigrams: HashMap<&'a T, usize>,
    /// 2-gram（連続2トークン）頻度
    pub bigrams: HashMap<(&'a T, &'a T), usize>,
    /// 3-gram頻度（先頭2トークンの組と3番目のトークン）
    pub trigrams: HashMap<((&'a T, &'a T), &'a T), usize>,
}

/// キー列を数え上げて頻度表にする
fn tally<K: Eq + Hash>(keys: impl Iterator<Item = K>) -> HashMap<K, usize> {
    keys.fold(HashMap::new(), |mut acc, key| {
        *acc.entry(key).or_insert(0) += 1;
        acc
    })
}

/// `Σ (count / total) · log2(context / count)`
///
/// 各項は `context >= count` なので非負。
fn weighted_surprisal(terms: impl Iterator<Item = (usize, usize)>, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    terms
        .map(|(count, context)| {
            let count = count as f64;
            (count / total) * (context as f64 / count).log2()
        })
        .sum()
}

impl<'a, T: Eq + Hash> NgramCounts<'a, T> {
    /// トークン列を1パスずつ数える
    pub fn from_tokens(tokens: &'a [T]) -> Self {
        let unigrams = tally(tokens.iter());
        let bigrams = tally(tokens.windows(2).map(|w| (&w[0], &w[1])));
        let trigrams = tally(tokens.windows(3).map(|w| ((&w[0], &w[1]), &w[2])));
        Self {
            unigrams,
            bigrams,
            trigrams,
        }
    }

    /// 総1-gram数
    pub fn total_unigrams(&self) -> usize {
        self.unigrams.values().sum()
    }

    /// 総2-gram数
    pub fn total_bigrams(&self) -> usize {
        self.bigrams.values().sum()
    }

    /// 総3-gram数
    pub fn total_trigrams(&self) -> usize {
        self.trigrams.values().sum()
    }

    /// 1-gramエントロピー `H1 = -Σ p(w) log2 p(w)`
    pub fn unigram_entropy(&self) -> f64 {
        let total = self.total_unigrams();
        weighted_surprisal(self.unigrams.values().map(|&c| (c, total)), total)
    }

    /// 2-gram条件付きエントロピー
    ///
    /// 重みは2-gramの相対頻度、対数の中身は `count(w1,w2) / count(w1)`。
    pub fn bigram_entropy(&self) -> f64 {
        let terms = self.bigrams.iter().filter_map(|(&(w1, _), &count)| {
            let context = self.unigrams.get(w1).copied();
            debug_assert!(context.is_some(), "2-gramの先頭が1-gram表にない");
            context.map(|context| (count, context))
        });
        weighted_surprisal(terms, self.total_bigrams())
    }

    /// 3-gram条件付きエントロピー（直前の2-gramで条件付け）
    pub fn trigram_entropy(&self) -> f64 {
        let terms = self.trigrams.iter().filter_map(|(&(pair, _), &count)| {
            let context = self.bigrams.get(&pair).copied();
            debug_assert!(context.is_some(), "3-gramの先頭2トークンが2-gram表にない");
            context.map(|context| (count, context))
        });
        weighted_surprisal(terms, self.total_trigrams())
    }

    /// 3種のエントロピーをまとめて求める
    pub fn entropy(&self) -> EntropyTriple {
        EntropyTriple {
            unigram: self.unigram_entropy(),
            bigram: self.bigram_entropy(),
            trigram: self.trigram_entropy(),
        }
    }

    /// 統計情報のサマリー
    pub fn summary(&self) -> String {
        format!(
            "1-gram types: {}, 2-gram types: {}, 3-gram types: {}, tokens: {}",
            self.unigrams.len(),
            self.bigrams.len(),
            self.trigrams.len(),
            self.total_unigrams()
        )
    }
}

/// 1〜3-gramのエントロピー（ビット/トークン）
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct EntropyTriple {
    pub unigram: f64,
    pub bigram: f64,
    pub trigram: f64,
}

impl EntropyTriple {
    pub fn as_array(&self) -> [f64; 3] {
        [self.unigram, self.bigram, self.trigram]
    }
}

/// トークン列のエントロピーを求める
pub fn entropy_of<T: Eq + Hash>(tokens: &[T]) -> EntropyTriple {
    NgramCounts::from_tokens(tokens).entropy()
}
