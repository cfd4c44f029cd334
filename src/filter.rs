//! フィルタ語リストモジュール
//!
//! 句読点リスト・ストップワードリスト（1行1語）を読み込む。

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{CorpusError, Result};

/// 除外語の集合
///
/// 空行は空文字列として残る。空のトークンは存在しないので判定には影響しない。
#[derive(Clone, Debug, Default)]
pub struct WordSet {
    words: HashSet<String>,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// リストファイルを読み込む（各行の前後空白を除去、重複は集約）
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| CorpusError::io(path, e))?;
        let reader = BufReader::new(file);
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line.map_err(|e| CorpusError::io(path, e))?;
            words.insert(line.trim().to_string());
        }
        log::debug!("{:?}: {} 語", path, words.len());
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for WordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
