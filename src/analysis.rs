//! 解析モジュール
//!
//! コーパスの分かち書きから、順位・頻度系列と文書別エントロピー表までをまとめる。

use std::hash::Hash;

use serde::Serialize;

use crate::corpus::{Corpus, Document};
use crate::filter::WordSet;
use crate::ngram::{entropy_of, EntropyTriple};
use crate::tokenizer::{is_content_word, tokenize, Segmenter, SegmenterKind};
use crate::zipf::RankFrequency;

pub const WORD_TABLE_TITLE: &str = "基于词的N元模型的中文信息熵";
pub const CHAR_TABLE_TITLE: &str = "基于字的N元模型的中文信息熵";
pub const DEFAULT_AGGREGATE_LABEL: &str = "所有小说";

/// 解析の設定
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// 全文書を連結した行のラベル
    pub aggregate_label: String,
    /// 分かち書き器
    pub segmenter: SegmenterKind,
    /// jiebaの未知語HMM
    pub hmm: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            aggregate_label: DEFAULT_AGGREGATE_LABEL.to_string(),
            segmenter: SegmenterKind::Jieba,
            hmm: true,
        }
    }
}

/// 分かち書き済みの文書
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizedDocument {
    pub name: String,
    pub words: Vec<String>,
}

impl TokenizedDocument {
    /// 単語を連結した文字列の文字列
    pub fn chars(&self) -> Vec<char> {
        self.words.iter().flat_map(|w| w.chars()).collect()
    }
}

/// エントロピーの単位
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUnit {
    Word,
    Char,
}

impl TokenUnit {
    fn label(self) -> &'static str {
        match self {
            TokenUnit::Word => "比特/词",
            TokenUnit::Char => "比特/字",
        }
    }
}

/// エントロピー表の1行
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntropyRow {
    pub label: String,
    #[serde(flatten)]
    pub entropy: EntropyTriple,
}

/// 文書別＋全体のエントロピー表（最終行が全体）
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntropyTable {
    pub title: String,
    pub unit: TokenUnit,
    pub rows: Vec<EntropyRow>,
}

impl EntropyTable {
    /// 列見出し
    pub fn headers(&self) -> [String; 4] {
        let unit = self.unit.label();
        [
            "采用文本".to_string(),
            format!("N=1（{}）", unit),
            format!("N=2（{}）", unit),
            format!("N=3（{}）", unit),
        ]
    }

    /// 全体行
    pub fn aggregate(&self) -> Option<&EntropyRow> {
        self.rows.last()
    }

    /// 端末表示用に整形
    pub fn format(&self) -> String {
        let mut out = format!("=== {} ===\n", self.title);
        out.push_str(&self.headers().join("\t"));
        for row in &self.rows {
            let [h1, h2, h3] = row.entropy.as_array();
            out.push_str(&format!("\n{}\t{:.4}\t{:.4}\t{:.4}", row.label, h1, h2, h3));
        }
        out
    }
}

/// 解析結果
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    pub zipf: RankFrequency,
    pub word_entropy: EntropyTable,
    pub char_entropy: EntropyTable,
}

/// 全文書を分かち書きする（文書ごとにコールバック）
pub fn tokenize_corpus_with_callback<F>(
    corpus: &Corpus,
    segmenter: &dyn Segmenter,
    punctuation: &WordSet,
    mut callback: F,
) -> Vec<TokenizedDocument>
where
    F: FnMut(usize, &Document),
{
    corpus
        .documents()
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            let words = tokenize(&doc.text, segmenter, punctuation);
            log::debug!("{}: {} 語", doc.name, words.len());
            callback(i, doc);
            TokenizedDocument {
                name: doc.name.clone(),
                words,
            }
        })
        .collect()
}

/// 全文書を分かち書きする
pub fn tokenize_corpus(
    corpus: &Corpus,
    segmenter: &dyn Segmenter,
    punctuation: &WordSet,
) -> Vec<TokenizedDocument> {
    tokenize_corpus_with_callback(corpus, segmenter, punctuation, |_, _| {})
}

/// ストップワードを除いた全文書の順位・頻度系列
pub fn zipf_series(docs: &[TokenizedDocument], stopwords: &WordSet) -> RankFrequency {
    RankFrequency::from_tokens(
        docs.iter()
            .flat_map(|d| d.words.iter())
            .filter(|w| !stopwords.contains(w) && is_content_word(w)),
    )
}

/// 系列ごとの行と、全系列を連結した全体行からなる表を作る
fn build_table<T: Eq + Hash + Clone>(
    title: &str,
    unit: TokenUnit,
    aggregate_label: &str,
    sequences: &[(&str, Vec<T>)],
) -> EntropyTable {
    let mut rows: Vec<EntropyRow> = sequences
        .iter()
        .map(|(label, tokens)| EntropyRow {
            label: label.to_string(),
            entropy: entropy_of(tokens),
        })
        .collect();

    let combined: Vec<T> = sequences
        .iter()
        .flat_map(|(_, tokens)| tokens.iter().cloned())
        .collect();
    rows.push(EntropyRow {
        label: aggregate_label.to_string(),
        entropy: entropy_of(&combined),
    });

    EntropyTable {
        title: title.to_string(),
        unit,
        rows,
    }
}

/// 単語単位のエントロピー表
pub fn word_entropy_table(docs: &[TokenizedDocument], aggregate_label: &str) -> EntropyTable {
    let sequences: Vec<(&str, Vec<&str>)> = docs
        .iter()
        .map(|d| (d.name.as_str(), d.words.iter().map(String::as_str).collect()))
        .collect();
    build_table(WORD_TABLE_TITLE, TokenUnit::Word, aggregate_label, &sequences)
}

/// 文字単位のエントロピー表
pub fn char_entropy_table(docs: &[TokenizedDocument], aggregate_label: &str) -> EntropyTable {
    let sequences: Vec<(&str, Vec<char>)> =
        docs.iter().map(|d| (d.name.as_str(), d.chars())).collect();
    build_table(CHAR_TABLE_TITLE, TokenUnit::Char, aggregate_label, &sequences)
}

/// 分かち書き済み文書から全ての統計を求める
pub fn analyze(docs: &[TokenizedDocument], stopwords: &WordSet, config: &AnalysisConfig) -> Analysis {
    Analysis {
        zipf: zipf_series(docs, stopwords),
        word_entropy: word_entropy_table(docs, &config.aggregate_label),
        char_entropy: char_entropy_table(docs, &config.aggregate_label),
    }
}
