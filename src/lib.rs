//! 中国語コーパスの統計解析
//!
//! 単語の順位・頻度分布（Zipf則）と、単語・文字単位のN-gramエントロピーを求める。

pub mod analysis;
pub mod corpus;
pub mod error;
pub mod export;
pub mod filter;
pub mod ngram;
pub mod report;
pub mod tokenizer;
pub mod tui;
pub mod zipf;

pub use analysis::{Analysis, AnalysisConfig, EntropyRow, EntropyTable, TokenizedDocument};
pub use corpus::{Corpus, Document};
pub use error::{CorpusError, Result};
pub use filter::WordSet;
pub use ngram::{entropy_of, EntropyTriple, NgramCounts};
pub use zipf::RankFrequency;
