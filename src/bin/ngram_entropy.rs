use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use zh_corpus_stats::corpus::clean_text;
use zh_corpus_stats::filter::WordSet;
use zh_corpus_stats::ngram::{entropy_of, EntropyTriple, NgramCounts};
use zh_corpus_stats::tokenizer::{tokenize, SegmenterKind};

/// 1つのUTF-8テキストの単語・文字エントロピーを表示する
#[derive(Parser, Debug)]
#[command(name = "ngram_entropy")]
struct Args {
    /// 入力ファイル（`-` で標準入力）
    input: PathBuf,

    /// 句読点リスト
    #[arg(long)]
    punctuation: Option<PathBuf>,

    /// 分かち書き器
    #[arg(long, value_enum, default_value_t = SegmenterKind::Jieba)]
    segmenter: SegmenterKind,
}

fn print_triple(name: &str, h: &EntropyTriple) {
    println!("## {}", name);
    println!("  N=1: {:.6}", h.unigram);
    println!("  N=2: {:.6}", h.bigram);
    println!("  N=3: {:.6}", h.trigram);
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("標準入力の読み込み")?;
        buf
    } else {
        std::fs::read_to_string(&args.input)
            .with_context(|| format!("{:?} の読み込み", args.input))?
    };

    let punctuation = match &args.punctuation {
        Some(path) => WordSet::from_file(path)?,
        None => WordSet::new(),
    };

    let segmenter = args.segmenter.build(true);
    let words = tokenize(&clean_text(&raw), segmenter.as_ref(), &punctuation);
    let chars: Vec<char> = words.iter().flat_map(|w| w.chars()).collect();

    println!("=== N-gram エントロピー ===\n");
    println!("単語: {}", NgramCounts::from_tokens(&words).summary());
    println!("文字: {}\n", NgramCounts::from_tokens(&chars).summary());

    print_triple("単語（比特/词）", &entropy_of(&words));
    print_triple("文字（比特/字）", &entropy_of(&chars));

    Ok(())
}
