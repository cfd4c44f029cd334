//! 中国語コーパス統計ツール
//!
//! コーパスを読み込み、Zipf則の散布図と単語・文字単位のエントロピー表を画像に出力する。

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use zh_corpus_stats::analysis::{self, AnalysisConfig};
use zh_corpus_stats::corpus::{encoding_for_label, Corpus};
use zh_corpus_stats::export;
use zh_corpus_stats::filter::WordSet;
use zh_corpus_stats::report::{self, RenderConfig};
use zh_corpus_stats::tokenizer::SegmenterKind;
use zh_corpus_stats::tui::{run_tui, TuiState};

/// 中国語コーパスのZipf則とN-gramエントロピー解析
#[derive(Parser, Debug, Clone)]
#[command(name = "zh_corpus_stats")]
#[command(about = "中国語コーパスのZipf則とN-gramエントロピーを求める")]
struct Args {
    /// コーパスのルートディレクトリ
    #[arg(short, long, default_value = "中文语料库")]
    corpus: PathBuf,

    /// 句読点リスト
    #[arg(long, default_value = "cn_punctuation.txt")]
    punctuation: PathBuf,

    /// ストップワードリスト
    #[arg(long, default_value = "cn_stopwords.txt")]
    stopwords: PathBuf,

    /// コーパスファイルの文字コード（WHATWGラベル）
    #[arg(long, default_value = "gbk")]
    encoding: String,

    /// 分かち書き器
    #[arg(long, value_enum, default_value_t = SegmenterKind::Jieba)]
    segmenter: SegmenterKind,

    /// jiebaの未知語HMMを使わない
    #[arg(long, default_value_t = false)]
    no_hmm: bool,

    /// 散布図の出力パス（.svgならSVG）
    #[arg(long, default_value = "齐夫定理.png")]
    zipf_plot: PathBuf,

    /// 単語エントロピー表の出力パス
    #[arg(long, default_value = "word.png")]
    word_table: PathBuf,

    /// 文字エントロピー表の出力パス
    #[arg(long, default_value = "character.png")]
    char_table: PathBuf,

    /// 全体行のラベル
    #[arg(long, default_value = analysis::DEFAULT_AGGREGATE_LABEL)]
    aggregate_label: String,

    /// 描画フォント（漢字を含むもの）
    #[arg(long, default_value = "sans-serif")]
    font: String,

    /// 解析結果のJSON出力パス
    #[arg(long)]
    json: Option<PathBuf>,

    /// エントロピー表のTSV出力パス
    #[arg(long)]
    tsv: Option<PathBuf>,

    /// TUIモード（結果のプレビュー）
    #[arg(long, default_value_t = false)]
    tui: bool,

    /// 詳細ログ (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// ログを減らす (-q, -qq)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,
}

impl From<&Args> for AnalysisConfig {
    fn from(args: &Args) -> Self {
        Self {
            aggregate_label: args.aggregate_label.clone(),
            segmenter: args.segmenter,
            hmm: !args.no_hmm,
        }
    }
}

impl From<&Args> for RenderConfig {
    fn from(args: &Args) -> Self {
        Self {
            font: args.font.clone(),
            ..Self::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    println!("=== 中国語コーパス統計 ===\n");

    let punctuation = WordSet::from_file(&args.punctuation).context("句読点リストの読み込み")?;
    let stopwords = WordSet::from_file(&args.stopwords).context("ストップワードの読み込み")?;
    info!("句読点 {} 件, ストップワード {} 件", punctuation.len(), stopwords.len());

    let encoding = encoding_for_label(&args.encoding)?;
    info!("コーパスを読み込み中: {:?} ({})", args.corpus, encoding.name());
    let corpus = Corpus::from_dir(&args.corpus, encoding).context("コーパスの読み込み")?;
    if corpus.is_empty() {
        warn!("対象となる文書がありません: {:?}", args.corpus);
    }
    println!("{}\n", corpus.summary());

    let config = AnalysisConfig::from(&args);
    let segmenter = config.segmenter.build(config.hmm);

    // 分かち書き（プログレスバー）
    let pb = ProgressBar::new(corpus.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} (Docs) | {msg}")
            .context("プログレスバーのテンプレート")?
            .progress_chars("#>-"),
    );
    let docs = analysis::tokenize_corpus_with_callback(
        &corpus,
        segmenter.as_ref(),
        &punctuation,
        |i, doc| {
            pb.set_position(i as u64 + 1);
            pb.set_message(doc.name.clone());
        },
    );
    pb.finish_with_message("done");

    let total_words: usize = docs.iter().map(|d| d.words.len()).sum();
    info!("総語数: {}", total_words);

    let result = analysis::analyze(&docs, &stopwords, &config);

    println!("\n異なり語数（ストップワード除外）: {}", result.zipf.len());
    println!("{}\n", result.zipf.top(10));
    println!("{}\n", result.word_entropy.format());
    println!("{}\n", result.char_entropy.format());

    // 描画
    let render_config = RenderConfig::from(&args);
    report::render_zipf_plot(&result.zipf, &args.zipf_plot, &render_config)?;
    report::render_entropy_table(&result.word_entropy, &args.word_table, &render_config)?;
    report::render_entropy_table(&result.char_entropy, &args.char_table, &render_config)?;

    if let Some(path) = &args.json {
        export::export_json(&result, path)?;
    }
    if let Some(path) = &args.tsv {
        export::export_tsv(&result, path)?;
    }

    if args.tui {
        if atty::is(atty::Stream::Stdout) {
            run_tui(&TuiState::new(&result)).context("TUI")?;
        } else {
            warn!("標準出力が端末ではないため --tui を無視します");
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if let Some(level) = level_override(verbose, quiet) {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

/// -v / -q 指定時のみ RUST_LOG を上書きするレベル
fn level_override(verbose: u8, quiet: u8) -> Option<log::LevelFilter> {
    use log::LevelFilter;

    match (quiet, verbose) {
        (0, 0) => None,
        (0, 1) => Some(LevelFilter::Debug),
        (0, _) => Some(LevelFilter::Trace),
        (1, _) => Some(LevelFilter::Warn),
        _ => Some(LevelFilter::Error),
    }
}
