//! コーパスモジュール
//!
//! コーパスディレクトリの走査と本文の読み込み・整形を行う。

use std::path::Path;

use encoding_rs::Encoding;
use walkdir::WalkDir;

use crate::error::{CorpusError, Result};

/// 1文書（ファイル名と整形済み本文）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

/// コーパス（ファイル名 → 本文、読み込み順を保持）
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

/// CJK統合漢字かどうかを判定
fn is_cjk(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fa5}')
}

/// 全角英数記号（U+FF01〜U+FF5E）かどうかを判定
fn is_fullwidth_latin(c: char) -> bool {
    matches!(c, '\u{ff01}'..='\u{ff5e}')
}

/// 本文から改行・全角英数記号・全角空白を取り除く
pub fn clean_text(raw: &str) -> String {
    raw.chars()
        .filter(|&c| !matches!(c, '\n' | '\r' | '\u{3000}') && !is_fullwidth_latin(c))
        .collect()
}

/// 拡張子が `.txt`（大文字小文字無視）でファイル名に漢字を含むか
pub fn is_corpus_file(path: &Path) -> bool {
    let is_txt = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("txt"));
    let has_cjk = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.chars().any(is_cjk));
    is_txt && has_cjk
}

/// WHATWGラベルから文字コードを引く
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| CorpusError::UnknownEncoding(label.to_string()))
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// ディレクトリを再帰的に走査してコーパスを読み込む
    ///
    /// 対象外のファイルは黙って飛ばす。読めないファイルは警告して飛ばす。
    pub fn from_dir(root: &Path, encoding: &'static Encoding) -> Result<Self> {
        if !root.is_dir() {
            return Err(CorpusError::io(
                root,
                std::io::Error::new(std::io::ErrorKind::NotFound, "コーパスディレクトリがありません"),
            ));
        }

        let mut corpus = Self::new();
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    log::warn!("走査できないエントリを飛ばします: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_corpus_file(path) {
                continue;
            }

            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("読み込めないファイルを飛ばします: {:?}: {}", path, e);
                    continue;
                }
            };
            let (decoded, _, had_errors) = encoding.decode(&bytes);
            if had_errors {
                log::warn!("{:?}: {} として解釈できないバイトを置換しました", path, encoding.name());
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            log::debug!("{:?}: {} バイト", path, bytes.len());
            corpus.insert(name, clean_text(&decoded));
        }

        Ok(corpus)
    }

    /// 整形済みテキスト群から作る
    pub fn from_texts<N, T>(texts: impl IntoIterator<Item = (N, T)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        let mut corpus = Self::new();
        for (name, text) in texts {
            corpus.insert(name.into(), text.into());
        }
        corpus
    }

    /// 文書を追加（同名なら位置はそのままで本文を差し替える）
    pub fn insert(&mut self, name: String, text: String) {
        if let Some(doc) = self.documents.iter_mut().find(|d| d.name == name) {
            log::warn!("同名のファイル {} があります。後の内容で上書きします", name);
            doc.text = text;
        } else {
            self.documents.push(Document { name, text });
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// 総文字数
    pub fn total_chars(&self) -> usize {
        self.documents.iter().map(|d| d.text.chars().count()).sum()
    }

    /// 統計情報のサマリー
    pub fn summary(&self) -> String {
        format!(
            "Corpus:\n  Documents: {}\n  Total chars: {}",
            self.len(),
            self.total_chars()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        let raw = "第一章\r\n　天龍ＡＢＣ八部！\n完";
        assert_eq!(clean_text(raw), "第一章天龍八部完");
    }

    #[test]
    fn test_is_corpus_file() {
        assert!(is_corpus_file(Path::new("dir/天龙八部.txt")));
        assert!(is_corpus_file(Path::new("白马啸西风.TXT")));
        assert!(!is_corpus_file(Path::new("inf.txt")));
        assert!(!is_corpus_file(Path::new("天龙八部.md")));
        assert!(!is_corpus_file(Path::new("天龙八部")));
    }

    #[test]
    fn test_encoding_for_label() {
        assert_eq!(encoding_for_label("gbk").unwrap(), encoding_rs::GBK);
        assert_eq!(encoding_for_label("UTF-8").unwrap(), encoding_rs::UTF_8);
        assert!(matches!(
            encoding_for_label("klingon"),
            Err(CorpusError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_duplicate_name_keeps_position() {
        let corpus = Corpus::from_texts([("甲.txt", "一"), ("乙.txt", "二"), ("甲.txt", "三")]);
        let names: Vec<_> = corpus.documents().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["甲.txt", "乙.txt"]);
        assert_eq!(corpus.documents()[0].text, "三");
    }

    #[test]
    fn test_from_dir_walks_and_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("金庸");
        std::fs::create_dir(&sub).unwrap();

        let (gbk, _, _) = encoding_rs::GBK.encode("雪山飞狐\n　胡斐（ＡＢ）");
        std::fs::write(sub.join("雪山飞狐.txt"), &gbk).unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"skip").unwrap();
        std::fs::write(dir.path().join("鸳鸯刀.dat"), b"skip").unwrap();

        let corpus = Corpus::from_dir(dir.path(), encoding_rs::GBK).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.documents()[0].name, "雪山飞狐.txt");
        assert_eq!(corpus.documents()[0].text, "雪山飞狐胡斐");
    }

    #[cfg(unix)]
    #[test]
    fn test_from_dir_follows_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("store");
        std::fs::create_dir(&store).unwrap();
        std::fs::write(store.join("原本.dat"), "鸳鸯刀".as_bytes()).unwrap();

        let root = dir.path().join("语料");
        std::fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(store.join("原本.dat"), root.join("鸳鸯刀.txt")).unwrap();

        let corpus = Corpus::from_dir(&root, encoding_rs::UTF_8).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.documents()[0].name, "鸳鸯刀.txt");
        assert_eq!(corpus.documents()[0].text, "鸳鸯刀");
    }

    #[test]
    fn test_from_dir_missing_root() {
        let err = Corpus::from_dir(Path::new("no/such/语料库"), encoding_rs::GBK).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }
}
