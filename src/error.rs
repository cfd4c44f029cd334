//! エラー型モジュール

use std::path::PathBuf;

/// コーパス解析の各段階で発生するエラー
#[derive(thiserror::Error, Debug)]
pub enum CorpusError {
    #[error("ファイルを読み書きできません: {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ディレクトリ走査に失敗: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("未知の文字コード: {0}")]
    UnknownEncoding(String),

    #[error("描画に失敗: {path:?}: {message}")]
    Render { path: PathBuf, message: String },

    #[error("JSON書き出しに失敗: {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
