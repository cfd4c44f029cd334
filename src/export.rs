//! エクスポートモジュール
//!
//! 解析結果を機械可読な形式（JSON / TSV）で書き出す。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::{Analysis, EntropyTable};
use crate::error::{CorpusError, Result};

/// JSON形式でエクスポート
///
/// キー: `zipf`, `word_entropy`, `char_entropy`
pub fn export_json(analysis: &Analysis, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| CorpusError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, analysis).map_err(|source| CorpusError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|e| CorpusError::io(path, e))?;
    log::info!("JSONを保存: {:?}", path);
    Ok(())
}

/// 1つの表をTSVに整形
pub fn table_to_tsv(table: &EntropyTable) -> String {
    let mut content = format!("# {}\n", table.title);
    content.push_str("采用文本\tN=1\tN=2\tN=3\n");
    for row in &table.rows {
        let [h1, h2, h3] = row.entropy.as_array();
        content.push_str(&format!("{}\t{:.6}\t{:.6}\t{:.6}\n", row.label, h1, h2, h3));
    }
    content
}

/// 単語・文字の両表をTSV形式でエクスポート（表の間は空行）
pub fn export_tsv(analysis: &Analysis, path: &Path) -> Result<()> {
    let content = [&analysis.word_entropy, &analysis.char_entropy]
        .iter()
        .map(|table| table_to_tsv(table))
        .collect::<Vec<_>>()
        .join("\n");

    std::fs::write(path, content).map_err(|e| CorpusError::io(path, e))?;
    log::info!("TSVを保存: {:?}", path);
    Ok(())
}
