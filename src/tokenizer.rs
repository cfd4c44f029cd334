//! 分かち書きモジュール
//!
//! 本文を単語列に分割し、句読点とラテン文字のトークンを取り除く。

use jieba_rs::Jieba;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::filter::WordSet;

/// 分かち書き器
///
/// 入力を覆う部分文字列の列を順に返す。
pub trait Segmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// jieba による単語分割
pub struct JiebaSegmenter {
    jieba: Jieba,
    hmm: bool,
}

impl JiebaSegmenter {
    /// 組み込み辞書で初期化
    pub fn new(hmm: bool) -> Self {
        Self {
            jieba: Jieba::new(),
            hmm,
        }
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.jieba.cut(text, self.hmm)
    }
}

/// 1文字ずつに分割する
#[derive(Clone, Copy, Debug, Default)]
pub struct CharSegmenter;

impl Segmenter for CharSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect()
    }
}

/// 分かち書き器の種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SegmenterKind {
    Jieba,
    Char,
}

impl SegmenterKind {
    pub fn build(self, hmm: bool) -> Box<dyn Segmenter> {
        match self {
            SegmenterKind::Jieba => Box::new(JiebaSegmenter::new(hmm)),
            SegmenterKind::Char => Box::new(CharSegmenter),
        }
    }
}

/// 文字カテゴリ L*（Lu/Ll/Lt/Lm/Lo）か
///
/// 字母数字（Nl: 〇, Ⅲ など）と結合記号（M*）は含まない。
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// 全て字母で構成され、ASCIIでないトークンか
pub fn is_content_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_letter) && !word.is_ascii()
}

/// 分かち書きして句読点・非字母・ASCIIのトークンを除く
pub fn tokenize(text: &str, segmenter: &dyn Segmenter, punctuation: &WordSet) -> Vec<String> {
    segmenter
        .segment(text)
        .into_iter()
        .filter(|w| !punctuation.contains(w) && is_content_word(w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_content_word() {
        assert!(is_content_word("江湖"));
        assert!(is_content_word("é"));
        assert!(!is_content_word("abc"));
        assert!(!is_content_word("12"));
        assert!(!is_content_word("一1"));
        assert!(!is_content_word("，"));
        assert!(!is_content_word(""));
    }

    #[test]
    fn test_letter_numbers_and_marks_rejected() {
        assert!(!is_content_word("〇"));
        assert!(!is_content_word("一九〇〇"));
        assert!(!is_content_word("Ⅲ"));
        assert!(!is_content_word("e\u{301}"));
        assert!(is_content_word("々"));
    }

    #[test]
    fn test_tokenize_drops_letter_numbers() {
        let tokens = tokenize("一九〇〇年第Ⅲ卷", &CharSegmenter, &WordSet::new());
        assert_eq!(tokens, ["一", "九", "年", "第", "卷"]);
    }

    #[test]
    fn test_char_segmenter() {
        assert_eq!(CharSegmenter.segment("猫爱a鱼"), ["猫", "爱", "a", "鱼"]);
        assert!(CharSegmenter.segment("").is_empty());
    }

    #[test]
    fn test_tokenize_filters() {
        let punctuation: WordSet = ["…"].into_iter().collect();
        let tokens = tokenize("猫…爱，abc鱼3", &CharSegmenter, &punctuation);
        assert_eq!(tokens, ["猫", "爱", "鱼"]);
    }

    #[test]
    fn test_jieba_covers_input() {
        let text = "我们中出了一个叛徒，他在北京大学读书。";
        let segments = JiebaSegmenter::new(true).segment(text);
        assert!(segments.len() > 1);
        assert_eq!(segments.concat(), text);
    }
}
