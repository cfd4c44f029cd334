extern crate quickcheck;

use quickcheck::{QuickCheck, TestResult, Testable};
use zh_corpus_stats::{entropy_of, RankFrequency};

fn qc<T: Testable>(f: T) {
    QuickCheck::new().tests(500).max_tests(5000).quickcheck(f);
}

// 小さい語彙に写して同じトークンが繰り返し現れるようにする
fn to_tokens(bytes: &[u8]) -> Vec<char> {
    bytes.iter().map(|b| ['猫', '爱', '鱼', '狗'][(*b % 4) as usize]).collect()
}

#[test]
fn entropy_is_non_negative() {
    fn prop(bytes: Vec<u8>) -> bool {
        let h = entropy_of(&to_tokens(&bytes));
        h.unigram >= 0.0 && h.bigram >= 0.0 && h.trigram >= 0.0
    }
    qc(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn short_sequences_have_zero_higher_order_entropy() {
    fn prop(bytes: Vec<u8>) -> TestResult {
        if bytes.len() >= 3 {
            return TestResult::discard();
        }
        let h = entropy_of(&to_tokens(&bytes));
        let bigram_ok = bytes.len() >= 2 || h.bigram == 0.0;
        TestResult::from_bool(bigram_ok && h.trigram == 0.0)
    }
    qc(prop as fn(Vec<u8>) -> TestResult);
}

#[test]
fn unigram_zero_iff_single_type() {
    fn prop(bytes: Vec<u8>) -> TestResult {
        let tokens = to_tokens(&bytes);
        if tokens.is_empty() {
            return TestResult::discard();
        }
        let single = tokens.iter().all(|t| *t == tokens[0]);
        let h = entropy_of(&tokens);
        TestResult::from_bool((h.unigram == 0.0) == single)
    }
    qc(prop as fn(Vec<u8>) -> TestResult);
}

#[test]
fn unigram_bounded_by_log_vocabulary() {
    fn prop(bytes: Vec<u8>) -> TestResult {
        let tokens = to_tokens(&bytes);
        if tokens.is_empty() {
            return TestResult::discard();
        }
        let h = entropy_of(&tokens);
        TestResult::from_bool(h.unigram <= 2.0 + 1e-9)
    }
    qc(prop as fn(Vec<u8>) -> TestResult);
}

#[test]
fn frequencies_are_non_increasing() {
    fn prop(bytes: Vec<u8>) -> bool {
        let tokens: Vec<String> = to_tokens(&bytes).iter().map(|c| c.to_string()).collect();
        let rf = RankFrequency::from_tokens(&tokens);
        let sorted = rf.frequencies.windows(2).all(|w| w[0] >= w[1]);
        let ranks = rf.ranks.iter().enumerate().all(|(i, &r)| r == i + 1);
        sorted && ranks && rf.frequencies.iter().sum::<usize>() == tokens.len()
    }
    qc(prop as fn(Vec<u8>) -> bool);
}
