//! 변환 결과 검증 모듈
//!
//! 현대 정자법 문자 집합 밖의 문자 검출 및 강세 개수 검사

use crate::core::charmap::is_civic_char;
use crate::core::unicode::{count_acute, count_vowels};

/// 현대 정자법에 허용되지 않는 문자 목록 (중복 제거, 코드포인트 순)
pub fn offending_chars(text: &str) -> Vec<char> {
    let mut out: Vec<char> = text.chars().filter(|&c| !is_civic_char(c)).collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// 모든 문자가 현대 정자법 문자인지
pub fn is_valid_civic(text: &str) -> bool {
    text.chars().all(is_civic_char)
}

/// 강세 개수가 비정상인지 검사
///
/// 모음이 2개 이상인데 강세가 정확히 1개가 아니면 Some(강세 개수)
pub fn accent_anomaly(word: &str) -> Option<usize> {
    let accents = count_acute(word);
    if accents != 1 && count_vowels(word) > 1 {
        Some(accents)
    } else {
        None
    }
}
