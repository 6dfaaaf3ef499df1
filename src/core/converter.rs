//! 교회 슬라브어 -> 현대 러시아어 통합 변환기

use crate::core::charmap::map_word;
use crate::core::diacritics;
use crate::core::exceptions;
use crate::core::unicode::{
    compose, count_vowels, decompose, escape_code_points, strip_acute, ACUTE, IZHITSA,
    IZHITSA_DOUBLE_GRAVE, NARROW_O, PNEUMATA,
};
use crate::detection::numerals::is_numeral;
use crate::detection::validator::offending_chars;

/// 현대 정자법 단어 (강세 0개 또는 1개)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CivicWord(String);

impl CivicWord {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// 강세가 붙어 있는지
    pub fn is_accented(&self) -> bool {
        self.0.contains(ACUTE)
    }

    /// 강세를 제거한 형태
    pub fn plain(&self) -> String {
        strip_acute(&self.0)
    }
}

impl std::fmt::Display for CivicWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for CivicWord {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// 변환 거부 사유
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// 교회 슬라브 숫자
    Numeral,
    /// 예외 표에서 표현 불가로 지정된 단어
    Unrepresentable,
    /// 변환 결과가 비어 있음
    Empty,
    /// 현대 정자법 밖의 문자가 남음
    ForeignCharacters { civic: String, offending: Vec<char> },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Numeral => write!(f, "숫자 표기"),
            Rejection::Unrepresentable => write!(f, "표현 불가 단어"),
            Rejection::Empty => write!(f, "빈 결과"),
            Rejection::ForeignCharacters { civic, offending } => write!(
                f,
                "허용되지 않는 문자: {} ({})",
                civic,
                escape_code_points(offending)
            ),
        }
    }
}

/// 교회 슬라브 단어를 현대 정자법 단어로 변환
/// 거부된 단어는 경고 로그를 남기고 None 반환
pub fn transliterate(cu_word: &str) -> Option<CivicWord> {
    match explain(cu_word) {
        Ok(civic) => Some(civic),
        Err(rejection) => {
            match &rejection {
                Rejection::ForeignCharacters { .. } => {
                    log::warn!("변환 거부: {} -> {}", cu_word, rejection)
                }
                _ => log::debug!("변환 제외: {} ({})", cu_word, rejection),
            }
            None
        }
    }
}

/// 변환 결과 또는 거부 사유 반환
pub fn explain(cu_word: &str) -> Result<CivicWord, Rejection> {
    // 예외 표가 모든 규칙보다 우선
    if let Some(entry) = exceptions::lookup(cu_word) {
        return entry
            .map(|civic| CivicWord(civic.to_string()))
            .ok_or(Rejection::Unrepresentable);
    }

    if is_numeral(cu_word) {
        return Err(Rejection::Numeral);
    }

    let word = synthesize_breathing(&decompose(cu_word));
    let mapped = map_word(&word);
    let resolved = diacritics::resolve(&mapped);
    let civic = post_process(&resolved);

    if civic.is_empty() {
        return Err(Rejection::Empty);
    }

    let offending = offending_chars(&civic);
    if !offending.is_empty() {
        return Err(Rejection::ForeignCharacters { civic, offending });
    }

    // 단음절 단어에는 강세 불필요
    if count_vowels(&civic) < 2 {
        return Ok(CivicWord(strip_acute(&civic)));
    }

    Ok(CivicWord(civic))
}

/// 기식 부호 없이 ѿ로 시작하는 단어는 о҆т로 풀어 씀
fn synthesize_breathing(decomposed: &str) -> String {
    match decomposed.strip_prefix('ѿ') {
        Some(rest) if !decomposed.contains(PNEUMATA) => format!("о{}т{}", PNEUMATA, rest),
        _ => decomposed.to_string(),
    }
}

/// 부호 정리 이후의 치환
///
/// 순서가 결과에 영향을 준다: ѷ 처리는 다른 곳에 강세가 이미 있는지에 따라 달라진다.
fn post_process(resolved: &str) -> String {
    let without_narrow_o: String = resolved.chars().filter(|&c| c != NARROW_O).collect();
    let composed = compose(&without_narrow_o);

    let izhitsa_acute = format!("{}{}", IZHITSA, ACUTE);
    let mut civic = composed.replace(&izhitsa_acute, &format!("и{}", ACUTE));

    let yer_replacement = if civic.contains(ACUTE) {
        "и".to_string()
    } else {
        format!("и{}", ACUTE)
    };
    civic = civic.replace(IZHITSA_DOUBLE_GRAVE, &yer_replacement);
    civic = civic.replace(IZHITSA, "в");

    if civic.ends_with('ъ') {
        civic.pop();
    }
    civic
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civic(word: &str) -> Option<String> {
        transliterate(word).map(CivicWord::into_string)
    }

    #[test]
    fn test_basic_conversion() {
        assert_eq!(civic("тѵ́хѡнъ").as_deref(), Some("ти\u{301}хон"));
        assert_eq!(civic("а҆леѯ").as_deref(), Some("а\u{301}лекс"));
    }

    #[test]
    fn test_already_civic() {
        assert_eq!(civic("еси\u{301}").as_deref(), Some("еси\u{301}"));
        assert_eq!(civic("слово").as_deref(), Some("слово"));
        // й는 분해 후 다시 조합됨
        assert_eq!(civic("свой").as_deref(), Some("свой"));
    }

    #[test]
    fn test_ot_breathing_synthesis() {
        assert_eq!(civic("ѿрасль").as_deref(), Some("о\u{301}трасль"));
        // 이미 강세가 있으면 합성된 기식 부호는 버려짐
        assert_eq!(civic("ѿве\u{301}тъ").as_deref(), Some("отве\u{301}т"));
    }

    #[test]
    fn test_grave_becomes_acute() {
        assert_eq!(civic("и҆лѝ").as_deref(), Some("или\u{301}"));
    }

    #[test]
    fn test_izhitsa_with_breathing() {
        // ѵ҆ -> и + 기식 -> 강세
        assert_eq!(civic("ѵ҆поста\u{301}сь").as_deref(), Some("ипоста\u{301}сь"));
    }

    #[test]
    fn test_izhitsa_consonant() {
        assert_eq!(civic("є҆ѵа\u{301}нгелїе").as_deref(), Some("ева\u{301}нгелие"));
    }

    #[test]
    fn test_izhitsa_double_grave() {
        // 다른 곳에 강세가 없으면 ѷ가 강세를 가져감
        assert_eq!(civic("мѷро").as_deref(), Some("ми\u{301}ро"));
        // 이미 강세가 있으면 평범한 и
        assert_eq!(civic("мѷропома\u{301}занїе").as_deref(), Some("миропома\u{301}зание"));
    }

    #[test]
    fn test_narrow_o_digraph() {
        assert_eq!(civic("ᲂу҆мъ").as_deref(), Some("ум"));
    }

    #[test]
    fn test_trailing_hard_sign_dropped() {
        assert_eq!(civic("сло\u{301}вомъ").as_deref(), Some("сло\u{301}вом"));
        // 단어 중간의 ъ는 유지
        assert_eq!(civic("без\u{33e}и\u{301}мянный").as_deref(), Some("безъи\u{301}мянный"));
    }

    #[test]
    fn test_single_vowel_has_no_accent() {
        assert_eq!(civic("бг҃ъ"), None);
        assert_eq!(civic("ми\u{301}ръ").as_deref(), Some("мир"));
        assert_eq!(civic("и҆"), Some("и".to_string()));
    }

    #[test]
    fn test_numeral_rejected() {
        assert_eq!(explain("рк҃г"), Err(Rejection::Numeral));
        assert_eq!(explain("а҃"), Err(Rejection::Numeral));
    }

    #[test]
    fn test_exceptions() {
        assert_eq!(explain("аще").unwrap(), "а\u{301}ще");
        assert_eq!(explain("†"), Err(Rejection::Unrepresentable));
        assert_eq!(explain("патер"), Err(Rejection::Unrepresentable));
    }

    #[test]
    fn test_foreign_characters() {
        match explain("бг\u{483}ъ") {
            Err(Rejection::ForeignCharacters { offending, .. }) => {
                assert_eq!(offending, vec!['\u{483}']);
            }
            other => panic!("거부되어야 함: {:?}", other),
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(explain(""), Err(Rejection::Empty));
        assert_eq!(explain("ъ"), Err(Rejection::Empty));
    }

    #[test]
    fn test_single_accent() {
        let words = ["бо̀гомъ̀", "а҆̀ще", "тѵ́хѡнъ", "ѿрасль", "и҆лѝ", "ра̑бы"];
        for word in words {
            if let Some(result) = transliterate(word) {
                assert!(
                    result.as_str().matches(ACUTE).count() <= 1,
                    "{} -> {}",
                    word,
                    result
                );
            }
        }
    }
}
