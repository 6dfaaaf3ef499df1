//! 유니코드 정규화 및 강세 부호 유틸리티

use unicode_normalization::UnicodeNormalization;

/// 강세 (ACUTE, U+0301) - 출력에 쓰이는 유일한 강세 부호
pub const ACUTE: char = '\u{0301}';
/// 역강세 (GRAVE, U+0300)
pub const GRAVE: char = '\u{0300}';
/// 곡절 강세 (CAP / 카믈라, U+0311)
pub const CAP: char = '\u{0311}';
/// 기식 부호 (PNEUMATA, U+0486)
pub const PNEUMATA: char = '\u{0486}';
/// 분음 부호 (DIAERESIS, U+0308)
pub const DIAERESIS: char = '\u{0308}';
/// 에로크 (결합형 경음 부호, U+033E)
pub const EROK: char = '\u{033E}';
/// 티틀로 (숫자/약어 표시, U+0483)
pub const TITLO: char = '\u{0483}';
/// 천 단위 부호 (U+0482)
pub const THOUSAND: char = '\u{0482}';
/// 좁은 o (ᲂу 이중 글자의 앞부분, U+1C82)
pub const NARROW_O: char = '\u{1C82}';
/// 이중 역강세 이지차 (ѷ, U+0477)
pub const IZHITSA_DOUBLE_GRAVE: char = '\u{0477}';
/// 이지차 (ѵ, U+0475)
pub const IZHITSA: char = '\u{0475}';

/// 러시아어 모음 (소문자)
pub const VOWELS: &str = "аеиоуыэюя";

/// 완전 분해형 (NFD)으로 변환
pub fn decompose(text: &str) -> String {
    text.nfd().collect()
}

/// 완전 조합형 (NFC)으로 변환
pub fn compose(text: &str) -> String {
    text.nfc().collect()
}

/// 소문자 모음 개수
pub fn count_vowels(text: &str) -> usize {
    text.chars().filter(|c| VOWELS.contains(*c)).count()
}

/// 대소문자 무시 모음 개수
pub fn count_vowels_ignore_case(text: &str) -> usize {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| VOWELS.contains(*c))
        .count()
}

/// 강세 부호 개수
pub fn count_acute(text: &str) -> usize {
    text.chars().filter(|&c| c == ACUTE).count()
}

/// 강세 부호 제거
pub fn strip_acute(text: &str) -> String {
    text.chars().filter(|&c| c != ACUTE).collect()
}

/// `position`번째 문자 바로 뒤에 강세 삽입
///
/// 위치가 단어 길이를 넘으면 None
pub fn insert_acute_after(word: &str, position: usize) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    if position >= chars.len() {
        return None;
    }
    let mut out = String::with_capacity(word.len() + ACUTE.len_utf8());
    out.extend(&chars[..=position]);
    out.push(ACUTE);
    out.extend(&chars[position + 1..]);
    Some(out)
}

/// 디버그 출력용 코드포인트 이스케이프 (\u{XXXX})
pub fn escape_code_points(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("\\u{{{:04x}}}", *c as u32))
        .collect::<Vec<_>>()
        .join(" ")
}
