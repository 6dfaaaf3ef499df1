//! 교회 슬라브 문자 -> 현대 러시아 문자 매핑
//!
//! 고어/이체 글자를 현대 정자법 글자로 치환하는 고정 테이블입니다.
//! 프로세스 시작 시 한 번 만들어지고 이후 읽기 전용으로만 쓰입니다.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use super::unicode::{ACUTE, EROK, IZHITSA, PNEUMATA};

/// 고어 글자 -> 현대 글자 (한 글자가 두 글자로 풀리는 경우 포함)
#[rustfmt::skip]
const LETTER_TABLE: &[(char, &str)] = &[
    ('ѧ', "я"), ('Ѧ', "Я"),
    ('ꙗ', "я"), ('Ꙗ', "Я"),
    ('ѣ', "е"), ('Ѣ', "Е"),
    ('є', "е"), ('Є', "Е"),
    ('ꙋ', "у"), ('Ꙋ', "У"),
    ('ѿ', "от"), ('Ѿ', "От"),
    ('ѽ', "о"), ('Ѽ', "О"),
    ('ѻ', "о"), ('Ѻ', "О"),
    ('ѡ', "о"), ('Ѡ', "О"),
    ('і', "и"), ('І', "И"),
    ('ї', "и"),
    ('ѱ', "пс"), ('Ѱ', "Пс"),
    ('ѕ', "з"), ('Ѕ', "З"),
    ('ѳ', "ф"), ('Ѳ', "Ф"),
    ('ѯ', "кс"),
    ('Ѵ', "В"),
    (EROK, "ъ"),
];

/// 교회 슬라브어 원문에 나타나는 코드포인트 목록
const CU_INVENTORY: &str = "-\u{0300}\u{0301}\u{0308}\u{0311}\u{033e}\u{0400}\u{0404}\u{0405}\u{0406}\u{040d}\
\u{0410}\u{0411}\u{0412}\u{0413}\u{0414}\u{0415}\u{0416}\u{0417}\u{0418}\u{0419}\u{041a}\u{041b}\u{041c}\u{041d}\u{041e}\u{041f}\
\u{0420}\u{0421}\u{0422}\u{0423}\u{0424}\u{0425}\u{0426}\u{0427}\u{0428}\u{0429}\u{042a}\u{042b}\u{042c}\u{042d}\u{042e}\u{042f}\
\u{0430}\u{0431}\u{0432}\u{0433}\u{0434}\u{0435}\u{0436}\u{0437}\u{0438}\u{0439}\u{043a}\u{043b}\u{043c}\u{043d}\u{043e}\u{043f}\
\u{0440}\u{0441}\u{0442}\u{0443}\u{0444}\u{0445}\u{0446}\u{0447}\u{0448}\u{0449}\u{044a}\u{044b}\u{044c}\u{044d}\u{044e}\u{044f}\
\u{0450}\u{0454}\u{0455}\u{0456}\u{0457}\u{045d}\u{0460}\u{0461}\u{0462}\u{0463}\u{0466}\u{0467}\u{046a}\u{046b}\u{046e}\u{046f}\
\u{0470}\u{0471}\u{0472}\u{0473}\u{0474}\u{0475}\u{0476}\u{0477}\u{047a}\u{047b}\u{047c}\u{047d}\u{047e}\u{047f}\
\u{0482}\u{0483}\u{0486}\u{0487}\u{1c81}\u{1c82}\u{2020}\
\u{2de0}\u{2de1}\u{2de2}\u{2de3}\u{2de4}\u{2de6}\u{2de7}\u{2de8}\u{2de9}\u{2dea}\u{2dec}\u{2ded}\u{2def}\u{2df1}\u{2df4}\
\u{a64a}\u{a64b}\u{a656}\u{a657}\u{a673}\u{a67e}";

/// 현대 러시아 정자법 글자 (ё 제외)
const CIVIC_LETTERS: &str =
    "абвгдежзийклмнопрстуфхцчшщьыъэюяАБВГДЕЖЗИЙКЛМНОПРСТУФХЦЧШЩЬЫЪЭЮЯ";

lazy_static! {
    static ref LETTERS: HashMap<char, &'static str> = LETTER_TABLE.iter().copied().collect();
    static ref INVENTORY: HashSet<char> = CU_INVENTORY.chars().collect();
    static ref ALLOWED: HashSet<char> = CIVIC_LETTERS
        .chars()
        .chain(['-', ACUTE])
        .collect();
}

/// 글자 하나를 현대 글자로 변환
/// 매핑에 없는 문자는 None 반환 (호출 측에서 그대로 유지)
pub fn map_letter(c: char) -> Option<&'static str> {
    LETTERS.get(&c).copied()
}

/// 두 글자에 걸친 매핑 (앞 글자, 뒤 글자) -> 현대 글자
///
/// 기식 부호가 붙은 ѵ는 자음 в가 아니라 모음 и로 읽는다.
pub fn map_digraph(first: char, second: char) -> Option<&'static str> {
    match (first, second) {
        (IZHITSA, PNEUMATA) => Some("и\u{0486}"),
        _ => None,
    }
}

/// NFD 단어 전체에 글자/이중 글자 매핑 적용
pub fn map_word(decomposed: &str) -> String {
    let chars: Vec<char> = decomposed.chars().collect();
    let mut out = String::with_capacity(decomposed.len());
    let mut i = 0;

    while i < chars.len() {
        if let Some(next) = chars.get(i + 1) {
            if let Some(mapped) = map_digraph(chars[i], *next) {
                out.push_str(mapped);
                i += 2;
                continue;
            }
        }
        match map_letter(chars[i]) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(chars[i]),
        }
        i += 1;
    }

    out
}

/// 현대 정자법에서 허용되는 문자인지 (글자, 하이픈, 강세)
pub fn is_civic_char(c: char) -> bool {
    ALLOWED.contains(&c)
}

/// 교회 슬라브어 원문 문자 집합에 속하는지
pub fn is_cu_char(c: char) -> bool {
    INVENTORY.contains(&c)
}

/// 단어의 모든 문자가 교회 슬라브어 문자 집합에 속하는지
pub fn is_cu_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_cu_char)
}
