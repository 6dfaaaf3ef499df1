//! 강세/기식 부호 정리
//!
//! 한 단어에 여러 부호가 경쟁할 때 우선순위 표에 따라 하나의 강세(ACUTE)만 남깁니다.
//! 우선순위는 제어 흐름이 아니라 [`RULES`] 데이터로 정의됩니다.

use super::unicode::{ACUTE, CAP, DIAERESIS, GRAVE, PNEUMATA};

/// 인식하는 결합 부호
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diacritic {
    Acute,
    Grave,
    Cap,
    Breathing,
    Diaeresis,
}

impl Diacritic {
    pub fn code_point(self) -> char {
        match self {
            Diacritic::Acute => ACUTE,
            Diacritic::Grave => GRAVE,
            Diacritic::Cap => CAP,
            Diacritic::Breathing => PNEUMATA,
            Diacritic::Diaeresis => DIAERESIS,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ACUTE => Some(Diacritic::Acute),
            GRAVE => Some(Diacritic::Grave),
            CAP => Some(Diacritic::Cap),
            PNEUMATA => Some(Diacritic::Breathing),
            DIAERESIS => Some(Diacritic::Diaeresis),
            _ => None,
        }
    }

    /// 우선순위 (0이 가장 높음)
    pub fn rank(self) -> usize {
        RULES
            .iter()
            .position(|rule| rule.mark == self)
            .unwrap_or(RULES.len())
    }
}

/// 선택된 부호에 적용할 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkAction {
    /// 이미 강세이므로 그대로 둠
    Keep,
    /// 강세로 바꿔 씀
    RewriteAsAcute,
}

/// 우선순위 규칙 한 줄
#[derive(Debug, Clone, Copy)]
pub struct MarkRule {
    pub mark: Diacritic,
    pub action: MarkAction,
}

/// 우선순위 순서대로 정렬된 규칙표
///
/// 단어에 존재하는 첫 번째 규칙의 부호가 선택되고,
/// 선택되지 않은 나머지 인식 부호는 모두 삭제됩니다.
pub const RULES: [MarkRule; 5] = [
    MarkRule { mark: Diacritic::Acute, action: MarkAction::Keep },
    MarkRule { mark: Diacritic::Grave, action: MarkAction::RewriteAsAcute },
    MarkRule { mark: Diacritic::Cap, action: MarkAction::RewriteAsAcute },
    MarkRule { mark: Diacritic::Breathing, action: MarkAction::RewriteAsAcute },
    MarkRule { mark: Diacritic::Diaeresis, action: MarkAction::RewriteAsAcute },
];

/// 단어에서 선택될 규칙 (인식 부호가 없으면 None)
pub fn winning_rule(word: &str) -> Option<&'static MarkRule> {
    RULES
        .iter()
        .find(|rule| word.contains(rule.mark.code_point()))
}

/// 부호 정리: 최대 하나의 강세만 남김
///
/// 선택된 부호는 첫 번째 위치에만 강세로 남고,
/// 같은 부호의 이후 등장과 다른 인식 부호는 모두 제거됩니다.
pub fn resolve(word: &str) -> String {
    let winner = winning_rule(word).map(|rule| rule.mark);
    let mut placed = false;

    word.chars()
        .filter_map(|c| match Diacritic::from_char(c) {
            None => Some(c),
            Some(mark) if Some(mark) == winner && !placed => {
                placed = true;
                Some(ACUTE)
            }
            Some(_) => None,
        })
        .collect()
}
