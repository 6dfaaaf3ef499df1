//! 단어 단위 예외 표
//!
//! 규칙으로 처리할 수 없는 단어는 원문 철자(소문자) 그대로 찾아
//! 손으로 정리한 결과를 사용합니다. 값이 None이면 표현 불가 단어로 거부합니다.

use std::collections::HashMap;

use lazy_static::lazy_static;

#[rustfmt::skip]
const OVERRIDES: &[(&str, Option<&str>)] = &[
    ("аллилꙋїа", Some("аллилу\u{0301}иа")),
    ("архїерей", Some("архиере\u{0301}й")),
    ("архїереовꙋ", Some("архиере\u{0301}ову")),
    ("аще", Some("а\u{0301}ще")),
    ("без\u{033e}именитое", Some("безъимени\u{0301}тое")),
    // 표현 불가
    ("\u{2020}", None),
    ("патер", None),
    ("подо", None),
    ("предо", None),
    ("іі", None),
    ("преполов", None),
];

lazy_static! {
    static ref EXCEPTIONS: HashMap<&'static str, Option<&'static str>> =
        OVERRIDES.iter().copied().collect();
}

/// 예외 표 조회
///
/// - `None`: 예외 아님 (일반 규칙 적용)
/// - `Some(Some(civic))`: 지정된 결과 사용
/// - `Some(None)`: 표현 불가 단어
pub fn lookup(word: &str) -> Option<Option<&'static str>> {
    EXCEPTIONS.get(word).copied()
}
