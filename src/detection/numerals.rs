//! 교회 슬라브 숫자 감지 및 변환
//!
//! 티틀로가 붙은 글자열은 단어가 아니라 숫자이므로 음역 대상에서 제외합니다.
//! 숫자 값의 해석/생성도 함께 제공합니다 (UTN #41 규칙).

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::core::unicode::{THOUSAND, TITLO};

/// 800 (ѿ) - 티틀로 위치 계산에서 특별 취급
const CU_800: char = 'ѿ';
/// 숫자 그룹 구분자 (NBSP)
const GROUP_SEPARATOR: &str = "\u{00A0}";

/// 숫자 글자와 값
#[rustfmt::skip]
const DIGITS: &[(char, i64)] = &[
    ('а', 1), ('в', 2), ('г', 3), ('д', 4), ('є', 5),
    ('ѕ', 6), ('з', 7), ('и', 8), ('ѳ', 9),
    ('і', 10), ('к', 20), ('л', 30), ('м', 40), ('н', 50),
    ('ѯ', 60), ('ѻ', 70), ('п', 80), ('ч', 90),
    ('р', 100), ('с', 200), ('т', 300), ('у', 400), ('ф', 500),
    ('х', 600), ('ѱ', 700), ('ѿ', 800), ('ц', 900),
];

lazy_static! {
    /// 숫자 판정에 쓰는 글자 (숫자 글자 + 이체 о + 티틀로 + 천 단위 부호)
    static ref GUARD_LETTERS: HashSet<char> = DIGITS
        .iter()
        .map(|(c, _)| *c)
        .chain(['о', TITLO, THOUSAND])
        .collect();
}

/// 숫자 변환 에러
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumeralError {
    /// 빈 입력
    Empty,
    /// 숫자 글자가 아닌 문자
    InvalidDigit(char),
    /// 같은 글자 중복 (한 그룹 안)
    RepeatedDigit(String),
    /// 그룹 배율 중복/순서 오류
    InvalidGroups(String),
    /// 값 범위 초과
    Overflow,
}

impl std::fmt::Display for NumeralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumeralError::Empty => write!(f, "빈 숫자 문자열"),
            NumeralError::InvalidDigit(c) => write!(f, "숫자 글자가 아님: {:?}", c),
            NumeralError::RepeatedDigit(g) => write!(f, "중복된 숫자 글자: {}", g),
            NumeralError::InvalidGroups(s) => write!(f, "잘못된 그룹 구성: {}", s),
            NumeralError::Overflow => write!(f, "값 범위 초과"),
        }
    }
}

impl std::error::Error for NumeralError {}

/// 큰 수 표기 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// 표준: 그룹마다 천 단위 부호를 앞에 붙임
    #[default]
    Standard,
    /// 옛 방식: 천의 자리 그룹의 각 글자 앞에 천 단위 부호
    Old,
}

/// 숫자 출력 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumeralStyle {
    pub titlo: bool,
    pub dialect: Dialect,
}

impl Default for NumeralStyle {
    fn default() -> Self {
        Self {
            titlo: true,
            dialect: Dialect::Standard,
        }
    }
}

/// 단어가 교회 슬라브 숫자인지 판정
///
/// 티틀로가 있고, 첫 번째 하이픈 앞부분이 비어 있지 않으며
/// 모두 숫자 글자로만 이루어져 있으면 숫자로 본다.
pub fn is_numeral(word: &str) -> bool {
    if !word.contains(TITLO) {
        return false;
    }
    let prefix = word.split('-').next().unwrap_or("");
    !prefix.is_empty() && prefix.chars().all(|c| GUARD_LETTERS.contains(&c))
}

fn digit_value(c: char) -> Option<i64> {
    DIGITS.iter().find(|(d, _)| *d == c).map(|(_, v)| *v)
}

fn digit_char(value: i64) -> Option<char> {
    DIGITS.iter().find(|(_, v)| *v == value).map(|(c, _)| *c)
}

/// 정수를 교회 슬라브 숫자로 변환
pub fn format_numeral(value: i64, style: NumeralStyle) -> String {
    if value < 0 {
        return format!("-{}", format_numeral(value.saturating_neg(), style));
    }
    if value == 0 {
        return if style.titlo {
            format!("0{}", TITLO)
        } else {
            "0".to_string()
        };
    }

    let mut groups = thousand_groups(value);
    let n = groups.len();
    if n > 1 {
        if groups[n - 2].len() == 1 {
            // 앞 그룹이 한 글자면 마지막 그룹과 합침
            let last = std::mem::take(&mut groups[n - 1]);
            groups[n - 2].extend(last);
        } else if groups[n - 2].len() > 1
            && (groups[n - 1].is_empty() || style.dialect == Dialect::Old)
        {
            groups[n - 2] = thousand_before_each_digit(&groups[n - 2]);
            if style.dialect == Dialect::Old {
                let last = std::mem::take(&mut groups[n - 1]);
                groups[n - 2].extend(last);
            }
        }
    }

    if style.titlo {
        groups = groups.iter().map(|g| place_titlo(g)).collect();
    }

    groups
        .iter()
        .enumerate()
        .filter(|(_, g)| !g.is_empty())
        .map(|(i, g)| {
            let mut out: Vec<char> = vec![THOUSAND; n - 1 - i];
            out.extend(g);
            out.into_iter().collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(GROUP_SEPARATOR)
}

/// 0..=999 범위 숫자 (11~19는 일의 자리가 앞)
fn small_number(value: i64) -> Vec<char> {
    let hundreds = value / 100 * 100;
    let tens = (value - hundreds) / 10 * 10;
    let units = value - hundreds - tens;

    let mut out = Vec::new();
    out.extend(digit_char(hundreds));
    if tens == 10 {
        out.extend(digit_char(units));
        out.extend(digit_char(tens));
    } else {
        out.extend(digit_char(tens));
        out.extend(digit_char(units));
    }
    out
}

/// 천 단위 그룹 (큰 자리부터)
fn thousand_groups(mut value: i64) -> Vec<Vec<char>> {
    let mut groups = Vec::new();
    while value > 0 {
        groups.push(small_number(value % 1000));
        value /= 1000;
    }
    groups.reverse();
    groups
}

fn thousand_before_each_digit(group: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(group.len() * 2);
    for (i, c) in group.iter().enumerate() {
        if i > 0 {
            out.push(THOUSAND);
        }
        out.push(*c);
    }
    out
}

/// 티틀로 위치: 마지막에서 두 번째 숫자 글자 위 (천 단위 부호, ѿ 뒤는 제외)
fn place_titlo(group: &[char]) -> Vec<char> {
    let n = group.len();
    if n == 0 {
        return Vec::new();
    }

    let mut split_at = None;
    if n > 1 {
        if group[n - 2] != THOUSAND {
            if group[n - 2] != CU_800 {
                split_at = Some(n - 1);
            }
        } else if n > 2 && group[n - 3] != THOUSAND && group[n - 3] != CU_800 {
            split_at = Some(n - 2);
        }
    }

    let at = split_at.unwrap_or(n);
    let mut out = Vec::with_capacity(n + 1);
    out.extend(&group[..at]);
    out.push(TITLO);
    out.extend(&group[at..]);
    out
}

/// 교회 슬라브 숫자 해석 (표준/옛 방식 모두)
pub fn parse_numeral(text: &str) -> Result<i64, NumeralError> {
    if let Some(rest) = text.strip_prefix('-') {
        return parse_numeral(rest).map(|v| -v);
    }

    let cleaned: String = text.chars().filter(|&c| c != TITLO).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(NumeralError::Empty);
    }
    if cleaned == "0" {
        return Ok(0);
    }

    // (배율 지수, 그룹) - 배율은 앞에 붙은 천 단위 부호 개수
    let mut groups: Vec<(u32, Vec<char>)> = cleaned
        .split_whitespace()
        .map(|g| {
            let chars: Vec<char> = g.chars().collect();
            let exp = chars.iter().take_while(|&&c| c == THOUSAND).count() as u32;
            (exp, chars)
        })
        .collect();

    // 배율은 서로 다르고 내림차순이어야 함
    if groups.windows(2).any(|w| w[0].0 <= w[1].0) {
        return Err(NumeralError::InvalidGroups(text.to_string()));
    }

    // 천의 자리 그룹은 그룹 구분 없이 일의 자리까지 이어 쓸 수 있음
    let has_units = groups.iter().any(|(exp, _)| *exp == 0);
    if let Some(pos) = groups.iter().position(|(exp, _)| *exp == 1) {
        let (high, low) = split_thousand(&groups[pos].1);
        if has_units {
            if high.len() != 1 {
                return Err(NumeralError::InvalidGroups(text.to_string()));
            }
        } else if !low.is_empty() {
            groups[pos].1 = high;
            groups.push((0, low));
        }
    }

    let mut value: i64 = 0;
    for (exp, group) in groups {
        let digits: Vec<char> = group.into_iter().filter(|&c| c != THOUSAND).collect();
        let multiplier = 1000i64.checked_pow(exp).ok_or(NumeralError::Overflow)?;
        let part = small_value(&digits)?
            .checked_mul(multiplier)
            .ok_or(NumeralError::Overflow)?;
        value = value.checked_add(part).ok_or(NumeralError::Overflow)?;
    }
    Ok(value)
}

/// 천 단위 부호가 붙은 글자 수만큼을 앞 그룹으로 분리
fn split_thousand(group: &[char]) -> (Vec<char>, Vec<char>) {
    let marked = group.iter().filter(|&&c| c == THOUSAND).count();
    let digits: Vec<char> = group.iter().copied().filter(|&c| c != THOUSAND).collect();
    let at = marked.min(digits.len());
    (digits[..at].to_vec(), digits[at..].to_vec())
}

fn small_value(digits: &[char]) -> Result<i64, NumeralError> {
    if digits.is_empty() {
        return Err(NumeralError::Empty);
    }
    let unique: HashSet<char> = digits.iter().copied().collect();
    if unique.len() != digits.len() {
        return Err(NumeralError::RepeatedDigit(digits.iter().collect()));
    }
    digits.iter().try_fold(0i64, |acc, &c| {
        digit_value(c)
            .map(|v| acc + v)
            .ok_or(NumeralError::InvalidDigit(c))
    })
}
