//! 강세 사전 로드 및 조회
//!
//! 강세가 표시된 단어 목록에서 (강세 없는 단어 -> 강세 모음 위치) 표를 만듭니다.
//! 한 번 만들어진 사전은 변경되지 않습니다.

use std::collections::HashMap;
use std::fs;
use std::io::Write;

use super::config::DictionaryPolicy;
use super::oracle::{best_position, AccentOracle, OracleError};
use crate::core::unicode::{count_vowels, insert_acute_after, ACUTE};

/// 사전 단어에 허용되는 글자
const DICTIONARY_LETTERS: &str = "абвгдежзийклмнопрстуфхцчшщьыъэюя";

/// 사전 항목 검증 실패 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFault {
    /// 대문자 포함 (정책과 무관하게 항상 실패)
    NotLowercase,
    /// 강세 표시 없음
    MissingMarker,
    /// 강세 표시가 여러 개
    MultipleMarkers,
    /// 강세 표시 위치 오류 (단어 앞/뒤 끝)
    MisplacedMarker,
    /// 모음 2개 미만
    TooFewVowels,
    /// ё 또는 러시아 글자가 아닌 문자 포함
    ForbiddenCharacters,
}

impl std::fmt::Display for EntryFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            EntryFault::NotLowercase => "소문자가 아님",
            EntryFault::MissingMarker => "강세 표시 없음",
            EntryFault::MultipleMarkers => "강세 표시가 여러 개",
            EntryFault::MisplacedMarker => "강세 표시 위치 오류",
            EntryFault::TooFewVowels => "모음이 2개 미만",
            EntryFault::ForbiddenCharacters => "허용되지 않는 문자",
        };
        f.write_str(msg)
    }
}

/// 강세 사전 로드 에러
#[derive(Debug)]
pub enum DictionaryError {
    /// 파일 읽기 실패
    IoError(std::io::Error),
    /// 항목 형식 오류
    Malformed {
        line: usize,
        word: String,
        fault: EntryFault,
    },
}

impl std::fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictionaryError::IoError(e) => write!(f, "파일 읽기 오류: {}", e),
            DictionaryError::Malformed { line, word, fault } => {
                write!(f, "사전 항목 오류 ({}행, {}): {}", line, word, fault)
            }
        }
    }
}

impl std::error::Error for DictionaryError {}

impl From<std::io::Error> for DictionaryError {
    fn from(e: std::io::Error) -> Self {
        DictionaryError::IoError(e)
    }
}

/// 강세 사전
///
/// 키는 강세 없는 소문자 단어, 값은 강세 모음의 문자 인덱스 (0부터).
/// 강세 부호는 이 인덱스의 문자 바로 뒤에 삽입됩니다.
#[derive(Debug, Clone, Default)]
pub struct AccentDictionary {
    entries: HashMap<String, usize>,
}

impl AccentDictionary {
    /// 빈 사전
    pub fn empty() -> Self {
        Self::default()
    }

    /// 파일에서 사전 로드
    ///
    /// # 파일 형식 (한 줄에 한 항목)
    /// ```text
    /// стано́к                  강세 부호가 강세 모음 뒤에
    /// 123|стан+ок              '+'가 강세 모음 앞에 ('|' 구분 시 마지막 필드)
    /// станок<TAB>стано́к<TAB>7  말뭉치 집계 결과 (두 번째 열 사용)
    /// ```
    pub fn load(path: &str, policy: DictionaryPolicy) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(path)?;
        let dictionary = Self::parse(&content, policy)?;
        log::info!("강세 사전 로드: {} ({}개 항목)", path, dictionary.len());
        Ok(dictionary)
    }

    /// 문자열에서 사전 생성
    pub fn parse(content: &str, policy: DictionaryPolicy) -> Result<Self, DictionaryError> {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;

        for (number, line) in content.lines().enumerate() {
            let Some(field) = marked_field(line) else {
                continue;
            };

            match parse_entry(field) {
                // 중복 키는 나중 항목이 덮어씀
                Ok((key, index)) => {
                    entries.insert(key, index);
                }
                Err(fault)
                    if fault == EntryFault::NotLowercase || policy == DictionaryPolicy::Strict =>
                {
                    return Err(DictionaryError::Malformed {
                        line: number + 1,
                        word: field.to_string(),
                        fault,
                    });
                }
                Err(fault) => {
                    log::debug!("사전 항목 건너뜀 ({}행, {}): {}", number + 1, field, fault);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            log::info!("강세 사전: {}개 항목 건너뜀", skipped);
        }

        Ok(Self { entries })
    }

    /// 강세 모음 인덱스 조회 (소문자, 강세 없는 단어)
    pub fn index(&self, word: &str) -> Option<usize> {
        self.entries.get(word).copied()
    }

    /// 예측기가 틀리는 항목만 남긴 사전
    ///
    /// 예측기가 맞히는 단어는 사전 없이도 같은 결과가 나오므로 뺍니다.
    pub fn compress<O: AccentOracle + ?Sized>(&self, oracle: &O) -> Result<Self, OracleError> {
        let mut entries = HashMap::new();
        for (key, &index) in &self.entries {
            let scores = oracle.score(key)?;
            let predicted = best_position(&scores, key.chars().count());
            if predicted != Some(index) {
                log::debug!("예측 불일치: {} ({:?} != {})", key, predicted, index);
                entries.insert(key.clone(), index);
            }
        }
        log::info!("강세 사전 압축: {} -> {}개 항목", self.len(), entries.len());
        Ok(Self { entries })
    }

    /// 강세 부호가 붙은 단어 목록으로 저장 (단어 순)
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        for key in keys {
            if let Some(marked) = insert_acute_after(key, self.entries[key]) {
                writeln!(writer, "{}", marked)?;
            }
        }
        writer.flush()
    }

    pub fn save(&self, path: &str) -> Result<(), DictionaryError> {
        let file = fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 줄에서 강세 표시가 있는 필드 추출 (빈 줄은 None)
fn marked_field(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let field = if line.contains('\t') {
        line.split('\t').nth(1).unwrap_or(line)
    } else if line.contains('|') {
        line.rsplit('|').next().unwrap_or(line)
    } else {
        line
    };
    Some(field.trim())
}

/// 항목 하나 해석: (강세 없는 단어, 강세 모음 인덱스)
fn parse_entry(field: &str) -> Result<(String, usize), EntryFault> {
    let word: String = field.chars().filter(|&c| c != '\'').collect();
    if word.to_lowercase() != word {
        return Err(EntryFault::NotLowercase);
    }

    let chars: Vec<char> = word.chars().collect();
    let markers: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == '+' || **c == ACUTE)
        .map(|(i, _)| i)
        .collect();

    let position = match markers.as_slice() {
        [] => return Err(EntryFault::MissingMarker),
        [position] => *position,
        _ => return Err(EntryFault::MultipleMarkers),
    };

    let key: String = chars
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != position)
        .map(|(_, c)| *c)
        .collect();
    let key_len = chars.len() - 1;

    let index = if chars[position] == '+' {
        // '+'는 강세 모음 앞
        if position >= key_len {
            return Err(EntryFault::MisplacedMarker);
        }
        position
    } else {
        // 강세 부호는 강세 모음 뒤
        if position == 0 {
            return Err(EntryFault::MisplacedMarker);
        }
        position - 1
    };

    if !key.chars().all(|c| DICTIONARY_LETTERS.contains(c)) {
        return Err(EntryFault::ForbiddenCharacters);
    }
    if count_vowels(&key) < 2 {
        return Err(EntryFault::TooFewVowels);
    }

    Ok((key, index))
}
