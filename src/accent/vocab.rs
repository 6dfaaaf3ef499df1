//! 예측기 입력용 문자 사전
//!
//! 현대 정자법 문자 하나를 정수 인덱스로 대응시킵니다. 0은 패딩 전용.

use std::collections::{BTreeSet, HashMap};
use std::fs;

use crate::core::unicode::ACUTE;

/// 패딩 토큰
pub const PAD_TOKEN: &str = "<pad>";

/// 문자 사전 로드/인코딩 에러
#[derive(Debug)]
pub enum VocabError {
    /// 파일 읽기/쓰기 실패
    IoError(std::io::Error),
    /// JSON 파싱 실패
    ParseError(String),
    /// 사전 형식 오류
    FormatError(String),
    /// 사전에 없는 문자
    UnknownChar(char),
}

impl std::fmt::Display for VocabError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VocabError::IoError(e) => write!(f, "파일 읽기 오류: {}", e),
            VocabError::ParseError(s) => write!(f, "JSON 파싱 오류: {}", s),
            VocabError::FormatError(s) => write!(f, "문자 사전 형식 오류: {}", s),
            VocabError::UnknownChar(c) => {
                write!(f, "사전에 없는 문자: {} (\\u{{{:04x}}})", c, *c as u32)
            }
        }
    }
}

impl std::error::Error for VocabError {}

impl From<std::io::Error> for VocabError {
    fn from(e: std::io::Error) -> Self {
        VocabError::IoError(e)
    }
}

/// 문자 사전
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// 인덱스 순서의 문자 (0번 패딩 제외)
    chars: Vec<char>,
    index: HashMap<char, u32>,
}

impl Vocabulary {
    /// 문자 목록으로 생성 (인덱스는 1부터)
    fn from_chars(chars: Vec<char>) -> Result<Self, VocabError> {
        let mut index = HashMap::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            if index.insert(c, i as u32 + 1).is_some() {
                return Err(VocabError::FormatError(format!("중복 문자: {}", c)));
            }
        }
        Ok(Self { chars, index })
    }

    /// 단어들에 나타나는 문자로 사전 구성 (정렬, 강세 부호 제외)
    pub fn build<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let charset: BTreeSet<char> = words
            .into_iter()
            .flat_map(|w| w.chars())
            .filter(|&c| c != ACUTE)
            .collect();
        let chars: Vec<char> = charset.into_iter().collect();
        let index = chars
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as u32 + 1))
            .collect();
        Self { chars, index }
    }

    /// 공백으로 구분된 순서 목록에서 로드
    ///
    /// ```text
    /// <pad> - а б в г ...
    /// ```
    pub fn from_list(text: &str) -> Result<Self, VocabError> {
        let mut tokens = text.split_whitespace().peekable();
        if tokens.peek() == Some(&PAD_TOKEN) {
            tokens.next();
        }

        let chars = tokens
            .map(|token| {
                let mut it = token.chars();
                match (it.next(), it.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(VocabError::FormatError(format!("한 글자가 아닌 항목: {}", token))),
                }
            })
            .collect::<Result<Vec<char>, VocabError>>()?;

        Self::from_chars(chars)
    }

    /// JSON 객체에서 로드
    ///
    /// ```json
    /// { "<pad>": 0, "а": 1, "б": 2 }
    /// ```
    pub fn from_json(json_str: &str) -> Result<Self, VocabError> {
        let value: serde_json::Value =
            serde_json::from_str(json_str).map_err(|e| VocabError::ParseError(e.to_string()))?;
        let obj = value
            .as_object()
            .ok_or_else(|| VocabError::FormatError("JSON 객체가 아닙니다".into()))?;

        let mut pairs: Vec<(u64, char)> = Vec::with_capacity(obj.len());
        for (key, value) in obj {
            let index = value
                .as_u64()
                .ok_or_else(|| VocabError::FormatError(format!("유효하지 않은 인덱스: {}", key)))?;
            if key == PAD_TOKEN {
                if index != 0 {
                    return Err(VocabError::FormatError("<pad> 인덱스는 0이어야 합니다".into()));
                }
                continue;
            }
            let mut it = key.chars();
            let c = match (it.next(), it.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(VocabError::FormatError(format!("한 글자가 아닌 항목: {}", key)))
                }
            };
            pairs.push((index, c));
        }

        pairs.sort_unstable();
        // 인덱스는 1부터 빈틈없이 이어져야 함
        for (expected, (index, c)) in pairs.iter().enumerate() {
            if *index != expected as u64 + 1 {
                return Err(VocabError::FormatError(format!(
                    "인덱스 불연속: {} -> {}",
                    c, index
                )));
            }
        }

        Self::from_chars(pairs.into_iter().map(|(_, c)| c).collect())
    }

    /// 파일에서 로드 (`.json`이면 JSON, 아니면 목록)
    pub fn load(path: &str) -> Result<Self, VocabError> {
        let content = fs::read_to_string(path)?;
        let vocab = if path.ends_with(".json") || content.trim_start().starts_with('{') {
            Self::from_json(&content)?
        } else {
            Self::from_list(&content)?
        };
        log::info!("문자 사전 로드: {} ({}자)", path, vocab.chars.len());
        Ok(vocab)
    }

    /// 순서 목록 형식으로 저장
    pub fn save(&self, path: &str) -> Result<(), VocabError> {
        fs::write(path, self.to_list())?;
        Ok(())
    }

    /// 순서 목록 문자열
    pub fn to_list(&self) -> String {
        let mut out = String::from(PAD_TOKEN);
        for c in &self.chars {
            out.push(' ');
            out.push(*c);
        }
        out
    }

    /// 문자 인덱스 (패딩 제외)
    pub fn index_of(&self, c: char) -> Option<u32> {
        self.index.get(&c).copied()
    }

    /// 단어를 고정 길이 인덱스 열로 인코딩
    ///
    /// 소문자로 바꾸고 강세 부호는 무시하며 `max_len`을 넘는 문자는 버립니다.
    pub fn encode(&self, word: &str, max_len: usize) -> Result<Vec<u32>, VocabError> {
        let mut out = Vec::with_capacity(max_len);
        for c in word.to_lowercase().chars().filter(|&c| c != ACUTE).take(max_len) {
            out.push(self.index_of(c).ok_or(VocabError::UnknownChar(c))?);
        }
        out.resize(max_len, 0);
        Ok(out)
    }

    /// 패딩 포함 크기
    pub fn len(&self) -> usize {
        self.chars.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
