//! 강세 엔진 설정
//!
//! 사전 로드 정책 및 예측기 입력 길이 등 설정값 정의

use serde::{Deserialize, Serialize};

/// 예측기가 다루는 최대 단어 길이 (이후 문자는 무시)
pub const DEFAULT_MAX_LEN: usize = 32;

/// 사전 항목 검증 실패 시 처리 방식
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryPolicy {
    /// 잘못된 항목이 하나라도 있으면 사전 구성 실패
    #[default]
    Strict,
    /// 잘못된 항목은 건너뜀
    Lenient,
}

impl std::str::FromStr for DictionaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(DictionaryPolicy::Strict),
            "lenient" => Ok(DictionaryPolicy::Lenient),
            other => Err(format!("알 수 없는 사전 정책: {}", other)),
        }
    }
}

/// 강세 엔진 설정
#[derive(Debug, Clone)]
pub struct AccentConfig {
    /// 사전 항목 검증 정책
    pub policy: DictionaryPolicy,

    /// 예측기 최대 입력 길이
    pub max_len: usize,

    /// 강세 사전 파일 경로 (비어 있으면 빈 사전)
    pub dictionary_path: String,
}

impl Default for AccentConfig {
    fn default() -> Self {
        Self {
            policy: DictionaryPolicy::Strict,
            max_len: DEFAULT_MAX_LEN,
            dictionary_path: String::new(),
        }
    }
}

impl AccentConfig {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 사전 경로 설정
    pub fn with_dictionary_path(mut self, path: impl Into<String>) -> Self {
        self.dictionary_path = path.into();
        self
    }

    /// 사전 정책 설정
    pub fn with_policy(mut self, policy: DictionaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 최대 입력 길이 설정
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }
}
