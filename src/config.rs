//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::accent::config::{AccentConfig, DictionaryPolicy, DEFAULT_MAX_LEN};

/// tocivic 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TocivicConfig {
    /// 강세 사전 파일 경로
    #[serde(default)]
    pub dictionary_path: Option<String>,
    /// 예측기 문자 사전 파일 경로
    #[serde(default)]
    pub vocab_path: Option<String>,
    /// 사전 항목 검증 정책
    #[serde(default)]
    pub dictionary_policy: DictionaryPolicy,
    /// 예측기 최대 입력 길이
    #[serde(default = "default_max_len")]
    pub max_len: usize,
    /// 일괄 변환 작업 스레드 수 (0이면 가용 병렬도)
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_max_len() -> usize {
    DEFAULT_MAX_LEN
}

fn default_workers() -> usize {
    0
}

impl Default for TocivicConfig {
    fn default() -> Self {
        Self {
            dictionary_path: None,
            vocab_path: None,
            dictionary_policy: DictionaryPolicy::default(),
            max_len: default_max_len(),
            workers: default_workers(),
        }
    }
}

impl TocivicConfig {
    /// 강세 엔진 설정으로 변환
    pub fn accent_config(&self) -> AccentConfig {
        let config = AccentConfig::new()
            .with_policy(self.dictionary_policy)
            .with_max_len(self.max_len);
        match &self.dictionary_path {
            Some(path) => config.with_dictionary_path(path.as_str()),
            None => config,
        }
    }
}

/// 설정 파일 경로: ~/.config/tocivic/config.json
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| {
            // HOME 미설정이거나 유효하지 않으면 /var/tmp 폴백
            PathBuf::from("/var/tmp")
        });
    home.join(".config").join("tocivic").join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config() -> TocivicConfig {
    load_config_from(&config_path())
}

/// 지정한 경로에서 설정 로드
pub fn load_config_from(path: &Path) -> TocivicConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패, 기본값 사용: {} ({})", path.display(), e);
            TocivicConfig::default()
        }),
        Err(_) => TocivicConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(config: &TocivicConfig) -> Result<(), String> {
    save_config_to(config, &config_path())
}

/// 지정한 경로에 설정 저장
pub fn save_config_to(config: &TocivicConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("설정 디렉토리 생성 실패: {}", e))?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|e| format!("직렬화 실패: {}", e))?;
    fs::write(path, json).map_err(|e| format!("설정 파일 저장 실패: {}", e))?;
    Ok(())
}
