//! 외부 강세 예측기 경계
//!
//! 예측기는 단어를 받아 문자 위치마다 (강세 아님, 강세) 두 점수를 돌려줍니다.
//! 통계 모델은 이 경계를 통해서만 주입됩니다.

use super::config::{AccentConfig, DEFAULT_MAX_LEN};
use super::vocab::{VocabError, Vocabulary};

/// 위치별 점수: [강세 아님, 강세]
pub type PositionScores = Vec<[f32; 2]>;

/// 예측기 에러
#[derive(Debug)]
pub enum OracleError {
    /// 예측 백엔드 사용 불가 또는 실패
    Unavailable(String),
    /// 점수 배열 크기 불일치
    Shape { expected: usize, got: usize },
    /// 입력 인코딩 실패
    Encoding(VocabError),
}

impl std::fmt::Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleError::Unavailable(s) => write!(f, "강세 예측기 사용 불가: {}", s),
            OracleError::Shape { expected, got } => {
                write!(f, "예측 결과 크기 오류: {}개 기대, {}개 수신", expected, got)
            }
            OracleError::Encoding(e) => write!(f, "예측기 입력 인코딩 실패: {}", e),
        }
    }
}

impl std::error::Error for OracleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OracleError::Encoding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<VocabError> for OracleError {
    fn from(e: VocabError) -> Self {
        OracleError::Encoding(e)
    }
}

/// 강세 예측기
pub trait AccentOracle: Send + Sync {
    /// 소문자 단어의 위치별 점수
    ///
    /// 최대 길이를 넘는 문자는 무시해도 됩니다.
    fn score(&self, word: &str) -> Result<PositionScores, OracleError>;
}

impl<F> AccentOracle for F
where
    F: Fn(&str) -> Result<PositionScores, OracleError> + Send + Sync,
{
    fn score(&self, word: &str) -> Result<PositionScores, OracleError> {
        self(word)
    }
}

/// 백엔드가 없을 때 쓰는 예측기 (항상 Unavailable)
#[derive(Debug, Clone, Default)]
pub struct UnavailableOracle;

impl AccentOracle for UnavailableOracle {
    fn score(&self, word: &str) -> Result<PositionScores, OracleError> {
        Err(OracleError::Unavailable(format!(
            "통계 백엔드가 설정되지 않음 ({})",
            word
        )))
    }
}

/// 강세 위치 선택: argmax(강세 - 강세 아님)
///
/// `len` 이상 위치는 보지 않으며 동점이면 앞 위치.
/// 점수 차가 유한하지 않은 (NaN, 무한대) 위치는 후보에서 제외. 후보가 없으면 None.
pub fn best_position(scores: &[[f32; 2]], len: usize) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, [no_accent, accent]) in scores.iter().take(len).enumerate() {
        let margin = accent - no_accent;
        if !margin.is_finite() {
            continue;
        }
        match best {
            Some((_, top)) if margin <= top => {}
            _ => best = Some((i, margin)),
        }
    }
    best.map(|(i, _)| i)
}

/// 인코딩된 입력을 받는 예측 백엔드 (신경망 등)
pub trait ScoreBackend: Send + Sync {
    /// 길이 `max_len`의 인덱스 열 -> 길이 `max_len`의 점수 배열
    fn predict(&self, encoded: &[u32]) -> Result<PositionScores, OracleError>;
}

/// 문자 사전으로 단어를 인코딩해 백엔드에 넘기는 예측기
pub struct VocabOracle<B: ScoreBackend> {
    vocab: Vocabulary,
    max_len: usize,
    backend: B,
}

impl<B: ScoreBackend> VocabOracle<B> {
    pub fn new(vocab: Vocabulary, backend: B) -> Self {
        Self {
            vocab,
            max_len: DEFAULT_MAX_LEN,
            backend,
        }
    }

    /// 설정의 최대 입력 길이 사용
    pub fn from_config(vocab: Vocabulary, backend: B, config: &AccentConfig) -> Self {
        Self::new(vocab, backend).with_max_len(config.max_len)
    }

    /// 최대 입력 길이 설정
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl<B: ScoreBackend> AccentOracle for VocabOracle<B> {
    fn score(&self, word: &str) -> Result<PositionScores, OracleError> {
        let encoded = self.vocab.encode(word, self.max_len)?;
        let scores = self.backend.predict(&encoded)?;
        if scores.len() != self.max_len {
            return Err(OracleError::Shape {
                expected: self.max_len,
                got: scores.len(),
            });
        }
        Ok(scores)
    }
}
