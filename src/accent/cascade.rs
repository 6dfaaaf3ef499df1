//! 강세 결정 단계 연결
//!
//! 사전 -> 예측기 순서로 강세 위치를 찾습니다. 각 단계는 답을 주거나
//! "모름"을 돌려주며, 처음 답을 준 단계의 결과를 씁니다.

use super::config::AccentConfig;
use super::dictionary::{AccentDictionary, DictionaryError};
use super::oracle::{best_position, AccentOracle, OracleError, UnavailableOracle};
use crate::core::unicode::{count_vowels_ignore_case, insert_acute_after, ACUTE};

/// 강세 위치를 찾은 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentSource {
    Dictionary,
    Oracle,
    /// 사용자 정의 단계
    Custom(&'static str),
}

/// 강세 결정 단계
pub trait AccentResolver: Send + Sync {
    /// 결과에 기록할 출처
    fn source(&self) -> AccentSource;

    /// 소문자, 강세 없는 단어의 강세 모음 위치 (모르면 None)
    fn locate(&self, key: &str) -> Result<Option<usize>, OracleError>;
}

/// 사전 단계
pub struct DictionaryResolver {
    dictionary: AccentDictionary,
}

impl DictionaryResolver {
    pub fn new(dictionary: AccentDictionary) -> Self {
        Self { dictionary }
    }
}

impl AccentResolver for DictionaryResolver {
    fn source(&self) -> AccentSource {
        AccentSource::Dictionary
    }

    fn locate(&self, key: &str) -> Result<Option<usize>, OracleError> {
        Ok(self.dictionary.index(key))
    }
}

/// 예측기 단계: 도달하면 항상 답을 줌
pub struct OracleResolver<O: AccentOracle> {
    oracle: O,
}

impl<O: AccentOracle> OracleResolver<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }
}

impl<O: AccentOracle> AccentResolver for OracleResolver<O> {
    fn source(&self) -> AccentSource {
        AccentSource::Oracle
    }

    fn locate(&self, key: &str) -> Result<Option<usize>, OracleError> {
        let scores = self.oracle.score(key)?;
        Ok(best_position(&scores, key.chars().count()))
    }
}

/// 강세를 붙이지 않은 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoActionReason {
    /// ё가 강세를 이미 나타냄
    ContainsYo,
    /// 모음 2개 미만
    SingleVowel,
    /// 이미 강세 표시가 있음
    AlreadyMarked,
}

/// 강세 결정 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccentResult {
    NoAction {
        word: String,
        reason: NoActionReason,
    },
    Resolved {
        word: String,
        /// 강세 모음의 문자 인덱스
        position: usize,
        source: AccentSource,
    },
}

impl AccentResult {
    /// 최종 단어
    pub fn word(&self) -> &str {
        match self {
            AccentResult::NoAction { word, .. } | AccentResult::Resolved { word, .. } => word,
        }
    }

    pub fn into_word(self) -> String {
        match self {
            AccentResult::NoAction { word, .. } | AccentResult::Resolved { word, .. } => word,
        }
    }

    pub fn source(&self) -> Option<AccentSource> {
        match self {
            AccentResult::Resolved { source, .. } => Some(*source),
            AccentResult::NoAction { .. } => None,
        }
    }
}

/// 강세 결정 에러
#[derive(Debug)]
pub enum CascadeError {
    /// 예측기 실패
    Oracle(OracleError),
    /// 모든 단계가 답을 주지 못함
    Exhausted(String),
}

impl std::fmt::Display for CascadeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CascadeError::Oracle(e) => write!(f, "{}", e),
            CascadeError::Exhausted(word) => write!(f, "강세 위치를 찾지 못함: {}", word),
        }
    }
}

impl std::error::Error for CascadeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CascadeError::Oracle(e) => Some(e),
            CascadeError::Exhausted(_) => None,
        }
    }
}

impl From<OracleError> for CascadeError {
    fn from(e: OracleError) -> Self {
        CascadeError::Oracle(e)
    }
}

/// 강세 결정기
///
/// 구성 후에는 변경되지 않으므로 여러 스레드에서 공유할 수 있습니다.
pub struct AccentCascade {
    resolvers: Vec<Box<dyn AccentResolver>>,
}

impl AccentCascade {
    /// 사전 + 예측기 구성
    pub fn new<O: AccentOracle + 'static>(dictionary: AccentDictionary, oracle: O) -> Self {
        Self::with_resolvers(vec![
            Box::new(DictionaryResolver::new(dictionary)),
            Box::new(OracleResolver::new(oracle)),
        ])
    }

    /// 사전만 사용 (사전에 없으면 예측기 사용 불가 에러)
    pub fn dictionary_only(dictionary: AccentDictionary) -> Self {
        Self::new(dictionary, UnavailableOracle)
    }

    /// 설정의 사전 경로와 정책으로 사전을 로드해 구성 (경로가 비면 빈 사전)
    pub fn from_config<O: AccentOracle + 'static>(
        config: &AccentConfig,
        oracle: O,
    ) -> Result<Self, DictionaryError> {
        let dictionary = if config.dictionary_path.is_empty() {
            AccentDictionary::empty()
        } else {
            AccentDictionary::load(&config.dictionary_path, config.policy)?
        };
        Ok(Self::new(dictionary, oracle))
    }

    /// 단계 목록을 직접 지정
    pub fn with_resolvers(resolvers: Vec<Box<dyn AccentResolver>>) -> Self {
        Self { resolvers }
    }

    /// 단어의 강세 결정
    ///
    /// 1. ё 포함 또는 모음 2개 미만 -> 그대로
    /// 2. 강세 표시 있음 (아포스트로피는 강세 부호로 바꿈) -> 그대로
    /// 3. 단계 순서대로 강세 위치 탐색, 처음 찾은 위치 뒤에 강세 부호 삽입
    pub fn analyze(&self, word: &str) -> Result<AccentResult, CascadeError> {
        let lower = word.to_lowercase();
        if lower.contains('ё') {
            return Ok(AccentResult::NoAction {
                word: word.to_string(),
                reason: NoActionReason::ContainsYo,
            });
        }
        if count_vowels_ignore_case(word) < 2 {
            return Ok(AccentResult::NoAction {
                word: word.to_string(),
                reason: NoActionReason::SingleVowel,
            });
        }

        let marked = word.replace('\'', &ACUTE.to_string());
        if marked.contains(ACUTE) {
            return Ok(AccentResult::NoAction {
                word: marked,
                reason: NoActionReason::AlreadyMarked,
            });
        }

        for resolver in &self.resolvers {
            let Some(position) = resolver.locate(&lower)? else {
                continue;
            };
            // 위치가 단어 밖이면 이 단계는 답이 없는 것으로 취급
            let Some(accented) = insert_acute_after(word, position) else {
                log::warn!(
                    "강세 위치 범위 초과: {} ({:?}, {})",
                    word,
                    resolver.source(),
                    position
                );
                continue;
            };
            log::debug!("강세 결정: {} -> {} ({:?})", word, accented, resolver.source());
            return Ok(AccentResult::Resolved {
                word: accented,
                position,
                source: resolver.source(),
            });
        }

        Err(CascadeError::Exhausted(word.to_string()))
    }

    /// 강세를 붙인 단어 반환
    pub fn resolve(&self, word: &str) -> Result<String, CascadeError> {
        self.analyze(word).map(AccentResult::into_word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accent::config::DictionaryPolicy;
    use crate::accent::oracle::PositionScores;

    fn dictionary() -> AccentDictionary {
        AccentDictionary::parse("стано\u{301}к\nкрова\u{301}ть\n", DictionaryPolicy::Strict)
            .unwrap()
    }

    /// 마지막 위치에 강세를 주는 (사전과 모순되는) 예측기
    fn last_position_oracle(word: &str) -> Result<PositionScores, OracleError> {
        let len = word.chars().count();
        Ok((0..32)
            .map(|i| if i + 1 == len { [0.0, 5.0] } else { [1.0, 0.0] })
            .collect())
    }

    fn first_position_oracle(_word: &str) -> Result<PositionScores, OracleError> {
        let mut scores = vec![[0.5, 0.1]; 32];
        scores[0] = [0.1, 0.9];
        Ok(scores)
    }

    #[test]
    fn test_dictionary_wins_over_oracle() {
        let cascade = AccentCascade::new(dictionary(), last_position_oracle);

        let result = cascade.analyze("станок").unwrap();
        assert_eq!(result.word(), "стано\u{301}к");
        assert_eq!(result.source(), Some(AccentSource::Dictionary));
        assert!(matches!(result, AccentResult::Resolved { position: 4, .. }));
    }

    #[test]
    fn test_oracle_fallback() {
        let cascade = AccentCascade::new(dictionary(), first_position_oracle);

        let result = cascade.analyze("дети").unwrap();
        assert_eq!(result.word(), "д\u{301}ети");
        assert_eq!(result.source(), Some(AccentSource::Oracle));

        let cascade = AccentCascade::new(dictionary(), last_position_oracle);
        assert_eq!(cascade.resolve("дети").unwrap(), "дети\u{301}");
    }

    #[test]
    fn test_no_action_cases() {
        let cascade = AccentCascade::new(dictionary(), last_position_oracle);

        let result = cascade.analyze("ёлка").unwrap();
        assert_eq!(
            result,
            AccentResult::NoAction {
                word: "ёлка".to_string(),
                reason: NoActionReason::ContainsYo
            }
        );
        assert_eq!(cascade.resolve("ЁЛКА").unwrap(), "ЁЛКА");

        let result = cascade.analyze("мир").unwrap();
        assert!(matches!(
            result,
            AccentResult::NoAction {
                reason: NoActionReason::SingleVowel,
                ..
            }
        ));

        // 아포스트로피는 강세 부호로
        assert_eq!(cascade.resolve("доро'га").unwrap(), "доро\u{301}га");
        assert_eq!(cascade.resolve("дети\u{301}").unwrap(), "дети\u{301}");
    }

    #[test]
    fn test_single_vowel_keeps_apostrophe() {
        let cascade = AccentCascade::new(dictionary(), last_position_oracle);
        assert_eq!(cascade.resolve("ми'р").unwrap(), "ми'р");
    }

    #[test]
    fn test_casing_preserved() {
        let cascade = AccentCascade::new(dictionary(), last_position_oracle);
        assert_eq!(cascade.resolve("Станок").unwrap(), "Стано\u{301}к");
        assert_eq!(cascade.resolve("КРОВАТЬ").unwrap(), "КРОВА\u{301}ТЬ");
    }

    #[test]
    fn test_exactly_one_accent() {
        let cascade = AccentCascade::new(dictionary(), first_position_oracle);
        for word in ["станок", "дети", "голова", "Красота"] {
            let resolved = cascade.resolve(word).unwrap();
            assert_eq!(resolved.matches(ACUTE).count(), 1, "{}", resolved);
        }
    }

    #[test]
    fn test_oracle_unavailable_propagates() {
        let cascade = AccentCascade::dictionary_only(dictionary());

        assert_eq!(cascade.resolve("станок").unwrap(), "стано\u{301}к");
        assert!(matches!(
            cascade.resolve("дети"),
            Err(CascadeError::Oracle(OracleError::Unavailable(_)))
        ));
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stress.txt");
        std::fs::write(&path, "1|ёж\n2|стан+ок\n").unwrap();

        let config = AccentConfig::new()
            .with_dictionary_path(path.to_str().unwrap())
            .with_policy(DictionaryPolicy::Lenient);
        let cascade = AccentCascade::from_config(&config, UnavailableOracle).unwrap();
        assert_eq!(cascade.resolve("станок").unwrap(), "стано\u{301}к");

        let strict = config.with_policy(DictionaryPolicy::Strict);
        assert!(AccentCascade::from_config(&strict, UnavailableOracle).is_err());

        let empty =
            AccentCascade::from_config(&AccentConfig::new(), first_position_oracle).unwrap();
        assert_eq!(empty.resolve("станок").unwrap(), "с\u{301}танок");
    }

    #[test]
    fn test_custom_resolver_chain() {
        struct LastVowel;

        impl AccentResolver for LastVowel {
            fn source(&self) -> AccentSource {
                AccentSource::Custom("last-vowel")
            }

            fn locate(&self, key: &str) -> Result<Option<usize>, OracleError> {
                Ok(key.chars().collect::<Vec<_>>().iter().rposition(|c| "аеиоуыэюя".contains(*c)))
            }
        }

        let cascade = AccentCascade::with_resolvers(vec![
            Box::new(DictionaryResolver::new(dictionary())),
            Box::new(LastVowel),
        ]);
        let result = cascade.analyze("голова").unwrap();
        assert_eq!(result.word(), "голова\u{301}");
        assert_eq!(result.source(), Some(AccentSource::Custom("last-vowel")));

        let empty = AccentCascade::with_resolvers(Vec::new());
        assert!(matches!(empty.resolve("дети"), Err(CascadeError::Exhausted(_))));
    }
}
