//! 러시아어 강세 결정 모듈
//!
//! 사전에서 먼저 찾고, 없으면 외부 예측기에 묻습니다:
//! 1. 강세 사전 (확정)
//! 2. 강세 예측기 (최선 추정)

pub mod cascade;
pub mod config;
pub mod dictionary;
pub mod oracle;
pub mod text;
pub mod vocab;

pub use cascade::{
    AccentCascade, AccentResolver, AccentResult, AccentSource, CascadeError, DictionaryResolver,
    NoActionReason, OracleResolver,
};
pub use config::{AccentConfig, DictionaryPolicy, DEFAULT_MAX_LEN};
pub use dictionary::{AccentDictionary, DictionaryError, EntryFault};
pub use oracle::{
    best_position, AccentOracle, OracleError, PositionScores, ScoreBackend, UnavailableOracle,
    VocabOracle,
};
pub use vocab::{VocabError, Vocabulary};
