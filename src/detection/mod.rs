//! 숫자 감지 및 변환 결과 검증 모듈

pub mod numerals;
pub mod validator;

pub use numerals::{format_numeral, is_numeral, parse_numeral, Dialect, NumeralError, NumeralStyle};
pub use validator::{accent_anomaly, is_valid_civic, offending_chars};
