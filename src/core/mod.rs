//! 교회 슬라브어 음역 핵심 모듈

pub mod charmap;
pub mod converter;
pub mod diacritics;
pub mod exceptions;
pub mod unicode;

pub use converter::{explain, transliterate, CivicWord, Rejection};
