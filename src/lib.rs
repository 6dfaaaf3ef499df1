pub mod accent;
pub mod batch;
pub mod config;
pub mod core;
pub mod detection;

pub use accent::{AccentCascade, AccentDictionary, AccentOracle, DictionaryPolicy};
pub use core::converter::{explain, transliterate, CivicWord, Rejection};
pub use detection::{format_numeral, is_numeral, parse_numeral, NumeralStyle};
