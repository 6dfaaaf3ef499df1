//! 문장 단위 강세 표기

use lazy_static::lazy_static;
use regex::Regex;

use super::cascade::{AccentCascade, CascadeError};

lazy_static! {
    /// 러시아어 단어 (아포스트로피, 강세 부호 포함)
    static ref WORD_RE: Regex =
        Regex::new(r"(?i)[абвгдеёжзийклмнопрстуфхцчшщьыъэюя'\x{301}]+").unwrap();
}

impl AccentCascade {
    /// 문장 안의 모든 러시아어 단어에 강세 표기
    ///
    /// 단어 사이의 문자는 그대로 둡니다.
    pub fn resolve_text(&self, text: &str) -> Result<String, CascadeError> {
        let mut out = String::with_capacity(text.len() + text.len() / 4);
        let mut last = 0;
        for m in WORD_RE.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            out.push_str(&self.resolve(m.as_str())?);
            last = m.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::accent::cascade::AccentCascade;
    use crate::accent::config::DictionaryPolicy;
    use crate::accent::dictionary::AccentDictionary;
    use crate::core::unicode::ACUTE;

    fn cascade() -> AccentCascade {
        let dict = AccentDictionary::parse(
            "стано\u{301}к\nкрова\u{301}ть\nсло\u{301}во\n",
            DictionaryPolicy::Strict,
        )
        .unwrap();
        AccentCascade::dictionary_only(dict)
    }

    #[test]
    fn test_resolve_text() {
        let result = cascade().resolve_text("Станок, кровать и ёлка!").unwrap();
        assert_eq!(result, "Стано\u{301}к, крова\u{301}ть и ёлка!");
    }

    #[test]
    fn test_marked_words_untouched() {
        let result = cascade().resolve_text("до'ма: сло\u{301}во 42").unwrap();
        assert_eq!(result, format!("до{}ма: сло{}во 42", ACUTE, ACUTE));
    }

    #[test]
    fn test_non_russian_passthrough() {
        assert_eq!(cascade().resolve_text("hello, world").unwrap(), "hello, world");
        assert_eq!(cascade().resolve_text("").unwrap(), "");
    }

    #[test]
    fn test_unknown_word_fails() {
        assert!(cascade().resolve_text("станок и дети").is_err());
    }
}
