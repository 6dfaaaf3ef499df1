//! 통합 테스트 - 음역, 숫자, 강세 결정, 일괄 처리

use std::io::{BufReader, BufWriter, Cursor};

use tocivic::accent::{
    AccentCascade, AccentConfig, AccentDictionary, AccentSource, DictionaryPolicy, OracleError,
    PositionScores,
};
use tocivic::batch::{
    accent_words, aggregate_accents, aggregate_accents_with_addendum, transliterate_corpus,
    validate_civic,
};
use tocivic::core::charmap::is_cu_word;
use tocivic::detection::{format_numeral, is_numeral, parse_numeral, Dialect, NumeralStyle};
use tocivic::{explain, transliterate, Rejection};

const ACUTE: char = '\u{301}';

fn civic(word: &str) -> Option<String> {
    transliterate(word).map(|c| c.into_string())
}

#[test]
fn test_transliteration_scenarios() {
    assert_eq!(civic("тѵ́хѡнъ").as_deref(), Some("ти\u{301}хон"));
    assert_eq!(civic("еси\u{301}").as_deref(), Some("еси\u{301}"));
    assert_eq!(civic("а҆леѯ").as_deref(), Some("а\u{301}лекс"));
    assert_eq!(civic("ѿрасль").as_deref(), Some("о\u{301}трасль"));
}

#[test]
fn test_civic_input_unchanged() {
    for word in ["слово", "что-то", "мир", "доро\u{301}га"] {
        assert_eq!(civic(word).as_deref(), Some(word));
    }
}

#[test]
fn test_single_accent_and_short_word_invariants() {
    let words = [
        "бо̀гомъ̀",
        "а҆̀ще",
        "ѡ҆́ч҃е",
        "млⷭ҇ти",
        "ѻ҆́ко",
        "ра̑бы",
        "ѽ",
        "сла́ва",
        "є҆ди́нъ",
        "ѵ҆ме́нъ",
        "ѳе́ѡдѡръ",
        "ѱало́мъ",
    ];
    for word in words {
        if let Some(result) = transliterate(word) {
            let accents = result.as_str().matches(ACUTE).count();
            assert!(accents <= 1, "{} -> {}", word, result);
            let vowels = result.as_str().chars().filter(|c| "аеиоуыэюя".contains(*c)).count();
            if vowels < 2 {
                assert_eq!(accents, 0, "{} -> {}", word, result);
            }
        }
    }
}

#[test]
fn test_numerals_excluded() {
    for word in ["а҃", "рк҃г", "҂а҃", "ѕ҃-ю"] {
        assert!(is_numeral(word), "{}", word);
        assert_eq!(transliterate(word), None);
        assert_eq!(explain(word), Err(Rejection::Numeral));
    }
    // 티틀로가 없으면 숫자가 아님
    assert!(!is_numeral("рка"));
}

#[test]
fn test_rejection_reports_offending_chars() {
    match explain("бг҃ъ") {
        Err(Rejection::ForeignCharacters { offending, .. }) => {
            assert_eq!(offending, vec!['\u{483}'])
        }
        other => panic!("거부되어야 함: {:?}", other),
    }
}

#[test]
fn test_cu_inventory() {
    assert!(is_cu_word("тѵ́хѡнъ"));
    assert!(!is_cu_word("hello"));
    assert!(!is_cu_word(""));
}

#[test]
fn test_numeral_round_trip() {
    let standard = NumeralStyle::default();
    assert_eq!(format_numeral(1, standard), "а҃");
    assert_eq!(format_numeral(1860, standard), "҂аѿѯ҃");
    for value in [1, 11, 123, 1000, 1981, 12345, 3423000] {
        let text = format_numeral(value, standard);
        assert_eq!(parse_numeral(&text).unwrap(), value, "{}", text);
    }

    let old = NumeralStyle {
        titlo: true,
        dialect: Dialect::Old,
    };
    for value in [1110, 11100, 12345, 123456, 2464811] {
        let text = format_numeral(value, old);
        assert_eq!(parse_numeral(&text).unwrap(), value, "{}", text);
    }
}

fn contradictory_oracle(word: &str) -> Result<PositionScores, OracleError> {
    // 항상 마지막 글자에 강세
    let len = word.chars().count();
    Ok((0..32)
        .map(|i| if i + 1 == len { [0.0, 1.0] } else { [1.0, 0.0] })
        .collect())
}

fn first_position_oracle(_word: &str) -> Result<PositionScores, OracleError> {
    let mut scores = vec![[0.0, 0.0]; 32];
    scores[0] = [0.0, 1.0];
    Ok(scores)
}

fn dictionary() -> AccentDictionary {
    AccentDictionary::parse("стано\u{301}к\nкрова\u{301}ть\n", DictionaryPolicy::Strict).unwrap()
}

#[test]
fn test_cascade_precedence() {
    let cascade = AccentCascade::new(dictionary(), contradictory_oracle);
    let result = cascade.analyze("станок").unwrap();
    assert_eq!(result.word(), "стано\u{301}к");
    assert_eq!(result.source(), Some(AccentSource::Dictionary));
}

#[test]
fn test_cascade_oracle_fallback() {
    let cascade = AccentCascade::new(dictionary(), first_position_oracle);
    let resolved = cascade.resolve("дети").unwrap();
    assert_eq!(resolved, "д\u{301}ети");
    assert_eq!(resolved.matches(ACUTE).count(), 1);
}

#[test]
fn test_cascade_no_action() {
    let cascade = AccentCascade::new(dictionary(), first_position_oracle);
    assert_eq!(cascade.resolve("ёлка").unwrap(), "ёлка");
    assert_eq!(cascade.resolve("мир").unwrap(), "мир");
    assert_eq!(cascade.resolve("доро'га").unwrap(), "доро\u{301}га");
}

#[test]
fn test_oracle_unavailable_is_fatal() {
    let cascade = AccentCascade::dictionary_only(dictionary());
    assert!(cascade.resolve("дети").is_err());
    assert!(cascade.resolve_text("станок и дети").is_err());
    assert_eq!(
        cascade.resolve_text("Станок и кровать.").unwrap(),
        "Стано\u{301}к и крова\u{301}ть."
    );
}

#[test]
fn test_aggregated_dictionary_loads_strictly() {
    // 모음 하나짜리 단어가 섞인 말뭉치도 엄격 정책으로 읽혀야 함
    let corpus = "тѵ́хѡнъ\tтѵ́хѡнъ\t1\nмі́ръ\tмі́ръ\t1\nѿрасль\tѿрасль\t1\n";
    let mut civic_rows = Vec::new();
    transliterate_corpus(Cursor::new(corpus), &mut civic_rows, 1).unwrap();

    let mut dict_text = Vec::new();
    let lines = aggregate_accents(Cursor::new(civic_rows), &mut dict_text).unwrap();
    assert_eq!(lines, 2);

    let dict_text = String::from_utf8(dict_text).unwrap();
    let dict = AccentDictionary::parse(&dict_text, DictionaryPolicy::Strict).unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.index("тихон"), Some(1));
    assert_eq!(dict.index("мир"), None);
}

#[test]
fn test_pipeline_from_files() {
    let dir = tempfile::tempdir().unwrap();

    // 1. 교회 슬라브어 말뭉치 -> 현대 정자법
    let corpus = "тѵ́хѡнъ\tтѵ́хѡнъ\t3\nбг҃ъ\tбг҃ъ\t5\nмі́ръ\tмі́ръ\t4\n\
                  ѿрасль\tѿрасль\t2\nѿрасли\tѿрасли\t1\n";
    let civic_path = dir.path().join("civic.txt");
    let stats = transliterate_corpus(
        Cursor::new(corpus),
        BufWriter::new(std::fs::File::create(&civic_path).unwrap()),
        0,
    )
    .unwrap();
    assert_eq!(stats.accepted, 4);
    assert_eq!(stats.rejected, 1);

    // 2. 검증
    let report =
        validate_civic(BufReader::new(std::fs::File::open(&civic_path).unwrap())).unwrap();
    assert_eq!(report.total, 4);
    assert!(report.is_clean());

    // 3. 집계 + 보충 목록 -> 강세 사전 (모음 하나짜리 мир는 빠짐)
    let dict_path = dir.path().join("dict.txt");
    let lines = aggregate_accents_with_addendum(
        BufReader::new(std::fs::File::open(&civic_path).unwrap()),
        Cursor::new("1|кни+га\n"),
        std::fs::File::create(&dict_path).unwrap(),
    )
    .unwrap();
    assert_eq!(lines, 4);

    let config = AccentConfig::new().with_dictionary_path(dict_path.to_str().unwrap());
    let cascade = AccentCascade::from_config(&config, contradictory_oracle).unwrap();

    // 4. 단어 목록 강세 표기
    let mut out = Vec::new();
    let words = "тихон\nотрасль\nмир\nкнига\nдети\n";
    accent_words(&cascade, Cursor::new(words), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "ти\u{301}хон\nо\u{301}трасль\nмир\nкни\u{301}га\nдети\u{301}\n"
    );
}
