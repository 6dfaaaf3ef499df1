//! 말뭉치 파일 일괄 처리
//!
//! - 교회 슬라브어 단어 목록 -> 현대 정자법 (작업 스레드 분할, 입력 순서 유지)
//! - 같은 단어의 강세 형태 집계
//! - 단어 목록 강세 결정
//! - 강세 개수 검증 보고

use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::thread;

use crate::accent::{AccentCascade, CascadeError};
use crate::core::converter::transliterate;
use crate::core::unicode::{count_acute, count_vowels, insert_acute_after, strip_acute};
use crate::detection::validator::accent_anomaly;

/// 일괄 처리 에러
#[derive(Debug)]
pub enum BatchError {
    /// 파일 읽기/쓰기 실패
    IoError(std::io::Error),
    /// 입력 줄 형식 오류
    Format { line: usize, reason: String },
    /// 강세 결정 실패
    Cascade(CascadeError),
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::IoError(e) => write!(f, "입출력 오류: {}", e),
            BatchError::Format { line, reason } => {
                write!(f, "입력 형식 오류 ({}행): {}", line, reason)
            }
            BatchError::Cascade(e) => write!(f, "강세 결정 실패: {}", e),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::IoError(e) => Some(e),
            BatchError::Cascade(e) => Some(e),
            BatchError::Format { .. } => None,
        }
    }
}

impl From<std::io::Error> for BatchError {
    fn from(e: std::io::Error) -> Self {
        BatchError::IoError(e)
    }
}

impl From<CascadeError> for BatchError {
    fn from(e: CascadeError) -> Self {
        BatchError::Cascade(e)
    }
}

/// 변환 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// 말뭉치 한 줄: 원문 단어, 약어를 푼 형태, 빈도
struct CorpusRow {
    word: String,
    expanded: String,
    count: String,
}

/// 공백 구분 필드 `n`개 이상인 줄을 읽음 (빈 줄은 None)
fn split_fields(line: &str, number: usize, n: usize) -> Result<Option<Vec<&str>>, BatchError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return Ok(None);
    }
    if fields.len() < n {
        return Err(BatchError::Format {
            line: number,
            reason: format!("필드 {}개 필요, {}개 있음", n, fields.len()),
        });
    }
    Ok(Some(fields))
}

/// 작업 스레드 수 결정 (0이면 가용 병렬도)
pub fn worker_count(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// 교회 슬라브어 말뭉치를 현대 정자법으로 변환
///
/// 입력: `<단어>\t<약어 푼 형태>\t<빈도>`
/// 출력: `<단어>\t<현대 정자법>\t<빈도>` (변환된 줄만, 입력 순서 유지)
pub fn transliterate_corpus<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    workers: usize,
) -> Result<BatchStats, BatchError> {
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(fields) = split_fields(&line, i + 1, 3)? {
            rows.push(CorpusRow {
                word: fields[0].to_string(),
                expanded: fields[1].to_string(),
                count: fields[2].to_string(),
            });
        }
    }

    let workers = worker_count(workers).min(rows.len()).max(1);
    let chunk_size = rows.len().div_ceil(workers).max(1);
    log::info!("변환 시작: {}개 단어, 작업 스레드 {}개", rows.len(), workers);

    // 각 조각의 결과를 조각 순서대로 모음
    let converted: Vec<Vec<Option<String>>> = thread::scope(|scope| {
        let handles: Vec<_> = rows
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|row| transliterate(&row.expanded).map(|c| c.into_string()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    let mut stats = BatchStats {
        total: rows.len(),
        ..BatchStats::default()
    };
    for (row, civic) in rows.iter().zip(converted.into_iter().flatten()) {
        match civic {
            Some(civic) => {
                writeln!(writer, "{}\t{}\t{}", row.word, civic, row.count)?;
                stats.accepted += 1;
            }
            None => stats.rejected += 1,
        }
    }
    writer.flush()?;

    log::info!(
        "변환 완료: 전체 {}, 변환 {}, 거부 {}",
        stats.total,
        stats.accepted,
        stats.rejected
    );
    Ok(stats)
}

/// 강세 없는 형태 -> (강세 형태, 빈도) 목록 (처음 나온 순서)
type AccentForms = BTreeMap<String, Vec<(String, u64)>>;

/// 현대 정자법 말뭉치에서 단어별 대표 강세 형태 선택
///
/// 입력: `<단어>\t<현대 정자법>\t<빈도>`
/// 출력: `<강세 없는 형태>\t<가장 빈도 높은 강세 형태>\t<그 빈도>` (강세 없는 형태 순)
///
/// 모음이 2개 미만인 단어와 강세가 정확히 1개인 형태가 없는 단어는 출력하지 않으므로
/// 결과는 엄격 정책으로 그대로 사전에 읽힙니다. 반환값은 출력한 줄 수.
pub fn aggregate_accents<R: BufRead, W: Write>(
    reader: R,
    writer: W,
) -> Result<usize, BatchError> {
    let forms = collect_forms(reader)?;
    write_forms(&forms, writer)
}

/// 말뭉치 집계에 수동 보충 목록 (`<id>|сло+во`) 병합
///
/// `+`는 강세 모음 앞에 둡니다. 말뭉치에 이미 있는 단어는 경고 후 건너뜀.
pub fn aggregate_accents_with_addendum<R: BufRead, A: BufRead, W: Write>(
    reader: R,
    addendum: A,
    writer: W,
) -> Result<usize, BatchError> {
    let mut forms = collect_forms(reader)?;
    merge_addendum(&mut forms, addendum)?;
    write_forms(&forms, writer)
}

fn collect_forms<R: BufRead>(reader: R) -> Result<AccentForms, BatchError> {
    let mut forms = AccentForms::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(fields) = split_fields(&line, i + 1, 3)? else {
            continue;
        };
        let count: u64 = fields[2].parse().map_err(|_| BatchError::Format {
            line: i + 1,
            reason: format!("유효하지 않은 빈도: {}", fields[2]),
        })?;

        let civic = fields[1];
        let variants = forms.entry(strip_acute(civic)).or_default();
        match variants.iter_mut().find(|(form, _)| form == civic) {
            Some((_, total)) => *total += count,
            None => variants.push((civic.to_string(), count)),
        }
    }
    Ok(forms)
}

fn merge_addendum<A: BufRead>(forms: &mut AccentForms, addendum: A) -> Result<(), BatchError> {
    let mut added = 0;
    for (i, line) in addendum.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let format_error = |reason: &str| BatchError::Format {
            line: i + 1,
            reason: format!("{}: {}", reason, line),
        };

        let (_, marked) = line
            .split_once('|')
            .ok_or_else(|| format_error("'|' 구분자 없음"))?;
        let index = marked
            .chars()
            .position(|c| c == '+')
            .ok_or_else(|| format_error("'+' 강세 표시 없음"))?;
        let plain: String = marked.chars().filter(|&c| c != '+').collect();

        if forms.contains_key(&plain) {
            log::warn!("보충 목록 단어가 말뭉치에 이미 있음: {}", plain);
            continue;
        }
        let accented = insert_acute_after(&plain, index)
            .ok_or_else(|| format_error("'+' 뒤에 글자 없음"))?;
        forms.insert(plain, vec![(accented, 1)]);
        added += 1;
    }
    log::info!("보충 목록에서 {}개 단어 추가", added);
    Ok(())
}

fn write_forms<W: Write>(forms: &AccentForms, mut writer: W) -> Result<usize, BatchError> {
    let mut written = 0;
    for (plain, variants) in forms {
        // 강세 표기가 필요 없는 단어
        if count_vowels(plain) < 2 {
            continue;
        }
        let mut best: Option<&(String, u64)> = None;
        for variant in variants.iter().filter(|(form, _)| count_acute(form) == 1) {
            if best.map_or(true, |(_, top)| variant.1 > *top) {
                best = Some(variant);
            }
        }
        match best {
            Some((form, count)) => {
                writeln!(writer, "{}\t{}\t{}", plain, form, count)?;
                written += 1;
            }
            None => log::debug!("강세가 하나인 형태 없음: {}", plain),
        }
    }
    writer.flush()?;

    log::info!("강세 형태 집계: {}개 단어 중 {}개 출력", forms.len(), written);
    Ok(written)
}

/// 단어 목록 (한 줄에 한 단어)의 강세 결정
///
/// 빈 줄은 그대로 유지. 예측기 실패는 즉시 중단.
pub fn accent_words<R: BufRead, W: Write>(
    cascade: &AccentCascade,
    reader: R,
    mut writer: W,
) -> Result<usize, BatchError> {
    let mut resolved = 0;
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            writeln!(writer)?;
            continue;
        }
        writeln!(writer, "{}", cascade.resolve(word)?)?;
        resolved += 1;
    }
    writer.flush()?;
    Ok(resolved)
}

/// 강세 개수 검증 보고
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// 검사한 단어 수
    pub total: usize,
    /// 강세 개수 -> 비정상 단어 수
    pub by_accent_count: BTreeMap<usize, usize>,
    /// 비정상 단어 (입력 순서)
    pub anomalies: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// 현대 정자법 말뭉치의 강세 개수 검사
///
/// 두 번째 필드가 모음 2개 이상인데 강세가 정확히 1개가 아닌 단어를 모읍니다.
pub fn validate_civic<R: BufRead>(reader: R) -> Result<ValidationReport, BatchError> {
    let mut report = ValidationReport::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(fields) = split_fields(&line, i + 1, 2)? else {
            continue;
        };
        report.total += 1;
        if let Some(accents) = accent_anomaly(fields[1]) {
            *report.by_accent_count.entry(accents).or_insert(0) += 1;
            report.anomalies.push(fields[1].to_string());
        }
    }

    if !report.is_clean() {
        log::warn!(
            "강세 개수 비정상 단어 {}개: {:?}",
            report.anomalies.len(),
            report.by_accent_count
        );
    }
    Ok(report)
}
