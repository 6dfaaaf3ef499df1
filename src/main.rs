//! tocivic - 교회 슬라브어 -> 현대 러시아어 정자법 변환 및 강세 표기

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use tocivic::accent::{AccentCascade, UnavailableOracle, Vocabulary};
use tocivic::batch::{
    accent_words, aggregate_accents, aggregate_accents_with_addendum, transliterate_corpus,
    validate_civic,
};
use tocivic::config::{load_config, load_config_from, TocivicConfig};
use tocivic::detection::{format_numeral, parse_numeral, Dialect, NumeralStyle};
use tocivic::{explain, DictionaryPolicy};

#[derive(Parser, Debug)]
#[command(name = "tocivic")]
#[command(about = "Church Slavonic to civic Russian transliteration and stress marking")]
struct Args {
    /// 설정 파일 경로 (기본: ~/.config/tocivic/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 진행 상황 출력
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 말뭉치 (<단어>\t<약어 푼 형태>\t<빈도>)를 현대 정자법으로 변환
    Civic {
        input: PathBuf,
        output: PathBuf,
        /// 작업 스레드 수 (0이면 가용 병렬도)
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// 명령행의 단어 변환
    Word {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// 같은 단어의 강세 형태 중 가장 빈도 높은 것 선택
    Aggregate {
        input: PathBuf,
        output: PathBuf,
        /// 수동 보충 목록 (<id>|сло+во)
        #[arg(long)]
        addendum: Option<PathBuf>,
    },
    /// 단어 목록 강세 표기 (사전에 없는 단어는 오류)
    Accent {
        input: PathBuf,
        output: PathBuf,
        /// 강세 사전 파일
        #[arg(short, long)]
        dictionary: Option<String>,
        /// 잘못된 사전 항목 건너뜀
        #[arg(long)]
        lenient: bool,
    },
    /// 말뭉치에서 예측기 문자 사전 생성
    Vocab {
        input: PathBuf,
        output: Option<String>,
    },
    /// 현대 정자법 말뭉치의 강세 개수 검사
    Validate { input: PathBuf },
    /// 정수를 교회 슬라브 숫자로 (또는 그 반대로)
    Numeral {
        value: String,
        /// 옛 표기
        #[arg(long)]
        old: bool,
        /// 티틀로 생략
        #[arg(long)]
        no_titlo: bool,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let args = Args::parse();

    // 로깅 초기화 (기본 warn, --verbose면 info)
    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &args.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    match run(args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("tocivic: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &TocivicConfig) -> CliResult {
    match command {
        Command::Civic {
            input,
            output,
            workers,
        } => {
            let reader = BufReader::new(File::open(&input)?);
            let writer = BufWriter::new(File::create(&output)?);
            let stats = transliterate_corpus(reader, writer, workers.unwrap_or(config.workers))?;
            println!(
                "전체 {}, 변환 {}, 거부 {}",
                stats.total, stats.accepted, stats.rejected
            );
        }
        Command::Word { words } => {
            for word in words {
                match explain(&word) {
                    Ok(civic) => println!("{}\t{}", word, civic),
                    Err(rejection) => println!("{}\t-\t{}", word, rejection),
                }
            }
        }
        Command::Aggregate {
            input,
            output,
            addendum,
        } => {
            let reader = BufReader::new(File::open(&input)?);
            let writer = BufWriter::new(File::create(&output)?);
            let count = match addendum {
                Some(path) => {
                    let addendum = BufReader::new(File::open(&path)?);
                    aggregate_accents_with_addendum(reader, addendum, writer)?
                }
                None => aggregate_accents(reader, writer)?,
            };
            println!("{}개 단어", count);
        }
        Command::Accent {
            input,
            output,
            dictionary,
            lenient,
        } => {
            let mut accent_config = config.accent_config();
            if let Some(path) = dictionary {
                accent_config = accent_config.with_dictionary_path(path);
            }
            if lenient {
                accent_config = accent_config.with_policy(DictionaryPolicy::Lenient);
            }
            if accent_config.dictionary_path.is_empty() {
                return Err("강세 사전이 지정되지 않았습니다 (--dictionary)".into());
            }

            // 통계 백엔드는 포함되지 않음: 사전에 없는 단어는 예측기 사용 불가 오류
            let cascade = AccentCascade::from_config(&accent_config, UnavailableOracle)?;
            let reader = BufReader::new(File::open(&input)?);
            let writer = BufWriter::new(File::create(&output)?);
            let count = accent_words(&cascade, reader, writer)?;
            println!("{}개 단어", count);
        }
        Command::Vocab { input, output } => {
            let content = std::fs::read_to_string(&input)?;
            // TSV면 두 번째 열, 아니면 줄 전체
            let words: Vec<&str> = content
                .lines()
                .filter_map(|line| {
                    let mut fields = line.split_whitespace();
                    let first = fields.next()?;
                    Some(fields.next().unwrap_or(first))
                })
                .collect();
            let vocab = Vocabulary::build(words);
            let path = output
                .or_else(|| config.vocab_path.clone())
                .ok_or("출력 경로가 지정되지 않았습니다")?;
            vocab.save(&path)?;
            println!("{} ({}자)", path, vocab.len());
        }
        Command::Validate { input } => {
            let report = validate_civic(BufReader::new(File::open(&input)?))?;
            for word in &report.anomalies {
                println!("{}", word);
            }
            println!("전체 {}, 비정상 {:?}", report.total, report.by_accent_count);
        }
        Command::Numeral {
            value,
            old,
            no_titlo,
        } => {
            let dialect = if old { Dialect::Old } else { Dialect::Standard };
            match value.parse::<i64>() {
                Ok(number) => {
                    let style = NumeralStyle {
                        titlo: !no_titlo,
                        dialect,
                    };
                    println!("{}", format_numeral(number, style));
                }
                Err(_) => println!("{}", parse_numeral(&value)?),
            }
        }
    }
    Ok(())
}
