//! 파일 기반 가격 이력 제공자.
//!
//! 지원 형식:
//! - CSV: 헤더 `date,open,high,low,close,volume`
//! - JSON: `PriceBar` 배열
//!
//! 경로가 파일이면 종목과 무관하게 그 파일을 읽고, 디렉토리이면
//! `<SYMBOL>.csv` 또는 `<SYMBOL>.json`을 찾습니다.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use scorer_core::{PriceBar, PriceHistoryProvider, PriceSeries, ScorerError, ScorerResult};

/// CSV 한 행.
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Decimal,
}

/// 날짜 문자열 파싱 (YYYY-MM-DD, 뒤에 시각이 붙어 있으면 무시)
pub fn parse_date(s: &str) -> ScorerResult<NaiveDate> {
    let trimmed = s.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| {
        ScorerError::InvalidInput(format!("잘못된 날짜 형식: {} ({})", s, e))
    })
}

/// CSV 파일에서 일봉 시퀀스를 읽습니다.
pub fn read_csv(path: &Path) -> ScorerResult<PriceSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ScorerError::Data(format!("CSV 파일 열기 실패 {}: {}", path.display(), e)))?;

    let mut bars = Vec::new();
    for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(|e| {
            ScorerError::Data(format!("CSV {}행 파싱 실패: {}", line + 2, e))
        })?;
        bars.push(PriceBar::new(
            parse_date(&row.date)?,
            row.open,
            row.high,
            row.low,
            row.close,
            row.volume,
        ));
    }

    PriceSeries::new(bars)
}

/// JSON 파일에서 일봉 시퀀스를 읽습니다.
pub fn read_json(path: &Path) -> ScorerResult<PriceSeries> {
    let file = File::open(path)?;
    let bars: Vec<PriceBar> = serde_json::from_reader(std::io::BufReader::new(file))?;
    PriceSeries::new(bars)
}

/// 확장자로 형식을 판단해 일봉 시퀀스를 읽습니다.
///
/// # 에러
///
/// 지원하지 않는 확장자, 파일 읽기 실패, 형식 오류, 날짜 역순
pub fn read_price_file(path: &Path) -> ScorerResult<PriceSeries> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let series = match extension.as_deref() {
        Some("csv") => read_csv(path)?,
        Some("json") => read_json(path)?,
        _ => {
            return Err(ScorerError::InvalidInput(format!(
                "지원하지 않는 파일 형식: {} (csv, json만 지원)",
                path.display()
            )))
        }
    };

    info!("Loaded {} bars from {}", series.len(), path.display());
    Ok(series)
}

/// 파일 또는 디렉토리에서 일봉 이력을 읽는 제공자.
#[derive(Debug, Clone)]
pub struct FileHistoryProvider {
    path: PathBuf,
}

impl FileHistoryProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 종목에 해당하는 파일 경로를 찾습니다.
    fn resolve(&self, symbol: &str) -> Option<PathBuf> {
        if self.path.is_file() {
            return Some(self.path.clone());
        }
        if !self.path.is_dir() {
            return None;
        }

        let upper = symbol.to_uppercase();
        [upper.as_str(), symbol]
            .iter()
            .flat_map(|name| ["csv", "json"].map(|ext| self.path.join(format!("{}.{}", name, ext))))
            .find(|candidate| candidate.is_file())
    }
}

impl PriceHistoryProvider for FileHistoryProvider {
    fn fetch_history(&self, symbol: &str, lookback_days: u32) -> ScorerResult<Option<PriceSeries>> {
        let Some(path) = self.resolve(symbol) else {
            debug!(symbol, path = %self.path.display(), "No price history file found");
            return Ok(None);
        };
        let series = read_price_file(&path)?;
        Ok(Some(series.last_days(lookback_days)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    const CSV: &str = "date,open,high,low,close,volume\n\
        2024-01-02,100,102,99,101,1000\n\
        2024-01-03 00:00:00,101,103,100,102.5,1200\n\
        2024-01-04,102.5,104,101,103,900\n";

    #[test]
    fn test_parse_date_accepts_datetime_suffix() {
        assert_eq!(
            parse_date("2024-03-15 09:00:00").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert!(parse_date("15/03/2024").is_err());
    }

    #[test]
    fn test_read_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("VCB.csv");
        std::fs::write(&path, CSV).unwrap();

        let series = read_price_file(&path).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.bars()[1].close, dec!(102.5));
    }

    #[test]
    fn test_read_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bars.json");
        std::fs::write(
            &path,
            r#"[
                {"date":"2024-01-02","open":"100","high":"102","low":"99","close":"101","volume":"1000"},
                {"date":"2024-01-03","open":101,"high":103,"low":100,"close":102,"volume":1200}
            ]"#,
        )
        .unwrap();

        let series = read_price_file(&path).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest().unwrap().close, dec!(102));
    }

    #[test]
    fn test_unordered_csv_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(
            &path,
            "date,open,high,low,close,volume\n2024-01-03,1,1,1,1,1\n2024-01-02,1,1,1,1,1\n",
        )
        .unwrap();

        let err = read_price_file(&path).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_price_file(Path::new("prices.xlsx")).unwrap_err();
        assert!(matches!(err, ScorerError::InvalidInput(_)));
    }

    #[test]
    fn test_directory_provider_looks_up_symbol() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("FPT.csv"), CSV).unwrap();
        let provider = FileHistoryProvider::new(dir.path());

        let series = provider.fetch_history("fpt", 90).unwrap().unwrap();
        assert_eq!(series.len(), 3);
        assert!(provider.fetch_history("HPG", 90).unwrap().is_none());
    }
}
