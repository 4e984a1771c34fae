use serde::{de::IgnoredAny, Deserialize};
use shared::error::{AppError, AppResult};

use super::{BookFormat, ReadingStatus};

/// A numeric field as clients send it: a JSON number, text, or any other
/// JSON value, which never reads as a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumber {
    /// Strict reading: blank or non-numeric text and non-finite values yield `None`.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => s.trim().parse().ok()?,
            RawNumber::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Loose reading used on creation and progress updates: anything that
    /// is not a number counts as 0.
    pub fn loosely(&self) -> f64 {
        self.parse().unwrap_or(0.0)
    }

    /// Strict reading as a page count; fractional values are rejected.
    pub fn to_count(&self) -> Option<i32> {
        let value = self.parse()?;
        let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
        (value.fract() == 0.0 && in_range).then_some(value as i32)
    }
}

impl From<i32> for RawNumber {
    fn from(value: i32) -> Self {
        RawNumber::Number(f64::from(value))
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(value: String) -> Self {
        RawNumber::Text(value)
    }
}

// 小数部は切り捨てる。範囲外の値は i32 の上下限に丸められる
pub fn coerce_count(raw: Option<&RawNumber>) -> i32 {
    raw.map(RawNumber::loosely).unwrap_or(0.0).trunc() as i32
}

pub fn coerce_amount(raw: Option<&RawNumber>) -> f64 {
    raw.map(RawNumber::loosely).unwrap_or(0.0)
}

pub fn parse_status(raw: &str) -> AppResult<ReadingStatus> {
    raw.parse()
        .map_err(|_| AppError::InvalidValue(format!("`{raw}` is not a valid status")))
}

pub fn parse_format(raw: &str) -> AppResult<BookFormat> {
    raw.parse()
        .map_err(|_| AppError::InvalidValue(format!("`{raw}` is not a valid format")))
}

/// Partial creation payload. Every field may be missing.
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<RawNumber>,
    pub pages_read: Option<RawNumber>,
    pub status: Option<String>,
    pub price: Option<RawNumber>,
    pub format: Option<String>,
    pub suggested_by: Option<String>,
}

/// Changes accepted on the field-update path. `pages_read` is deliberately
/// absent: progress only moves through `progress::apply_progress`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFieldUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<i32>,
    pub status: Option<ReadingStatus>,
    pub price: Option<f64>,
    pub format: Option<BookFormat>,
    pub suggested_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RawNumber::Number(12.0), 12)]
    #[case(RawNumber::Number(12.9), 12)]
    #[case(RawNumber::Number(-5.0), -5)]
    #[case("42".into(), 42)]
    #[case(" 42 ".into(), 42)]
    #[case("".into(), 0)]
    #[case("   ".into(), 0)]
    #[case("forty".into(), 0)]
    #[case("-3".into(), -3)]
    #[case("NaN".into(), 0)]
    #[case("inf".into(), 0)]
    fn coerce_count_loosely(#[case] raw: RawNumber, #[case] expected: i32) {
        assert_eq!(coerce_count(Some(&raw)), expected);
    }

    #[test]
    fn missing_number_is_zero() {
        assert_eq!(coerce_count(None), 0);
        assert_eq!(coerce_amount(None), 0.0);
    }

    #[rstest]
    #[case(RawNumber::Number(300.0), Some(300))]
    #[case("300".into(), Some(300))]
    #[case(RawNumber::Number(12.5), None)]
    #[case("".into(), None)]
    #[case("abc".into(), None)]
    #[case(RawNumber::Number(1e12), None)]
    fn strict_count(#[case] raw: RawNumber, #[case] expected: Option<i32>) {
        assert_eq!(raw.to_count(), expected);
    }

    #[test]
    fn deserialize_number_or_text() {
        let number: RawNumber = serde_json::from_str("412").unwrap();
        assert_eq!(number, RawNumber::Number(412.0));
        let text: RawNumber = serde_json::from_str("\"412\"").unwrap();
        assert_eq!(text, RawNumber::Text("412".into()));
    }

    #[rstest]
    #[case("true")]
    #[case("[5]")]
    #[case("{}")]
    fn other_json_values_never_read_as_numbers(#[case] json: &str) {
        let raw: RawNumber = serde_json::from_str(json).unwrap();
        assert_eq!(raw, RawNumber::Other(IgnoredAny));
        assert_eq!(raw.parse(), None);
        assert_eq!(raw.to_count(), None);
        assert_eq!(coerce_count(Some(&raw)), 0);
    }

    #[test]
    fn reject_unknown_enum_text() {
        assert_eq!(parse_status("DNF").unwrap(), ReadingStatus::DidNotFinish);
        assert!(matches!(
            parse_status("Abandoned"),
            Err(AppError::InvalidValue(_))
        ));
        assert_eq!(parse_format("Ebook").unwrap(), BookFormat::Ebook);
        assert!(matches!(parse_format("Scroll"), Err(AppError::InvalidValue(_))));
    }
}
