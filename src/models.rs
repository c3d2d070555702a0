use crate::errors::MoodError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// The five mood levels, declared worst to best so the derived ordering
/// matches severity (`Terrible < Bad < Okay < Good < Great`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLevel {
    Terrible,
    Bad,
    Okay,
    Good,
    Great,
}

impl MoodLevel {
    /// Display order, best first.
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::Great,
        MoodLevel::Good,
        MoodLevel::Okay,
        MoodLevel::Bad,
        MoodLevel::Terrible,
    ];

    /// Fixed ordinal used by the month series: great=5 .. terrible=1.
    pub fn score(self) -> u8 {
        match self {
            MoodLevel::Great => 5,
            MoodLevel::Good => 4,
            MoodLevel::Okay => 3,
            MoodLevel::Bad => 2,
            MoodLevel::Terrible => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodLevel::Great => "great",
            MoodLevel::Good => "good",
            MoodLevel::Okay => "okay",
            MoodLevel::Bad => "bad",
            MoodLevel::Terrible => "terrible",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodLevel::Great => "😄",
            MoodLevel::Good => "🙂",
            MoodLevel::Okay => "😐",
            MoodLevel::Bad => "😔",
            MoodLevel::Terrible => "😢",
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, MoodLevel::Great | MoodLevel::Good)
    }

    pub fn is_negative(self) -> bool {
        matches!(self, MoodLevel::Bad | MoodLevel::Terrible)
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MoodLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == value.trim())
            .ok_or_else(|| format!("unknown mood '{value}'"))
    }
}

/// A validated calendar day in canonical `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Accepts only strings that round-trip through the canonical format,
    /// so `2024-1-5` and `2024-02-30` are both rejected.
    pub fn parse(value: &str) -> Result<Self, MoodError> {
        let invalid = || MoodError::InvalidDateKey {
            value: value.to_string(),
        };
        let date = NaiveDate::parse_from_str(value, DATE_KEY_FORMAT).map_err(|_| invalid())?;
        if date.format(DATE_KEY_FORMAT).to_string() != value {
            return Err(invalid());
        }
        Ok(Self(date))
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

/// One mood observation. At most one exists per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodRecord {
    pub date: NaiveDate,
    pub mood: MoodLevel,
    #[serde(default)]
    pub note: String,
    /// Milliseconds since the Unix epoch of the last write. Display only.
    pub created_at: i64,
}

impl MoodRecord {
    pub fn key(&self) -> DateKey {
        DateKey(self.date)
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveMoodRequest {
    pub date: Option<String>,
    /// Parsed with [`MoodLevel::from_str`] in the handler.
    pub mood: String,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptQuery {
    pub mood: Option<MoodLevel>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub entry: Option<MoodRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub entries: usize,
    pub hydration_warning: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoodCardResponse {
    pub date: String,
    pub mood: MoodLevel,
    pub emoji: String,
    pub caption: String,
    pub tags: Vec<String>,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_key_accepts_canonical_form() {
        let key = DateKey::parse("2024-02-29").expect("leap day");
        assert_eq!(key.to_string(), "2024-02-29");
        assert_eq!(key.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn date_key_rejects_non_canonical_input() {
        for raw in ["2024-1-05", "2023-02-29", "20240105", "2024-01-05T00:00", "", "today"] {
            assert!(
                matches!(DateKey::parse(raw), Err(MoodError::InvalidDateKey { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn mood_levels_order_by_severity() {
        assert!(MoodLevel::Great > MoodLevel::Good);
        assert!(MoodLevel::Bad > MoodLevel::Terrible);
        let scores: Vec<u8> = MoodLevel::ALL.iter().map(|level| level.score()).collect();
        assert_eq!(scores, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn mood_record_uses_camel_case_wire_names() {
        let record = MoodRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            mood: MoodLevel::Okay,
            note: "fine".into(),
            created_at: 1_705_312_800_000,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["mood"], "okay");
        assert_eq!(value["createdAt"], 1_705_312_800_000i64);
    }

    #[test]
    fn missing_note_defaults_to_empty() {
        let record: MoodRecord =
            serde_json::from_str(r#"{"date":"2024-01-15","mood":"bad","createdAt":1}"#).unwrap();
        assert_eq!(record.note, "");
        assert_eq!("bad".parse::<MoodLevel>().unwrap(), record.mood);
    }

    #[test]
    fn unknown_mood_name_is_rejected() {
        assert_eq!(" great ".parse::<MoodLevel>(), Ok(MoodLevel::Great));
        let err = "ecstatic".parse::<MoodLevel>().unwrap_err();
        assert!(err.contains("ecstatic"));
    }
}
