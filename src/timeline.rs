use crate::calendar::YearMonth;
use crate::models::MoodRecord;
use crate::store::MoodStore;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// e.g. `Monday, January 15`
    pub day_label: String,
    #[serde(flatten)]
    pub record: MoodRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGroup {
    pub month: YearMonth,
    pub label: String,
    pub entries: Vec<TimelineEntry>,
}

pub fn build_timeline(store: &MoodStore) -> Vec<MonthGroup> {
    group_by_month(store.list())
}

/// Buckets records by calendar month. Buckets appear in the order their month
/// is first seen and each keeps the input order of its records, so a
/// most-recent-first input yields most-recent-first groups.
pub fn group_by_month(records: impl IntoIterator<Item = MoodRecord>) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    let mut index: HashMap<YearMonth, usize> = HashMap::new();

    for record in records {
        let month = YearMonth::containing(record.date);
        let slot = *index.entry(month).or_insert_with(|| {
            groups.push(MonthGroup {
                month,
                label: month.label(),
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].entries.push(TimelineEntry {
            day_label: record.date.format("%A, %B %-d").to_string(),
            record,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateKey, MoodLevel};
    use chrono::NaiveDate;

    fn record(date: &str, mood: MoodLevel) -> MoodRecord {
        MoodRecord {
            date: DateKey::parse(date).unwrap().date(),
            mood,
            note: String::new(),
            created_at: 0,
        }
    }

    fn dates(group: &MonthGroup) -> Vec<String> {
        group
            .entries
            .iter()
            .map(|entry| entry.record.key().to_string())
            .collect()
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_month(Vec::new()).is_empty());
        assert!(build_timeline(&MoodStore::in_memory()).is_empty());
    }

    #[tokio::test]
    async fn interleaved_months_form_two_recency_ordered_groups() {
        let mut store = MoodStore::in_memory();
        for date in ["2024-01-15", "2024-02-03", "2024-01-02"] {
            store
                .upsert(DateKey::parse(date).unwrap(), MoodLevel::Okay, None)
                .await;
        }

        let groups = build_timeline(&store);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "February 2024");
        assert_eq!(dates(&groups[0]), vec!["2024-02-03"]);
        assert_eq!(groups[1].label, "January 2024");
        assert_eq!(dates(&groups[1]), vec!["2024-01-15", "2024-01-02"]);
    }

    #[test]
    fn membership_depends_on_date_not_position() {
        let groups = group_by_month(vec![
            record("2024-01-15", MoodLevel::Good),
            record("2024-02-03", MoodLevel::Bad),
            record("2024-01-02", MoodLevel::Great),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].month, YearMonth::new(2024, 1).unwrap());
        assert_eq!(dates(&groups[0]), vec!["2024-01-15", "2024-01-02"]);
        let total: usize = groups.iter().map(|group| group.entries.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn same_month_in_different_years_stays_apart() {
        let groups = group_by_month(vec![
            record("2024-03-01", MoodLevel::Good),
            record("2023-03-01", MoodLevel::Good),
        ]);
        let labels: Vec<&str> = groups.iter().map(|group| group.label.as_str()).collect();
        assert_eq!(labels, vec!["March 2024", "March 2023"]);
    }

    #[test]
    fn entry_wire_names_are_camel_case() {
        let groups = group_by_month(vec![record("2024-01-15", MoodLevel::Good)]);
        let value = serde_json::to_value(&groups[0].entries[0]).unwrap();
        assert_eq!(value["dayLabel"], "Monday, January 15");
        assert_eq!(value["createdAt"], 0);
        assert!(value.get("day_label").is_none());
    }

    #[test]
    fn entries_carry_weekday_labels() {
        let groups = group_by_month(vec![record("2024-01-15", MoodLevel::Good)]);
        assert_eq!(groups[0].entries[0].day_label, "Monday, January 15");
        assert_eq!(
            groups[0].entries[0].record.date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }
}
