use crate::calendar::YearMonth;
use crate::models::MoodLevel;
use crate::store::MoodStore;
use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;

/// Days examined by [`streak_at`], counting today. A run through today caps at
/// this value; a run ending yesterday caps one lower.
pub const STREAK_HORIZON_DAYS: u32 = 100;

/// Per-level counts. All five levels are always counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodDistribution {
    counts: [u32; 5],
}

impl MoodDistribution {
    pub fn count(&self, mood: MoodLevel) -> u32 {
        self.counts[slot(mood)]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    fn add(&mut self, mood: MoodLevel) {
        self.counts[slot(mood)] += 1;
    }

    /// Non-zero levels only, best first, for charting.
    pub fn points(&self) -> Vec<DistributionPoint> {
        MoodLevel::ALL
            .into_iter()
            .map(|mood| DistributionPoint {
                mood,
                count: self.count(mood),
            })
            .filter(|point| point.count > 0)
            .collect()
    }
}

fn slot(mood: MoodLevel) -> usize {
    usize::from(mood.score() - 1)
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DistributionPoint {
    pub mood: MoodLevel,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// Two-digit day of month.
    pub day: String,
    pub mood: Option<MoodLevel>,
    /// `great=5 .. terrible=1`, `0` when the day has no record.
    pub value: u8,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub month: YearMonth,
    pub label: String,
    pub total: u32,
    pub distribution: Vec<DistributionPoint>,
    pub month_series: Vec<SeriesPoint>,
    pub streak: u32,
    pub streak_caption: String,
    pub insights: Vec<String>,
}

pub fn distribution(store: &MoodStore) -> MoodDistribution {
    let mut dist = MoodDistribution::default();
    for record in store.list() {
        dist.add(record.mood);
    }
    dist
}

pub fn month_series(store: &MoodStore, month: YearMonth) -> Vec<SeriesPoint> {
    month
        .days()
        .map(|date| {
            let mood = store.get(date.into()).map(|record| record.mood);
            SeriesPoint {
                date,
                day: date.format("%d").to_string(),
                mood,
                value: mood.map_or(0, MoodLevel::score),
            }
        })
        .collect()
}

pub fn streak(store: &MoodStore) -> u32 {
    streak_at(Local::now().date_naive(), store)
}

/// Consecutive recorded days walking back from `today`. A missing record on
/// `today` itself does not end the walk; the first gap after that does.
pub fn streak_at(today: NaiveDate, store: &MoodStore) -> u32 {
    let mut streak = 0;
    for offset in 0..STREAK_HORIZON_DAYS {
        let date = today - Duration::days(i64::from(offset));
        if store.contains(date) {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }
    streak
}

pub fn streak_caption(streak: u32) -> String {
    match streak {
        0 => "Start your streak today!".to_string(),
        1 => "First day - keep going!".to_string(),
        n => format!("{n} days in a row!"),
    }
}

pub fn insights(dist: &MoodDistribution, streak: u32) -> Vec<String> {
    let total = dist.total();
    let mut lines = Vec::with_capacity(2);

    let positive: u32 = MoodLevel::ALL
        .into_iter()
        .filter(|mood| mood.is_positive())
        .map(|mood| dist.count(mood))
        .sum();
    let negative: u32 = MoodLevel::ALL
        .into_iter()
        .filter(|mood| mood.is_negative())
        .map(|mood| dist.count(mood))
        .sum();

    lines.push(
        if total == 0 {
            "Start tracking your moods to get personalized insights!"
        } else if total < 5 {
            "Keep logging your moods daily to unlock more insights!"
        } else if positive > negative {
            "You've been feeling mostly positive lately. That's great!"
        } else {
            "You've had some tough days recently. Remember to practice self-care."
        }
        .to_string(),
    );

    if total > 7 {
        lines.push(if streak > 3 {
            format!("Amazing job! You've maintained a {streak}-day tracking streak!")
        } else {
            "Try to log your mood daily to build a consistent tracking habit.".to_string()
        });
    }

    lines
}

pub fn build_stats(store: &MoodStore, month: YearMonth) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), store, month)
}

pub fn build_stats_at(today: NaiveDate, store: &MoodStore, month: YearMonth) -> StatsResponse {
    let dist = distribution(store);
    let streak = streak_at(today, store);

    StatsResponse {
        month,
        label: month.label(),
        total: dist.total(),
        distribution: dist.points(),
        month_series: month_series(store, month),
        streak,
        streak_caption: streak_caption(streak),
        insights: insights(&dist, streak),
    }
}
