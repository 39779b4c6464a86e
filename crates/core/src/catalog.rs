//! Batch, lecture and timetable vocabulary and validation.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a batch. Only drives the badge colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Ongoing,
    Upcoming,
    Completed,
}

impl BatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BatchStatus::Ongoing => "ongoing",
            BatchStatus::Upcoming => "upcoming",
            BatchStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "ongoing" => Ok(BatchStatus::Ongoing),
            "upcoming" => Ok(BatchStatus::Upcoming),
            "completed" => Ok(BatchStatus::Completed),
            other => Err(format!(
                "Unknown batch status '{other}'. Expected ongoing, upcoming or completed"
            )),
        }
    }

    pub fn badge_color(self) -> &'static str {
        match self {
            BatchStatus::Ongoing => "green",
            BatchStatus::Upcoming => "blue",
            BatchStatus::Completed => "gray",
        }
    }
}

/// How a lecture's video is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    Live,
    Recorded,
}

impl VideoType {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoType::Live => "live",
            VideoType::Recorded => "recorded",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "live" => Ok(VideoType::Live),
            "recorded" => Ok(VideoType::Recorded),
            other => Err(format!(
                "Unknown video type '{other}'. Expected live or recorded"
            )),
        }
    }
}

/// Timetable days run Sunday (0) through Saturday (6).
pub fn validate_day_of_week(day: i16) -> Result<(), String> {
    if !(0..=6).contains(&day) {
        return Err(format!("day_of_week must be between 0 and 6, got {day}"));
    }
    Ok(())
}

/// A timetable slot must end after it starts.
pub fn validate_time_range(start: NaiveTime, end: NaiveTime) -> Result<(), String> {
    if end <= start {
        return Err("end_time must be later than start_time".to_string());
    }
    Ok(())
}
