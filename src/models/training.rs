use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;

use super::user::User;

/// Kinds of recorded activity sessions, each with a display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "activity_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityType {
    Running,
    Cycling,
    Walking,
    Swimming,
    Tennis,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Running,
        ActivityType::Cycling,
        ActivityType::Walking,
        ActivityType::Swimming,
        ActivityType::Tennis,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::Cycling => "Cycling",
            ActivityType::Walking => "Walking",
            ActivityType::Swimming => "Swimming",
            ActivityType::Tennis => "Tennis",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One recorded activity session, owned by exactly one user.
///
/// The owner is held by value; a training never exists without one, and many
/// trainings may share the same owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    pub id: Option<i64>,
    pub user: User,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub activity_type: ActivityType,
    pub distance: f64,
    pub average_speed: f64,
}

impl Training {
    pub fn new(
        user: User,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        activity_type: ActivityType,
        distance: f64,
        average_speed: f64,
    ) -> Self {
        Self {
            id: None,
            user,
            start_time,
            end_time,
            activity_type,
            distance,
            average_speed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTraining {
    pub user_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub activity_type: ActivityType,
    pub distance: f64,
    pub average_speed: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTraining {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub activity_type: ActivityType,
    pub distance: f64,
    pub average_speed: f64,
}
