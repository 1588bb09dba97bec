/// Flight number as reported by the launches API.
pub type LaunchId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchStatus {
    Upcoming,
    Success,
    Failed,
}

impl LaunchStatus {
    /// Derive the status from the raw API flags.
    ///
    /// `upcoming` wins over everything; otherwise only an explicit
    /// `launch_success: true` counts as a success. A missing success flag on
    /// a past launch is reported as failed.
    pub fn from_flags(upcoming: bool, launch_success: Option<bool>) -> Self {
        if upcoming {
            LaunchStatus::Upcoming
        } else if launch_success == Some(true) {
            LaunchStatus::Success
        } else {
            LaunchStatus::Failed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LaunchStatus::Upcoming => "upcoming",
            LaunchStatus::Success => "success",
            LaunchStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSummary {
    pub id: LaunchId,
    pub name: String,
    pub status: LaunchStatus,
}

impl LaunchSummary {
    pub fn new(id: LaunchId, name: impl Into<String>, status: LaunchStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
        }
    }

    /// Build a summary from the fields of a raw launch record.
    pub fn from_record(
        flight_number: LaunchId,
        mission_name: impl Into<String>,
        upcoming: bool,
        launch_success: Option<bool>,
    ) -> Self {
        Self::new(
            flight_number,
            mission_name,
            LaunchStatus::from_flags(upcoming, launch_success),
        )
    }

    /// Case-insensitive substring match against the mission name.
    pub(crate) fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}

/// Extra fields revealed when a launch is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchDetail {
    pub launch_date_unix: Option<i64>,
    pub details: Option<String>,
    pub article_link: Option<String>,
    pub video_link: Option<String>,
    pub mission_patch: Option<String>,
}
