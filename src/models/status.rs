use serde::{Deserialize, Serialize};

/// Workflow state shared by tasks and projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    #[serde(alias = "todo", alias = "대기중", alias = "할 일")]
    Pending,
    #[serde(alias = "in_progress", alias = "진행중", alias = "진행 중")]
    InProgress,
    #[serde(alias = "completed", alias = "완료")]
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "pending" | "todo" | "대기중" | "할 일" => Some(Self::Pending),
            "in-progress" | "in_progress" | "진행중" | "진행 중" => Some(Self::InProgress),
            "done" | "completed" | "완료" => Some(Self::Done),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[serde(alias = "낮음")]
    Low,
    #[default]
    #[serde(alias = "중간", alias = "보통")]
    Medium,
    #[serde(alias = "높음")]
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "low" | "낮음" => Some(Self::Low),
            "medium" | "중간" | "보통" => Some(Self::Medium),
            "high" | "높음" => Some(Self::High),
            _ => None,
        }
    }

    /// Sort rank: high sorts before medium, medium before low.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}
