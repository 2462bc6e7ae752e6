use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// 알림 이벤트 종류
/// Swap events that produce a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    NewRequest,
    Approved,
    Rejected,
    RequestCancelled,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::NewRequest => "new_request",
            EventType::Approved => "approved",
            EventType::Rejected => "rejected",
            EventType::RequestCancelled => "request_cancelled",
        }
    }

    /// 이벤트별 알림 문구
    /// Message shown to the recipient
    pub fn message(&self, item_title: &str, other_user_name: &str) -> String {
        match self {
            EventType::NewRequest => {
                format!("New swap request for \"{}\" from {}", item_title, other_user_name)
            }
            EventType::Approved => format!("Your swap request for \"{}\" was approved!", item_title),
            EventType::Rejected => format!("Your swap request for \"{}\" was rejected", item_title),
            EventType::RequestCancelled => format!(
                "{} cancelled their swap request for \"{}\"",
                other_user_name, item_title
            ),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_request" => Ok(EventType::NewRequest),
            "approved" => Ok(EventType::Approved),
            "rejected" => Ok(EventType::Rejected),
            "request_cancelled" => Ok(EventType::RequestCancelled),
            other => Err(format!("unknown event type: {}", other)),
        }
    }
}

/// 알림
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = Notification)]
pub struct Notification {
    pub id: u64,
    pub user_id: u64,
    pub event_type: EventType,
    pub request_id: Option<u64>,
    pub item_id: Option<u64>,
    pub message: String,
    pub item_title: String,
    pub other_user_id: Option<u64>,
    pub other_user_name: String,
    /// Swap request status at the time of the event
    pub status: Option<String>,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// 알림 생성 (스왑 흐름 내부에서 사용)
#[derive(Debug, Clone)]
pub struct NotificationCreate {
    pub user_id: u64,
    pub event_type: EventType,
    pub request_id: u64,
    pub item_id: u64,
    pub item_title: String,
    pub other_user_id: u64,
    pub other_user_name: String,
    pub status: String,
    /// 기본 문구 대신 사용할 메시지
    pub message: Option<String>,
}

impl NotificationCreate {
    pub fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.event_type.message(&self.item_title, &self.other_user_name))
    }
}

/// 이전 폴링 클라이언트용 이벤트 형식
/// Event shape used by the polling endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = RecentEvent)]
pub struct RecentEvent {
    pub event_type: EventType,
    pub request_id: Option<u64>,
    pub item_id: Option<u64>,
    pub item_title: String,
    pub timestamp: DateTime<Utc>,
    pub status: Option<String>,
    pub other_user_id: Option<u64>,
    pub other_user_name: String,
    pub read: bool,
    pub notification_id: u64,
}

impl From<Notification> for RecentEvent {
    fn from(n: Notification) -> Self {
        Self {
            event_type: n.event_type,
            request_id: n.request_id,
            item_id: n.item_id,
            item_title: n.item_title,
            timestamp: n.created_at,
            status: n.status,
            other_user_id: n.other_user_id,
            other_user_name: n.other_user_name,
            read: n.read,
            notification_id: n.id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NotificationListQuery {
    pub limit: Option<i64>,
    pub unread_only: Option<bool>,
}

impl NotificationListQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RecentQuery {
    pub since_minutes: Option<i64>,
}

impl RecentQuery {
    pub fn since_minutes(&self) -> i64 {
        self.since_minutes.unwrap_or(5).clamp(1, 60)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = UnreadCountResponse)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = NotificationActionResponse)]
pub struct NotificationActionResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_item_and_counterpart() {
        assert_eq!(
            EventType::NewRequest.message("Denim jacket", "alex"),
            "New swap request for \"Denim jacket\" from alex"
        );
        assert_eq!(
            EventType::Approved.message("Denim jacket", "sam"),
            "Your swap request for \"Denim jacket\" was approved!"
        );
        assert!(EventType::RequestCancelled
            .message("Scarf", "jo")
            .starts_with("jo cancelled"));
    }

    #[test]
    fn query_bounds_are_clamped() {
        assert_eq!(RecentQuery { since_minutes: None }.since_minutes(), 5);
        assert_eq!(RecentQuery { since_minutes: Some(0) }.since_minutes(), 1);
        assert_eq!(RecentQuery { since_minutes: Some(600) }.since_minutes(), 60);
        let q = NotificationListQuery { limit: Some(1000), unread_only: None };
        assert_eq!(q.limit(), 100);
    }
}
