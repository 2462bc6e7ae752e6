use chrono::{Duration, Utc};
use crate::domains::notifications::models::{
    Notification, NotificationActionResponse, NotificationListQuery, RecentEvent, RecentQuery,
};
use crate::shared::database::{Database, NotificationRepository};
use crate::shared::errors::NotificationError;

/// 알림 조회/읽음 처리
/// Notifications are written by the swap flows; this service only reads and updates them
#[derive(Clone)]
pub struct NotificationService {
    db: Database,
}

impl NotificationService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> NotificationRepository {
        NotificationRepository::new(self.db.pool().clone())
    }

    pub async fn list(&self, user_id: u64, query: &NotificationListQuery) -> Result<Vec<Notification>, NotificationError> {
        self.repo()
            .list(user_id, query.limit(), query.unread_only.unwrap_or(false))
            .await
            .map_err(|e| NotificationError::DatabaseError(format!("Failed to list notifications: {}", e)))
    }

    /// 최근 N분 이벤트 (폴링용)
    pub async fn recent(&self, user_id: u64, query: &RecentQuery) -> Result<Vec<RecentEvent>, NotificationError> {
        let since = Utc::now() - Duration::minutes(query.since_minutes());

        let notifications = self
            .repo()
            .list_since(user_id, since)
            .await
            .map_err(|e| NotificationError::DatabaseError(format!("Failed to list recent events: {}", e)))?;

        Ok(notifications.into_iter().map(RecentEvent::from).collect())
    }

    pub async fn unread_count(&self, user_id: u64) -> Result<i64, NotificationError> {
        self.repo()
            .unread_count(user_id)
            .await
            .map_err(|e| NotificationError::DatabaseError(format!("Failed to count notifications: {}", e)))
    }

    pub async fn mark_read(&self, user_id: u64, id: u64) -> Result<NotificationActionResponse, NotificationError> {
        let updated = self
            .repo()
            .mark_read(id, user_id)
            .await
            .map_err(|e| NotificationError::DatabaseError(format!("Failed to mark notification read: {}", e)))?;

        if !updated {
            return Err(NotificationError::NotFound { id });
        }

        Ok(NotificationActionResponse {
            success: true,
            message: "Notification marked as read".to_string(),
        })
    }

    pub async fn mark_all_read(&self, user_id: u64) -> Result<NotificationActionResponse, NotificationError> {
        let count = self
            .repo()
            .mark_all_read(user_id)
            .await
            .map_err(|e| NotificationError::DatabaseError(format!("Failed to mark notifications read: {}", e)))?;

        tracing::debug!(user_id, count, "notifications marked as read");

        Ok(NotificationActionResponse {
            success: true,
            message: format!("{} notification(s) marked as read", count),
        })
    }

    pub async fn delete(&self, user_id: u64, id: u64) -> Result<NotificationActionResponse, NotificationError> {
        let deleted = self
            .repo()
            .delete(id, user_id)
            .await
            .map_err(|e| NotificationError::DatabaseError(format!("Failed to delete notification: {}", e)))?;

        if !deleted {
            return Err(NotificationError::NotFound { id });
        }

        Ok(NotificationActionResponse {
            success: true,
            message: "Notification deleted".to_string(),
        })
    }
}
