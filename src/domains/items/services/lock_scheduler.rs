use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::{interval, Duration};
use crate::domains::items::services::ItemService;
use crate::shared::database::{Database, RefreshTokenRepository};

/// 만료 잠금 정리 스케줄러
/// Lock Expiry Scheduler
///
/// 역할:
/// - 주기적으로 locked_until 이 지난 아이템을 available 로 되돌림
/// - 만료/무효화된 refresh token 삭제
/// - enable/disable 로 실행 여부 제어
#[derive(Clone)]
pub struct LockExpiryScheduler {
    db: Database,
    item_service: ItemService,
    period: Duration,
    enabled: Arc<AtomicBool>,
}

impl LockExpiryScheduler {
    pub fn new(db: Database, item_service: ItemService, period_secs: u64) -> Self {
        Self {
            db,
            item_service,
            period: Duration::from_secs(period_secs.max(1)),
            enabled: Arc::new(AtomicBool::new(period_secs > 0)),
        }
    }

    /// 스케줄러 시작 (백그라운드 태스크)
    /// Start the background sweep
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        let scheduler = self.clone();

        tokio::spawn(async move {
            let mut ticker = interval(scheduler.period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::info!(period_secs = scheduler.period.as_secs(), "lock expiry scheduler started");

            loop {
                ticker.tick().await;

                if !scheduler.is_enabled() {
                    continue;
                }
                scheduler.sweep().await;
            }
        })
    }

    /// 한 번 정리 실행, 해제된 아이템 수 반환
    pub async fn sweep(&self) -> u64 {
        let released = match self.item_service.release_expired_locks().await {
            Ok(released) => {
                if released > 0 {
                    tracing::info!(released, "expired item locks released");
                }
                released
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to release expired item locks");
                0
            }
        };

        match RefreshTokenRepository::new(self.db.pool().clone()).delete_stale().await {
            Ok(purged) if purged > 0 => tracing::debug!(purged, "stale refresh tokens purged"),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "failed to purge stale refresh tokens"),
        }

        released
    }

    /// 스케줄러 활성화
    /// Enable scheduler
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// 스케줄러 비활성화
    /// Disable scheduler
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::clients::ImageStore;

    fn scheduler(period_secs: u64) -> LockExpiryScheduler {
        let db = Database::lazy("postgresql://nobody@127.0.0.1:1/none").unwrap();
        let items = ItemService::new(db.clone(), ImageStore::new("./uploads", "http://localhost:8000"));
        LockExpiryScheduler::new(db, items, period_secs)
    }

    #[tokio::test]
    async fn zero_period_starts_disabled() {
        let sweeper = scheduler(0);
        assert!(!sweeper.is_enabled());
        assert_eq!(sweeper.period, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn enable_flag_is_shared_between_clones() {
        let sweeper = scheduler(300);
        let clone = sweeper.clone();
        assert!(clone.is_enabled());

        sweeper.disable();
        assert!(!clone.is_enabled());
        sweeper.enable();
        assert!(clone.is_enabled());
    }
}
