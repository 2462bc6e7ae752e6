use std::sync::Arc;
use crate::config::Config;
use crate::shared::clients::{ImageStore, LogMailer, Mailer};
use crate::shared::database::Database;
use crate::domains::auth::services::{AuthState, JwtService};
use crate::domains::users::services::UserState;
use crate::domains::items::services::{ItemState, LockExpiryScheduler};
use crate::domains::swaps::services::SwapState;
use crate::domains::credits::services::CreditState;
use crate::domains::notifications::services::NotificationState;
use crate::domains::ratings::services::RatingState;
use crate::domains::support::services::SupportState;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 각 도메인의 State를 조합하여 전체 애플리케이션 상태를 관리
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    /// Database connection (shared)
    pub db: Database,
    pub config: Arc<Config>,
    pub auth_state: AuthState,
    pub user_state: UserState,
    pub item_state: ItemState,
    pub swap_state: SwapState,
    pub credit_state: CreditState,
    pub notification_state: NotificationState,
    pub rating_state: RatingState,
    pub support_state: SupportState,
    /// 만료 잠금 정리 스케줄러
    /// Expired item lock sweeper
    pub lock_scheduler: LockExpiryScheduler,
}

impl AppState {
    /// Create AppState with the default (logging) mailer
    pub fn new(db: Database, config: &Config) -> Self {
        Self::with_mailer(db, config, Arc::new(LogMailer))
    }

    /// 모든 도메인 State를 초기화하고 조합
    /// Build every domain state around one shared mail transport
    pub fn with_mailer(db: Database, config: &Config, mailer: Arc<dyn Mailer>) -> Self {
        // 1. 공유 서비스 생성 (JWT, 이미지 저장소)
        let jwt_service = JwtService::new(&config.jwt_secret, config.access_token_hours);
        let images = ImageStore::new(config.upload_dir.clone(), config.public_url.clone());

        // 2. 각 도메인 State 생성
        let auth_state = AuthState::new(db.clone(), jwt_service, mailer.clone(), config);
        let user_state = UserState::new(db.clone(), images.clone());
        let item_state = ItemState::new(db.clone(), images);
        let swap_state = SwapState::new(db.clone());
        let credit_state = CreditState::new(db.clone());
        let notification_state = NotificationState::new(db.clone());
        let rating_state = RatingState::new(db.clone());
        let support_state = SupportState::new(db.clone(), mailer, config.admin_email.clone());

        let lock_scheduler = LockExpiryScheduler::new(
            db.clone(),
            item_state.item_service.clone(),
            config.lock_sweep_secs,
        );

        // 3. AppState 조합
        Self {
            db,
            config: Arc::new(config.clone()),
            auth_state,
            user_state,
            item_state,
            swap_state,
            credit_state,
            notification_state,
            rating_state,
            support_state,
            lock_scheduler,
        }
    }

    /// 잠금 정리 스케줄러 시작 (주기가 0이면 시작하지 않음)
    /// Start the lock sweeper unless it is disabled in config
    pub fn start_lock_scheduler(&self) -> Option<tokio::task::JoinHandle<()>> {
        if self.config.lock_sweep_secs == 0 {
            tracing::info!("lock expiry scheduler disabled");
            return None;
        }
        Some(self.lock_scheduler.start())
    }
}
