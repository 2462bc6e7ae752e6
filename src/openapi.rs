// OpenAPI 스키마 정의: Swagger 문서 자동 생성
use utoipa::OpenApi;

use crate::domains::auth::models::{
    AuthResponse, LoginRequest, LogoutRequest, MeResponse, MessageResponse, RefreshTokenRequest,
    RefreshTokenResponse, RegisterRequest, UserResponse,
};
use crate::domains::users::models::{
    FavoritesResponse, ProfilePictureUpload, ProfileUpdateRequest, UserListResponse, UserProfile,
    UserSearchResponse, UserSearchResult,
};
use crate::domains::items::models::{
    Item, ItemCreate, ItemImage, ItemImagesUpload, ItemLockResponse, ItemSort, ItemStatus, ItemUpdate,
};
use crate::domains::swaps::models::{
    OwnerRequestView, RequesterRequestView, SwapDecisionResponse, SwapHistoryEntry, SwapHistoryResponse,
    SwapParty, SwapRequest, SwapRequestCreated, SwapRequestsResponse, SwapStatus,
};
use crate::domains::credits::models::{
    CreditAddResponse, CreditAmountRequest, CreditBalanceResponse, CreditDeductResponse,
    CreditTransaction, CreditTransactionsResponse, TransactionType,
};
use crate::domains::notifications::models::{
    EventType, Notification, NotificationActionResponse, RecentEvent, UnreadCountResponse,
};
use crate::domains::ratings::models::{Rating, RatingRequest, RatingStats};
use crate::domains::support::models::{
    ContactKind, ContactRequest, ContactResponse, Report, ReportRequest, ReportResponse, ReportTarget,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::domains::auth::handlers::auth_handler::register,
        crate::domains::auth::handlers::auth_handler::login,
        crate::domains::auth::handlers::auth_handler::refresh,
        crate::domains::auth::handlers::auth_handler::logout,
        crate::domains::auth::handlers::auth_handler::get_me,
        crate::domains::auth::handlers::auth_handler::verify_email,
        crate::domains::users::handlers::user_handler::list_users,
        crate::domains::users::handlers::user_handler::search_users,
        crate::domains::users::handlers::user_handler::get_user_by_username,
        crate::domains::users::handlers::user_handler::get_user,
        crate::domains::users::handlers::user_handler::update_user,
        crate::domains::users::handlers::user_handler::upload_profile_picture,
        crate::domains::users::handlers::user_handler::list_favorites,
        crate::domains::users::handlers::user_handler::add_favorite,
        crate::domains::users::handlers::user_handler::remove_favorite,
        crate::domains::items::handlers::item_handler::create_item,
        crate::domains::items::handlers::item_handler::list_items,
        crate::domains::items::handlers::item_handler::get_item,
        crate::domains::items::handlers::item_handler::update_item,
        crate::domains::items::handlers::item_handler::upload_item_images,
        crate::domains::items::handlers::item_handler::delete_item,
        crate::domains::items::handlers::item_handler::lock_item,
        crate::domains::items::handlers::item_handler::unlock_item,
        crate::domains::swaps::handlers::swap_handler::request_swap,
        crate::domains::swaps::handlers::swap_handler::approve_swap,
        crate::domains::swaps::handlers::swap_handler::reject_swap,
        crate::domains::swaps::handlers::swap_handler::cancel_swap,
        crate::domains::swaps::handlers::swap_handler::get_swap_requests,
        crate::domains::swaps::handlers::swap_handler::get_swap_history,
        crate::domains::credits::handlers::credit_handler::get_balance,
        crate::domains::credits::handlers::credit_handler::add_credits,
        crate::domains::credits::handlers::credit_handler::deduct_credits,
        crate::domains::credits::handlers::credit_handler::get_transactions,
        crate::domains::credits::handlers::credit_handler::sync_balance,
        crate::domains::notifications::handlers::notification_handler::list_notifications,
        crate::domains::notifications::handlers::notification_handler::recent_events,
        crate::domains::notifications::handlers::notification_handler::unread_count,
        crate::domains::notifications::handlers::notification_handler::mark_read,
        crate::domains::notifications::handlers::notification_handler::mark_all_read,
        crate::domains::notifications::handlers::notification_handler::delete_notification,
        crate::domains::ratings::handlers::rating_handler::rate_user,
        crate::domains::ratings::handlers::rating_handler::get_my_rating,
        crate::domains::ratings::handlers::rating_handler::get_rating_stats,
        crate::domains::support::handlers::support_handler::submit_report,
        crate::domains::support::handlers::support_handler::submit_contact
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        RefreshTokenRequest,
        RefreshTokenResponse,
        LogoutRequest,
        MessageResponse,
        UserResponse,
        MeResponse,
        UserProfile,
        UserListResponse,
        ProfileUpdateRequest,
        ProfilePictureUpload,
        UserSearchResult,
        UserSearchResponse,
        FavoritesResponse,
        Item,
        ItemImage,
        ItemStatus,
        ItemSort,
        ItemCreate,
        ItemUpdate,
        ItemImagesUpload,
        ItemLockResponse,
        SwapStatus,
        SwapRequest,
        SwapParty,
        SwapRequestCreated,
        SwapDecisionResponse,
        OwnerRequestView,
        RequesterRequestView,
        SwapRequestsResponse,
        SwapHistoryEntry,
        SwapHistoryResponse,
        TransactionType,
        CreditTransaction,
        CreditAmountRequest,
        CreditBalanceResponse,
        CreditAddResponse,
        CreditDeductResponse,
        CreditTransactionsResponse,
        EventType,
        Notification,
        RecentEvent,
        UnreadCountResponse,
        NotificationActionResponse,
        Rating,
        RatingRequest,
        RatingStats,
        ReportTarget,
        ReportRequest,
        Report,
        ReportResponse,
        ContactKind,
        ContactRequest,
        ContactResponse
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Registration, login, token refresh and email verification"),
        (name = "Users", description = "Profiles, settings and favorites"),
        (name = "Items", description = "Clothing listings, images and 24h reservations"),
        (name = "Swaps", description = "Swap request lifecycle"),
        (name = "Credits", description = "Credit ledger"),
        (name = "Notifications", description = "Swap event notifications"),
        (name = "Ratings", description = "User ratings"),
        (name = "Support", description = "Reports and contact form")
    ),
    info(
        title = "SwapCircle API",
        description = "Campus clothing-swap marketplace backed by a credit ledger",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
pub struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
