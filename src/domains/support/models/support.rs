use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};

/// 신고 대상 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportTarget {
    Item,
    User,
}

impl ReportTarget {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "item" => Some(ReportTarget::Item),
            "user" => Some(ReportTarget::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTarget::Item => "item",
            ReportTarget::User => "user",
        }
    }
}

/// 신고 요청 (target_type은 문자열로 받아 직접 검증)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = ReportRequest)]
pub struct ReportRequest {
    #[schema(example = "item")]
    pub target_type: String,
    #[schema(example = "42")]
    pub target_id: String,
    #[schema(example = "Counterfeit")]
    pub reason: String,
    pub details: Option<String>,
    pub item_url: Option<String>,
}

/// 저장된 신고
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = Report)]
pub struct Report {
    pub id: u64,
    pub reporter_id: u64,
    pub target_type: ReportTarget,
    pub target_id: String,
    pub reason: String,
    pub details: Option<String>,
    pub item_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = ReportResponse)]
pub struct ReportResponse {
    pub status: String,
    pub message: String,
}

/// 문의 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Contact,
    Feedback,
    Bug,
}

impl ContactKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "contact" => Some(ContactKind::Contact),
            "feedback" => Some(ContactKind::Feedback),
            "bug" => Some(ContactKind::Bug),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactKind::Contact => "contact",
            ContactKind::Feedback => "feedback",
            ContactKind::Bug => "bug",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactKind::Contact => "Contact",
            ContactKind::Feedback => "Feedback",
            ContactKind::Bug => "Bug Report",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = ContactRequest)]
pub struct ContactRequest {
    pub name: String,
    #[schema(example = "student@college.edu")]
    pub email: String,
    pub subject: String,
    pub message: String,
    /// contact | feedback | bug (default contact)
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = ContactResponse)]
pub struct ContactResponse {
    pub status: String,
    pub message: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: ContactKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_targets_are_case_insensitive() {
        assert_eq!(ReportTarget::parse(" Item "), Some(ReportTarget::Item));
        assert_eq!(ReportTarget::parse("USER"), Some(ReportTarget::User));
        assert_eq!(ReportTarget::parse("listing"), None);
    }

    #[test]
    fn contact_type_is_read_from_type_key() {
        let req: ContactRequest = serde_json::from_str(
            r#"{"name":"A","email":"a@b.co","subject":"s","message":"m","type":"bug"}"#,
        )
        .unwrap();
        assert_eq!(req.kind.as_deref().and_then(ContactKind::parse), Some(ContactKind::Bug));
    }
}
