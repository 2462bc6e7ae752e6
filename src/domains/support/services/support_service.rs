use std::sync::Arc;
use crate::domains::support::models::{
    ContactKind, ContactRequest, ContactResponse, ReportRequest, ReportResponse, ReportTarget,
};
use crate::shared::clients::{Mailer, OutgoingMail};
use crate::shared::database::{Database, ReportRepository};
use crate::shared::errors::SupportError;
use crate::shared::utils::validate_email;

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, SupportError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SupportError::Validation(format!("{} is required", field)));
    }
    Ok(value)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 문의 확인 메일 (보낸 사람에게)
pub fn confirmation_mail(request: &ContactRequest, kind: ContactKind) -> OutgoingMail {
    OutgoingMail::new(
        request.email.trim(),
        format!("We received your {} - {}", kind.as_str(), request.subject.trim()),
        format!(
            "Hi {},\n\n\
             Thanks for reaching out to SwapCircle! We've received your message:\n\n\
             Subject: {}\n\
             Message: {}\n\n\
             Our team will get back to you as soon as possible.\n\n\
             Best regards,\n\
             SwapCircle Team",
            request.name.trim(),
            request.subject.trim(),
            request.message.trim()
        ),
    )
}

/// 관리자 알림 메일
pub fn admin_contact_mail(admin_email: &str, request: &ContactRequest, kind: ContactKind) -> OutgoingMail {
    OutgoingMail::new(
        admin_email,
        format!("[SwapCircle] New {} submission: {}", kind.label(), request.subject.trim()),
        format!(
            "From: {} ({})\n\
             Type: {}\n\
             Subject: {}\n\n\
             Message:\n{}\n",
            request.name.trim(),
            request.email.trim(),
            kind.as_str(),
            request.subject.trim(),
            request.message.trim()
        ),
    )
}

// 신고/문의 서비스
// SupportService: abuse reports and the public contact form
#[derive(Clone)]
pub struct SupportService {
    db: Database,
    mailer: Arc<dyn Mailer>,
    admin_email: String,
}

impl SupportService {
    pub fn new(db: Database, mailer: Arc<dyn Mailer>, admin_email: String) -> Self {
        Self { db, mailer, admin_email }
    }

    /// 신고 저장 + 관리자 메일 (메일 실패는 로그만)
    pub async fn submit_report(&self, reporter_id: u64, request: ReportRequest) -> Result<ReportResponse, SupportError> {
        let target = ReportTarget::parse(&request.target_type).ok_or_else(|| SupportError::InvalidTargetType {
            target_type: request.target_type.clone(),
        })?;
        let target_id = required(&request.target_id, "target_id")?;
        let reason = required(&request.reason, "reason")?;
        let details = non_blank(request.details.as_deref());
        let item_url = non_blank(request.item_url.as_deref());

        let report = ReportRepository::new(self.db.pool().clone())
            .insert(reporter_id, target, target_id, reason, details, item_url)
            .await
            .map_err(|e| SupportError::DatabaseError(format!("Failed to save report: {}", e)))?;

        tracing::info!(report_id = report.id, reporter_id, target = %target.as_str(), target_id, "report submitted");

        let mail = OutgoingMail::new(
            self.admin_email.as_str(),
            format!("[SwapCircle] New report on {}: {}", target.as_str(), target_id),
            format!(
                "Reporter: {}\nTarget: {} {}\nReason: {}\nDetails: {}\nItem URL: {}\nTimestamp (UTC): {}\n",
                reporter_id,
                target.as_str(),
                target_id,
                reason,
                details.unwrap_or("-"),
                item_url.unwrap_or("-"),
                report.created_at.to_rfc3339()
            ),
        );
        if let Err(e) = self.mailer.send(mail).await {
            tracing::warn!(report_id = report.id, error = %e, "failed to email report to admin");
        }

        Ok(ReportResponse {
            status: "ok".to_string(),
            message: "Report submitted. Our team will review it.".to_string(),
        })
    }

    /// 문의 접수: 보낸 사람 확인 메일 -> 관리자 알림 메일
    pub async fn submit_contact(&self, request: ContactRequest) -> Result<ContactResponse, SupportError> {
        required(&request.name, "name")?;
        required(&request.subject, "subject")?;
        required(&request.message, "message")?;
        validate_email(request.email.trim()).map_err(SupportError::Validation)?;

        let kind = match non_blank(request.kind.as_deref()) {
            Some(raw) => ContactKind::parse(raw)
                .ok_or_else(|| SupportError::InvalidContactType { kind: raw.to_string() })?,
            None => ContactKind::Contact,
        };

        self.mailer
            .send(confirmation_mail(&request, kind))
            .await
            .map_err(|e| SupportError::MailFailed { leg: "confirmation", reason: e.to_string() })?;

        self.mailer
            .send(admin_contact_mail(&self.admin_email, &request, kind))
            .await
            .map_err(|e| SupportError::MailFailed { leg: "admin notification", reason: e.to_string() })?;

        tracing::info!(kind = %kind.as_str(), "contact form submitted");

        Ok(ContactResponse {
            status: "success".to_string(),
            message: "Your message has been received. A confirmation email has been sent to your inbox."
                .to_string(),
            email: request.email.trim().to_string(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactRequest {
        ContactRequest {
            name: " Riley ".to_string(),
            email: "riley@college.edu".to_string(),
            subject: "Lost parcel".to_string(),
            message: "Where is it?".to_string(),
            kind: None,
        }
    }

    #[test]
    fn confirmation_goes_to_sender() {
        let mail = confirmation_mail(&contact(), ContactKind::Feedback);
        assert_eq!(mail.to, "riley@college.edu");
        assert_eq!(mail.subject, "We received your feedback - Lost parcel");
        assert!(mail.body.starts_with("Hi Riley,"));
    }

    #[test]
    fn admin_mail_names_the_kind() {
        let mail = admin_contact_mail("admin@swapcircle.local", &contact(), ContactKind::Bug);
        assert_eq!(mail.to, "admin@swapcircle.local");
        assert_eq!(mail.subject, "[SwapCircle] New Bug Report submission: Lost parcel");
        assert!(mail.body.contains("From: Riley (riley@college.edu)"));
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(required("  ", "reason").is_err());
        assert_eq!(required(" spam ", "reason").unwrap(), "spam");
        assert_eq!(non_blank(Some("  ")), None);
    }
}
