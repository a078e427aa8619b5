use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

/// Renders the public serial for a certificate sequence number.
pub fn format_serial(sequence: i32) -> String {
    format!("CERT-{:05}", sequence)
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Certificate {
    pub id: Uuid,
    pub trainee_id: Uuid,
    /// Course or training title the certificate was issued for.
    pub title: String,
    pub serial: String,
    pub sequence: i32,
    pub exam_attempt_id: Option<Uuid>,
    pub issued_at: OffsetDateTime,
    pub revoked: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct IssueCertificate {
    pub trainee_id: Uuid,
    #[validate(length(min = 1))]
    pub title: String,
    pub exam_attempt_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CertificateFilter {
    pub trainee_id: Option<Uuid>,
}

/// Outcome of a public serial lookup.
#[derive(Debug, Serialize)]
pub struct CertificateVerification {
    pub valid: bool,
    pub certificate: Option<Certificate>,
}

#[cfg(test)]
mod tests {
    use super::format_serial;

    #[test]
    fn serials_are_prefixed_and_padded() {
        assert_eq!(format_serial(1), "CERT-00001");
        assert_eq!(format_serial(42), "CERT-00042");
        assert_eq!(format_serial(123456), "CERT-123456");
    }
}
