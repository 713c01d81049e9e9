use serde::Serialize;

use crate::models::ProgressRecord;

/// Error envelope: `{"code": .., "message": ..}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct AuthorizedResponse {
    pub authorized: &'static str,
}

impl AuthorizedResponse {
    pub const OK: Self = Self { authorized: "OK" };
}

#[derive(Debug, Serialize)]
pub struct ProgressAckResponse {
    pub document: String,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub state: &'static str,
}

/// Stored progress. Zero-valued fields are left out, so the empty sentinel
/// renders as `{}`.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub document: String,
    #[serde(skip_serializing_if = "is_zero_f64")]
    pub percentage: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub progress: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub device: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub device_id: String,
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub timestamp: i64,
}

impl From<ProgressRecord> for ProgressResponse {
    fn from(record: ProgressRecord) -> Self {
        Self {
            document: record.document,
            percentage: record.percentage,
            progress: record.progress,
            device: record.device,
            device_id: record.device_id,
            timestamp: record.timestamp,
        }
    }
}

#[allow(clippy::float_cmp, clippy::trivially_copy_pass_by_ref)]
fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}
