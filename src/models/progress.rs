use crate::entities::progress;

/// Current reading position of one document for one user.
///
/// `ProgressRecord::default()` is the empty sentinel returned when nothing
/// has been stored for a (user, document) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressRecord {
    pub user_id: i64,
    pub document: String,
    pub percentage: f64,
    pub progress: String,
    pub device: String,
    pub device_id: String,
    /// Unix seconds, assigned by the server on write.
    pub timestamp: i64,
}

impl ProgressRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<progress::Model> for ProgressRecord {
    fn from(model: progress::Model) -> Self {
        Self {
            user_id: model.user,
            document: model.document,
            percentage: model.percentage,
            progress: model.progress,
            device: model.device,
            device_id: model.device_id,
            timestamp: model.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(ProgressRecord::default().is_empty());
    }

    #[test]
    fn test_populated_record_is_not_empty() {
        let record = ProgressRecord {
            user_id: 1,
            document: "bookA".to_string(),
            percentage: 0.5,
            ..Default::default()
        };
        assert!(!record.is_empty());
    }
}
