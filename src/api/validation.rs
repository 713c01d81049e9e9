use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use super::ApiError;

/// JSON body extractor that answers every decoding problem with
/// [`ApiError::BadRequest`] and does not look at `Content-Type`.
///
/// The body must be a JSON object; anything else (arrays, scalars, broken
/// JSON, wrong field types) is rejected.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        decode_object(&bytes).map(Payload)
    }
}

pub fn decode_object<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))?;

    if !value.is_object() {
        return Err(ApiError::bad_request("Body must be a JSON object"));
    }

    serde_json::from_value(value).map_err(|e| ApiError::bad_request(format!("Invalid body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{NewAccount, ProgressUpdate};

    #[test]
    fn test_decode_object_accepts_objects() {
        let account: NewAccount =
            decode_object(br#"{"username":"alice","password":"secret"}"#).unwrap();
        assert_eq!(account.username, "alice");
    }

    #[test]
    fn test_decode_object_rejects_non_objects() {
        assert!(matches!(
            decode_object::<NewAccount>(br#"["alice","secret"]"#),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            decode_object::<NewAccount>(b"42"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            decode_object::<NewAccount>(b""),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            decode_object::<NewAccount>(b"{not json"),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_decode_object_rejects_wrong_types() {
        assert!(matches!(
            decode_object::<NewAccount>(br#"{"username":1,"password":"x"}"#),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            decode_object::<ProgressUpdate>(br#"{"document":"a","device":false}"#),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_decode_object_ignores_unknown_and_client_timestamp() {
        let update: ProgressUpdate = decode_object(
            br#"{"document":"a","timestamp":"yesterday","user":"mallory","extra":[1,2]}"#,
        )
        .unwrap();
        assert_eq!(update.document, "a");
    }
}
