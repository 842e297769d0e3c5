//! Uniform JSON response wrapper.
//!
//! Every endpoint answers with `{ "success": bool, "message"?: string,
//! "data"?: any }`. Absent fields are omitted rather than sent as `null`.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// Header carrying the unpaged total on list responses.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Response body shared by all endpoints.
///
/// # Examples
/// ```
/// use ballot_backend::inbound::http::envelope::Envelope;
///
/// let body = serde_json::to_value(Envelope::<()>::message("User deleted successfully"))
///     .expect("serialises");
/// assert_eq!(
///     body,
///     serde_json::json!({"success": true, "message": "User deleted successfully"})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Envelope<T> {
    /// Whether the request succeeded.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful response carrying only `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Successful response carrying `data` and a message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Successful response with a message and no data.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Failed response.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Render with `status`.
    pub fn respond(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// Render a list page with its total in [`TOTAL_COUNT_HEADER`].
pub fn list_response<T: Serialize>(items: Vec<T>, total: i64) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, total.to_string()))
        .json(Envelope::data(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn data_only_envelope_omits_message() {
        let value = serde_json::to_value(Envelope::data(vec![1, 2])).expect("serialises");
        assert_eq!(value, json!({"success": true, "data": [1, 2]}));
    }

    #[rstest]
    fn failure_envelope_omits_data() {
        let value = serde_json::to_value(Envelope::failure("user not found")).expect("serialises");
        assert_eq!(value, json!({"success": false, "message": "user not found"}));
    }

    #[rstest]
    fn message_and_data_are_both_kept() {
        let envelope = Envelope::with_message("Position created successfully", "p1");
        let value = serde_json::to_value(envelope).expect("serialises");
        assert_eq!(
            value,
            json!({"success": true, "message": "Position created successfully", "data": "p1"})
        );
    }

    #[actix_web::test]
    async fn list_response_sets_total_header() {
        let response = list_response(vec!["a", "b"], 7);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(TOTAL_COUNT_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("7")
        );
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value, json!({"success": true, "data": ["a", "b"]}));
    }
}
