//! OpenAPI-only schema definitions.
//!
//! Domain types do not derive `ToSchema`; shapes that only exist for the
//! generated document live here.

use utoipa::ToSchema;

/// Envelope without `data`: failures, deletes and status changes.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MessageEnvelope {
    /// `false` for every error response.
    #[schema(example = false)]
    success: bool,
    /// Human-readable outcome. Internal failures read `Internal server error`.
    #[schema(example = "user not found")]
    message: String,
}

/// Accepted nomination status values.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub enum NominationStatusSchema {
    #[schema(rename = "pending")]
    Pending,
    #[schema(rename = "accepted")]
    Accepted,
    #[schema(rename = "declined")]
    Declined,
}
