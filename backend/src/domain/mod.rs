//! Domain entities, validation rules and services.
//!
//! Public surface:
//! - `User`, `Organization`, `Position` and `Nomination` with their drafts.
//! - `Error` and `ErrorCode`, the error shape every service returns.
//! - One service per vertical, generic over its repository port.
//!
//! Nothing in here knows about HTTP or SQL. Adapters live under `inbound` and
//! `outbound` and reach the domain only through `ports`.

pub mod error;
pub mod nomination;
pub mod nomination_service;
pub mod organization;
pub mod organization_service;
pub mod ports;
pub mod position;
pub mod position_service;
pub mod timestamps;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::error::{Error, ErrorCode};
pub use self::nomination::{Nomination, NominationDraft, NominationStatus};
pub use self::nomination_service::NominationService;
pub use self::organization::{Organization, OrganizationDraft};
pub use self::organization_service::OrganizationService;
pub use self::position::{Position, PositionDraft};
pub use self::position_service::PositionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft};
pub use self::user_service::UserService;
pub use self::validation::ValidationError;
