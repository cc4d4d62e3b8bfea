//! # Folio Shared
//!
//! Wire types shared between the API server and its clients.
//! Request shapes carry their validation rules so both sides agree on them.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorBody, ErrorCode, ErrorResponse, FieldError};
