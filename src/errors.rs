// errors.rs
use chrono::NaiveDate;
use thiserror::Error;

/// Structural failures raised by the booking engine before anything is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    /// A stay must cover at least one night.
    #[error("invalid range: {start} .. {end} (end must be after start)")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// The target room is already held for an overlapping interval.
    #[error("room {room_no} is already booked by reservation {reservation_id}")]
    RoomConflict {
        room_no: u32,
        reservation_id: String,
    },

    #[error("room {0} does not exist")]
    UnknownRoom(String),

    /// A stored document that does not have the reservation/room shape.
    #[error("malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },
}

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Configuration Error: {0}")]
    ConfigError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl From<BookingError> for ServerError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::RoomConflict { .. } => ServerError::Conflict(err.to_string()),
            BookingError::InvalidRange { .. } | BookingError::UnknownRoom(_) => {
                ServerError::BadRequest(err.to_string())
            }
            // Only raised while decoding stored documents.
            BookingError::MalformedRecord { .. } => ServerError::DbError(err.to_string()),
        }
    }
}
