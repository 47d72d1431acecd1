use std::error::Error as StdError;

/// Failures reported by repository implementations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store refused a booking write because the room is full.
    #[error("Room {room_id} is at capacity")]
    RoomFull { room_id: i32 },

    /// The store refused a second booking row for the same user.
    #[error("User {user_id} already holds a booking")]
    DuplicateBooking { user_id: i32 },

    #[error("Storage failure: {0}")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

impl RepositoryError {
    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Storage(err.into())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error kinds surfaced by the services.
///
/// `CannotBook` deliberately carries no cause: a missing enrollment, an unpaid
/// ticket, a ticket without hotel, a full room and a missing booking to change
/// all read the same to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Booking not allowed")]
    CannotBook,

    #[error("Hotel listing not allowed")]
    CannotListHotels,

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Repository(RepositoryError),
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// HTTP status an outer request layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::CannotBook => 403,
            ServiceError::CannotListHotels => 402,
            ServiceError::Unauthorized => 401,
            ServiceError::Repository(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "BAD_REQUEST",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::CannotBook => "CANNOT_BOOK",
            ServiceError::CannotListHotels => "CANNOT_LIST_HOTELS",
            ServiceError::Unauthorized => "UNAUTHORIZED",
            ServiceError::Repository(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::RoomFull { .. } | RepositoryError::DuplicateBooking { .. } => {
                ServiceError::CannotBook
            }
            other => {
                tracing::error!("Repository failure: {}", other);
                ServiceError::Repository(other)
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
