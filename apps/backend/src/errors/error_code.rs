//! Error codes for the Tactix backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Tactix backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Invalid game ID provided
    InvalidGameId,
    /// Invalid seat value
    InvalidSeat,
    /// Cell index out of range or cell already occupied
    IllegalCell,
    /// Move attempted out of turn
    OutOfTurn,
    /// Move attempted after the game reached a terminal outcome
    GameOver,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game session not found
    GameNotFound,
    /// General not found error
    NotFound,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    // Business Logic Conflicts
    /// Both seats already taken by other players
    SeatUnavailable,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Room number allocation failed
    AllocationError,
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidSeat => "INVALID_SEAT",
            Self::IllegalCell => "ILLEGAL_CELL",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::GameOver => "GAME_OVER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            // Business Logic Conflicts
            Self::SeatUnavailable => "SEAT_UNAVAILABLE",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::AllocationError => "ALLOCATION_ERROR",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        // Verify that all error codes produce the expected SCREAMING_SNAKE_CASE strings
        assert_eq!(ErrorCode::InvalidGameId.as_str(), "INVALID_GAME_ID");
        assert_eq!(ErrorCode::InvalidSeat.as_str(), "INVALID_SEAT");
        assert_eq!(ErrorCode::IllegalCell.as_str(), "ILLEGAL_CELL");
        assert_eq!(ErrorCode::OutOfTurn.as_str(), "OUT_OF_TURN");
        assert_eq!(ErrorCode::GameOver.as_str(), "GAME_OVER");
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::BadRequest.as_str(), "BAD_REQUEST");
        assert_eq!(ErrorCode::GameNotFound.as_str(), "GAME_NOT_FOUND");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::RecordNotFound.as_str(), "RECORD_NOT_FOUND");
        assert_eq!(ErrorCode::SeatUnavailable.as_str(), "SEAT_UNAVAILABLE");
        assert_eq!(ErrorCode::OptimisticLock.as_str(), "OPTIMISTIC_LOCK");
        assert_eq!(ErrorCode::Conflict.as_str(), "CONFLICT");
        assert_eq!(ErrorCode::AllocationError.as_str(), "ALLOCATION_ERROR");
        assert_eq!(ErrorCode::DbError.as_str(), "DB_ERROR");
        assert_eq!(ErrorCode::DbUnavailable.as_str(), "DB_UNAVAILABLE");
        assert_eq!(ErrorCode::Internal.as_str(), "INTERNAL");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::IllegalCell), "ILLEGAL_CELL");
        assert_eq!(format!("{}", ErrorCode::OutOfTurn), "OUT_OF_TURN");
        assert_eq!(format!("{}", ErrorCode::OptimisticLock), "OPTIMISTIC_LOCK");
        assert_eq!(format!("{}", ErrorCode::AllocationError), "ALLOCATION_ERROR");
    }
}
