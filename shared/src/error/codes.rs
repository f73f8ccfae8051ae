//! Unified error codes for the canteen server
//!
//! This module defines all error codes used by the server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu and offer errors
//! - 8xxx: Account errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (user id/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,
    /// Account exists under a different role than the one requested at login
    RoleMismatch = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been paid
    OrderAlreadyPaid = 4002,
    /// Cart / order has no items
    OrderEmpty = 4007,
    /// Requested status change is not allowed
    InvalidStatusTransition = 4008,
    /// All pickup tokens are in use
    TokenSpaceExhausted = 4009,
    /// Receipt requested for an order that is not completed
    ReceiptNotAvailable = 4010,

    // ==================== 5xxx: Payment ====================
    /// No payee configured for UPI payments
    PaymentNotConfigured = 5006,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item is currently unavailable
    MenuItemUnavailable = 6003,
    /// Menu item name already exists
    MenuItemNameExists = 6004,
    /// Offer not found
    OfferNotFound = 6801,
    /// Offer discount is invalid
    OfferInvalidDiscount = 6802,
    /// Offer schedule (dates / weekday) is invalid
    OfferInvalidSchedule = 6803,

    // ==================== 8xxx: Account ====================
    /// Account not found
    AccountNotFound = 8001,
    /// Account id already exists
    AccountExists = 8002,
    /// Cannot disable own account
    AccountCannotDisableSelf = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Rendering a document (QR / PDF) failed
    RenderFailed = 9202,
    /// Building an export file failed
    ExportFailed = 9203,
}

impl ErrorCode {
    /// Get the numeric error code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid user id or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::RoleMismatch => "Account exists with a different role",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyPaid => "Order has already been paid",
            ErrorCode::OrderEmpty => "Your cart is empty",
            ErrorCode::InvalidStatusTransition => "Order status cannot move backwards",
            ErrorCode::TokenSpaceExhausted => "No free pickup token available",
            ErrorCode::ReceiptNotAvailable => {
                "Receipt can only be downloaded for completed orders"
            }

            // Payment
            ErrorCode::PaymentNotConfigured => "UPI payee is not configured",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemUnavailable => "Menu item is currently unavailable",
            ErrorCode::MenuItemNameExists => "Item with this name already exists",
            ErrorCode::OfferNotFound => "Offer not found",
            ErrorCode::OfferInvalidDiscount => "Offer discount value is invalid",
            ErrorCode::OfferInvalidSchedule => "Offer schedule is invalid",

            // Account
            ErrorCode::AccountNotFound => "User not found",
            ErrorCode::AccountExists => "User ID already exists",
            ErrorCode::AccountCannotDisableSelf => "Cannot disable own account",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::RenderFailed => "Document rendering failed",
            ErrorCode::ExportFailed => "Export failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),
            1008 => Ok(ErrorCode::RoleMismatch),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyPaid),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::InvalidStatusTransition),
            4009 => Ok(ErrorCode::TokenSpaceExhausted),
            4010 => Ok(ErrorCode::ReceiptNotAvailable),

            // Payment
            5006 => Ok(ErrorCode::PaymentNotConfigured),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6003 => Ok(ErrorCode::MenuItemUnavailable),
            6004 => Ok(ErrorCode::MenuItemNameExists),
            6801 => Ok(ErrorCode::OfferNotFound),
            6802 => Ok(ErrorCode::OfferInvalidDiscount),
            6803 => Ok(ErrorCode::OfferInvalidSchedule),

            // Account
            8001 => Ok(ErrorCode::AccountNotFound),
            8002 => Ok(ErrorCode::AccountExists),
            8003 => Ok(ErrorCode::AccountCannotDisableSelf),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9202 => Ok(ErrorCode::RenderFailed),
            9203 => Ok(ErrorCode::ExportFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
