//! Account error types.

use super::store::StoreError;

/// Errors from account and wallet operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AccountError {
    /// A required signup field is blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address is not plausible
    #[error("invalid email address")]
    InvalidEmail,

    /// The password is shorter than the minimum
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Another user already registered this email
    #[error("email already registered")]
    EmailTaken,

    /// Login email/password pair did not match
    #[error("invalid email or password")]
    InvalidCredentials,

    /// No user has this id
    #[error("user {0} not found")]
    UserNotFound(u64),

    /// A wallet amount is not a positive number
    #[error("amount must be a positive number")]
    InvalidAmount,

    /// The wallet cannot cover a charge
    #[error("insufficient funds: balance {balance:.2}, requested {requested:.2}")]
    InsufficientFunds { balance: f64, requested: f64 },

    /// The station is already a favorite
    #[error("station {0} is already a favorite")]
    DuplicateFavorite(String),

    /// The store already holds the largest possible user id
    #[error("no user ids left")]
    IdsExhausted,

    /// The user store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
