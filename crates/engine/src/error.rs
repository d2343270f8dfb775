//! The module contains the errors the engine can return.
//!
//! User-facing failures ([`InsufficientFunds`], [`UnknownTarget`], the
//! session errors) carry the stable message shown by the presenter.
//! [`Invariant`] signals a programming error (a debt edge driven below zero,
//! or `owed_total` diverging from the debt rows) and is never expected to
//! surface in normal operation.
//!
//! [`InsufficientFunds`]: EngineError::InsufficientFunds
//! [`UnknownTarget`]: EngineError::UnknownTarget
//! [`Invariant`]: EngineError::Invariant
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Insufficient balance.")]
    InsufficientFunds(String),
    #[error("Target does not exist.")]
    UnknownTarget(String),
    #[error("\"{0}\" user not found!")]
    UnknownUser(String),
    #[error("User already logged in.")]
    AlreadyLoggedIn(String),
    #[error("User is not logged in.")]
    NotLoggedIn(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("ledger invariant violated: {0}")]
    Invariant(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::UnknownTarget(a), Self::UnknownTarget(b)) => a == b,
            (Self::UnknownUser(a), Self::UnknownUser(b)) => a == b,
            (Self::AlreadyLoggedIn(a), Self::AlreadyLoggedIn(b)) => a == b,
            (Self::NotLoggedIn(a), Self::NotLoggedIn(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Invariant(a), Self::Invariant(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
