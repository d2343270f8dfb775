use sea_orm::DatabaseConnection;

use crate::{EngineError, MoneyCents, ResultEngine};

mod deposit;
mod session;
mod settle;
mod store;
mod transfer;
mod withdraw;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = sea_orm::TransactionTrait::begin(&$self.database).await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The ledger & settlement engine.
///
/// Each public operation (`login`, `logout`, `deposit`, `withdraw`,
/// `transfer`) runs to completion inside a single database transaction:
/// either every mutation commits or none does. The surrounding CLI is
/// strictly sequential, so operations never overlap.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;
        Ok(Engine {
            database: self.database,
        })
    }
}

fn normalize_username(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidAmount(
            "user name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > 64 {
        return Err(EngineError::InvalidAmount(
            "user name must be at most 64 characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn require_positive(amount: MoneyCents) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(
            "amount must be > 0".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed() {
        assert_eq!(normalize_username("  alice ").unwrap(), "alice");
    }

    #[test]
    fn username_rejects_empty_and_oversized() {
        assert!(normalize_username("   ").is_err());
        assert!(normalize_username(&"x".repeat(65)).is_err());
        assert!(normalize_username(&"x".repeat(64)).is_ok());
    }

    #[test]
    fn amounts_must_be_positive() {
        assert!(require_positive(MoneyCents::new(1)).is_ok());
        assert!(require_positive(MoneyCents::ZERO).is_err());
        assert!(require_positive(MoneyCents::new(-1)).is_err());
    }
}
