//! Withdrawal. No interaction with the debt graph.

use sea_orm::DatabaseTransaction;

use crate::{MoneyCents, ResultEngine, WithdrawOutcome};

use super::{Engine, normalize_username, require_positive, with_tx};

impl Engine {
    /// Withdraws `amount` from `username`'s balance, failing with
    /// [`EngineError::InsufficientFunds`] (and mutating nothing) when the
    /// balance cannot cover it.
    ///
    /// [`EngineError::InsufficientFunds`]: crate::EngineError::InsufficientFunds
    pub async fn withdraw(
        &self,
        username: &str,
        amount: MoneyCents,
    ) -> ResultEngine<WithdrawOutcome> {
        let username = normalize_username(username)?;
        require_positive(amount)?;
        tracing::info!(user = %username, %amount, "withdraw requested");
        with_tx!(self, |db_tx| self
            .withdraw_in_tx(&db_tx, &username, amount)
            .await)
    }

    async fn withdraw_in_tx(
        &self,
        db_tx: &DatabaseTransaction,
        username: &str,
        amount: MoneyCents,
    ) -> ResultEngine<WithdrawOutcome> {
        self.require_user(db_tx, username).await?;
        let mut balance = self.load_balance(db_tx, username).await?;
        balance.debit(amount)?;
        self.save_balance(db_tx, &balance).await?;

        Ok(WithdrawOutcome {
            balance: balance.amount,
        })
    }
}
