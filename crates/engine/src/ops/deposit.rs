//! Deposit with FIFO debt settlement.

use sea_orm::DatabaseTransaction;

use crate::{DepositOutcome, MoneyCents, ResultEngine};

use super::{Engine, normalize_username, require_positive, with_tx};

impl Engine {
    /// Deposits `amount` for `username`.
    ///
    /// Outstanding debts are settled first, oldest debt first. The settled
    /// portion moves straight from the deposit to each creditor and never
    /// passes through the depositor's own balance; only the residual is
    /// credited to the depositor.
    pub async fn deposit(
        &self,
        username: &str,
        amount: MoneyCents,
    ) -> ResultEngine<DepositOutcome> {
        let username = normalize_username(username)?;
        require_positive(amount)?;
        tracing::info!(user = %username, %amount, "deposit requested");
        with_tx!(self, |db_tx| self
            .deposit_in_tx(&db_tx, &username, amount)
            .await)
    }

    async fn deposit_in_tx(
        &self,
        db_tx: &DatabaseTransaction,
        username: &str,
        amount: MoneyCents,
    ) -> ResultEngine<DepositOutcome> {
        self.require_user(db_tx, username).await?;
        let mut balance = self.load_balance(db_tx, username).await?;

        let mut settlements = Vec::new();
        if balance.owed_total.is_positive() {
            let to_settle = amount.min(balance.owed_total);
            tracing::debug!(user = %username, owed = %balance.owed_total, %to_settle, "settling debts before deposit");
            settlements = self.settle_fifo(db_tx, username, to_settle, None).await?;
        }

        // The settled sum equals min(amount, owed_total) whenever the debt
        // invariant holds; subtracting what actually moved keeps value
        // conserved even if it did not.
        let settled_total: MoneyCents = settlements.iter().map(|(_, s)| *s).sum();
        balance.owed_total -= settled_total;
        balance.credit(amount - settled_total)?;
        self.save_balance(db_tx, &balance).await?;

        self.assert_debt_invariant(db_tx, &balance).await?;
        let owed_to = self.owed_to(db_tx, username).await?;

        Ok(DepositOutcome {
            settlements,
            balance: balance.amount,
            owed_to,
        })
    }
}
