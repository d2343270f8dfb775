//! FIFO debt settlement shared by the deposit path and the transfer
//! cascade, plus the post-operation consistency check.

use sea_orm::DatabaseTransaction;

use crate::{Balance, EngineError, MoneyCents, ResultEngine, outcome::OwedEntry};

use super::Engine;

impl Engine {
    /// Applies up to `budget` against `debtor`'s outstanding debts, oldest
    /// first, crediting each creditor's balance as it goes.
    ///
    /// The debtor's own balance is *not* touched here: the deposit path
    /// pays creditors straight out of the deposited envelope, and the
    /// transfer cascade debits the recipient separately with the returned
    /// total. `skip_creditor` excludes an edge already reconciled by the
    /// caller (the transfer source).
    ///
    /// Returns the settled (creditor, amount) pairs in settlement order.
    pub(super) async fn settle_fifo(
        &self,
        db: &DatabaseTransaction,
        debtor: &str,
        budget: MoneyCents,
        skip_creditor: Option<&str>,
    ) -> ResultEngine<Vec<OwedEntry>> {
        let mut remaining = budget;
        let mut settled = Vec::new();

        for debt in self.debts_of(db, debtor).await? {
            if !remaining.is_positive() {
                break;
            }
            if skip_creditor == Some(debt.creditor.as_str()) {
                continue;
            }

            let portion = debt.amount.min(remaining);
            tracing::debug!(
                debtor,
                creditor = %debt.creditor,
                amount = %portion,
                "settling debt"
            );

            let mut creditor_balance = self.load_balance(db, &debt.creditor).await?;
            creditor_balance.credit(portion)?;
            self.save_balance(db, &creditor_balance).await?;
            self.settle_debt(db, &debt, portion).await?;

            settled.push((debt.creditor, portion));
            remaining -= portion;
        }

        Ok(settled)
    }

    /// Re-derives `owed_total` from the debt rows and checks the balance
    /// never went negative. Runs after every operation that touched debts;
    /// a failure aborts the transaction before commit.
    pub(super) async fn assert_debt_invariant(
        &self,
        db: &DatabaseTransaction,
        balance: &Balance,
    ) -> ResultEngine<()> {
        if balance.amount.is_negative() {
            return Err(EngineError::Invariant(format!(
                "balance of {} is negative: {}",
                balance.username, balance.amount
            )));
        }
        if balance.owed_total.is_negative() {
            return Err(EngineError::Invariant(format!(
                "owed total of {} is negative: {}",
                balance.username, balance.owed_total
            )));
        }

        let derived: MoneyCents = self
            .debts_of(db, &balance.username)
            .await?
            .into_iter()
            .map(|d| d.amount)
            .sum();
        if derived != balance.owed_total {
            return Err(EngineError::Invariant(format!(
                "owed total of {} is {} but debt rows sum to {}",
                balance.username, balance.owed_total, derived
            )));
        }
        Ok(())
    }
}
