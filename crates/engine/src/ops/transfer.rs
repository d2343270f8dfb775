//! Transfer with netting and cascading settlement.

use sea_orm::DatabaseTransaction;

use crate::{EngineError, MoneyCents, ResultEngine, TransferOutcome};

use super::{Engine, normalize_username, require_positive, with_tx};

impl Engine {
    /// Transfers `amount` from `source` to `target`.
    ///
    /// When the source balance falls short, whatever it holds moves and the
    /// shortfall becomes a debt to the target. With sufficient balance, an
    /// existing reverse debt (target owing source) is netted first, which
    /// cancels debt without moving any funds, and only the remainder is
    /// credited and debited. Funds the target actually
    /// receives are then used to settle the target's own debts to third
    /// parties, oldest first, within the same transaction.
    pub async fn transfer(
        &self,
        source: &str,
        target: &str,
        amount: MoneyCents,
    ) -> ResultEngine<TransferOutcome> {
        let source = normalize_username(source)?;
        let target = normalize_username(target)?;
        require_positive(amount)?;
        if source == target {
            return Err(EngineError::InvalidAmount(
                "source and target must differ".to_string(),
            ));
        }
        tracing::info!(source = %source, target = %target, %amount, "transfer requested");
        with_tx!(self, |db_tx| self
            .transfer_in_tx(&db_tx, &source, &target, amount)
            .await)
    }

    async fn transfer_in_tx(
        &self,
        db_tx: &DatabaseTransaction,
        source: &str,
        target: &str,
        amount: MoneyCents,
    ) -> ResultEngine<TransferOutcome> {
        self.require_user(db_tx, source).await?;
        if self.find_user(db_tx, target).await?.is_none() {
            return Err(EngineError::UnknownTarget(target.to_string()));
        }

        let mut source_balance = self.load_balance(db_tx, source).await?;
        let mut target_balance = self.load_balance(db_tx, target).await?;

        let mut transfers = Vec::new();
        // Funds the target actually received in this operation; bounds the
        // cascade so the target's balance can never go negative.
        let received;

        if source_balance.amount < amount {
            // Short transfer: give everything the source holds, owe the rest.
            let given = source_balance.amount;
            let shortfall = amount - given;
            tracing::debug!(%given, %shortfall, "source balance short of transfer amount");

            target_balance.credit(given)?;
            source_balance.owed_total += shortfall;
            self.increase_debt(db_tx, source, target, shortfall).await?;
            transfers.push((target.to_string(), given));
            source_balance.force_debit(given)?;
            received = given;
        } else {
            // Net against a debt the target already owes the source before
            // moving anything.
            let mut remaining = amount;
            if let Some(reverse) = self.debt_between(db_tx, target, source).await? {
                let netted = reverse.amount.min(remaining);
                tracing::debug!(%netted, "netting transfer against reverse debt");
                self.settle_debt(db_tx, &reverse, netted).await?;
                target_balance.owed_total -= netted;
                remaining -= netted;
            }

            if remaining.is_positive() {
                target_balance.credit(remaining)?;
                source_balance.force_debit(remaining)?;
                // The presenter reports the requested amount: netted debt
                // counts as delivered.
                transfers.push((target.to_string(), amount));
            }
            received = remaining;
        }

        // Cascading settlement: the target pays its own creditors with the
        // funds it just received. The edge back to the source was already
        // reconciled above.
        if received.is_positive() && target_balance.owed_total.is_positive() {
            let budget = received.min(target_balance.owed_total);
            let settled = self.settle_fifo(db_tx, target, budget, Some(source)).await?;
            let settled_total: MoneyCents = settled.iter().map(|(_, s)| *s).sum();
            if settled_total.is_positive() {
                tracing::debug!(target = %target, %settled_total, "cascaded settlement of target debts");
                target_balance.force_debit(settled_total)?;
                target_balance.owed_total -= settled_total;
            }
        }

        self.save_balance(db_tx, &source_balance).await?;
        self.save_balance(db_tx, &target_balance).await?;

        self.assert_debt_invariant(db_tx, &source_balance).await?;
        self.assert_debt_invariant(db_tx, &target_balance).await?;

        let owed_from = self.owed_from(db_tx, source).await?;

        Ok(TransferOutcome {
            target: target.to_string(),
            transfers,
            balance: source_balance.amount,
            owed_total: source_balance.owed_total,
            owed_from,
        })
    }
}
