//! Ledger store access: users, balances and debt edges.
//!
//! Every helper takes the operation's open [`DatabaseTransaction`], so all
//! reads and writes of one façade operation share a single atomic boundary.
//! The debt graph is keyed by ordered (debtor, creditor) pairs; creation
//! order is the auto-increment `id`, which is the FIFO order used by
//! settlement.

use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Balance, Debt, EngineError, MoneyCents, ResultEngine, balances, debts, outcome::OwedEntry,
    users,
};

use super::Engine;

impl Engine {
    pub(super) async fn find_user(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<Option<users::Model>> {
        users::Entity::find_by_id(username.to_string())
            .one(db)
            .await
            .map_err(Into::into)
    }

    pub(super) async fn require_user(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<users::Model> {
        self.find_user(db, username)
            .await?
            .ok_or_else(|| EngineError::UnknownUser(username.to_string()))
    }

    /// Creates a user together with its empty balance row.
    pub(super) async fn create_user(
        &self,
        db: &DatabaseTransaction,
        username: &str,
        logged_in: bool,
    ) -> ResultEngine<Balance> {
        let user = users::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            logged_in: ActiveValue::Set(logged_in),
        };
        user.insert(db).await?;

        let balance = Balance::new(username.to_string());
        balances::ActiveModel::from(&balance).insert(db).await?;
        Ok(balance)
    }

    pub(super) async fn set_logged_in(
        &self,
        db: &DatabaseTransaction,
        username: &str,
        logged_in: bool,
    ) -> ResultEngine<()> {
        let user = users::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            logged_in: ActiveValue::Set(logged_in),
        };
        user.update(db).await?;
        Ok(())
    }

    /// Loads a user's balance row. A user without one is schema corruption,
    /// not a user-facing condition.
    pub(super) async fn load_balance(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<Balance> {
        balances::Entity::find_by_id(username.to_string())
            .one(db)
            .await?
            .map(Balance::from)
            .ok_or_else(|| EngineError::Invariant(format!("balance row missing for {username}")))
    }

    pub(super) async fn save_balance(
        &self,
        db: &DatabaseTransaction,
        balance: &Balance,
    ) -> ResultEngine<()> {
        balances::ActiveModel::from(balance).update(db).await?;
        Ok(())
    }

    /// All debts where `debtor` is the debtor, oldest first.
    pub(super) async fn debts_of(
        &self,
        db: &DatabaseTransaction,
        debtor: &str,
    ) -> ResultEngine<Vec<Debt>> {
        let models = debts::Entity::find()
            .filter(debts::Column::Debtor.eq(debtor.to_string()))
            .order_by_asc(debts::Column::Id)
            .all(db)
            .await?;
        Ok(models.into_iter().map(Debt::from).collect())
    }

    /// All debts owed to `creditor`, oldest first.
    pub(super) async fn debts_to(
        &self,
        db: &DatabaseTransaction,
        creditor: &str,
    ) -> ResultEngine<Vec<Debt>> {
        let models = debts::Entity::find()
            .filter(debts::Column::Creditor.eq(creditor.to_string()))
            .order_by_asc(debts::Column::Id)
            .all(db)
            .await?;
        Ok(models.into_iter().map(Debt::from).collect())
    }

    /// The single debt (if any) where `debtor` owes `creditor`.
    pub(super) async fn debt_between(
        &self,
        db: &DatabaseTransaction,
        debtor: &str,
        creditor: &str,
    ) -> ResultEngine<Option<Debt>> {
        let model = debts::Entity::find()
            .filter(debts::Column::Debtor.eq(debtor.to_string()))
            .filter(debts::Column::Creditor.eq(creditor.to_string()))
            .one(db)
            .await?;
        Ok(model.map(Debt::from))
    }

    /// Adds `amount` to the (debtor, creditor) edge, creating it if absent.
    ///
    /// Merging keeps the at-most-one-edge-per-pair invariant; the creation
    /// order (and so the FIFO position) of a merged edge stays that of the
    /// original row.
    pub(super) async fn increase_debt(
        &self,
        db: &DatabaseTransaction,
        debtor: &str,
        creditor: &str,
        amount: MoneyCents,
    ) -> ResultEngine<()> {
        if !amount.is_positive() {
            return Err(EngineError::Invariant(format!(
                "debt increase must be positive, got {amount}"
            )));
        }

        match self.debt_between(db, debtor, creditor).await? {
            Some(existing) => {
                let updated = debts::ActiveModel {
                    id: ActiveValue::Set(existing.id),
                    amount: ActiveValue::Set((existing.amount + amount).cents()),
                    ..Default::default()
                };
                updated.update(db).await?;
            }
            None => {
                let row = debts::ActiveModel {
                    id: ActiveValue::NotSet,
                    debtor: ActiveValue::Set(debtor.to_string()),
                    creditor: ActiveValue::Set(creditor.to_string()),
                    amount: ActiveValue::Set(amount.cents()),
                    created_at: ActiveValue::Set(Utc::now()),
                };
                row.insert(db).await?;
            }
        }
        Ok(())
    }

    /// Subtracts `amount` from a debt, deleting the row when it reaches
    /// exactly zero. The caller must have clamped `amount` to the edge.
    pub(super) async fn settle_debt(
        &self,
        db: &DatabaseTransaction,
        debt: &Debt,
        amount: MoneyCents,
    ) -> ResultEngine<()> {
        if amount > debt.amount {
            return Err(EngineError::Invariant(format!(
                "settling {amount} against a {} debt from {} to {}",
                debt.amount, debt.debtor, debt.creditor
            )));
        }

        let remaining = debt.amount - amount;
        if remaining.is_zero() {
            tracing::debug!(debtor = %debt.debtor, creditor = %debt.creditor, "debt fully settled");
            debts::Entity::delete_by_id(debt.id).exec(db).await?;
        } else {
            tracing::debug!(
                debtor = %debt.debtor,
                creditor = %debt.creditor,
                remaining = %remaining,
                "debt partially settled"
            );
            let updated = debts::ActiveModel {
                id: ActiveValue::Set(debt.id),
                amount: ActiveValue::Set(remaining.cents()),
                ..Default::default()
            };
            updated.update(db).await?;
        }
        Ok(())
    }

    /// Snapshot of what `debtor` owes, per creditor, for display.
    pub(super) async fn owed_to(
        &self,
        db: &DatabaseTransaction,
        debtor: &str,
    ) -> ResultEngine<Vec<OwedEntry>> {
        let debts = self.debts_of(db, debtor).await?;
        Ok(debts.into_iter().map(|d| (d.creditor, d.amount)).collect())
    }

    /// Snapshot of what others owe `creditor`, per debtor, for display.
    pub(super) async fn owed_from(
        &self,
        db: &DatabaseTransaction,
        creditor: &str,
    ) -> ResultEngine<Vec<OwedEntry>> {
        let debts = self.debts_to(db, creditor).await?;
        Ok(debts.into_iter().map(|d| (d.debtor, d.amount)).collect())
    }
}
