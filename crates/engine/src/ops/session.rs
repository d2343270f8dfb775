//! Login and logout.
//!
//! The first successful login creates the user with a zero balance; a user
//! can hold only one active session at a time. Command-level "must be
//! logged in" gating lives in the CLI; the engine only owns the durable
//! session flag.

use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, sea_query::Expr};

use crate::{EngineError, LoginOutcome, ResultEngine, users};

use super::{Engine, normalize_username, with_tx};

impl Engine {
    /// Logs a user in, creating the user and its empty balance on first
    /// visit. Fails with [`EngineError::AlreadyLoggedIn`] if another
    /// session holds the user.
    pub async fn login(&self, username: &str) -> ResultEngine<LoginOutcome> {
        let username = normalize_username(username)?;
        tracing::info!(user = %username, "login requested");
        with_tx!(self, |db_tx| self.login_in_tx(&db_tx, &username).await)
    }

    /// Ends a user's session. Fails with [`EngineError::NotLoggedIn`] when
    /// the user does not exist or has no active session.
    pub async fn logout(&self, username: &str) -> ResultEngine<()> {
        let username = normalize_username(username)?;
        tracing::info!(user = %username, "logout requested");
        with_tx!(self, |db_tx| self.logout_in_tx(&db_tx, &username).await)
    }

    /// Clears every active session flag and returns how many were set.
    ///
    /// A session that ends without a logout (a crash, a killed terminal)
    /// leaves its flag set and the user locked out; the CLI runs this once
    /// at startup before accepting commands.
    pub async fn reset_sessions(&self) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| self.reset_sessions_in_tx(&db_tx).await)
    }

    async fn reset_sessions_in_tx(&self, db_tx: &DatabaseTransaction) -> ResultEngine<u64> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::LoggedIn, Expr::value(false))
            .filter(users::Column::LoggedIn.eq(true))
            .exec(db_tx)
            .await?;
        Ok(result.rows_affected)
    }

    async fn login_in_tx(
        &self,
        db_tx: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<LoginOutcome> {
        let (balance, created) = match self.find_user(db_tx, username).await? {
            Some(user) => {
                if user.logged_in {
                    return Err(EngineError::AlreadyLoggedIn(username.to_string()));
                }
                self.set_logged_in(db_tx, username, true).await?;
                (self.load_balance(db_tx, username).await?, false)
            }
            None => (self.create_user(db_tx, username, true).await?, true),
        };

        let owed_to = self.owed_to(db_tx, username).await?;
        let owed_from = self.owed_from(db_tx, username).await?;

        Ok(LoginOutcome {
            username: username.to_string(),
            created,
            balance: balance.amount,
            owed_to,
            owed_from,
        })
    }

    async fn logout_in_tx(
        &self,
        db_tx: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<()> {
        match self.find_user(db_tx, username).await? {
            Some(user) if user.logged_in => self.set_logged_in(db_tx, username, false).await,
            _ => Err(EngineError::NotLoggedIn(username.to_string())),
        }
    }
}
