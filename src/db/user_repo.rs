// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::stores::CredentialStore,
    models::auth::UserAccount,
};

// O repositório de contas, responsável por todas as interações com a tabela 'user_accounts'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    // Busca uma conta pelo e-mail (sem diferenciar maiúsculas)
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AppError> {
        let account = sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM user_accounts
            WHERE lower(email) = lower($1)
            "#,
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    // Cria uma nova conta, com tratamento específico para e-mail duplicado.
    async fn create_account(&self, email: &str, password_hash: &str) -> Result<UserAccount, AppError> {
        sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO user_accounts (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::EmailAlreadyExists;
                    }
                }
                e.into()
            })
    }
}
