// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CredentialStore,
    models::auth::Claims,
    services::{
        profile_service::{ProfileService, Reconciliation},
        session::Identity,
    },
};

#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    profiles: ProfileService,
    jwt_secret: String,
    token_ttl: Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        profiles: ProfileService,
        jwt_secret: String,
        token_ttl: Duration,
        bcrypt_cost: u32,
    ) -> Self {
        Self { credentials, profiles, jwt_secret, token_ttl, bcrypt_cost }
    }

    /// Cria a conta de acesso. O cargo só aparece quando o dono cadastrar o perfil.
    pub async fn register_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        // Hashing fora do runtime async
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed_password = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let account = self.credentials.create_account(email.trim(), &hashed_password).await?;
        tracing::info!("Conta {} registrada", account.id);

        self.create_token(account.id, &account.email)
    }

    /// Verifica as credenciais e resolve o perfil. Conta sem perfil não entra.
    pub async fn login_user(&self, email: &str, password: &str) -> Result<(String, Identity), AppError> {
        let account = self
            .credentials
            .find_by_email(email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = account.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let identity = self.identity_for(account.id, &account.email).await?;
        let token = self.create_token(account.id, &account.email)?;

        Ok((token, identity))
    }

    /// Decodifica o token e monta a identidade da requisição.
    pub async fn validate_token(&self, token: &str) -> Result<Identity, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.identity_for(token_data.claims.sub, &token_data.claims.email).await
    }

    async fn identity_for(&self, account_id: Uuid, email: &str) -> Result<Identity, AppError> {
        let resolved = self
            .profiles
            .resolve(account_id, Some(email))
            .await?
            .ok_or(AppError::AccountPendingApproval)?;

        if resolved.reconciliation == Reconciliation::Linked {
            tracing::info!("🔗 Perfil {} vinculado à conta {} no primeiro acesso", resolved.profile.id, account_id);
        }

        Ok(Identity::new(account_id, email, resolved.profile))
    }

    fn create_token(&self, account_id: Uuid, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: account_id,
            email: email.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
