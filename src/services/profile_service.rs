// src/services/profile_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProfileStore,
    models::profile::{CreateProfilePayload, Profile, ProfileFilter},
};

/// Resultado do vínculo conta -> perfil feito durante a resolução.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    NotNeeded,
    Linked,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub profile: Profile,
    pub reconciliation: Reconciliation,
}

#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// Acha o perfil da conta: primeiro pelo id da conta, depois pelo e-mail.
    ///
    /// Quando o perfil vem pelo e-mail e ainda não tem conta vinculada, o
    /// vínculo é gravado antes de retornar. Se a gravação falhar o perfil
    /// é devolvido mesmo assim, com `Reconciliation::Failed`.
    pub async fn resolve(
        &self,
        account_id: Uuid,
        email: Option<&str>,
    ) -> Result<Option<ResolvedProfile>, AppError> {
        let by_id = self
            .profiles
            .find_by_user_id(account_id)
            .await
            .map_err(lookup_failed)?;

        if let Some(profile) = by_id {
            return Ok(Some(ResolvedProfile { profile, reconciliation: Reconciliation::NotNeeded }));
        }

        let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
            return Ok(None);
        };

        let by_email = self
            .profiles
            .find_by_email(email)
            .await
            .map_err(lookup_failed)?;

        let Some(mut profile) = by_email else {
            return Ok(None);
        };

        if profile.user_id.is_some() {
            return Ok(Some(ResolvedProfile { profile, reconciliation: Reconciliation::NotNeeded }));
        }

        let reconciliation = match self.profiles.link_user_id(profile.id, account_id).await {
            Ok(()) => {
                profile.user_id = Some(account_id);
                Reconciliation::Linked
            }
            Err(e) => {
                tracing::warn!(
                    "Falha ao vincular o perfil {} à conta {}: {}",
                    profile.id,
                    account_id,
                    e
                );
                Reconciliation::Failed(e.to_string())
            }
        };

        Ok(Some(ResolvedProfile { profile, reconciliation }))
    }

    pub async fn create_profile(&self, payload: &CreateProfilePayload) -> Result<Profile, AppError> {
        let profile = self.profiles.create_profile(payload).await?;
        tracing::info!("Perfil {} criado com o cargo {}", profile.id, profile.role);
        Ok(profile)
    }

    pub async fn list_profiles(&self, filter: &ProfileFilter) -> Result<Vec<Profile>, AppError> {
        self.profiles.list_profiles(filter).await
    }
}

fn lookup_failed(e: AppError) -> AppError {
    AppError::ProfileLookupFailed(e.to_string())
}
