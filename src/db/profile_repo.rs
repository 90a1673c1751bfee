// src/db/profile_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::ProfileStore,
    models::profile::{CreateProfilePayload, Profile, ProfileFilter},
};

const PROFILE_COLUMNS: &str =
    "id, user_id, email, full_name, role, district, branch, joining_date, created_at";

#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE lower(email) = lower($1)"
        ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn find_by_id(&self, profile_id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
            .bind(profile_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn link_user_id(&self, profile_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        // Só preenche se ainda estiver vazio; outro login pode ter chegado antes
        sqlx::query("UPDATE profiles SET user_id = $2 WHERE id = $1 AND user_id IS NULL")
            .bind(profile_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn create_profile(&self, input: &CreateProfilePayload) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (email, full_name, role, district, branch, joining_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(input.role.as_str())
            .bind(&input.district)
            .bind(&input.branch)
            .bind(input.joining_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                // Um perfil por e-mail
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::EmailAlreadyExists;
                    }
                }
                e.into()
            })
    }

    async fn list_profiles(&self, filter: &ProfileFilter) -> Result<Vec<Profile>, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE TRUE"));

        if let Some(role) = filter.role {
            query.push(" AND role = ").push_bind(role.as_str());
        }
        if let Some(district) = &filter.district {
            query.push(" AND lower(trim(district)) = lower(trim(").push_bind(district.clone()).push("))");
        }
        query.push(" ORDER BY full_name ASC");

        let profiles = query
            .build_query_as::<Profile>()
            .fetch_all(&self.pool)
            .await?;

        Ok(profiles)
    }
}
