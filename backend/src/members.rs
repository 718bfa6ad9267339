use sqlx::PgPool;
use uuid::Uuid;
use time::OffsetDateTime;
use shared::models::MemberAccount;
use crate::error::ApiError;

#[derive(Debug, sqlx::FromRow)]
pub struct MemberCredentials {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
    pub password_hash: String,
}

impl MemberCredentials {
    pub fn into_account(self) -> MemberAccount {
        MemberAccount { id: self.id, name: self.name, email: self.email, created_at: self.created_at }
    }
}

pub struct MemberRepository;

impl MemberRepository {
    pub async fn list(pool: &PgPool) -> Result<Vec<MemberAccount>, ApiError> {
        let members = sqlx::query_as::<_, MemberAccount>(
            "SELECT id, name, email, created_at FROM members ORDER BY created_at"
        )
        .fetch_all(pool)
        .await?;
        Ok(members)
    }

    pub async fn create(pool: &PgPool, name: &str, email: &str, password_hash: &str) -> Result<MemberAccount, ApiError> {
        sqlx::query_as::<_, MemberAccount>(
            "INSERT INTO members (id, name, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, created_at"
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return ApiError::DuplicateEmail;
                }
            }
            ApiError::from(e)
        })
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<MemberCredentials>, ApiError> {
        let member = sqlx::query_as::<_, MemberCredentials>(
            "SELECT id, name, email, created_at, password_hash FROM members WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;
        Ok(member)
    }
}
