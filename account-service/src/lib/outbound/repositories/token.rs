use async_trait::async_trait;
use auth::TokenDigest;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::TokenRecord;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTokenRepository {
    pool: PgPool,
}

impl PostgresTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TokenRow {
    hash: String,
    user_id: Uuid,
    scope: String,
    expiry: DateTime<Utc>,
}

impl TryFrom<TokenRow> for TokenRecord {
    type Error = TokenError;

    fn try_from(row: TokenRow) -> Result<Self, Self::Error> {
        Ok(TokenRecord {
            digest: TokenDigest::from_stored(row.hash),
            user_id: UserId(row.user_id),
            scope: row.scope.parse()?,
            expires_at: row.expiry,
        })
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn insert(&self, record: &TokenRecord) -> Result<(), TokenError> {
        sqlx::query(
            r#"
            INSERT INTO tokens (hash, expiry, user_id, scope)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.digest.as_str())
        .bind(record.expires_at)
        .bind(record.user_id.0)
        .bind(record.scope.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| TokenError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_digest(&self, digest: &TokenDigest) -> Result<Option<TokenRecord>, TokenError> {
        let row = sqlx::query_as::<_, TokenRow>(
            r#"
            SELECT hash, user_id, scope, expiry
            FROM tokens
            WHERE hash = $1
            "#,
        )
        .bind(digest.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TokenError::DatabaseError(e.to_string()))?;

        row.map(TokenRecord::try_from).transpose()
    }
}
