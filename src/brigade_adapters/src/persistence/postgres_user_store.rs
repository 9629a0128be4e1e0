use async_trait::async_trait;
use brigade_core::{Email, Role, User, UserStore, UserStoreError};
use chrono::NaiveDate;
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

/// Postgres-backed identity store.
///
/// The role sum type flattens to a tag column plus nullable
/// role-specific attribute columns.
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    username: Option<String>,
    password_hash: String,
    email_verified: bool,
    role: String,
    table_id: Option<Uuid>,
    birth_date: Option<NaiveDate>,
    station: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::from(row.email))
            .map_err(|e| UserStoreError::Database(e.to_string()))?;

        let role = match row.role.as_str() {
            "customer" => Role::Customer {
                table_id: row.table_id,
            },
            "waiter" => Role::Waiter {
                birth_date: row.birth_date,
            },
            "kitchen" => Role::Kitchen {
                station: row.station,
            },
            "admin" => Role::Admin,
            other => {
                return Err(UserStoreError::Database(format!(
                    "unknown role tag: {other}"
                )));
            }
        };

        Ok(User::restore(
            row.id,
            email,
            row.username,
            Secret::from(row.password_hash),
            row.email_verified,
            role,
        ))
    }
}

const SELECT_USER: &str = "SELECT id, email, username, password_hash, email_verified, \
     role, table_id, birth_date, station FROM users";

#[async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::Database(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::Database(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Creating unverified user in PostgreSQL", skip_all)]
    async fn create_unverified(
        &self,
        email: Email,
        password_hash: Secret<String>,
    ) -> Result<User, UserStoreError> {
        let user = User::unverified(email, password_hash);

        sqlx::query(
            r#"
                INSERT INTO users (id, email, username, password_hash, email_verified, role)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.username())
        .bind(user.password_hash().expose_secret())
        .bind(user.email_verified())
        .bind(user.role().tag())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserStoreError::EmailTaken;
                }
            }
            UserStoreError::Database(e.to_string())
        })?;

        Ok(user)
    }

    #[tracing::instrument(name = "Marking user verified in PostgreSQL", skip_all)]
    async fn mark_verified(&self, id: Uuid) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET email_verified = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}
