//! MySQL implementation of the UserRepository trait.
//!
//! Patient accounts live in the `users` table. The structured address is
//! stored in a JSON column; everything else maps to plain columns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mb_core::domain::entities::User;
use mb_core::domain::value_objects::Address;
use mb_core::errors::DomainError;
use mb_core::repositories::UserRepository;

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, phone, dob, gender, address, image,
    is_email_verified, verification_token, verification_expires,
    created_at, updated_at
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Database {
            message: format!("Failed to get id: {}", e),
        })?;

        let address: Json<Address> =
            row.try_get("address").map_err(|e| DomainError::Database {
                message: format!("Failed to get address: {}", e),
            })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid user UUID: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| DomainError::Database {
                message: format!("Failed to get name: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Database {
                message: format!("Failed to get email: {}", e),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Database {
                message: format!("Failed to get phone: {}", e),
            })?,
            dob: row.try_get("dob").map_err(|e| DomainError::Database {
                message: format!("Failed to get dob: {}", e),
            })?,
            gender: row.try_get("gender").map_err(|e| DomainError::Database {
                message: format!("Failed to get gender: {}", e),
            })?,
            address: address.0,
            image: row.try_get("image").map_err(|e| DomainError::Database {
                message: format!("Failed to get image: {}", e),
            })?,
            is_email_verified: row
                .try_get("is_email_verified")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get is_email_verified: {}", e),
                })?,
            verification_token: row
                .try_get("verification_token")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get verification_token: {}", e),
                })?,
            verification_expires: row
                .try_get::<Option<DateTime<Utc>>, _>("verification_expires")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get verification_expires: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = ?
            LIMIT 1
        "#
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = ?
            LIMIT 1
        "#
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user by email: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE verification_token = ?
            LIMIT 1
        "#
        );

        let result = sqlx::query(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user by verification token: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, password_hash, phone, dob, gender, address,
                image, is_email_verified, verification_token,
                verification_expires, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.phone)
            .bind(&user.dob)
            .bind(&user.gender)
            .bind(Json(&user.address))
            .bind(&user.image)
            .bind(user.is_email_verified)
            .bind(&user.verification_token)
            .bind(user.verification_expires)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to create user: {}", e),
            })?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users
            SET name = ?, email = ?, password_hash = ?, phone = ?, dob = ?,
                gender = ?, address = ?, image = ?, is_email_verified = ?,
                verification_token = ?, verification_expires = ?, updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.phone)
            .bind(&user.dob)
            .bind(&user.gender)
            .bind(Json(&user.address))
            .bind(&user.image)
            .bind(user.is_email_verified)
            .bind(&user.verification_token)
            .bind(user.verification_expires)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update user: {}", e),
            })?;

        Ok(())
    }
}
