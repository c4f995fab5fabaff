//! MySQL implementation of the DoctorRepository trait.
//!
//! Doctor profiles live in the `doctors` table. The practice address and
//! the booked-slot calendar are stored as JSON columns; the calendar maps a
//! `DD_MM_YYYY` date key to the list of taken time labels.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mb_core::domain::entities::Doctor;
use mb_core::domain::value_objects::Address;
use mb_core::errors::DomainError;
use mb_core::repositories::DoctorRepository;

const DOCTOR_COLUMNS: &str = r#"
    id, name, email, password_hash, image, speciality, degree, experience,
    about, available, fees, address, slots_booked, created_at, updated_at
"#;

/// MySQL implementation of DoctorRepository
pub struct MySqlDoctorRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlDoctorRepository {
    /// Create a new MySQL doctor repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Doctor entity
    fn row_to_doctor(row: &sqlx::mysql::MySqlRow) -> Result<Doctor, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Database {
            message: format!("Failed to get id: {}", e),
        })?;

        let address: Json<Address> =
            row.try_get("address").map_err(|e| DomainError::Database {
                message: format!("Failed to get address: {}", e),
            })?;

        let slots_booked: Json<HashMap<String, Vec<String>>> = row
            .try_get("slots_booked")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get slots_booked: {}", e),
            })?;

        Ok(Doctor {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid doctor UUID: {}", e),
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
            image: row.try_get("image").map_err(|e| DomainError::Database {
                message: format!("Failed to get image: {}", e),
            })?,
            speciality: row
                .try_get("speciality")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get speciality: {}", e),
                })?,
            degree: row.try_get("degree").map_err(|e| DomainError::Database {
                message: format!("Failed to get degree: {}", e),
            })?,
            experience: row
                .try_get("experience")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get experience: {}", e),
                })?,
            about: row.try_get("about").map_err(|e| DomainError::Database {
                message: format!("Failed to get about: {}", e),
            })?,
            available: row
                .try_get("available")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get available: {}", e),
                })?,
            fees: row.try_get("fees").map_err(|e| DomainError::Database {
                message: format!("Failed to get fees: {}", e),
            })?,
            address: address.0,
            slots_booked: slots_booked.0,
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
impl DoctorRepository for MySqlDoctorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, DomainError> {
        let query = format!(
            r#"
            SELECT {DOCTOR_COLUMNS}
            FROM doctors
            WHERE id = ?
            LIMIT 1
        "#
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find doctor by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_doctor(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, DomainError> {
        let query = format!(
            r#"
            SELECT {DOCTOR_COLUMNS}
            FROM doctors
            WHERE email = ?
            LIMIT 1
        "#
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find doctor by email: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_doctor(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Doctor>, DomainError> {
        let query = format!(
            r#"
            SELECT {DOCTOR_COLUMNS}
            FROM doctors
            ORDER BY created_at ASC
        "#
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to list doctors: {}", e),
            })?;

        let mut doctors = Vec::with_capacity(rows.len());
        for row in rows {
            doctors.push(Self::row_to_doctor(&row)?);
        }

        Ok(doctors)
    }

    async fn update(&self, doctor: &Doctor) -> Result<(), DomainError> {
        let query = r#"
            UPDATE doctors
            SET name = ?, email = ?, password_hash = ?, image = ?,
                speciality = ?, degree = ?, experience = ?, about = ?,
                available = ?, fees = ?, address = ?, slots_booked = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(&doctor.name)
            .bind(&doctor.email)
            .bind(&doctor.password_hash)
            .bind(&doctor.image)
            .bind(&doctor.speciality)
            .bind(&doctor.degree)
            .bind(&doctor.experience)
            .bind(&doctor.about)
            .bind(doctor.available)
            .bind(doctor.fees)
            .bind(Json(&doctor.address))
            .bind(Json(&doctor.slots_booked))
            .bind(doctor.updated_at)
            .bind(doctor.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update doctor: {}", e),
            })?;

        Ok(())
    }
}
