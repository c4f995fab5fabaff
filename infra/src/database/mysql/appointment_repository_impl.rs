//! MySQL implementation of the AppointmentRepository trait.
//!
//! Appointments live in the `appointments` table. The patient and doctor
//! snapshots taken at booking time are stored as JSON columns (`user_data`,
//! `doc_data`), as is the optional payment record. The two owner-scoped
//! delete operations run as single atomic statements so a patient can never
//! remove somebody else's booking.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mb_core::domain::entities::Appointment;
use mb_core::domain::value_objects::{DoctorSnapshot, PatientSnapshot, PaymentRecord};
use mb_core::errors::DomainError;
use mb_core::repositories::AppointmentRepository;

const APPOINTMENT_COLUMNS: &str = r#"
    id, user_id, doctor_id, user_data, doc_data, patient_email, amount,
    slot_date, slot_time, booked_at, cancelled, is_completed, is_confirmed,
    patient_visited, show_to_user, payment, payment_method, payment_info
"#;

/// MySQL implementation of AppointmentRepository
pub struct MySqlAppointmentRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAppointmentRepository {
    /// Create a new MySQL appointment repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Appointment entity
    fn row_to_appointment(row: &sqlx::mysql::MySqlRow) -> Result<Appointment, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Database {
            message: format!("Failed to get id: {}", e),
        })?;

        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Database {
            message: format!("Failed to get user_id: {}", e),
        })?;

        let doctor_id: String = row
            .try_get("doctor_id")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get doctor_id: {}", e),
            })?;

        let patient: Json<PatientSnapshot> =
            row.try_get("user_data").map_err(|e| DomainError::Database {
                message: format!("Failed to get user_data: {}", e),
            })?;

        let doctor: Json<DoctorSnapshot> =
            row.try_get("doc_data").map_err(|e| DomainError::Database {
                message: format!("Failed to get doc_data: {}", e),
            })?;

        let payment_info: Option<Json<PaymentRecord>> = row
            .try_get("payment_info")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get payment_info: {}", e),
            })?;

        Ok(Appointment {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid appointment UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Database {
                message: format!("Invalid user UUID: {}", e),
            })?,
            doctor_id: Uuid::parse_str(&doctor_id).map_err(|e| DomainError::Database {
                message: format!("Invalid doctor UUID: {}", e),
            })?,
            patient: patient.0,
            doctor: doctor.0,
            patient_email: row
                .try_get("patient_email")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get patient_email: {}", e),
                })?,
            amount: row.try_get("amount").map_err(|e| DomainError::Database {
                message: format!("Failed to get amount: {}", e),
            })?,
            slot_date: row
                .try_get("slot_date")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get slot_date: {}", e),
                })?,
            slot_time: row
                .try_get("slot_time")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get slot_time: {}", e),
                })?,
            booked_at: row
                .try_get::<DateTime<Utc>, _>("booked_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get booked_at: {}", e),
                })?,
            cancelled: row
                .try_get("cancelled")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get cancelled: {}", e),
                })?,
            is_completed: row
                .try_get("is_completed")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get is_completed: {}", e),
                })?,
            is_confirmed: row
                .try_get("is_confirmed")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get is_confirmed: {}", e),
                })?,
            patient_visited: row
                .try_get("patient_visited")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get patient_visited: {}", e),
                })?,
            show_to_user: row
                .try_get("show_to_user")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get show_to_user: {}", e),
                })?,
            payment: row.try_get("payment").map_err(|e| DomainError::Database {
                message: format!("Failed to get payment: {}", e),
            })?,
            payment_method: row
                .try_get("payment_method")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get payment_method: {}", e),
                })?,
            payment_info: payment_info.map(|json| json.0),
        })
    }
}

#[async_trait]
impl AppointmentRepository for MySqlAppointmentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, DomainError> {
        let query = format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE id = ?
            LIMIT 1
        "#
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find appointment by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_appointment(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Appointment>, DomainError> {
        let query = format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE user_id = ? AND show_to_user = TRUE
            ORDER BY booked_at DESC
        "#
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to list user appointments: {}", e),
            })?;

        let mut appointments = Vec::with_capacity(rows.len());
        for row in rows {
            appointments.push(Self::row_to_appointment(&row)?);
        }

        Ok(appointments)
    }

    async fn find_by_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, DomainError> {
        let query = format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE doctor_id = ?
            ORDER BY booked_at DESC
        "#
        );

        let rows = sqlx::query(&query)
            .bind(doctor_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to list doctor appointments: {}", e),
            })?;

        let mut appointments = Vec::with_capacity(rows.len());
        for row in rows {
            appointments.push(Self::row_to_appointment(&row)?);
        }

        Ok(appointments)
    }

    async fn create(&self, appointment: &Appointment) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO appointments (
                id, user_id, doctor_id, user_data, doc_data, patient_email,
                amount, slot_date, slot_time, booked_at, cancelled,
                is_completed, is_confirmed, patient_visited, show_to_user,
                payment, payment_method, payment_info
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(appointment.id.to_string())
            .bind(appointment.user_id.to_string())
            .bind(appointment.doctor_id.to_string())
            .bind(Json(&appointment.patient))
            .bind(Json(&appointment.doctor))
            .bind(&appointment.patient_email)
            .bind(appointment.amount)
            .bind(&appointment.slot_date)
            .bind(&appointment.slot_time)
            .bind(appointment.booked_at)
            .bind(appointment.cancelled)
            .bind(appointment.is_completed)
            .bind(appointment.is_confirmed)
            .bind(appointment.patient_visited)
            .bind(appointment.show_to_user)
            .bind(appointment.payment)
            .bind(&appointment.payment_method)
            .bind(appointment.payment_info.as_ref().map(Json))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to create appointment: {}", e),
            })?;

        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError> {
        let query = r#"
            UPDATE appointments
            SET cancelled = ?, is_completed = ?, is_confirmed = ?,
                patient_visited = ?, show_to_user = ?, payment = ?,
                payment_method = ?, payment_info = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(appointment.cancelled)
            .bind(appointment.is_completed)
            .bind(appointment.is_confirmed)
            .bind(appointment.patient_visited)
            .bind(appointment.show_to_user)
            .bind(appointment.payment)
            .bind(&appointment.payment_method)
            .bind(appointment.payment_info.as_ref().map(Json))
            .bind(appointment.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update appointment: {}", e),
            })?;

        Ok(())
    }

    async fn delete_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Appointment>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Database {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        let select = format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE id = ? AND user_id = ?
            FOR UPDATE
        "#
        );

        let row = sqlx::query(&select)
            .bind(id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to select appointment for delete: {}", e),
            })?;

        let Some(row) = row else {
            // Dropping the transaction rolls it back.
            return Ok(None);
        };
        let appointment = Self::row_to_appointment(&row)?;

        sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete appointment: {}", e),
            })?;

        tx.commit().await.map_err(|e| DomainError::Database {
            message: format!("Failed to commit appointment delete: {}", e),
        })?;

        Ok(Some(appointment))
    }

    async fn delete_history(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let query = r#"
            DELETE FROM appointments
            WHERE id = ? AND user_id = ?
                AND (cancelled = TRUE OR is_completed = TRUE)
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete appointment history: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
