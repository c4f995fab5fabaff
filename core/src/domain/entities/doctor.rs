//! Doctor entity with its booked-slot calendar.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_objects::Address;

/// A doctor listed in the directory.
///
/// `slots_booked` maps a date key (`DD_MM_YYYY`) to the times already taken
/// on that day. Date keys with no remaining times are removed rather than
/// kept as empty lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Doctor {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Login email, unique
    pub email: String,
    /// Bcrypt hash of the password
    pub password_hash: String,
    /// Portrait URL
    pub image: String,
    /// Medical speciality, e.g. "Dermatologist"
    pub speciality: String,
    /// Qualification line, e.g. "MBBS"
    pub degree: String,
    /// Experience line, e.g. "4 Years"
    pub experience: String,
    /// Short biography
    pub about: String,
    /// Whether the doctor currently accepts bookings
    pub available: bool,
    /// Consultation fee in whole currency units
    pub fees: u32,
    /// Clinic address
    pub address: Address,
    /// Taken times per date key
    pub slots_booked: HashMap<String, Vec<String>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    /// Whether `slot_time` on `slot_date` is already taken.
    pub fn is_slot_booked(&self, slot_date: &str, slot_time: &str) -> bool {
        self.slots_booked
            .get(slot_date)
            .map(|times| times.iter().any(|t| t == slot_time))
            .unwrap_or(false)
    }

    /// Reserves `slot_time` on `slot_date`.
    ///
    /// Returns `false` without changing the calendar when the slot is
    /// already taken. A time never appears twice under one date key.
    pub fn reserve_slot(&mut self, slot_date: &str, slot_time: &str) -> bool {
        let times = self.slots_booked.entry(slot_date.to_string()).or_default();
        if times.iter().any(|t| t == slot_time) {
            return false;
        }
        times.push(slot_time.to_string());
        self.updated_at = Utc::now();
        true
    }

    /// Releases `slot_time` on `slot_date`, if present.
    ///
    /// Removes the date key entirely once its last time is released.
    pub fn release_slot(&mut self, slot_date: &str, slot_time: &str) {
        let emptied = match self.slots_booked.get_mut(slot_date) {
            Some(times) => {
                times.retain(|t| t != slot_time);
                times.is_empty()
            }
            None => return,
        };
        if emptied {
            self.slots_booked.remove(slot_date);
        }
        self.updated_at = Utc::now();
    }
}
