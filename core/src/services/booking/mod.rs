//! Booking service module
//!
//! Slot booking and cancellation, appointment history, cash payment
//! recording and the public doctor directory. All slot-map mutations for a
//! doctor run under that doctor's entry in the [`SlotGuard`].

mod service;
mod slot_guard;

#[cfg(test)]
mod tests;

pub use service::BookingService;
pub use slot_guard::SlotGuard;
