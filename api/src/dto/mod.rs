//! Request and response data transfer objects.

pub mod doctor;
pub mod user;
pub mod views;

pub use doctor::*;
pub use user::*;
pub use views::*;
