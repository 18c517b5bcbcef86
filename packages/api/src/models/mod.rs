//! Wire models exchanged with the parking service.

mod auth;
mod parking;
mod user;

pub use auth::{LoginRequest, LoginResponse};
pub use parking::{EntryRequest, ExitRequest, ParkingRecord, Tab, VehicleType};
pub use user::{ActiveToggle, NewUser, ProfileUpdate, UserAccount, UserUpdate};
