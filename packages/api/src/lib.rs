//! # API crate — client side of the parking service contract
//!
//! Everything the console knows about the remote record/billing/auth service
//! lives here. Screens never build URLs or parse error bodies themselves; they
//! call a typed method on [`Gateway`] and get back a value or an [`ApiError`]
//! whose `Display` is the text to show.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`gateway`] | [`Gateway`] and [`Call`]: bearer attachment, status handling, error-message extraction, fallbacks |
//! | [`endpoints`] | One async method per endpoint, plus the per-operation fallback messages |
//! | [`transport`] | The [`Transport`] seam and the `reqwest`-backed [`HttpTransport`] |
//! | [`models`] | Wire types: vehicle types, parking records, user accounts, login, request bodies |
//! | [`error`] | [`ApiError`] and [`TransportError`] |
//!
//! [`StubTransport`] is a scripted transport for tests in this and downstream crates.
//!
//! ## Endpoints
//!
//! | Method | Verb & path | Auth |
//! |--------|-------------|------|
//! | `login` | `POST /login` | none |
//! | `vehicle_types` | `GET /vehicle-types` | bearer |
//! | `records` | `GET /parking/{current,history}` | bearer |
//! | `record` | `GET /parking/{id}` | bearer |
//! | `register_entry` / `register_exit` | `POST /parking/entry`, `POST /parking/exit` | bearer |
//! | `update_profile` | `PUT /users/me` | bearer |
//! | `users` / `create_user` | `GET`/`POST /admin/users` | bearer, admin |
//! | `update_user` / `delete_user` | `PUT`/`DELETE /admin/users/{id}` | bearer, admin |
//! | `set_user_active` | `PATCH /admin/users/{id}/active` | bearer, admin |

pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod models;
pub mod transport;

mod stub;
pub use stub::StubTransport;

pub use error::{ApiError, TransportError};
pub use gateway::{Call, Gateway};
pub use models::{
    ActiveToggle, EntryRequest, ExitRequest, LoginRequest, LoginResponse, NewUser, ParkingRecord,
    ProfileUpdate, Tab, UserAccount, UserUpdate, VehicleType,
};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

pub use store::{Credential, Role};
