mod shell;
pub use shell::{Guarded, ProtectedShell};

mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod users;
pub use users::Users;

mod not_found;
pub use not_found::NotFound;
