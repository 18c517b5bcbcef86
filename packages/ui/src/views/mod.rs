mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod login;
pub use login::LoginView;

mod dashboard;
pub use dashboard::DashboardView;

mod users;
pub use users::UsersView;
