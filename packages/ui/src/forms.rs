//! Form state for the mutating actions and their local checks.
//!
//! A check returns the message to show, or `Ok(())` when the request may be
//! sent. Checks never touch the network; [`crate::workflow::submit`] runs them
//! before entering `Pending`.

use api::{EntryRequest, LoginRequest, NewUser, ProfileUpdate, UserAccount, UserUpdate, VehicleType};
use store::Role;

pub const LOGIN_REQUIRED: &str = "se debe ingresar usuario y contraseña";
pub const CREATE_REQUIRED: &str = LOGIN_REQUIRED;
pub const UPDATE_REQUIRED: &str = "se debe ingresar usuario";
pub const RENAME_REQUIRED: &str = "debe ingresar un nuevo nombre de usuario";
pub const ENTRY_REQUIRED: &str = "ingresa una placa válida y selecciona un tipo de vehículo";

/// Shown for a record whose vehicle type is not in the loaded tariff table.
pub const UNKNOWN_TYPE: &str = "Desconocido";

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require(ok: bool, message: &str) -> Result<(), String> {
    if ok {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn check(&self) -> Result<(), String> {
        require(!blank(&self.username) && !blank(&self.password), LOGIN_REQUIRED)
    }

    pub fn request(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Plate input and vehicle-type selector of the dashboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryForm {
    plate: String,
    pub vehicle_type_id: String,
}

impl EntryForm {
    pub fn plate(&self) -> &str {
        &self.plate
    }

    /// Plates are upper-cased as typed.
    pub fn set_plate(&mut self, value: &str) {
        self.plate = value.to_uppercase();
    }

    pub fn clear_plate(&mut self) {
        self.plate.clear();
    }

    /// Select the first loaded type unless one is already selected.
    pub fn default_type(&mut self, types: &[VehicleType]) {
        if self.vehicle_type_id.is_empty() {
            if let Some(first) = types.first() {
                self.vehicle_type_id = first.id.clone();
            }
        }
    }

    pub fn check(&self) -> Result<(), String> {
        require(!blank(&self.plate) && !self.vehicle_type_id.is_empty(), ENTRY_REQUIRED)
    }

    pub fn request(&self) -> EntryRequest {
        EntryRequest {
            license_plate: self.plate.trim().to_string(),
            vehicle_type_id: self.vehicle_type_id.clone(),
        }
    }
}

/// Display name for a record's vehicle type.
pub fn type_name<'a>(types: &'a [VehicleType], id: &str) -> &'a str {
    types
        .iter()
        .find(|vehicle_type| vehicle_type.id == id)
        .map(|vehicle_type| vehicle_type.name.as_str())
        .unwrap_or(UNKNOWN_TYPE)
}

/// Rename-self modal of the toolbar.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileForm {
    pub username: String,
}

impl ProfileForm {
    pub fn check(&self) -> Result<(), String> {
        require(!blank(&self.username), RENAME_REQUIRED)
    }

    pub fn request(&self) -> ProfileUpdate {
        ProfileUpdate {
            username: self.username.clone(),
        }
    }
}

/// Fields shared by the create and edit user dialogs.
#[derive(Clone, Debug, PartialEq)]
pub struct UserForm {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub is_active: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            role: Role::Common,
            is_active: true,
        }
    }
}

impl UserForm {
    /// Pre-filled from an existing account. The password stays empty; edits never send one.
    pub fn for_edit(account: &UserAccount) -> Self {
        Self {
            username: account.username.clone(),
            password: String::new(),
            role: account.role,
            is_active: account.is_active,
        }
    }

    pub fn check_create(&self) -> Result<(), String> {
        require(!blank(&self.username) && !blank(&self.password), CREATE_REQUIRED)
    }

    pub fn check_update(&self) -> Result<(), String> {
        require(!blank(&self.username), UPDATE_REQUIRED)
    }

    pub fn new_user(&self) -> NewUser {
        NewUser {
            username: self.username.clone(),
            password: self.password.clone(),
            role: self.role,
            is_active: self.is_active,
        }
    }

    pub fn update(&self) -> UserUpdate {
        UserUpdate {
            username: self.username.clone(),
            role: self.role,
            is_active: self.is_active,
        }
    }
}

/// Which user dialog is open.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum UserDialog {
    #[default]
    Closed,
    Create,
    Edit(UserAccount),
}

impl UserDialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, UserDialog::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn car() -> VehicleType {
        VehicleType {
            id: "car".to_string(),
            name: "Carro".to_string(),
            hourly_rate: 2.5,
            description: String::new(),
        }
    }

    fn moto() -> VehicleType {
        VehicleType {
            id: "moto".to_string(),
            name: "Moto".to_string(),
            hourly_rate: 1.0,
            description: String::new(),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            username: "ana".to_string(),
            password: "   ".to_string(),
        };
        assert_eq!(form.check(), Err(LOGIN_REQUIRED.to_string()));

        let form = LoginForm {
            username: "ana".to_string(),
            password: "pw".to_string(),
        };
        assert!(form.check().is_ok());
    }

    #[test]
    fn test_plate_is_uppercased_and_trimmed() {
        let mut form = EntryForm::default();
        form.set_plate(" abc123 ");
        form.vehicle_type_id = "car".to_string();

        assert_eq!(form.plate(), " ABC123 ");
        assert_eq!(form.request().license_plate, "ABC123");

        form.clear_plate();
        assert_eq!(form.plate(), "");
        assert_eq!(form.vehicle_type_id, "car");
    }

    #[test]
    fn test_entry_requires_plate_and_type() {
        let mut form = EntryForm::default();
        form.set_plate("ABC123");
        assert_eq!(form.check(), Err(ENTRY_REQUIRED.to_string()));

        form.default_type(&[car(), moto()]);
        assert_eq!(form.vehicle_type_id, "car");
        assert!(form.check().is_ok());

        form.set_plate("  ");
        assert_eq!(form.check(), Err(ENTRY_REQUIRED.to_string()));
    }

    #[test]
    fn test_default_type_keeps_existing_selection() {
        let mut form = EntryForm {
            vehicle_type_id: "moto".to_string(),
            ..EntryForm::default()
        };
        form.default_type(&[car(), moto()]);
        assert_eq!(form.vehicle_type_id, "moto");

        let mut empty = EntryForm::default();
        empty.default_type(&[]);
        assert!(empty.vehicle_type_id.is_empty());
    }

    #[test]
    fn test_type_name_falls_back() {
        let types = [car()];
        assert_eq!(type_name(&types, "car"), "Carro");
        assert_eq!(type_name(&types, "bus"), UNKNOWN_TYPE);
    }

    #[test]
    fn test_user_form_defaults_and_edit_prefill() {
        let fresh = UserForm::default();
        assert_eq!(fresh.role, Role::Common);
        assert!(fresh.is_active);
        assert_eq!(fresh.check_create(), Err(CREATE_REQUIRED.to_string()));

        let account = UserAccount {
            id: "u1".to_string(),
            username: "luis".to_string(),
            role: Role::Admin,
            is_active: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let edit = UserForm::for_edit(&account);
        assert_eq!(edit.username, "luis");
        assert_eq!(edit.role, Role::Admin);
        assert!(!edit.is_active);
        assert!(edit.password.is_empty());
        assert!(edit.check_update().is_ok());
        assert_eq!(
            edit.update(),
            UserUpdate {
                username: "luis".to_string(),
                role: Role::Admin,
                is_active: false,
            }
        );
    }

    #[test]
    fn test_rename_requires_username() {
        assert_eq!(ProfileForm::default().check(), Err(RENAME_REQUIRED.to_string()));
        let form = ProfileForm {
            username: "nuevo".to_string(),
        };
        assert!(form.check().is_ok());
    }

    #[test]
    fn test_update_requires_username() {
        let form = UserForm {
            username: " ".to_string(),
            ..UserForm::default()
        };
        assert_eq!(form.check_update(), Err(UPDATE_REQUIRED.to_string()));
    }
}
