//! # Screen actions
//!
//! One async driver per mutating control. Each runs its request through
//! [`submit`] and then applies what the action owns:
//!
//! | Action | On success |
//! |--------|------------|
//! | [`log_in`] | store the credential in the session |
//! | [`register_entry`] | clear the plate, re-read the list if it is the current tab |
//! | [`register_exit`] | re-read the list |
//! | [`rename_self`] | reset the field, close the dialog |
//! | [`save_user`] | reset the fields, close the dialog, re-read the accounts |
//! | [`delete_user`] / [`set_user_active`] | re-read the accounts |
//!
//! On failure nothing but the workflow changes: fields keep their values and
//! dialogs stay open, so the operator can correct and retry. The returned
//! [`Rejected`] is only for the caller's session bookkeeping.
//!
//! Re-reads are handed back through `resync` because the screens run them as
//! their own tasks.

use api::{ExitRequest, Gateway, Tab, Transport};
use store::CredentialStore;

use crate::forms::{EntryForm, LoginForm, ProfileForm, UserDialog, UserForm};
use crate::records::RecordSync;
use crate::session::AuthSession;
use crate::state::StateCell;
use crate::workflow::{submit, Rejected, Workflow};

pub async fn log_in<W, F, A, T, S, K>(
    workflow: &mut W,
    form: &F,
    session: &mut A,
    gateway: &Gateway<T, S>,
) -> Result<(), Rejected>
where
    W: StateCell<Workflow>,
    F: StateCell<LoginForm>,
    A: StateCell<AuthSession<K>>,
    T: Transport,
    S: CredentialStore,
    K: CredentialStore,
{
    let (check, request) = form
        .inspect(|form| (form.check(), form.request()))
        .ok_or(Rejected::Busy)?;
    let response = submit(workflow, check, gateway.login(&request)).await?;
    tracing::debug!(
        expires_in = ?response.expires_in,
        token_type = ?response.token_type,
        "login accepted"
    );
    session.update(|session| session.sign_in(response.into_credential()));
    Ok(())
}

pub async fn register_entry<W, E, R, T, S>(
    workflow: &mut W,
    entry: &mut E,
    sync: &R,
    gateway: &Gateway<T, S>,
    resync: impl FnOnce(),
) -> Result<(), Rejected>
where
    W: StateCell<Workflow>,
    E: StateCell<EntryForm>,
    R: StateCell<RecordSync>,
    T: Transport,
    S: CredentialStore,
{
    let (check, request) = entry
        .inspect(|form| (form.check(), form.request()))
        .ok_or(Rejected::Busy)?;
    submit(workflow, check, gateway.register_entry(&request)).await?;

    tracing::info!(plate = %request.license_plate, "vehicle entry registered");
    entry.update(EntryForm::clear_plate);
    // History never shows open stays, so it has nothing new to show.
    if sync.inspect(RecordSync::tab) == Some(Tab::Current) {
        resync();
    }
    Ok(())
}

pub async fn register_exit<W, T, S>(
    workflow: &mut W,
    plate: String,
    gateway: &Gateway<T, S>,
    resync: impl FnOnce(),
) -> Result<(), Rejected>
where
    W: StateCell<Workflow>,
    T: Transport,
    S: CredentialStore,
{
    let request = ExitRequest {
        license_plate: plate,
    };
    submit(workflow, Ok(()), gateway.register_exit(&request)).await?;

    tracing::info!(plate = %request.license_plate, "vehicle exit registered");
    resync();
    Ok(())
}

pub async fn rename_self<W, F, O, T, S>(
    workflow: &mut W,
    form: &mut F,
    open: &mut O,
    gateway: &Gateway<T, S>,
) -> Result<(), Rejected>
where
    W: StateCell<Workflow>,
    F: StateCell<ProfileForm>,
    O: StateCell<bool>,
    T: Transport,
    S: CredentialStore,
{
    let (check, request) = form
        .inspect(|form| (form.check(), form.request()))
        .ok_or(Rejected::Busy)?;
    submit(workflow, check, gateway.update_profile(&request)).await?;

    tracing::info!("username updated");
    form.update(|form| *form = ProfileForm::default());
    open.update(|open| *open = false);
    Ok(())
}

/// Create or update, depending on which dialog is open. A closed dialog has
/// nothing to save.
pub async fn save_user<W, D, F, T, S>(
    workflow: &mut W,
    dialog: &mut D,
    form: &mut F,
    gateway: &Gateway<T, S>,
    resync: impl FnOnce(),
) -> Result<(), Rejected>
where
    W: StateCell<Workflow>,
    D: StateCell<UserDialog>,
    F: StateCell<UserForm>,
    T: Transport,
    S: CredentialStore,
{
    let current = dialog.inspect(UserDialog::clone).ok_or(Rejected::Busy)?;
    let snapshot = form.inspect(UserForm::clone).ok_or(Rejected::Busy)?;

    match current {
        UserDialog::Closed => return Ok(()),
        UserDialog::Create => {
            let request = snapshot.new_user();
            submit(workflow, snapshot.check_create(), gateway.create_user(&request)).await?;
        }
        UserDialog::Edit(account) => {
            let request = snapshot.update();
            submit(
                workflow,
                snapshot.check_update(),
                gateway.update_user(&account.id, &request),
            )
            .await?;
        }
    }

    tracing::info!(username = %snapshot.username, "user saved");
    dialog.update(|dialog| *dialog = UserDialog::Closed);
    form.update(|form| *form = UserForm::default());
    resync();
    Ok(())
}

pub async fn delete_user<W, T, S>(
    workflow: &mut W,
    id: &str,
    gateway: &Gateway<T, S>,
    resync: impl FnOnce(),
) -> Result<(), Rejected>
where
    W: StateCell<Workflow>,
    T: Transport,
    S: CredentialStore,
{
    submit(workflow, Ok(()), gateway.delete_user(id)).await?;
    tracing::info!(%id, "user deleted");
    resync();
    Ok(())
}

pub async fn set_user_active<W, T, S>(
    workflow: &mut W,
    id: &str,
    is_active: bool,
    gateway: &Gateway<T, S>,
    resync: impl FnOnce(),
) -> Result<(), Rejected>
where
    W: StateCell<Workflow>,
    T: Transport,
    S: CredentialStore,
{
    submit(workflow, Ok(()), gateway.set_user_active(id, is_active)).await?;
    tracing::info!(%id, is_active, "user status changed");
    resync();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{ENTRY_REQUIRED, RENAME_REQUIRED};
    use crate::records::refresh;
    use crate::state::SharedCell;
    use crate::workflow::Phase;
    use api::endpoints::fallback;
    use api::{ApiError, Method, StubTransport, UserAccount};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::cell::Cell;
    use store::{Credential, MemoryStore, Role};

    fn gateway() -> (Gateway<StubTransport, MemoryStore>, StubTransport) {
        let transport = StubTransport::new();
        let store = MemoryStore::new();
        store.save(&Credential::new("tok", Role::Admin));
        (Gateway::new(transport.clone(), store), transport)
    }

    fn entry(plate: &str) -> SharedCell<EntryForm> {
        let mut form = EntryForm::default();
        form.set_plate(plate);
        form.vehicle_type_id = "car".to_string();
        SharedCell::new(form)
    }

    fn account() -> UserAccount {
        UserAccount {
            id: "u7".to_string(),
            username: "ana".to_string(),
            role: Role::Common,
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_entry_success_clears_plate_and_rereads_current() {
        let (gateway, transport) = gateway();
        transport.respond_json(201, json!({"id": "r1"})).respond_json(
            200,
            json!([{"vehicle_type_id":"car","license_plate":"ABC123","entry_time":"2024-05-01T10:00:00Z"}]),
        );
        let mut workflow = SharedCell::new(Workflow::new());
        let mut form = entry("abc123");
        let mut sync = SharedCell::new(RecordSync::new(Tab::Current));
        let rereads = Cell::new(0);
        let resync = || rereads.set(rereads.get() + 1);

        let result = register_entry(&mut workflow, &mut form, &sync, &gateway, resync).await;

        assert_eq!(result, Ok(()));
        assert_eq!(form.get().plate(), "");
        assert_eq!(form.get().vehicle_type_id, "car");
        assert_eq!(workflow.get().phase(), Phase::Done);
        assert_eq!(rereads.get(), 1);
        assert_eq!(
            transport.last_request().unwrap().body,
            Some(json!({"license_plate": "ABC123", "vehicle_type_id": "car"}))
        );

        refresh(&mut sync, &gateway).await.unwrap();
        assert_eq!(transport.last_request().unwrap().path, "/parking/current");
        assert_eq!(sync.get().records()[0].license_plate, "ABC123");
    }

    #[tokio::test]
    async fn test_entry_from_history_tab_does_not_reread() {
        let (gateway, transport) = gateway();
        transport.respond_json(201, json!({}));
        let mut workflow = SharedCell::new(Workflow::new());
        let mut form = entry("XYZ9");
        let sync = SharedCell::new(RecordSync::new(Tab::History));
        let rereads = Cell::new(0);
        let resync = || rereads.set(rereads.get() + 1);

        register_entry(&mut workflow, &mut form, &sync, &gateway, resync)
            .await
            .unwrap();

        assert_eq!(form.get().plate(), "");
        assert_eq!(rereads.get(), 0);
    }

    #[tokio::test]
    async fn test_entry_failure_keeps_plate() {
        let (gateway, transport) = gateway();
        transport.respond_json(409, json!({"error": "el vehículo ya se encuentra en el parqueadero"}));
        let mut workflow = SharedCell::new(Workflow::new());
        let mut form = entry("ABC123");
        let sync = SharedCell::new(RecordSync::new(Tab::Current));
        let rereads = Cell::new(0);
        let resync = || rereads.set(rereads.get() + 1);

        let result = register_entry(&mut workflow, &mut form, &sync, &gateway, resync).await;

        assert_eq!(
            result,
            Err(Rejected::Failed(ApiError::new(
                Some(409),
                "el vehículo ya se encuentra en el parqueadero"
            )))
        );
        assert_eq!(form.get().plate(), "ABC123");
        assert_eq!(rereads.get(), 0);
        let workflow = workflow.get();
        assert!(!workflow.is_busy());
        assert_eq!(workflow.error(), Some("el vehículo ya se encuentra en el parqueadero"));
    }

    #[tokio::test]
    async fn test_blank_plate_sends_nothing() {
        let (gateway, transport) = gateway();
        let mut workflow = SharedCell::new(Workflow::new());
        let mut form = entry("   ");
        let sync = SharedCell::new(RecordSync::new(Tab::Current));
        let rereads = Cell::new(0);
        let resync = || rereads.set(rereads.get() + 1);

        let result = register_entry(&mut workflow, &mut form, &sync, &gateway, resync).await;

        assert_eq!(result, Err(Rejected::Invalid(ENTRY_REQUIRED.to_string())));
        assert_eq!(transport.request_count(), 0);
        assert_eq!(rereads.get(), 0);
        assert_eq!(workflow.get().error(), Some(ENTRY_REQUIRED));
    }

    #[tokio::test]
    async fn test_exit_rereads_only_on_success() {
        let (gateway, transport) = gateway();
        transport
            .respond_json(200, json!({"total_charge": 5.0}))
            .respond_json(404, json!({"error": "vehículo no encontrado"}));
        let mut workflow = SharedCell::new(Workflow::new());
        let rereads = Cell::new(0);
        let resync = || rereads.set(rereads.get() + 1);

        register_exit(&mut workflow, "ABC123".to_string(), &gateway, resync)
            .await
            .unwrap();
        let second = register_exit(&mut workflow, "NOPE".to_string(), &gateway, resync).await;

        assert_eq!(rereads.get(), 1);
        assert!(second.is_err());
        assert_eq!(workflow.get().error(), Some("vehículo no encontrado"));
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"license_plate": "ABC123"}))
        );
    }

    #[tokio::test]
    async fn test_rename_success_closes_and_resets() {
        let (gateway, transport) = gateway();
        transport.respond_json(200, json!({}));
        let mut workflow = SharedCell::new(Workflow::new());
        let mut form = SharedCell::new(ProfileForm {
            username: "nuevo".to_string(),
        });
        let mut open = SharedCell::new(true);

        rename_self(&mut workflow, &mut form, &mut open, &gateway)
            .await
            .unwrap();

        assert!(!open.get());
        assert_eq!(form.get(), ProfileForm::default());
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/users/me");
        assert_eq!(request.body, Some(json!({"username": "nuevo"})));
    }

    #[tokio::test]
    async fn test_rename_failure_keeps_dialog_open() {
        let (gateway, transport) = gateway();
        transport.respond(500, "");
        let mut workflow = SharedCell::new(Workflow::new());
        let mut form = SharedCell::new(ProfileForm {
            username: "nuevo".to_string(),
        });
        let mut open = SharedCell::new(true);

        let result = rename_self(&mut workflow, &mut form, &mut open, &gateway).await;

        assert!(result.is_err());
        assert!(open.get());
        assert_eq!(form.get().username, "nuevo");
        assert_eq!(workflow.get().error(), Some(fallback::RENAME));
    }

    #[tokio::test]
    async fn test_rename_blank_keeps_dialog_open() {
        let (gateway, transport) = gateway();
        let mut workflow = SharedCell::new(Workflow::new());
        let mut form = SharedCell::new(ProfileForm::default());
        let mut open = SharedCell::new(true);

        let result = rename_self(&mut workflow, &mut form, &mut open, &gateway).await;

        assert_eq!(result, Err(Rejected::Invalid(RENAME_REQUIRED.to_string())));
        assert!(open.get());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_success_closes_resets_and_rereads() {
        let (gateway, transport) = gateway();
        transport.respond_json(201, json!({"id": "u9"}));
        let mut workflow = SharedCell::new(Workflow::new());
        let mut dialog = SharedCell::new(UserDialog::Create);
        let mut form = SharedCell::new(UserForm {
            username: "luis".to_string(),
            password: "secreto".to_string(),
            role: Role::Admin,
            is_active: false,
        });
        let rereads = Cell::new(0);
        let resync = || rereads.set(rereads.get() + 1);

        save_user(&mut workflow, &mut dialog, &mut form, &gateway, resync)
            .await
            .unwrap();

        assert_eq!(dialog.get(), UserDialog::Closed);
        assert_eq!(form.get(), UserForm::default());
        assert_eq!(rereads.get(), 1);
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/admin/users");
        assert_eq!(
            request.body,
            Some(json!({"username": "luis", "password": "secreto", "role": "admin", "is_active": false}))
        );
    }

    #[tokio::test]
    async fn test_edit_failure_keeps_dialog_and_fields() {
        let (gateway, transport) = gateway();
        transport.respond_json(400, json!({"error": "el usuario ya existe"}));
        let mut workflow = SharedCell::new(Workflow::new());
        let mut dialog = SharedCell::new(UserDialog::Edit(account()));
        let mut edited = UserForm::for_edit(&account());
        edited.username = "ana.maria".to_string();
        let mut form = SharedCell::new(edited.clone());
        let rereads = Cell::new(0);
        let resync = || rereads.set(rereads.get() + 1);

        let result = save_user(&mut workflow, &mut dialog, &mut form, &gateway, resync).await;

        assert!(result.is_err());
        assert_eq!(dialog.get(), UserDialog::Edit(account()));
        assert_eq!(form.get(), edited);
        assert_eq!(rereads.get(), 0);
        assert_eq!(workflow.get().error(), Some("el usuario ya existe"));
        assert_eq!(transport.last_request().unwrap().path, "/admin/users/u7");
    }

    #[tokio::test]
    async fn test_closed_dialog_saves_nothing() {
        let (gateway, transport) = gateway();
        let mut workflow = SharedCell::new(Workflow::new());
        let mut dialog = SharedCell::new(UserDialog::Closed);
        let mut form = SharedCell::new(UserForm::default());
        let rereads = Cell::new(0);
        let resync = || rereads.set(rereads.get() + 1);

        save_user(&mut workflow, &mut dialog, &mut form, &gateway, resync)
            .await
            .unwrap();

        assert_eq!(transport.request_count(), 0);
        assert_eq!(rereads.get(), 0);
    }

    #[tokio::test]
    async fn test_card_actions_reread_on_success() {
        let (gateway, transport) = gateway();
        transport
            .respond(204, "")
            .respond_json(200, json!({}))
            .respond_json(403, json!({"error": "no autorizado"}));
        let mut workflow = SharedCell::new(Workflow::new());
        let rereads = Cell::new(0);
        let resync = || rereads.set(rereads.get() + 1);

        delete_user(&mut workflow, "u7", &gateway, resync).await.unwrap();
        set_user_active(&mut workflow, "u8", false, &gateway, resync)
            .await
            .unwrap();
        let denied = delete_user(&mut workflow, "u9", &gateway, resync).await;

        assert_eq!(rereads.get(), 2);
        assert!(denied.is_err());
        assert_eq!(workflow.get().error(), Some("no autorizado"));
    }

    #[tokio::test]
    async fn test_login_signs_in_only_on_success() {
        let (gateway, transport) = gateway();
        transport
            .respond_json(401, json!({"error": "credenciales inválidas"}))
            .respond_json(200, json!({"token": "t-2", "role": "admin"}));
        let mut workflow = SharedCell::new(Workflow::new());
        let form = SharedCell::new(LoginForm {
            username: "ana".to_string(),
            password: "pw".to_string(),
        });
        let store = MemoryStore::new();
        let mut session = SharedCell::new(AuthSession::new(store.clone()));

        let first = log_in(&mut workflow, &form, &mut session, &gateway).await;
        assert!(first.is_err());
        assert!(!session.inspect(AuthSession::is_logged_in).unwrap());
        assert_eq!(form.get().username, "ana");

        log_in(&mut workflow, &form, &mut session, &gateway)
            .await
            .unwrap();
        assert!(session.inspect(AuthSession::is_admin).unwrap());
        assert_eq!(store.load(), Some(Credential::new("t-2", Role::Admin)));
    }
}
