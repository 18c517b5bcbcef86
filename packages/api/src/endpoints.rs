//! Typed operations of the parking service, one per endpoint.
//!
//! Each method picks its path, verb, auth requirement and the fallback message
//! shown when the server gives no reason of its own. Mutation responses are
//! only checked for success; their bodies are not used.
//!
//! The service encodes an empty list as `null`, so list endpoints decode an
//! optional vector and treat `null` as no rows.

use serde::de::{DeserializeOwned, IgnoredAny};
use store::CredentialStore;

use crate::error::ApiError;
use crate::gateway::{Call, Gateway};
use crate::models::{
    ActiveToggle, EntryRequest, ExitRequest, LoginRequest, LoginResponse, NewUser, ParkingRecord,
    ProfileUpdate, Tab, UserAccount, UserUpdate, VehicleType,
};
use crate::transport::Transport;

pub mod fallback {
    pub const LOGIN: &str = "error al iniciar sesión";
    pub const VEHICLE_TYPES: &str = "error al cargar tipos de vehículo";
    pub const RECORDS: &str = "error al cargar información de vehículos";
    pub const RECORD: &str = "error al cargar registro";
    pub const ENTRY: &str = "error registrando entrada de vehículo";
    pub const EXIT: &str = "error registrando salida de vehículo";
    pub const RENAME: &str = "error al actualizar el usuario";
    pub const USERS: &str = "error al cargar usuarios";
    pub const CREATE_USER: &str = "error al crear usuario";
    pub const UPDATE_USER: &str = "error al actualizar usuario";
    pub const DELETE_USER: &str = "error al eliminar/desactivar usuario";
    pub const TOGGLE_USER: &str = "error al cambiar estado del usuario";
}

impl<T: Transport, S: CredentialStore> Gateway<T, S> {
    async fn list<R: DeserializeOwned>(&self, call: Call, fallback: &str) -> Result<Vec<R>, ApiError> {
        self.call::<Option<Vec<R>>>(call, fallback)
            .await
            .map(Option::unwrap_or_default)
    }

    /// `POST /login`. Sent without a bearer token.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.call(Call::post("/login").json(request).public(), fallback::LOGIN)
            .await
    }

    /// `GET /vehicle-types`
    pub async fn vehicle_types(&self) -> Result<Vec<VehicleType>, ApiError> {
        self.list(Call::get("/vehicle-types"), fallback::VEHICLE_TYPES)
            .await
    }

    /// `GET /parking/{current|history}`
    pub async fn records(&self, tab: Tab) -> Result<Vec<ParkingRecord>, ApiError> {
        self.list(Call::get(format!("/parking/{tab}")), fallback::RECORDS)
            .await
    }

    /// `GET /parking/{id}`
    pub async fn record(&self, id: &str) -> Result<ParkingRecord, ApiError> {
        self.call(Call::get(format!("/parking/{id}")), fallback::RECORD)
            .await
    }

    /// `POST /parking/entry`
    pub async fn register_entry(&self, request: &EntryRequest) -> Result<(), ApiError> {
        self.call::<IgnoredAny>(Call::post("/parking/entry").json(request), fallback::ENTRY)
            .await
            .map(|_| ())
    }

    /// `POST /parking/exit`
    pub async fn register_exit(&self, request: &ExitRequest) -> Result<(), ApiError> {
        self.call::<IgnoredAny>(Call::post("/parking/exit").json(request), fallback::EXIT)
            .await
            .map(|_| ())
    }

    /// `PUT /users/me`
    pub async fn update_profile(&self, request: &ProfileUpdate) -> Result<(), ApiError> {
        self.call::<IgnoredAny>(Call::put("/users/me").json(request), fallback::RENAME)
            .await
            .map(|_| ())
    }

    /// `GET /admin/users`
    pub async fn users(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.list(Call::get("/admin/users"), fallback::USERS).await
    }

    /// `POST /admin/users`
    pub async fn create_user(&self, request: &NewUser) -> Result<(), ApiError> {
        self.call::<IgnoredAny>(Call::post("/admin/users").json(request), fallback::CREATE_USER)
            .await
            .map(|_| ())
    }

    /// `PUT /admin/users/{id}`
    pub async fn update_user(&self, id: &str, request: &UserUpdate) -> Result<(), ApiError> {
        self.call::<IgnoredAny>(
            Call::put(format!("/admin/users/{id}")).json(request),
            fallback::UPDATE_USER,
        )
        .await
        .map(|_| ())
    }

    /// `PATCH /admin/users/{id}/active`
    pub async fn set_user_active(&self, id: &str, is_active: bool) -> Result<(), ApiError> {
        self.call::<IgnoredAny>(
            Call::patch(format!("/admin/users/{id}/active")).json(&ActiveToggle { is_active }),
            fallback::TOGGLE_USER,
        )
        .await
        .map(|_| ())
    }

    /// `DELETE /admin/users/{id}`. Whether the account is removed or only
    /// deactivated is the server's call; the list is re-read afterwards.
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.call::<IgnoredAny>(Call::delete(format!("/admin/users/{id}")), fallback::DELETE_USER)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::StubTransport;
    use crate::transport::Method;
    use serde_json::json;
    use store::{Credential, MemoryStore, Role};

    fn signed_in() -> (Gateway<StubTransport, MemoryStore>, StubTransport) {
        let transport = StubTransport::new();
        let store = MemoryStore::new();
        store.save(&Credential::new("tok", Role::Admin));
        (Gateway::new(transport.clone(), store), transport)
    }

    #[tokio::test]
    async fn test_login_posts_credentials_publicly() {
        let (gateway, transport) = signed_in();
        transport.respond_json(200, json!({"token": "new", "role": "common"}));

        let response = gateway
            .login(&LoginRequest {
                username: "ana".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.into_credential(), Credential::new("new", Role::Common));
        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/login");
        assert!(request.bearer.is_none());
        assert_eq!(request.body, Some(json!({"username": "ana", "password": "pw"})));
    }

    #[tokio::test]
    async fn test_records_path_follows_tab() {
        let (gateway, transport) = signed_in();
        transport.respond_json(200, json!([])).respond_json(200, json!([]));

        gateway.records(Tab::Current).await.unwrap();
        gateway.records(Tab::History).await.unwrap();

        let paths: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/parking/current", "/parking/history"]);
    }

    #[tokio::test]
    async fn test_null_list_is_empty() {
        let (gateway, transport) = signed_in();
        transport
            .respond(200, "null\n")
            .respond(200, "null")
            .respond(200, "null");

        assert_eq!(gateway.records(Tab::History).await, Ok(Vec::new()));
        assert_eq!(gateway.users().await, Ok(Vec::new()));
        assert_eq!(gateway.vehicle_types().await, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_list_rejects_non_array_body() {
        let (gateway, transport) = signed_in();
        transport.respond_json(200, json!({"records": []}));

        let err = gateway.records(Tab::Current).await.unwrap_err();
        assert_eq!(err, ApiError::new(Some(200), fallback::RECORDS));
    }

    #[tokio::test]
    async fn test_entry_ignores_response_body() {
        let (gateway, transport) = signed_in();
        transport.respond_json(201, json!({"id": "r1", "anything": [1, 2, 3]}));

        gateway
            .register_entry(&EntryRequest {
                license_plate: "ABC123".to_string(),
                vehicle_type_id: "car".to_string(),
            })
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/parking/entry");
        assert_eq!(request.bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_exit_failure_message() {
        let (gateway, transport) = signed_in();
        transport.respond_json(404, json!({"status": 404, "error": "vehículo no encontrado"}));
        transport.respond(500, "");

        let first = gateway
            .register_exit(&ExitRequest { license_plate: "NOPE".to_string() })
            .await
            .unwrap_err();
        let second = gateway
            .register_exit(&ExitRequest { license_plate: "NOPE".to_string() })
            .await
            .unwrap_err();

        assert_eq!(first.message, "vehículo no encontrado");
        assert_eq!(second.message, fallback::EXIT);
    }

    #[tokio::test]
    async fn test_admin_user_paths() {
        let (gateway, transport) = signed_in();
        transport
            .respond_json(200, json!({}))
            .respond_json(200, json!({}))
            .respond(204, "");

        gateway
            .update_user(
                "u7",
                &UserUpdate {
                    username: "ana".to_string(),
                    role: Role::Common,
                    is_active: false,
                },
            )
            .await
            .unwrap();
        gateway.set_user_active("u7", true).await.unwrap();
        gateway.delete_user("u7").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].path, "/admin/users/u7");
        assert_eq!(requests[1].method, Method::Patch);
        assert_eq!(requests[1].path, "/admin/users/u7/active");
        assert_eq!(requests[1].body, Some(json!({"is_active": true})));
        assert_eq!(requests[2].method, Method::Delete);
        assert!(requests[2].body.is_none());
    }

    #[tokio::test]
    async fn test_users_decode() {
        let (gateway, transport) = signed_in();
        transport.respond_json(
            200,
            json!([{"id":"u1","username":"ana","role":"admin","is_active":true,"created_at":"2024-01-01T00:00:00Z"}]),
        );

        let users = gateway.users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ana");
    }

    #[tokio::test]
    async fn test_record_lookup() {
        let (gateway, transport) = signed_in();
        transport.respond_json(
            200,
            json!({"id":"r1","vehicle_type_id":"car","license_plate":"ABC123","entry_time":"2024-01-01T08:00:00Z"}),
        );

        let record = gateway.record("r1").await.unwrap();
        assert!(record.is_open());
        assert_eq!(transport.last_request().unwrap().path, "/parking/r1");
    }
}
