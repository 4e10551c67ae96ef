//! Integration tests for the membership endpoints.
//!
//! Drive the full router against an in-memory catalog: each request opens
//! a session from the shared factory exactly like production, but the
//! "engine" is a map of principals and membership edges.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use rolegate_api::{app_router, AppState};
use rolegate_core::{
    CatalogReader, CatalogSession, EngineError, EngineResult, PrincipalProvisioner,
    RoleMembership, SessionFactory,
};

#[derive(Debug, Default)]
struct MemoryState {
    logins: BTreeSet<String>,
    principals: BTreeMap<String, i32>,
    memberships: BTreeSet<(i32, i32)>,
    next_id: i32,
}

impl MemoryState {
    fn insert_principal(&mut self, name: &str) -> i32 {
        self.next_id += 1;
        self.principals.insert(name.to_string(), self.next_id);
        self.next_id
    }
}

struct MemorySession {
    state: Arc<Mutex<MemoryState>>,
}

#[async_trait]
impl CatalogReader for MemorySession {
    async fn login_exists(&self, name: &str) -> EngineResult<bool> {
        Ok(self.state.lock().unwrap().logins.contains(name))
    }

    async fn database_principal_exists(&self, name: &str) -> EngineResult<bool> {
        Ok(self.state.lock().unwrap().principals.contains_key(name))
    }

    async fn role_membership_exists(
        &self,
        member_name: &str,
        role_name: &str,
    ) -> EngineResult<bool> {
        let state = self.state.lock().unwrap();
        match (
            state.principals.get(role_name),
            state.principals.get(member_name),
        ) {
            (Some(role_id), Some(member_id)) => {
                Ok(state.memberships.contains(&(*role_id, *member_id)))
            }
            _ => Ok(false),
        }
    }

    async fn list_role_memberships(&self, member_name: &str) -> EngineResult<Vec<RoleMembership>> {
        let state = self.state.lock().unwrap();
        let Some(member_id) = state.principals.get(member_name).copied() else {
            return Ok(Vec::new());
        };
        let mut rows = Vec::new();
        for (role_id, mid) in &state.memberships {
            if *mid != member_id {
                continue;
            }
            let role_name = state
                .principals
                .iter()
                .find(|(_, id)| *id == role_id)
                .map(|(name, _)| name.clone())
                .unwrap();
            rows.push(RoleMembership {
                role_principal_id: *role_id,
                role_name,
                member_principal_id: member_id,
                member_name: member_name.to_string(),
            });
        }
        Ok(rows)
    }
}

#[async_trait]
impl PrincipalProvisioner for MemorySession {
    async fn create_database_user(&self, name: &str) -> EngineResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.principals.contains_key(name) {
            return Err(EngineError::provisioning(format!(
                "user `{name}` already exists"
            )));
        }
        state.insert_principal(name);
        Ok(())
    }

    async fn drop_database_user(&self, name: &str) -> EngineResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.principals.remove(name).is_none() {
            return Err(EngineError::provisioning(format!(
                "user `{name}` does not exist"
            )));
        }
        Ok(())
    }

    async fn add_role_member(&self, role_name: &str, member_name: &str) -> EngineResult<()> {
        let mut state = self.state.lock().unwrap();
        let (Some(role_id), Some(member_id)) = (
            state.principals.get(role_name).copied(),
            state.principals.get(member_name).copied(),
        ) else {
            return Err(EngineError::provisioning(format!(
                "role `{role_name}` or member `{member_name}` does not exist"
            )));
        };
        state.memberships.insert((role_id, member_id));
        Ok(())
    }

    async fn drop_role_member(&self, role_name: &str, member_name: &str) -> EngineResult<()> {
        let mut state = self.state.lock().unwrap();
        let (Some(role_id), Some(member_id)) = (
            state.principals.get(role_name).copied(),
            state.principals.get(member_name).copied(),
        ) else {
            return Err(EngineError::provisioning(format!(
                "role `{role_name}` or member `{member_name}` does not exist"
            )));
        };
        state.memberships.remove(&(role_id, member_id));
        Ok(())
    }
}

struct MemoryFactory {
    state: Arc<Mutex<MemoryState>>,
}

#[async_trait]
impl SessionFactory for MemoryFactory {
    async fn open(&self, _server: &str, _database: &str) -> EngineResult<Box<dyn CatalogSession>> {
        Ok(Box::new(MemorySession {
            state: self.state.clone(),
        }))
    }
}

/// Router over an in-memory catalog seeded with the `db_accessadmin` role.
fn test_app() -> (Router, Arc<Mutex<MemoryState>>) {
    let mut seed = MemoryState::default();
    seed.insert_principal("db_accessadmin");
    let state = Arc::new(Mutex::new(seed));

    let app = app_router(AppState::new(Arc::new(MemoryFactory {
        state: state.clone(),
    })));
    (app, state)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

const GROUP_URI: &str = "/server/sql01/database/billing/group/g1";

#[tokio::test]
async fn test_list_unknown_group_returns_404() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "GET", GROUP_URI).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Not Found");
}

#[tokio::test]
async fn test_post_provisions_group_into_role() {
    let (app, state) = test_app();

    let (status, body) = send(&app, "POST", &format!("{GROUP_URI}?role_name=db_accessadmin")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["MemberPrincipalName"], "g1");
    assert_eq!(body["RolePrincipalName"], "db_accessadmin");
    assert_eq!(body["Server"], "sql01");
    assert_eq!(body["Database"], "billing");
    assert_eq!(body["AlreadyExists"], false);
    assert_eq!(body["UserCreated"], true);
    assert_eq!(body["MembershipAdded"], true);

    let catalog = state.lock().unwrap();
    assert!(catalog.principals.contains_key("g1"));
    assert_eq!(catalog.memberships.len(), 1);
}

#[tokio::test]
async fn test_post_is_idempotent() {
    let (app, state) = test_app();
    let uri = format!("{GROUP_URI}?role_name=db_accessadmin");

    let (first, _) = send(&app, "POST", &uri).await;
    let (second, body) = send(&app, "POST", &uri).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body["AlreadyExists"], true);

    // Exactly one principal and one membership edge.
    let catalog = state.lock().unwrap();
    assert_eq!(
        catalog.principals.keys().filter(|k| *k == "g1").count(),
        1
    );
    assert_eq!(catalog.memberships.len(), 1);
}

#[tokio::test]
async fn test_list_after_post_returns_membership() {
    let (app, _) = test_app();

    send(&app, "POST", &format!("{GROUP_URI}?role_name=db_accessadmin")).await;
    let (status, body) = send(&app, "GET", GROUP_URI).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["MemberPrincipalName"], "g1");
    assert_eq!(rows[0]["RolePrincipalName"], "db_accessadmin");
}

#[tokio::test]
async fn test_delete_round_trip_restores_state() {
    let (app, state) = test_app();
    let uri = format!("{GROUP_URI}?role_name=db_accessadmin");

    send(&app, "POST", &uri).await;
    let (status, body) = send(&app, "DELETE", &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["MembershipDropped"], true);
    assert_eq!(body["UserDropped"], true);
    assert_eq!(body["AlreadyAbsent"], false);

    // Catalog is back to its pre-provisioning state.
    {
        let catalog = state.lock().unwrap();
        assert!(!catalog.principals.contains_key("g1"));
        assert!(catalog.memberships.is_empty());
    }

    let (status, _) = send(&app, "GET", GROUP_URI).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_absent_group_is_benign() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("{GROUP_URI}?role_name=db_accessadmin"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["AlreadyAbsent"], true);
}

#[tokio::test]
async fn test_post_without_role_name_is_rejected() {
    let (app, _) = test_app();

    let (status, _) = send(&app, "POST", GROUP_URI).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_injection_shaped_group_is_rejected() {
    let (app, state) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/server/sql01/database/billing/group/g1%5D%3B%20DROP%20TABLE%20x?role_name=db_accessadmin",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Validation Error");
    // Nothing was provisioned.
    assert_eq!(state.lock().unwrap().principals.len(), 1);
}

#[tokio::test]
async fn test_put_requires_existing_principal() {
    let (app, _) = test_app();
    let uri = format!("{GROUP_URI}?role_name=db_accessadmin");

    let (status, _) = send(&app, "PUT", &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Provision the user, then the membership-only path succeeds.
    send(&app, "POST", &uri).await;
    send(&app, "DELETE", &uri).await;
    send(&app, "POST", &uri).await;

    let (status, body) = send(&app, "PUT", &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Outcome"], "already_member");
}

#[tokio::test]
async fn test_put_adds_membership_for_existing_user() {
    let (app, state) = test_app();

    // User exists but holds no roles.
    state.lock().unwrap().insert_principal("g1");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("{GROUP_URI}?role_name=db_accessadmin"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["Outcome"], "added");
    assert_eq!(state.lock().unwrap().memberships.len(), 1);
}

#[tokio::test]
async fn test_healthz_reports_ok() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "GET", "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_spec_is_served() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "GET", "/api-doc/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "rolegate API");
}
