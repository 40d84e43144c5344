//! Signed-in staff session.
//!
//! Caches the staff profile and token returned by login and mirrors them
//! into a key-value store under `staff` (JSON) and `token`, so the next
//! launch can restore the session with [`AuthSession::load`].

use anyhow::{Context, Result};
use shared::{StaffProfile, StaffProfilePatch};
use std::sync::Arc;
use tracing::{error, info};

use crate::storage::KeyValueStorage;

pub const STAFF_KEY: &str = "staff";
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, Default, PartialEq)]
struct SessionState {
    staff: Option<StaffProfile>,
    token: Option<String>,
}

pub struct AuthSession {
    storage: Arc<dyn KeyValueStorage>,
    state: SessionState,
}

impl AuthSession {
    /// A signed-out session backed by `storage`; call [`load`](Self::load)
    /// to restore a previous login.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            state: SessionState::default(),
        }
    }

    pub fn staff(&self) -> Option<&StaffProfile> {
        self.state.staff.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.staff.is_some() && self.state.token.is_some()
    }

    /// Restores the session when both keys are stored. A profile that no
    /// longer parses is logged and leaves the session signed out.
    pub async fn load(&mut self) -> Result<()> {
        let staff_json = self.storage.get_value(STAFF_KEY).await?;
        let token = self.storage.get_value(TOKEN_KEY).await?;

        let (Some(staff_json), Some(token)) = (staff_json, token) else {
            info!("No stored session");
            return Ok(());
        };

        match serde_json::from_str::<StaffProfile>(&staff_json) {
            Ok(staff) => {
                info!("Restored session for {}", staff.username);
                self.state = SessionState {
                    staff: Some(staff),
                    token: Some(token),
                };
            }
            Err(e) => error!("Failed to load auth: {}", e),
        }
        Ok(())
    }

    pub async fn login(&mut self, staff: StaffProfile, token: String) -> Result<()> {
        self.persist_staff(&staff).await?;
        self.storage
            .put_value(TOKEN_KEY, &token)
            .await
            .context("Failed to store session token")?;

        info!("Signed in {} as {:?}", staff.username, staff.role);
        self.state = SessionState {
            staff: Some(staff),
            token: Some(token),
        };
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.storage.delete_value(STAFF_KEY).await?;
        self.storage.delete_value(TOKEN_KEY).await?;

        if let Some(staff) = self.state.staff.take() {
            info!("Signed out {}", staff.username);
        }
        self.state = SessionState::default();
        Ok(())
    }

    /// Merges the present patch fields into the cached profile. Does nothing
    /// while signed out.
    pub async fn update_profile(&mut self, patch: StaffProfilePatch) -> Result<()> {
        let Some(current) = self.state.staff.as_ref() else {
            return Ok(());
        };

        let mut updated = current.clone();
        if let Some(username) = patch.username {
            updated.username = username;
        }
        if patch.email.is_some() {
            updated.email = patch.email;
        }
        if patch.phone.is_some() {
            updated.phone = patch.phone;
        }
        if patch.full_name.is_some() {
            updated.full_name = patch.full_name;
        }

        self.persist_staff(&updated).await.inspect_err(|e| {
            error!("Failed to update profile: {:#}", e);
        })?;
        self.state.staff = Some(updated);
        Ok(())
    }

    async fn persist_staff(&self, staff: &StaffProfile) -> Result<()> {
        let json = serde_json::to_string(staff).context("Failed to serialize staff profile")?;
        self.storage
            .put_value(STAFF_KEY, &json)
            .await
            .context("Failed to store staff profile")
    }
}
