//! Session context.
//!
//! A [`Session`] is created when a user logs in and torn down when they log
//! out. It owns the data store for that user and remembers which workspace is
//! selected. Membership itself lives on the server; the session only caches
//! the workspace it last fetched.

use crate::{
    client::RecordClient,
    errors::Result,
    models::{Role, SessionUser, Workspace},
    store::{DataStore, NotificationReceiver},
};
use tracing::info;

/// Everything one logged-in user works with.
#[derive(Debug)]
pub struct Session {
    user: SessionUser,
    client: RecordClient,
    store: DataStore,
    current_workspace: Option<Workspace>,
}

impl Session {
    /// Starts a session for `user` and loads the data store.
    pub async fn start(client: RecordClient, user: SessionUser) -> (Self, NotificationReceiver) {
        let (store, notifications) = DataStore::new(client.clone(), user.name.clone());
        store.load().await;
        info!("Session started for {}", user.id);
        let session = Self {
            user,
            client,
            store,
            current_workspace: None,
        };
        (session, notifications)
    }

    /// The logged-in user.
    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.user
    }

    /// The session's data store.
    #[must_use]
    pub const fn store(&self) -> &DataStore {
        &self.store
    }

    /// The selected workspace, if any.
    #[must_use]
    pub const fn current_workspace(&self) -> Option<&Workspace> {
        self.current_workspace.as_ref()
    }

    /// The user's role in the selected workspace.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current_workspace
            .as_ref()
            .and_then(|w| w.role_of(&self.user.id))
    }

    /// Whether the user owns the selected workspace.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.role() == Some(Role::Owner)
    }

    /// Workspaces the user belongs to.
    pub async fn workspaces(&self) -> Result<Vec<Workspace>> {
        self.client.list_workspaces(&self.user.id).await
    }

    /// Creates a workspace owned by the user and selects it.
    pub async fn create_workspace(&mut self, name: &str) -> Result<&Workspace> {
        let workspace = self.client.create_workspace(name, &self.user).await?;
        Ok(self.current_workspace.insert(workspace))
    }

    /// Joins the workspace holding `code` and selects it.
    pub async fn join_workspace(&mut self, code: &str) -> Result<&Workspace> {
        let workspace = self.client.join_workspace(code, &self.user).await?;
        Ok(self.current_workspace.insert(workspace))
    }

    /// Selects a workspace the user belongs to, refreshing its membership.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::PermissionDenied`] if the user is not a
    /// member. The previous selection is kept on any error.
    pub async fn select_workspace(&mut self, id: &str) -> Result<&Workspace> {
        let workspace = self.client.get_workspace(id, &self.user.id).await?;
        Ok(self.current_workspace.insert(workspace))
    }

    /// Ends the session once every pending activity append has finished.
    pub async fn end(self) {
        self.store.settle().await;
        info!("Session ended for {}", self.user.id);
    }
}
