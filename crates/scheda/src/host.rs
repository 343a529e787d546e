//! The host platform boundary.
//!
//! Everything non-trivial — the content type registry, persistence,
//! anti-forgery tokens, panel placement — belongs to the host CMS. The
//! manager receives a [`Host`] implementation at construction and only
//! talks to the platform through it.

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::types::{ContentTypeConfig, PanelRegion, TaxonomyConfig};

/// Errors surfaced by host operations.
///
/// Manager callbacks never propagate these; they log and continue, since
/// the host invokes lifecycle hooks unconditionally and a raised error
/// would break unrelated saves.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("registry error: {0}")]
    Registry(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HostError.
pub type HostResult<T> = Result<T, HostError>;

/// The host CMS surface consumed by a content type manager.
///
/// All operations are synchronous and request-scoped; the host serializes
/// requests per record through its own lifecycle.
pub trait Host {
    /// Whether a content type with this machine name is already registered.
    fn content_type_exists(&self, type_name: &str) -> bool;

    /// Register a content type with its merged configuration.
    fn register_content_type(&mut self, config: &ContentTypeConfig) -> HostResult<()>;

    /// Register a taxonomy. Must happen before association.
    fn register_taxonomy(&mut self, taxonomy: &TaxonomyConfig) -> HostResult<()>;

    /// Associate a registered taxonomy with a registered content type.
    fn associate_taxonomy(&mut self, taxonomy_name: &str, type_name: &str) -> HostResult<()>;

    /// Subscribe the manager's render/save callbacks for a content type.
    ///
    /// Called at most once per manager instance.
    fn bind_edit_hooks(&mut self, type_name: &str) -> HostResult<()>;

    /// Place a panel on the edit page at the given screen region.
    fn place_panel(
        &mut self,
        panel_id: &str,
        title: &str,
        type_name: &str,
        region: PanelRegion,
    ) -> HostResult<()>;

    /// Content type of a record, if the record exists.
    fn record_type(&self, record_id: Uuid) -> Option<String>;

    /// All stored custom values for a record, keyed by storage key.
    fn stored_values(&self, record_id: Uuid) -> HashMap<String, Vec<String>>;

    /// Store a value under a storage key.
    fn set_value(&mut self, record_id: Uuid, key: &str, value: &str) -> HostResult<()>;

    /// Delete any stored value under a storage key.
    fn delete_value(&mut self, record_id: Uuid, key: &str) -> HostResult<()>;

    /// Issue an anti-forgery token and return its hidden-input fragment.
    fn nonce_field(&mut self) -> String;

    /// Verify a submitted anti-forgery token.
    fn verify_nonce(&self, token: &str) -> bool;
}
