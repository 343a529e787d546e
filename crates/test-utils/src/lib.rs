//! Scheda test utilities.
//!
//! An in-memory [`Host`] implementation plus fixture helpers for
//! exercising content type managers without a real CMS.

use std::collections::HashMap;

use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use scheda::host::{Host, HostError, HostResult};
use scheda::types::{ContentTypeConfig, PanelRegion, SubmittedForm, TaxonomyConfig};

/// A panel placement recorded by [`MemoryHost::place_panel`].
#[derive(Debug, Clone)]
pub struct PlacedPanel {
    pub panel_id: String,
    pub title: String,
    pub type_name: String,
    pub region: PanelRegion,
}

/// In-memory host: registries, metadata store, and token issuance.
///
/// Every registry mutation is appended to an ordered event log so tests
/// can assert the registration sequence, not just the end state.
#[derive(Debug, Default)]
pub struct MemoryHost {
    registered_types: HashMap<String, ContentTypeConfig>,
    preexisting_types: Vec<String>,
    registered_taxonomies: HashMap<String, TaxonomyConfig>,
    associations: Vec<(String, String)>,
    bound_hooks: Vec<String>,
    placed_panels: Vec<PlacedPanel>,
    records: HashMap<Uuid, String>,
    values: HashMap<Uuid, HashMap<String, Vec<String>>>,
    issued_tokens: Vec<String>,
    events: Vec<String>,
    fail_writes: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a content type as already known to the host, before any
    /// manager-driven registration.
    pub fn predefine_type(&mut self, type_name: &str) {
        self.preexisting_types.push(type_name.to_string());
    }

    /// Create a record of the given type and return its id.
    pub fn insert_record(&mut self, type_name: &str) -> Uuid {
        let id = Uuid::now_v7();
        self.records.insert(id, type_name.to_string());
        id
    }

    /// Make every write operation fail, for exercising the never-raise
    /// policy of manager callbacks.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Ordered log of registry mutations.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn registered_type(&self, type_name: &str) -> Option<&ContentTypeConfig> {
        self.registered_types.get(type_name)
    }

    pub fn registered_taxonomy(&self, name: &str) -> Option<&TaxonomyConfig> {
        self.registered_taxonomies.get(name)
    }

    pub fn associations(&self) -> &[(String, String)] {
        &self.associations
    }

    pub fn bound_hooks(&self) -> &[String] {
        &self.bound_hooks
    }

    pub fn placed_panels(&self) -> &[PlacedPanel] {
        &self.placed_panels
    }

    /// First stored value for a record's storage key.
    pub fn value_of(&self, record_id: Uuid, key: &str) -> Option<&str> {
        self.values
            .get(&record_id)?
            .get(key)?
            .first()
            .map(String::as_str)
    }

    /// Most recently issued anti-forgery token.
    pub fn last_token(&self) -> Option<&str> {
        self.issued_tokens.last().map(String::as_str)
    }

    fn issue_token(&mut self) -> String {
        let mut random_bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut random_bytes);
        let token = hex::encode(Sha256::digest(random_bytes));
        self.issued_tokens.push(token.clone());
        token
    }

    fn write_guard(&self) -> HostResult<()> {
        if self.fail_writes {
            return Err(HostError::Storage("writes disabled".into()));
        }
        Ok(())
    }
}

impl Host for MemoryHost {
    fn content_type_exists(&self, type_name: &str) -> bool {
        self.preexisting_types.iter().any(|t| t == type_name)
            || self.registered_types.contains_key(type_name)
    }

    fn register_content_type(&mut self, config: &ContentTypeConfig) -> HostResult<()> {
        self.write_guard()?;
        self.events
            .push(format!("register_content_type {}", config.type_name));
        self.registered_types
            .insert(config.type_name.clone(), config.clone());
        Ok(())
    }

    fn register_taxonomy(&mut self, taxonomy: &TaxonomyConfig) -> HostResult<()> {
        self.write_guard()?;
        self.events
            .push(format!("register_taxonomy {}", taxonomy.name));
        self.registered_taxonomies
            .insert(taxonomy.name.clone(), taxonomy.clone());
        Ok(())
    }

    fn associate_taxonomy(&mut self, taxonomy_name: &str, type_name: &str) -> HostResult<()> {
        self.write_guard()?;
        if !self.registered_taxonomies.contains_key(taxonomy_name) {
            return Err(HostError::Registry(format!(
                "unknown taxonomy: {taxonomy_name}"
            )));
        }
        if !self.registered_types.contains_key(type_name) {
            return Err(HostError::Registry(format!(
                "unknown content type: {type_name}"
            )));
        }
        self.events
            .push(format!("associate {taxonomy_name} {type_name}"));
        self.associations
            .push((taxonomy_name.to_string(), type_name.to_string()));
        Ok(())
    }

    fn bind_edit_hooks(&mut self, type_name: &str) -> HostResult<()> {
        self.events.push(format!("bind_edit_hooks {type_name}"));
        self.bound_hooks.push(type_name.to_string());
        Ok(())
    }

    fn place_panel(
        &mut self,
        panel_id: &str,
        title: &str,
        type_name: &str,
        region: PanelRegion,
    ) -> HostResult<()> {
        self.events.push(format!("place_panel {panel_id}"));
        self.placed_panels.push(PlacedPanel {
            panel_id: panel_id.to_string(),
            title: title.to_string(),
            type_name: type_name.to_string(),
            region,
        });
        Ok(())
    }

    fn record_type(&self, record_id: Uuid) -> Option<String> {
        self.records.get(&record_id).cloned()
    }

    fn stored_values(&self, record_id: Uuid) -> HashMap<String, Vec<String>> {
        self.values.get(&record_id).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, record_id: Uuid, key: &str, value: &str) -> HostResult<()> {
        self.write_guard()?;
        self.values
            .entry(record_id)
            .or_default()
            .insert(key.to_string(), vec![value.to_string()]);
        Ok(())
    }

    fn delete_value(&mut self, record_id: Uuid, key: &str) -> HostResult<()> {
        self.write_guard()?;
        if let Some(record_values) = self.values.get_mut(&record_id) {
            record_values.remove(key);
        }
        Ok(())
    }

    fn nonce_field(&mut self) -> String {
        let token = self.issue_token();
        format!(r#"<input type="hidden" name="scheda_nonce" value="{token}" />"#)
    }

    fn verify_nonce(&self, token: &str) -> bool {
        !token.is_empty() && self.issued_tokens.iter().any(|t| t == token)
    }
}

/// A submission carrying a freshly issued, verifiable token.
pub fn authorized_form(host: &mut MemoryHost) -> SubmittedForm {
    let token = host.issue_token();
    SubmittedForm::new().token(token)
}
