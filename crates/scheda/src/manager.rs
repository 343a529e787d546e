//! Content type manager: configuration, lifecycle, and the save path.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::host::Host;
use crate::naming::{machine_name, storage_key};
use crate::panel::EditPanel;
use crate::types::{
    ContentTypeConfig, FieldType, SubmittedForm, TaxonomyConfig, TaxonomyOverrides, TypeOverrides,
};

/// Owns one content type's configuration, its taxonomies, and its edit
/// panels, and drives their registration through the injected [`Host`].
///
/// Lifecycle callbacks ([`on_init`](Self::on_init),
/// [`on_render_edit_panels`](Self::on_render_edit_panels),
/// [`on_save_record`](Self::on_save_record)) never fail: the host invokes
/// them unconditionally, so every invalid input is an early-return guard
/// and every host error is logged and swallowed.
pub struct ContentTypeManager<H: Host> {
    host: H,
    type_name: String,
    // None when the host already knew the type name at construction;
    // such a manager stays inert for its whole lifetime.
    config: Option<ContentTypeConfig>,
    taxonomies: Vec<TaxonomyConfig>,
    panels: Vec<EditPanel>,
    hooks_bound: bool,
}

impl<H: Host> ContentTypeManager<H> {
    /// Build a manager for the content type derived from `name`.
    ///
    /// If the host already has a type with the derived machine name this
    /// is an idempotency guard, not an error: the manager is returned but
    /// registers nothing and ignores later taxonomy/panel additions.
    pub fn new(host: H, name: &str, overrides: TypeOverrides) -> Self {
        let type_name = machine_name(name, '-');

        let config = if host.content_type_exists(&type_name) {
            debug!(type_name = %type_name, "content type already registered, manager inert");
            None
        } else {
            Some(ContentTypeConfig::merged(name, overrides))
        };

        Self {
            host,
            type_name,
            config,
            taxonomies: Vec::new(),
            panels: Vec::new(),
            hooks_bound: false,
        }
    }

    /// Machine name of the managed content type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Merged configuration, or `None` for an inert manager.
    pub fn config(&self) -> Option<&ContentTypeConfig> {
        self.config.as_ref()
    }

    /// Taxonomies in registration order.
    pub fn taxonomies(&self) -> &[TaxonomyConfig] {
        &self.taxonomies
    }

    /// Attached panels in placement order.
    pub fn panels(&self) -> &[EditPanel] {
        &self.panels
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Attach a taxonomy. Blank names are skipped.
    pub fn add_taxonomy(&mut self, name: &str, overrides: TaxonomyOverrides) {
        if self.config.is_none() {
            return;
        }
        if name.trim().is_empty() {
            debug!(type_name = %self.type_name, "skipping taxonomy with blank name");
            return;
        }
        self.taxonomies.push(TaxonomyConfig::merged(name, overrides));
    }

    /// Attach an edit panel built from a title, fields, and description.
    pub fn add_edit_panel<S: Into<String>>(
        &mut self,
        title: &str,
        fields: impl IntoIterator<Item = (S, FieldType)>,
        description: Option<&str>,
    ) {
        self.add_panel(EditPanel::new(title, fields, description));
    }

    /// Attach a panel, replacing any existing panel with the same id.
    ///
    /// The first panel subscribes the render/save hooks with the host;
    /// the subscription happens at most once per manager.
    pub fn add_panel(&mut self, panel: EditPanel) {
        if self.config.is_none() {
            return;
        }

        match self.panels.iter_mut().find(|p| p.id() == panel.id()) {
            Some(existing) => *existing = panel,
            None => self.panels.push(panel),
        }

        if !self.hooks_bound {
            self.hooks_bound = true;
            if let Err(e) = self.host.bind_edit_hooks(&self.type_name) {
                warn!(type_name = %self.type_name, error = %e, "failed to bind edit hooks");
            }
        }
    }

    /// Host initialization callback.
    ///
    /// Taxonomies must exist before association and the content type must
    /// exist before association, so the order is: register taxonomies,
    /// register the type, associate.
    pub fn on_init(&mut self) {
        let Some(config) = &self.config else {
            return;
        };

        for taxonomy in &self.taxonomies {
            if let Err(e) = self.host.register_taxonomy(taxonomy) {
                warn!(taxonomy = %taxonomy.name, error = %e, "failed to register taxonomy");
            }
        }

        match self.host.register_content_type(config) {
            Ok(()) => info!(type_name = %self.type_name, "registered content type"),
            Err(e) => {
                warn!(type_name = %self.type_name, error = %e, "failed to register content type");
            }
        }

        for taxonomy in &self.taxonomies {
            if let Err(e) = self
                .host
                .associate_taxonomy(&taxonomy.name, &self.type_name)
            {
                warn!(
                    taxonomy = %taxonomy.name,
                    type_name = %self.type_name,
                    error = %e,
                    "failed to associate taxonomy"
                );
            }
        }
    }

    /// Host edit-page callback: place every panel at its region.
    pub fn on_render_edit_panels(&mut self) {
        if self.config.is_none() {
            return;
        }
        for panel in &self.panels {
            if let Err(e) =
                self.host
                    .place_panel(panel.id(), panel.title(), &self.type_name, panel.region())
            {
                warn!(panel = %panel.id(), error = %e, "failed to place edit panel");
            }
        }
    }

    /// Render one panel's content for a record.
    ///
    /// Emits the anti-forgery token field followed by the panel body.
    /// Unknown panel ids render nothing.
    pub fn render_panel_content(&mut self, record_id: Uuid, panel_id: &str) -> String {
        if self.config.is_none() {
            return String::new();
        }
        let Some(panel) = self.panels.iter().find(|p| p.id() == panel_id) else {
            debug!(panel = %panel_id, "render requested for unknown panel");
            return String::new();
        };

        let mut html = self.host.nonce_field();
        let stored = self.host.stored_values(record_id);
        html.push_str(&panel.render(&stored));
        html
    }

    /// Host save callback.
    ///
    /// Skips autosaves, submissions without a verified token, and records
    /// of other types. For every field of every panel, a submitted value
    /// is stored and an absent one deletes whatever was stored before —
    /// absence of submission is explicit clearing, never a partial update.
    pub fn on_save_record(&mut self, record_id: Uuid, form: &SubmittedForm) {
        if self.config.is_none() {
            return;
        }
        if form.autosave {
            debug!(record = %record_id, "skipping autosave");
            return;
        }
        let verified = form
            .token
            .as_deref()
            .is_some_and(|token| self.host.verify_nonce(token));
        if !verified {
            debug!(record = %record_id, "skipping save without verified token");
            return;
        }
        if self.host.record_type(record_id).as_deref() != Some(self.type_name.as_str()) {
            debug!(record = %record_id, "skipping save for record of another type");
            return;
        }

        let Self { host, panels, .. } = self;
        for panel in panels.iter() {
            for (field_key, _) in panel.fields() {
                let key = storage_key(panel.id(), field_key);
                let result = match form.get(&key) {
                    Some(value) => host.set_value(record_id, &key, value),
                    None => host.delete_value(record_id, &key),
                };
                if let Err(e) = result {
                    warn!(record = %record_id, key = %key, error = %e, "failed to persist field");
                }
            }
        }
    }
}
