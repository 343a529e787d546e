//! Scheda — content types, taxonomies, and edit panels for host CMS
//! integrations.
//!
//! The host platform (content type registry, persistence, anti-forgery
//! tokens, hook dispatch) is injected as the [`Host`] trait; this crate
//! owns default-merged configuration, the panel/field registry, HTML
//! control rendering, and the composite storage-key scheme that makes
//! saved values findable across renders.
//!
//! ```
//! use scheda::prelude::*;
//! use scheda_test_utils::MemoryHost;
//!
//! let mut manager = ContentTypeManager::new(MemoryHost::new(), "Studio", TypeOverrides::new());
//! manager.add_taxonomy("Genre", TaxonomyOverrides::new());
//! manager.add_edit_panel(
//!     "Address Details",
//!     [("street", FieldType::Text), ("bio", FieldType::Textarea)],
//!     None,
//! );
//! manager.on_init();
//! assert!(manager.host().content_type_exists("studio"));
//! ```

pub mod host;
pub mod manager;
pub mod merge;
pub mod naming;
pub mod panel;
pub mod render;
pub mod types;

pub use host::{Host, HostError, HostResult};
pub use manager::ContentTypeManager;
pub use panel::EditPanel;
pub use types::{
    ContentTypeConfig, FieldType, PanelRegion, SubmittedForm, TaxonomyConfig, TaxonomyOverrides,
    TypeOverrides,
};

pub mod prelude {
    pub use crate::host::{Host, HostError, HostResult};
    pub use crate::manager::ContentTypeManager;
    pub use crate::panel::EditPanel;
    pub use crate::types::{
        ContentTypeConfig, FieldType, PanelRegion, SubmittedForm, TaxonomyConfig,
        TaxonomyOverrides, TypeOverrides,
    };
}
