pub mod descriptor;
pub mod resource;
pub mod sheet;

pub use descriptor::{catalog, StyleDescriptor};
pub use resource::{DirectoryResources, InMemoryResources, StyleDocument, StyleResourceProvider};
pub use sheet::{StyleLayer, StyleSheet, StyleSource};

#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("style sheet {sheet_id:?} not found")]
    ResourceMissing { sheet_id: String },

    #[error("style index {index} out of range (catalog has {len} styles)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("style sheet {sheet_id:?} is not a valid style document: {source}")]
    Malformed {
        sheet_id: String,
        #[source]
        source: serde_json::Error,
    },
}
