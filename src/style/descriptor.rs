use super::StyleError;
use once_cell::sync::Lazy;

/// Named style plus the id of the style sheet resource that backs it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleDescriptor {
    pub name: String,
    pub sheet_id: String,
}

impl StyleDescriptor {
    pub fn new(name: impl Into<String>, sheet_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sheet_id: sheet_id.into(),
        }
    }

    /// Pick a style from the built-in catalog.
    pub fn by_index(index: usize) -> Result<&'static StyleDescriptor, StyleError> {
        let styles = catalog();
        styles.get(index).ok_or(StyleError::IndexOutOfRange {
            index,
            len: styles.len(),
        })
    }
}

static CATALOG: Lazy<Vec<StyleDescriptor>> = Lazy::new(|| {
    vec![
        StyleDescriptor::new("Basic", "maptiler_basic"),
        StyleDescriptor::new("Hybrid Satellite", "maptiler_hybrid_satellite"),
        StyleDescriptor::new("Streets", "maptiler_streets"),
    ]
});

/// Built-in styles, in selection order
pub fn catalog() -> &'static [StyleDescriptor] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEFAULT_STYLE_INDEX;

    #[test]
    fn test_catalog_order() {
        let names: Vec<_> = catalog().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Basic", "Hybrid Satellite", "Streets"]);
        assert_eq!(
            StyleDescriptor::by_index(DEFAULT_STYLE_INDEX).unwrap().sheet_id,
            "maptiler_basic"
        );
    }

    #[test]
    fn test_index_out_of_range() {
        match StyleDescriptor::by_index(3) {
            Err(StyleError::IndexOutOfRange { index: 3, len: 3 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
