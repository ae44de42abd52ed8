//! Parsed view of a vector style document
//!
//! Only the parts the bootstrap pipeline and a legend consumer need are
//! modelled: the sources (and the URLs they pull from), the sprite and glyph
//! endpoints, and the ordered layer list. Everything else in the document is
//! ignored here and left to the rendering engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sprite: Option<String>,
    #[serde(default)]
    pub glyphs: Option<String>,
    #[serde(default)]
    pub sources: BTreeMap<String, StyleSource>,
    #[serde(default)]
    pub layers: Vec<StyleLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tiles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, rename = "source-layer")]
    pub source_layer: Option<String>,
}

impl StyleSheet {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Every remote endpoint the document references, in a stable order:
    /// sprite, glyphs, then each source's TileJSON url and tile templates.
    pub fn source_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        urls.extend(self.sprite.as_deref());
        urls.extend(self.glyphs.as_deref());
        for source in self.sources.values() {
            urls.extend(source.url.as_deref());
            urls.extend(source.tiles.iter().map(String::as_str));
        }
        urls
    }

    /// Layer ids in draw order, for legends.
    pub fn layer_ids(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.id.as_str())
    }

    /// Layers drawn from the named source.
    pub fn layers_for_source<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a StyleLayer> {
        self.layers
            .iter()
            .filter(move |layer| layer.source.as_deref() == Some(source))
    }
}
