//! # Block Nodes
//!
//! The persisted shape of a page layout: an ordered forest of blocks, each
//! with an id, a type tag, typed settings and (for containers) children.
//!
//! ```json
//! { "id": "b1", "type": "columns", "settings": { "columnCount": 2 },
//!   "children": [ { "id": "c1", "type": "column", "settings": {}, "children": [] } ] }
//! ```

use crate::error::ModelError;
use crate::ids::{BlockId, IdGenerator};
use crate::settings::{BlockSettings, ColumnsSettings};
use serde::ser::{Error as _, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Closed set of block type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    Section,
    Columns,
    Column,
    Hero,
    RichText,
    Heading,
    Image,
    Button,
    Video,
    Icon,
    Spacer,
    ImageCarousel,
    Tabs,
    Accordion,
    Form,
    Map,
    Countdown,
    SocialShare,
    Repeater,
    Faq,
    Testimonials,
    FeaturedProducts,
    CustomHtml,
}

impl BlockType {
    pub const ALL: [BlockType; 23] = [
        BlockType::Section,
        BlockType::Columns,
        BlockType::Column,
        BlockType::Hero,
        BlockType::RichText,
        BlockType::Heading,
        BlockType::Image,
        BlockType::Button,
        BlockType::Video,
        BlockType::Icon,
        BlockType::Spacer,
        BlockType::ImageCarousel,
        BlockType::Tabs,
        BlockType::Accordion,
        BlockType::Form,
        BlockType::Map,
        BlockType::Countdown,
        BlockType::SocialShare,
        BlockType::Repeater,
        BlockType::Faq,
        BlockType::Testimonials,
        BlockType::FeaturedProducts,
        BlockType::CustomHtml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Section => "section",
            BlockType::Columns => "columns",
            BlockType::Column => "column",
            BlockType::Hero => "hero",
            BlockType::RichText => "richText",
            BlockType::Heading => "heading",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Video => "video",
            BlockType::Icon => "icon",
            BlockType::Spacer => "spacer",
            BlockType::ImageCarousel => "imageCarousel",
            BlockType::Tabs => "tabs",
            BlockType::Accordion => "accordion",
            BlockType::Form => "form",
            BlockType::Map => "map",
            BlockType::Countdown => "countdown",
            BlockType::SocialShare => "socialShare",
            BlockType::Repeater => "repeater",
            BlockType::Faq => "faq",
            BlockType::Testimonials => "testimonials",
            BlockType::FeaturedProducts => "featuredProducts",
            BlockType::CustomHtml => "customHtml",
        }
    }

    /// Container types own an ordered child sequence
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            BlockType::Section | BlockType::Columns | BlockType::Column
        )
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::UnknownBlockType(s.to_string()))
    }
}

/// One element of the page layout tree
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBlock")]
pub struct BlockNode {
    pub id: BlockId,
    pub settings: BlockSettings,
    pub children: Vec<BlockNode>,
}

impl BlockNode {
    pub fn new(id: impl Into<BlockId>, settings: BlockSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            children: Vec::new(),
        }
    }

    /// Block of the given type with empty settings
    pub fn empty(id: impl Into<BlockId>, block_type: BlockType) -> Self {
        Self::new(id, BlockSettings::empty(block_type))
    }

    /// Fresh `columns` block with `count` empty columns
    pub fn columns(ids: &mut dyn IdGenerator, count: u32) -> Self {
        let settings = BlockSettings::Columns(ColumnsSettings {
            column_count: Some(count),
            ..Default::default()
        });
        let mut node = Self::new(ids.next_id(), settings);
        node.children = (0..count)
            .map(|_| Self::empty(ids.next_id(), BlockType::Column))
            .collect();
        node
    }

    pub fn with_children(mut self, children: Vec<BlockNode>) -> Self {
        self.children = children;
        self
    }

    /// `None` for blocks whose type tag is not part of the closed set
    pub fn block_type(&self) -> Option<BlockType> {
        self.settings.block_type()
    }

    pub fn type_name(&self) -> &str {
        self.settings.type_name()
    }

    pub fn is_container(&self) -> bool {
        self.block_type().map(|t| t.is_container()).unwrap_or(false)
    }

    /// Depth-first search through this node and its descendants
    pub fn find(&self, id: &BlockId) -> Option<&BlockNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including itself
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(BlockNode::count).sum::<usize>()
    }
}

#[derive(Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    settings: Value,
    #[serde(default)]
    children: Option<Vec<BlockNode>>,
}

impl From<RawBlock> for BlockNode {
    fn from(raw: RawBlock) -> Self {
        Self {
            settings: BlockSettings::from_parts(&raw.type_name, raw.settings),
            id: raw.id,
            children: raw.children.unwrap_or_default(),
        }
    }
}

impl Serialize for BlockNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let settings = self.settings.to_value().map_err(S::Error::custom)?;
        let with_children = self.is_container() || !self.children.is_empty();

        let mut state =
            serializer.serialize_struct("BlockNode", if with_children { 4 } else { 3 })?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", self.type_name())?;
        state.serialize_field("settings", &settings)?;
        if with_children {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}

/// Parse a persisted layout (a JSON array of blocks)
///
/// A `null` layout is treated as an empty page.
pub fn parse_layout(json: &str) -> Result<Vec<BlockNode>, ModelError> {
    let layout: Option<Vec<BlockNode>> = serde_json::from_str(json)?;
    Ok(layout.unwrap_or_default())
}

/// Canonical JSON form of a layout
pub fn layout_to_json(layout: &[BlockNode]) -> Result<String, ModelError> {
    Ok(serde_json::to_string(layout)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;
    use crate::settings::HeadingSettings;
    use serde_json::json;

    #[test]
    fn test_block_type_names_round_trip() {
        for block_type in BlockType::ALL {
            let parsed: BlockType = block_type.as_str().parse().unwrap();
            assert_eq!(parsed, block_type);

            let json = serde_json::to_string(&block_type).unwrap();
            assert_eq!(json, format!("\"{}\"", block_type.as_str()));
        }
        assert!("carousel".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_only_three_container_types() {
        let containers: Vec<_> = BlockType::ALL
            .iter()
            .filter(|t| t.is_container())
            .collect();
        assert_eq!(containers.len(), 3);
    }

    #[test]
    fn test_columns_constructor_populates_children() {
        let mut ids = SequentialIdGenerator::from_seed("t");
        let node = BlockNode::columns(&mut ids, 3);

        assert_eq!(node.block_type(), Some(BlockType::Columns));
        assert_eq!(node.children.len(), 3);
        assert!(node
            .children
            .iter()
            .all(|c| c.block_type() == Some(BlockType::Column) && c.children.is_empty()));
        match &node.settings {
            BlockSettings::Columns(s) => assert_eq!(s.column_count, Some(3)),
            other => panic!("unexpected settings: {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_layout() {
        let json = json!([
            {
                "id": "s1",
                "type": "section",
                "settings": { "width": "boxed" },
                "children": [
                    { "id": "h1", "type": "heading", "settings": { "text": "Hi", "htmlTag": "h1" } }
                ]
            }
        ]);

        let layout = parse_layout(&json.to_string()).unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout[0].count(), 2);

        let heading = layout[0].find(&BlockId::from("h1")).unwrap();
        match &heading.settings {
            BlockSettings::Heading(HeadingSettings { text, html_tag, .. }) => {
                assert_eq!(text.as_deref(), Some("Hi"));
                assert_eq!(html_tag.as_deref(), Some("h1"));
            }
            other => panic!("unexpected settings: {:?}", other),
        }
    }

    #[test]
    fn test_null_layout_is_empty() {
        assert!(parse_layout("null").unwrap().is_empty());
        assert!(parse_layout("[]").unwrap().is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let node = BlockNode::empty("s1", BlockType::Section)
            .with_children(vec![BlockNode::empty("sp", BlockType::Spacer)]);

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "s1",
                "type": "section",
                "settings": {},
                "children": [
                    { "id": "sp", "type": "spacer", "settings": {} }
                ]
            })
        );
    }

    #[test]
    fn test_missing_settings_load_as_empty() {
        let layout = parse_layout(r#"[{"id":"x","type":"hero"}]"#).unwrap();
        assert_eq!(layout[0].settings, BlockSettings::empty(BlockType::Hero));
    }
}
