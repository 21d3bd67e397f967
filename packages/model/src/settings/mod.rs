//! # Block Settings
//!
//! Each block type has its own settings record. Tree operations never look
//! inside settings; they are consumed by the renderer for that type.
//!
//! Every record keeps keys it does not model in `extra`, so a layout written
//! by a newer editor survives a load/save cycle. Settings that do not fit the
//! record for their type, or whose type tag is unknown, are kept verbatim as
//! [`BlockSettings::Opaque`].

use crate::block::BlockType;
use serde_json::{Map, Value};

/// Declares a settings record: every modelled field is optional and skipped
/// when unset, followed by the shared advanced fields and the unmodelled rest.
macro_rules! settings_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
            #[serde(flatten)]
            pub advanced: $crate::settings::style::Advanced,
            #[serde(flatten)]
            pub extra: serde_json::Map<String, serde_json::Value>,
        }
    };
}

mod containers;
mod content;
pub mod style;

pub use containers::*;
pub use content::*;
pub use style::{
    Advanced, Border, Corners, CustomAttribute, Length, Shadow, ShadowSpec, Sides, Typography,
    Visibility,
};

/// Typed settings, one variant per block type
#[derive(Debug, Clone, PartialEq)]
pub enum BlockSettings {
    Section(SectionSettings),
    Columns(ColumnsSettings),
    Column(ColumnSettings),
    Hero(HeroSettings),
    RichText(RichTextSettings),
    Heading(HeadingSettings),
    Image(ImageSettings),
    Button(ButtonSettings),
    Video(VideoSettings),
    Icon(IconSettings),
    Spacer(SpacerSettings),
    ImageCarousel(ImageCarouselSettings),
    Tabs(TabsSettings),
    Accordion(AccordionSettings),
    Form(FormSettings),
    Map(MapSettings),
    Countdown(CountdownSettings),
    SocialShare(SocialShareSettings),
    Repeater(RepeaterSettings),
    Faq(FaqSettings),
    Testimonials(TestimonialsSettings),
    FeaturedProducts(FeaturedProductsSettings),
    CustomHtml(CustomHtmlSettings),
    /// Unknown type tag, or settings that do not fit the record for the tag
    Opaque { type_name: String, settings: Value },
}

macro_rules! dispatch_settings {
    ($($variant:ident => $record:ident),* $(,)?) => {
        impl BlockSettings {
            /// Empty settings for a block type
            pub fn empty(block_type: BlockType) -> Self {
                match block_type {
                    $(BlockType::$variant => BlockSettings::$variant($record::default()),)*
                }
            }

            /// `None` for opaque settings
            pub fn block_type(&self) -> Option<BlockType> {
                match self {
                    $(BlockSettings::$variant(_) => Some(BlockType::$variant),)*
                    BlockSettings::Opaque { .. } => None,
                }
            }

            pub fn type_name(&self) -> &str {
                match self {
                    $(BlockSettings::$variant(_) => BlockType::$variant.as_str(),)*
                    BlockSettings::Opaque { type_name, .. } => type_name,
                }
            }

            /// Build typed settings from a persisted type tag and settings value
            pub fn from_parts(type_name: &str, settings: Value) -> Self {
                let settings = match settings {
                    Value::Null => Value::Object(Map::new()),
                    other => other,
                };
                let parsed = match type_name.parse::<BlockType>() {
                    $(Ok(BlockType::$variant) => serde_json::from_value::<$record>(settings.clone())
                        .map(BlockSettings::$variant),)*
                    Err(_) => {
                        tracing::warn!(type_name, "unknown block type, keeping settings as-is");
                        return BlockSettings::Opaque {
                            type_name: type_name.to_string(),
                            settings,
                        };
                    }
                };
                parsed.unwrap_or_else(|err| {
                    tracing::warn!(type_name, %err, "settings do not match block type, keeping as-is");
                    BlockSettings::Opaque {
                        type_name: type_name.to_string(),
                        settings,
                    }
                })
            }

            /// Persisted settings value
            pub fn to_value(&self) -> Result<Value, serde_json::Error> {
                match self {
                    $(BlockSettings::$variant(record) => serde_json::to_value(record),)*
                    BlockSettings::Opaque { settings, .. } => Ok(settings.clone()),
                }
            }

            /// Advanced (id, classes, visibility) settings, if the type has them
            pub fn advanced(&self) -> Option<&Advanced> {
                match self {
                    $(BlockSettings::$variant(record) => Some(&record.advanced),)*
                    BlockSettings::Opaque { .. } => None,
                }
            }
        }
    };
}

dispatch_settings! {
    Section => SectionSettings,
    Columns => ColumnsSettings,
    Column => ColumnSettings,
    Hero => HeroSettings,
    RichText => RichTextSettings,
    Heading => HeadingSettings,
    Image => ImageSettings,
    Button => ButtonSettings,
    Video => VideoSettings,
    Icon => IconSettings,
    Spacer => SpacerSettings,
    ImageCarousel => ImageCarouselSettings,
    Tabs => TabsSettings,
    Accordion => AccordionSettings,
    Form => FormSettings,
    Map => MapSettings,
    Countdown => CountdownSettings,
    SocialShare => SocialShareSettings,
    Repeater => RepeaterSettings,
    Faq => FaqSettings,
    Testimonials => TestimonialsSettings,
    FeaturedProducts => FeaturedProductsSettings,
    CustomHtml => CustomHtmlSettings,
}

impl BlockSettings {
    /// `columnCount` of a `columns` block; unset counts as zero
    pub fn column_count(&self) -> Option<u32> {
        match self {
            BlockSettings::Columns(settings) => Some(settings.column_count.unwrap_or(0)),
            _ => None,
        }
    }

    /// Whether `other` may replace these settings without changing the type
    ///
    /// Opaque settings only match opaque settings with the same tag, so a
    /// typed block can never turn opaque through an edit.
    pub fn same_type(&self, other: &BlockSettings) -> bool {
        self.block_type() == other.block_type() && self.type_name() == other.type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_type_is_kept_verbatim() {
        let raw = json!({ "foo": [1, 2, 3] });
        let settings = BlockSettings::from_parts("productGallery", raw.clone());

        assert_eq!(settings.block_type(), None);
        assert_eq!(settings.type_name(), "productGallery");
        assert_eq!(settings.to_value().unwrap(), raw);
    }

    #[test]
    fn test_mismatched_settings_become_opaque() {
        let raw = json!({ "columnCount": { "nested": true }, "gap": [] });
        let settings = BlockSettings::from_parts("columns", raw.clone());

        match &settings {
            BlockSettings::Opaque { type_name, .. } => assert_eq!(type_name, "columns"),
            other => panic!("expected opaque settings, got {:?}", other),
        }
        assert_eq!(settings.to_value().unwrap(), raw);
    }

    #[test]
    fn test_unmodelled_keys_survive() {
        let raw = json!({ "title": "Sale", "parallax": { "speed": 0.4 }, "cssId": "top" });
        let settings = BlockSettings::from_parts("hero", raw.clone());

        match &settings {
            BlockSettings::Hero(hero) => {
                assert_eq!(hero.title.as_deref(), Some("Sale"));
                assert_eq!(hero.advanced.css_id.as_deref(), Some("top"));
                assert!(hero.extra.contains_key("parallax"));
            }
            other => panic!("unexpected settings: {:?}", other),
        }
        assert_eq!(settings.to_value().unwrap(), raw);
    }

    #[test]
    fn test_column_count_accepts_strings() {
        let settings = BlockSettings::from_parts("columns", json!({ "columnCount": "3" }));
        assert_eq!(settings.column_count(), Some(3));

        let unset = BlockSettings::from_parts("columns", json!({}));
        assert_eq!(unset.column_count(), Some(0));

        let heading = BlockSettings::empty(BlockType::Heading);
        assert_eq!(heading.column_count(), None);
    }

    #[test]
    fn test_same_type() {
        let columns = BlockSettings::empty(BlockType::Columns);
        let broken = BlockSettings::from_parts("columns", json!({ "columnCount": [] }));
        let widget = BlockSettings::from_parts("widget", json!({}));

        assert!(columns.same_type(&BlockSettings::empty(BlockType::Columns)));
        assert!(!columns.same_type(&BlockSettings::empty(BlockType::Column)));
        assert!(!columns.same_type(&broken));
        assert!(widget.same_type(&BlockSettings::from_parts("widget", json!({ "a": 1 }))));
    }

    #[test]
    fn test_unreadable_values_keep_settings_verbatim() {
        for raw in [
            json!({ "columnCount": { "bad": true } }),
            json!({ "columnCount": "three" }),
            json!({ "columnCount": -2 }),
            json!({ "stackOnMobile": "sometimes" }),
        ] {
            let settings = BlockSettings::from_parts("columns", raw.clone());
            assert!(settings.block_type().is_none(), "{} should stay opaque", raw);
            assert_eq!(settings.type_name(), "columns");
            assert_eq!(settings.to_value().unwrap(), raw);
        }

        let blank = BlockSettings::from_parts("columns", json!({ "columnCount": "", "stackOnMobile": null }));
        assert_eq!(blank.column_count(), Some(0));
    }

    #[test]
    fn test_empty_settings_serialize_to_empty_object() {
        for block_type in BlockType::ALL {
            let settings = BlockSettings::empty(block_type);
            assert_eq!(settings.block_type(), Some(block_type));
            assert_eq!(settings.to_value().unwrap(), json!({}));
        }
    }
}
