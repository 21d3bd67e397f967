use super::style::{Border, Length, Shadow, ShadowSpec, Sides, Typography};
use serde::{Deserialize, Serialize};

settings_record! {
    pub struct HeroSettings {
        title: String,
        subtitle: String,
        font_family: String,
        text_color: String,
        text_align: String,
        vertical_align: String,
        background_image_url: String,
        background_color: String,
        overlay_color: String,
        overlay_opacity: Length,
        height: Length,
        button_text: String,
        button_link: String,
        button_color: String,
        button_text_color: String,
        layout: String,
    }
}

settings_record! {
    /// Trusted HTML produced by the rich text editor
    pub struct RichTextSettings {
        html_content: String,
        text_align: String,
        color: String,
        font_family: String,
        font_size: Length,
        line_height: Length,
        padding: Sides,
    }
}

settings_record! {
    pub struct HeadingSettings {
        text: String,
        /// `h1` through `h6`
        html_tag: String,
        text_align: String,
        color: String,
        font_family: String,
        font_size: Length,
        font_weight: Length,
        font_style: String,
        text_shadow: ShadowSpec,
        margin: Sides,
        padding: Sides,
    }
}

settings_record! {
    pub struct ImageSettings {
        src: String,
        alt: String,
        caption: String,
        link: String,
        #[serde(deserialize_with = "super::style::flag")]
        link_new_tab: bool,
        width: Length,
        height: Length,
        max_width: Length,
        /// `left`, `center` or `right`
        align: String,
        object_fit: String,
        border: Border,
        border_radius: Length,
        shadow: Shadow,
        #[serde(deserialize_with = "super::style::flag")]
        lazy_load: bool,
    }
}

settings_record! {
    pub struct ButtonSettings {
        text: String,
        link: String,
        #[serde(deserialize_with = "super::style::flag")]
        link_new_window: bool,
        #[serde(deserialize_with = "super::style::flag")]
        link_nofollow: bool,
        /// Tag used when there is no link: `button` or `a`
        html_tag: String,
        align: String,
        size: String,
        icon: String,
        /// `left` or `right`
        icon_position: String,
        icon_spacing: Length,
        typography: Typography,
        color: String,
        background_color: String,
        border: Border,
        padding: Sides,
        hover: ButtonHover,
        box_shadow: ShadowSpec,
        transition_duration: Length,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonHover {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<ShadowSpec>,
    /// `grow`, `shrink`, `pulse`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
}

settings_record! {
    pub struct VideoSettings {
        source_url: String,
        cover_image_url: String,
        /// e.g. `16:9`
        aspect_ratio: String,
        #[serde(deserialize_with = "super::style::flag")]
        auto_play: bool,
        #[serde(deserialize_with = "super::style::flag")]
        muted: bool,
        #[serde(deserialize_with = "super::style::flag")]
        controls: bool,
        #[serde(rename = "loop", deserialize_with = "super::style::flag")]
        looped: bool,
        width: Length,
        border: Border,
    }
}

settings_record! {
    pub struct IconSettings {
        icon: String,
        size: Length,
        color: String,
        /// `none`, `circle` or `square`
        shape: String,
        shape_color: String,
        link: String,
        #[serde(deserialize_with = "super::style::flag")]
        link_new_window: bool,
    }
}

settings_record! {
    /// Empty vertical space, or a horizontal rule when `kind` is `divider`
    pub struct SpacerSettings {
        #[serde(rename = "type")]
        kind: String,
        height: Length,
        width: Length,
        style: String,
        thickness: Length,
        color: String,
        alignment: String,
        margin: Sides,
        padding: Sides,
    }
}

settings_record! {
    pub struct ImageCarouselSettings {
        images: Vec<CarouselImage>,
        #[serde(deserialize_with = "super::style::flag")]
        autoplay: bool,
        autoplay_delay: Length,
        #[serde(rename = "loop", deserialize_with = "super::style::flag")]
        looped: bool,
        #[serde(deserialize_with = "super::style::flag")]
        show_arrows: bool,
        #[serde(deserialize_with = "super::style::flag")]
        show_dots: bool,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

settings_record! {
    pub struct TabsSettings {
        tabs: Vec<TabItem>,
        default_active_tab: String,
        alignment: String,
        tab_text_color: String,
        active_tab_bg_color: String,
        active_tab_text_color: String,
        content_bg_color: String,
        content_text_color: String,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub content: String,
}

settings_record! {
    pub struct AccordionSettings {
        items: Vec<AccordionItem>,
        /// `single` keeps one item open at a time, `multiple` does not
        behavior: String,
        default_active_item: String,
        title_html_tag: String,
        title_color: String,
        title_bg_color: String,
        content_color: String,
        content_bg_color: String,
        space_between: Length,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccordionItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

settings_record! {
    pub struct FormSettings {
        title: String,
        description: String,
        fields: Vec<FormField>,
        submit_button_text: String,
        success_message: String,
        webhook_url: String,
        redirect_url: String,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    #[serde(default)]
    pub id: String,
    /// `text`, `email`, `tel`, `number`, `textarea`, `select`, `checkbox`
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Comma-separated choices for `select`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

settings_record! {
    pub struct MapSettings {
        address: String,
        /// `roadmap`, `satellite`, `hybrid` or `terrain`
        map_type: String,
        #[serde(deserialize_with = "super::style::count")]
        zoom: u32,
        language: String,
        height: Length,
        width: Length,
    }
}

settings_record! {
    pub struct CountdownSettings {
        /// RFC 3339 or `YYYY-MM-DDTHH:MM` local-less timestamp
        end_date: String,
        #[serde(deserialize_with = "super::style::flag")]
        show_labels: bool,
        labels: CountdownLabels,
        /// `hide`, `showMessage` or `redirect`
        action_on_end: String,
        end_message: String,
        redirect_url: String,
        digit_color: String,
        digit_bg_color: String,
        digit_font_family: String,
        label_color: String,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountdownLabels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<String>,
}

settings_record! {
    pub struct SocialShareSettings {
        platforms: Vec<String>,
        /// `iconOnly` or `withLabel`
        style: String,
        shape: String,
        size: String,
        alignment: String,
        icon_color: String,
        share_url: String,
        share_text: String,
    }
}

settings_record! {
    pub struct RepeaterSettings {
        /// `grid` or `carousel`
        layout: String,
        #[serde(deserialize_with = "super::style::count")]
        columns: u32,
        items: Vec<RepeaterItem>,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeaterItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
}

settings_record! {
    pub struct FaqSettings {
        title: String,
        faq_items: Vec<FaqItem>,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

settings_record! {
    pub struct TestimonialsSettings {
        title: String,
        testimonials: Vec<Testimonial>,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub author: String,
    /// Role or company of the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

settings_record! {
    pub struct FeaturedProductsSettings {
        title: String,
        subtitle: String,
        product_ids: Vec<String>,
        #[serde(deserialize_with = "super::style::count")]
        columns: u32,
        #[serde(deserialize_with = "super::style::flag")]
        show_view_all_button: bool,
    }
}

settings_record! {
    /// Raw HTML inserted verbatim
    pub struct CustomHtmlSettings {
        html: String,
    }
}
