use super::{length_or, or, placeholder, text};
use crate::compiler::RenderContext;
use crate::embeds::{css_url, PlayerFlags, VideoSource};
use crate::html::{Attrs, Context};
use pagecraft_compiler_css::{shadow, Declarations};
use pagecraft_model::settings::{
    ButtonSettings, HeadingSettings, HeroSettings, IconSettings, ImageSettings, Length,
    RichTextSettings, ShadowSpec, SpacerSettings, VideoSettings,
};

pub(crate) fn hero(s: &HeroSettings, out: &mut Context) {
    let mut style = Declarations::new();
    style
        .push("position", "relative")
        .push("display", "flex")
        .push("flex-direction", "column")
        .push("min-height", length_or(&s.height, "600px"))
        .push(
            "justify-content",
            match or(&s.vertical_align, "center") {
                "top" => "flex-start",
                "bottom" => "flex-end",
                _ => "center",
            },
        )
        .push(
            "align-items",
            match or(&s.text_align, "center") {
                "left" => "flex-start",
                "right" => "flex-end",
                _ => "center",
            },
        )
        .push("text-align", or(&s.text_align, "center"))
        .text("color", s.text_color.as_deref())
        .text("font-family", s.font_family.as_deref())
        .text("background-color", s.background_color.as_deref());
    if let Some(src) = text(&s.background_image_url) {
        style
            .push("background-image", css_url(src))
            .push("background-size", "cover")
            .push("background-position", "center");
    }

    out.open("div", &Attrs::new().set("class", "pc-hero").style(&style));

    if let Some(color) = text(&s.overlay_color) {
        let mut overlay = Declarations::new();
        overlay
            .push("position", "absolute")
            .push("inset", "0")
            .push("background-color", color)
            .push(
                "opacity",
                s.overlay_opacity
                    .as_ref()
                    .and_then(|o| o.to_plain())
                    .unwrap_or_else(|| "0.5".to_string()),
            );
        out.empty("div", &Attrs::new().set("class", "pc-hero-overlay").style(&overlay));
    }

    let mut inner = Declarations::new();
    inner
        .push("position", "relative")
        .push("padding", "32px")
        .push("max-width", "960px");
    out.open("div", &Attrs::new().set("class", "pc-hero-content").style(&inner));
    if let Some(title) = text(&s.title) {
        out.element("h1", &Attrs::new().set("class", "pc-hero-title"), title);
    }
    if let Some(subtitle) = text(&s.subtitle) {
        out.element("p", &Attrs::new().set("class", "pc-hero-subtitle"), subtitle);
    }
    if let Some(label) = text(&s.button_text) {
        let mut button = Declarations::new();
        button
            .push("display", "inline-block")
            .push("padding", "12px 24px")
            .push("border-radius", "0.5rem")
            .push("text-decoration", "none")
            .text("background-color", s.button_color.as_deref())
            .text("color", s.button_text_color.as_deref());
        let attrs = Attrs::new()
            .set("class", "pc-hero-button")
            .set("href", or(&s.button_link, "#"))
            .style(&button);
        out.element("a", &attrs, label);
    }
    out.close("div");
    out.close("div");
}

/// Author HTML from the rich text editor, written as-is
pub(crate) fn rich_text(s: &RichTextSettings, out: &mut Context) {
    let mut style = Declarations::new();
    style
        .text("text-align", s.text_align.as_deref())
        .text("color", s.color.as_deref())
        .text("font-family", s.font_family.as_deref())
        .length("font-size", s.font_size.as_ref())
        .plain("line-height", s.line_height.as_ref())
        .sides("padding", s.padding.as_ref());

    out.open("div", &Attrs::new().set("class", "pc-rich-text").style(&style));
    out.raw(or(&s.html_content, ""));
    out.close("div");
}

pub(crate) fn heading(s: &HeadingSettings, out: &mut Context) {
    let tag = match or(&s.html_tag, "h2") {
        tag @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => tag,
        _ => "h2",
    };

    let mut style = Declarations::new();
    style
        .text("text-align", s.text_align.as_deref())
        .text("color", s.color.as_deref())
        .text("font-family", s.font_family.as_deref())
        .length("font-size", s.font_size.as_ref())
        .plain("font-weight", s.font_weight.as_ref())
        .text("font-style", s.font_style.as_deref())
        .push_opt("text-shadow", s.text_shadow.as_ref().and_then(text_shadow))
        .sides("margin", s.margin.as_ref())
        .sides("padding", s.padding.as_ref());

    out.element(
        tag,
        &Attrs::new().set("class", "pc-heading").style(&style),
        or(&s.text, "Heading"),
    );
}

/// `text-shadow` has no spread or inset
fn text_shadow(spec: &ShadowSpec) -> Option<String> {
    let color = text(&spec.color)?;
    let px = |v: &Option<Length>| length_or(v, "0");
    Some(format!("{} {} {} {}", px(&spec.x), px(&spec.y), px(&spec.blur), color))
}

pub(crate) fn image(s: &ImageSettings, ctx: &RenderContext, out: &mut Context) {
    let Some(src) = text(&s.src) else {
        placeholder(ctx.editable, "Choose an image", out);
        return;
    };

    let mut figure = Declarations::new();
    figure
        .push("margin", "0")
        .push("text-align", or(&s.align, "center"));

    let mut style = Declarations::new();
    style
        .length("width", s.width.as_ref())
        .length("height", s.height.as_ref())
        .length("max-width", s.max_width.as_ref())
        .text("object-fit", s.object_fit.as_deref())
        .border(s.border.as_ref())
        .length("border-radius", s.border_radius.as_ref())
        .push_opt("box-shadow", s.shadow.as_ref().and_then(shadow));

    let img = Attrs::new()
        .set("src", src)
        .set("alt", or(&s.alt, ""))
        .set_opt("loading", s.lazy_load.unwrap_or(true).then_some("lazy"))
        .style(&style);

    out.open("figure", &Attrs::new().set("class", "pc-image").style(&figure));
    match text(&s.link) {
        Some(link) => {
            let attrs = Attrs::new()
                .set("href", link)
                .new_window(s.link_new_tab.unwrap_or(false));
            out.open("a", &attrs);
            out.empty("img", &img);
            out.close("a");
        }
        None => out.empty("img", &img),
    }
    if let Some(caption) = text(&s.caption) {
        out.element("figcaption", &Attrs::new(), caption);
    }
    out.close("figure");
}

/// A link renders as `<a>`; without one the configured tag is used
pub(crate) fn button(s: &ButtonSettings, out: &mut Context) {
    let link = text(&s.link);
    let tag = match (link, or(&s.html_tag, "button")) {
        (Some(_), _) => "a",
        (None, "a") => "a",
        _ => "button",
    };

    let mut wrapper = Declarations::new();
    wrapper.push("display", "flex").push(
        "justify-content",
        match or(&s.align, "left") {
            "center" => "center",
            "right" => "flex-end",
            "justify" => "stretch",
            _ => "flex-start",
        },
    );

    let mut style = Declarations::new();
    style
        .push("display", "inline-flex")
        .push("align-items", "center")
        .push("gap", length_or(&s.icon_spacing, "8px"))
        .push("cursor", "pointer")
        .push("text-decoration", "none")
        .text("color", s.color.as_deref())
        .text("background-color", s.background_color.as_deref())
        .typography(s.typography.as_ref())
        .border(s.border.as_ref())
        .sides("padding", s.padding.as_ref())
        .box_shadow(s.box_shadow.as_ref())
        .push(
            "transition",
            format!(
                "all {}s ease-in-out",
                s.transition_duration
                    .as_ref()
                    .and_then(|d| d.to_plain())
                    .unwrap_or_else(|| "0.3".to_string())
            ),
        );

    let hover = s
        .hover
        .as_ref()
        .and_then(|h| h.animation.as_deref())
        .filter(|a| !a.is_empty() && *a != "none")
        .map(|a| format!("pc-hover-{}", a))
        .unwrap_or_default();
    let size = format!("pc-button-{}", or(&s.size, "default"));

    let mut attrs = Attrs::new().class(&["pc-button", size.as_str(), hover.as_str()]);
    attrs = match link {
        Some(link) => {
            let attrs = attrs
                .set("href", link)
                .new_window(s.link_new_window.unwrap_or(false));
            if s.link_nofollow.unwrap_or(false) {
                attrs.set("rel", "nofollow")
            } else {
                attrs
            }
        }
        None if tag == "button" => attrs.set("type", "button"),
        None => attrs.set("role", "button"),
    };

    let icon = text(&s.icon);
    let right = or(&s.icon_position, "left") == "right";

    out.open("div", &Attrs::new().set("class", "pc-button-wrapper").style(&wrapper));
    out.open(tag, &attrs.style(&style));
    if let (Some(icon), false) = (icon, right) {
        icon_glyph(icon, out);
    }
    out.element("span", &Attrs::new(), or(&s.text, "Click Me"));
    if let (Some(icon), true) = (icon, right) {
        icon_glyph(icon, out);
    }
    out.close(tag);
    out.close("div");
}

fn icon_glyph(name: &str, out: &mut Context) {
    out.empty(
        "span",
        &Attrs::new()
            .set("class", "pc-icon-glyph")
            .set("data-icon", name)
            .set("aria-hidden", "true"),
    );
}

pub(crate) fn video(s: &VideoSettings, ctx: &RenderContext, out: &mut Context) {
    let Some(source) = s.source_url.as_deref().and_then(VideoSource::parse) else {
        placeholder(ctx.editable, "Add a video URL", out);
        return;
    };

    let flags = PlayerFlags {
        autoplay: s.auto_play.unwrap_or(false),
        muted: s.muted.unwrap_or(false),
        looped: s.looped.unwrap_or(false),
        controls: s.controls.unwrap_or(true),
    };

    let mut frame = Declarations::new();
    frame
        .push("position", "relative")
        .push("width", length_or(&s.width, "100%"))
        .push("aspect-ratio", aspect_ratio(or(&s.aspect_ratio, "16:9")))
        .push("overflow", "hidden")
        .border(s.border.as_ref());

    let mut fill = Declarations::new();
    fill.push("width", "100%").push("height", "100%").push("border", "0");

    out.open("div", &Attrs::new().set("class", "pc-video").style(&frame));
    if let Some(src) = source.embed_url(flags) {
        out.empty(
            "iframe",
            &Attrs::new()
                .set("src", src)
                .set("title", "Embedded video")
                .set(
                    "allow",
                    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
                )
                .flag("allowfullscreen", true)
                .style(&fill),
        );
    } else if let VideoSource::File(src) = &source {
        out.empty(
            "video",
            &Attrs::new()
                .set("src", src.as_str())
                .set_opt("poster", text(&s.cover_image_url))
                .flag("controls", flags.controls)
                .flag("autoplay", flags.autoplay)
                .flag("muted", flags.muted)
                .flag("loop", flags.looped)
                .flag("playsinline", true)
                .style(&fill),
        );
    }
    out.close("div");
}

/// `16:9` -> `16 / 9`
fn aspect_ratio(ratio: &str) -> String {
    match ratio.split_once(':') {
        Some((w, h)) if w.trim().parse::<f64>().is_ok() && h.trim().parse::<f64>().is_ok() => {
            format!("{} / {}", w.trim(), h.trim())
        }
        _ => "16 / 9".to_string(),
    }
}

pub(crate) fn icon(s: &IconSettings, out: &mut Context) {
    let size = s.size.as_ref().and_then(|v| v.as_f64()).unwrap_or(48.0);

    let mut style = Declarations::new();
    style
        .push("display", "inline-flex")
        .push("align-items", "center")
        .push("justify-content", "center")
        .push("width", format!("{}px", size))
        .push("height", format!("{}px", size))
        .push("color", or(&s.color, "#000000"));
    match or(&s.shape, "none") {
        shape @ ("circle" | "square") => {
            style
                .push("background-color", or(&s.shape_color, "#EEEEEE"))
                .push("padding", format!("{}px", size / 4.0))
                .push(
                    "border-radius",
                    if shape == "circle" { "50%" } else { "0.5rem" },
                );
        }
        _ => {}
    }

    let glyph = Attrs::new()
        .set("class", "pc-icon")
        .set("data-icon", or(&s.icon, "Star"))
        .set("aria-hidden", "true")
        .style(&style);

    match text(&s.link) {
        Some(link) => {
            out.open(
                "a",
                &Attrs::new()
                    .set("href", link)
                    .new_window(s.link_new_window.unwrap_or(false)),
            );
            out.empty("span", &glyph);
            out.close("a");
        }
        None => out.empty("span", &glyph),
    }
}

/// Vertical gap, or a horizontal rule for the `divider` kind
pub(crate) fn spacer(s: &SpacerSettings, out: &mut Context) {
    let mut style = Declarations::new();

    if or(&s.kind, "spacer") == "divider" {
        let (left, right) = match or(&s.alignment, "center") {
            "left" => ("0", "auto"),
            "right" => ("auto", "0"),
            _ => ("auto", "auto"),
        };
        style
            .push("width", length_or(&s.width, "100%"))
            .push("border", "0")
            .push(
                "border-top",
                format!(
                    "{} {} {}",
                    length_or(&s.thickness, "1px"),
                    or(&s.style, "solid"),
                    or(&s.color, "#e5e7eb")
                ),
            )
            .push("margin-left", left)
            .push("margin-right", right);
        out.empty("hr", &Attrs::new().set("class", "pc-divider").style(&style));
        return;
    }

    style
        .push("height", length_or(&s.height, "24px"))
        .sides("margin", s.margin.as_ref())
        .sides("padding", s.padding.as_ref());
    out.empty(
        "div",
        &Attrs::new()
            .set("class", "pc-spacer")
            .set("aria-hidden", "true")
            .style(&style),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_shadow_drops_spread() {
        let spec = ShadowSpec {
            kind: Some("inset".to_string()),
            x: Some(Length::px(1.0)),
            y: Some(Length::px(2.0)),
            blur: Some(Length::px(4.0)),
            spread: Some(Length::px(9.0)),
            color: Some("#000".to_string()),
        };
        assert_eq!(text_shadow(&spec).as_deref(), Some("1px 2px 4px #000"));
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio("4:3"), "4 / 3");
        assert_eq!(aspect_ratio("wide"), "16 / 9");
    }
}
