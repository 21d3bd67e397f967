use super::{length_or, or, text};
use crate::compiler::{render_block, RenderContext};
use crate::embeds::css_url;
use crate::html::{Attrs, Context};
use pagecraft_compiler_css::{shadow_preset, Declarations};
use pagecraft_model::settings::{ColumnSettings, ColumnsSettings, SectionSettings};
use pagecraft_model::BlockNode;

pub(crate) fn section(
    s: &SectionSettings,
    children: &[BlockNode],
    ctx: &RenderContext,
    out: &mut Context,
) {
    let mut style = Declarations::new();
    style.sides("padding", s.padding.as_ref());
    match or(&s.background_type, "none") {
        "color" => {
            style.text("background-color", s.background_color.as_deref());
        }
        "image" => {
            if let Some(src) = text(&s.background_image_url) {
                style
                    .push("background-image", css_url(src))
                    .push("background-size", "cover")
                    .push("background-position", "center");
            }
        }
        _ => {}
    }
    style.length("min-height", s.min_height.as_ref());

    let mut inner = Declarations::new();
    inner
        .push("display", "flex")
        .push("flex-direction", "column")
        .push("gap", length_or(&s.gap, "16px"));
    if or(&s.width, "boxed") == "boxed" {
        inner.push("max-width", "1200px").push("margin", "0 auto");
    }

    out.open("section", &Attrs::new().set("class", "pc-section").style(&style));
    out.open("div", &Attrs::new().set("class", "pc-section-inner").style(&inner));
    render_children(children, "Drop blocks here", ctx, out);
    out.close("div");
    out.close("section");
}

/// Grid with one track per `column` child
pub(crate) fn columns(
    s: &ColumnsSettings,
    children: &[BlockNode],
    ctx: &RenderContext,
    out: &mut Context,
) {
    let tracks = children.len().max(1);
    let mut style = Declarations::new();
    style
        .push("display", "grid")
        .push("grid-template-columns", format!("repeat({}, minmax(0, 1fr))", tracks))
        .push("gap", length_or(&s.gap, "16px"))
        .sides("padding", s.padding.as_ref());

    out.open("div", &Attrs::new().set("class", "pc-columns").style(&style));
    for child in children {
        render_block(child, ctx, out);
    }
    out.close("div");
}

pub(crate) fn column(
    s: &ColumnSettings,
    children: &[BlockNode],
    ctx: &RenderContext,
    out: &mut Context,
) {
    let tag = match or(&s.html_tag, "div") {
        tag @ ("section" | "article" | "aside" | "header" | "footer" | "nav" | "main") => tag,
        _ => "div",
    };

    let mut style = Declarations::new();
    style
        .push("display", "flex")
        .push("flex-direction", "column")
        .push("gap", "12px")
        .push("justify-content", flex_position(or(&s.vertical_align, "top")))
        .push("align-items", flex_position(or(&s.horizontal_align, "stretch")))
        .sides("padding", s.padding.as_ref())
        .sides("margin", s.margin.as_ref())
        .border(s.border.as_ref())
        .push_opt("box-shadow", text(&s.box_shadow).and_then(shadow_preset).map(str::to_string))
        .push_opt("background", background(s))
        .plain("order", s.order.as_ref());

    out.open(tag, &Attrs::new().set("class", "pc-column").style(&style));
    render_children(children, "Empty column", ctx, out);
    out.close(tag);
}

fn background(s: &ColumnSettings) -> Option<String> {
    if or(&s.background_type, "classic") != "gradient" {
        return text(&s.background_color).map(str::to_string);
    }

    let gradient = s.gradient.as_ref()?;
    let from = or(&gradient.color1, "#ffffff");
    let to = or(&gradient.color2, "#000000");
    Some(match or(&gradient.kind, "linear") {
        "radial" => format!("radial-gradient(circle, {}, {})", from, to),
        _ => {
            let angle = gradient
                .angle
                .as_ref()
                .and_then(|a| a.as_f64())
                .unwrap_or(180.0);
            format!("linear-gradient({}deg, {}, {})", angle, from, to)
        }
    })
}

fn flex_position(value: &str) -> &'static str {
    match value {
        "top" | "left" | "start" => "flex-start",
        "middle" | "center" => "center",
        "bottom" | "right" | "end" => "flex-end",
        "space-between" => "space-between",
        "space-around" => "space-around",
        _ => "stretch",
    }
}

fn render_children(children: &[BlockNode], hint: &str, ctx: &RenderContext, out: &mut Context) {
    if children.is_empty() {
        super::placeholder(ctx.editable, hint, out);
    }
    for child in children {
        render_block(child, ctx, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::settings::{Gradient, Length};

    #[test]
    fn test_gradient_background() {
        let s = ColumnSettings {
            background_type: Some("gradient".to_string()),
            gradient: Some(Gradient {
                color1: Some("#fff".to_string()),
                color2: Some("#000".to_string()),
                kind: None,
                angle: Some(Length::from("90")),
            }),
            ..Default::default()
        };
        assert_eq!(background(&s).as_deref(), Some("linear-gradient(90deg, #fff, #000)"));
    }

    #[test]
    fn test_classic_background() {
        let s = ColumnSettings {
            background_color: Some("#eee".to_string()),
            ..Default::default()
        };
        assert_eq!(background(&s).as_deref(), Some("#eee"));
        assert_eq!(background(&ColumnSettings::default()), None);
    }
}
