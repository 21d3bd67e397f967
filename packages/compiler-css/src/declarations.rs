//! CSS declaration helpers shared by the stylesheet and inline styles.

use pagecraft_model::settings::{Border, Corners, Length, Shadow, ShadowSpec, Sides, Typography};

/// Ordered `property: value` pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations(Vec<(String, String)>);

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, property: &str, value: impl Into<String>) -> &mut Self {
        self.0.push((property.to_string(), value.into()));
        self
    }

    /// Push `value` unless it is missing
    pub fn push_opt(&mut self, property: &str, value: Option<String>) -> &mut Self {
        if let Some(value) = value {
            self.push(property, value);
        }
        self
    }

    /// Push a text value unless it is missing or blank
    pub fn text(&mut self, property: &str, value: Option<&str>) -> &mut Self {
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        self.push_opt(property, value.map(str::to_string))
    }

    pub fn length(&mut self, property: &str, value: Option<&Length>) -> &mut Self {
        self.push_opt(property, value.and_then(Length::to_css))
    }

    /// Unitless number, e.g. `line-height`, `opacity`, `z-index`
    pub fn plain(&mut self, property: &str, value: Option<&Length>) -> &mut Self {
        self.push_opt(property, value.and_then(Length::to_plain))
    }

    pub fn sides(&mut self, property: &str, value: Option<&Sides>) -> &mut Self {
        self.push_opt(property, value.and_then(sides_value))
    }

    pub fn border(&mut self, border: Option<&Border>) -> &mut Self {
        let Some(border) = border else {
            return self;
        };

        let style = border.style.as_deref().filter(|s| !s.is_empty());
        if let Some(style) = style {
            self.push("border-style", style);
            if style != "none" {
                self.sides("border-width", border.width.as_ref());
                self.text("border-color", border.color.as_deref());
            }
        }
        self.push_opt(
            "border-radius",
            border.radius.as_ref().and_then(corners_value),
        );
        self
    }

    pub fn typography(&mut self, typography: Option<&Typography>) -> &mut Self {
        let Some(t) = typography else {
            return self;
        };

        self.text("font-family", t.font_family.as_deref())
            .length("font-size", t.font_size.as_ref())
            .plain("font-weight", t.font_weight.as_ref())
            .text("font-style", t.font_style.as_deref())
            .text("text-transform", t.text_transform.as_deref())
            .text("text-decoration", t.text_decoration.as_deref())
            .plain("line-height", t.line_height.as_ref())
            .length("letter-spacing", t.letter_spacing.as_ref())
    }

    pub fn box_shadow(&mut self, shadow: Option<&ShadowSpec>) -> &mut Self {
        self.push_opt("box-shadow", shadow.and_then(shadow_value))
    }

    pub fn extend(&mut self, other: Declarations) -> &mut Self {
        self.0.extend(other.0);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// `style` attribute form: `a: 1; b: 2`
    pub fn to_inline(&self) -> String {
        self.iter()
            .map(|(p, v)| format!("{}: {}", p, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// `top right bottom left`, with unset sides as `0`; `None` if all are unset
pub fn sides_value(sides: &Sides) -> Option<String> {
    if sides.is_empty() {
        return None;
    }
    Some(four([&sides.top, &sides.right, &sides.bottom, &sides.left]))
}

/// `top-left top-right bottom-right bottom-left`
pub fn corners_value(corners: &Corners) -> Option<String> {
    let all = [&corners.tl, &corners.tr, &corners.br, &corners.bl];
    if all.iter().all(|c| c.is_none()) {
        return None;
    }
    Some(four(all))
}

fn four(values: [&Option<Length>; 4]) -> String {
    values
        .into_iter()
        .map(|v| v.as_ref().and_then(Length::to_css).unwrap_or_else(|| "0".to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `[inset] x y blur spread color`
pub fn shadow_value(shadow: &ShadowSpec) -> Option<String> {
    let color = shadow.color.as_deref().map(str::trim).filter(|c| !c.is_empty())?;
    let px = |v: &Option<Length>| v.as_ref().and_then(Length::to_css).unwrap_or_else(|| "0".to_string());

    let mut value = format!(
        "{} {} {} {} {}",
        px(&shadow.x),
        px(&shadow.y),
        px(&shadow.blur),
        px(&shadow.spread),
        color
    );
    if shadow.kind.as_deref() == Some("inset") {
        value.insert_str(0, "inset ");
    }
    Some(value)
}

/// Preset names map to fixed shadows; `none` and unknown names to nothing
pub fn shadow_preset(name: &str) -> Option<&'static str> {
    match name {
        "sm" => Some("0 1px 2px 0 rgba(0, 0, 0, 0.05)"),
        "md" => Some("0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -2px rgba(0, 0, 0, 0.1)"),
        "lg" => Some("0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -4px rgba(0, 0, 0, 0.1)"),
        "xl" => Some("0 20px 25px -5px rgba(0, 0, 0, 0.1), 0 8px 10px -6px rgba(0, 0, 0, 0.1)"),
        _ => None,
    }
}

pub fn shadow(shadow: &Shadow) -> Option<String> {
    match shadow {
        Shadow::Preset(name) => shadow_preset(name).map(str::to_string),
        Shadow::Custom(spec) => shadow_value(spec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides() {
        let sides = Sides {
            top: Some(Length::px(64.0)),
            bottom: Some(Length::from("2rem")),
            ..Default::default()
        };
        assert_eq!(sides_value(&sides).as_deref(), Some("64px 0 2rem 0"));
        assert_eq!(sides_value(&Sides::default()), None);
    }

    #[test]
    fn test_border() {
        let border = Border {
            style: Some("dashed".to_string()),
            width: Some(Sides::all(2.0)),
            color: Some("#ddd".to_string()),
            radius: Some(Corners {
                tl: Some(Length::px(4.0)),
                ..Default::default()
            }),
        };

        let mut decls = Declarations::new();
        decls.border(Some(&border));
        assert_eq!(
            decls.to_inline(),
            "border-style: dashed; border-width: 2px 2px 2px 2px; border-color: #ddd; border-radius: 4px 0 0 0"
        );
    }

    #[test]
    fn test_border_none_skips_width() {
        let border = Border {
            style: Some("none".to_string()),
            width: Some(Sides::all(2.0)),
            ..Default::default()
        };
        let mut decls = Declarations::new();
        decls.border(Some(&border));
        assert_eq!(decls.to_inline(), "border-style: none");
    }

    #[test]
    fn test_shadow() {
        let spec = ShadowSpec {
            kind: Some("inset".to_string()),
            x: Some(Length::px(1.0)),
            y: Some(Length::px(2.0)),
            blur: Some(Length::px(3.0)),
            spread: None,
            color: Some("rgba(0,0,0,0.5)".to_string()),
        };
        assert_eq!(
            shadow_value(&spec).as_deref(),
            Some("inset 1px 2px 3px 0 rgba(0,0,0,0.5)")
        );
        assert_eq!(shadow_value(&ShadowSpec::default()), None);
        assert!(shadow(&Shadow::Preset("md".to_string())).is_some());
        assert_eq!(shadow(&Shadow::Preset("none".to_string())), None);
    }

    #[test]
    fn test_blank_text_is_skipped() {
        let mut decls = Declarations::new();
        decls.text("color", Some("  ")).text("background-color", Some("#fff"));
        assert_eq!(decls.to_inline(), "background-color: #fff");
    }
}
