use super::{length_or, or, placeholder, text};
use crate::compiler::RenderContext;
use crate::embeds::{map_embed_url, platform_label, share_url};
use crate::html::{Attrs, Context};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pagecraft_compiler_css::Declarations;
use pagecraft_model::settings::{
    AccordionSettings, CountdownSettings, FormField, FormSettings, ImageCarouselSettings,
    MapSettings, SocialShareSettings, TabsSettings,
};
use pagecraft_model::BlockId;

pub(crate) fn image_carousel(
    s: &ImageCarouselSettings,
    id: &BlockId,
    ctx: &RenderContext,
    out: &mut Context,
) {
    let images: Vec<_> = s
        .images
        .iter()
        .flatten()
        .filter(|image| !image.src.trim().is_empty())
        .collect();
    if images.is_empty() {
        placeholder(ctx.editable, "Add images to the carousel", out);
        return;
    }

    let autoplay = s.autoplay.unwrap_or(true);
    let attrs = Attrs::new()
        .set("class", "pc-carousel")
        .set("data-autoplay", autoplay.to_string())
        .set(
            "data-autoplay-delay",
            s.autoplay_delay
                .as_ref()
                .and_then(|d| d.to_plain())
                .unwrap_or_else(|| "3000".to_string()),
        )
        .set("data-loop", s.looped.unwrap_or(true).to_string());

    let mut track = Declarations::new();
    track
        .push("display", "flex")
        .push("overflow-x", "auto")
        .push("scroll-snap-type", "x mandatory");
    let mut slide = Declarations::new();
    slide
        .push("flex", "0 0 100%")
        .push("margin", "0")
        .push("scroll-snap-align", "start");

    out.open("div", &attrs);
    out.open("div", &Attrs::new().set("class", "pc-carousel-track").style(&track));
    for (index, image) in images.iter().enumerate() {
        let slide_id = format!("pc-{}-slide-{}", id, index);
        out.open(
            "figure",
            &Attrs::new()
                .set("id", slide_id)
                .set("class", "pc-carousel-slide")
                .style(&slide),
        );
        let img = Attrs::new()
            .set("src", image.src.trim())
            .set("alt", or(&image.alt, ""))
            .set("loading", if index == 0 { "eager" } else { "lazy" });
        match text(&image.link) {
            Some(link) => {
                out.open("a", &Attrs::new().set("href", link));
                out.empty("img", &img);
                out.close("a");
            }
            None => out.empty("img", &img),
        }
        if let Some(caption) = text(&image.caption) {
            out.element("figcaption", &Attrs::new(), caption);
        }
        out.close("figure");
    }
    out.close("div");

    if s.show_arrows.unwrap_or(true) && images.len() > 1 {
        for (class, label, glyph) in [
            ("pc-carousel-prev", "Previous slide", "\u{2039}"),
            ("pc-carousel-next", "Next slide", "\u{203a}"),
        ] {
            out.element(
                "button",
                &Attrs::new()
                    .set("type", "button")
                    .set("class", class)
                    .set("aria-label", label),
                glyph,
            );
        }
    }
    if s.show_dots.unwrap_or(true) && images.len() > 1 {
        out.open("div", &Attrs::new().set("class", "pc-carousel-dots"));
        for index in 0..images.len() {
            out.element(
                "a",
                &Attrs::new()
                    .set("href", format!("#pc-{}-slide-{}", id, index))
                    .set("aria-label", format!("Go to slide {}", index + 1)),
                "",
            );
        }
        out.close("div");
    }
    out.close("div");
}

/// Tab strip with one panel per tab; inactive panels are `hidden`
pub(crate) fn tabs(s: &TabsSettings, id: &BlockId, out: &mut Context) {
    let tabs = s.tabs.as_deref().unwrap_or_default();
    if tabs.is_empty() {
        return;
    }

    let active = text(&s.default_active_tab)
        .and_then(|wanted| tabs.iter().position(|t| t.id == wanted))
        .unwrap_or(0);

    let mut strip = Declarations::new();
    strip.push("display", "flex").push(
        "justify-content",
        match or(&s.alignment, "left") {
            "center" => "center",
            "right" => "flex-end",
            "justify" => "space-between",
            _ => "flex-start",
        },
    );

    out.open("div", &Attrs::new().set("class", "pc-tabs"));
    out.open("div", &Attrs::new().set("class", "pc-tab-list").set("role", "tablist").style(&strip));
    for (index, tab) in tabs.iter().enumerate() {
        let selected = index == active;
        let mut style = Declarations::new();
        if selected {
            style
                .text("background-color", s.active_tab_bg_color.as_deref())
                .text("color", s.active_tab_text_color.as_deref());
        } else {
            style.text("color", s.tab_text_color.as_deref());
        }
        out.element(
            "button",
            &Attrs::new()
                .set("type", "button")
                .set("role", "tab")
                .set("id", format!("pc-{}-tab-{}", id, index))
                .set("aria-controls", format!("pc-{}-panel-{}", id, index))
                .set("aria-selected", selected.to_string())
                .class(&["pc-tab", if selected { "pc-tab-active" } else { "" }])
                .style(&style),
            if tab.label.trim().is_empty() {
                "Tab"
            } else {
                tab.label.trim()
            },
        );
    }
    out.close("div");

    let mut panel = Declarations::new();
    panel
        .push("padding", "16px")
        .text("background-color", s.content_bg_color.as_deref())
        .text("color", s.content_text_color.as_deref());
    for (index, tab) in tabs.iter().enumerate() {
        out.element(
            "div",
            &Attrs::new()
                .set("role", "tabpanel")
                .set("id", format!("pc-{}-panel-{}", id, index))
                .set("aria-labelledby", format!("pc-{}-tab-{}", id, index))
                .set("class", "pc-tab-panel")
                .flag("hidden", index != active)
                .style(&panel),
            &tab.content,
        );
    }
    out.close("div");
}

/// `<details>` items; `single` behaviour shares a group name so only one stays open
pub(crate) fn accordion(s: &AccordionSettings, id: &BlockId, out: &mut Context) {
    let items = s.items.as_deref().unwrap_or_default();
    if items.is_empty() {
        return;
    }

    let single = or(&s.behavior, "single") == "single";
    let open = text(&s.default_active_item);
    let title_tag = match or(&s.title_html_tag, "div") {
        tag @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "span") => tag,
        _ => "div",
    };

    let mut wrapper = Declarations::new();
    wrapper
        .push("display", "flex")
        .push("flex-direction", "column")
        .push("gap", length_or(&s.space_between, "8px"));
    let mut summary = Declarations::new();
    summary
        .push("padding", "12px 16px")
        .text("color", s.title_color.as_deref())
        .text("background-color", s.title_bg_color.as_deref());
    let mut content = Declarations::new();
    content
        .push("padding", "12px 16px")
        .text("color", s.content_color.as_deref())
        .text("background-color", s.content_bg_color.as_deref());

    out.open("div", &Attrs::new().set("class", "pc-accordion").style(&wrapper));
    for item in items {
        let attrs = Attrs::new()
            .set("class", "pc-accordion-item")
            .flag("open", open == Some(item.id.as_str()));
        let attrs = if single {
            attrs.set("name", format!("pc-{}", id))
        } else {
            attrs
        };
        out.open("details", &attrs);
        out.open("summary", &Attrs::new().style(&summary));
        out.element(title_tag, &Attrs::new().set("class", "pc-accordion-title"), &item.title);
        out.close("summary");
        out.element(
            "div",
            &Attrs::new().set("class", "pc-accordion-content").style(&content),
            &item.content,
        );
        out.close("details");
    }
    out.close("div");
}

pub(crate) fn form(s: &FormSettings, id: &BlockId, out: &mut Context) {
    let attrs = Attrs::new()
        .set("class", "pc-form")
        .set("method", "post")
        .set_opt("action", text(&s.webhook_url))
        .set_opt("data-success-message", text(&s.success_message))
        .set_opt("data-redirect-url", text(&s.redirect_url));

    out.open("form", &attrs);
    if let Some(title) = text(&s.title) {
        out.element("h3", &Attrs::new().set("class", "pc-form-title"), title);
    }
    if let Some(description) = text(&s.description) {
        out.element("p", &Attrs::new().set("class", "pc-form-description"), description);
    }
    for (index, field) in s.fields.iter().flatten().enumerate() {
        form_field(field, &format!("pc-{}-field-{}", id, index), out);
    }
    out.element(
        "button",
        &Attrs::new().set("type", "submit").set("class", "pc-button"),
        or(&s.submit_button_text, "Submit"),
    );
    out.close("form");
}

fn form_field(field: &FormField, dom_id: &str, out: &mut Context) {
    let name = text(&field.field_id)
        .or_else(|| Some(field.id.trim()).filter(|id| !id.is_empty()))
        .unwrap_or(dom_id);
    let required = field.required.unwrap_or(false);
    let label = if field.label.trim().is_empty() {
        name
    } else {
        field.label.trim()
    };

    out.open("div", &Attrs::new().set("class", "pc-form-field"));

    if field.kind == "checkbox" {
        out.open("label", &Attrs::new().set("for", dom_id));
        out.empty(
            "input",
            &Attrs::new()
                .set("type", "checkbox")
                .set("id", dom_id)
                .set("name", name)
                .flag("required", required),
        );
        out.element("span", &Attrs::new(), label);
        out.close("label");
        out.close("div");
        return;
    }

    out.element("label", &Attrs::new().set("for", dom_id), label);
    let common = Attrs::new()
        .set("id", dom_id)
        .set("name", name)
        .set_opt("placeholder", field.placeholder.as_deref())
        .flag("required", required);

    match field.kind.as_str() {
        "textarea" => out.element("textarea", &common.set("rows", "4"), ""),
        "select" => {
            out.open("select", &common);
            let choices = field.options.as_deref().unwrap_or_default();
            for choice in choices.split(',').map(str::trim).filter(|c| !c.is_empty()) {
                out.element("option", &Attrs::new().set("value", choice), choice);
            }
            out.close("select");
        }
        kind => {
            let kind = match kind {
                "email" | "tel" | "number" | "date" | "url" => kind,
                _ => "text",
            };
            out.empty("input", &common.set("type", kind));
        }
    }
    out.close("div");
}

pub(crate) fn map(s: &MapSettings, ctx: &RenderContext, out: &mut Context) {
    let address = or(&s.address, "Eiffel Tower, Paris, France");
    let src = map_embed_url(
        address,
        or(&s.map_type, "roadmap"),
        s.zoom.unwrap_or(14),
        s.language.as_deref(),
        ctx.maps_api_key,
    );

    let mut style = Declarations::new();
    style
        .push("width", length_or(&s.width, "100%"))
        .push("height", length_or(&s.height, "450px"))
        .push("border", "0");

    out.empty(
        "iframe",
        &Attrs::new()
            .set("class", "pc-map")
            .set("src", src)
            .set("title", format!("Map of {}", address))
            .set("loading", "lazy")
            .set("referrerpolicy", "no-referrer-when-downgrade")
            .flag("allowfullscreen", true)
            .style(&style),
    );
}

/// Whole units left until a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// `None` once the deadline has passed
    pub fn until(end: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let total = (end - now).num_seconds();
        if total <= 0 {
            return None;
        }
        Some(Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        })
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` read as UTC, or a bare date
pub(crate) fn parse_end_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub(crate) fn countdown(s: &CountdownSettings, ctx: &RenderContext, out: &mut Context) {
    let Some(end) = s.end_date.as_deref().and_then(parse_end_date) else {
        out.element(
            "div",
            &Attrs::new().set("class", "pc-countdown-empty"),
            "Countdown Timer: Please set an end date.",
        );
        return;
    };

    let action = or(&s.action_on_end, "hide");
    let Some(left) = TimeLeft::until(end, ctx.now) else {
        match action {
            "showMessage" => out.element(
                "div",
                &Attrs::new().set("class", "pc-countdown-ended"),
                or(&s.end_message, "Time's up!"),
            ),
            "redirect" => {
                if let Some(url) = text(&s.redirect_url) {
                    out.empty(
                        "div",
                        &Attrs::new()
                            .set("class", "pc-countdown-ended")
                            .set("data-redirect-url", url),
                    );
                }
            }
            _ => {}
        }
        return;
    };

    let labels = s.labels.clone().unwrap_or_default();
    let units = [
        (left.days, or(&labels.days, "Days")),
        (left.hours, or(&labels.hours, "Hours")),
        (left.minutes, or(&labels.minutes, "Minutes")),
        (left.seconds, or(&labels.seconds, "Seconds")),
    ];
    let show_labels = s.show_labels.unwrap_or(true);

    let mut digit = Declarations::new();
    digit
        .push("color", or(&s.digit_color, "#000000"))
        .push("background-color", or(&s.digit_bg_color, "#FFFFFF"))
        .push("font-family", or(&s.digit_font_family, "monospace"))
        .push("padding", "8px 12px")
        .push("border-radius", "0.5rem");
    let mut label = Declarations::new();
    label.push("color", or(&s.label_color, "#64748b"));

    let attrs = Attrs::new()
        .set("class", "pc-countdown")
        .set("data-end", end.to_rfc3339())
        .set("data-action-on-end", action)
        .set_opt("data-end-message", text(&s.end_message))
        .set_opt("data-redirect-url", text(&s.redirect_url));

    out.open("div", &attrs);
    for (value, name) in units {
        out.open("div", &Attrs::new().set("class", "pc-countdown-unit"));
        out.element(
            "span",
            &Attrs::new().set("class", "pc-countdown-digits").style(&digit),
            &format!("{:02}", value),
        );
        if show_labels {
            out.element(
                "span",
                &Attrs::new().set("class", "pc-countdown-label").style(&label),
                name,
            );
        }
        out.close("div");
    }
    out.close("div");
}

pub(crate) fn social_share(s: &SocialShareSettings, out: &mut Context) {
    const DEFAULT_PLATFORMS: [&str; 3] = ["facebook", "twitter", "linkedin"];

    let platforms: Vec<&str> = match &s.platforms {
        Some(platforms) => platforms.iter().map(String::as_str).collect(),
        None => DEFAULT_PLATFORMS.to_vec(),
    };
    let with_label = or(&s.style, "iconOnly") == "withLabel";
    let page_url = text(&s.share_url);
    let share_text = or(&s.share_text, "");

    let mut wrapper = Declarations::new();
    wrapper.push("display", "flex").push("gap", "8px").push(
        "justify-content",
        match or(&s.alignment, "left") {
            "center" => "center",
            "right" => "flex-end",
            _ => "flex-start",
        },
    );
    let mut link = Declarations::new();
    link.text("color", s.icon_color.as_deref());

    out.open("div", &Attrs::new().set("class", "pc-social-share").style(&wrapper));
    for platform in platforms {
        let name = platform_label(platform).unwrap_or(platform);
        // Without a configured URL the page shares itself from the browser
        let href = match page_url {
            Some(url) => share_url(platform, url, share_text).unwrap_or_else(|| "#".to_string()),
            None => "#".to_string(),
        };
        let shape = format!("pc-share-{}", or(&s.shape, "circle"));
        let size = format!("pc-share-{}", or(&s.size, "md"));
        let class = format!("pc-share-{}", platform);
        let attrs = Attrs::new()
            .class(&["pc-share", class.as_str(), shape.as_str(), size.as_str()])
            .set("href", href)
            .set("data-platform", platform)
            .set("aria-label", format!("Share on {}", name))
            .new_window(true)
            .style(&link);

        out.open("a", &attrs);
        out.empty(
            "span",
            &Attrs::new()
                .set("class", "pc-icon-glyph")
                .set("data-icon", platform)
                .set("aria-hidden", "true"),
        );
        if with_label {
            out.element("span", &Attrs::new(), name);
        }
        out.close("a");
    }
    out.close("div");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_left() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 3, 5, 6, 7).unwrap();
        assert_eq!(
            TimeLeft::until(end, now),
            Some(TimeLeft {
                days: 2,
                hours: 5,
                minutes: 6,
                seconds: 7
            })
        );
        assert_eq!(TimeLeft::until(now, end), None);
        assert_eq!(TimeLeft::until(now, now), None);
    }

    #[test]
    fn test_end_date_formats() {
        let expected = Utc.with_ymd_and_hms(2030, 6, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_end_date("2030-06-01T12:30"), Some(expected));
        assert_eq!(parse_end_date("2030-06-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_end_date("2030-06-01T14:30:00+02:00"), Some(expected));
        assert_eq!(
            parse_end_date("2030-06-01"),
            Some(Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_end_date("soon"), None);
    }
}
