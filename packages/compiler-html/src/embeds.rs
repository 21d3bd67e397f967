//! Third-party URLs built from block settings: video players, maps and
//! share links, plus price formatting for product cards.

use url::Url;

/// Where a video block's source points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    YouTube(String),
    Vimeo(String),
    /// Anything else is played by a native `<video>` element
    File(String),
}

/// Player flags appended to embed URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerFlags {
    pub autoplay: bool,
    pub muted: bool,
    pub looped: bool,
    pub controls: bool,
}

impl VideoSource {
    /// `None` for a blank source
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let Ok(url) = Url::parse(raw) else {
            return Some(VideoSource::File(raw.to_string()));
        };
        let host = url.host_str().unwrap_or_default();
        let host = host.strip_prefix("www.").unwrap_or(host);
        let host = host.strip_prefix("m.").unwrap_or(host);
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let found = match host {
            "youtube.com" | "youtube-nocookie.com" => match segments.as_slice() {
                ["watch"] => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, id)| VideoSource::YouTube(id.into_owned())),
                ["embed", id, ..] | ["shorts", id, ..] | ["live", id, ..] => {
                    Some(VideoSource::YouTube(id.to_string()))
                }
                _ => None,
            },
            "youtu.be" => segments.first().map(|id| VideoSource::YouTube(id.to_string())),
            "vimeo.com" | "player.vimeo.com" => segments
                .iter()
                .rev()
                .find(|s| s.chars().all(|c| c.is_ascii_digit()))
                .map(|id| VideoSource::Vimeo(id.to_string())),
            _ => None,
        };
        Some(found.unwrap_or_else(|| VideoSource::File(raw.to_string())))
    }

    /// Player URL for iframe sources, `None` for files
    pub fn embed_url(&self, flags: PlayerFlags) -> Option<String> {
        let on = |flag: bool| if flag { "1" } else { "0" };
        match self {
            VideoSource::YouTube(id) => {
                let mut params = vec![
                    ("autoplay", on(flags.autoplay).to_string()),
                    ("mute", on(flags.muted).to_string()),
                    ("controls", on(flags.controls).to_string()),
                ];
                if flags.looped {
                    params.push(("loop", "1".to_string()));
                    params.push(("playlist", id.clone()));
                }
                Some(with_query(&format!("https://www.youtube.com/embed/{}", id), &params))
            }
            VideoSource::Vimeo(id) => {
                let params = [
                    ("autoplay", on(flags.autoplay).to_string()),
                    ("muted", on(flags.muted).to_string()),
                    ("loop", on(flags.looped).to_string()),
                    ("controls", on(flags.controls).to_string()),
                ];
                Some(with_query(&format!("https://player.vimeo.com/video/{}", id), &params))
            }
            VideoSource::File(_) => None,
        }
    }
}

/// Google Maps iframe URL; without an API key the keyless embed is used
pub fn map_embed_url(
    address: &str,
    map_type: &str,
    zoom: u32,
    language: Option<&str>,
    api_key: Option<&str>,
) -> String {
    let language = language.map(str::trim).filter(|l| !l.is_empty());

    match api_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => {
            let mut params = vec![
                ("key", key.to_string()),
                ("q", address.to_string()),
                ("maptype", map_type.to_string()),
                ("zoom", zoom.to_string()),
            ];
            if let Some(language) = language {
                params.push(("language", language.to_string()));
            }
            with_query("https://www.google.com/maps/embed/v1/place", &params)
        }
        None => {
            let kind = match map_type {
                "satellite" => "k",
                "hybrid" => "h",
                "terrain" => "p",
                _ => "m",
            };
            let mut params = vec![
                ("q", address.to_string()),
                ("t", kind.to_string()),
                ("z", zoom.to_string()),
                ("output", "embed".to_string()),
            ];
            if let Some(language) = language {
                params.push(("hl", language.to_string()));
            }
            with_query("https://maps.google.com/maps", &params)
        }
    }
}

/// Display name of a share platform
pub fn platform_label(platform: &str) -> Option<&'static str> {
    match platform {
        "facebook" => Some("Facebook"),
        "twitter" => Some("X (Twitter)"),
        "linkedin" => Some("LinkedIn"),
        "whatsapp" => Some("WhatsApp"),
        "telegram" => Some("Telegram"),
        "pinterest" => Some("Pinterest"),
        "reddit" => Some("Reddit"),
        _ => None,
    }
}

/// Share link for a platform, `None` for platforms we do not know
pub fn share_url(platform: &str, page_url: &str, text: &str) -> Option<String> {
    let url = page_url.to_string();
    let text = text.to_string();
    let link = match platform {
        "facebook" => with_query("https://www.facebook.com/sharer/sharer.php", &[("u", url)]),
        "twitter" => with_query("https://twitter.com/intent/tweet", &[("url", url), ("text", text)]),
        "linkedin" => with_query(
            "https://www.linkedin.com/shareArticle",
            &[("mini", "true".to_string()), ("url", url), ("title", text)],
        ),
        "whatsapp" => with_query(
            "https://api.whatsapp.com/send",
            &[("text", format!("{} {}", text, url).trim().to_string())],
        ),
        "telegram" => with_query("https://t.me/share/url", &[("url", url), ("text", text)]),
        "pinterest" => with_query(
            "https://pinterest.com/pin/create/button/",
            &[("url", url), ("description", text)],
        ),
        "reddit" => with_query("https://www.reddit.com/submit", &[("url", url), ("title", text)]),
        _ => return None,
    };
    Some(link)
}

/// USD price with thousands separators, e.g. `$1,234.50`
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// CSS `url("...")` value for a user-supplied image address
pub fn css_url(src: &str) -> String {
    let escaped = src
        .trim()
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\n', '\r'], "");
    format!("url(\"{}\")", escaped)
}

fn with_query(base: &str, params: &[(&str, String)]) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            if !params.is_empty() {
                url.query_pairs_mut().extend_pairs(params);
            }
            url.into()
        }
        Err(err) => {
            tracing::warn!(base, %err, "could not build embed url");
            base.to_string()
        }
    }
}
