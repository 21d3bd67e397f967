//! Indenting HTML writer and attribute builder used by every block renderer.

use pagecraft_compiler_css::Declarations;
use std::fmt;

/// Output buffer that tracks nesting depth for pretty printing
pub(crate) struct Context {
    pretty: bool,
    indent: String,
    depth: usize,
    buffer: String,
}

impl Context {
    pub fn new(pretty: bool, indent: &str) -> Self {
        Self {
            pretty,
            indent: indent.to_string(),
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        if self.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.indent);
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// `<tag attrs>` on its own line, children indented below
    pub fn open(&mut self, tag: &str, attrs: &Attrs) {
        self.add_line(&format!("<{}{}>", tag, attrs));
        self.indent();
    }

    pub fn close(&mut self, tag: &str) {
        self.dedent();
        self.add_line(&format!("</{}>", tag));
    }

    /// Element with escaped text content on one line
    pub fn element(&mut self, tag: &str, attrs: &Attrs, text: &str) {
        self.add_line(&format!("<{}{}>{}</{}>", tag, attrs, escape_html(text), tag));
    }

    /// Void element such as `img` or `input`, or an empty container
    pub fn empty(&mut self, tag: &str, attrs: &Attrs) {
        if is_self_closing(tag) {
            self.add_line(&format!("<{}{} />", tag, attrs));
        } else {
            self.add_line(&format!("<{}{}></{}>", tag, attrs, tag));
        }
    }

    /// Trusted markup, written exactly as given
    ///
    /// Pretty output only indents the first line and ends the block with a
    /// newline; the content itself is never split or trimmed.
    pub fn raw(&mut self, html: &str) {
        if html.is_empty() {
            return;
        }
        if !self.pretty {
            self.add(html);
            return;
        }
        self.add_indent();
        self.add(html);
        if !html.ends_with('\n') {
            self.add("\n");
        }
    }

    pub fn get_output(self) -> String {
        self.buffer
    }
}

/// Ordered attribute list; values are escaped when written
#[derive(Debug, Clone, Default)]
pub(crate) struct Attrs(Vec<(String, Option<String>)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.0.push((name.to_string(), Some(value.into())));
        self
    }

    /// Set unless the value is missing or blank
    pub fn set_opt(self, name: &str, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    /// Boolean attribute such as `required` or `open`
    pub fn flag(mut self, name: &str, on: bool) -> Self {
        if on {
            self.0.push((name.to_string(), None));
        }
        self
    }

    /// `class` from the non-blank entries
    pub fn class<S: AsRef<str>>(self, classes: &[S]) -> Self {
        let joined = classes
            .iter()
            .map(|c| c.as_ref().trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        self.set_opt("class", Some(&joined))
    }

    pub fn style(self, declarations: &Declarations) -> Self {
        if declarations.is_empty() {
            self
        } else {
            self.set("style", declarations.to_inline())
        }
    }

    /// `target` and `rel` for a link that opens a new window
    pub fn new_window(self, on: bool) -> Self {
        if on {
            self.set("target", "_blank").set("rel", "noopener noreferrer")
        } else {
            self
        }
    }
}

impl fmt::Display for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.0 {
            match value {
                Some(value) => write!(f, " {}=\"{}\"", name, escape_html(value))?,
                None => write!(f, " {}", name)?,
            }
        }
        Ok(())
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_escape_and_skip_blank() {
        let attrs = Attrs::new()
            .set("title", "a \"quoted\" <title>")
            .set_opt("alt", Some("  "))
            .flag("required", true)
            .class(&["a", "", "b"]);
        assert_eq!(
            attrs.to_string(),
            r#" title="a &quot;quoted&quot; &lt;title&gt;" required class="a b""#
        );
    }

    #[test]
    fn test_pretty_nesting() {
        let mut ctx = Context::new(true, "  ");
        ctx.open("div", &Attrs::new());
        ctx.element("p", &Attrs::new(), "x & y");
        ctx.empty("img", &Attrs::new().set("src", "a.png"));
        ctx.close("div");
        assert_eq!(
            ctx.get_output(),
            "<div>\n  <p>x &amp; y</p>\n  <img src=\"a.png\" />\n</div>\n"
        );
    }

    #[test]
    fn test_compact_output() {
        let mut ctx = Context::new(false, "  ");
        ctx.open("ul", &Attrs::new());
        ctx.empty("li", &Attrs::new());
        ctx.close("ul");
        assert_eq!(ctx.get_output(), "<ul><li></li></ul>");
    }

    #[test]
    fn test_raw_markup_is_verbatim() {
        let markup = "<pre>a\n\n  b</pre>\n<script>// note\nwindow.x = 1;</script>";

        let mut compact = Context::new(false, "  ");
        compact.open("div", &Attrs::new());
        compact.raw(markup);
        compact.close("div");
        assert_eq!(compact.get_output(), format!("<div>{}</div>", markup));

        let mut pretty = Context::new(true, "  ");
        pretty.open("div", &Attrs::new());
        pretty.raw(markup);
        pretty.close("div");
        assert_eq!(pretty.get_output(), format!("<div>\n  {}\n</div>\n", markup));
    }
}
