//! Font colour markup.
//!
//! Coloured text is written either as an inline HTML span,
//! `<span style="color:#ff0000">text</span>`, or in the custom syntax
//! `{color:#ff0000}text{color}`. [`ColorSyntax`] converts between the two when
//! documents pass between the markdown and WYSIWYG editors.

use regex::{Captures, NoExpand, Regex};

/// Colour that clears any applied font colour.
pub const RESET_COLOR: &str = "#000000";

const CUSTOM_SYNTAX_PATTERN: &str = r"\{color:(.+?)\}(.*?)\{color\}";
const HTML_OPEN_PATTERN: &str = r#"<span (?:class="colour" )?style="color:(.+?)"(?: class="colour")?>(.*?)"#;
const HTML_COMPLETE_PATTERN: &str =
    r#"<span (?:class="colour" )?style="color:(.+?)"(?: class="colour")?>(.*?)</span>"#;
const DECIMAL_COLOR_PATTERN: &str = r"rgb\((\d+)[, ]+(\d+)[, ]+(\d+)\)";
const COLOUR_CLASS_PATTERN: &str = r#" ?class="colour" ?"#;

/// Wrapped text plus the byte range of the original text inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxRange {
    pub result: String,
    pub from: usize,
    pub to: usize,
}

fn wrap(pre: &str, text: &str, post: &str) -> SyntaxRange {
    SyntaxRange {
        result: format!("{pre}{text}{post}"),
        from: pre.len(),
        to: pre.len() + text.len(),
    }
}

/// Wrap `text` in the custom colour syntax.
pub fn custom_color_syntax(text: &str, color: &str) -> SyntaxRange {
    wrap(&format!("{{color:{color}}}"), text, "{color}")
}

/// Wrap `text` in a coloured HTML span.
pub fn html_color_syntax(text: &str, color: &str) -> SyntaxRange {
    wrap(&format!(r#"<span style="color:{color}">"#), text, "</span>")
}

/// Compiled conversion patterns.
#[derive(Debug, Clone)]
pub struct ColorSyntax {
    use_custom_syntax: bool,
    custom: Regex,
    html_open: Regex,
    html_complete: Regex,
    decimal: Regex,
    colour_class: Regex,
}

impl ColorSyntax {
    /// Compile the patterns.
    ///
    /// With `use_custom_syntax` colours are stored in markdown as
    /// `{color:C}text{color}`; otherwise the HTML spans are kept and only
    /// normalised.
    pub fn new(use_custom_syntax: bool) -> Result<Self, regex::Error> {
        Ok(Self {
            use_custom_syntax,
            custom: Regex::new(CUSTOM_SYNTAX_PATTERN)?,
            html_open: Regex::new(HTML_OPEN_PATTERN)?,
            html_complete: Regex::new(HTML_COMPLETE_PATTERN)?,
            decimal: Regex::new(DECIMAL_COLOR_PATTERN)?,
            colour_class: Regex::new(COLOUR_CLASS_PATTERN)?,
        })
    }

    pub fn uses_custom_syntax(&self) -> bool {
        self.use_custom_syntax
    }

    /// Wrap `text` in whichever syntax is configured.
    pub fn wrap(&self, text: &str, color: &str) -> SyntaxRange {
        if self.use_custom_syntax {
            custom_color_syntax(text, color)
        } else {
            html_color_syntax(text, color)
        }
    }

    /// Replace every `rgb(r, g, b)` in `color` with `#rrggbb`.
    pub fn dec_colors_to_hex(&self, color: &str) -> String {
        self.decimal
            .replace_all(color, |caps: &Captures| {
                format!(
                    "#{}{}{}",
                    component_to_hex(&caps[1]),
                    component_to_hex(&caps[2]),
                    component_to_hex(&caps[3])
                )
            })
            .into_owned()
    }

    /// Post-process HTML produced from markdown.
    ///
    /// Custom colour syntax becomes coloured spans. Without custom syntax the
    /// HTML is returned unchanged.
    pub fn markdown_to_html(&self, html: &str) -> String {
        if !self.use_custom_syntax {
            return html.to_string();
        }

        self.custom
            .replace_all(html, |caps: &Captures| html_color_syntax(&caps[2], &caps[1]).result)
            .into_owned()
    }

    /// Post-process markdown produced from HTML.
    ///
    /// Decimal colours are turned to hex. With custom syntax each complete
    /// span becomes `{color:C}text{color}`; otherwise each opening span tag
    /// loses its `colour` class.
    pub fn html_to_markdown(&self, markdown: &str) -> String {
        let find = if self.use_custom_syntax {
            &self.html_complete
        } else {
            &self.html_open
        };

        find.replace_all(markdown, |caps: &Captures| {
            let found = &caps[0];
            let mut color = caps[1].to_string();
            if self.decimal.is_match(&color) {
                color = self.dec_colors_to_hex(&color);
            }

            if self.use_custom_syntax {
                custom_color_syntax(&caps[2], &color).result
            } else {
                let stripped = self.colour_class.replace_all(found, " ");
                self.decimal.replace(&stripped, NoExpand(&color)).into_owned()
            }
        })
        .into_owned()
    }
}

/// Two-digit lowercase hex for one decimal colour component.
fn component_to_hex(component: &str) -> String {
    let value = component.parse::<u64>().unwrap_or(0);
    let hex = format!("{value:02x}");
    hex[hex.len() - 2..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_ranges() {
        let custom = custom_color_syntax("text", "#f00");
        assert_eq!(custom.result, "{color:#f00}text{color}");
        assert_eq!(&custom.result[custom.from..custom.to], "text");

        let html = html_color_syntax("text", "#f00");
        assert_eq!(html.result, r#"<span style="color:#f00">text</span>"#);
        assert_eq!(&html.result[html.from..html.to], "text");
    }

    #[test]
    fn test_dec_colors_to_hex() {
        let syntax = ColorSyntax::new(false).unwrap();
        assert_eq!(syntax.dec_colors_to_hex("rgb(255, 0, 10)"), "#ff000a");
        assert_eq!(syntax.dec_colors_to_hex("rgb(1 2 3)"), "#010203");
        assert_eq!(syntax.dec_colors_to_hex("rgb(256, 0, 0)"), "#000000");
        assert_eq!(syntax.dec_colors_to_hex("#abcdef"), "#abcdef");
    }

    #[test]
    fn test_markdown_to_html_custom() {
        let syntax = ColorSyntax::new(true).unwrap();
        assert_eq!(
            syntax.markdown_to_html("a {color:#ff0000}red{color} b {color:blue}x{color}"),
            r#"a <span style="color:#ff0000">red</span> b <span style="color:blue">x</span>"#
        );
    }

    #[test]
    fn test_markdown_to_html_passthrough() {
        let syntax = ColorSyntax::new(false).unwrap();
        let source = "{color:#ff0000}red{color}";
        assert_eq!(syntax.markdown_to_html(source), source);
    }

    #[test]
    fn test_html_to_markdown_custom() {
        let syntax = ColorSyntax::new(true).unwrap();
        assert_eq!(
            syntax.html_to_markdown(r#"<span class="colour" style="color:rgb(255, 0, 0)">red</span>"#),
            "{color:#ff0000}red{color}"
        );
    }

    #[test]
    fn test_html_to_markdown_normalises_spans() {
        let syntax = ColorSyntax::new(false).unwrap();
        assert_eq!(
            syntax.html_to_markdown(r#"<span class="colour" style="color:rgb(0, 128, 255)">blue</span>"#),
            r##"<span style="color:#0080ff">blue</span>"##
        );
        assert_eq!(
            syntax.html_to_markdown(r#"<span style="color:#123456" class="colour">x</span>"#),
            r#"<span style="color:#123456" >x</span>"#
        );
    }
}
