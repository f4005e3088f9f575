use serde::Deserialize;

pub const DEFAULT_BOLD_TAG: &str = "b";
pub const DEFAULT_EMPHASIS_TAG: &str = "em";
pub const DEFAULT_COMMENT_TAG: &str = "i";

/// HTML tag names the renderers wrap tokens in.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Markup {
    /// Keywords and format placeholders.
    pub bold: String,
    /// Strings and symbols.
    pub emphasis: String,
    pub comment: String,
}

impl Default for Markup {
    fn default() -> Self {
        Markup {
            bold: DEFAULT_BOLD_TAG.to_owned(),
            emphasis: DEFAULT_EMPHASIS_TAG.to_owned(),
            comment: DEFAULT_COMMENT_TAG.to_owned(),
        }
    }
}

pub(crate) fn wrap(tag: &str, text: &str) -> String {
    format!("<{0}>{1}</{0}>", tag, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_text() {
        assert_eq!(wrap("b", "for "), "<b>for </b>");
        assert_eq!(wrap("em", ""), "<em></em>");
    }
}
