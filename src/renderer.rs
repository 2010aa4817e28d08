//! Placeholder substitution for template content.
//! Replaces `{{NAME}}` tokens with configured values in a single pass.

use crate::config::Variables;
use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Any placeholder token, configured or not.
pub static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z_][A-Z0-9_]*)\}\}").expect("placeholder pattern is valid"));

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders template content.
    ///
    /// Unknown placeholders are left verbatim.
    fn render<'a>(&self, content: &'a str) -> Cow<'a, str>;
}

/// Renderer that substitutes `{{KEY}}` for every key in a [`Variables`].
///
/// All keys are compiled into one alternation, so each position of the
/// input is examined once and substituted values are never rescanned.
#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    pattern: Option<Regex>,
    variables: Variables,
}

impl PlaceholderRenderer {
    /// Compiles the substitution pattern for `variables`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the combined pattern exceeds regex limits
    pub fn new(variables: &Variables) -> Result<Self> {
        let pattern = if variables.is_empty() {
            None
        } else {
            let alternation = variables
                .keys()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&format!(r"\{{\{{({alternation})\}}\}}"))
                .map_err(|e| Error::ConfigError(format!("failed to compile variables: {e}")))?;
            Some(regex)
        };

        Ok(Self {
            pattern,
            variables: variables.clone(),
        })
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render<'a>(&self, content: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(content, |caps: &Captures| {
                self.variables.get_or_empty(&caps[1]).to_string()
            }),
            None => Cow::Borrowed(content),
        }
    }
}

/// Placeholder names still present in `content`.
pub fn find_placeholders(content: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}
