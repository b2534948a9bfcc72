//! Variant blocks: optional regions of template text gated by a named flag
//!
//! A block is written as a comment so the raw template stays valid source:
//!
//! ```text
//! plugins: [
//!   /* react:start
//!   react(),
//!   react:end */
//! ],
//! ```
//!
//! When the variant is disabled the whole block goes, markers included.
//! When enabled only the two marker lines go, leaving the content uncommented.

use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Variants every template is filtered for
pub const KNOWN_VARIANTS: &[&str] = &["react"];

/// Which variants are enabled; anything not listed is disabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantFlags(BTreeMap<String, bool>);

impl VariantFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variant: impl Into<String>, enabled: bool) -> Self {
        self.set(variant, enabled);
        self
    }

    pub fn set(&mut self, variant: impl Into<String>, enabled: bool) {
        self.0.insert(variant.into(), enabled);
    }

    pub fn is_enabled(&self, variant: &str) -> bool {
        self.0.get(variant).copied().unwrap_or(false)
    }

    /// Known variants plus any extra names that were set explicitly
    fn names(&self) -> impl Iterator<Item = &str> {
        KNOWN_VARIANTS
            .iter()
            .copied()
            .chain(
                self.0
                    .keys()
                    .map(String::as_str)
                    .filter(|name| !KNOWN_VARIANTS.contains(name)),
            )
    }
}

fn start_marker(variant: &str) -> String {
    format!("/* {}:start", variant)
}

/// Strip or unwrap every block of one variant
pub fn filter_variant<'a>(text: &'a str, variant: &str, enabled: bool) -> Cow<'a, str> {
    if !text.contains(&start_marker(variant)) {
        return Cow::Borrowed(text);
    }

    let name = regex::escape(variant);
    let pattern = if enabled {
        format!(r"\r?\n[ \t]*/\* {name}:start|\r?\n[ \t]*{name}:end \*/")
    } else {
        format!(r"(?s)\r?\n[ \t]*/\* {name}:start.*?\r?\n[ \t]*{name}:end \*/")
    };

    match Regex::new(&pattern) {
        Ok(re) => Cow::Owned(re.replace_all(text, "").into_owned()),
        // Escaped names always compile; fall back to leaving the text alone
        Err(_) => Cow::Borrowed(text),
    }
}

/// Apply every variant in `flags` (known variants default to disabled)
pub fn apply_variants<'a>(text: &'a str, flags: &VariantFlags) -> Cow<'a, str> {
    let mut result = Cow::Borrowed(text);
    for variant in flags.names() {
        let enabled = flags.is_enabled(variant);
        let filtered = match filter_variant(&result, variant, enabled) {
            Cow::Owned(filtered) => Some(filtered),
            Cow::Borrowed(_) => None,
        };
        if let Some(filtered) = filtered {
            result = Cow::Owned(filtered);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "export default defineConfig({\n  plugins: [\n    /* react:start\n    react(),\n    react:end */\n  ],\n});\n";

    #[test]
    fn test_disabled_removes_block_and_markers() {
        assert_eq!(
            filter_variant(CONFIG, "react", false),
            "export default defineConfig({\n  plugins: [\n  ],\n});\n"
        );
    }

    #[test]
    fn test_enabled_keeps_content_without_markers() {
        assert_eq!(
            filter_variant(CONFIG, "react", true),
            "export default defineConfig({\n  plugins: [\n    react(),\n  ],\n});\n"
        );
    }

    #[test]
    fn test_no_markers_is_unchanged() {
        let text = "const a = 1;\n";
        assert!(matches!(filter_variant(text, "react", false), Cow::Borrowed(t) if t == text));
        assert_eq!(apply_variants(text, &VariantFlags::new()), text);
    }

    #[test]
    fn test_other_variant_untouched() {
        assert_eq!(filter_variant(CONFIG, "vue", false), CONFIG);
    }

    #[test]
    fn test_two_blocks_removed_independently() {
        let text = "a\n/* react:start\nb\nreact:end */\nc\n/* react:start\nd\nreact:end */\ne";
        assert_eq!(filter_variant(text, "react", false), "a\nc\ne");
        assert_eq!(filter_variant(text, "react", true), "a\nb\nc\nd\ne");
    }

    #[test]
    fn test_crlf_line_endings_preserved() {
        let text = "a\r\n  /* react:start\r\n  b\r\n  react:end */\r\nc\r\n";
        assert_eq!(filter_variant(text, "react", false), "a\r\nc\r\n");
        assert_eq!(filter_variant(text, "react", true), "a\r\n  b\r\nc\r\n");
    }

    #[test]
    fn test_apply_variants_defaults_known_to_disabled() {
        let stripped = apply_variants(CONFIG, &VariantFlags::new());
        assert!(!stripped.contains("react"));

        let kept = apply_variants(CONFIG, &VariantFlags::new().with("react", true));
        assert!(kept.contains("react(),"));
        assert!(!kept.contains("react:start"));
    }

    #[test]
    fn test_custom_variant_name() {
        let text = "x\n  /* solid:start\n  y\n  solid:end */\nz";
        let flags = VariantFlags::new().with("solid", true);
        assert_eq!(apply_variants(text, &flags), "x\n  y\nz");
    }
}
