//! Rule-based layout variants that need no model call.
//!
//! Only the root element's `class`/`style` attributes are rewritten; the inner
//! markup is re-emitted byte for byte. The one exception is the list "card"
//! variant, which nests the unchanged inner markup inside two new wrappers.
//! Nothing here can fail: input whose root element cannot be matched, opening
//! and closing tag both, comes back as a single "Original Layout" variant.

use std::sync::LazyLock;

use regex::Regex;

use super::{BlockType, LayoutVariant};

static OPENING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^<(\w+)([^>]*)>").expect("valid regex"));
static CLASS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class=["']([^"']*)["']"#).expect("valid regex"));
static INNER_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^<\w+[^>]*>(.*)</\w+>\s*\z").expect("valid regex"));

/// Substrings that mark a class as layout-related.
const LAYOUT_KEYWORDS: [&str; 6] = ["flex", "grid", "space-y", "space-x", "gap-", "cols-"];

const CARD_WRAPPER_CLASSES: &str = "border-4 border-blue-500 rounded-lg p-6 bg-blue-50 shadow-xl";
const AUTO_FIT_STYLE: &str = "grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));";

/// Drop every class containing a layout keyword. Order of the rest is kept.
pub fn strip_layout_classes<S: AsRef<str>>(classes: &[S]) -> Vec<String> {
    classes
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| !LAYOUT_KEYWORDS.iter().any(|kw| c.contains(kw)))
        .map(str::to_string)
        .collect()
}

/// The single variant returned for input we cannot take apart.
pub fn original_layout(html: &str) -> LayoutVariant {
    LayoutVariant {
        title: "Original Layout".to_string(),
        description: "Keeping the current layout unchanged".to_string(),
        html: html.to_string(),
    }
}

/// A block split into the parts the generator rewrites and the parts it keeps.
struct ParsedBlock<'a> {
    tag_name: &'a str,
    classes: Vec<&'a str>,
    other_attrs: String,
    inner: &'a str,
}

impl<'a> ParsedBlock<'a> {
    fn parse(html: &'a str) -> Option<Self> {
        let caps = OPENING_TAG.captures(html)?;
        let tag_name = caps.get(1)?.as_str();
        let attrs = caps.get(2).map_or("", |m| m.as_str());

        let classes = CLASS_ATTR
            .captures(attrs)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().split_whitespace().collect())
            .unwrap_or_default();

        let other_attrs = CLASS_ATTR.replace(attrs, "").trim().to_string();

        // Unclosed root: there is no inner markup we could safely re-emit.
        let inner = INNER_CONTENT.captures(html)?.get(1)?.as_str();

        Some(ParsedBlock { tag_name, classes, other_attrs, inner })
    }

    fn class_string_contains(&self, needle: &str) -> bool {
        self.classes.join(" ").contains(needle)
    }

    /// Re-emit the block with a new class list and optional inline style.
    fn rebuild(&self, classes: &[String], extra_style: Option<&str>) -> String {
        let mut opening = format!("<{} class=\"{}\"", self.tag_name, classes.join(" "));
        if let Some(style) = extra_style {
            opening.push_str(&format!(" style=\"{style}\""));
        }
        if !self.other_attrs.is_empty() {
            opening.push(' ');
            opening.push_str(&self.other_attrs);
        }
        format!("{opening}>{}</{}>", self.inner, self.tag_name)
    }
}

fn with_classes(base: &[String], extra: &[&str]) -> Vec<String> {
    base.iter().cloned().chain(extra.iter().map(|c| c.to_string())).collect()
}

fn variant(title: &str, description: &str, html: String) -> LayoutVariant {
    LayoutVariant {
        title: title.to_string(),
        description: description.to_string(),
        html,
    }
}

fn list_variants(block: &ParsedBlock<'_>, base: &[String], available_width: i64) -> Vec<LayoutVariant> {
    let mut variants = Vec::with_capacity(3);

    let inner_classes = with_classes(base, &["space-y-6"]).join(" ");
    variants.push(variant(
        "Card Layout",
        "Wraps the list in a bordered card with generous vertical spacing",
        format!(
            "<div class=\"{CARD_WRAPPER_CLASSES}\"><div class=\"{inner_classes}\">{}</div></div>",
            block.inner
        ),
    ));

    if available_width >= 300 {
        variants.push(variant(
            "2-Column Grid",
            "Arranged items in a 2-column grid layout with 'grid grid-cols-2 gap-4'",
            block.rebuild(&with_classes(base, &["grid", "grid-cols-2", "gap-4"]), None),
        ));
    }

    if available_width >= 600 {
        variants.push(variant(
            "3-Column Grid",
            "Distributed items across 3 columns using 'grid grid-cols-3 gap-6' for better space utilization",
            block.rebuild(&with_classes(base, &["grid", "grid-cols-3", "gap-6"]), None),
        ));
    } else {
        variants.push(variant(
            "Horizontal Flex Row",
            "Arranged items horizontally with flex-wrap for responsive layout",
            block.rebuild(&with_classes(base, &["flex", "flex-row", "gap-4", "flex-wrap"]), None),
        ));
    }

    variants
}

fn grid_variants(block: &ParsedBlock<'_>, base: &[String], available_width: i64) -> Vec<LayoutVariant> {
    let mut variants = Vec::with_capacity(3);

    variants.push(variant(
        "2-Column Grid",
        "Simple 2-column grid with even spacing",
        block.rebuild(&with_classes(base, &["grid", "grid-cols-2", "gap-4"]), None),
    ));

    if available_width >= 600 {
        variants.push(variant(
            "3-Column Grid",
            "Expanded to 3 columns for better content distribution",
            block.rebuild(&with_classes(base, &["grid", "grid-cols-3", "gap-6"]), None),
        ));
    }

    if available_width >= 800 {
        variants.push(variant(
            "4-Column Grid",
            "Compact 4-column layout for dense information",
            block.rebuild(&with_classes(base, &["grid", "grid-cols-4", "gap-4"]), None),
        ));
    } else {
        variants.push(variant(
            "Auto-Fit Grid",
            "Responsive grid that adapts to available space",
            block.rebuild(&with_classes(base, &["grid", "gap-4"]), Some(AUTO_FIT_STYLE)),
        ));
    }

    variants
}

fn generic_variants(block: &ParsedBlock<'_>, base: &[String], available_width: i64) -> Vec<LayoutVariant> {
    let mut variants = Vec::with_capacity(3);

    variants.push(variant(
        "Vertical Stack",
        "Stacked vertically with consistent spacing",
        block.rebuild(&with_classes(base, &["flex", "flex-col", "gap-4"]), None),
    ));

    if available_width >= 400 {
        variants.push(variant(
            "Horizontal Flow",
            "Arranged horizontally with wrapping",
            block.rebuild(&with_classes(base, &["flex", "flex-row", "gap-6", "flex-wrap"]), None),
        ));
    }

    if available_width >= 500 {
        variants.push(variant(
            "Grid Layout",
            "2-column grid for balanced presentation",
            block.rebuild(&with_classes(base, &["grid", "grid-cols-2", "gap-6"]), None),
        ));
    }

    variants
}

/// Produce up to `variant_count` layout variants for one HTML block.
pub fn generate_static_variants(
    html: &str,
    block_type: &BlockType,
    available_width: i64,
    variant_count: usize,
) -> Vec<LayoutVariant> {
    let Some(block) = ParsedBlock::parse(html) else {
        return vec![original_layout(html)];
    };

    let base = strip_layout_classes(&block.classes);

    let mut variants = if *block_type == BlockType::ListContainer || block.class_string_contains("space-y") {
        list_variants(&block, &base, available_width)
    } else if *block_type == BlockType::GridContainer || block.class_string_contains("grid") {
        grid_variants(&block, &base, available_width)
    } else {
        generic_variants(&block, &base, available_width)
    };

    if variants.is_empty() {
        return vec![original_layout(html)];
    }
    variants.truncate(variant_count.max(1));
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = r#"<ul class="space-y-2 text-lg flex" data-block-anchor="b1"><li>One</li><li>Two</li></ul>"#;
    const GRID: &str = r#"<div class="grid grid-cols-3 gap-2 p-4"><div>A</div><div>B</div></div>"#;
    const COLUMN: &str = r#"<section class="p-2 text-sm" id="col"><p>Body</p></section>"#;

    fn titles(variants: &[LayoutVariant]) -> Vec<&str> {
        variants.iter().map(|v| v.title.as_str()).collect()
    }

    fn inner_of(html: &str) -> &str {
        INNER_CONTENT.captures(html).and_then(|c| c.get(1)).map_or("", |m| m.as_str())
    }

    #[test]
    fn malformed_input_echoes_original() {
        for html in ["", "plain text", "  <div>leading space</div>", "<>nope</>"] {
            let variants = generate_static_variants(html, &BlockType::ListContainer, 900, 3);
            assert_eq!(variants.len(), 1);
            assert_eq!(variants[0].title, "Original Layout");
            assert_eq!(variants[0].html, html);
        }
    }

    #[test]
    fn unclosed_root_echoes_original() {
        let html = r#"<div class="grid p-4">Body text"#;
        let variants = generate_static_variants(html, &BlockType::GridContainer, 900, 3);
        assert_eq!(titles(&variants), vec!["Original Layout"]);
        assert_eq!(variants[0].html, html);
    }

    #[test]
    fn trailing_whitespace_after_root_keeps_inner_markup() {
        let html = "<ul class=\"space-y-2\"><li>One</li></ul>\n";
        let variants = generate_static_variants(html, &BlockType::ListContainer, 600, 3);
        assert_eq!(variants.len(), 3);
        for v in &variants {
            assert!(v.html.contains("<li>One</li>"), "{} lost inner markup", v.title);
        }
        assert_eq!(variants[1].html, r#"<ul class="grid grid-cols-2 gap-4"><li>One</li></ul>"#);
    }

    #[test]
    fn strip_removes_layout_tokens_by_substring() {
        let stripped = strip_layout_classes(&["gap-4", "cols-2", "md:flex", "p-4", "space-x-2", "text-lg"]);
        assert_eq!(stripped, vec!["p-4", "text-lg"]);
    }

    #[test]
    fn strip_is_idempotent() {
        let once = strip_layout_classes(&["grid", "p-4", "rounded", "gap-6", "bg-white"]);
        let twice = strip_layout_classes(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn list_card_variant_nests_unchanged_inner_markup() {
        let variants = generate_static_variants(LIST, &BlockType::ListContainer, 900, 3);
        let card = &variants[0];
        assert_eq!(card.title, "Card Layout");
        assert_eq!(
            card.html,
            format!(
                "<div class=\"{CARD_WRAPPER_CLASSES}\"><div class=\"text-lg space-y-6\"><li>One</li><li>Two</li></div></div>"
            )
        );
    }

    #[test]
    fn list_width_thresholds() {
        let narrow = generate_static_variants(LIST, &BlockType::ListContainer, 299, 3);
        assert_eq!(titles(&narrow), vec!["Card Layout", "Horizontal Flex Row"]);

        let medium = generate_static_variants(LIST, &BlockType::ListContainer, 300, 3);
        assert_eq!(titles(&medium), vec!["Card Layout", "2-Column Grid", "Horizontal Flex Row"]);

        let wide = generate_static_variants(LIST, &BlockType::ListContainer, 600, 3);
        assert_eq!(titles(&wide), vec!["Card Layout", "2-Column Grid", "3-Column Grid"]);
    }

    #[test]
    fn list_detected_from_space_y_class_without_block_type() {
        let variants = generate_static_variants(LIST, &BlockType::Other("custom".into()), 600, 3);
        assert_eq!(variants[0].title, "Card Layout");
    }

    #[test]
    fn grid_width_thresholds() {
        let narrow = generate_static_variants(GRID, &BlockType::GridContainer, 599, 3);
        assert_eq!(titles(&narrow), vec!["2-Column Grid", "Auto-Fit Grid"]);
        assert!(narrow[1].html.contains(r#"style="grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));""#));

        let medium = generate_static_variants(GRID, &BlockType::GridContainer, 600, 3);
        assert_eq!(titles(&medium), vec!["2-Column Grid", "3-Column Grid", "Auto-Fit Grid"]);

        let wide = generate_static_variants(GRID, &BlockType::GridContainer, 800, 3);
        assert_eq!(titles(&wide), vec!["2-Column Grid", "3-Column Grid", "4-Column Grid"]);
    }

    #[test]
    fn grid_variant_rebuilds_root_classes_only() {
        let variants = generate_static_variants(GRID, &BlockType::GridContainer, 800, 1);
        assert_eq!(
            variants[0].html,
            r#"<div class="p-4 grid grid-cols-2 gap-4"><div>A</div><div>B</div></div>"#
        );
    }

    #[test]
    fn generic_thresholds_and_attribute_preservation() {
        let narrow = generate_static_variants(COLUMN, &BlockType::Column, 399, 3);
        assert_eq!(titles(&narrow), vec!["Vertical Stack"]);

        let wide = generate_static_variants(COLUMN, &BlockType::Column, 500, 3);
        assert_eq!(titles(&wide), vec!["Vertical Stack", "Horizontal Flow", "Grid Layout"]);
        assert_eq!(
            wide[0].html,
            r#"<section class="p-2 text-sm flex flex-col gap-4" id="col"><p>Body</p></section>"#
        );
    }

    #[test]
    fn every_variant_keeps_inner_content() {
        for (html, block_type) in [
            (LIST, BlockType::ListContainer),
            (GRID, BlockType::GridContainer),
            (COLUMN, BlockType::ListItem),
        ] {
            let expected = inner_of(html);
            for width in [100, 299, 300, 450, 600, 799, 800, 1200] {
                for v in generate_static_variants(html, &block_type, width, 3) {
                    assert!(v.html.contains(expected), "{} lost inner markup", v.title);
                }
            }
        }
    }

    #[test]
    fn result_is_truncated_to_requested_count() {
        let variants = generate_static_variants(GRID, &BlockType::GridContainer, 1000, 2);
        assert_eq!(variants.len(), 2);
        let at_least_one = generate_static_variants(GRID, &BlockType::GridContainer, 1000, 0);
        assert_eq!(at_least_one.len(), 1);
    }

    #[test]
    fn block_without_class_attribute_gets_one() {
        let html = r#"<div data-x="1"><span>k</span></div>"#;
        let variants = generate_static_variants(html, &BlockType::Column, 300, 1);
        assert_eq!(variants[0].html, r#"<div class="flex flex-col gap-4" data-x="1"><span>k</span></div>"#);
    }
}
