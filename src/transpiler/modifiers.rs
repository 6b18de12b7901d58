/// Modifier chain construction
///
/// Checks run in a fixed order (size, padding, margin, scroll, background,
/// visibility, click, enabled, focus, transforms, size bounds, gravity,
/// border) and the generated chain follows that order exactly.

use crate::transpiler::attributes::{
    dp_expr, float_literal, parse_float, todo_comment, ResolvedAttributes, ValueKind,
};
use crate::transpiler::mapper::{ComposableMapping, ScrollOrientation};

/// Ordered modifier calls (`.padding(16.dp)`) and placeholder comments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierChain {
    segments: Vec<String>,
}

impl ModifierChain {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    fn call(&mut self, call: String) {
        self.segments.push(call);
    }

    fn todo(&mut self, text: &str) {
        self.segments.push(todo_comment(text));
    }

    /// Short chains of plain calls fit on the `modifier = Modifier` line
    pub fn is_inline(&self) -> bool {
        self.segments.len() <= 2 && self.segments.iter().all(|s| s.starts_with('.'))
    }

    /// Single-line rendering: `.fillMaxWidth() /* TODO: ... */ .padding(8.dp)`
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            let after_comment = out.ends_with("*/");
            if (!segment.starts_with('.') || after_comment) && !out.is_empty() {
                out.push(' ');
            }
            out.push_str(segment);
        }
        out
    }
}

enum Size {
    Fill,
    Fixed(String),
}

fn size_of(value: Option<&str>) -> Option<Size> {
    match value? {
        "match_parent" | "fill_parent" => Some(Size::Fill),
        "wrap_content" => None,
        other => dp_expr(other).map(Size::Fixed),
    }
}

/// Build the modifier chain for one element as a string
/// (empty when no modifier applies)
pub fn build(attrs: &ResolvedAttributes, mapping: &ComposableMapping) -> String {
    build_modifiers(attrs, mapping).render()
}

pub fn build_modifiers(attrs: &ResolvedAttributes, mapping: &ComposableMapping) -> ModifierChain {
    let mut chain = ModifierChain::default();

    // Size
    let width = size_of(attrs.raw("layout_width"));
    let height = size_of(attrs.raw("layout_height"));
    match (width, height) {
        (Some(Size::Fill), Some(Size::Fill)) => chain.call(".fillMaxSize()".to_string()),
        (width, height) => {
            match width {
                Some(Size::Fill) => chain.call(".fillMaxWidth()".to_string()),
                Some(Size::Fixed(w)) => chain.call(format!(".width({})", w)),
                None => {}
            }
            match height {
                Some(Size::Fill) => chain.call(".fillMaxHeight()".to_string()),
                Some(Size::Fixed(h)) => chain.call(format!(".height({})", h)),
                None => {}
            }
        }
    }

    // Padding: uniform wins over the axis and per-edge forms
    if let Some(all) = attrs.raw("padding").and_then(dp_expr) {
        chain.call(format!(".padding({})", all));
    } else {
        let axes = named_dimensions(
            attrs,
            &[("horizontal", "paddingHorizontal"), ("vertical", "paddingVertical")],
        );
        if !axes.is_empty() {
            chain.call(format!(".padding({})", axes));
        }
        let edges = named_dimensions(
            attrs,
            &[
                ("start", "paddingStart|paddingLeft"),
                ("top", "paddingTop"),
                ("end", "paddingEnd|paddingRight"),
                ("bottom", "paddingBottom"),
            ],
        );
        if !edges.is_empty() {
            chain.call(format!(".padding({})", edges));
        }
    }

    // Margins belong to the parent container in Compose
    let margins: Vec<String> = MARGIN_KEYS
        .iter()
        .filter_map(|key| attrs.raw(key).map(|v| format!("{}={}", key, v)))
        .collect();
    if !margins.is_empty() {
        chain.todo(&format!(
            "margin ({}) - add spacing in the parent (Spacer or Arrangement.spacedBy)",
            margins.join(", ")
        ));
    }

    match mapping.scroll {
        Some(ScrollOrientation::Vertical) => {
            chain.call(".verticalScroll(rememberScrollState())".to_string())
        }
        Some(ScrollOrientation::Horizontal) => {
            chain.call(".horizontalScroll(rememberScrollState())".to_string())
        }
        None => {}
    }

    if let Some(background) = attrs.get("background") {
        match background.kind {
            ValueKind::Expression if is_color_expression(&background.value) => {
                chain.call(format!(".background({})", background.value));
            }
            ValueKind::Expression if background.raw.contains("gradient") => {
                chain.todo(&format!(
                    "gradient background {} - use .background(Brush.linearGradient(...))",
                    background.raw
                ));
            }
            ValueKind::Expression => {
                chain.todo(&format!(
                    "background drawable {} - use .background(color, shape) or .paint(...)",
                    background.raw
                ));
            }
            _ => chain.todo(&format!("background {}", background.raw)),
        }
    }

    // A gone view keeps only a zero size; nothing after this applies
    match attrs.raw("visibility") {
        Some("gone") => {
            return ModifierChain {
                segments: vec![".size(0.dp)".to_string()],
            };
        }
        Some("invisible") => chain.call(".alpha(0f)".to_string()),
        _ => {}
    }

    let clickable = attrs.is_true("clickable") || attrs.raw("onClick").is_some();
    if clickable && !mapping.has_param("onClick") {
        let body = match attrs.raw("onClick") {
            Some(handler) => todo_comment(&format!("call {}()", handler)),
            None => todo_comment("handle click"),
        };
        chain.call(format!(".clickable {{ {} }}", body));
    }

    if attrs.is_false("enabled") {
        chain.call(".alpha(0.6f)".to_string());
    }

    if attrs.is_true("focusable") {
        chain.call(".focusable()".to_string());
    }

    if let Some(degrees) = attrs.raw("rotation").and_then(parse_float) {
        chain.call(format!(".rotate({})", float_literal(degrees)));
    }

    let scale_x = attrs.raw("scaleX").and_then(parse_float);
    let scale_y = attrs.raw("scaleY").and_then(parse_float);
    match (scale_x, scale_y) {
        (Some(x), Some(y)) if x == y => chain.call(format!(".scale({})", float_literal(x))),
        (None, None) => {}
        (x, y) => chain.call(format!(
            ".scale(scaleX = {}, scaleY = {})",
            float_literal(x.unwrap_or(1.0)),
            float_literal(y.unwrap_or(1.0))
        )),
    }

    if let Some(alpha) = attrs.raw("alpha").and_then(parse_float) {
        chain.call(format!(".alpha({})", float_literal(alpha)));
    }

    let width_bounds = named_dimensions(attrs, &[("min", "minWidth"), ("max", "maxWidth")]);
    if !width_bounds.is_empty() {
        chain.call(format!(".widthIn({})", width_bounds));
    }
    let height_bounds = named_dimensions(attrs, &[("min", "minHeight"), ("max", "maxHeight")]);
    if !height_bounds.is_empty() {
        chain.call(format!(".heightIn({})", height_bounds));
    }

    if let Some(gravity) = attrs.raw("layout_gravity") {
        chain.todo(&format!(
            "layout_gravity=\"{}\" - use Modifier.align(...) inside the parent scope",
            gravity
        ));
    }

    if let Some(background) = attrs.raw("background") {
        let drawable = background.starts_with("@drawable/");
        let stroke = ["border", "stroke", "outline"]
            .iter()
            .any(|word| background.contains(word));
        if drawable && stroke {
            chain.todo(&format!(
                "border from {} - use .border(1.dp, color, shape)",
                background
            ));
        }
    }

    chain
}

const MARGIN_KEYS: &[&str] = &[
    "layout_margin",
    "layout_marginHorizontal",
    "layout_marginVertical",
    "layout_marginStart",
    "layout_marginLeft",
    "layout_marginTop",
    "layout_marginEnd",
    "layout_marginRight",
    "layout_marginBottom",
];

fn is_color_expression(value: &str) -> bool {
    value.starts_with("Color")
        || value.starts_with("colorResource(")
        || value.starts_with("MaterialTheme.colorScheme.")
}

/// `name = value` pairs, one per entry. Each entry lists alternative keys
/// separated by `|`; the first one holding a usable dimension wins.
fn named_dimensions(attrs: &ResolvedAttributes, entries: &[(&str, &str)]) -> String {
    entries
        .iter()
        .filter_map(|(name, keys)| {
            keys.split('|')
                .find_map(|key| attrs.raw(key).and_then(dp_expr))
                .map(|value| format!("{} = {}", name, value))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::ast::LayoutNode;
    use crate::transpiler::mapper::map_tag;

    fn chain_for(node: LayoutNode) -> String {
        let attrs = ResolvedAttributes::from_node(&node);
        let mapping = map_tag(&node.tag, &attrs);
        build(&attrs, &mapping)
    }

    #[test]
    fn test_match_parent_pair_collapses_to_fill_max_size() {
        let chain = chain_for(
            LayoutNode::new("FrameLayout")
                .with_attr("android:layout_width", "match_parent")
                .with_attr("android:layout_height", "match_parent"),
        );
        assert_eq!(chain, ".fillMaxSize()");
        assert!(!chain.contains("fillMaxWidth"));
        assert!(!chain.contains("fillMaxHeight"));
    }

    #[test]
    fn test_sizes() {
        let chain = chain_for(
            LayoutNode::new("View")
                .with_attr("android:layout_width", "match_parent")
                .with_attr("android:layout_height", "48dp"),
        );
        assert_eq!(chain, ".fillMaxWidth().height(48.dp)");

        let wrap = chain_for(
            LayoutNode::new("View")
                .with_attr("android:layout_width", "wrap_content")
                .with_attr("android:layout_height", "wrap_content"),
        );
        assert_eq!(wrap, "");
    }

    #[test]
    fn test_non_numeric_dimension_is_skipped() {
        let chain = chain_for(
            LayoutNode::new("View")
                .with_attr("android:layout_width", "auto")
                .with_attr("android:padding", "lots"),
        );
        assert_eq!(chain, "");
    }

    #[test]
    fn test_non_finite_floats_are_skipped() {
        let chain = chain_for(
            LayoutNode::new("View")
                .with_attr("android:alpha", "NaN")
                .with_attr("android:rotation", "inf")
                .with_attr("android:scaleX", "-Infinity"),
        );
        assert_eq!(chain, "");
    }

    #[test]
    fn test_padding_forms() {
        assert_eq!(
            chain_for(LayoutNode::new("View").with_attr("android:padding", "16dp")),
            ".padding(16.dp)"
        );
        assert_eq!(
            chain_for(
                LayoutNode::new("View")
                    .with_attr("android:paddingTop", "4dp")
                    .with_attr("android:paddingLeft", "8dp")
            ),
            ".padding(start = 8.dp, top = 4.dp)"
        );
        assert_eq!(
            chain_for(LayoutNode::new("View").with_attr("android:paddingHorizontal", "12dp")),
            ".padding(horizontal = 12.dp)"
        );
    }

    #[test]
    fn test_margin_becomes_todo_comment() {
        let chain = chain_for(LayoutNode::new("View").with_attr("android:layout_marginTop", "8dp"));
        assert!(chain.starts_with("/* TODO: margin (layout_marginTop=8dp)"));
    }

    #[test]
    fn test_background_variants() {
        assert_eq!(
            chain_for(LayoutNode::new("View").with_attr("android:background", "#FF0000")),
            ".background(Color(0xFFFF0000))"
        );
        assert_eq!(
            chain_for(LayoutNode::new("View").with_attr("android:background", "@color/surface")),
            ".background(colorResource(R.color.surface))"
        );
        assert!(chain_for(LayoutNode::new("View").with_attr("android:background", "@drawable/bg_gradient"))
            .contains("TODO: gradient background @drawable/bg_gradient"));
        assert!(chain_for(LayoutNode::new("View").with_attr("android:background", "@drawable/card"))
            .contains("TODO: background drawable @drawable/card"));
        assert!(chain_for(LayoutNode::new("View").with_attr("android:background", "?attr/selectableItemBackground"))
            .contains("TODO: background ?attr/selectableItemBackground"));
    }

    #[test]
    fn test_stroke_drawable_adds_border_todo() {
        let chain = chain_for(LayoutNode::new("View").with_attr("android:background", "@drawable/rounded_border"));
        assert!(chain.contains("TODO: border from @drawable/rounded_border"));
    }

    #[test]
    fn test_gone_replaces_chain() {
        let chain = chain_for(
            LayoutNode::new("TextView")
                .with_attr("android:padding", "8dp")
                .with_attr("android:visibility", "gone")
                .with_attr("android:alpha", "0.5"),
        );
        assert_eq!(chain, ".size(0.dp)");
    }

    #[test]
    fn test_ordering_of_later_checks() {
        let chain = chain_for(
            LayoutNode::new("ImageView")
                .with_attr("android:visibility", "invisible")
                .with_attr("android:clickable", "true")
                .with_attr("android:enabled", "false")
                .with_attr("android:focusable", "true")
                .with_attr("android:rotation", "45")
                .with_attr("android:scaleX", "2")
                .with_attr("android:scaleY", "2")
                .with_attr("android:alpha", "0.5")
                .with_attr("android:minWidth", "48dp"),
        );
        assert_eq!(
            chain,
            ".alpha(0f).clickable { /* TODO: handle click */ }.alpha(0.6f).focusable().rotate(45f).scale(2f).alpha(0.5f).widthIn(min = 48.dp)"
        );
    }

    #[test]
    fn test_button_click_is_a_parameter_not_a_modifier() {
        let chain = chain_for(LayoutNode::new("Button").with_attr("android:onClick", "submit"));
        assert_eq!(chain, "");
    }

    #[test]
    fn test_scroll_modifier_from_mapping() {
        assert_eq!(
            chain_for(LayoutNode::new("ScrollView")),
            ".verticalScroll(rememberScrollState())"
        );
    }

    #[test]
    fn test_render_with_comment() {
        let chain = chain_for(
            LayoutNode::new("View")
                .with_attr("android:layout_width", "match_parent")
                .with_attr("android:layout_gravity", "center")
                .with_attr("android:alpha", "0.5"),
        );
        assert_eq!(
            chain,
            ".fillMaxWidth().alpha(0.5f) /* TODO: layout_gravity=\"center\" - use Modifier.align(...) inside the parent scope */"
        );
    }
}
