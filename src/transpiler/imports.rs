/// Import synthesis
///
/// Walks the tree once and infers the imports the generated code needs from
/// tags and attributes directly. It does not look at mapper output, so the
/// import block does not depend on emission order.

use std::collections::BTreeSet;

use crate::transpiler::ast::{canonical_tag, LayoutNode};
use crate::transpiler::attributes::{color_expr, dp_expr, parse_float, ResolvedAttributes, ValueKind};

const ALWAYS: &[&str] = &[
    "androidx.compose.runtime.Composable",
    "androidx.compose.ui.Modifier",
    "androidx.compose.ui.unit.dp",
    "androidx.compose.ui.unit.sp",
];

const LAYOUT: &str = "androidx.compose.foundation.layout";
const MATERIAL3: &str = "androidx.compose.material3";

/// Imports gathered for one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    imports: BTreeSet<String>,
    experimental_material3: bool,
}

impl ImportSet {
    fn add(&mut self, path: &str) {
        self.imports.insert(path.to_string());
    }

    fn layout(&mut self, name: &str) {
        self.imports.insert(format!("{}.{}", LAYOUT, name));
    }

    fn material(&mut self, name: &str) {
        self.imports.insert(format!("{}.{}", MATERIAL3, name));
    }

    pub fn contains(&self, path: &str) -> bool {
        self.imports.contains(path)
    }

    /// The generated function needs `@OptIn(ExperimentalMaterial3Api::class)`
    pub fn needs_experimental_opt_in(&self) -> bool {
        self.experimental_material3
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    /// One `import` line per path, sorted
    pub fn render(&self) -> String {
        self.imports
            .iter()
            .map(|path| format!("import {}", path))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn collect(root: &LayoutNode) -> ImportSet {
    let mut set = ImportSet::default();
    for path in ALWAYS {
        set.add(path);
    }

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match canonical_tag(&node.tag) {
            "include" | "fragment" => continue,
            "merge" => {}
            _ => {
                let attrs = ResolvedAttributes::from_node(node);
                collect_composables(&mut set, &node.tag, &attrs);
                collect_modifiers(&mut set, &node.tag, &attrs);
                collect_resources(&mut set, &attrs);
            }
        }
        stack.extend(node.children.iter());
    }

    log::trace!("{} imports collected", set.imports.len());
    set
}

pub fn synthesize(root: &LayoutNode) -> String {
    collect(root).render()
}

fn collect_composables(set: &mut ImportSet, tag: &str, attrs: &ResolvedAttributes) {
    let gravity = attrs.raw("gravity").is_some();
    match canonical_tag(tag) {
        "LinearLayout" => {
            if attrs.raw("orientation") == Some("horizontal") {
                set.layout("Row");
            } else {
                set.layout("Column");
            }
            if gravity {
                set.layout("Arrangement");
                set.add("androidx.compose.ui.Alignment");
            }
        }
        scroll @ ("ScrollView" | "HorizontalScrollView") => {
            set.layout(if scroll == "ScrollView" { "Column" } else { "Row" });
            if gravity {
                set.layout("Arrangement");
                set.add("androidx.compose.ui.Alignment");
            }
        }
        "GridLayout" => {
            set.add("androidx.compose.foundation.lazy.grid.GridCells");
            set.add("androidx.compose.foundation.lazy.grid.LazyVerticalGrid");
        }
        "TextView" => {
            set.material("Text");
            if let Some(style) = attrs.raw("textStyle") {
                if style.contains("bold") {
                    set.add("androidx.compose.ui.text.font.FontWeight");
                }
                if style.contains("italic") {
                    set.add("androidx.compose.ui.text.font.FontStyle");
                }
            }
            if gravity {
                set.add("androidx.compose.ui.text.style.TextAlign");
            }
        }
        "Button" => {
            set.material("Button");
            if attrs.get("text").is_some() {
                set.material("Text");
            }
        }
        "ImageView" => {
            set.add("androidx.compose.foundation.Image");
            set.add("androidx.compose.ui.res.painterResource");
            if attrs.raw("scaleType").is_some() {
                set.add("androidx.compose.ui.layout.ContentScale");
            }
        }
        "EditText" => {
            set.material("TextField");
            if attrs.get("hint").is_some() {
                set.material("Text");
            }
            collect_input_type(set, attrs.raw("inputType").unwrap_or_default());
        }
        "CheckBox" => set.material("Checkbox"),
        "RadioButton" => set.material("RadioButton"),
        "Switch" | "ToggleButton" => set.material("Switch"),
        "ProgressBar" => {
            let horizontal = attrs.raw("style").map(|s| s.contains("Horizontal")).unwrap_or(false);
            set.material(if horizontal {
                "LinearProgressIndicator"
            } else {
                "CircularProgressIndicator"
            });
        }
        "SeekBar" => set.material("Slider"),
        "Spinner" => {
            set.material("ExposedDropdownMenuBox");
            set.material("ExperimentalMaterial3Api");
            set.experimental_material3 = true;
        }
        "WebView" => {
            set.add("androidx.compose.ui.viewinterop.AndroidView");
            set.add("android.webkit.WebView");
        }
        // FrameLayout, RelativeLayout, ConstraintLayout and every unmapped tag
        _ => {
            set.layout("Box");
            if gravity {
                set.add("androidx.compose.ui.Alignment");
            }
        }
    }

    if let Some(color) = attrs.get("textColor") {
        if canonical_tag(tag) == "TextView" {
            mark_colors(set, &color_expr(color));
        }
    }
}

fn collect_input_type(set: &mut ImportSet, input_type: &str) {
    let keyboard = [
        "numberPassword",
        "textPassword",
        "textWebPassword",
        "textEmailAddress",
        "textWebEmailAddress",
        "number",
        "numberDecimal",
        "numberSigned",
        "phone",
        "textUri",
    ];
    let types: Vec<&str> = input_type.split('|').map(str::trim).collect();
    if types.iter().any(|t| keyboard.contains(t)) {
        set.add("androidx.compose.foundation.text.KeyboardOptions");
        set.add("androidx.compose.ui.text.input.KeyboardType");
    }
    if types
        .iter()
        .any(|t| matches!(*t, "textPassword" | "numberPassword" | "textWebPassword"))
    {
        set.add("androidx.compose.ui.text.input.PasswordVisualTransformation");
    }
}

fn collect_modifiers(set: &mut ImportSet, tag: &str, attrs: &ResolvedAttributes) {
    let is_dimension = |key: &str| attrs.raw(key).and_then(dp_expr).is_some();
    let is_fill = |key: &str| matches!(attrs.raw(key), Some("match_parent") | Some("fill_parent"));

    // A gone view keeps nothing but `.size(0.dp)`
    if attrs.raw("visibility") == Some("gone") {
        set.layout("size");
        return;
    }

    if is_fill("layout_width") && is_fill("layout_height") {
        set.layout("fillMaxSize");
    } else {
        if is_fill("layout_width") {
            set.layout("fillMaxWidth");
        } else if is_dimension("layout_width") {
            set.layout("width");
        }
        if is_fill("layout_height") {
            set.layout("fillMaxHeight");
        } else if is_dimension("layout_height") {
            set.layout("height");
        }
    }

    let padding_keys = [
        "padding",
        "paddingHorizontal",
        "paddingVertical",
        "paddingStart",
        "paddingLeft",
        "paddingTop",
        "paddingEnd",
        "paddingRight",
        "paddingBottom",
    ];
    if padding_keys.iter().any(|key| is_dimension(key)) {
        set.layout("padding");
    }

    match canonical_tag(tag) {
        "ScrollView" => {
            set.add("androidx.compose.foundation.rememberScrollState");
            set.add("androidx.compose.foundation.verticalScroll");
        }
        "HorizontalScrollView" => {
            set.add("androidx.compose.foundation.rememberScrollState");
            set.add("androidx.compose.foundation.horizontalScroll");
        }
        _ => {}
    }

    if let Some(background) = attrs.get("background") {
        let color = ["Color", "colorResource(", "MaterialTheme.colorScheme."]
            .iter()
            .any(|prefix| background.value.starts_with(prefix));
        if background.kind == ValueKind::Expression && color {
            set.add("androidx.compose.foundation.background");
            mark_colors(set, &background.value);
        }
    }

    if attrs.raw("visibility") == Some("invisible") {
        set.add("androidx.compose.ui.draw.alpha");
    }

    let has_click_param = matches!(canonical_tag(tag), "Button" | "RadioButton");
    if (attrs.is_true("clickable") || attrs.raw("onClick").is_some()) && !has_click_param {
        set.add("androidx.compose.foundation.clickable");
    }
    if attrs.is_false("enabled") || attrs.raw("alpha").and_then(parse_float).is_some() {
        set.add("androidx.compose.ui.draw.alpha");
    }
    if attrs.is_true("focusable") {
        set.add("androidx.compose.foundation.focusable");
    }
    if attrs.raw("rotation").and_then(parse_float).is_some() {
        set.add("androidx.compose.ui.draw.rotate");
    }
    if ["scaleX", "scaleY"]
        .iter()
        .any(|key| attrs.raw(key).and_then(parse_float).is_some())
    {
        set.add("androidx.compose.ui.draw.scale");
    }
    if is_dimension("minWidth") || is_dimension("maxWidth") {
        set.layout("widthIn");
    }
    if is_dimension("minHeight") || is_dimension("maxHeight") {
        set.layout("heightIn");
    }
}

fn collect_resources(set: &mut ImportSet, attrs: &ResolvedAttributes) {
    for attr in attrs.iter().filter(|a| a.kind == ValueKind::Expression) {
        for accessor in ["stringResource", "colorResource", "dimensionResource", "painterResource"] {
            if attr.value.starts_with(&format!("{}(", accessor)) {
                set.add(&format!("androidx.compose.ui.res.{}", accessor));
            }
        }
    }
}

fn mark_colors(set: &mut ImportSet, expression: &str) {
    if expression.starts_with("Color") {
        set.add("androidx.compose.ui.graphics.Color");
    }
    if expression.starts_with("MaterialTheme.") {
        set.material("MaterialTheme");
    }
}
