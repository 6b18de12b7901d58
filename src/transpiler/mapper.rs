/// Tag mapping: XML widget -> composable call
///
/// Total over every tag string; anything unrecognized becomes a `Box`.

use crate::transpiler::ast::canonical_tag;
use crate::transpiler::attributes::{
    color_expr, float_literal, parse_float, parse_int, single_line, text_expr, todo_comment,
    ResolvedAttributes, ValueKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOrientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposableMapping {
    pub name: String,
    pub params: Vec<(String, String)>,
    pub scroll: Option<ScrollOrientation>,
    /// Lines emitted at the top of the trailing block (a Button label, a TODO)
    pub content: Option<String>,
    /// `//` line written above the call
    pub leading_comment: Option<String>,
    /// The composable has no overload without a content lambda
    pub requires_content: bool,
    /// Children go inside `item { }` (lazy grids)
    pub wraps_children_in_items: bool,
}

impl ComposableMapping {
    pub fn new(name: &str) -> Self {
        ComposableMapping {
            name: name.to_string(),
            params: Vec::new(),
            scroll: None,
            content: None,
            leading_comment: None,
            requires_content: false,
            wraps_children_in_items: false,
        }
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    fn push(&mut self, key: &str, value: impl Into<String>) {
        self.params.push((key.to_string(), value.into()));
    }

    fn container(mut self) -> Self {
        self.requires_content = true;
        self
    }

    fn scrolling(mut self, orientation: ScrollOrientation) -> Self {
        self.scroll = Some(orientation);
        self
    }

    /// Compound buttons draw no label; surface `android:text` as a TODO
    fn labelled(mut self, attrs: &ResolvedAttributes) -> Self {
        self.leading_comment = attrs.get("text").map(|text| {
            format!(
                "TODO: label {} - put it in a Row next to this {}",
                single_line(&text_expr(text)),
                self.name
            )
        });
        self
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }
}

pub fn map_tag(tag: &str, attrs: &ResolvedAttributes) -> ComposableMapping {
    let mapping = match canonical_tag(tag) {
        "LinearLayout" => {
            if attrs.raw("orientation") == Some("horizontal") {
                row(attrs)
            } else {
                column(attrs)
            }
        }
        "ConstraintLayout" | "RelativeLayout" | "FrameLayout" => boxed(attrs),
        "ScrollView" => column(attrs).scrolling(ScrollOrientation::Vertical),
        "HorizontalScrollView" => row(attrs).scrolling(ScrollOrientation::Horizontal),
        "GridLayout" => grid(attrs),
        "TextView" => text(attrs),
        "Button" => button(attrs),
        "ImageView" => image(attrs),
        "EditText" => text_field(attrs),
        "CheckBox" => ComposableMapping::new("Checkbox")
            .param("checked", attrs.is_true("checked").to_string())
            .param("onCheckedChange", "{ /* TODO: update checked state */ }")
            .labelled(attrs),
        "RadioButton" => ComposableMapping::new("RadioButton")
            .param("selected", attrs.is_true("checked").to_string())
            .param("onClick", "{ /* TODO: select this option */ }")
            .labelled(attrs),
        "Switch" | "ToggleButton" => ComposableMapping::new("Switch")
            .param("checked", attrs.is_true("checked").to_string())
            .param("onCheckedChange", "{ /* TODO: update checked state */ }")
            .labelled(attrs),
        "ProgressBar" => progress(attrs),
        "SeekBar" => slider(attrs),
        "Spinner" => dropdown(attrs),
        "WebView" => ComposableMapping::new("AndroidView")
            .param("factory", "{ context -> WebView(context) }")
            .param("update", "{ webView -> /* TODO: webView.loadUrl(url) */ }"),
        _ => ComposableMapping::new("Box"),
    };

    log::trace!("<{}> -> {}", tag, mapping.name);
    mapping
}

fn gravity_tokens(attrs: &ResolvedAttributes) -> Vec<&str> {
    attrs
        .raw("gravity")
        .map(|g| g.split('|').map(str::trim).collect())
        .unwrap_or_default()
}

fn column(attrs: &ResolvedAttributes) -> ComposableMapping {
    let gravity = gravity_tokens(attrs);
    let has = |t: &str| gravity.iter().any(|g| *g == t);
    let mut mapping = ComposableMapping::new("Column").container();

    if has("center") || has("center_vertical") {
        mapping.push("verticalArrangement", "Arrangement.Center");
    } else if has("bottom") {
        mapping.push("verticalArrangement", "Arrangement.Bottom");
    }
    if has("center") || has("center_horizontal") {
        mapping.push("horizontalAlignment", "Alignment.CenterHorizontally");
    } else if has("end") || has("right") {
        mapping.push("horizontalAlignment", "Alignment.End");
    }
    mapping
}

fn row(attrs: &ResolvedAttributes) -> ComposableMapping {
    let gravity = gravity_tokens(attrs);
    let has = |t: &str| gravity.iter().any(|g| *g == t);
    let mut mapping = ComposableMapping::new("Row").container();

    if has("center") || has("center_horizontal") {
        mapping.push("horizontalArrangement", "Arrangement.Center");
    } else if has("end") || has("right") {
        mapping.push("horizontalArrangement", "Arrangement.End");
    }
    if has("center") || has("center_vertical") {
        mapping.push("verticalAlignment", "Alignment.CenterVertically");
    } else if has("bottom") {
        mapping.push("verticalAlignment", "Alignment.Bottom");
    }
    mapping
}

fn boxed(attrs: &ResolvedAttributes) -> ComposableMapping {
    let mut mapping = ComposableMapping::new("Box");
    if let Some(alignment) = box_alignment(&gravity_tokens(attrs)) {
        mapping.push("contentAlignment", format!("Alignment.{}", alignment));
    }
    mapping
}

/// Combine vertical and horizontal gravity into one of the nine `Alignment`s
fn box_alignment(gravity: &[&str]) -> Option<String> {
    let has = |t: &str| gravity.iter().any(|g| *g == t);
    let vertical = if has("center") || has("center_vertical") {
        Some("Center")
    } else if has("bottom") {
        Some("Bottom")
    } else if has("top") {
        Some("Top")
    } else {
        None
    };
    let horizontal = if has("center") || has("center_horizontal") {
        Some("Center")
    } else if has("end") || has("right") {
        Some("End")
    } else if has("start") || has("left") {
        Some("Start")
    } else {
        None
    };

    if vertical.is_none() && horizontal.is_none() {
        return None;
    }
    let v = vertical.unwrap_or("Top");
    let h = horizontal.unwrap_or("Start");
    if v == "Center" && h == "Center" {
        Some("Center".to_string())
    } else {
        Some(format!("{}{}", v, h))
    }
}

fn grid(attrs: &ResolvedAttributes) -> ComposableMapping {
    let columns = attrs
        .raw("columnCount")
        .and_then(parse_int)
        .filter(|n| *n > 0)
        .unwrap_or(2);
    let mut mapping = ComposableMapping::new("LazyVerticalGrid")
        .container()
        .param("columns", format!("GridCells.Fixed({})", columns));
    mapping.wraps_children_in_items = true;
    mapping
}

fn text(attrs: &ResolvedAttributes) -> ComposableMapping {
    let mut mapping = ComposableMapping::new("Text");

    let text = attrs
        .get("text")
        .map(text_expr)
        .unwrap_or_else(|| "\"\"".to_string());
    mapping.push("text", text);

    if let Some(size) = attrs.raw("textSize").and_then(parse_int) {
        mapping.push("fontSize", format!("{}.sp", size));
    }
    if let Some(color) = attrs.get("textColor") {
        mapping.push("color", color_expr(color));
    }
    if let Some(style) = attrs.raw("textStyle") {
        let styles: Vec<&str> = style.split('|').map(str::trim).collect();
        if styles.contains(&"bold") {
            mapping.push("fontWeight", "FontWeight.Bold");
        }
        if styles.contains(&"italic") {
            mapping.push("fontStyle", "FontStyle.Italic");
        }
    }
    if let Some(align) = text_align(&gravity_tokens(attrs)) {
        mapping.push("textAlign", format!("TextAlign.{}", align));
    }
    if let Some(lines) = attrs.raw("maxLines").and_then(parse_int) {
        mapping.push("maxLines", lines.to_string());
    } else if attrs.is_true("singleLine") {
        mapping.push("maxLines", "1");
    }
    mapping
}

fn text_align(gravity: &[&str]) -> Option<&'static str> {
    gravity.iter().find_map(|token| match *token {
        "center" | "center_horizontal" => Some("Center"),
        "end" | "right" => Some("End"),
        "start" | "left" => Some("Start"),
        _ => None,
    })
}

fn click_handler(attrs: &ResolvedAttributes) -> String {
    match attrs.raw("onClick") {
        Some(handler) => format!("{{ {} }}", todo_comment(&format!("call {}()", handler))),
        None => "{ /* TODO: handle click */ }".to_string(),
    }
}

fn button(attrs: &ResolvedAttributes) -> ComposableMapping {
    let mut mapping = ComposableMapping::new("Button")
        .container()
        .param("onClick", click_handler(attrs));
    mapping.content = attrs
        .get("text")
        .map(|text| format!("Text({})", text_expr(text)));
    mapping
}

fn image(attrs: &ResolvedAttributes) -> ComposableMapping {
    let source = attrs.get("src").or_else(|| attrs.get("srcCompat"));
    let painter = match source {
        Some(src) if src.kind == ValueKind::Expression && src.value.starts_with("painterResource(") => {
            src.value.clone()
        }
        Some(src) => format!(
            "painterResource(R.drawable.ic_placeholder) {}",
            todo_comment(&format!("resolve image {}", src.raw))
        ),
        None => format!(
            "painterResource(R.drawable.ic_placeholder) {}",
            todo_comment("set image resource")
        ),
    };

    let description = attrs
        .get("contentDescription")
        .map(text_expr)
        .unwrap_or_else(|| "null".to_string());

    let mut mapping = ComposableMapping::new("Image")
        .param("painter", painter)
        .param("contentDescription", description);

    let scale = match attrs.raw("scaleType") {
        Some("centerCrop") => Some("Crop"),
        Some("fitCenter") => Some("Fit"),
        Some("fitXY") => Some("FillBounds"),
        Some("centerInside") => Some("Inside"),
        _ => None,
    };
    if let Some(scale) = scale {
        mapping.push("contentScale", format!("ContentScale.{}", scale));
    }
    mapping
}

fn text_field(attrs: &ResolvedAttributes) -> ComposableMapping {
    let value = attrs
        .get("text")
        .map(text_expr)
        .unwrap_or_else(|| "\"\"".to_string());
    let mut mapping = ComposableMapping::new("TextField")
        .param("value", value)
        .param("onValueChange", "{ /* TODO: update text state */ }");

    if let Some(hint) = attrs.get("hint") {
        mapping.push("placeholder", format!("{{ Text({}) }}", text_expr(hint)));
    }
    if attrs.is_true("singleLine") || attrs.raw("maxLines") == Some("1") {
        mapping.push("singleLine", "true");
    }

    let input_types: Vec<&str> = attrs
        .raw("inputType")
        .map(|t| t.split('|').map(str::trim).collect())
        .unwrap_or_default();
    let has = |t: &str| input_types.iter().any(|i| *i == t);

    let keyboard = if has("numberPassword") {
        Some("NumberPassword")
    } else if has("textPassword") || has("textWebPassword") {
        Some("Password")
    } else if has("textEmailAddress") || has("textWebEmailAddress") {
        Some("Email")
    } else if has("number") || has("numberDecimal") || has("numberSigned") {
        Some("Number")
    } else if has("phone") {
        Some("Phone")
    } else if has("textUri") {
        Some("Uri")
    } else {
        None
    };
    if let Some(keyboard) = keyboard {
        mapping.push(
            "keyboardOptions",
            format!("KeyboardOptions(keyboardType = KeyboardType.{})", keyboard),
        );
    }
    if has("textPassword") || has("numberPassword") || has("textWebPassword") {
        mapping.push("visualTransformation", "PasswordVisualTransformation()");
    }
    mapping
}

/// `progress` over `max` (default 100) as a 0..1 fraction
fn fraction(attrs: &ResolvedAttributes) -> Option<f64> {
    let progress = attrs.raw("progress").and_then(parse_float)?;
    let max = attrs
        .raw("max")
        .and_then(parse_float)
        .filter(|m| *m > 0.0)
        .unwrap_or(100.0);
    Some((progress / max).clamp(0.0, 1.0))
}

fn progress(attrs: &ResolvedAttributes) -> ComposableMapping {
    let horizontal = attrs
        .raw("style")
        .map(|s| s.contains("Horizontal"))
        .unwrap_or(false);
    let mut mapping = if horizontal {
        ComposableMapping::new("LinearProgressIndicator")
    } else {
        ComposableMapping::new("CircularProgressIndicator")
    };

    if !attrs.is_true("indeterminate") {
        if let Some(value) = fraction(attrs) {
            mapping.push("progress", format!("{{ {} }}", float_literal(value)));
        }
    }
    mapping
}

fn slider(attrs: &ResolvedAttributes) -> ComposableMapping {
    let value = fraction(attrs).unwrap_or(0.0);
    ComposableMapping::new("Slider")
        .param("value", float_literal(value))
        .param("onValueChange", "{ /* TODO: update slider state */ }")
        .param("valueRange", "0f..1f")
}

fn dropdown(attrs: &ResolvedAttributes) -> ComposableMapping {
    let mut mapping = ComposableMapping::new("ExposedDropdownMenuBox")
        .container()
        .param("expanded", "false")
        .param("onExpandedChange", "{ /* TODO: toggle menu */ }");
    let entries = attrs
        .raw("entries")
        .map(|e| format!(" from {}", single_line(e)))
        .unwrap_or_default();
    mapping.content = Some(format!(
        "// TODO: add TextField + ExposedDropdownMenu with the spinner items{}",
        entries
    ));
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::ast::LayoutNode;

    fn map(node: LayoutNode) -> ComposableMapping {
        let attrs = ResolvedAttributes::from_node(&node);
        map_tag(&node.tag, &attrs)
    }

    fn param<'a>(mapping: &'a ComposableMapping, key: &str) -> Option<&'a str> {
        mapping
            .params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_linear_layout_orientation() {
        let row = map(LayoutNode::new("LinearLayout").with_attr("android:orientation", "horizontal"));
        assert_eq!(row.name, "Row");
        let column = map(LayoutNode::new("LinearLayout").with_attr("android:orientation", "vertical"));
        assert_eq!(column.name, "Column");
        let default = map(LayoutNode::new("LinearLayout"));
        assert_eq!(default.name, "Column");
    }

    #[test]
    fn test_containers_and_scrolling() {
        assert_eq!(map(LayoutNode::new("FrameLayout")).name, "Box");
        assert_eq!(
            map(LayoutNode::new("androidx.constraintlayout.widget.ConstraintLayout")).name,
            "Box"
        );
        let scroll = map(LayoutNode::new("ScrollView"));
        assert_eq!(scroll.name, "Column");
        assert_eq!(scroll.scroll, Some(ScrollOrientation::Vertical));
        let hscroll = map(LayoutNode::new("HorizontalScrollView"));
        assert_eq!(hscroll.name, "Row");
        assert_eq!(hscroll.scroll, Some(ScrollOrientation::Horizontal));
    }

    #[test]
    fn test_unknown_tag_falls_back_to_box() {
        let mapping = map(LayoutNode::new("com.example.FancyChart"));
        assert_eq!(mapping.name, "Box");
        assert!(mapping.params.is_empty());
        assert_eq!(map(LayoutNode::new("")).name, "Box");
    }

    #[test]
    fn test_grid_columns() {
        let grid = map(LayoutNode::new("GridLayout").with_attr("android:columnCount", "3"));
        assert_eq!(grid.name, "LazyVerticalGrid");
        assert_eq!(param(&grid, "columns"), Some("GridCells.Fixed(3)"));
        assert!(grid.wraps_children_in_items);

        let default = map(LayoutNode::new("GridLayout"));
        assert_eq!(param(&default, "columns"), Some("GridCells.Fixed(2)"));
    }

    #[test]
    fn test_text_view_parameters_in_order() {
        let mapping = map(
            LayoutNode::new("TextView")
                .with_attr("android:text", "Hi")
                .with_attr("android:textSize", "24sp")
                .with_attr("android:textColor", "#007AFF")
                .with_attr("android:textStyle", "bold|italic")
                .with_attr("android:gravity", "center"),
        );
        let keys: Vec<&str> = mapping.params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["text", "fontSize", "color", "fontWeight", "fontStyle", "textAlign"]);
        assert_eq!(param(&mapping, "text"), Some("\"Hi\""));
        assert_eq!(param(&mapping, "fontSize"), Some("24.sp"));
        assert_eq!(param(&mapping, "color"), Some("Color(0xFF007AFF)"));
        assert_eq!(param(&mapping, "textAlign"), Some("TextAlign.Center"));
    }

    #[test]
    fn test_text_align_from_gravity() {
        let end = map(LayoutNode::new("TextView").with_attr("android:gravity", "right|center_vertical"));
        assert_eq!(param(&end, "textAlign"), Some("TextAlign.End"));
        let start = map(LayoutNode::new("TextView").with_attr("android:gravity", "left"));
        assert_eq!(param(&start, "textAlign"), Some("TextAlign.Start"));
    }

    #[test]
    fn test_button_label_becomes_content() {
        let mapping = map(LayoutNode::new("Button").with_attr("android:text", "Click Me!"));
        assert_eq!(mapping.content.as_deref(), Some("Text(\"Click Me!\")"));
        assert_eq!(param(&mapping, "onClick"), Some("{ /* TODO: handle click */ }"));

        let handler = map(LayoutNode::new("Button").with_attr("android:onClick", "submit"));
        assert_eq!(param(&handler, "onClick"), Some("{ /* TODO: call submit() */ }"));
    }

    #[test]
    fn test_edit_text_input_types() {
        let password = map(LayoutNode::new("EditText").with_attr("android:inputType", "textPassword"));
        assert_eq!(password.name, "TextField");
        assert_eq!(param(&password, "visualTransformation"), Some("PasswordVisualTransformation()"));

        let email = map(
            LayoutNode::new("EditText")
                .with_attr("android:inputType", "textEmailAddress")
                .with_attr("android:hint", "Email"),
        );
        assert_eq!(
            param(&email, "keyboardOptions"),
            Some("KeyboardOptions(keyboardType = KeyboardType.Email)")
        );
        assert_eq!(param(&email, "placeholder"), Some("{ Text(\"Email\") }"));

        let number = map(LayoutNode::new("EditText").with_attr("android:inputType", "number"));
        assert_eq!(
            param(&number, "keyboardOptions"),
            Some("KeyboardOptions(keyboardType = KeyboardType.Number)")
        );
    }

    #[test]
    fn test_progress_variants() {
        let linear = map(
            LayoutNode::new("ProgressBar")
                .with_attr("style", "?android:attr/progressBarStyleHorizontal")
                .with_attr("android:progress", "45"),
        );
        assert_eq!(linear.name, "LinearProgressIndicator");
        assert_eq!(param(&linear, "progress"), Some("{ 0.45f }"));

        let circular = map(LayoutNode::new("ProgressBar"));
        assert_eq!(circular.name, "CircularProgressIndicator");
        assert!(circular.params.is_empty());
    }

    #[test]
    fn test_seek_bar_scaling() {
        let slider = map(
            LayoutNode::new("SeekBar")
                .with_attr("android:max", "200")
                .with_attr("android:progress", "50"),
        );
        assert_eq!(slider.name, "Slider");
        assert_eq!(param(&slider, "value"), Some("0.25f"));
        assert_eq!(param(&slider, "valueRange"), Some("0f..1f"));
    }

    #[test]
    fn test_compound_buttons() {
        let checkbox = map(LayoutNode::new("CheckBox").with_attr("android:checked", "true"));
        assert_eq!(checkbox.name, "Checkbox");
        assert_eq!(param(&checkbox, "checked"), Some("true"));

        let radio = map(LayoutNode::new("RadioButton"));
        assert_eq!(param(&radio, "selected"), Some("false"));

        assert_eq!(map(LayoutNode::new("ToggleButton")).name, "Switch");
        assert_eq!(map(LayoutNode::new("androidx.appcompat.widget.SwitchCompat")).name, "Switch");
        assert_eq!(checkbox.leading_comment, None);
    }

    #[test]
    fn test_compound_button_label_is_kept_as_todo() {
        let checkbox = map(LayoutNode::new("CheckBox").with_attr("android:text", "Remember me"));
        assert_eq!(
            checkbox.leading_comment.as_deref(),
            Some("TODO: label \"Remember me\" - put it in a Row next to this Checkbox")
        );
        assert!(checkbox.content.is_none());

        let radio = map(LayoutNode::new("RadioButton").with_attr("android:text", "@string/small"));
        assert!(radio
            .leading_comment
            .as_deref()
            .is_some_and(|c| c.contains("stringResource(R.string.small)")));

        let switch = map(LayoutNode::new("Switch").with_attr("android:text", "Wi-Fi"));
        assert!(switch.leading_comment.as_deref().is_some_and(|c| c.ends_with("this Switch")));
    }

    #[test]
    fn test_box_alignment_from_gravity() {
        let centered = map(LayoutNode::new("FrameLayout").with_attr("android:gravity", "center"));
        assert_eq!(param(&centered, "contentAlignment"), Some("Alignment.Center"));
        let bottom_end = map(LayoutNode::new("FrameLayout").with_attr("android:gravity", "bottom|end"));
        assert_eq!(param(&bottom_end, "contentAlignment"), Some("Alignment.BottomEnd"));
    }

    #[test]
    fn test_spinner_and_web_view() {
        let spinner = map(LayoutNode::new("Spinner"));
        assert_eq!(spinner.name, "ExposedDropdownMenuBox");
        assert!(spinner.requires_content);
        assert!(spinner.content.is_some());

        let multi = map(LayoutNode::new("Spinner").with_attr("android:entries", "a\nb"));
        assert_eq!(multi.content.as_deref().map(|c| c.lines().count()), Some(1));

        let web = map(LayoutNode::new("WebView"));
        assert_eq!(web.name, "AndroidView");
        assert!(param(&web, "factory").unwrap().contains("WebView(context)"));
    }
}
