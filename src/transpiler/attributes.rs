/// Attribute resolution
///
/// Turns one raw XML attribute into a Compose expression. Resource references
/// are rewritten by prefix, colors are parsed, and anything that cannot be
/// mapped statically becomes a `/* TODO: ... */` placeholder. Nothing here
/// fails: unknown input always degrades to a placeholder.

use crate::transpiler::ast::LayoutNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Plain value passed through unchanged (`16dp`, `Hello`, `vertical`)
    Literal,
    /// Rewritten into a Compose expression
    Expression,
    /// Could not be mapped; `value` holds a TODO comment
    Placeholder,
    /// `tools:` attribute, kept only as a comment
    PreviewOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttribute {
    pub key: String,
    pub raw: String,
    pub value: String,
    pub kind: ValueKind,
    pub comment: Option<String>,
}

impl ResolvedAttribute {
    pub fn is_placeholder(&self) -> bool {
        self.kind == ValueKind::Placeholder
    }
}

const SYSTEM_COLORS: &[(&str, &str)] = &[
    ("white", "Color.White"),
    ("black", "Color.Black"),
    ("transparent", "Color.Transparent"),
    ("darker_gray", "Color(0xFFAAAAAA)"),
    ("background_light", "Color(0xFFFFFFFF)"),
];

const THEME_ATTRIBUTES: &[(&str, &str)] = &[
    ("colorPrimary", "MaterialTheme.colorScheme.primary"),
    ("colorPrimaryDark", "MaterialTheme.colorScheme.primaryContainer"),
    ("colorPrimaryVariant", "MaterialTheme.colorScheme.primaryContainer"),
    ("colorOnPrimary", "MaterialTheme.colorScheme.onPrimary"),
    ("colorAccent", "MaterialTheme.colorScheme.secondary"),
    ("colorSecondary", "MaterialTheme.colorScheme.secondary"),
    ("colorSecondaryVariant", "MaterialTheme.colorScheme.secondaryContainer"),
    ("colorOnSecondary", "MaterialTheme.colorScheme.onSecondary"),
    ("colorBackground", "MaterialTheme.colorScheme.background"),
    ("colorOnBackground", "MaterialTheme.colorScheme.onBackground"),
    ("colorSurface", "MaterialTheme.colorScheme.surface"),
    ("colorOnSurface", "MaterialTheme.colorScheme.onSurface"),
    ("colorError", "MaterialTheme.colorScheme.error"),
    ("colorOnError", "MaterialTheme.colorScheme.onError"),
    ("textColorPrimary", "MaterialTheme.colorScheme.onSurface"),
    ("textColorSecondary", "MaterialTheme.colorScheme.onSurfaceVariant"),
    ("colorControlNormal", "MaterialTheme.colorScheme.onSurfaceVariant"),
    ("colorControlActivated", "MaterialTheme.colorScheme.primary"),
    ("actionBarSize", "56.dp"),
    ("listPreferredItemHeight", "64.dp"),
    ("listPreferredItemHeightSmall", "48.dp"),
    ("listPreferredItemHeightLarge", "80.dp"),
];

/// Resolve one attribute by its qualified name and raw value
pub fn resolve(name: &str, value: &str) -> ResolvedAttribute {
    if let Some(key) = name.strip_prefix("tools:") {
        return ResolvedAttribute {
            key: key.to_string(),
            raw: value.to_string(),
            value: value.to_string(),
            kind: ValueKind::PreviewOnly,
            comment: Some(format!("tools:{}=\"{}\" is preview-only and not emitted", key, value)),
        };
    }

    let key = name
        .strip_prefix("android:")
        .or_else(|| name.strip_prefix("app:"))
        .unwrap_or(name);

    let (resolved, kind, comment) = resolve_value(value);
    ResolvedAttribute {
        key: key.to_string(),
        raw: value.to_string(),
        value: resolved,
        kind,
        comment,
    }
}

fn resolve_value(value: &str) -> (String, ValueKind, Option<String>) {
    if let Some(name) = value.strip_prefix("@string/") {
        return expression(format!("stringResource(R.string.{})", name));
    }
    if let Some(name) = value.strip_prefix("@color/") {
        return expression(format!("colorResource(R.color.{})", name));
    }
    if let Some(name) = value.strip_prefix("@dimen/") {
        return expression(format!("dimensionResource(R.dimen.{})", name));
    }
    if let Some(name) = value.strip_prefix("@drawable/") {
        return expression(format!("painterResource(R.drawable.{})", name));
    }
    if let Some(name) = value.strip_prefix("@mipmap/") {
        return expression(format!("painterResource(R.mipmap.{})", name));
    }
    if let Some(name) = value.strip_prefix("@android:color/") {
        return match system_color(name) {
            Some(color) => expression(color.to_string()),
            None => placeholder(format!("map system color {}", value), "unresolved system color"),
        };
    }
    if let Some(name) = value
        .strip_prefix("?attr/")
        .or_else(|| value.strip_prefix("?android:attr/"))
    {
        return match theme_attribute(name) {
            Some(expr) => expression(expr.to_string()),
            None => placeholder(format!("map theme attribute {}", value), "unresolved theme attribute"),
        };
    }
    if value.starts_with("@style/") {
        return placeholder(format!("apply style {}", value), "styles are not inlined");
    }
    if value.starts_with("@{") {
        return placeholder(
            format!("data binding {}", value),
            "data binding expressions need manual migration",
        );
    }
    if value.starts_with('@') || value.starts_with('?') {
        return placeholder(format!("resolve {}", value), "unrecognized resource reference");
    }
    if value.starts_with('#') {
        return match parse_color(value) {
            Some(color) => expression(color),
            None => placeholder(format!("invalid color {}", value), "malformed color literal"),
        };
    }

    (value.to_string(), ValueKind::Literal, None)
}

fn expression(value: String) -> (String, ValueKind, Option<String>) {
    (value, ValueKind::Expression, None)
}

fn placeholder(todo: String, reason: &str) -> (String, ValueKind, Option<String>) {
    (todo_comment(&todo), ValueKind::Placeholder, Some(reason.to_string()))
}

pub fn system_color(name: &str) -> Option<&'static str> {
    SYSTEM_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, expr)| *expr)
}

pub fn theme_attribute(name: &str) -> Option<&'static str> {
    THEME_ATTRIBUTES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, expr)| *expr)
}

/// `#RRGGBB` -> `Color(0xFFRRGGBB)`, `#AARRGGBB` passes through.
/// Short `#RGB`/`#ARGB` forms are expanded by doubling each digit.
pub fn parse_color(value: &str) -> Option<String> {
    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let hex = hex.to_ascii_uppercase();
    let argb = match hex.len() {
        3 => format!("FF{}", double_digits(&hex)),
        4 => double_digits(&hex),
        6 => format!("FF{}", hex),
        8 => hex,
        _ => return None,
    };
    Some(format!("Color(0x{})", argb))
}

fn double_digits(hex: &str) -> String {
    hex.chars().flat_map(|c| [c, c]).collect()
}

/// Wrap text as a block comment, neutralizing any `*/` inside it
pub fn todo_comment(text: &str) -> String {
    format!("/* TODO: {} */", text.replace("*/", "* /"))
}

/// Fold line breaks into a visible `\n` so the text stays on one `//` line
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", "\\n")
        .replace(['\n', '\r'], "\\n")
}

/// Leading integer of a dimension (`16dp`, `24sp`, `8`), like `parseInt`.
/// Non-numeric values yield `None` and the caller simply skips them.
pub fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Finite float (`0.5`, `45`, `1.5f`); `NaN` and `inf` count as non-numeric
pub fn parse_float(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches(['f', 'F'])
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Dimension expression for sizes and paddings: `16dp` -> `16.dp`,
/// `@dimen/gap` -> `dimensionResource(R.dimen.gap)`
pub fn dp_expr(value: &str) -> Option<String> {
    if let Some(name) = value.strip_prefix("@dimen/") {
        return Some(format!("dimensionResource(R.dimen.{})", name));
    }
    parse_int(value).map(|n| format!("{}.dp", n))
}

/// Kotlin float literal with at most three decimals: 0.45 -> `0.45f`, 45 -> `45f`
pub fn float_literal(value: f64) -> String {
    let fixed = format!("{:.3}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    format!("{}f", trimmed)
}

/// Quote an Android string value as a Kotlin string literal.
///
/// Android escapes (`\'`, `\"`, `\n`) are interpreted first; `"`, `\` and `$`
/// are then escaped for Kotlin.
pub fn kotlin_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push_str("\\n"),
                Some('t') => out.push_str("\\t"),
                Some('\\') => out.push_str("\\\\"),
                Some('"') => out.push_str("\\\""),
                // Kotlin shares the \uXXXX escape
                Some('u') => out.push_str("\\u"),
                Some(other) => out.push(other),
                None => out.push_str("\\\\"),
            },
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// All resolved attributes of one element, in document order
#[derive(Debug, Clone, Default)]
pub struct ResolvedAttributes {
    attrs: Vec<ResolvedAttribute>,
}

impl ResolvedAttributes {
    pub fn from_node(node: &LayoutNode) -> Self {
        let attrs = node
            .attributes
            .iter()
            .filter(|(name, _)| !name.starts_with("xmlns"))
            .map(|(name, value)| resolve(name, value))
            .collect();
        ResolvedAttributes { attrs }
    }

    /// Emitted attribute by local key; `tools:` entries never match
    pub fn get(&self, key: &str) -> Option<&ResolvedAttribute> {
        self.attrs
            .iter()
            .find(|a| a.key == key && a.kind != ValueKind::PreviewOnly)
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.get(key).map(|a| a.raw.as_str())
    }

    pub fn is_true(&self, key: &str) -> bool {
        self.raw(key) == Some("true")
    }

    pub fn is_false(&self, key: &str) -> bool {
        self.raw(key) == Some("false")
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedAttribute> {
        self.attrs.iter()
    }

    /// Comments for `tools:` attributes, kept for traceability
    pub fn preview_comments(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .iter()
            .filter(|a| a.kind == ValueKind::PreviewOnly)
            .filter_map(|a| a.comment.as_deref())
    }
}

/// Expression for a string-typed slot (text, contentDescription, hint)
pub fn text_expr(attr: &ResolvedAttribute) -> String {
    match attr.kind {
        ValueKind::Expression => attr.value.clone(),
        ValueKind::Placeholder => format!("\"\" {}", attr.value),
        ValueKind::Literal | ValueKind::PreviewOnly => kotlin_string(&attr.raw),
    }
}

/// Expression for a color-typed slot (textColor)
pub fn color_expr(attr: &ResolvedAttribute) -> String {
    match attr.kind {
        ValueKind::Expression => attr.value.clone(),
        ValueKind::Placeholder => format!("Color.Unspecified {}", attr.value),
        ValueKind::Literal | ValueKind::PreviewOnly => {
            format!("Color.Unspecified {}", todo_comment(&format!("color \"{}\"", attr.raw)))
        }
    }
}
