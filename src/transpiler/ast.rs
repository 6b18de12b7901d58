/// Layout tree for Android XML documents
///
/// The parser builds this once per conversion; every later pass only reads it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode {
    pub tag: String,
    pub attributes: Vec<(String, String)>, // qualified name, unescaped value
    pub children: Vec<LayoutNode>,
}

/// A parsed document plus the shape figures gathered while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDocument {
    pub root: LayoutNode,
    pub depth: usize,
    pub node_count: usize,
}

impl LayoutNode {
    pub fn new(tag: &str) -> Self {
        LayoutNode {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder used by tests and by callers that assemble trees by hand
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: LayoutNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute; a repeated name overwrites the earlier value in place
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.attributes.iter_mut().find(|(n, _)| n == name) {
            existing.1 = value.to_string();
        } else {
            self.attributes.push((name.to_string(), value.to_string()));
        }
    }

    /// Lookup by the name exactly as written (`android:text`, `layout`, ...)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Lookup by local name, ignoring `android:`/`app:` prefixes but never
    /// returning a `tools:` value
    pub fn find_attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .filter(|(n, _)| !n.starts_with("tools:"))
            .find(|(n, _)| local_name(n) == local)
            .map(|(_, v)| v.as_str())
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.tag)
    }
}

/// `androidx.recyclerview.widget.RecyclerView` -> `RecyclerView`
pub fn simple_name(tag: &str) -> &str {
    tag.rsplit('.').next().unwrap_or(tag)
}

/// Strip a namespace prefix (`android:padding` -> `padding`)
pub fn local_name(name: &str) -> &str {
    match name.split_once(':') {
        Some((_, local)) => local,
        None => name,
    }
}

/// Normalize library and compat widget names to the framework widget they extend.
///
/// Everything downstream (mapper, validator, import collection) switches on
/// this name, so an AppCompat or Material variant converts like its base view.
pub fn canonical_tag(tag: &str) -> &str {
    let name = simple_name(tag);
    match name {
        "AppCompatTextView" | "MaterialTextView" => "TextView",
        "AppCompatButton" | "MaterialButton" => "Button",
        "AppCompatEditText" | "TextInputEditText" => "EditText",
        "AppCompatImageView" | "ShapeableImageView" => "ImageView",
        "AppCompatCheckBox" | "MaterialCheckBox" => "CheckBox",
        "AppCompatRadioButton" | "MaterialRadioButton" => "RadioButton",
        "SwitchCompat" | "SwitchMaterial" | "MaterialSwitch" => "Switch",
        "AppCompatSeekBar" => "SeekBar",
        "AppCompatSpinner" => "Spinner",
        "NestedScrollView" => "ScrollView",
        "FragmentContainerView" => "fragment",
        other => other,
    }
}
