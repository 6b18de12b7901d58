/// Validator: warnings, migration suggestions and performance tips
///
/// Per-element checks are pure functions of the tag, its attributes and the
/// parent tag. Performance tips look at the whole tree and are computed once.

use crate::transpiler::ast::{canonical_tag, simple_name, LayoutNode};
use crate::transpiler::attributes::{ResolvedAttributes, ValueKind};
use crate::transpiler::diagnostics::{Diagnostic, DiagnosticKind};

/// Tree-shape limits that trigger performance tips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub nesting_depth: usize,
    pub children: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            nesting_depth: 10,
            children: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<Diagnostic>,
    pub suggestions: Vec<Diagnostic>,
}

impl ValidationReport {
    fn warn(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    fn suggest(&mut self, diagnostic: Diagnostic) {
        self.suggestions.push(diagnostic);
    }

    /// Append another element's findings; repeats are kept
    fn merge(&mut self, other: ValidationReport) {
        self.warnings.extend(other.warnings);
        self.suggestions.extend(other.suggestions);
    }
}

/// (attribute key, matches as prefix, remediation)
const UNSUPPORTED_ATTRIBUTES: &[(&str, bool, &str)] = &[
    ("layout_align", true, "position children in a Box with Modifier.align(...)"),
    ("drawableLeft", false, "put an Icon before the Text in a Row"),
    ("drawableStart", false, "put an Icon before the Text in a Row"),
    ("drawableRight", false, "put an Icon after the Text in a Row"),
    ("drawableEnd", false, "put an Icon after the Text in a Row"),
    ("drawableTop", false, "put an Icon above the Text in a Column"),
    ("drawableBottom", false, "put an Icon below the Text in a Column"),
    ("layout_behavior", false, "use Scaffold with Modifier.nestedScroll(...)"),
    ("fitsSystemWindows", false, "apply WindowInsets, e.g. Modifier.systemBarsPadding()"),
    ("layout_collapseMode", false, "use a LargeTopAppBar with TopAppBarDefaults.exitUntilCollapsedScrollBehavior()"),
    ("layout_scrollFlags", false, "use a TopAppBarScrollBehavior on the Scaffold top bar"),
];

fn unsupported_remediation(key: &str) -> Option<&'static str> {
    UNSUPPORTED_ATTRIBUTES
        .iter()
        .find(|(name, prefix, _)| if *prefix { key.starts_with(name) } else { key == *name })
        .map(|(_, _, remediation)| *remediation)
}

/// Validate one element without parent context
pub fn validate(tag: &str, attrs: &ResolvedAttributes) -> ValidationReport {
    validate_in_context(tag, attrs, None)
}

pub fn validate_in_context(
    tag: &str,
    attrs: &ResolvedAttributes,
    parent: Option<&str>,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let name = canonical_tag(tag);

    for attr in attrs.iter().filter(|a| a.kind != ValueKind::PreviewOnly) {
        if let Some(remediation) = unsupported_remediation(&attr.key) {
            report.warn(
                Diagnostic::new(
                    DiagnosticKind::Unsupported,
                    format!("<{}> {}=\"{}\" has no Compose equivalent", tag, attr.key, attr.raw),
                )
                .with_remediation(remediation),
            );
        }
        if attr.raw == "fill_parent" {
            report.warn(
                Diagnostic::new(
                    DiagnosticKind::Deprecated,
                    format!("<{}> {}=\"fill_parent\" is deprecated", tag, attr.key),
                )
                .with_remediation("use match_parent; it is converted to fillMax*()"),
            );
        }
    }

    if attrs.get("singleLine").is_some() {
        report.warn(
            Diagnostic::new(
                DiagnosticKind::Deprecated,
                format!("<{}> singleLine is deprecated", tag),
            )
            .with_remediation("use maxLines=\"1\" (maxLines = 1 in Compose)"),
        );
    }

    match name {
        "ScrollView" => report.suggest(
            Diagnostic::new(
                DiagnosticKind::BestPractice,
                format!("<{}> scrolls a Column of fixed content", tag),
            )
            .with_remediation("use LazyColumn when the content is a long or dynamic list"),
        ),
        "RecyclerView" => {
            report.suggest(
                Diagnostic::new(
                    DiagnosticKind::Migration,
                    format!("<{}> should become a LazyColumn or LazyRow", tag),
                )
                .with_remediation("render the adapter's rows with items(list) { item -> ... }"),
            );
            let grid = attrs
                .raw("layoutManager")
                .map(|m| m.contains("GridLayoutManager"))
                .unwrap_or(false);
            if grid {
                report.suggest(
                    Diagnostic::new(
                        DiagnosticKind::Migration,
                        format!("<{}> uses a GridLayoutManager", tag),
                    )
                    .with_remediation("use LazyVerticalGrid(columns = GridCells.Adaptive(minSize = 128.dp))"),
                );
            }
        }
        "ListView" => report.suggest(
            Diagnostic::new(
                DiagnosticKind::Migration,
                format!("<{}> should become a LazyColumn", tag),
            )
            .with_remediation("render the adapter's rows with items(list) { item -> ... }"),
        ),
        "GridView" => report.suggest(
            Diagnostic::new(
                DiagnosticKind::Migration,
                format!("<{}> should become a LazyVerticalGrid", tag),
            )
            .with_remediation("use LazyVerticalGrid(columns = GridCells.Fixed(n)) with items(list)"),
        ),
        "CoordinatorLayout" => report.suggest(
            Diagnostic::new(
                DiagnosticKind::Migration,
                format!("<{}> maps to Scaffold", tag),
            )
            .with_remediation("move app bars, FABs and snackbars into Scaffold slots"),
        ),
        "DrawerLayout" => report.suggest(
            Diagnostic::new(
                DiagnosticKind::Migration,
                format!("<{}> maps to ModalNavigationDrawer", tag),
            )
            .with_remediation("pass the drawer content to ModalNavigationDrawer(drawerContent = { ... })"),
        ),
        "ConstraintLayout" => report.suggest(
            Diagnostic::new(
                DiagnosticKind::Migration,
                format!("<{}> was converted to a Box and its constraints were dropped", tag),
            )
            .with_remediation(
                "add androidx.constraintlayout:constraintlayout-compose and use ConstraintLayout { createRefs() }",
            ),
        ),
        _ => {}
    }

    if name.contains("ViewPager") {
        report.suggest(
            Diagnostic::new(
                DiagnosticKind::Migration,
                format!("<{}> maps to HorizontalPager", tag),
            )
            .with_remediation("HorizontalPager with rememberPagerState requires Compose Foundation 1.4 or newer"),
        );
    }

    if attrs.get("layout_weight").is_some()
        && (name == "LinearLayout" || parent.map(canonical_tag) == Some("LinearLayout"))
    {
        report.suggest(
            Diagnostic::new(
                DiagnosticKind::BestPractice,
                format!("<{}> layout_weight was not converted", tag),
            )
            .with_remediation("use Modifier.weight(1f) inside the Row or Column"),
        );
    }

    if attrs.iter().any(|a| a.raw.contains("@{")) {
        report.suggest(
            Diagnostic::new(
                DiagnosticKind::Migration,
                format!("<{}> uses data binding expressions", tag),
            )
            .with_remediation("hold the values in remember { mutableStateOf(...) } or a ViewModel StateFlow"),
        );
    }

    if is_material_component(tag) {
        report.suggest(
            Diagnostic::new(
                DiagnosticKind::Migration,
                format!("<{}> is a Material component", tag),
            )
            .with_remediation("use the Material 3 composables with Compose BOM 2023.01.00 or newer"),
        );
    }

    report
}

fn is_material_component(tag: &str) -> bool {
    tag.starts_with("com.google.android.material.") || simple_name(tag).starts_with("Material")
}

/// Validate every element and add the whole-document performance tips
pub fn validate_tree(root: &LayoutNode, thresholds: &Thresholds) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut max_depth = 0;
    let mut crowded: Option<(&str, usize)> = None;

    let mut stack: Vec<(&LayoutNode, Option<&str>, usize)> = vec![(root, None, 1)];
    while let Some((node, parent, depth)) = stack.pop() {
        let attrs = ResolvedAttributes::from_node(node);
        report.merge(validate_in_context(&node.tag, &attrs, parent));

        max_depth = max_depth.max(depth);
        if node.children.len() > thresholds.children && crowded.is_none() {
            crowded = Some((node.tag.as_str(), node.children.len()));
        }
        // Reversed so siblings are validated in document order
        for child in node.children.iter().rev() {
            stack.push((child, Some(node.tag.as_str()), depth + 1));
        }
    }

    if max_depth > thresholds.nesting_depth {
        report.suggest(
            Diagnostic::new(
                DiagnosticKind::Performance,
                format!(
                    "layout nesting depth is {} (more than {} levels)",
                    max_depth, thresholds.nesting_depth
                ),
            )
            .with_remediation("flatten the hierarchy by merging wrapper containers into their parent"),
        );
    }
    if let Some((tag, count)) = crowded {
        report.suggest(
            Diagnostic::new(
                DiagnosticKind::Performance,
                format!("<{}> has {} direct children", tag, count),
            )
            .with_remediation("use LazyColumn or LazyRow so only visible items are composed"),
        );
    }

    log::debug!(
        "validation: {} warnings, {} suggestions",
        report.warnings.len(),
        report.suggestions.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(node: &LayoutNode) -> ValidationReport {
        validate(&node.tag, &ResolvedAttributes::from_node(node))
    }

    fn mentions(list: &[Diagnostic], needle: &str) -> bool {
        list.iter().any(|d| d.to_string().contains(needle))
    }

    #[test]
    fn test_unsupported_attributes_warn_with_remediation() {
        let report = check(
            &LayoutNode::new("TextView")
                .with_attr("android:layout_alignParentTop", "true")
                .with_attr("android:drawableLeft", "@drawable/ic_star"),
        );
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings.iter().all(|w| w.kind == DiagnosticKind::Unsupported));
        assert!(report.warnings.iter().all(|w| w.remediation.is_some()));
    }

    #[test]
    fn test_tools_attributes_are_not_validated() {
        let report = check(&LayoutNode::new("TextView").with_attr("tools:layout_alignParentTop", "true"));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_deprecated_values() {
        let report = check(
            &LayoutNode::new("TextView")
                .with_attr("android:layout_width", "fill_parent")
                .with_attr("android:singleLine", "true"),
        );
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings.iter().all(|w| w.kind == DiagnosticKind::Deprecated));
    }

    #[test]
    fn test_recycler_view_suggestions() {
        let report = check(&LayoutNode::new("androidx.recyclerview.widget.RecyclerView"));
        assert!(mentions(&report.suggestions, "LazyColumn or LazyRow"));
        assert_eq!(report.suggestions.len(), 1);

        let grid = check(
            &LayoutNode::new("RecyclerView")
                .with_attr("app:layoutManager", "androidx.recyclerview.widget.GridLayoutManager"),
        );
        assert!(mentions(&grid.suggestions, "GridCells.Adaptive"));
    }

    #[test]
    fn test_container_migrations() {
        assert!(mentions(&check(&LayoutNode::new("ScrollView")).suggestions, "LazyColumn"));
        assert!(mentions(
            &check(&LayoutNode::new("androidx.coordinatorlayout.widget.CoordinatorLayout")).suggestions,
            "Scaffold"
        ));
        assert!(mentions(
            &check(&LayoutNode::new("androidx.drawerlayout.widget.DrawerLayout")).suggestions,
            "ModalNavigationDrawer"
        ));
        let pager = check(&LayoutNode::new("androidx.viewpager2.widget.ViewPager2"));
        assert!(mentions(&pager.suggestions, "HorizontalPager"));
        assert!(mentions(&pager.suggestions, "1.4"));
    }

    #[test]
    fn test_layout_weight_needs_linear_layout() {
        let node = LayoutNode::new("TextView").with_attr("android:layout_weight", "1");
        let attrs = ResolvedAttributes::from_node(&node);
        let in_row = validate_in_context(&node.tag, &attrs, Some("LinearLayout"));
        assert!(mentions(&in_row.suggestions, "Modifier.weight"));
        let in_box = validate_in_context(&node.tag, &attrs, Some("FrameLayout"));
        assert!(in_box.suggestions.is_empty());
    }

    #[test]
    fn test_data_binding_and_material() {
        let report = check(
            &LayoutNode::new("com.google.android.material.button.MaterialButton")
                .with_attr("android:text", "@{viewModel.title}"),
        );
        assert!(mentions(&report.suggestions, "ViewModel"));
        assert!(mentions(&report.suggestions, "Compose BOM"));
    }

    #[test]
    fn test_tree_walk_keeps_repeated_diagnostics() {
        let root = LayoutNode::new("LinearLayout")
            .with_child(LayoutNode::new("RecyclerView"))
            .with_child(LayoutNode::new("FrameLayout").with_child(LayoutNode::new("RecyclerView")));
        let report = validate_tree(&root, &Thresholds::default());
        assert_eq!(report.suggestions.len(), 2);
        assert_eq!(report.suggestions[0], report.suggestions[1]);
        assert!(mentions(&report.suggestions, "LazyColumn"));

        let aligned = || LayoutNode::new("TextView").with_attr("android:layout_alignParentTop", "true");
        let root = LayoutNode::new("RelativeLayout").with_child(aligned()).with_child(aligned());
        let report = validate_tree(&root, &Thresholds::default());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_performance_tips_once_per_document() {
        let mut deep = LayoutNode::new("FrameLayout");
        for _ in 0..11 {
            deep = LayoutNode::new("FrameLayout").with_child(deep);
        }
        let report = validate_tree(&deep, &Thresholds::default());
        let tips: Vec<_> = report
            .suggestions
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Performance)
            .collect();
        assert_eq!(tips.len(), 1);
        assert!(tips[0].message.contains("nesting depth is 12"));

        let mut wide = LayoutNode::new("LinearLayout");
        for _ in 0..21 {
            wide = wide.with_child(LayoutNode::new("LinearLayout").with_child(LayoutNode::new("View")));
        }
        let report = validate_tree(&wide, &Thresholds { nesting_depth: 10, children: 20 });
        assert_eq!(report.suggestions.len(), 1);
        assert!(report.suggestions[0].message.contains("21 direct children"));
    }
}
