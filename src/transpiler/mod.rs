/// Android XML layout to Jetpack Compose transpiler
pub mod ast;
pub mod attributes;
pub mod codegen;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod format;
pub mod imports;
pub mod mapper;
pub mod modifiers;
pub mod parser;
pub mod validator;

use serde::Serialize;

use crate::transpiler::codegen::ComposeEmitter;
use crate::transpiler::diagnostics::{Diagnostic, DiagnosticKind};
use crate::transpiler::error::ConvertError;
use crate::transpiler::parser::{parse_layout, ParseLimits};
use crate::transpiler::validator::{validate_tree, Thresholds};

/// Knobs for one conversion; `Default` matches the documented defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub function_name: String,
    pub limits: ParseLimits,
    pub thresholds: Thresholds,
    /// Keep at most this many suggestions (all when `None`)
    pub max_suggestions: Option<usize>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            function_name: export::DEFAULT_FUNCTION_NAME.to_string(),
            limits: ParseLimits::default(),
            thresholds: Thresholds::default(),
            max_suggestions: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// The sorted import block (empty when conversion failed)
    pub imports: String,
    /// Complete output text: imports, diagnostics comment, composable function
    pub code: String,
    pub warnings: Vec<Diagnostic>,
    pub suggestions: Vec<Diagnostic>,
}

impl ConversionResult {
    /// Whether the input was rejected and `code` holds the error stub
    pub fn is_failure(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w.kind, DiagnosticKind::Syntax | DiagnosticKind::Limit))
    }
}

/// Convert an XML layout with default options
pub fn convert_xml_to_compose(xml: &str) -> ConversionResult {
    convert_with_options(xml, &ConvertOptions::default())
}

/// Convert an XML layout. Never fails: rejected input produces an error
/// comment, a stub composable, and one warning describing the problem.
pub fn convert_with_options(xml: &str, options: &ConvertOptions) -> ConversionResult {
    match try_convert(xml, options) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("conversion rejected: {}", err);
            failure_result(&err, &options.function_name)
        }
    }
}

fn try_convert(xml: &str, options: &ConvertOptions) -> Result<ConversionResult, ConvertError> {
    let document = parse_layout(xml, &options.limits)?;

    let report = validate_tree(&document.root, &options.thresholds);
    let import_set = imports::collect(&document.root);

    let body = ComposeEmitter::new(options.limits.max_depth).emit(&document.root, 1)?;
    let mut function = String::new();
    if import_set.needs_experimental_opt_in() {
        function.push_str("@OptIn(ExperimentalMaterial3Api::class)\n");
    }
    function.push_str(&format!(
        "@Composable\nfun {}() {{\n{}}}\n",
        options.function_name, body
    ));
    let function = format::format_code(&function);

    let warnings = report.warnings;
    let mut suggestions = report.suggestions;
    if let Some(cap) = options.max_suggestions {
        suggestions.truncate(cap);
    }

    let imports = import_set.render();
    let comment = format::diagnostics_comment(&warnings, &suggestions);
    let code = format::assemble(&imports, comment.as_deref(), &function);

    log::debug!(
        "converted <{}>: {} elements, {} warnings, {} suggestions",
        document.root.tag,
        document.node_count,
        warnings.len(),
        suggestions.len()
    );

    Ok(ConversionResult {
        imports,
        code,
        warnings,
        suggestions,
    })
}

fn failure_result(err: &ConvertError, function_name: &str) -> ConversionResult {
    let (headline, hint, kind) = if err.is_limit() {
        (
            format!("XML too large: {}", err),
            "Split the layout into smaller files or raise max_depth / max_nodes.",
            DiagnosticKind::Limit,
        )
    } else {
        (
            format!("XML parse error: {}", err),
            "Check that every tag is closed and every attribute value is quoted.",
            DiagnosticKind::Syntax,
        )
    };

    let code = format!(
        "// {}\n// {}\nimport androidx.compose.material3.Text\nimport androidx.compose.runtime.Composable\n\n@Composable\nfun {}() {{\n    Text(\"Conversion failed\")\n}}\n",
        headline, hint, function_name
    );

    ConversionResult {
        imports: String::new(),
        code,
        warnings: vec![Diagnostic::new(kind, headline)],
        suggestions: Vec::new(),
    }
}
