/// Output formatting and assembly
///
/// Text-level passes over the emitted code, the diagnostics block comment,
/// and the final imports + diagnostics + code concatenation.

use regex::Regex;
use std::sync::OnceLock;

use crate::transpiler::attributes::single_line;
use crate::transpiler::diagnostics::Diagnostic;

fn trailing_comma() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",(\s*\n[ \t]*[)}\]])").expect("trailing comma pattern"))
}

fn blank_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("blank line pattern"))
}

fn trailing_spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)[ \t]+$").expect("trailing space pattern"))
}

/// Drop commas right before a closing bracket on the next line, collapse
/// runs of blank lines to one, strip trailing spaces and trim
pub fn format_code(code: &str) -> String {
    let code = trailing_comma().replace_all(code, "$1");
    let code = trailing_spaces().replace_all(&code, "");
    let code = blank_runs().replace_all(&code, "\n\n");
    code.trim().to_string()
}

/// `/* ... */` block listing warnings then suggestions; `None` when both are empty
pub fn diagnostics_comment(warnings: &[Diagnostic], suggestions: &[Diagnostic]) -> Option<String> {
    if warnings.is_empty() && suggestions.is_empty() {
        return None;
    }

    let mut lines = vec!["/*".to_string()];
    let sections = [("Warnings:", warnings), ("Suggestions:", suggestions)];
    for (title, items) in sections.iter().filter(|(_, items)| !items.is_empty()) {
        if lines.len() > 1 {
            lines.push(" *".to_string());
        }
        lines.push(format!(" * {}", title));
        for item in items.iter() {
            lines.push(format!(" *  - {}", single_line(&item.to_string()).replace("*/", "* /")));
        }
    }
    lines.push(" */".to_string());
    Some(lines.join("\n"))
}

/// Join the non-empty parts with one blank line between them
pub fn assemble(imports: &str, diagnostics: Option<&str>, code: &str) -> String {
    let parts: Vec<&str> = [Some(imports), diagnostics, Some(code)]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();
    let mut out = parts.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::diagnostics::DiagnosticKind;

    #[test]
    fn test_trailing_comma_before_closing_bracket() {
        let code = "Text(\n    text = \"a\",\n)\nRow {\n    x,\n}";
        assert_eq!(format_code(code), "Text(\n    text = \"a\"\n)\nRow {\n    x\n}");
    }

    #[test]
    fn test_commas_between_arguments_are_kept() {
        let code = "Text(\n    text = \"a\",\n    fontSize = 24.sp\n)";
        assert_eq!(format_code(code), code);
    }

    #[test]
    fn test_blank_line_runs_collapse() {
        let code = "\n\nA()\n\n\n   \nB()  \n\n";
        assert_eq!(format_code(code), "A()\n\nB()");
    }

    #[test]
    fn test_diagnostics_comment_sections() {
        let warnings = vec![Diagnostic::new(DiagnosticKind::Deprecated, "w1").with_remediation("fix")];
        let suggestions = vec![Diagnostic::new(DiagnosticKind::Migration, "s1")];
        assert_eq!(
            diagnostics_comment(&warnings, &suggestions).unwrap(),
            "/*\n * Warnings:\n *  - w1 (fix)\n *\n * Suggestions:\n *  - s1\n */"
        );
        assert_eq!(
            diagnostics_comment(&[], &suggestions).unwrap(),
            "/*\n * Suggestions:\n *  - s1\n */"
        );
        assert!(diagnostics_comment(&[], &[]).is_none());
    }

    #[test]
    fn test_multiline_message_keeps_one_bullet_line() {
        let warnings = vec![Diagnostic::new(DiagnosticKind::Unsupported, "a\nb")];
        assert_eq!(
            diagnostics_comment(&warnings, &[]).unwrap(),
            "/*\n * Warnings:\n *  - a\\nb\n */"
        );
    }

    #[test]
    fn test_comment_terminator_in_message_is_broken_up() {
        let warnings = vec![Diagnostic::new(DiagnosticKind::Unsupported, "a */ b")];
        let comment = diagnostics_comment(&warnings, &[]).unwrap();
        assert_eq!(comment.matches("*/").count(), 1);
    }

    #[test]
    fn test_assemble_skips_empty_parts() {
        assert_eq!(assemble("import a", None, "code"), "import a\n\ncode\n");
        assert_eq!(assemble("import a", Some("/* d */"), "code"), "import a\n\n/* d */\n\ncode\n");
        assert_eq!(assemble("", None, "code"), "code\n");
    }
}
