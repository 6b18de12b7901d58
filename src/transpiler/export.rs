/// Kotlin file export: package header and file naming

use crate::transpiler::codegen::pascal_case;
use crate::transpiler::ConversionResult;

pub const DEFAULT_PACKAGE: &str = "com.example.app.ui";
pub const DEFAULT_FILE_NAME: &str = "ComposableScreen.kt";
pub const DEFAULT_FUNCTION_NAME: &str = "ComposableScreen";

/// Body of a `.kt` file: optional `package` line, a blank line, the code
pub fn wrap_for_export(result: &ConversionResult, package: Option<&str>) -> String {
    match package {
        Some(package) => format!("package {}\n\n{}", package, result.code),
        None => result.code.clone(),
    }
}

/// `activity_main` -> `ActivityMainScreen`; `login_screen` -> `LoginScreen`
pub fn function_name_for(stem: &str) -> String {
    let name = pascal_case(stem);
    if name.is_empty() {
        return DEFAULT_FUNCTION_NAME.to_string();
    }
    // Kotlin identifiers cannot start with a digit
    let name = if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Layout{}", name)
    } else {
        name
    };
    if name.ends_with("Screen") {
        name
    } else {
        format!("{}Screen", name)
    }
}

pub fn file_name_for(stem: &str) -> String {
    format!("{}.kt", function_name_for(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_with_package() {
        let result = ConversionResult {
            imports: String::new(),
            code: "@Composable\nfun ComposableScreen() {}\n".to_string(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
        };
        assert_eq!(
            wrap_for_export(&result, Some(DEFAULT_PACKAGE)),
            "package com.example.app.ui\n\n@Composable\nfun ComposableScreen() {}\n"
        );
        assert_eq!(wrap_for_export(&result, None), result.code);
    }

    #[test]
    fn test_names_from_layout_stem() {
        assert_eq!(function_name_for("activity_main"), "ActivityMainScreen");
        assert_eq!(function_name_for("login_screen"), "LoginScreen");
        assert_eq!(function_name_for("2pane"), "Layout2paneScreen");
        assert_eq!(function_name_for("__"), "ComposableScreen");
        assert_eq!(file_name_for("item_row"), "ItemRowScreen.kt");
    }
}
