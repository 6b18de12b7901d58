use axum::{
    extract::Json,
    response::Json as JsonResponse,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use xml2compose::config::{validate_function_name, validate_package_name};
use xml2compose::transpiler::diagnostics::Diagnostic;
use xml2compose::transpiler::export::wrap_for_export;
use xml2compose::{convert_with_options, ConvertOptions};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Deserialize)]
struct ConvertRequest {
    xml: String,
    /// Name of the generated composable (`ComposableScreen` when absent)
    function_name: Option<String>,
    /// Prepend a `package` line to the output
    package: Option<String>,
}

#[derive(Serialize)]
struct ConvertResponse {
    success: bool,
    output: String,
    imports: String,
    warnings: Vec<Diagnostic>,
    suggestions: Vec<Diagnostic>,
}

async fn convert(Json(req): Json<ConvertRequest>) -> JsonResponse<ConvertResponse> {
    let mut options = ConvertOptions::default();
    // Names that are not Kotlin identifiers fall back to the default
    if let Some(name) = req
        .function_name
        .filter(|n| validate_function_name(n).is_ok())
    {
        options.function_name = name;
    }
    let package = req
        .package
        .filter(|p| validate_package_name(p).is_ok());

    let result = convert_with_options(&req.xml, &options);
    let output = wrap_for_export(&result, package.as_deref());

    JsonResponse(ConvertResponse {
        success: !result.is_failure(),
        output,
        imports: result.imports,
        warnings: result.warnings,
        suggestions: result.suggestions,
    })
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let addr = std::env::var("PLAYGROUND_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let app = Router::new()
        .route("/api/convert", post(convert))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("xml2compose playground backend running on http://{}", addr);
    println!("   API endpoint: POST /api/convert");
    println!();

    axum::serve(listener, app).await
}
