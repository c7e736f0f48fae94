//! services/api/src/bin/openapi.rs
//!
//! Dumps the API contract to `openapi.json` without starting the server,
//! for client generation and contract review in CI.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const OUTPUT_PATH: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let document = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(OUTPUT_PATH, document)?;
    println!("Wrote OpenAPI document to {}", OUTPUT_PATH);
    Ok(())
}
