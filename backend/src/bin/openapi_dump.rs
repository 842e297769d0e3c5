//! Print the OpenAPI document as JSON.

use std::io::Write;

use ballot_backend::ApiDoc;
use color_eyre::eyre::{Result, WrapErr};
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialize OpenAPI document")?;
    writeln!(std::io::stdout().lock(), "{json}").wrap_err("write OpenAPI document")
}
