//! Print the OpenAPI document as JSON.

use clap::Parser;
use users_api::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the users API OpenAPI document", version)]
struct CliArgs {
    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), serde_json::Error> {
    let args = CliArgs::parse();
    let doc = ApiDoc::openapi();
    let rendered = if args.pretty {
        doc.to_pretty_json()?
    } else {
        doc.to_json()?
    };
    println!("{rendered}");
    Ok(())
}
