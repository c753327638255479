use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use miette::{IntoDiagnostic, Result, miette};
use neobookings_mcp::catalog::{self, Category};
use neobookings_mcp::error::McpError;
use neobookings_mcp::server::input_schema;
use owo_colors::OwoColorize;

use crate::output::Output;

/// Parse a `--category` value.
pub fn parse_category(value: &str) -> Result<Category> {
    value.parse::<Category>().map_err(|message| miette!("{}", message))
}

/// List tools grouped by category
pub fn list(category: Option<&str>) -> Result<()> {
    let output = Output::new();
    let categories = match category {
        Some(value) => vec![parse_category(value)?],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        let tools = category.tools();
        output.section(&format!("{} ({} tools)", category.label(), tools.len()));

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Tool", "Endpoint", "Title"]);
        for tool in tools {
            table.add_row(vec![tool.name, tool.endpoint, tool.title]);
        }
        println!("{table}");
    }
    Ok(())
}

/// Show one tool with its input schema
pub fn show(name: &str) -> Result<()> {
    let Some(tool) = catalog::find(name) else {
        return Err(McpError::tool_not_found(name).into());
    };

    let output = Output::new();
    output.section(tool.title);
    output.kv("Name", &tool.name.bright_yellow().to_string());
    output.kv("Endpoint", tool.endpoint);
    output.kv("Category", tool.category.label());
    println!();
    println!("  {}", tool.description);

    let required: Vec<&str> = tool
        .params
        .iter()
        .filter(|param| param.required)
        .map(|param| param.name)
        .collect();
    if !required.is_empty() {
        output.section("Required arguments");
        for name in required {
            output.list_item(name);
        }
    }

    output.section("Input schema");
    let schema = serde_json::to_string_pretty(&input_schema(tool)).into_diagnostic()?;
    println!("{}", schema);
    Ok(())
}
