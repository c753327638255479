use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use miette::{Result, miette};
use neobookings_core::{Gateway, NeobookingsConfig, ResponseEnvelope};
use neobookings_mcp::catalog::{self, Category, ToolSpec};
use neobookings_mcp::server::input_schema;
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use crate::commands::tools::parse_category;
use crate::output::{Output, format_millis};

/// Read-only operations exercised unless `--quick` is given.
const SAMPLES: &[(&str, &str)] = &[
    ("zone_search_rq", r#"{}"#),
    ("hotel_search_rq", r#"{}"#),
    ("budget_search_rq", r#"{"order_by": "creationdate", "order_type": "desc", "num_results": 1}"#),
];

struct Check {
    name: String,
    passed: bool,
    duration: Duration,
    detail: String,
}

async fn timed<F, Fut>(name: impl Into<String>, check: F) -> Check
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<String, String>>,
{
    let started = Instant::now();
    let outcome = check().await;
    let duration = started.elapsed();
    let (passed, detail) = match outcome {
        Ok(detail) => (true, detail),
        Err(detail) => (false, detail),
    };
    Check {
        name: name.into(),
        passed,
        duration,
        detail,
    }
}

/// Structural checks over the catalog: unique names, closed schemas, a
/// language argument and a well-formed endpoint on every tool.
pub fn catalog_integrity(category: Option<Category>) -> std::result::Result<String, String> {
    let tools: Vec<&ToolSpec> = catalog::all()
        .filter(|tool| category.is_none_or(|wanted| tool.category == wanted))
        .collect();

    let mut names = HashSet::new();
    for tool in &tools {
        if !names.insert(tool.name) {
            return Err(format!("duplicate tool name {}", tool.name));
        }
        if !tool.endpoint.starts_with('/') || !tool.endpoint.ends_with("RQ") {
            return Err(format!("{} has a malformed endpoint {}", tool.name, tool.endpoint));
        }
        let schema = input_schema(tool);
        if schema.get("additionalProperties") != Some(&json!(false)) {
            return Err(format!("{} accepts undeclared arguments", tool.name));
        }
        if schema.get("properties").and_then(|properties| properties.get("language")).is_none() {
            return Err(format!("{} has no language argument", tool.name));
        }
    }

    match category {
        Some(category) => Ok(format!("{} tools in {}", tools.len(), category.label())),
        None => Ok(format!("{} tools in {} categories", tools.len(), Category::ALL.len())),
    }
}

/// Sample operations to run for an optional category filter.
pub fn samples(category: Option<Category>) -> Vec<(&'static ToolSpec, Map<String, Value>)> {
    SAMPLES
        .iter()
        .filter_map(|(name, arguments)| {
            let tool = catalog::find(name)?;
            let arguments: Map<String, Value> = serde_json::from_str(arguments).ok()?;
            Some((tool, arguments))
        })
        .filter(|(tool, _)| category.is_none_or(|wanted| tool.category == wanted))
        .collect()
}

fn outcome(response: &ResponseEnvelope) -> std::result::Result<String, String> {
    if response.success {
        Ok(response.message().to_string())
    } else {
        Err(response.message().to_string())
    }
}

/// Run every check and print a summary table. Fails if any check fails.
pub async fn run(config: NeobookingsConfig, quick: bool, category: Option<&str>) -> Result<()> {
    let category = category.map(parse_category).transpose()?;
    let output = Output::new();
    output.section("Neobookings health check");
    output.kv("Base URL", &config.api.base_url);
    output.kv("Username", &config.credentials.username);

    let config = Arc::new(config);
    let gateway = Gateway::new(config.clone());
    let mut checks = Vec::new();

    checks.push(
        timed("Configuration", || async {
            config
                .validate()
                .map(|_| {
                    format!(
                        "timeout {}s, token cache {}",
                        config.api.timeout_secs, config.token_cache.enabled
                    )
                })
                .map_err(|error| error.to_string())
        })
        .await,
    );

    checks.push(timed("Tool catalog", || async { catalog_integrity(category) }).await);

    checks.push(
        timed("Local validation", || async {
            let Some(tool) = catalog::find("basket_summary_rq") else {
                return Err("basket_summary_rq is not registered".to_string());
            };
            let response = gateway.execute(tool, &Map::new()).await;
            if !response.success && response.message().starts_with("Validation error") {
                Ok("missing arguments rejected before any request".to_string())
            } else {
                Err(format!("unexpected outcome: {}", response.message()))
            }
        })
        .await,
    );

    checks.push(
        timed("Authentication", || async {
            let Some(tool) = catalog::find("authenticator_rq") else {
                return Err("authenticator_rq is not registered".to_string());
            };
            outcome(&gateway.execute(tool, &Map::new()).await)
        })
        .await,
    );

    if !quick {
        for (tool, arguments) in samples(category) {
            let gateway = &gateway;
            let check = timed(tool.name, || async move {
                outcome(&gateway.execute(tool, &arguments).await)
            });
            checks.push(check.await);
        }
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Check", "Status", "Duration", "Detail"]);
    for check in &checks {
        let status = if check.passed {
            Cell::new("PASS").fg(Color::Green)
        } else {
            Cell::new("FAIL").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(&check.name),
            status,
            Cell::new(format_millis(check.duration)),
            Cell::new(&check.detail),
        ]);
    }
    println!("{table}");

    let failed = checks.iter().filter(|check| !check.passed).count();
    let total_time: Duration = checks.iter().map(|check| check.duration).sum();
    info!(checks = checks.len(), failed, "Health check finished");

    if failed == 0 {
        output.success(&format!("All {} checks passed in {}", checks.len(), format_millis(total_time)));
        Ok(())
    } else {
        warn!(failed, "Health check reported failures");
        output.error(&format!("{} of {} checks failed", failed, checks.len()));
        Err(miette!("{} health check(s) failed", failed))
    }
}
