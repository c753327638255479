use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use futures::stream::{self, StreamExt};
use miette::{Result, miette};
use neobookings_core::{Gateway, NeobookingsConfig, ResponseEnvelope};
use neobookings_mcp::catalog::{self, ToolSpec};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::output::{Output, format_millis};

/// Latency summary of one benchmarked operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total: usize,
    pub succeeded: usize,
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
    pub median: Duration,
    pub p95: Duration,
    /// Invocations per second over the wall-clock time of the run.
    pub throughput: f64,
}

impl Stats {
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.succeeded as f64 * 100.0 / self.total as f64
        }
    }
}

/// Summarize latencies. `None` when nothing ran.
pub fn summarize(latencies: &[Duration], succeeded: usize, elapsed: Duration) -> Option<Stats> {
    let mut sorted = latencies.to_vec();
    sorted.sort();
    let total = sorted.len();
    let min = *sorted.first()?;
    let max = *sorted.last()?;

    let sum: Duration = sorted.iter().sum();
    let avg_nanos = sum.as_nanos() / total as u128;
    let avg = Duration::from_nanos(u64::try_from(avg_nanos).unwrap_or(u64::MAX));
    let median = if total % 2 == 0 {
        (sorted[total / 2 - 1] + sorted[total / 2]) / 2
    } else {
        sorted[total / 2]
    };
    let p95_index = ((total as f64 * 0.95).ceil() as usize).clamp(1, total) - 1;

    let seconds = elapsed.as_secs_f64();
    let throughput = if seconds > 0.0 { total as f64 / seconds } else { 0.0 };

    Some(Stats {
        total,
        succeeded,
        min,
        max,
        avg,
        median,
        p95: sorted[p95_index],
        throughput,
    })
}

/// Request ids seen more than once across responses.
pub fn duplicate_request_ids(responses: &[ResponseEnvelope]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for id in responses.iter().filter_map(|response| {
        response
            .data_field("request_metadata")
            .and_then(|metadata| metadata.get("RequestId"))
            .and_then(Value::as_str)
    }) {
        if !seen.insert(id) {
            duplicates.push(id.to_string());
        }
    }
    duplicates
}

async fn measure(
    gateway: &Gateway,
    tool: &'static ToolSpec,
    runs: usize,
    concurrent: usize,
) -> (Stats, Vec<ResponseEnvelope>) {
    let started = Instant::now();
    let results: Vec<(Duration, ResponseEnvelope)> = stream::iter(0..runs)
        .map(|run| {
            let gateway = gateway.clone();
            async move {
                let call_started = Instant::now();
                let response = gateway.execute(tool, &Map::new()).await;
                debug!(tool = tool.name, run, success = response.success, "Invocation finished");
                (call_started.elapsed(), response)
            }
        })
        .buffer_unordered(concurrent.max(1))
        .collect()
        .await;
    let elapsed = started.elapsed();

    let latencies: Vec<Duration> = results.iter().map(|(latency, _)| *latency).collect();
    let responses: Vec<ResponseEnvelope> = results.into_iter().map(|(_, response)| response).collect();
    let succeeded = responses.iter().filter(|response| response.success).count();

    let stats = summarize(&latencies, succeeded, elapsed).unwrap_or(Stats {
        total: 0,
        succeeded: 0,
        min: Duration::ZERO,
        max: Duration::ZERO,
        avg: Duration::ZERO,
        median: Duration::ZERO,
        p95: Duration::ZERO,
        throughput: 0.0,
    });
    (stats, responses)
}

/// Fire `runs` invocations per operation with `concurrent` in flight.
pub async fn run(config: NeobookingsConfig, runs: usize, concurrent: usize, quick: bool) -> Result<()> {
    let output = Output::new();
    output.section("Neobookings benchmark");
    output.kv("Base URL", &config.api.base_url);
    output.kv("Runs", &runs.to_string());
    output.kv("Concurrency", &concurrent.to_string());

    let gateway = Gateway::new(Arc::new(config));
    let mut names = vec!["authenticator_rq"];
    if !quick {
        names.push("zone_search_rq");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Operation", "Success", "Min", "Max", "Avg", "Median", "P95", "Throughput",
        ]);

    let mut problems = Vec::new();
    for name in names {
        let tool = catalog::find(name).ok_or_else(|| miette!("{} is not registered", name))?;
        info!(tool = name, runs, concurrent, "Benchmarking");
        let (stats, responses) = measure(&gateway, tool, runs, concurrent).await;

        table.add_row(vec![
            name.to_string(),
            format!("{}/{} ({:.1}%)", stats.succeeded, stats.total, stats.success_rate()),
            format_millis(stats.min),
            format_millis(stats.max),
            format_millis(stats.avg),
            format_millis(stats.median),
            format_millis(stats.p95),
            format!("{:.2} req/s", stats.throughput),
        ]);

        if let Some(failure) = responses.iter().find(|response| !response.success) {
            output.warning(&format!("{}: {}", name, failure.message()));
        }
        let duplicates = duplicate_request_ids(&responses);
        if !duplicates.is_empty() {
            problems.push(format!("{} reused request ids: {}", name, duplicates.join(", ")));
        }
    }
    println!("{table}");

    if problems.is_empty() {
        output.success("Every invocation carried a distinct request id");
        Ok(())
    } else {
        for problem in &problems {
            output.error(problem);
        }
        Err(miette!("benchmark found {} problem(s)", problems.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn summarizes_latencies() {
        let latencies: Vec<Duration> = [40, 10, 30, 20].into_iter().map(ms).collect();
        let stats = summarize(&latencies, 3, Duration::from_secs(2)).unwrap();

        assert_eq!(stats.min, ms(10));
        assert_eq!(stats.max, ms(40));
        assert_eq!(stats.avg, ms(25));
        assert_eq!(stats.median, ms(25));
        assert_eq!(stats.p95, ms(40));
        assert_eq!(stats.throughput, 2.0);
        assert_eq!(stats.success_rate(), 75.0);
    }

    #[test]
    fn odd_counts_take_the_middle_value() {
        let latencies: Vec<Duration> = [5, 1, 3].into_iter().map(ms).collect();
        let stats = summarize(&latencies, 3, Duration::ZERO).unwrap();
        assert_eq!(stats.median, ms(3));
        assert_eq!(stats.throughput, 0.0);
        assert!(summarize(&[], 0, Duration::from_secs(1)).is_none());
    }

    #[test]
    fn average_keeps_sub_millisecond_precision() {
        let latencies = vec![Duration::from_micros(1500), Duration::from_micros(2500)];
        let stats = summarize(&latencies, 2, Duration::from_secs(1)).unwrap();
        assert_eq!(stats.avg, ms(2));
    }

    #[test]
    fn reused_request_ids_are_reported() {
        let response =
            |id: &str| ResponseEnvelope::success(json!({"request_metadata": {"RequestId": id}}), "ok");
        let responses = vec![response("a"), response("b"), response("a")];
        assert_eq!(duplicate_request_ids(&responses), vec!["a".to_string()]);
        assert!(duplicate_request_ids(&responses[..2]).is_empty());
    }
}
