//! 서비스 health 확인

use std::time::Duration;

use anyhow::Context as _;
use serde::Serialize;
use serde_json::Value;

use crate::output::OutputFormat;

const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct HealthReport {
    url: String,
    status: u16,
    ok: bool,
    body: Value,
}

pub async fn check(base_url: &str, format: OutputFormat) -> anyhow::Result<bool> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let client = reqwest::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .context("failed to build http client")?;

    let resp = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?;
    let status = resp.status();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    let ok = status.is_success() && body["ok"] == Value::Bool(true);

    let report = HealthReport {
        url,
        status: status.as_u16(),
        ok,
        body,
    };
    format.print(&report, || {
        format!(
            "{} {} ({})",
            if report.ok { "OK" } else { "UNHEALTHY" },
            report.url,
            report.status
        )
    })?;
    Ok(ok)
}
