//! Gateway 라우팅 확인

use serde::Serialize;

use dg_core::routing::{RouteTable, RouterSettings};

use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
pub struct Resolution {
    pub path: String,
    pub prefix: Option<String>,
    pub target: Option<String>,
}

/// Gateway와 같은 환경변수로 테이블을 만들어 경로를 해석
pub fn resolve(path: &str, format: OutputFormat) -> anyhow::Result<bool> {
    let table = RouterSettings::from_env().build_table()?;
    let resolution = resolve_with(&table, path);

    format.print(&resolution, || match (&resolution.prefix, &resolution.target) {
        (Some(prefix), Some(target)) => format!("{} -> {} (via {})", path, target, prefix),
        _ => format!("{} -> no route (404)", path),
    })?;
    Ok(resolution.target.is_some())
}

fn resolve_with(table: &RouteTable, path: &str) -> Resolution {
    let matched = table.resolve(path);
    Resolution {
        path: path.to_string(),
        prefix: matched.as_ref().map(|m| m.rule.prefix.clone()),
        target: matched.map(|m| m.target),
    }
}
