//! 정책 조회

use std::path::Path;

use serde::Serialize;

use dg_core::policy::{admin_policy, inventory_policy, PolicyDocument, RolePolicy};
use dg_core::roles::Role;

use crate::output::OutputFormat;
use crate::App;

fn load<R: Role>(
    defaults: fn() -> dg_core::Result<RolePolicy<R>>,
    file: Option<&Path>,
) -> anyhow::Result<RolePolicy<R>> {
    Ok(defaults()?.with_override_file(file)?)
}

pub fn show(app: App, file: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    match app {
        App::Admin => print_policy(&load(admin_policy, file)?, format),
        App::Inventory => print_policy(&load(inventory_policy, file)?, format),
    }
}

fn print_policy<R: Role>(policy: &RolePolicy<R>, format: OutputFormat) -> anyhow::Result<()> {
    format.print(&PolicyDocument::from_policy(policy), || render_table(policy))
}

fn render_table<R: Role>(policy: &RolePolicy<R>) -> String {
    let width = policy
        .operations()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    policy
        .operations()
        .map(|(name, roles)| format!("{:<width$}  {}", name, roles, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub universe: &'static str,
    pub role: String,
    pub operation: String,
    pub allowed: bool,
    pub allow_set: Vec<String>,
}

/// 허용 여부를 출력하고 반환
///
/// 정책에 없는 operation은 거부가 아니라 에러입니다.
pub fn check(
    app: App,
    role: &str,
    operation: &str,
    file: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let result = match app {
        App::Admin => evaluate(&load(admin_policy, file)?, role, operation)?,
        App::Inventory => evaluate(&load(inventory_policy, file)?, role, operation)?,
    };

    format.print(&result, || {
        let verdict = if result.allowed { "ALLOW" } else { "DENY" };
        format!(
            "{} {} -> {} (allowed: {})",
            verdict,
            result.role,
            result.operation,
            result.allow_set.join(", ")
        )
    })?;
    Ok(result.allowed)
}

fn evaluate<R: Role>(
    policy: &RolePolicy<R>,
    role: &str,
    operation: &str,
) -> anyhow::Result<CheckResult> {
    let allow_set = policy.allow_set(operation).ok_or_else(|| {
        anyhow::anyhow!(
            "Operation '{}' is not declared in the {} policy",
            operation,
            R::UNIVERSE
        )
    })?;

    Ok(CheckResult {
        universe: R::UNIVERSE,
        role: role.to_string(),
        operation: operation.to_string(),
        allowed: policy.is_allowed(role, operation),
        allow_set: allow_set
            .roles()
            .iter()
            .map(|r| r.as_str().to_string())
            .collect(),
    })
}
