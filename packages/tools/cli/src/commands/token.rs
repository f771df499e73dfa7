//! 개발용 토큰

use serde::Serialize;

use dg_core::auth::{encode_dev_token, PrincipalClaims};

use crate::output::OutputFormat;

#[derive(Serialize)]
struct Encoded<'a> {
    token: String,
    claims: &'a PrincipalClaims,
}

/// 서명 없는 토큰 출력. 로컬 서비스의 `DevTokenResolver`만 받아들입니다.
pub fn encode(
    sub: &str,
    role: Option<String>,
    ttl: Option<i64>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let claims = build_claims(sub, role, ttl)?;
    let token = encode_dev_token(&claims)?;
    format.print(
        &Encoded {
            token: token.clone(),
            claims: &claims,
        },
        || token.clone(),
    )
}

fn build_claims(
    sub: &str,
    role: Option<String>,
    ttl: Option<i64>,
) -> anyhow::Result<PrincipalClaims> {
    if sub.trim().is_empty() {
        anyhow::bail!("--sub must not be empty");
    }

    let claims = PrincipalClaims::new(sub, role);
    match ttl {
        Some(ttl) => {
            anyhow::ensure!(ttl > 0, "--ttl must be positive");
            Ok(claims.with_ttl(ttl)?)
        }
        None => Ok(claims),
    }
}
