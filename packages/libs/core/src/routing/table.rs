//! 경로 prefix 기반 라우팅 테이블

use url::Url;

use crate::error::{Error, Result};

/// API 경로 구분자. `<prefix>/api/...` 형태만 라우팅 대상입니다.
pub const API_SEGMENT: &str = "/api";

/// 라우팅 규칙
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    /// 서비스 prefix (예: `/admin`)
    pub prefix: String,

    /// 대상 서비스 base URL (끝의 `/` 제거됨)
    pub base_url: String,
}

impl RouteRule {
    /// 검증 후 규칙 생성
    ///
    /// `name`은 에러 메시지에 쓰이는 설정 이름입니다 (예: 환경변수 이름).
    pub fn new(name: &str, prefix: &str, base_url: &str) -> Result<Self> {
        Ok(Self {
            prefix: validate_prefix(prefix)?,
            base_url: validate_base_url(name, base_url)?,
        })
    }

    /// 이 규칙이 받는 경로의 시작 (`<prefix>/api`)
    pub fn api_root(&self) -> String {
        format!("{}{}", self.prefix, API_SEGMENT)
    }

    /// `path_and_query`가 이 규칙에 해당하는지 확인
    ///
    /// `<prefix>/api` 뒤에는 경로 끝, `/`, `?` 중 하나가 와야 합니다.
    fn matches(&self, path_and_query: &str) -> bool {
        let root = self.api_root();
        match path_and_query.strip_prefix(root.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }
}

/// 라우팅 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub rule: &'a RouteRule,

    /// 전달할 전체 URL (`base_url + path_and_query`)
    pub target: String,
}

impl RouteMatch<'_> {
    /// 대상 URL 파싱
    ///
    /// 파싱 과정의 경로 정규화 후에도 `<base path><prefix>/api` 아래에 있어야
    /// 합니다.
    pub fn target_url(&self) -> Result<Url> {
        let invalid = |reason: String| Error::InvalidPath {
            path: self.target.clone(),
            reason,
        };

        let url = Url::parse(&self.target).map_err(|e| invalid(e.to_string()))?;
        let base = Url::parse(&self.rule.base_url).map_err(|e| invalid(e.to_string()))?;
        let root = format!("{}{}", base.path().trim_end_matches('/'), self.rule.api_root());

        let inside = url
            .path()
            .strip_prefix(root.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
        if !inside {
            return Err(invalid(format!("resolves outside of {}", root)));
        }
        Ok(url)
    }
}

/// 기동 시 한 번 만들어지는 라우팅 테이블
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// prefix가 겹치면 설정 에러
    pub fn new(rules: Vec<RouteRule>) -> Result<Self> {
        for (i, first) in rules.iter().enumerate() {
            for second in &rules[i + 1..] {
                if prefixes_overlap(&first.prefix, &second.prefix) {
                    return Err(Error::OverlappingPrefix {
                        first: first.prefix.clone(),
                        second: second.prefix.clone(),
                    });
                }
            }
        }

        // 긴 prefix 우선
        let mut rules = rules;
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Ok(Self { rules })
    }

    /// 경로(+쿼리)에 해당하는 규칙을 찾아 대상 URL을 만든다
    ///
    /// 일치하는 규칙이 없으면 `None` (재작성하지 않음). `.`/`..` 세그먼트가
    /// 있는 경로는 어떤 규칙과도 일치하지 않습니다.
    pub fn resolve<'a>(&'a self, path_and_query: &str) -> Option<RouteMatch<'a>> {
        if has_dot_segment(path_and_query) {
            return None;
        }

        self.rules
            .iter()
            .find(|rule| rule.matches(path_and_query))
            .map(|rule| RouteMatch {
                rule,
                target: format!("{}{}", rule.base_url, path_and_query),
            })
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }
}

fn validate_prefix(prefix: &str) -> Result<String> {
    let invalid = |reason: &str| Error::InvalidPrefix {
        prefix: prefix.to_string(),
        reason: reason.to_string(),
    };

    if !prefix.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if prefix == "/" {
        return Err(invalid("root prefix would capture every path"));
    }
    if prefix.ends_with('/') {
        return Err(invalid("must not end with '/'"));
    }
    if prefix.contains(['?', '#']) || prefix.contains("//") {
        return Err(invalid("must be a plain path"));
    }
    Ok(prefix.to_string())
}

fn validate_base_url(name: &str, raw: &str) -> Result<String> {
    let invalid = |reason: String| Error::InvalidBaseUrl {
        name: name.to_string(),
        url: raw.to_string(),
        reason,
    };

    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment".to_string()));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// `.`, `..` 세그먼트 여부 (`%2e` 인코딩, 역슬래시 구분자 포함)
fn has_dot_segment(path_and_query: &str) -> bool {
    let path = path_and_query.split(['?', '#']).next().unwrap_or_default();
    path.split(['/', '\\']).any(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        decoded == "." || decoded == ".."
    })
}

/// 경로 세그먼트 단위로 한쪽이 다른 쪽의 prefix이면 겹친다
fn prefixes_overlap(a: &str, b: &str) -> bool {
    let is_segment_prefix = |short: &str, long: &str| {
        long.strip_prefix(short)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    };
    is_segment_prefix(a, b) || is_segment_prefix(b, a)
}
