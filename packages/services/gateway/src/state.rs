//! Gateway 앱 상태

use std::time::Duration;

use dg_core::routing::RouteTable;

use crate::config::Config;

/// 앱 상태
///
/// 기동 시 한 번 만들어지고 모든 요청이 읽기 전용으로 공유합니다.
pub struct AppState {
    /// 설정
    pub config: Config,

    /// 검증된 라우팅 테이블
    pub routes: RouteTable,

    /// 백엔드 HTTP 클라이언트
    pub client: reqwest::Client,
}

impl AppState {
    /// 새 상태 생성
    ///
    /// 라우팅 설정이 잘못되었으면 에러를 돌려주며, 서버는 기동하지 않습니다.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let routes = config.router.build_table()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            config: config.clone(),
            routes,
            client,
        })
    }
}
