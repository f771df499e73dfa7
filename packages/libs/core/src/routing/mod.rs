//! 경로 라우터
//!
//! `<prefix>/api/...` 형태의 요청 경로를 서비스별 백엔드 URL로 바꿉니다.
//! 경로와 쿼리 문자열은 그대로 유지되며 base URL만 앞에 붙습니다.
//!
//! # 모듈 구조
//!
//! - `table`: 규칙 검증과 longest-prefix 매칭
//! - `settings`: 환경변수 기반 설정과 fallback 주소

mod settings;
mod table;

pub use settings::{
    BackendSetting, RouterSettings, ADMIN_BACKEND_ENV, ADMIN_PREFIX, DEFAULT_ADMIN_BACKEND_URL,
    DEFAULT_INVENTORY_BACKEND_URL, INVENTORY_BACKEND_ENV, INVENTORY_PREFIX,
};
pub use table::{RouteMatch, RouteRule, RouteTable, API_SEGMENT};
