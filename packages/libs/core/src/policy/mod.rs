//! Role 정책
//!
//! # 개요
//!
//! operation마다 호출 가능한 role 집합을 선언합니다. 정책은 기동 시 코드로
//! 선언되거나 YAML 문서로 덮어써지며, 이후에는 변경되지 않습니다.
//!
//! # 모듈 구조
//!
//! - `allow_set`: 허용 role 집합
//! - `table`: operation → 허용 집합 테이블
//! - `document`: YAML 정책 문서
//! - `defaults`: 애플리케이션별 기본 정책

mod allow_set;
pub mod defaults;
mod document;
mod table;

pub use allow_set::AllowSet;
pub use defaults::{admin_policy, inventory_policy};
pub use document::PolicyDocument;
pub use table::{RolePolicy, RolePolicyBuilder};
