//! 인가 게이트
//!
//! 요청의 principal과 허용 role 집합만 보고 통과 여부를 결정합니다.
//! 부수 효과가 없고 상태를 가지지 않으므로 같은 입력에는 항상 같은 결과를
//! 돌려줍니다.

use crate::auth::Principal;
use crate::error::{Error, Result};
use crate::policy::AllowSet;
use crate::roles::{AdminRole, Role};

/// 기본 거부 메시지
pub const INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions";

/// admin 접근 게이트 거부 메시지
pub const ADMIN_ACCESS_REQUIRED: &str = "Access denied. Admin privileges required.";

/// 게이트 판정 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Authorized,
    Unauthenticated,
    Forbidden { message: String },
}

impl Decision {
    /// `Result`로 변환
    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Authorized => Ok(()),
            Decision::Unauthenticated => Err(Error::Unauthenticated),
            Decision::Forbidden { message } => Err(Error::Forbidden { message }),
        }
    }
}

/// 하나의 허용 집합에 묶인 게이트
#[derive(Debug, Clone)]
pub struct Gate<R: Role> {
    allowed: AllowSet<R>,
    message: String,
}

impl<R: Role> Gate<R> {
    /// 허용 집합에 묶인 게이트 생성
    pub fn require_role(allowed: AllowSet<R>) -> Self {
        Self {
            allowed,
            message: INSUFFICIENT_PERMISSIONS.to_string(),
        }
    }

    /// 거부 메시지 지정
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn allowed(&self) -> &AllowSet<R> {
        &self.allowed
    }

    /// 판정
    ///
    /// principal이 없으면 미인증과 동일하게 취급합니다. role이 없거나 집합에
    /// 없으면 거부합니다.
    pub fn check(&self, principal: Option<&Principal<R>>) -> Decision {
        match principal {
            None | Some(Principal::Unauthenticated) => Decision::Unauthenticated,
            Some(Principal::Authenticated { role: Some(role), .. })
                if self.allowed.contains(*role) =>
            {
                Decision::Authorized
            }
            Some(Principal::Authenticated { .. }) => Decision::Forbidden {
                message: self.message.clone(),
            },
        }
    }

    /// 판정 후 에러로 변환
    pub fn enforce(&self, principal: Option<&Principal<R>>) -> Result<()> {
        self.check(principal).into_result()
    }
}

impl Gate<AdminRole> {
    /// admin 계열 role 전체를 허용하는 일괄 접근 게이트
    pub fn require_admin_access() -> Self {
        Self::require_role(AllowSet::any_admin()).with_message(ADMIN_ACCESS_REQUIRED)
    }

    pub fn require_any_admin() -> Self {
        Self::require_role(AllowSet::any_admin())
    }

    pub fn require_super_admin() -> Self {
        Self::require_role(AllowSet::super_admin_only())
    }
}
