use crate::config::AdminConfig;
use crate::error::{AppError, AppResult};
use crate::models::AdminLoginResponse;
use crate::utils::{SessionService, verify_password};

/// 管理端登录：bcrypt 校验口令，签发 HS256 会话令牌
/// 核心抽奖流程从不接触凭据
#[derive(Clone)]
pub struct AuthService {
    admin: AdminConfig,
    sessions: SessionService,
}

impl AuthService {
    pub fn new(admin: AdminConfig, sessions: SessionService) -> Self {
        Self { admin, sessions }
    }

    pub async fn login(&self, password: &str) -> AppResult<AdminLoginResponse> {
        if password.is_empty() {
            return Err(AppError::ValidationError("password required".to_string()));
        }
        if !verify_password(password, &self.admin.password_hash)? {
            return Err(AppError::AuthError("Invalid password".to_string()));
        }
        let token = self.sessions.issue_admin_token()?;
        Ok(AdminLoginResponse {
            token,
            expires_in: self.sessions.expires_in(),
        })
    }
}
