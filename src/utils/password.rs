use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// 对密码进行哈希（用于离线生成 admin.password_hash 配置）
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("密码哈希失败: {}", e)))
}

/// 校验密码与哈希是否匹配
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    verify(password, password_hash)
        .map_err(|e| AppError::InternalError(format!("密码校验失败: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("s3cret-Admin").unwrap();
        assert!(verify_password("s3cret-Admin", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }
}
