use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub draw: DrawConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// 管理端配置：密码以 bcrypt 哈希形式存放，会话由 HS256 JWT 签发
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub password_hash: String,
    pub session_secret: String,
    /// 会话有效期 (秒)
    pub session_expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// 同一次 spin 请求内部的提交重试上限
    pub spin_retry_budget: u32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            spin_retry_budget: 3,
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                // 有配置文件：先解析再用环境变量覆盖
                toml::from_str(&config_str).map_err(|e| format!("解析配置文件失败: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件：使用环境变量与默认值构建
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 与管理密码哈希在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL")
                    .ok_or("缺少 DATABASE_URL 环境变量，且未找到配置文件 config.toml")?;
                let password_hash = get_env("ADMIN_PASSWORD_HASH")
                    .ok_or("缺少 ADMIN_PASSWORD_HASH 环境变量，且未找到配置文件 config.toml")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    admin: AdminConfig {
                        password_hash,
                        session_secret: get_env("ADMIN_SESSION_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        session_expires_in: get_env_parse("ADMIN_SESSION_EXPIRES_IN", 28_800i64),
                    },
                    draw: DrawConfig {
                        spin_retry_budget: get_env_parse("SPIN_RETRY_BUDGET", 3u32),
                    },
                }
            }
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD_HASH") {
            config.admin.password_hash = v;
        }
        if let Ok(v) = env::var("ADMIN_SESSION_SECRET") {
            config.admin.session_secret = v;
        }
        if let Ok(v) = env::var("ADMIN_SESSION_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.admin.session_expires_in = n;
        }
        if let Ok(v) = env::var("SPIN_RETRY_BUDGET")
            && let Ok(n) = v.parse()
        {
            config.draw.spin_retry_budget = n;
        }

        Ok(config)
    }
}
