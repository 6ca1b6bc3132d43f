use crate::rules::ReportRules;
use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// 环境变量前缀, 例如 `COST_REPORT__EMAIL__SMTP_HOST`
pub const ENV_PREFIX: &str = "COST_REPORT";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 源数据库 (MySQL) 连接参数
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    /// 慢查询日志阈值 (秒)
    pub slow_statement_secs: u64,
    pub acquire_timeout_secs: u64,
}

/// 邮件中继与收件人
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    /// 发件人, 缺省时使用 SMTP 用户名
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 是否附带 CSV 明细
    #[serde(default)]
    pub attach_csv: bool,
    #[serde(default)]
    pub rules: ReportRules,
}

// 日志中不输出密码
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("slow_statement_secs", &self.slow_statement_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("cc", &self.cc)
            .finish()
    }
}

impl EmailConfig {
    /// 实际发件地址
    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 3306,
                username: String::new(),
                password: String::new(),
                database: "lis_plus_2_0".to_string(),
                slow_statement_secs: 5,
                acquire_timeout_secs: 30,
            },
            email: EmailConfig {
                smtp_host: "localhost".to_string(),
                smtp_port: 587,
                username: String::new(),
                password: String::new(),
                from: None,
                to: Vec::new(),
                cc: Vec::new(),
            },
            report: ReportConfig::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> config/cost_report.* (可选) -> 环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config: Self = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("database.host", defaults.database.host)?
            .set_default("database.port", i64::from(defaults.database.port))?
            .set_default("database.username", defaults.database.username)?
            .set_default("database.password", defaults.database.password)?
            .set_default("database.database", defaults.database.database)?
            .set_default("database.slow_statement_secs", defaults.database.slow_statement_secs as i64)?
            .set_default("database.acquire_timeout_secs", defaults.database.acquire_timeout_secs as i64)?
            .set_default("email.smtp_host", defaults.email.smtp_host)?
            .set_default("email.smtp_port", i64::from(defaults.email.smtp_port))?
            .set_default("email.username", defaults.email.username)?
            .set_default("email.password", defaults.email.password)?
            .add_source(File::with_name("config/cost_report").required(false))
            .add_source(
                env.separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("email.to")
                    .with_list_parse_key("email.cc"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// 基本校验: 至少一个收件人
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.email.to.iter().all(|addr| addr.trim().is_empty()) {
            return Err(ConfigError::Message(
                "email.to must contain at least one recipient".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn loads_recipient_lists_from_environment() {
        let config = AppConfig::load(env_from(&[
            ("COST_REPORT__EMAIL__TO", "ops@example.com,finance@example.com"),
            ("COST_REPORT__EMAIL__CC", "audit@example.com"),
            ("COST_REPORT__EMAIL__SMTP_PORT", "2525"),
            ("COST_REPORT__DATABASE__HOST", "db.internal"),
        ]))
        .unwrap();

        assert_eq!(config.email.to, vec!["ops@example.com", "finance@example.com"]);
        assert_eq!(config.email.cc, vec!["audit@example.com"]);
        assert_eq!(config.email.smtp_port, 2525);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 3306);
        assert!(!config.report.attach_csv);
    }

    #[test]
    fn rejects_missing_recipients() {
        let err = AppConfig::load(env_from(&[])).unwrap_err();
        assert!(err.to_string().contains("email.to"));
    }

    #[test]
    fn sender_falls_back_to_username() {
        let mut email = AppConfig::default().email;
        email.username = "reports@example.com".to_string();
        assert_eq!(email.sender(), "reports@example.com");

        email.from = Some("noreply@example.com".to_string());
        assert_eq!(email.sender(), "noreply@example.com");
    }

    #[test]
    fn debug_output_hides_passwords() {
        let mut config = AppConfig::default();
        config.database.password = "db-secret".to_string();
        config.email.password = "mail-secret".to_string();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("db-secret"));
        assert!(!rendered.contains("mail-secret"));
    }
}
