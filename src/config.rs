//! 配置模块，描述比较符、连接词和字段名，并负责加载JSON配置文件

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, LexerError};

/// 八种比较符角色的符号配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorConfig {
    pub equal: String,
    pub not_equal: String,
    pub less_than: String,
    pub greater_than: String,
    pub less_than_equal_to: String,
    pub greater_than_equal_to: String,
    pub like: String,
    pub not_like: String,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            equal: "=".to_string(),
            not_equal: "!=".to_string(),
            less_than: "<".to_string(),
            greater_than: ">".to_string(),
            less_than_equal_to: "<=".to_string(),
            greater_than_equal_to: ">=".to_string(),
            like: "=~".to_string(),
            not_like: "!~".to_string(),
        }
    }
}

impl ComparatorConfig {
    /// 按角色顺序返回 (角色名, 符号)
    pub fn roles(&self) -> [(&'static str, &str); 8] {
        [
            ("EQUAL", self.equal.as_str()),
            ("NOT EQUAL", self.not_equal.as_str()),
            ("LESS THAN", self.less_than.as_str()),
            ("GREATER THAN", self.greater_than.as_str()),
            ("LESS THAN EQUAL", self.less_than_equal_to.as_str()),
            ("GREATER THAN EQUAL", self.greater_than_equal_to.as_str()),
            ("LIKE", self.like.as_str()),
            ("NOT LIKE", self.not_like.as_str()),
        ]
    }

    /// 按角色顺序返回所有符号
    pub fn symbols(&self) -> Vec<String> {
        self.roles().iter().map(|(_, s)| s.to_string()).collect()
    }
}

/// 两种布尔连接词的符号配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectiveConfig {
    pub and: String,
    pub or: String,
}

impl Default for ConnectiveConfig {
    fn default() -> Self {
        Self {
            and: "and".to_string(),
            or: "or".to_string(),
        }
    }
}

impl ConnectiveConfig {
    pub fn roles(&self) -> [(&'static str, &str); 2] {
        [("AND", self.and.as_str()), ("OR", self.or.as_str())]
    }

    pub fn symbols(&self) -> Vec<String> {
        self.roles().iter().map(|(_, s)| s.to_string()).collect()
    }
}

/// 词法分析器的完整配置
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub comparators: ComparatorConfig,
    pub connectives: ConnectiveConfig,
    /// 已注册的字段名，按顺序匹配。为空时所有未识别的文本都是值
    pub field_names: Vec<String>,
}

impl Config {
    /// 使用默认符号和给定的字段名创建配置
    pub fn with_field_names<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_names: field_names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// 校验所有比较符和连接词都不为空白，遇到第一个错误即返回
    pub fn validate(&self) -> Result<(), LexerError> {
        for (role, symbol) in self.comparators.roles() {
            if symbol.trim().is_empty() {
                return Err(LexerError::InvalidConfigComparator { role });
            }
        }

        for (role, symbol) in self.connectives.roles() {
            if symbol.trim().is_empty() {
                return Err(LexerError::InvalidConfigConnective { role });
            }
        }

        Ok(())
    }

    /// 从JSON文件加载配置，缺失的部分使用默认值
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        // 检查文件是否存在
        if !path_ref.exists() {
            return Err(ConfigError::NotFound(path_ref.to_path_buf()));
        }

        // 读取文件内容
        let content = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_ref.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            origin: path_ref.display().to_string(),
            source,
        })
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            origin: "<string>".to_string(),
            source,
        })
    }
}
