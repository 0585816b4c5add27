//! 可配置的搜索查询词法分析器
//!
//! 将 `title =~ "test" and (age >= 30 or category != bad)` 这样的查询分解为
//! 扁平的 token 序列，比较符、连接词和字段名都由调用者配置。

pub mod config;
pub mod error;
pub mod lexer;
pub mod sql;
pub mod token;

pub use config::{ComparatorConfig, Config, ConnectiveConfig};
pub use error::{ConfigError, ErrorKind, LexerError, TokenizeError};
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
