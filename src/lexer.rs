//! 搜索查询语言的词法分析器
//!
//! 词法分析器本身只保存校验后的配置和按长度降序排列的符号表，
//! 每次调用 [`Lexer::tokenize`] 都会创建一个新的 `Scanner` 来保存扫描状态。
//!
//! ## 单个 token 的匹配顺序
//!
//! ```text
//! next_token()
//!   ├─ 跳过空白字符
//!   ├─ 没有字符 → EndOfInput
//!   ├─ '"'  → read_quoted_value()   带转义的值
//!   ├─ '(' / ')' → 子查询开始 / 结束
//!   ├─ match_connective()  仅当前一个 token 是值或子查询结束
//!   ├─ match_comparator()  最长的符号优先
//!   ├─ match_field_name()  前一个 token 不能是比较符
//!   └─ read_raw_value()    直到空白、')' 或输入结束
//! ```

use log::{debug, trace, warn};

use crate::config::Config;
use crate::error::{LexerError, TokenizeError};
use crate::token::{Token, TokenKind};

const DIAGNOSTIC_PREFIX: &str = "INPUT: ";

#[derive(Debug)]
pub struct Lexer {
    config: Config,
    /// 比较符，按字节长度降序排列
    comparator_list: Vec<String>,
    /// 连接词，按字节长度降序排列
    connective_list: Vec<String>,
}

impl Lexer {
    /// 校验配置并预先计算符号表。配置无效时不会创建词法分析器
    pub fn new(config: Config) -> Result<Self, LexerError> {
        config.validate()?;

        let comparator_list = longest_first(config.comparators.symbols());
        let connective_list = longest_first(config.connectives.symbols());

        debug!(
            "lexer ready: comparators={:?} connectives={:?} fields={}",
            comparator_list,
            connective_list,
            config.field_names.len()
        );

        Ok(Self {
            config,
            comparator_list,
            connective_list,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn comparators(&self) -> &[String] {
        &self.comparator_list
    }

    pub fn connectives(&self) -> &[String] {
        &self.connective_list
    }

    /// 将输入分解为 token 序列
    ///
    /// 出错时返回的 [`TokenizeError`] 中包含出错前已经产生的 token
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, TokenizeError> {
        let mut scanner = Scanner::new(self, input);
        let mut tokens = Vec::with_capacity(50);

        loop {
            // 保存上一个 token 的副本，用于上下文判断
            scanner.previous = tokens.last().cloned();

            let token = match scanner.next_token() {
                Ok(token) => token,
                Err(error) => {
                    let error = scanner.decorate(error);
                    warn!("tokenize failed after {} tokens: {:?}", tokens.len(), error.kind());
                    return Err(TokenizeError { tokens, error });
                }
            };

            if token.is(TokenKind::EndOfInput) {
                break;
            }

            trace!("{}", token);
            tokens.push(token);
        }

        debug!("tokenized {} bytes into {} tokens", input.len(), tokens.len());
        Ok(tokens)
    }
}

/// 稳定排序，长度相同的符号保持配置中的顺序
fn longest_first(mut symbols: Vec<String>) -> Vec<String> {
    symbols.sort_by(|a, b| b.len().cmp(&a.len()));
    symbols
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// 单次 tokenize 调用的扫描状态
struct Scanner<'l, 'a> {
    lexer: &'l Lexer,
    input: &'a str,
    /// 下一个未读字符的字节索引
    position: usize,
    /// 当前字符的起始字节索引
    start: usize,
    /// 上一个产生的 token
    previous: Option<Token>,
}

impl<'l, 'a> Scanner<'l, 'a> {
    fn new(lexer: &'l Lexer, input: &'a str) -> Self {
        Self {
            lexer,
            input,
            position: 0,
            start: 0,
            previous: None,
        }
    }

    /// 返回下一个字符，不推进位置
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// 读取下一个字符作为当前字符
    fn bump(&mut self) -> Option<char> {
        self.start = self.position;
        let c = self.peek();
        if let Some(c) = c {
            self.position += c.len_utf8();
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if is_whitespace(c) {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    fn previous_is(&self, kind: TokenKind) -> bool {
        self.previous.as_ref().is_some_and(|t| t.is(kind))
    }

    /// 从当前字符开始的输入是否以 `symbol` 开头（忽略ASCII大小写）
    fn upcoming_matches(&self, symbol: &str) -> bool {
        let end = self.start + symbol.len();
        self.input
            .as_bytes()
            .get(self.start..end)
            .is_some_and(|text| text.eq_ignore_ascii_case(symbol.as_bytes()))
    }

    fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace();

        let Some(c) = self.bump() else {
            return Ok(Token::new(TokenKind::EndOfInput, ""));
        };

        match c {
            '"' => {
                let value = self.read_quoted_value()?;
                return Ok(Token::new(TokenKind::Value, value));
            }
            '(' => return Ok(Token::new(TokenKind::SubqueryStart, "(")),
            ')' => return Ok(Token::new(TokenKind::SubqueryEnd, ")")),
            _ => {}
        }

        if let Some(connective) = self.match_connective()? {
            return Ok(Token::new(TokenKind::Connective, connective));
        }

        if let Some(comparator) = self.match_comparator() {
            return Ok(Token::new(TokenKind::Comparator, comparator));
        }

        if let Some(field_name) = self.match_field_name() {
            return Ok(Token::new(TokenKind::FieldName, field_name));
        }

        let value = self.read_raw_value();
        Ok(Token::new(TokenKind::Value, value))
    }

    /// 读取双引号包围的值
    /// 注意：开始的引号已经被消费，结束引号会被消费但不包含在值中
    fn read_quoted_value(&mut self) -> Result<String, LexerError> {
        let mut value = String::new();

        loop {
            match self.bump() {
                None | Some('"') => break,
                Some('\\') => {
                    let backslash = self.start;
                    match self.bump() {
                        Some(c @ ('"' | '\\')) => value.push(c),
                        _ => return Err(LexerError::invalid_escape_sequence(backslash)),
                    }
                }
                Some(c) => value.push(c),
            }
        }

        Ok(value)
    }

    /// 读取不带引号的值，直到空白、')' 或输入结束。结束符不会被消费
    fn read_raw_value(&mut self) -> String {
        let start = self.start;
        while let Some(c) = self.peek() {
            if is_whitespace(c) || c == ')' {
                break;
            }
            self.bump();
        }
        self.input[start..self.position].to_string()
    }

    /// 连接词必须后跟空白，并且只能出现在值或子查询结束之后
    fn match_connective(&mut self) -> Result<Option<&'l str>, LexerError> {
        let lexer = self.lexer;
        let input = self.input;
        let bytes = input.as_bytes();

        for symbol in &lexer.connective_list {
            let end = self.start + symbol.len();
            let followed_by_space = bytes
                .get(end)
                .is_some_and(|b| is_whitespace(char::from(*b)));

            if !followed_by_space || !self.upcoming_matches(symbol) {
                continue;
            }

            if !(self.previous_is(TokenKind::Value) || self.previous_is(TokenKind::SubqueryEnd)) {
                continue;
            }

            // 连接词之后必须还有条件
            if input[end + 1..].trim().is_empty() {
                return Err(LexerError::invalid_connective(self.start));
            }

            self.position = end;
            return Ok(Some(symbol.as_str()));
        }

        Ok(None)
    }

    fn match_comparator(&mut self) -> Option<&'l str> {
        let lexer = self.lexer;

        for symbol in &lexer.comparator_list {
            if self.upcoming_matches(symbol) {
                self.position = self.start + symbol.len();
                return Some(symbol.as_str());
            }
        }

        None
    }

    /// 比较符之后的位置永远是值，不能是字段名
    fn match_field_name(&mut self) -> Option<&'l str> {
        if self.previous_is(TokenKind::Comparator) {
            return None;
        }

        let lexer = self.lexer;
        for field_name in &lexer.config.field_names {
            if field_name.is_empty() || !self.upcoming_matches(field_name) {
                continue;
            }

            let mut end = self.start + field_name.len();
            // 字段名后的一个空白字符一并消费
            if self.input[end..].starts_with(is_whitespace) {
                end += 1;
            }
            self.position = end;
            return Some(field_name.as_str());
        }

        None
    }

    /// 为扫描错误附加带位置指示的诊断信息
    fn decorate(&self, error: LexerError) -> LexerError {
        let offset = error.position().unwrap_or(self.start).min(self.input.len());
        let column = self.input[..offset].chars().count() + DIAGNOSTIC_PREFIX.len() + 1;

        let rendered = format!(
            "{DIAGNOSTIC_PREFIX}{}\n{:>width$}\n{:>width$} {}",
            self.input,
            "│",
            "└",
            error.explanation(),
            width = column,
        );

        error.with_diagnostic(rendered)
    }
}
