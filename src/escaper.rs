//! StringEscaper：字符串字面量转义的外部协作者（通常绑定到一个数据库连接）。
//!
//! 驱动层的转义依赖连接字符集，crate 无法替代；这里只定义 trait，
//! 并提供一个按 MySQL `real_escape_string` 规则实现的默认版本。

/// 转义错误（例如连接已失效）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("template string escaper error: {0}")]
pub struct EscapeError(pub String);

/// 把任意字符串转成可放进单引号内的安全文本（不含外层引号）。
pub trait StringEscaper: dyn_clone::DynClone + std::fmt::Debug + Send + Sync {
    fn escape(&self, s: &str) -> Result<String, EscapeError>;
}

dyn_clone::clone_trait_object!(StringEscaper);

/// 与 MySQL 客户端库 `mysql_real_escape_string` 相同的转义规则（不区分字符集）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySqlEscaper;

impl StringEscaper for MySqlEscaper {
    fn escape(&self, s: &str) -> Result<String, EscapeError> {
        let mut out = String::with_capacity(s.len() + 2);
        for ch in s.chars() {
            match ch {
                '\u{0000}' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\u{001a}' => out.push_str("\\Z"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                _ => out.push(ch),
            }
        }
        Ok(out)
    }
}

/// 标识符转义：反引号包裹，内部反引号加倍。不经过驱动。
pub fn quote_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push('`');
        }
        out.push(ch);
    }
    out.push('`');
    out
}
