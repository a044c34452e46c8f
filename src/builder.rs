//! QueryBuilder：模板 + 参数列表 => 字面量 SQL。

use crate::args::Arg;
use crate::block::resolve_blocks;
use crate::config::{ParamCounting, default_param_counting};
use crate::error::TemplateError;
use crate::escaper::{MySqlEscaper, StringEscaper};
use crate::interpolate::substitute;

/// 参数化 SQL 模板构建器。
///
/// 模板语法：
/// - `?`、`?d`、`?f`、`?a`、`?#` 占位符，按出现顺序依次消耗参数；
/// - `{...}` 条件块（不可嵌套）：块内任一占位符的参数为 [`QueryBuilder::skip`] 时整块省略。
///
/// ```
/// use halo_template::{QueryBuilder, args};
///
/// let qb = QueryBuilder::new();
/// let sql = qb
///     .build("SELECT name FROM users WHERE user_id = ?d{ AND block = ?d}", args![1, qb.skip()])
///     .unwrap();
/// assert_eq!(sql, "SELECT name FROM users WHERE user_id = 1");
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    escaper: Box<dyn StringEscaper>,
    counting: ParamCounting,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    /// 使用 [`MySqlEscaper`] 与当前默认计数方式。
    pub fn new() -> Self {
        Self::with_escaper(MySqlEscaper)
    }

    /// 绑定一个外部字符串转义器（通常来自数据库连接）。
    pub fn with_escaper(escaper: impl StringEscaper + 'static) -> Self {
        Self {
            escaper: Box::new(escaper),
            counting: default_param_counting(),
        }
    }

    pub fn with_counting(mut self, counting: ParamCounting) -> Self {
        self.counting = counting;
        self
    }

    pub fn counting(&self) -> ParamCounting {
        self.counting
    }

    /// skip 哨兵：作为参数传入时，依赖它的条件块或等值条件会被省略。
    pub fn skip(&self) -> Arg {
        Arg::Skip
    }

    /// 构建最终 SQL。任何错误都会中止构建，不返回部分结果。
    pub fn build(&self, template: &str, args: impl AsRef<[Arg]>) -> Result<String, TemplateError> {
        let args = args.as_ref();
        let resolved = resolve_blocks(template, args, self.counting)?;
        tracing::trace!(
            placeholders = resolved.placeholder_count(),
            dropped_blocks = resolved.dropped_blocks(),
            args = args.len(),
            "resolved template blocks"
        );
        substitute(&resolved, args, &*self.escaper)
    }
}
