//! halo-sql-template：带类型占位符与条件块的 SQL 模板构建库。

pub mod args;
pub mod block;
pub mod builder;
pub mod config;
pub mod error;
pub mod escaper;
pub mod format;
pub mod interpolate;
pub mod macros;
pub mod specifier;
pub mod template;
pub mod value;

pub use crate::args::{Arg, skip};
pub use crate::block::{ResolvedTemplate, resolve_blocks};
pub use crate::builder::QueryBuilder;
pub use crate::config::{
    DefaultCountingGuard, ParamCounting, default_param_counting, set_default_param_counting,
    set_default_param_counting_scoped,
};
pub use crate::error::{StructuralError, TemplateError};
pub use crate::escaper::{EscapeError, MySqlEscaper, StringEscaper, quote_identifier};
pub use crate::interpolate::substitute;
pub use crate::specifier::Specifier;
pub use crate::template::{Fragment, Placeholder};
pub use crate::value::SqlValue;

/// 便捷命名空间：允许 `use halo_template::sqltemplate::{...}` 形式导入。
pub mod sqltemplate {
    pub use crate::*;
}
