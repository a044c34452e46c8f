//! 模板构建错误。任何错误都会中止整个 `build`，不会返回部分结果。

use crate::escaper::EscapeError;
use crate::specifier::Specifier;

/// 条件块语法错误，`offset` 为出错字符在模板中的字节位置。
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("template nested block at offset {offset}")]
    NestedBlock { offset: usize },
    #[error("template unmatched `}}` at offset {offset}")]
    UnmatchedClose { offset: usize },
    #[error("template unclosed block opened at offset {offset}")]
    UnclosedBlock { offset: usize },
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error("template missing parameter #{index}")]
    MissingParameter { index: usize },
    #[error("template parameter #{index} for `{specifier}` must be {expected}")]
    TypeMismatch {
        index: usize,
        specifier: Specifier,
        expected: &'static str,
    },
    #[error("template parameter #{index} has unsupported type {kind}")]
    UnsupportedType { index: usize, kind: &'static str },
    #[error("template unknown specifier `?{specifier}` at offset {offset}")]
    UnknownSpecifier { specifier: char, offset: usize },
    #[error("{0}")]
    Escape(#[from] EscapeError),
}

impl TemplateError {
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }
}
