//! 类型说明符：决定一个占位符如何把参数渲染成 SQL 文本。

use crate::args::Arg;
use crate::error::TemplateError;
use crate::escaper::{StringEscaper, quote_identifier};
use crate::format::{format_float, write_value};
use crate::value::SqlValue;
use std::fmt;

/// `?` 之后的类型说明符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Specifier {
    /// `?`：按值的类型自动格式化。
    #[default]
    Default,
    /// `?d`：整数。
    Int,
    /// `?f`：浮点数。
    Float,
    /// `?a`：数组，索引数组展开为值列表，关联数组展开为 `SET` 风格的键值对。
    Array,
    /// `?#`：标识符或标识符列表。
    Ident,
}

impl Specifier {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Int),
            'f' => Some(Self::Float),
            'a' => Some(Self::Array),
            '#' => Some(Self::Ident),
            _ => None,
        }
    }

    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Default => None,
            Self::Int => Some('d'),
            Self::Float => Some('f'),
            Self::Array => Some('a'),
            Self::Ident => Some('#'),
        }
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("?")?;
        match self.as_char() {
            Some(c) => write!(f, "{c}"),
            None => Ok(()),
        }
    }
}

/// 把第 `index` 个参数按 `specifier` 渲染并追加到 `out`。skip 哨兵由调用方提前处理。
pub(crate) fn write_placeholder(
    out: &mut String,
    specifier: Specifier,
    index: usize,
    arg: &Arg,
    escaper: &dyn StringEscaper,
) -> Result<(), TemplateError> {
    if arg.is_skip() {
        return Err(TemplateError::UnsupportedType {
            index,
            kind: arg.kind(),
        });
    }

    match specifier {
        Specifier::Int => write_int(out, index, arg),
        Specifier::Float => write_float(out, index, arg),
        Specifier::Array => write_array(out, index, arg, escaper),
        Specifier::Ident => write_idents(out, index, arg),
        Specifier::Default => match arg {
            Arg::Value(v) => write_value(out, index, v, escaper),
            other => Err(TemplateError::UnsupportedType {
                index,
                kind: other.kind(),
            }),
        },
    }
}

fn write_int(out: &mut String, index: usize, arg: &Arg) -> Result<(), TemplateError> {
    let n = match arg {
        Arg::Value(SqlValue::Null) => {
            out.push_str("NULL");
            return Ok(());
        }
        Arg::Value(SqlValue::U64(n)) => {
            out.push_str(&n.to_string());
            return Ok(());
        }
        Arg::Value(SqlValue::I64(n)) => *n,
        Arg::Value(SqlValue::Bool(b)) => *b as i64,
        Arg::Value(SqlValue::F64(f)) => truncate(*f),
        Arg::Value(SqlValue::String(s)) => numeric_prefix(s).to_i64(),
        Arg::Value(SqlValue::Bytes(b)) => numeric_prefix(&String::from_utf8_lossy(b)).to_i64(),
        Arg::List(items) => !items.is_empty() as i64,
        Arg::Map(pairs) => !pairs.is_empty() as i64,
        Arg::Value(SqlValue::DateTime(_)) | Arg::Skip => {
            return Err(TemplateError::TypeMismatch {
                index,
                specifier: Specifier::Int,
                expected: "a value convertible to integer",
            });
        }
    };
    out.push_str(&n.to_string());
    Ok(())
}

fn write_float(out: &mut String, index: usize, arg: &Arg) -> Result<(), TemplateError> {
    let f = match arg {
        Arg::Value(SqlValue::Null) => {
            out.push_str("NULL");
            return Ok(());
        }
        Arg::Value(SqlValue::F64(f)) => *f,
        Arg::Value(SqlValue::I64(n)) => *n as f64,
        Arg::Value(SqlValue::U64(n)) => *n as f64,
        Arg::Value(SqlValue::Bool(b)) => *b as i64 as f64,
        Arg::Value(SqlValue::String(s)) => numeric_prefix(s).to_f64(),
        Arg::Value(SqlValue::Bytes(b)) => numeric_prefix(&String::from_utf8_lossy(b)).to_f64(),
        Arg::List(items) => !items.is_empty() as i64 as f64,
        Arg::Map(pairs) => !pairs.is_empty() as i64 as f64,
        Arg::Value(SqlValue::DateTime(_)) | Arg::Skip => {
            return Err(TemplateError::TypeMismatch {
                index,
                specifier: Specifier::Float,
                expected: "a value convertible to float",
            });
        }
    };
    match format_float(f) {
        Some(s) => {
            out.push_str(&s);
            Ok(())
        }
        None => Err(TemplateError::TypeMismatch {
            index,
            specifier: Specifier::Float,
            expected: "a finite number",
        }),
    }
}

fn write_array(
    out: &mut String,
    index: usize,
    arg: &Arg,
    escaper: &dyn StringEscaper,
) -> Result<(), TemplateError> {
    match arg {
        Arg::List(items) => {
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, index, v, escaper)?;
            }
            Ok(())
        }
        Arg::Map(pairs) => {
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&quote_identifier(k));
                out.push_str(" = ");
                write_value(out, index, v, escaper)?;
            }
            Ok(())
        }
        _ => Err(TemplateError::TypeMismatch {
            index,
            specifier: Specifier::Array,
            expected: "an array",
        }),
    }
}

fn write_idents(out: &mut String, index: usize, arg: &Arg) -> Result<(), TemplateError> {
    let mismatch = || TemplateError::TypeMismatch {
        index,
        specifier: Specifier::Ident,
        expected: "a string or an array of strings",
    };
    let names: Vec<&SqlValue> = match arg {
        Arg::Value(v @ SqlValue::String(_)) => vec![v],
        Arg::List(items) => items.iter().collect(),
        Arg::Map(pairs) => pairs.iter().map(|(_, v)| v).collect(),
        _ => return Err(mismatch()),
    };

    for (i, v) in names.into_iter().enumerate() {
        let SqlValue::String(name) = v else {
            return Err(mismatch());
        };
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&quote_identifier(name));
    }
    Ok(())
}

fn truncate(f: f64) -> i64 {
    if f.is_finite() { f.trunc() as i64 } else { 0 }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn to_i64(self) -> i64 {
        match self {
            Self::Int(n) => n,
            Self::Float(f) => truncate(f),
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(f) => f,
        }
    }
}

/// 取字符串开头的数值部分（`"12abc"` => 12，`" 1.5e1x"` => 15.0，`"abc"` => 0）。
fn numeric_prefix(s: &str) -> Number {
    let s = s.trim_start_matches([' ', '\t', '\n', '\r', '\u{0b}', '\u{0c}']);
    let b = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0usize;
    if matches!(b.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    let mut is_float = false;

    if b.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 || has_digits {
            has_digits |= frac_end > end + 1;
            is_float = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return Number::Int(0);
    }

    if matches!(b.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            is_float = true;
            end = exp_end;
        }
    }

    let text = &s[..end];
    if !is_float && let Ok(n) = text.parse::<i64>() {
        return Number::Int(n);
    }
    Number::Float(text.parse::<f64>().unwrap_or(0.0))
}
