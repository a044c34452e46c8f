//! 默认格式化：无类型说明符的占位符（以及 `?a` 的元素）如何变成 SQL 字面量。

use crate::error::TemplateError;
use crate::escaper::StringEscaper;
use crate::value::SqlValue;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");

/// 把 `v` 以 MySQL 字面量语法追加到 `out`。`index` 仅用于错误信息。
pub(crate) fn write_value(
    out: &mut String,
    index: usize,
    v: &SqlValue,
    escaper: &dyn StringEscaper,
) -> Result<(), TemplateError> {
    match v {
        SqlValue::Null => out.push_str("NULL"),
        SqlValue::Bool(b) => out.push_str(if *b { "1" } else { "0" }),
        SqlValue::I64(n) => out.push_str(&n.to_string()),
        SqlValue::U64(n) => out.push_str(&n.to_string()),
        SqlValue::F64(n) => match format_float(*n) {
            Some(s) => out.push_str(&s),
            None => {
                return Err(TemplateError::UnsupportedType {
                    index,
                    kind: "non-finite float",
                });
            }
        },
        SqlValue::String(s) => write_quoted(out, s, escaper)?,
        SqlValue::Bytes(b) => write_bytes(out, b, escaper)?,
        SqlValue::DateTime(dt) => {
            // 四舍五入到微秒
            let unsupported = || TemplateError::UnsupportedType {
                index,
                kind: "datetime",
            };
            let s = dt
                .checked_add(time::Duration::nanoseconds(500))
                .ok_or_else(unsupported)?
                .format(DATETIME_FORMAT)
                .map_err(|_| unsupported())?;
            out.push('\'');
            out.push_str(&s);
            out.push('\'');
        }
    }
    Ok(())
}

/// 最短可往返的十进制表示；NaN/Inf 在 SQL 中没有字面量，返回 `None`。
pub(crate) fn format_float(n: f64) -> Option<String> {
    n.is_finite().then(|| n.to_string())
}

pub(crate) fn write_quoted(
    out: &mut String,
    s: &str,
    escaper: &dyn StringEscaper,
) -> Result<(), TemplateError> {
    out.push('\'');
    out.push_str(&escaper.escape(s)?);
    out.push('\'');
    Ok(())
}

fn write_bytes(
    out: &mut String,
    data: &[u8],
    escaper: &dyn StringEscaper,
) -> Result<(), TemplateError> {
    if data.is_empty() {
        out.push_str("NULL");
        return Ok(());
    }

    match std::str::from_utf8(data) {
        Ok(s) => {
            out.push_str("_binary");
            write_quoted(out, s, escaper)
        }
        Err(_) => {
            out.push_str("X'");
            push_hex(out, data);
            out.push('\'');
            Ok(())
        }
    }
}

fn push_hex(out: &mut String, data: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &b in data {
        out.push(HEX[((b >> 4) & 0xF) as usize] as char);
        out.push(HEX[(b & 0xF) as usize] as char);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escaper::MySqlEscaper;
    use pretty_assertions::assert_eq;
    use time::UtcOffset;
    use time::macros::datetime;

    fn fmt(v: SqlValue) -> Result<String, TemplateError> {
        let mut out = String::new();
        write_value(&mut out, 0, &v, &MySqlEscaper)?;
        Ok(out)
    }

    #[test]
    fn scalars() {
        assert_eq!(fmt(SqlValue::Null).unwrap(), "NULL");
        assert_eq!(fmt(true.into()).unwrap(), "1");
        assert_eq!(fmt(false.into()).unwrap(), "0");
        assert_eq!(fmt((-12_i64).into()).unwrap(), "-12");
        assert_eq!(fmt(u64::MAX.into()).unwrap(), "18446744073709551615");
        assert_eq!(fmt(1.5_f64.into()).unwrap(), "1.5");
        assert_eq!(fmt(2.0_f64.into()).unwrap(), "2");
    }

    #[test]
    fn strings_are_escaped_and_quoted() {
        assert_eq!(fmt("Jack's".into()).unwrap(), "'Jack\\'s'");
        assert_eq!(fmt("".into()).unwrap(), "''");
    }

    #[test]
    fn non_finite_float_is_rejected() {
        assert_eq!(
            fmt(f64::NAN.into()),
            Err(TemplateError::UnsupportedType {
                index: 0,
                kind: "non-finite float"
            })
        );
    }

    #[test]
    fn bytes() {
        assert_eq!(fmt(SqlValue::Bytes(vec![])).unwrap(), "NULL");
        assert_eq!(fmt(SqlValue::Bytes(b"ab'".to_vec())).unwrap(), "_binary'ab\\''");
        assert_eq!(fmt(SqlValue::Bytes(vec![0xff, 0x01])).unwrap(), "X'FF01'");
    }

    #[test]
    fn datetime_rounds_to_micros() {
        let dt = datetime!(2019-04-24 12:23:34.123456789)
            .assume_offset(UtcOffset::from_hms(8, 0, 0).unwrap());
        assert_eq!(fmt(dt.into()).unwrap(), "'2019-04-24 12:23:34.123457'");
    }

    #[test]
    fn datetime_at_the_end_of_the_range_is_an_error() {
        let dt = datetime!(9999-12-31 23:59:59.999_999_999 UTC);
        assert_eq!(
            fmt(dt.into()),
            Err(TemplateError::UnsupportedType {
                index: 0,
                kind: "datetime"
            })
        );
        let dt = datetime!(9999-12-31 23:59:59.999_999 UTC);
        assert_eq!(fmt(dt.into()).unwrap(), "'9999-12-31 23:59:59.999999'");
    }
}
