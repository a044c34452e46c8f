//! SQL 标量值类型。

use std::borrow::Cow;

/// 模板参数中的标量值（数组元素也只能是标量）。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    Bytes(Vec<u8>),
    DateTime(time::OffsetDateTime),
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    /// 值的类型名，用于错误信息。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I64(_) | Self::U64(_) => "integer",
            Self::F64(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::DateTime(_) => "datetime",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

/// 为一组类型实现 `From`：先无损转换为变体的载荷类型，再包进该变体。
macro_rules! impl_from_into_variant {
    ($variant:ident($payload:ty): $($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for SqlValue {
                fn from(v: $t) -> Self {
                    Self::$variant(<$payload>::from(v))
                }
            }
        )+
    };
}

impl_from_into_variant!(Bool(bool): bool);
impl_from_into_variant!(I64(i64): i8, i16, i32, i64);
impl_from_into_variant!(U64(u64): u8, u16, u32, u64);
impl_from_into_variant!(F64(f64): f32, f64);
impl_from_into_variant!(String(Cow<'static, str>): String, &'static str);
impl_from_into_variant!(Bytes(Vec<u8>): Vec<u8>);
impl_from_into_variant!(DateTime(time::OffsetDateTime): time::OffsetDateTime);

#[cfg(test)]
mod tests {
    use super::SqlValue;
    use pretty_assertions::assert_eq;
    use std::borrow::Cow;

    #[test]
    fn from_option_some() {
        assert_eq!(SqlValue::from_option(Some(123_i64)), SqlValue::I64(123));
    }

    #[test]
    fn from_option_none() {
        assert_eq!(SqlValue::from_option::<i64>(None), SqlValue::Null);
    }

    #[test]
    fn from_unit_is_null() {
        let v: SqlValue = ().into();
        assert!(v.is_null());
    }

    #[test]
    fn small_ints_widen() {
        assert_eq!(SqlValue::from(-3_i8), SqlValue::I64(-3));
        assert_eq!(SqlValue::from(7_u16), SqlValue::U64(7));
        assert_eq!(SqlValue::from(0.5_f32), SqlValue::F64(0.5));
    }

    #[test]
    fn strings_keep_ownership() {
        assert!(matches!(SqlValue::from("a"), SqlValue::String(Cow::Borrowed("a"))));
        assert!(matches!(
            SqlValue::from("b".to_string()),
            SqlValue::String(Cow::Owned(ref s)) if s == "b"
        ));
    }

    #[test]
    fn kind_names() {
        assert_eq!(SqlValue::from("abc").kind(), "string");
        assert_eq!(SqlValue::from(1.5).kind(), "float");
        assert_eq!(SqlValue::from(vec![1_u8]).kind(), "bytes");
    }
}
