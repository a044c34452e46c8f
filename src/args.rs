//! Arg：模板参数（标量、索引数组、关联数组与 skip 哨兵）。

use crate::value::SqlValue;
use std::collections::BTreeMap;

/// 按位置传给 `QueryBuilder::build` 的一个参数。
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(SqlValue),
    /// 索引数组：`?a` 展开为 `v1, v2, ...`。
    List(Vec<SqlValue>),
    /// 关联数组（保持插入顺序）：`?a` 展开为 `` `k` = v, ... ``。
    Map(Vec<(String, SqlValue)>),
    /// skip 哨兵：依赖该参数的条件块（或简单等值条件）会被整体省略。
    Skip,
}

/// 获取 skip 哨兵。
pub fn skip() -> Arg {
    Arg::Skip
}

impl Arg {
    /// 由任意标量序列构造索引数组。
    pub fn list<T: Into<SqlValue>>(values: impl IntoIterator<Item = T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// 由 `(key, value)` 序列构造关联数组，顺序与输入一致。
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<SqlValue>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Value(v) => v.kind(),
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Skip => "skip",
        }
    }
}

impl From<SqlValue> for Arg {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    SqlValue::from(v).into()
                }
            }
        )*
    };
}

impl_from_scalar!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    time::OffsetDateTime,
);

impl<T> From<Option<T>> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        SqlValue::from_option(v).into()
    }
}

/// `Vec<T>` 视为索引数组；二进制数据请显式使用 `SqlValue::Bytes`。
impl<T> From<Vec<T>> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

impl<T, const N: usize> From<[T; N]> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: [T; N]) -> Self {
        Self::list(v)
    }
}

impl<K, V> From<BTreeMap<K, V>> for Arg
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from(v: BTreeMap<K, V>) -> Self {
        Self::map(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalars_wrap_into_value() {
        assert_eq!(Arg::from(42_i32), Arg::Value(SqlValue::I64(42)));
        assert_eq!(Arg::from("x"), Arg::Value(SqlValue::from("x")));
        assert_eq!(Arg::from(None::<i64>), Arg::Value(SqlValue::Null));
    }

    #[test]
    fn vec_and_array_become_list() {
        let expected = Arg::List(vec![SqlValue::I64(1), SqlValue::I64(2)]);
        assert_eq!(Arg::from(vec![1_i64, 2]), expected);
        assert_eq!(Arg::from([1_i64, 2]), expected);
    }

    #[test]
    fn map_keeps_insertion_order() {
        let a = Arg::map([("b", 1_i64), ("a", 2_i64)]);
        match a {
            Arg::Map(pairs) => {
                let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["b", "a"]);
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn skip_is_distinct_from_strings() {
        assert!(skip().is_skip());
        assert!(!Arg::from("__SKIP__").is_skip());
    }
}
