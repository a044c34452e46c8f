//! 宏集合：用字面量风格写参数列表，无需手动 `Arg::from`。
//!
//! ```
//! use halo_template::{args, assoc, skip};
//!
//! let a = args![42, "x", skip(), assoc! { "a" => 1, "b" => "y" }];
//! assert_eq!(a.len(), 4);
//! ```

/// 构造 `Vec<Arg>`，每个元素经 `Arg::from` 转换。
#[macro_export]
macro_rules! args {
    () => {
        Vec::<$crate::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Arg::from($value)),+]
    };
}

/// 构造关联数组 `Arg::Map`，保持书写顺序。
#[macro_export]
macro_rules! assoc {
    () => {
        $crate::Arg::Map(Vec::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Arg::Map(vec![
            $((::std::string::String::from($key), $crate::SqlValue::from($value))),+
        ])
    };
}
