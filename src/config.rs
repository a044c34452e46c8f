//! 参数计数方式：条件块判断 skip 时，块内占位符对应哪个参数位置。

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};

/// 条件块内占位符的参数定位方式。
///
/// 最终替换总是按整个模板从左到右计数；这里只影响“块是否被省略”的判断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamCounting {
    /// 按占位符在整个模板中的序号取参数（块前的占位符、已省略块中的占位符都计入）。
    #[default]
    Global,
    /// 每个块都从第 0 个参数开始计数，与早期实现的判断结果一致。
    BlockLocal,
}

static DEFAULT_COUNTING: AtomicU8 = AtomicU8::new(ParamCounting::Global as u8);
static DEFAULT_COUNTING_LOCK: Mutex<()> = Mutex::new(());

impl ParamCounting {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::BlockLocal,
            _ => Self::Global,
        }
    }

    fn to_u8(self) -> u8 {
        self as u8
    }
}

/// 获取当前进程级默认计数方式；`QueryBuilder::new` 在构造时读取它。
pub fn default_param_counting() -> ParamCounting {
    ParamCounting::from_u8(DEFAULT_COUNTING.load(Ordering::Relaxed))
}

/// 设置进程级默认计数方式，返回旧值。
pub fn set_default_param_counting(counting: ParamCounting) -> ParamCounting {
    let old = DEFAULT_COUNTING.swap(counting.to_u8(), Ordering::Relaxed);
    ParamCounting::from_u8(old)
}

/// 修改默认计数方式的 RAII guard（持有全局锁，避免并行测试互相干扰）。
pub struct DefaultCountingGuard {
    _lock: MutexGuard<'static, ()>,
    old: ParamCounting,
}

impl Drop for DefaultCountingGuard {
    fn drop(&mut self) {
        set_default_param_counting(self.old);
    }
}

/// 在一个作用域内临时设置默认计数方式，退出作用域后自动恢复。
pub fn set_default_param_counting_scoped(counting: ParamCounting) -> DefaultCountingGuard {
    let lock = DEFAULT_COUNTING_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_param_counting(counting);
    DefaultCountingGuard { _lock: lock, old }
}

impl fmt::Display for ParamCounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Global => "global",
            Self::BlockLocal => "block-local",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scoped_default_is_restored() {
        {
            let _g = set_default_param_counting_scoped(ParamCounting::BlockLocal);
            assert_eq!(default_param_counting(), ParamCounting::BlockLocal);
        }
        let _g = set_default_param_counting_scoped(ParamCounting::Global);
        assert_eq!(default_param_counting(), ParamCounting::Global);
    }

    #[test]
    fn display() {
        assert_eq!(ParamCounting::Global.to_string(), "global");
        assert_eq!(ParamCounting::BlockLocal.to_string(), "block-local");
    }
}
