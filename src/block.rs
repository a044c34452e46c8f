//! 条件块解析：`{...}` 内任一占位符对应的参数是 skip 哨兵时，整块省略；否则去掉花括号原样保留。

use crate::args::Arg;
use crate::config::ParamCounting;
use crate::error::{StructuralError, TemplateError};
use crate::template::{Fragment, count_placeholders, tokenize};
use std::fmt;
use std::ops::Range;

/// 去掉条件块语法后的模板。`Display` 输出展平后的模板文本（占位符保持原样）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate<'a> {
    fragments: Vec<Fragment<'a>>,
    placeholders: usize,
}

impl<'a> ResolvedTemplate<'a> {
    pub fn fragments(&self) -> &[Fragment<'a>] {
        &self.fragments
    }

    /// 原模板中的占位符总数（包括被省略块中的）。
    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    pub fn dropped_blocks(&self) -> usize {
        self.fragments
            .iter()
            .filter(|f| matches!(f, Fragment::Dropped { .. }))
            .count()
    }
}

impl fmt::Display for ResolvedTemplate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frag in &self.fragments {
            write!(f, "{frag}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(Range<usize>),
    Block { open: usize, body: Range<usize> },
}

/// 按字符从左到右切分出块外文本与块内容，只检查花括号结构。
fn split_blocks(template: &str) -> Result<Vec<Segment>, StructuralError> {
    let mut segments = Vec::new();
    let mut run_start = 0usize;
    let mut open: Option<usize> = None;

    for (i, c) in template.char_indices() {
        match c {
            '{' => {
                if open.is_some() {
                    return Err(StructuralError::NestedBlock { offset: i });
                }
                if run_start < i {
                    segments.push(Segment::Text(run_start..i));
                }
                open = Some(i);
                run_start = i + 1;
            }
            '}' => {
                let Some(o) = open.take() else {
                    return Err(StructuralError::UnmatchedClose { offset: i });
                };
                segments.push(Segment::Block {
                    open: o,
                    body: run_start..i,
                });
                run_start = i + 1;
            }
            _ => {}
        }
    }

    if let Some(o) = open {
        return Err(StructuralError::UnclosedBlock { offset: o });
    }
    if run_start < template.len() {
        segments.push(Segment::Text(run_start..template.len()));
    }
    Ok(segments)
}

/// 块解析后保留下来的部分。
enum Kept {
    Text(Range<usize>),
    Dropped(usize),
}

/// 解析模板中的条件块。
///
/// 结构错误先于任何占位符处理被报告。被省略的块在结果中留下
/// `Fragment::Dropped`，使后续替换仍能按原模板的位置消耗参数。
/// 占位符在展平后的文本上识别，所以 `?{d}` 等同于 `?d`。
pub fn resolve_blocks<'a>(
    template: &'a str,
    args: &[Arg],
    counting: ParamCounting,
) -> Result<ResolvedTemplate<'a>, TemplateError> {
    let segments = split_blocks(template)?;
    let mut kept = Vec::with_capacity(segments.len());
    let mut cursor = 0usize;

    for seg in segments {
        match seg {
            Segment::Text(range) => {
                cursor += count_placeholders(&template[range.clone()]);
                kept.push(Kept::Text(range));
            }
            Segment::Block { open, body } => {
                let n = count_placeholders(&template[body.clone()]);
                match skip_trigger(cursor, n, args, counting) {
                    Some(index) => {
                        tracing::debug!(offset = open, index, %counting, "dropping conditional block");
                        kept.push(Kept::Dropped(n));
                    }
                    None => kept.push(Kept::Text(body)),
                }
                cursor += n;
            }
        }
    }

    let mut fragments = Vec::with_capacity(kept.len() * 2);
    let mut skip_first = false;
    for (i, item) in kept.iter().enumerate() {
        let range = match item {
            Kept::Dropped(n) => {
                fragments.push(Fragment::Dropped { placeholders: *n });
                continue;
            }
            Kept::Text(range) if range.is_empty() => continue,
            Kept::Text(range) => range,
        };
        // 说明符字符都是 ASCII，跳过一个字节即可
        let start = range.start + usize::from(std::mem::take(&mut skip_first));
        let next = kept[i + 1..].iter().find_map(|k| match k {
            Kept::Text(r) => template[r.clone()].chars().next(),
            Kept::Dropped(_) => None,
        });
        skip_first = tokenize(&template[start..range.end], start, next, &mut fragments)?.took_next;
    }

    Ok(ResolvedTemplate {
        fragments,
        placeholders: cursor,
    })
}

/// 返回让块被省略的第一个参数位置。块内没有占位符时永不省略。
fn skip_trigger(base: usize, n: usize, args: &[Arg], counting: ParamCounting) -> Option<usize> {
    (0..n)
        .map(|local| match counting {
            ParamCounting::Global => base + local,
            ParamCounting::BlockLocal => local,
        })
        .find(|&index| args.get(index).is_some_and(Arg::is_skip))
}
