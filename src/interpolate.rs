//! 占位符替换：把展平后的模板中的占位符依次替换成参数字面量。
//!
//! 分两步进行：先生成带类型的片段（字面量 / skip 标记），再删除 skip 标记前面的
//! 简单等值条件（` AND col = ` 或 ` col = `）。skip 标记从不以文本形式参与匹配，
//! 因此参数内容不可能被误认成标记。

use crate::args::Arg;
use crate::block::ResolvedTemplate;
use crate::error::TemplateError;
use crate::escaper::StringEscaper;
use crate::specifier::write_placeholder;
use crate::template::Fragment;
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Skip { index: usize },
}

/// 依次消耗参数并生成最终 SQL。
///
/// 每个占位符（包括被省略块中的）恰好消耗一个参数；参数不足时返回
/// `MissingParameter`。多余的参数被忽略。
pub fn substitute(
    resolved: &ResolvedTemplate<'_>,
    args: &[Arg],
    escaper: &dyn StringEscaper,
) -> Result<String, TemplateError> {
    let mut pieces: Vec<Piece> = Vec::new();
    let mut cursor = 0usize;

    for frag in resolved.fragments() {
        match frag {
            Fragment::Text(s) => push_literal(&mut pieces, s),
            Fragment::Dropped { placeholders } => {
                let next = cursor + placeholders;
                if next > args.len() {
                    return Err(TemplateError::MissingParameter {
                        index: args.len().max(cursor),
                    });
                }
                cursor = next;
            }
            Fragment::Placeholder(p) => {
                let index = cursor;
                let Some(arg) = args.get(index) else {
                    return Err(TemplateError::MissingParameter { index });
                };
                cursor += 1;

                if arg.is_skip() {
                    pieces.push(Piece::Skip { index });
                    continue;
                }
                let mut out = String::new();
                write_placeholder(&mut out, p.specifier, index, arg, escaper)?;
                push_literal(&mut pieces, &out);
            }
        }
    }

    Ok(strip_skipped_predicates(pieces))
}

fn push_literal(pieces: &mut Vec<Piece>, s: &str) {
    match pieces.last_mut() {
        Some(Piece::Literal(buf)) => buf.push_str(s),
        _ => pieces.push(Piece::Literal(s.to_string())),
    }
}

fn skipped_predicate() -> &'static Regex {
    static SKIPPED_PREDICATE: OnceLock<Regex> = OnceLock::new();
    SKIPPED_PREDICATE.get_or_init(|| {
        Regex::new(r"(?: AND)? [A-Za-z0-9_]+ = \z").expect("invalid built-in predicate regex")
    })
}

/// 删除 skip 标记及其前面的 ` AND col = ` / ` col = `；无法识别的上下文保留可见标记。
///
/// 只在紧挨着标记的那段字面量里匹配，之前已经输出的内容不再重复扫描。
fn strip_skipped_predicates(pieces: Vec<Piece>) -> String {
    let mut out = String::new();
    let mut tail = 0usize;
    for piece in pieces {
        match piece {
            Piece::Literal(s) => {
                tail = out.len();
                out.push_str(&s);
            }
            Piece::Skip { index } => {
                match skipped_predicate().find(&out[tail..]) {
                    Some(m) => {
                        tracing::trace!(index, predicate = m.as_str(), "removing skipped predicate");
                        let start = tail + m.start();
                        out.truncate(start);
                    }
                    None => {
                        tracing::warn!(index, "skip value outside a block has no removable predicate");
                        out.push_str(&format!("/* SKIPPED ARG {index} */"));
                    }
                }
                tail = out.len();
            }
        }
    }
    out
}
