//! 占位符扫描：把一段模板文本切成字面量与占位符。条件块解析与最终替换共用这一套规则。

use crate::error::TemplateError;
use crate::specifier::Specifier;
use std::fmt;

/// 模板中的一个占位符（`?`、`?d`、`?f`、`?a`、`?#`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub specifier: Specifier,
    /// `?` 在原始模板中的字节位置。
    pub offset: usize,
}

/// 展平后的模板片段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    Text(&'a str),
    Placeholder(Placeholder),
    /// 被省略的条件块；其中的占位符仍然消耗参数。
    Dropped { placeholders: usize },
}

impl fmt::Display for Fragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Placeholder(p) => write!(f, "{}", p.specifier),
            Self::Dropped { .. } => Ok(()),
        }
    }
}

/// `tokenize` 的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scanned {
    pub placeholders: usize,
    /// `text` 末尾的 `?` 吃掉了 `next` 作为说明符。
    pub took_next: bool,
}

/// 统计占位符个数，不检查说明符。每个 `?` 恰好是一个占位符。
pub(crate) fn count_placeholders(text: &str) -> usize {
    text.matches('?').count()
}

/// 扫描 `text`（位于原始模板 `base` 偏移处），把片段追加到 `out`。
///
/// `?` 后紧跟 `d`/`f`/`a`/`#` 时为带类型的占位符；紧跟其它字母、数字或 `_`
/// 视为未知说明符并报错；其余情况为默认占位符。`next` 是展平后紧接在
/// `text` 之后的字符，用于判断结尾处 `?` 的说明符。
pub(crate) fn tokenize<'a>(
    text: &'a str,
    base: usize,
    next: Option<char>,
    out: &mut Vec<Fragment<'a>>,
) -> Result<Scanned, TemplateError> {
    let mut count = 0usize;
    let mut rest = text;
    let mut consumed = 0usize;
    let mut took_next = false;

    while let Some(pos) = rest.find('?') {
        if pos > 0 {
            out.push(Fragment::Text(&rest[..pos]));
        }
        let offset = base + consumed + pos;
        let after = &rest[pos + 1..];

        let at_end = after.is_empty();
        let (specifier, len) = match after.chars().next().or(next) {
            Some(c) => match Specifier::from_char(c) {
                Some(s) if at_end => {
                    took_next = true;
                    (s, 1)
                }
                Some(s) => (s, 2),
                None if c.is_ascii_alphanumeric() || c == '_' => {
                    return Err(TemplateError::UnknownSpecifier {
                        specifier: c,
                        offset,
                    });
                }
                None => (Specifier::Default, 1),
            },
            None => (Specifier::Default, 1),
        };

        out.push(Fragment::Placeholder(Placeholder { specifier, offset }));
        count += 1;
        rest = &rest[pos + len..];
        consumed += pos + len;
    }

    if !rest.is_empty() {
        out.push(Fragment::Text(rest));
    }
    Ok(Scanned {
        placeholders: count,
        took_next,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(text: &str) -> Result<Vec<Fragment<'_>>, TemplateError> {
        let mut out = Vec::new();
        tokenize(text, 0, None, &mut out)?;
        Ok(out)
    }

    #[test]
    fn splits_text_and_placeholders() {
        let got = scan("id = ?d AND name IN (?a) OR x = ?").unwrap();
        assert_eq!(
            got,
            vec![
                Fragment::Text("id = "),
                Fragment::Placeholder(Placeholder {
                    specifier: Specifier::Int,
                    offset: 5
                }),
                Fragment::Text(" AND name IN ("),
                Fragment::Placeholder(Placeholder {
                    specifier: Specifier::Array,
                    offset: 21
                }),
                Fragment::Text(") OR x = "),
                Fragment::Placeholder(Placeholder {
                    specifier: Specifier::Default,
                    offset: 32
                }),
            ]
        );
    }

    #[test]
    fn adjacent_placeholders() {
        let got = scan("?#?f?").unwrap();
        let specs: Vec<Specifier> = got
            .iter()
            .filter_map(|f| match f {
                Fragment::Placeholder(p) => Some(p.specifier),
                _ => None,
            })
            .collect();
        assert_eq!(
            specs,
            vec![Specifier::Ident, Specifier::Float, Specifier::Default]
        );
    }

    #[test]
    fn base_offset_is_applied() {
        let mut out = Vec::new();
        let n = tokenize(" AND a = ?d", 10, None, &mut out).unwrap();
        assert_eq!(n.placeholders, 1);
        assert_eq!(
            out[1],
            Fragment::Placeholder(Placeholder {
                specifier: Specifier::Int,
                offset: 19
            })
        );
    }

    #[test]
    fn unknown_specifier() {
        assert_eq!(
            scan("a = ?x"),
            Err(TemplateError::UnknownSpecifier {
                specifier: 'x',
                offset: 4
            })
        );
        assert_eq!(
            scan("?1"),
            Err(TemplateError::UnknownSpecifier {
                specifier: '1',
                offset: 0
            })
        );
    }

    #[test]
    fn trailing_question_mark_looks_at_next_char() {
        let mut out = Vec::new();
        let n = tokenize("a = ?", 0, Some('d'), &mut out).unwrap();
        assert_eq!(
            n,
            Scanned {
                placeholders: 1,
                took_next: true
            }
        );
        assert_eq!(
            out[1],
            Fragment::Placeholder(Placeholder {
                specifier: Specifier::Int,
                offset: 4
            })
        );

        let mut out = Vec::new();
        let n = tokenize("a = ?", 0, Some(' '), &mut out).unwrap();
        assert!(!n.took_next);
        assert_eq!(out[1].to_string(), "?");

        let mut out = Vec::new();
        assert_eq!(
            tokenize("a = ?", 0, Some('x'), &mut out),
            Err(TemplateError::UnknownSpecifier {
                specifier: 'x',
                offset: 4
            })
        );

        // 只有结尾的 `?` 才看 next
        let mut out = Vec::new();
        let n = tokenize("?d", 0, Some('f'), &mut out).unwrap();
        assert!(!n.took_next);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn counts_every_question_mark() {
        assert_eq!(count_placeholders("?d, ?x ??"), 4);
        assert_eq!(count_placeholders("none"), 0);
    }

    #[test]
    fn punctuation_after_question_mark_is_default() {
        let got = scan("(?, ?)").unwrap();
        assert_eq!(got.len(), 5);
        assert_eq!(got.iter().map(ToString::to_string).collect::<String>(), "(?, ?)");
    }
}
