//! M611-M625: `.format()` field consistency.

use std::collections::BTreeSet;

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use rustpython_parser::ast::{Constant, Expr, ExprKind, Stmt, StmtKind, Suite};

use crate::ast::helpers::as_const_str;
use crate::ast::types::RefEquality;
use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

/// The replacement fields named by one format string.
#[derive(Debug, Default, PartialEq, Eq)]
struct FormatSummary {
    autos: usize,
    indexes: BTreeSet<usize>,
    keywords: BTreeSet<String>,
}

impl FormatSummary {
    fn is_empty(&self) -> bool {
        self.autos == 0 && self.indexes.is_empty() && self.keywords.is_empty()
    }
}

/// Record one field name (the part before any `!conversion` or `:spec`).
/// The accessor suffix (`.attr`, `[index]`) is validated but otherwise
/// ignored.
fn record_field_name(name: &str, summary: &mut FormatSummary) -> Result<(), ()> {
    let head_end = name.find(['.', '[']).unwrap_or(name.len());
    let (head, mut rest) = name.split_at(head_end);

    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix('.') {
            let end = stripped.find(['.', '[']).unwrap_or(stripped.len());
            if end == 0 {
                return Err(());
            }
            rest = &stripped[end..];
        } else if let Some(stripped) = rest.strip_prefix('[') {
            let end = stripped.find(']').ok_or(())?;
            if end == 0 {
                return Err(());
            }
            rest = &stripped[end + 1..];
        } else {
            return Err(());
        }
    }

    if head.is_empty() {
        summary.autos += 1;
    } else if head.chars().all(|c| c.is_ascii_digit()) {
        summary.indexes.insert(head.parse().map_err(|_| ())?);
    } else {
        summary.keywords.insert(head.to_string());
    }
    Ok(())
}

/// Parse one `{...}` field starting just past the opening brace; returns
/// the number of characters consumed, including the closing brace.
fn parse_field(chars: &[char], summary: &mut FormatSummary) -> Result<usize, ()> {
    let mut index = 0;
    let mut name = String::new();
    while index < chars.len() && !matches!(chars[index], ':' | '!' | '}') {
        if chars[index] == '{' {
            return Err(());
        }
        name.push(chars[index]);
        index += 1;
    }
    if index >= chars.len() {
        return Err(());
    }
    record_field_name(&name, summary)?;

    if chars[index] == '!' {
        index += 1;
        while index < chars.len() && !matches!(chars[index], ':' | '}') {
            index += 1;
        }
        if index >= chars.len() {
            return Err(());
        }
    }

    if chars[index] == ':' {
        index += 1;
        while index < chars.len() && chars[index] != '}' {
            if chars[index] == '{' {
                // One level of nesting is allowed in the format spec.
                index += 1;
                let mut nested = String::new();
                while index < chars.len() && chars[index] != '}' {
                    if chars[index] == '{' {
                        return Err(());
                    }
                    nested.push(chars[index]);
                    index += 1;
                }
                if index >= chars.len() {
                    return Err(());
                }
                let nested_name = nested.split([':', '!']).next().unwrap_or("");
                record_field_name(nested_name, summary)?;
            }
            index += 1;
        }
        if index >= chars.len() {
            return Err(());
        }
    }

    if chars[index] != '}' {
        return Err(());
    }
    Ok(index + 1)
}

fn summarize_format_string(literal: &str) -> Result<FormatSummary, ()> {
    let chars: Vec<char> = literal.chars().collect();
    let mut summary = FormatSummary::default();
    let mut index = 0;
    while index < chars.len() {
        match chars[index] {
            '{' => {
                if chars.get(index + 1) == Some(&'{') {
                    index += 2;
                } else {
                    index += 1 + parse_field(&chars[index + 1..], &mut summary)?;
                }
            }
            '}' => {
                if chars.get(index + 1) == Some(&'}') {
                    index += 2;
                } else {
                    return Err(());
                }
            }
            _ => index += 1,
        }
    }
    Ok(summary)
}

/// One walk that classifies string constants as docstrings or plain
/// strings and correlates `.format()` call sites to their format-string
/// node. The usize is the positional offset: one for the
/// `str.format(fmt, ...)` spelling, zero otherwise.
#[derive(Default)]
struct TextVisitor<'a> {
    strings: Vec<&'a Expr>,
    docstrings: FxHashSet<RefEquality<'a, Expr>>,
    format_calls: FxHashMap<RefEquality<'a, Expr>, (&'a Expr, usize)>,
}

impl<'a> TextVisitor<'a> {
    fn mark_docstring(&mut self, body: &'a [Stmt]) {
        if let Some(stmt) = body.first() {
            if let StmtKind::Expr { value } = &stmt.node {
                if matches!(
                    &value.node,
                    ExprKind::Constant {
                        value: Constant::Str(..),
                        ..
                    }
                ) {
                    self.docstrings.insert(RefEquality(value.as_ref()));
                }
            }
        }
    }
}

impl<'a> Visitor<'a> for TextVisitor<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.node {
            StmtKind::FunctionDef { body, .. }
            | StmtKind::AsyncFunctionDef { body, .. }
            | StmtKind::ClassDef { body, .. } => self.mark_docstring(body),
            _ => {}
        }
        visitor::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        match &expr.node {
            ExprKind::Constant {
                value: Constant::Str(..),
                ..
            } => self.strings.push(expr),
            ExprKind::Call { func, args, .. } => {
                if let ExprKind::Attribute { value, attr, .. } = &func.node {
                    if attr == "format" {
                        if as_const_str(value).is_some() {
                            self.format_calls
                                .insert(RefEquality(value.as_ref()), (expr, 0));
                        } else if matches!(&value.node, ExprKind::Name { id, .. } if id == "str")
                        {
                            if let Some(first) = args.first() {
                                if as_const_str(first).is_some() {
                                    self.format_calls.insert(RefEquality(first), (expr, 1));
                                }
                            }
                        }
                    }
                }
            }
            _ => {}
        }
        visitor::walk_expr(self, expr);
    }
}

fn join_indexes(indexes: impl Iterator<Item = usize>) -> String {
    indexes.map(|index| index.to_string()).join(", ")
}

fn check_call(
    summary: &FormatSummary,
    call: &Expr,
    offset: usize,
    checks: &mut Vec<Check>,
) {
    if summary.autos > 0 && !summary.indexes.is_empty() {
        checks.push(Check::new(
            CheckKind::MixedFormatFieldNumbering,
            call.location,
        ));
    }

    let ExprKind::Call { args, keywords, .. } = &call.node else {
        return;
    };

    let has_star_args = args
        .iter()
        .any(|arg| matches!(arg.node, ExprKind::Starred { .. }));
    let has_star_kwargs = keywords.iter().any(|keyword| keyword.node.arg.is_none());
    if has_star_args || has_star_kwargs {
        checks.push(Check::new(CheckKind::UnverifiableFormatCall, call.location));
        return;
    }

    let num_args = args.len().saturating_sub(offset);
    let mut used: BTreeSet<usize> = summary.indexes.clone();
    used.extend(0..summary.autos);

    let unused: Vec<usize> = (0..num_args).filter(|index| !used.contains(index)).collect();
    if !unused.is_empty() {
        checks.push(Check::new(
            CheckKind::UnusedFormatPositions(join_indexes(unused.into_iter())),
            call.location,
        ));
    }
    let missing: Vec<usize> = used.into_iter().filter(|index| *index >= num_args).collect();
    if !missing.is_empty() {
        checks.push(Check::new(
            CheckKind::MissingFormatPositions(join_indexes(missing.into_iter())),
            call.location,
        ));
    }

    let call_keywords: BTreeSet<&str> = keywords
        .iter()
        .filter_map(|keyword| keyword.node.arg.as_deref())
        .collect();
    let summary_keywords: BTreeSet<&str> =
        summary.keywords.iter().map(String::as_str).collect();

    let unused: Vec<&str> = call_keywords.difference(&summary_keywords).copied().collect();
    if !unused.is_empty() {
        checks.push(Check::new(
            CheckKind::UnusedFormatKeywords(unused.join(", ")),
            call.location,
        ));
    }
    let missing: Vec<&str> = summary_keywords.difference(&call_keywords).copied().collect();
    if !missing.is_empty() {
        checks.push(Check::new(
            CheckKind::MissingFormatKeywords(missing.join(", ")),
            call.location,
        ));
    }
}

pub fn format_string(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = TextVisitor::default();
    visitor.mark_docstring(python_ast);
    visitor.visit_body(python_ast);

    let mut checks: Vec<Check> = vec![];
    for string in &visitor.strings {
        let Some(literal) = as_const_str(string) else {
            continue;
        };
        // A malformed format string contributes no fields.
        let Ok(summary) = summarize_format_string(literal) else {
            continue;
        };
        if summary.is_empty() {
            continue;
        }
        match visitor.format_calls.get(&RefEquality(*string)) {
            Some((call, offset)) => check_call(&summary, call, *offset, &mut checks),
            None => {
                let kind = if visitor.docstrings.contains(&RefEquality(*string)) {
                    CheckKind::FormatFieldsInDocstring
                } else {
                    CheckKind::FormatFieldsInString
                };
                checks.push(Check::new(kind, string.location));
            }
        }
    }
    checker.report_all(checks);
}
