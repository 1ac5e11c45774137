//! M181-M198: unnecessary comprehension and container-conversion shapes.

use num_bigint::BigInt;
use rustpython_parser::ast::{
    Cmpop, Comprehension, Constant, Expr, ExprKind, Keyword, Suite, Unaryop,
};

use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

fn func_name(func: &Expr) -> Option<&str> {
    if let ExprKind::Name { id, .. } = &func.node {
        Some(id)
    } else {
        None
    }
}

/// M181, M182: `list(x for x in y)`, `set(x for x in y)`.
fn unnecessary_generator(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    if let [arg] = args {
        if matches!(&arg.node, ExprKind::GeneratorExp { .. }) {
            match func_name(func)? {
                "list" => {
                    return Some(Check::new(CheckKind::UnnecessaryGeneratorList, expr.location))
                }
                "set" => {
                    return Some(Check::new(CheckKind::UnnecessaryGeneratorSet, expr.location))
                }
                _ => {}
            }
        }
    }
    None
}

/// M183: `dict((x, y) for x, y in z)`.
fn unnecessary_generator_dict(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    if let [arg] = args {
        if func_name(func)? == "dict" {
            if let ExprKind::GeneratorExp { elt, .. } = &arg.node {
                if matches!(&elt.node, ExprKind::Tuple { elts, .. } if elts.len() == 2) {
                    return Some(Check::new(CheckKind::UnnecessaryGeneratorDict, expr.location));
                }
            }
        }
    }
    None
}

/// M184: `set([x for x in y])`.
fn unnecessary_list_comprehension_set(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    if let [arg] = args {
        if func_name(func)? == "set" && matches!(&arg.node, ExprKind::ListComp { .. }) {
            return Some(Check::new(
                CheckKind::UnnecessaryListComprehensionSet,
                expr.location,
            ));
        }
    }
    None
}

/// M185: `dict([(x, y) for x, y in z])`.
fn unnecessary_list_comprehension_dict(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    if let [arg] = args {
        if func_name(func)? == "dict" {
            if let ExprKind::ListComp { elt, .. } = &arg.node {
                if matches!(&elt.node, ExprKind::Tuple { elts, .. } if elts.len() == 2) {
                    return Some(Check::new(
                        CheckKind::UnnecessaryListComprehensionDict,
                        expr.location,
                    ));
                }
            }
        }
    }
    None
}

/// M186: `set([1, 2])`, `set((1, 2))`.
fn unnecessary_literal_set(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    if let [arg] = args {
        if func_name(func)? == "set" {
            let kind = match &arg.node {
                ExprKind::List { .. } => "list",
                ExprKind::Tuple { .. } => "tuple",
                _ => return None,
            };
            return Some(Check::new(
                CheckKind::UnnecessaryLiteralSet(kind.to_string()),
                expr.location,
            ));
        }
    }
    None
}

/// M187: `dict([(1, 2)])`, `dict(((1, 2),))`.
fn unnecessary_literal_dict(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    if let [arg] = args {
        if func_name(func)? == "dict" {
            let (kind, elts) = match &arg.node {
                ExprKind::Tuple { elts, .. } => ("tuple", elts),
                ExprKind::List { elts, .. } => ("list", elts),
                _ => return None,
            };
            if elts.is_empty()
                || matches!(
                    elts.first().map(|elt| &elt.node),
                    Some(ExprKind::Tuple { elts, .. }) if elts.len() == 2
                )
            {
                return Some(Check::new(
                    CheckKind::UnnecessaryLiteralDict(kind.to_string()),
                    expr.location,
                ));
            }
        }
    }
    None
}

/// M188: `list()`, `tuple()`, `dict()`, `dict(a=1)`.
fn unnecessary_collection_call(
    expr: &Expr,
    func: &Expr,
    args: &[Expr],
    keywords: &[Keyword],
) -> Option<Check> {
    if !args.is_empty() {
        return None;
    }
    match func_name(func)? {
        id @ ("list" | "tuple") if keywords.is_empty() => Some(Check::new(
            CheckKind::UnnecessaryCollectionCall(id.to_string()),
            expr.location,
        )),
        "dict" if keywords.iter().all(|keyword| keyword.node.arg.is_some()) => Some(Check::new(
            CheckKind::UnnecessaryCollectionCall("dict".to_string()),
            expr.location,
        )),
        _ => None,
    }
}

/// M189, M191: literals passed to `tuple()` or `list()`.
fn unnecessary_literal_within_call(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    let arg = args.first()?;
    let inner = match &arg.node {
        ExprKind::Tuple { .. } => "tuple",
        ExprKind::List { .. } => "list",
        _ => return None,
    };
    match func_name(func)? {
        "tuple" => Some(Check::new(
            CheckKind::UnnecessaryLiteralWithinTupleCall(inner.to_string()),
            expr.location,
        )),
        "list" => Some(Check::new(
            CheckKind::UnnecessaryLiteralWithinListCall(inner.to_string()),
            expr.location,
        )),
        _ => None,
    }
}

/// M192: `list([x for x in y])`.
fn unnecessary_list_call(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    let arg = args.first()?;
    if func_name(func)? == "list" && matches!(&arg.node, ExprKind::ListComp { .. }) {
        return Some(Check::new(CheckKind::UnnecessaryListCall, expr.location));
    }
    None
}

/// M193: `list(sorted(x))`, `reversed(sorted(x))`.
fn unnecessary_call_around_sorted(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    let outer = func_name(func)?;
    if outer != "list" && outer != "reversed" {
        return None;
    }
    if let Some(ExprKind::Call { func: inner, .. }) = args.first().map(|arg| &arg.node) {
        if func_name(inner)? == "sorted" {
            return Some(Check::new(
                CheckKind::UnnecessaryCallAroundSorted(outer.to_string()),
                expr.location,
            ));
        }
    }
    None
}

/// M194: nested container conversions like `set(tuple(x))`.
fn unnecessary_double_cast_or_process(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    let outer = func_name(func)?;
    if !matches!(outer, "list" | "tuple" | "set" | "reversed" | "sorted") {
        return None;
    }
    if let Some(ExprKind::Call { func: inner, .. }) = args.first().map(|arg| &arg.node) {
        let inner = func_name(inner)?;
        let redundant = match outer {
            "set" | "sorted" => matches!(inner, "list" | "tuple" | "reversed" | "sorted"),
            "list" | "tuple" => matches!(inner, "list" | "tuple"),
            _ => false,
        } || (outer == "set" && inner == "set");
        if redundant {
            return Some(Check::new(
                CheckKind::UnnecessaryDoubleCastOrProcess(inner.to_string(), outer.to_string()),
                expr.location,
            ));
        }
    }
    None
}

/// M195: `set(x[::-1])`, `sorted(x[::-1])`, `reversed(x[::-1])`.
fn unnecessary_subscript_reversal(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    let id = func_name(func)?;
    if !matches!(id, "set" | "sorted" | "reversed") {
        return None;
    }
    if let Some(ExprKind::Subscript { slice, .. }) = args.first().map(|arg| &arg.node) {
        if let ExprKind::Slice {
            lower: None,
            upper: None,
            step: Some(step),
        } = &slice.node
        {
            if let ExprKind::UnaryOp {
                op: Unaryop::USub,
                operand,
            } = &step.node
            {
                if let ExprKind::Constant {
                    value: Constant::Int(value),
                    ..
                } = &operand.node
                {
                    if *value == BigInt::from(1) {
                        return Some(Check::new(
                            CheckKind::UnnecessarySubscriptReversal(id.to_string()),
                            expr.location,
                        ));
                    }
                }
            }
        }
    }
    None
}

/// M196: `[x for x in y]`, `{x for x in y}`.
fn unnecessary_comprehension(
    expr: &Expr,
    elt: &Expr,
    generators: &[Comprehension],
) -> Option<Check> {
    if let [generator] = generators {
        if generator.ifs.is_empty() && generator.is_async == 0 {
            if let (ExprKind::Name { id: elt_id, .. }, ExprKind::Name { id: target_id, .. }) =
                (&elt.node, &generator.target.node)
            {
                if elt_id == target_id {
                    let kind = match &expr.node {
                        ExprKind::ListComp { .. } => "list",
                        ExprKind::SetComp { .. } => "set",
                        _ => return None,
                    };
                    return Some(Check::new(
                        CheckKind::UnnecessaryComprehension(kind.to_string()),
                        expr.location,
                    ));
                }
            }
        }
    }
    None
}

/// M197: `map(lambda ...)` that should be a comprehension or generator.
fn unnecessary_map(expr: &Expr, func: &Expr, args: &[Expr]) -> Option<Check> {
    match func_name(func)? {
        "map" => {
            if args.len() == 2 && matches!(&args[0].node, ExprKind::Lambda { .. }) {
                return Some(Check::new(
                    CheckKind::UnnecessaryMap("generator".to_string()),
                    expr.location,
                ));
            }
        }
        id @ ("list" | "set") => {
            if let Some(ExprKind::Call { func, args, .. }) = args.first().map(|arg| &arg.node) {
                if func_name(func)? == "map"
                    && matches!(args.first().map(|arg| &arg.node), Some(ExprKind::Lambda { .. }))
                {
                    return Some(Check::new(
                        CheckKind::UnnecessaryMap(id.to_string()),
                        expr.location,
                    ));
                }
            }
        }
        "dict" => {
            if let [arg] = args {
                if let ExprKind::Call { func, args, .. } = &arg.node {
                    if func_name(func)? == "map" {
                        if let Some(ExprKind::Lambda { body, .. }) =
                            args.first().map(|arg| &arg.node)
                        {
                            if matches!(
                                &body.node,
                                ExprKind::Tuple { elts, .. } | ExprKind::List { elts, .. }
                                    if elts.len() == 2
                            ) {
                                return Some(Check::new(
                                    CheckKind::UnnecessaryMap("dict".to_string()),
                                    expr.location,
                                ));
                            }
                        }
                    }
                }
            }
        }
        _ => {}
    }
    None
}

/// M198: membership tests against a comprehension.
fn comprehension_in_membership_test(
    ops: &[Cmpop],
    comparators: &[Expr],
    checks: &mut Vec<Check>,
) {
    for (op, comparator) in ops.iter().zip(comparators.iter()) {
        if matches!(op, Cmpop::In | Cmpop::NotIn)
            && matches!(
                &comparator.node,
                ExprKind::ListComp { .. } | ExprKind::SetComp { .. }
            )
        {
            checks.push(Check::new(
                CheckKind::ComprehensionInMembershipTest,
                comparator.location,
            ));
        }
    }
}

#[derive(Default)]
struct ComprehensionsVisitor {
    checks: Vec<Check>,
}

impl<'a> Visitor<'a> for ComprehensionsVisitor {
    fn visit_expr(&mut self, expr: &'a Expr) {
        match &expr.node {
            ExprKind::Call {
                func,
                args,
                keywords,
            } => {
                self.checks.extend(unnecessary_generator(expr, func, args));
                self.checks
                    .extend(unnecessary_generator_dict(expr, func, args));
                self.checks
                    .extend(unnecessary_list_comprehension_set(expr, func, args));
                self.checks
                    .extend(unnecessary_list_comprehension_dict(expr, func, args));
                self.checks.extend(unnecessary_literal_set(expr, func, args));
                self.checks
                    .extend(unnecessary_literal_dict(expr, func, args));
                self.checks
                    .extend(unnecessary_collection_call(expr, func, args, keywords));
                self.checks
                    .extend(unnecessary_literal_within_call(expr, func, args));
                self.checks.extend(unnecessary_list_call(expr, func, args));
                self.checks
                    .extend(unnecessary_call_around_sorted(expr, func, args));
                self.checks
                    .extend(unnecessary_double_cast_or_process(expr, func, args));
                self.checks
                    .extend(unnecessary_subscript_reversal(expr, func, args));
                self.checks.extend(unnecessary_map(expr, func, args));
            }
            ExprKind::ListComp { elt, generators } | ExprKind::SetComp { elt, generators } => {
                self.checks
                    .extend(unnecessary_comprehension(expr, elt, generators));
            }
            ExprKind::Compare {
                ops, comparators, ..
            } => {
                comprehension_in_membership_test(ops, comparators, &mut self.checks);
            }
            _ => {}
        }
        visitor::walk_expr(self, expr);
    }
}

pub fn comprehensions(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = ComprehensionsVisitor::default();
    visitor.visit_body(python_ast);
    checker.report_all(visitor.checks);
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::checker::check_source;
    use crate::registry::CheckCode;
    use crate::settings::Settings;

    #[test_case("x = list(i for i in y)\n", CheckCode::M181; "generator list")]
    #[test_case("x = set(i for i in y)\n", CheckCode::M182; "generator set")]
    #[test_case("x = dict((a, b) for a, b in y)\n", CheckCode::M183; "generator dict")]
    #[test_case("x = set([i for i in y])\n", CheckCode::M184; "listcomp set")]
    #[test_case("x = dict([(a, b) for a, b in y])\n", CheckCode::M185; "listcomp dict")]
    #[test_case("x = set([1, 2])\n", CheckCode::M186; "literal set")]
    #[test_case("x = dict([(1, 2)])\n", CheckCode::M187; "literal dict")]
    #[test_case("x = dict()\n", CheckCode::M188; "collection call")]
    #[test_case("x = tuple([1, 2])\n", CheckCode::M189; "literal in tuple call")]
    #[test_case("x = list((1, 2))\n", CheckCode::M191; "literal in list call")]
    #[test_case("x = list([i for i in y])\n", CheckCode::M192; "list around listcomp")]
    #[test_case("x = list(sorted(y))\n", CheckCode::M193; "list around sorted")]
    #[test_case("x = set(tuple(y))\n", CheckCode::M194; "double cast")]
    #[test_case("x = sorted(y[::-1])\n", CheckCode::M195; "subscript reversal")]
    #[test_case("x = [i for i in y]\n", CheckCode::M196; "identity comprehension")]
    #[test_case("x = map(lambda i: i + 1, y)\n", CheckCode::M197; "bare map")]
    #[test_case("found = x in [i for i in y]\n", CheckCode::M198; "membership test")]
    fn fires(contents: &str, code: CheckCode) {
        let lines: Vec<&str> = contents.lines().collect();
        let settings = Settings::for_code(code);
        let checked = check_source("test.py", &lines, &settings, &[]);
        assert_eq!(
            checked
                .checks
                .iter()
                .map(|check| *check.kind.code())
                .collect::<Vec<_>>(),
            vec![code],
            "for: {contents}"
        );
    }

    #[test_case("x = list(y)\n"; "plain conversion")]
    #[test_case("x = [i * 2 for i in y]\n"; "transforming comprehension")]
    #[test_case("x = dict(a=1)\n"; "dict with kwargs is its own code")]
    #[test_case("found = x in (i for i in y)\n"; "generator membership")]
    fn quiet(contents: &str) {
        let lines: Vec<&str> = contents.lines().collect();
        let settings = Settings::for_codes(&[
            CheckCode::M181,
            CheckCode::M182,
            CheckCode::M183,
            CheckCode::M184,
            CheckCode::M185,
            CheckCode::M186,
            CheckCode::M187,
            CheckCode::M189,
            CheckCode::M191,
            CheckCode::M192,
            CheckCode::M193,
            CheckCode::M194,
            CheckCode::M195,
            CheckCode::M196,
            CheckCode::M197,
            CheckCode::M198,
        ]);
        let checked = check_source("test.py", &lines, &settings, &[]);
        assert!(checked.checks.is_empty(), "for: {contents}");
    }
}
