//! M401-M423: fragile `sys.version` and `sys.version_info` usage.

use num_bigint::BigInt;
use rustc_hash::{FxHashMap, FxHashSet};
use rustpython_parser::ast::{Cmpop, Constant, Expr, ExprKind, Located, Stmt, StmtKind, Suite};

use crate::ast::helpers::match_module_member;
use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

struct SysVersionVisitor<'a> {
    from_imports: FxHashMap<&'a str, FxHashSet<&'a str>>,
    import_aliases: FxHashMap<&'a str, &'a str>,
    checks: Vec<Check>,
}

impl<'a> SysVersionVisitor<'a> {
    fn is_sys(&self, expr: &Expr, target: &str) -> bool {
        match_module_member(expr, "sys", target, &self.from_imports, &self.import_aliases)
    }

    /// M401, M402, M421, M423.
    fn check_subscript(&mut self, value: &'a Expr, slice: &'a Expr) {
        if !self.is_sys(value, "version") {
            return;
        }
        match &slice.node {
            ExprKind::Slice {
                lower: None,
                upper: Some(upper),
                step: None,
            } => {
                if let ExprKind::Constant {
                    value: Constant::Int(i),
                    ..
                } = &upper.node
                {
                    if *i == BigInt::from(1) {
                        self.checks.push(Check::new(
                            CheckKind::SysVersionSlice1Referenced,
                            value.location,
                        ));
                    } else if *i == BigInt::from(3) {
                        self.checks.push(Check::new(
                            CheckKind::SysVersionSlice3Referenced,
                            value.location,
                        ));
                    }
                }
            }
            ExprKind::Constant {
                value: Constant::Int(i),
                ..
            } => {
                if *i == BigInt::from(2) {
                    self.checks
                        .push(Check::new(CheckKind::SysVersion2Referenced, value.location));
                } else if *i == BigInt::from(0) {
                    self.checks
                        .push(Check::new(CheckKind::SysVersion0Referenced, value.location));
                }
            }
            _ => {}
        }
    }

    /// M403, M411, M413, M414, M422.
    fn check_compare(&mut self, left: &'a Expr, ops: &'a [Cmpop], comparators: &'a [Expr]) {
        match &left.node {
            ExprKind::Subscript { value, slice, .. } if self.is_sys(value, "version_info") => {
                if let ExprKind::Constant {
                    value: Constant::Int(i),
                    ..
                } = &slice.node
                {
                    if *i == BigInt::from(0) {
                        if let (
                            [Cmpop::Eq | Cmpop::NotEq],
                            [Located {
                                node:
                                    ExprKind::Constant {
                                        value: Constant::Int(n),
                                        ..
                                    },
                                ..
                            }],
                        ) = (ops, comparators)
                        {
                            if *n == BigInt::from(3) {
                                self.checks.push(Check::new(
                                    CheckKind::SysVersionInfo0Eq3Referenced,
                                    left.location,
                                ));
                            }
                        }
                    } else if *i == BigInt::from(1)
                        && is_int_comparison(ops, comparators)
                    {
                        self.checks.push(Check::new(
                            CheckKind::SysVersionInfo1CmpInt,
                            left.location,
                        ));
                    }
                }
            }
            ExprKind::Attribute { value, attr, .. }
                if attr == "minor"
                    && self.is_sys(value, "version_info")
                    && is_int_comparison(ops, comparators) =>
            {
                self.checks.push(Check::new(
                    CheckKind::SysVersionInfoMinorCmpInt,
                    left.location,
                ));
            }
            _ => {}
        }

        if self.is_sys(left, "version") {
            if let (
                [Cmpop::Lt | Cmpop::LtE | Cmpop::Gt | Cmpop::GtE],
                [Located {
                    node:
                        ExprKind::Constant {
                            value: Constant::Str(s),
                            ..
                        },
                    ..
                }],
            ) = (ops, comparators)
            {
                if s.chars().count() == 1 {
                    self.checks
                        .push(Check::new(CheckKind::SysVersionCmpStr10, left.location));
                } else {
                    self.checks
                        .push(Check::new(CheckKind::SysVersionCmpStr3, left.location));
                }
            }
        }
    }
}

fn is_int_comparison(ops: &[Cmpop], comparators: &[Expr]) -> bool {
    matches!(
        (ops, comparators),
        (
            [Cmpop::Lt | Cmpop::LtE | Cmpop::Gt | Cmpop::GtE],
            [Located {
                node: ExprKind::Constant {
                    value: Constant::Int(_),
                    ..
                },
                ..
            }],
        )
    )
}

impl<'a> Visitor<'a> for SysVersionVisitor<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.node {
            StmtKind::Import { names } => {
                for alias in names {
                    if let Some(asname) = &alias.node.asname {
                        self.import_aliases
                            .insert(asname.as_str(), alias.node.name.as_str());
                    }
                }
            }
            StmtKind::ImportFrom {
                module: Some(module),
                names,
                ..
            } => {
                for alias in names {
                    self.from_imports
                        .entry(module.as_str())
                        .or_default()
                        .insert(alias.node.name.as_str());
                    if let Some(asname) = &alias.node.asname {
                        self.import_aliases
                            .insert(asname.as_str(), alias.node.name.as_str());
                    }
                }
            }
            _ => {}
        }
        visitor::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        match &expr.node {
            ExprKind::Subscript { value, slice, .. } => {
                self.check_subscript(value, slice);
            }
            ExprKind::Compare {
                left,
                ops,
                comparators,
            } => {
                self.check_compare(left, ops, comparators);
            }
            // M412: six.PY3 inverts its meaning on a future major bump.
            ExprKind::Attribute { .. } => {
                if match_module_member(
                    expr,
                    "six",
                    "PY3",
                    &self.from_imports,
                    &self.import_aliases,
                ) {
                    self.checks
                        .push(Check::new(CheckKind::SixPY3Referenced, expr.location));
                }
            }
            ExprKind::Name { .. } => {
                if match_module_member(
                    expr,
                    "six",
                    "PY3",
                    &self.from_imports,
                    &self.import_aliases,
                ) {
                    self.checks
                        .push(Check::new(CheckKind::SixPY3Referenced, expr.location));
                }
            }
            _ => {}
        }
        visitor::walk_expr(self, expr);
    }
}

pub fn sys_version(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = SysVersionVisitor {
        from_imports: FxHashMap::default(),
        import_aliases: FxHashMap::default(),
        checks: vec![],
    };
    visitor.visit_body(python_ast);
    checker.report_all(visitor.checks);
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::checker::check_source;
    use crate::registry::CheckCode;
    use crate::settings::Settings;

    fn run(contents: &str, code: CheckCode) -> usize {
        let lines: Vec<&str> = contents.lines().collect();
        let mut settings = Settings::for_code(code);
        settings.repeat = true;
        check_source("test.py", &lines, &settings, &[]).checks.len()
    }

    #[test_case("import sys\nx = sys.version[:3]\n", CheckCode::M401, 1; "slice three")]
    #[test_case("import sys\nx = sys.version[2]\n", CheckCode::M402, 1; "index two")]
    #[test_case("import sys\nok = sys.version >= '3.5'\n", CheckCode::M403, 1; "string compare")]
    #[test_case("import sys\nok = sys.version_info[0] == 3\n", CheckCode::M411, 1; "major equals three")]
    #[test_case("import six\nif six.PY3:\n    pass\n", CheckCode::M412, 1; "six py3")]
    #[test_case("from six import PY3\nif PY3:\n    pass\n", CheckCode::M412, 1; "six py3 from import")]
    #[test_case("import sys\nok = sys.version_info[1] >= 5\n", CheckCode::M413, 1; "minor index compare")]
    #[test_case("import sys\nok = sys.version_info.minor >= 5\n", CheckCode::M414, 1; "minor attr compare")]
    #[test_case("import sys\nx = sys.version[0]\n", CheckCode::M421, 1; "index zero")]
    #[test_case("import sys\nok = sys.version >= '3'\n", CheckCode::M422, 1; "single char compare")]
    #[test_case("import sys\nx = sys.version[:1]\n", CheckCode::M423, 1; "slice one")]
    #[test_case("from sys import version_info as vi\nok = vi[0] == 3\n", CheckCode::M411, 1; "aliased version info")]
    #[test_case("import sys\nok = sys.version_info >= (3, 5)\n", CheckCode::M413, 0; "tuple compare is fine")]
    #[test_case("x = version[:3]\n", CheckCode::M401, 0; "unrelated name")]
    fn cases(contents: &str, code: CheckCode, expected: usize) {
        assert_eq!(run(contents, code), expected, "for: {contents}");
    }
}
