//! M501-M513: assorted bug patterns.

use rustc_hash::FxHashMap;
use rustpython_parser::ast::{
    Constant, Expr, ExprKind, Stmt, StmtKind, Suite, Unaryop,
};

use crate::ast::helpers::{as_const_str, collect_call_paths};
use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::python::identifiers::IDENTIFIER_REGEX;
use crate::python::keyword::KWLIST;
use crate::registry::{Check, CheckKind};

const NODE_WINDOW_SIZE: usize = 4;

const DICT_ITER_METHODS: &[&str] = &[
    "iterkeys",
    "itervalues",
    "iteritems",
    "viewkeys",
    "viewvalues",
    "viewitems",
];

const COMPAT_MODULES: &[&str] = &["six", "future"];

/// Collect the names bound or referenced within an expression.
#[derive(Default)]
struct NameFinder<'a> {
    names: FxHashMap<&'a str, &'a Expr>,
}

impl<'a> Visitor<'a> for NameFinder<'a> {
    fn visit_expr(&mut self, expr: &'a Expr) {
        if let ExprKind::Name { id, .. } = &expr.node {
            self.names.insert(id, expr);
        }
        visitor::walk_expr(self, expr);
    }
}

struct BugBearVisitor<'a> {
    checks: Vec<Check>,
    node_window: Vec<&'a Expr>,
    in_class_body: bool,
}

impl<'a> BugBearVisitor<'a> {
    fn check_call(&mut self, expr: &'a Expr, func: &'a Expr, args: &'a [Expr]) {
        match &func.node {
            ExprKind::Attribute { value, attr, .. } => {
                // M502: Python 2 dict iterator/view methods, unless routed
                // through a compatibility shim.
                if DICT_ITER_METHODS.contains(&attr.as_str()) {
                    let head = collect_call_paths(value);
                    if head
                        .first()
                        .map_or(true, |module| !COMPAT_MODULES.contains(module))
                    {
                        self.checks.push(Check::new(
                            CheckKind::DictIterMethod(attr.to_string()),
                            expr.location,
                        ));
                    }
                }
                // M505: a multi-character strip argument with repeats is
                // almost always meant as a substring.
                if matches!(attr.as_str(), "strip" | "lstrip" | "rstrip") {
                    if let [arg] = args {
                        if let Some(value) = as_const_str(arg) {
                            let chars: Vec<char> = value.chars().collect();
                            let repeated = chars
                                .iter()
                                .enumerate()
                                .any(|(index, c)| chars[..index].contains(c));
                            if chars.len() > 1 && repeated {
                                self.checks.push(Check::new(
                                    CheckKind::StripWithRepeatedCharacters(value.to_string()),
                                    expr.location,
                                ));
                            }
                        }
                    }
                }
            }
            ExprKind::Name { id, .. } => match id.as_str() {
                // M504: `super(self.__class__, self)`.
                "super" => {
                    if let [first, second] = args {
                        if let (
                            ExprKind::Attribute { value, attr, .. },
                            ExprKind::Name { id: second_id, .. },
                        ) = (&first.node, &second.node)
                        {
                            if attr == "__class__" {
                                if let ExprKind::Name { id: first_id, .. } = &value.node {
                                    if first_id == second_id {
                                        self.checks.push(Check::new(
                                            CheckKind::RedundantSuperCall,
                                            expr.location,
                                        ));
                                    }
                                }
                            }
                        }
                    }
                }
                // M507, M508: getattr with `__call__` or another constant.
                "getattr" | "hasattr" => {
                    if let [_, name] = args {
                        if let Some(name) = as_const_str(name) {
                            if name == "__call__" {
                                self.checks.push(Check::new(
                                    CheckKind::UnreliableCallableCheck,
                                    expr.location,
                                ));
                            } else if id == "getattr"
                                && IDENTIFIER_REGEX.is_match(name)
                                && !KWLIST.contains(&name)
                            {
                                self.checks.push(Check::new(
                                    CheckKind::GetAttrWithConstant,
                                    expr.location,
                                ));
                            }
                        }
                    }
                }
                // M509: setattr with a constant attribute name.
                "setattr" => {
                    if let [_, name, _] = args {
                        if let Some(name) = as_const_str(name) {
                            if IDENTIFIER_REGEX.is_match(name) && !KWLIST.contains(&name) {
                                self.checks.push(Check::new(
                                    CheckKind::SetAttrWithConstant,
                                    expr.location,
                                ));
                            }
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn check_unused_loop_variable(&mut self, target: &'a Expr, body: &'a [Stmt]) {
        let target_names = {
            let mut finder = NameFinder::default();
            finder.visit_expr(target);
            finder.names
        };
        let body_names = {
            let mut finder = NameFinder::default();
            for stmt in body {
                finder.visit_stmt(stmt);
            }
            finder.names
        };
        for (name, expr) in target_names {
            if !name.starts_with('_') && !body_names.contains_key(name) {
                self.checks.push(Check::new(
                    CheckKind::UnusedLoopControlVariable(name.to_string()),
                    expr.location,
                ));
            }
        }
    }
}

impl<'a> Visitor<'a> for BugBearVisitor<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.node {
            StmtKind::Assign { targets, .. } => {
                for target in targets {
                    match &target.node {
                        // M503: assigning to os.environ replaces the
                        // mapping without touching the environment.
                        ExprKind::Attribute { value, attr, .. } if attr == "environ" => {
                            if matches!(&value.node, ExprKind::Name { id, .. } if id == "os") {
                                self.checks.push(Check::new(
                                    CheckKind::AssignmentToOsEnviron,
                                    target.location,
                                ));
                            }
                        }
                        // M513: `__metaclass__` is ignored on Python 3.
                        ExprKind::Name { id, .. }
                            if id == "__metaclass__" && self.in_class_body =>
                        {
                            self.checks.push(Check::new(
                                CheckKind::UselessMetaclassAssignment,
                                target.location,
                            ));
                        }
                        _ => {}
                    }
                }
                visitor::walk_stmt(self, stmt);
            }
            // M511: `assert False` is stripped under `-O`.
            StmtKind::Assert { test, .. } => {
                if matches!(
                    &test.node,
                    ExprKind::Constant {
                        value: Constant::Bool(false),
                        ..
                    }
                ) {
                    self.checks
                        .push(Check::new(CheckKind::DoNotAssertFalse, stmt.location));
                }
                visitor::walk_stmt(self, stmt);
            }
            StmtKind::For { target, body, .. } | StmtKind::AsyncFor { target, body, .. } => {
                self.check_unused_loop_variable(target, body);
                visitor::walk_stmt(self, stmt);
            }
            StmtKind::ClassDef { .. } => {
                let was_in_class_body = self.in_class_body;
                self.in_class_body = true;
                visitor::walk_stmt(self, stmt);
                self.in_class_body = was_in_class_body;
            }
            StmtKind::FunctionDef { .. } | StmtKind::AsyncFunctionDef { .. } => {
                let was_in_class_body = self.in_class_body;
                self.in_class_body = false;
                visitor::walk_stmt(self, stmt);
                self.in_class_body = was_in_class_body;
            }
            _ => visitor::walk_stmt(self, stmt),
        }
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        self.node_window.push(expr);
        if self.node_window.len() > NODE_WINDOW_SIZE {
            self.node_window.remove(0);
        }

        match &expr.node {
            // M501: `++x` parses as two nested unary plus operations; the
            // parent sits one slot back in the node window.
            ExprKind::UnaryOp {
                op: Unaryop::UAdd, ..
            } => {
                if self.node_window.len() >= 2 {
                    let parent = self.node_window[self.node_window.len() - 2];
                    if let ExprKind::UnaryOp {
                        op: Unaryop::UAdd,
                        operand,
                    } = &parent.node
                    {
                        if std::ptr::eq(operand.as_ref(), expr) {
                            self.checks
                                .push(Check::new(CheckKind::UnaryPrefixIncrement, parent.location));
                        }
                    }
                }
            }
            ExprKind::Call { func, args, .. } => {
                self.check_call(expr, func, args);
            }
            // M512: an f-string with no interpolated expressions.
            ExprKind::JoinedStr { values } => {
                if !values
                    .iter()
                    .any(|value| matches!(value.node, ExprKind::FormattedValue { .. }))
                {
                    self.checks
                        .push(Check::new(CheckKind::FStringMissingPlaceholders, expr.location));
                }
            }
            _ => {}
        }
        visitor::walk_expr(self, expr);
    }
}

pub fn bug_patterns(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = BugBearVisitor {
        checks: vec![],
        node_window: vec![],
        in_class_body: false,
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

    #[test_case("x = ++n\n", CheckCode::M501, 1; "double unary plus")]
    #[test_case("x = +n\n", CheckCode::M501, 0; "single unary plus")]
    #[test_case("for k in d.iterkeys():\n    use(k)\n", CheckCode::M502, 1; "iterkeys")]
    #[test_case("for k in six.iterkeys(d):\n    use(k)\n", CheckCode::M502, 0; "six shim")]
    #[test_case("os.environ = {}\n", CheckCode::M503, 1; "environ assignment")]
    #[test_case("os.environ['K'] = 'v'\n", CheckCode::M503, 0; "environ item assignment")]
    #[test_case(
        "class A(B):\n    def f(self):\n        super(self.__class__, self).f()\n",
        CheckCode::M504,
        1;
        "redundant super"
    )]
    #[test_case(
        "class A(B):\n    def f(self):\n        super().f()\n",
        CheckCode::M504,
        0;
        "plain super"
    )]
    #[test_case("name.strip('abca')\n", CheckCode::M505, 1; "strip with repeats")]
    #[test_case("name.strip('abc')\n", CheckCode::M505, 0; "strip with unique chars")]
    #[test_case("for i in range(3):\n    pass\n", CheckCode::M506, 1; "unused loop variable")]
    #[test_case("for i in range(3):\n    use(i)\n", CheckCode::M506, 0; "used loop variable")]
    #[test_case("for _i in range(3):\n    pass\n", CheckCode::M506, 0; "underscore loop variable")]
    #[test_case("if hasattr(x, '__call__'):\n    x()\n", CheckCode::M507, 1; "hasattr call check")]
    #[test_case("v = getattr(x, 'field')\n", CheckCode::M508, 1; "getattr constant")]
    #[test_case("v = getattr(x, name)\n", CheckCode::M508, 0; "getattr dynamic")]
    #[test_case("setattr(x, 'field', v)\n", CheckCode::M509, 1; "setattr constant")]
    #[test_case("assert False\n", CheckCode::M511, 1; "assert false")]
    #[test_case("assert x\n", CheckCode::M511, 0; "assert expression")]
    #[test_case("x = f'no fields'\n", CheckCode::M512, 1; "empty f-string")]
    #[test_case("x = f'{value}'\n", CheckCode::M512, 0; "interpolated f-string")]
    #[test_case(
        "class A:\n    __metaclass__ = Meta\n",
        CheckCode::M513,
        1;
        "metaclass assignment"
    )]
    #[test_case("__metaclass__ = Meta\n", CheckCode::M513, 0; "module level metaclass")]
    fn cases(contents: &str, code: CheckCode, expected: usize) {
        assert_eq!(run(contents, code), expected, "for: {contents}");
    }
}
