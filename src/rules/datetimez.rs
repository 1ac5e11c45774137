//! M301-M321: naive datetime construction.

use rustc_hash::FxHashMap;
use rustpython_parser::ast::{Expr, ExprKind, Keyword, Stmt, StmtKind, Suite};

use crate::ast::helpers::{
    collect_call_paths, dealias_call_path, has_non_none_keyword, is_const_none, match_call_path,
};
use crate::ast::types::RefEquality;
use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

/// A pre-pass that records each expression's parent, so the main walk can
/// ask ancestor questions without mutating the tree.
#[derive(Default)]
struct ParentMapper<'a> {
    parents: FxHashMap<RefEquality<'a, Expr>, &'a Expr>,
    stack: Vec<&'a Expr>,
}

impl<'a> Visitor<'a> for ParentMapper<'a> {
    fn visit_expr(&mut self, expr: &'a Expr) {
        if let Some(&parent) = self.stack.last() {
            self.parents.insert(RefEquality(expr), parent);
        }
        self.stack.push(expr);
        visitor::walk_expr(self, expr);
        self.stack.pop();
    }
}

struct DatetimeVisitor<'a> {
    parents: FxHashMap<RefEquality<'a, Expr>, &'a Expr>,
    from_imports: FxHashMap<&'a str, rustc_hash::FxHashSet<&'a str>>,
    import_aliases: FxHashMap<&'a str, &'a str>,
    checks: Vec<Check>,
}

impl<'a> DatetimeVisitor<'a> {
    fn matches(&self, call_path: &[&str], module: &str, member: &str) -> bool {
        match_call_path(call_path, module, member, &self.from_imports)
    }

    /// The one safe `strptime` idiom chains `.replace(tzinfo=...)` on the
    /// call result; recognized through the parent map.
    fn strptime_is_zoned(&self, expr: &'a Expr) -> bool {
        let Some(parent) = self.parents.get(&RefEquality(expr)) else {
            return false;
        };
        let ExprKind::Attribute { attr, .. } = &parent.node else {
            return false;
        };
        if attr != "replace" {
            return false;
        }
        let Some(grandparent) = self.parents.get(&RefEquality(*parent)) else {
            return false;
        };
        if let ExprKind::Call { keywords, .. } = &grandparent.node {
            has_non_none_keyword(keywords, "tzinfo")
        } else {
            false
        }
    }

    fn check_call(
        &mut self,
        expr: &'a Expr,
        func: &'a Expr,
        args: &'a [Expr],
        keywords: &'a [Keyword],
    ) {
        let call_path = dealias_call_path(collect_call_paths(func), &self.import_aliases);
        if call_path.is_empty() {
            return;
        }

        // datetime.datetime(..., tzinfo=...) takes tzinfo as the eighth
        // positional argument.
        if self.matches(&call_path, "datetime", "datetime") {
            if (args.len() < 8 && !has_non_none_keyword(keywords, "tzinfo"))
                || (args.len() >= 8 && is_const_none(&args[7]))
            {
                self.checks
                    .push(Check::new(CheckKind::CallDatetimeWithoutTzinfo, expr.location));
            }
            return;
        }

        if self.matches(&call_path, "datetime.datetime", "today") {
            self.checks
                .push(Check::new(CheckKind::CallDatetimeToday, expr.location));
        } else if self.matches(&call_path, "datetime.datetime", "utcnow") {
            self.checks
                .push(Check::new(CheckKind::CallDatetimeUtcnow, expr.location));
        } else if self.matches(&call_path, "datetime.datetime", "utcfromtimestamp") {
            self.checks.push(Check::new(
                CheckKind::CallDatetimeUtcfromtimestamp,
                expr.location,
            ));
        } else if self.matches(&call_path, "datetime.datetime", "now") {
            if (args.is_empty() && keywords.is_empty())
                || args.first().map_or(false, is_const_none)
                || (!keywords.is_empty() && !has_non_none_keyword(keywords, "tz"))
            {
                self.checks.push(Check::new(
                    CheckKind::CallDatetimeNowWithoutTzinfo,
                    expr.location,
                ));
            }
        } else if self.matches(&call_path, "datetime.datetime", "fromtimestamp") {
            if (args.len() < 2 && !has_non_none_keyword(keywords, "tz"))
                || (args.len() >= 2 && is_const_none(&args[1]))
            {
                self.checks.push(Check::new(
                    CheckKind::CallDatetimeFromtimestamp,
                    expr.location,
                ));
            }
        } else if self.matches(&call_path, "datetime.datetime", "strptime") {
            if !self.strptime_is_zoned(expr) {
                self.checks.push(Check::new(
                    CheckKind::CallDatetimeStrptimeWithoutZone,
                    expr.location,
                ));
            }
        } else if self.matches(&call_path, "datetime.datetime", "fromordinal") {
            self.checks
                .push(Check::new(CheckKind::CallDatetimeFromordinal, expr.location));
        } else if self.matches(&call_path, "datetime", "date") {
            self.checks
                .push(Check::new(CheckKind::CallDate, expr.location));
        } else if self.matches(&call_path, "datetime.date", "today") {
            self.checks
                .push(Check::new(CheckKind::CallDateToday, expr.location));
        } else if self.matches(&call_path, "datetime.date", "fromtimestamp") {
            self.checks
                .push(Check::new(CheckKind::CallDateFromtimestamp, expr.location));
        } else if self.matches(&call_path, "datetime.date", "fromordinal") {
            self.checks
                .push(Check::new(CheckKind::CallDateFromordinal, expr.location));
        } else if self.matches(&call_path, "datetime.date", "fromisoformat") {
            self.checks
                .push(Check::new(CheckKind::CallDateFromisoformat, expr.location));
        } else if self.matches(&call_path, "datetime", "time") {
            // tzinfo is the fifth positional argument of datetime.time().
            if (args.len() < 5 && !has_non_none_keyword(keywords, "tzinfo"))
                || (args.len() >= 5 && is_const_none(&args[4]))
            {
                self.checks
                    .push(Check::new(CheckKind::CallTimeWithoutTzinfo, expr.location));
            }
        }
    }
}

impl<'a> Visitor<'a> for DatetimeVisitor<'a> {
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
        if let ExprKind::Call {
            func,
            args,
            keywords,
        } = &expr.node
        {
            self.check_call(expr, func, args, keywords);
        }
        visitor::walk_expr(self, expr);
    }
}

pub fn datetime_calls(checker: &mut Checker, python_ast: &Suite) {
    let mut mapper = ParentMapper::default();
    mapper.visit_body(python_ast);
    let mut visitor = DatetimeVisitor {
        parents: mapper.parents,
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

    #[test_case("import datetime\ndatetime.datetime(2024, 1, 1)\n", CheckCode::M301, 1; "naive constructor")]
    #[test_case("import datetime\ndatetime.datetime(2024, 1, 1, tzinfo=utc)\n", CheckCode::M301, 0; "zoned constructor")]
    #[test_case("import datetime\ndatetime.datetime(2024, 1, 1, tzinfo=None)\n", CheckCode::M301, 1; "none tzinfo")]
    #[test_case("import datetime\ndatetime.datetime.today()\n", CheckCode::M302, 1; "today")]
    #[test_case("import datetime\ndatetime.datetime.utcnow()\n", CheckCode::M303, 1; "utcnow")]
    #[test_case("import datetime\ndatetime.datetime.utcfromtimestamp(ts)\n", CheckCode::M304, 1; "utcfromtimestamp")]
    #[test_case("import datetime\ndatetime.datetime.now()\n", CheckCode::M305, 1; "naive now")]
    #[test_case("import datetime\ndatetime.datetime.now(tz=utc)\n", CheckCode::M305, 0; "zoned now")]
    #[test_case("import datetime\ndatetime.datetime.now(utc)\n", CheckCode::M305, 0; "positional zone")]
    #[test_case("from datetime import datetime\ndatetime.now()\n", CheckCode::M305, 1; "from import now")]
    #[test_case("import datetime as dt\ndt.datetime.now()\n", CheckCode::M305, 1; "aliased module now")]
    #[test_case("import datetime\ndatetime.datetime.fromtimestamp(ts)\n", CheckCode::M306, 1; "naive fromtimestamp")]
    #[test_case("import datetime\ndatetime.datetime.fromtimestamp(ts, tz=utc)\n", CheckCode::M306, 0; "zoned fromtimestamp")]
    #[test_case("import datetime\ndatetime.datetime.strptime(s, fmt)\n", CheckCode::M307, 1; "bare strptime")]
    #[test_case(
        "import datetime\ndatetime.datetime.strptime(s, fmt).replace(tzinfo=utc)\n",
        CheckCode::M307,
        0;
        "strptime replace idiom"
    )]
    #[test_case(
        "import datetime\ndatetime.datetime.strptime(s, fmt).replace(day=1)\n",
        CheckCode::M307,
        1;
        "replace without tzinfo"
    )]
    #[test_case("import datetime\ndatetime.datetime.fromordinal(o)\n", CheckCode::M308, 1; "fromordinal")]
    #[test_case("import datetime\ndatetime.date(2024, 1, 1)\n", CheckCode::M311, 1; "date constructor")]
    #[test_case("import datetime\ndatetime.date.today()\n", CheckCode::M312, 1; "date today")]
    #[test_case("import datetime\ndatetime.date.fromtimestamp(ts)\n", CheckCode::M313, 1; "date fromtimestamp")]
    #[test_case("import datetime\ndatetime.date.fromordinal(o)\n", CheckCode::M314, 1; "date fromordinal")]
    #[test_case("import datetime\ndatetime.date.fromisoformat(s)\n", CheckCode::M315, 1; "date fromisoformat")]
    #[test_case("import datetime\ndatetime.time(12, 30)\n", CheckCode::M321, 1; "naive time")]
    #[test_case("import datetime\ndatetime.time(12, 30, tzinfo=utc)\n", CheckCode::M321, 0; "zoned time")]
    #[test_case("x.datetime.now()\n", CheckCode::M305, 0; "unrelated attribute chain")]
    fn cases(contents: &str, code: CheckCode, expected: usize) {
        assert_eq!(run(contents, code), expected, "for: {contents}");
    }
}
