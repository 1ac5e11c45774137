//! M651-M655: logging message anti-patterns.

use rustpython_parser::ast::{Expr, ExprKind, Keyword, Operator, Suite};

use crate::ast::helpers::compose_call_path;
use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

const LOGGING_METHODS: &[&str] = &[
    "debug",
    "info",
    "warning",
    "warn",
    "error",
    "critical",
    "exception",
    "log",
];

/// A call looks like a logging call when it is a method named after a log
/// level on the `logging` module or something named like a logger.
fn is_logger_candidate(func: &Expr) -> Option<&str> {
    if let ExprKind::Attribute { value, attr, .. } = &func.node {
        if LOGGING_METHODS.contains(&attr.as_str()) {
            let call_path = compose_call_path(value)?;
            let tail = call_path.rsplit('.').next()?.to_lowercase();
            if call_path == "logging" || tail.contains("log") {
                return Some(attr);
            }
        }
    }
    None
}

struct LoggingVisitor {
    in_message: bool,
    in_extra: bool,
    checks: Vec<Check>,
}

impl LoggingVisitor {
    fn visit_message<'a>(&mut self, message: &'a Expr) {
        let was_in_message = self.in_message;
        self.in_message = true;
        self.visit_expr(message);
        self.in_message = was_in_message;
    }

    fn visit_extra<'a>(&mut self, keyword: &'a Keyword) {
        let was_in_extra = self.in_extra;
        self.in_extra = true;
        self.visit_expr(&keyword.node.value);
        self.in_extra = was_in_extra;
    }
}

impl<'a> Visitor<'a> for LoggingVisitor {
    fn visit_expr(&mut self, expr: &'a Expr) {
        if self.in_message && !self.in_extra {
            match &expr.node {
                ExprKind::BinOp {
                    op: Operator::Mod, ..
                } => {
                    self.checks
                        .push(Check::new(CheckKind::LoggingPercentFormat, expr.location));
                }
                ExprKind::BinOp {
                    op: Operator::Add, ..
                } => {
                    self.checks
                        .push(Check::new(CheckKind::LoggingStringConcat, expr.location));
                }
                ExprKind::JoinedStr { .. } => {
                    self.checks
                        .push(Check::new(CheckKind::LoggingFString, expr.location));
                }
                ExprKind::Call { func, .. } => {
                    if let ExprKind::Attribute { value, attr, .. } = &func.node {
                        if attr == "format" && matches!(value.node, ExprKind::Constant { .. }) {
                            self.checks
                                .push(Check::new(CheckKind::LoggingStringFormat, expr.location));
                        }
                    }
                }
                _ => {}
            }
        }

        if let ExprKind::Call {
            func,
            args,
            keywords,
        } = &expr.node
        {
            if let Some(method) = is_logger_candidate(func) {
                if method == "warn" {
                    self.checks
                        .push(Check::new(CheckKind::LoggingWarn, expr.location));
                }
                // For `.log(level, msg, ...)` the message is the second
                // positional argument.
                let message_index = usize::from(method == "log");
                self.visit_expr(func);
                for (index, arg) in args.iter().enumerate() {
                    if index == message_index {
                        self.visit_message(arg);
                    } else {
                        self.visit_expr(arg);
                    }
                }
                for keyword in keywords {
                    if keyword.node.arg.as_deref() == Some("extra") {
                        self.visit_extra(keyword);
                    } else {
                        self.visit_keyword(keyword);
                    }
                }
                return;
            }
        }
        visitor::walk_expr(self, expr);
    }
}

pub fn logging_calls(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = LoggingVisitor {
        in_message: false,
        in_extra: false,
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

    #[test_case(
        "logging.info('hello {}'.format(name))\n",
        CheckCode::M651,
        1;
        "format in message"
    )]
    #[test_case("logger.info(msg.format(name))\n", CheckCode::M651, 0; "format on variable")]
    #[test_case("logging.info('hello %s' % name)\n", CheckCode::M652, 1; "percent in message")]
    #[test_case("logging.info('hello ' + name)\n", CheckCode::M653, 1; "concat in message")]
    #[test_case("logger.error(f'failed: {err}')\n", CheckCode::M654, 1; "fstring message")]
    #[test_case("log.warn('deprecated')\n", CheckCode::M655, 1; "warn method")]
    #[test_case("logging.warning('fine %s', name)\n", CheckCode::M652, 0; "lazy formatting")]
    #[test_case(
        "logging.info('x', extra={'key': a + b})\n",
        CheckCode::M653,
        0;
        "extra subtree exempt"
    )]
    #[test_case(
        "logging.log(logging.INFO, 'hello ' + name)\n",
        CheckCode::M653,
        1;
        "log method message index"
    )]
    #[test_case("print('hello %s' % name)\n", CheckCode::M652, 0; "not a logging call")]
    fn cases(contents: &str, code: CheckCode, expected: usize) {
        assert_eq!(run(contents, code), expected, "for: {contents}");
    }
}
