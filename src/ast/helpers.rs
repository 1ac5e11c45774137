use rustc_hash::{FxHashMap, FxHashSet};
use rustpython_parser::ast::{Constant, Expr, ExprKind, Keyword, KeywordData};

fn collect_call_path_inner<'a>(expr: &'a Expr, parts: &mut Vec<&'a str>) {
    match &expr.node {
        ExprKind::Call { func, .. } => {
            collect_call_path_inner(func, parts);
        }
        ExprKind::Attribute { value, attr, .. } => {
            collect_call_path_inner(value, parts);
            parts.push(attr);
        }
        ExprKind::Name { id, .. } => {
            parts.push(id);
        }
        _ => {}
    }
}

/// Convert an `Expr` to its call path segments (like `["datetime", "date"]`).
pub fn collect_call_paths(expr: &Expr) -> Vec<&str> {
    let mut segments = vec![];
    collect_call_path_inner(expr, &mut segments);
    segments
}

/// Convert an `Expr` to its dotted call path (like `datetime.date`).
pub fn compose_call_path(expr: &Expr) -> Option<String> {
    let segments = collect_call_paths(expr);
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("."))
    }
}

/// Rewrite any import aliases on a call path.
pub fn dealias_call_path<'a>(
    call_path: Vec<&'a str>,
    import_aliases: &FxHashMap<&str, &'a str>,
) -> Vec<&'a str> {
    if let Some(head) = call_path.first() {
        if let Some(origin) = import_aliases.get(head) {
            let tail = &call_path[1..];
            let mut call_path: Vec<&str> = vec![];
            call_path.extend(origin.split('.'));
            call_path.extend(tail);
            call_path
        } else {
            call_path
        }
    } else {
        call_path
    }
}

/// Return `true` if the `call_path` is a reference to `${module}.${member}`,
/// given the modules that were `from`-imported in the current file.
pub fn match_call_path(
    call_path: &[&str],
    module: &str,
    member: &str,
    from_imports: &FxHashMap<&str, FxHashSet<&str>>,
) -> bool {
    let num_segments = call_path.len();
    if num_segments == 0 {
        return false;
    }

    if call_path[num_segments - 1] != member {
        return false;
    }

    let call_path = &call_path[..num_segments - 1];
    let num_segments = call_path.len();

    if num_segments == 0 {
        // Unqualified: a builtin, or imported from the parent module
        // (`from datetime import datetime`), including star imports.
        module.is_empty()
            || from_imports.get(module).map_or(false, |imports| {
                imports.contains(member) || imports.contains("*")
            })
    } else {
        let components: Vec<&str> = module.split('.').collect();

        // Fully qualified reference (`import datetime`, `datetime.date.today`).
        if components == call_path {
            return true;
        }

        // Imported from the grandparent (`from datetime import date`,
        // `date.today`).
        let num_matches = (0..components.len())
            .take(num_segments)
            .take_while(|i| components[components.len() - 1 - i] == call_path[num_segments - 1 - i])
            .count();
        if num_matches > 0 {
            let cut = components.len() - num_matches;
            let module = components[..cut].join(".");
            let member = components[cut];
            if from_imports
                .get(&module.as_str())
                .map_or(false, |imports| imports.contains(member))
            {
                return true;
            }
        }

        false
    }
}

/// Return `true` if the `Expr` is a reference to `${module}.${member}`.
pub fn match_module_member(
    expr: &Expr,
    module: &str,
    member: &str,
    from_imports: &FxHashMap<&str, FxHashSet<&str>>,
    import_aliases: &FxHashMap<&str, &str>,
) -> bool {
    match_call_path(
        &dealias_call_path(collect_call_paths(expr), import_aliases),
        module,
        member,
        from_imports,
    )
}

/// Return the `Keyword` with the given name, if present.
pub fn find_keyword<'a>(keywords: &'a [Keyword], keyword_name: &str) -> Option<&'a Keyword> {
    keywords.iter().find(|keyword| {
        let KeywordData { arg, .. } = &keyword.node;
        arg.as_ref().map_or(false, |arg| arg == keyword_name)
    })
}

/// Return `true` if an `Expr` is the `None` constant.
pub fn is_const_none(expr: &Expr) -> bool {
    matches!(
        &expr.node,
        ExprKind::Constant {
            value: Constant::None,
            kind: None
        },
    )
}

/// Return `true` if a keyword argument is present with a non-`None` value.
pub fn has_non_none_keyword(keywords: &[Keyword], keyword: &str) -> bool {
    find_keyword(keywords, keyword).map_or(false, |keyword| {
        let KeywordData { value, .. } = &keyword.node;
        !is_const_none(value)
    })
}

/// Return the string value of an `Expr`, if it is a string constant.
pub fn as_const_str(expr: &Expr) -> Option<&str> {
    if let ExprKind::Constant {
        value: Constant::Str(value),
        ..
    } = &expr.node
    {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use rustc_hash::{FxHashMap, FxHashSet};
    use rustpython_parser::parser;

    use super::match_module_member;

    #[test]
    fn builtin() -> Result<()> {
        let expr = parser::parse_expression("list", "<filename>")?;
        assert!(match_module_member(
            &expr,
            "",
            "list",
            &FxHashMap::default(),
            &FxHashMap::default(),
        ));
        Ok(())
    }

    #[test]
    fn fully_qualified() -> Result<()> {
        let expr = parser::parse_expression("datetime.datetime.now", "<filename>")?;
        assert!(match_module_member(
            &expr,
            "datetime.datetime",
            "now",
            &FxHashMap::default(),
            &FxHashMap::default(),
        ));
        Ok(())
    }

    #[test]
    fn unimported() -> Result<()> {
        let expr = parser::parse_expression("datetime.now", "<filename>")?;
        assert!(!match_module_member(
            &expr,
            "datetime.datetime",
            "now",
            &FxHashMap::default(),
            &FxHashMap::default(),
        ));
        Ok(())
    }

    #[test]
    fn from_parent() -> Result<()> {
        let expr = parser::parse_expression("datetime.now", "<filename>")?;
        assert!(match_module_member(
            &expr,
            "datetime.datetime",
            "now",
            &FxHashMap::from_iter([("datetime", FxHashSet::from_iter(["datetime"]))]),
            &FxHashMap::default(),
        ));
        Ok(())
    }

    #[test]
    fn from_alias() -> Result<()> {
        let expr = parser::parse_expression("dt.datetime.now", "<filename>")?;
        assert!(match_module_member(
            &expr,
            "datetime.datetime",
            "now",
            &FxHashMap::default(),
            &FxHashMap::from_iter([("dt", "datetime")]),
        ));
        Ok(())
    }
}
