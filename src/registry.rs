//! Registry of check codes and their message kinds.

use rustpython_parser::ast::Location;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

#[derive(
    AsRefStr,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Debug,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub enum CheckCode {
    // coding
    M101,
    M102,
    // copyright
    M111,
    M112,
    // shadowed builtins
    M131,
    M132,
    // comprehensions
    M181,
    M182,
    M183,
    M184,
    M185,
    M186,
    M187,
    M188,
    M189,
    M191,
    M192,
    M193,
    M194,
    M195,
    M196,
    M197,
    M198,
    // dictionaries with unsorted keys
    M201,
    // naive datetime usage
    M301,
    M302,
    M303,
    M304,
    M305,
    M306,
    M307,
    M308,
    M311,
    M312,
    M313,
    M314,
    M315,
    M321,
    // sys.version usage
    M401,
    M402,
    M403,
    M411,
    M412,
    M413,
    M414,
    M421,
    M422,
    M423,
    // bug patterns
    M501,
    M502,
    M503,
    M504,
    M505,
    M506,
    M507,
    M508,
    M509,
    M511,
    M512,
    M513,
    // printf-style formatting
    M601,
    // str.format() field consistency
    M611,
    M612,
    M613,
    M621,
    M622,
    M623,
    M624,
    M625,
    // logging
    M651,
    M652,
    M653,
    M654,
    M655,
    // __future__ imports
    M701,
    M702,
    // gettext
    M711,
    // statements
    M801,
    M811,
    M821,
    M822,
    M831,
    M841,
    // return statements
    M851,
    M852,
    M853,
    M854,
    // parse failure
    M901,
}

impl CheckCode {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CheckKind {
    // coding
    MissingCoding,
    UnknownEncoding(String),
    // copyright
    MissingCopyright,
    WrongCopyrightHolder,
    // shadowed builtins
    BuiltinShadowing(String),
    BuiltinArgumentShadowing(String),
    // comprehensions
    UnnecessaryGeneratorList,
    UnnecessaryGeneratorSet,
    UnnecessaryGeneratorDict,
    UnnecessaryListComprehensionSet,
    UnnecessaryListComprehensionDict,
    UnnecessaryLiteralSet(String),
    UnnecessaryLiteralDict(String),
    UnnecessaryCollectionCall(String),
    UnnecessaryLiteralWithinTupleCall(String),
    UnnecessaryLiteralWithinListCall(String),
    UnnecessaryListCall,
    UnnecessaryCallAroundSorted(String),
    UnnecessaryDoubleCastOrProcess(String, String),
    UnnecessarySubscriptReversal(String),
    UnnecessaryComprehension(String),
    UnnecessaryMap(String),
    ComprehensionInMembershipTest,
    // dictionaries with unsorted keys
    UnsortedDictKeys(String, String),
    // naive datetime usage
    CallDatetimeWithoutTzinfo,
    CallDatetimeToday,
    CallDatetimeUtcnow,
    CallDatetimeUtcfromtimestamp,
    CallDatetimeNowWithoutTzinfo,
    CallDatetimeFromtimestamp,
    CallDatetimeStrptimeWithoutZone,
    CallDatetimeFromordinal,
    CallDate,
    CallDateToday,
    CallDateFromtimestamp,
    CallDateFromordinal,
    CallDateFromisoformat,
    CallTimeWithoutTzinfo,
    // sys.version usage
    SysVersionSlice3Referenced,
    SysVersion2Referenced,
    SysVersionCmpStr3,
    SysVersionInfo0Eq3Referenced,
    SixPY3Referenced,
    SysVersionInfo1CmpInt,
    SysVersionInfoMinorCmpInt,
    SysVersion0Referenced,
    SysVersionCmpStr10,
    SysVersionSlice1Referenced,
    // bug patterns
    UnaryPrefixIncrement,
    DictIterMethod(String),
    AssignmentToOsEnviron,
    RedundantSuperCall,
    StripWithRepeatedCharacters(String),
    UnusedLoopControlVariable(String),
    UnreliableCallableCheck,
    GetAttrWithConstant,
    SetAttrWithConstant,
    DoNotAssertFalse,
    FStringMissingPlaceholders,
    UselessMetaclassAssignment,
    // printf-style formatting
    PercentFormat(String),
    // str.format() field consistency
    FormatFieldsInDocstring,
    FormatFieldsInString,
    MixedFormatFieldNumbering,
    UnusedFormatPositions(String),
    UnusedFormatKeywords(String),
    MissingFormatPositions(String),
    MissingFormatKeywords(String),
    UnverifiableFormatCall,
    // logging
    LoggingStringFormat,
    LoggingPercentFormat,
    LoggingStringConcat,
    LoggingFString,
    LoggingWarn,
    // __future__ imports
    MissingFutureImports(String, String),
    NoFutureImports(String),
    // gettext
    GettextImportAlias(String),
    // statements
    PrintFound,
    OneElementTuple,
    MutableDefaultArgument(String),
    UnverifiedDefaultArgument(String),
    LineContinuation,
    CommentedCode,
    // return statements
    UnnecessaryReturnNone,
    ImplicitReturnValue,
    ImplicitReturn,
    UnnecessaryAssign(String),
    // parse failure
    SyntaxError(String, String),
}

impl CheckKind {
    /// The code for the check.
    pub fn code(&self) -> &'static CheckCode {
        match self {
            CheckKind::MissingCoding => &CheckCode::M101,
            CheckKind::UnknownEncoding(..) => &CheckCode::M102,
            CheckKind::MissingCopyright => &CheckCode::M111,
            CheckKind::WrongCopyrightHolder => &CheckCode::M112,
            CheckKind::BuiltinShadowing(..) => &CheckCode::M131,
            CheckKind::BuiltinArgumentShadowing(..) => &CheckCode::M132,
            CheckKind::UnnecessaryGeneratorList => &CheckCode::M181,
            CheckKind::UnnecessaryGeneratorSet => &CheckCode::M182,
            CheckKind::UnnecessaryGeneratorDict => &CheckCode::M183,
            CheckKind::UnnecessaryListComprehensionSet => &CheckCode::M184,
            CheckKind::UnnecessaryListComprehensionDict => &CheckCode::M185,
            CheckKind::UnnecessaryLiteralSet(..) => &CheckCode::M186,
            CheckKind::UnnecessaryLiteralDict(..) => &CheckCode::M187,
            CheckKind::UnnecessaryCollectionCall(..) => &CheckCode::M188,
            CheckKind::UnnecessaryLiteralWithinTupleCall(..) => &CheckCode::M189,
            CheckKind::UnnecessaryLiteralWithinListCall(..) => &CheckCode::M191,
            CheckKind::UnnecessaryListCall => &CheckCode::M192,
            CheckKind::UnnecessaryCallAroundSorted(..) => &CheckCode::M193,
            CheckKind::UnnecessaryDoubleCastOrProcess(..) => &CheckCode::M194,
            CheckKind::UnnecessarySubscriptReversal(..) => &CheckCode::M195,
            CheckKind::UnnecessaryComprehension(..) => &CheckCode::M196,
            CheckKind::UnnecessaryMap(..) => &CheckCode::M197,
            CheckKind::ComprehensionInMembershipTest => &CheckCode::M198,
            CheckKind::UnsortedDictKeys(..) => &CheckCode::M201,
            CheckKind::CallDatetimeWithoutTzinfo => &CheckCode::M301,
            CheckKind::CallDatetimeToday => &CheckCode::M302,
            CheckKind::CallDatetimeUtcnow => &CheckCode::M303,
            CheckKind::CallDatetimeUtcfromtimestamp => &CheckCode::M304,
            CheckKind::CallDatetimeNowWithoutTzinfo => &CheckCode::M305,
            CheckKind::CallDatetimeFromtimestamp => &CheckCode::M306,
            CheckKind::CallDatetimeStrptimeWithoutZone => &CheckCode::M307,
            CheckKind::CallDatetimeFromordinal => &CheckCode::M308,
            CheckKind::CallDate => &CheckCode::M311,
            CheckKind::CallDateToday => &CheckCode::M312,
            CheckKind::CallDateFromtimestamp => &CheckCode::M313,
            CheckKind::CallDateFromordinal => &CheckCode::M314,
            CheckKind::CallDateFromisoformat => &CheckCode::M315,
            CheckKind::CallTimeWithoutTzinfo => &CheckCode::M321,
            CheckKind::SysVersionSlice3Referenced => &CheckCode::M401,
            CheckKind::SysVersion2Referenced => &CheckCode::M402,
            CheckKind::SysVersionCmpStr3 => &CheckCode::M403,
            CheckKind::SysVersionInfo0Eq3Referenced => &CheckCode::M411,
            CheckKind::SixPY3Referenced => &CheckCode::M412,
            CheckKind::SysVersionInfo1CmpInt => &CheckCode::M413,
            CheckKind::SysVersionInfoMinorCmpInt => &CheckCode::M414,
            CheckKind::SysVersion0Referenced => &CheckCode::M421,
            CheckKind::SysVersionCmpStr10 => &CheckCode::M422,
            CheckKind::SysVersionSlice1Referenced => &CheckCode::M423,
            CheckKind::UnaryPrefixIncrement => &CheckCode::M501,
            CheckKind::DictIterMethod(..) => &CheckCode::M502,
            CheckKind::AssignmentToOsEnviron => &CheckCode::M503,
            CheckKind::RedundantSuperCall => &CheckCode::M504,
            CheckKind::StripWithRepeatedCharacters(..) => &CheckCode::M505,
            CheckKind::UnusedLoopControlVariable(..) => &CheckCode::M506,
            CheckKind::UnreliableCallableCheck => &CheckCode::M507,
            CheckKind::GetAttrWithConstant => &CheckCode::M508,
            CheckKind::SetAttrWithConstant => &CheckCode::M509,
            CheckKind::DoNotAssertFalse => &CheckCode::M511,
            CheckKind::FStringMissingPlaceholders => &CheckCode::M512,
            CheckKind::UselessMetaclassAssignment => &CheckCode::M513,
            CheckKind::PercentFormat(..) => &CheckCode::M601,
            CheckKind::FormatFieldsInDocstring => &CheckCode::M611,
            CheckKind::FormatFieldsInString => &CheckCode::M612,
            CheckKind::MixedFormatFieldNumbering => &CheckCode::M613,
            CheckKind::UnusedFormatPositions(..) => &CheckCode::M621,
            CheckKind::UnusedFormatKeywords(..) => &CheckCode::M622,
            CheckKind::MissingFormatPositions(..) => &CheckCode::M623,
            CheckKind::MissingFormatKeywords(..) => &CheckCode::M624,
            CheckKind::UnverifiableFormatCall => &CheckCode::M625,
            CheckKind::LoggingStringFormat => &CheckCode::M651,
            CheckKind::LoggingPercentFormat => &CheckCode::M652,
            CheckKind::LoggingStringConcat => &CheckCode::M653,
            CheckKind::LoggingFString => &CheckCode::M654,
            CheckKind::LoggingWarn => &CheckCode::M655,
            CheckKind::MissingFutureImports(..) => &CheckCode::M701,
            CheckKind::NoFutureImports(..) => &CheckCode::M702,
            CheckKind::GettextImportAlias(..) => &CheckCode::M711,
            CheckKind::PrintFound => &CheckCode::M801,
            CheckKind::OneElementTuple => &CheckCode::M811,
            CheckKind::MutableDefaultArgument(..) => &CheckCode::M821,
            CheckKind::UnverifiedDefaultArgument(..) => &CheckCode::M822,
            CheckKind::LineContinuation => &CheckCode::M831,
            CheckKind::CommentedCode => &CheckCode::M841,
            CheckKind::UnnecessaryReturnNone => &CheckCode::M851,
            CheckKind::ImplicitReturnValue => &CheckCode::M852,
            CheckKind::ImplicitReturn => &CheckCode::M853,
            CheckKind::UnnecessaryAssign(..) => &CheckCode::M854,
            CheckKind::SyntaxError(..) => &CheckCode::M901,
        }
    }

    /// The body text for the check.
    pub fn body(&self) -> String {
        match self {
            CheckKind::MissingCoding => "coding magic comment not found".to_string(),
            CheckKind::UnknownEncoding(encoding) => {
                format!("unknown encoding ({encoding}) found in coding magic comment")
            }
            CheckKind::MissingCopyright => "copyright notice not present".to_string(),
            CheckKind::WrongCopyrightHolder => {
                "copyright notice contains invalid author".to_string()
            }
            CheckKind::BuiltinShadowing(name) => {
                format!(
                    "`{name}` is a Python builtin and is being shadowed; consider renaming the \
                     variable"
                )
            }
            CheckKind::BuiltinArgumentShadowing(name) => {
                format!(
                    "`{name}` is used as an argument and thus shadows a Python builtin; consider \
                     renaming the argument"
                )
            }
            CheckKind::UnnecessaryGeneratorList => {
                "unnecessary generator; rewrite as a list comprehension".to_string()
            }
            CheckKind::UnnecessaryGeneratorSet => {
                "unnecessary generator; rewrite as a set comprehension".to_string()
            }
            CheckKind::UnnecessaryGeneratorDict => {
                "unnecessary generator; rewrite as a dict comprehension".to_string()
            }
            CheckKind::UnnecessaryListComprehensionSet => {
                "unnecessary list comprehension; rewrite as a set comprehension".to_string()
            }
            CheckKind::UnnecessaryListComprehensionDict => {
                "unnecessary list comprehension; rewrite as a dict comprehension".to_string()
            }
            CheckKind::UnnecessaryLiteralSet(obj_type) => {
                format!("unnecessary {obj_type} literal; rewrite as a set literal")
            }
            CheckKind::UnnecessaryLiteralDict(obj_type) => {
                format!("unnecessary {obj_type} literal; rewrite as a dict literal")
            }
            CheckKind::UnnecessaryCollectionCall(obj_type) => {
                format!("unnecessary `{obj_type}()` call; rewrite as a literal")
            }
            CheckKind::UnnecessaryLiteralWithinTupleCall(obj_type) => {
                format!(
                    "unnecessary {obj_type} literal passed to `tuple()`; rewrite as a tuple \
                     literal"
                )
            }
            CheckKind::UnnecessaryLiteralWithinListCall(obj_type) => {
                format!(
                    "unnecessary {obj_type} literal passed to `list()`; rewrite as a list literal"
                )
            }
            CheckKind::UnnecessaryListCall => {
                "unnecessary `list()` call around a list comprehension".to_string()
            }
            CheckKind::UnnecessaryCallAroundSorted(func) => {
                format!("unnecessary `{func}()` call around `sorted()`")
            }
            CheckKind::UnnecessaryDoubleCastOrProcess(inner, outer) => {
                format!("unnecessary `{inner}()` call within `{outer}()`")
            }
            CheckKind::UnnecessarySubscriptReversal(func) => {
                format!("unnecessary subscript reversal of iterable within `{func}()`")
            }
            CheckKind::UnnecessaryComprehension(obj_type) => {
                format!("unnecessary {obj_type} comprehension; use the iterable directly")
            }
            CheckKind::UnnecessaryMap(obj_type) => {
                format!("unnecessary `map()` usage; rewrite using a {obj_type} expression")
            }
            CheckKind::ComprehensionInMembershipTest => {
                "comprehension in membership test; use a generator expression".to_string()
            }
            CheckKind::UnsortedDictKeys(key, before) => {
                format!("dictionary key `{key}` should be listed before `{before}`")
            }
            CheckKind::CallDatetimeWithoutTzinfo => {
                "use of `datetime.datetime()` without `tzinfo` argument".to_string()
            }
            CheckKind::CallDatetimeToday => "use of `datetime.datetime.today()`".to_string(),
            CheckKind::CallDatetimeUtcnow => "use of `datetime.datetime.utcnow()`".to_string(),
            CheckKind::CallDatetimeUtcfromtimestamp => {
                "use of `datetime.datetime.utcfromtimestamp()`".to_string()
            }
            CheckKind::CallDatetimeNowWithoutTzinfo => {
                "use of `datetime.datetime.now()` without `tz` argument".to_string()
            }
            CheckKind::CallDatetimeFromtimestamp => {
                "use of `datetime.datetime.fromtimestamp()` without `tz` argument".to_string()
            }
            CheckKind::CallDatetimeStrptimeWithoutZone => {
                "use of `datetime.datetime.strptime()` without immediate `.replace(tzinfo=)`"
                    .to_string()
            }
            CheckKind::CallDatetimeFromordinal => {
                "use of `datetime.datetime.fromordinal()`".to_string()
            }
            CheckKind::CallDate => "use of `datetime.date()`".to_string(),
            CheckKind::CallDateToday => "use of `datetime.date.today()`".to_string(),
            CheckKind::CallDateFromtimestamp => {
                "use of `datetime.date.fromtimestamp()`".to_string()
            }
            CheckKind::CallDateFromordinal => "use of `datetime.date.fromordinal()`".to_string(),
            CheckKind::CallDateFromisoformat => {
                "use of `datetime.date.fromisoformat()`".to_string()
            }
            CheckKind::CallTimeWithoutTzinfo => {
                "use of `datetime.time()` without `tzinfo` argument".to_string()
            }
            CheckKind::SysVersionSlice3Referenced => {
                "`sys.version[:3]` referenced (python3.10); use `sys.version_info`".to_string()
            }
            CheckKind::SysVersion2Referenced => {
                "`sys.version[2]` referenced (python3.10); use `sys.version_info`".to_string()
            }
            CheckKind::SysVersionCmpStr3 => {
                "`sys.version` compared to string (python3.10); use `sys.version_info`"
                    .to_string()
            }
            CheckKind::SysVersionInfo0Eq3Referenced => {
                "`sys.version_info[0] == 3` referenced (python4); use `>=`".to_string()
            }
            CheckKind::SixPY3Referenced => {
                "`six.PY3` referenced (python4); use `not six.PY2`".to_string()
            }
            CheckKind::SysVersionInfo1CmpInt => {
                "`sys.version_info[1]` compared to integer (python4); compare `sys.version_info` \
                 to a tuple"
                    .to_string()
            }
            CheckKind::SysVersionInfoMinorCmpInt => {
                "`sys.version_info.minor` compared to integer (python4); compare \
                 `sys.version_info` to a tuple"
                    .to_string()
            }
            CheckKind::SysVersion0Referenced => {
                "`sys.version[0]` referenced (python10); use `sys.version_info`".to_string()
            }
            CheckKind::SysVersionCmpStr10 => {
                "`sys.version` compared to string (python10); use `sys.version_info`".to_string()
            }
            CheckKind::SysVersionSlice1Referenced => {
                "`sys.version[:1]` referenced (python10); use `sys.version_info`".to_string()
            }
            CheckKind::UnaryPrefixIncrement => {
                "Python does not support the unary prefix increment".to_string()
            }
            CheckKind::DictIterMethod(method) => {
                format!("use of dict method `{method}()`; use the Python 3 equivalent")
            }
            CheckKind::AssignmentToOsEnviron => {
                "assigning to `os.environ` does not clear the environment".to_string()
            }
            CheckKind::RedundantSuperCall => {
                "`super(self.__class__, self)` is redundant and fragile; use `super()`".to_string()
            }
            CheckKind::StripWithRepeatedCharacters(arg) => {
                format!(
                    "using `.strip()` with repeated characters ({arg}); the argument is a set of \
                     characters"
                )
            }
            CheckKind::UnusedLoopControlVariable(name) => {
                format!("loop control variable `{name}` not used within the loop body")
            }
            CheckKind::UnreliableCallableCheck => {
                "checking for `__call__` is unreliable; use `callable()`".to_string()
            }
            CheckKind::GetAttrWithConstant => {
                "do not call `getattr` with a constant attribute value".to_string()
            }
            CheckKind::SetAttrWithConstant => {
                "do not call `setattr` with a constant attribute value".to_string()
            }
            CheckKind::DoNotAssertFalse => {
                "do not `assert False`; raise `AssertionError` instead".to_string()
            }
            CheckKind::FStringMissingPlaceholders => {
                "f-string without any placeholders".to_string()
            }
            CheckKind::UselessMetaclassAssignment => {
                "assigning to `__metaclass__` has no effect on Python 3".to_string()
            }
            CheckKind::PercentFormat(format_spec) => format!("found {format_spec} formatting"),
            CheckKind::FormatFieldsInDocstring => {
                "docstring contains format field(s) but is never formatted".to_string()
            }
            CheckKind::FormatFieldsInString => {
                "string contains format field(s) but is never formatted".to_string()
            }
            CheckKind::MixedFormatFieldNumbering => {
                "implicit and explicit format field numbering are mixed".to_string()
            }
            CheckKind::UnusedFormatPositions(positions) => {
                format!("unused positional format argument(s): {positions}")
            }
            CheckKind::UnusedFormatKeywords(keywords) => {
                format!("unused keyword format argument(s): {keywords}")
            }
            CheckKind::MissingFormatPositions(positions) => {
                format!("missing positional format argument(s): {positions}")
            }
            CheckKind::MissingFormatKeywords(keywords) => {
                format!("missing keyword format argument(s): {keywords}")
            }
            CheckKind::UnverifiableFormatCall => {
                "format call uses `*args` or `**kwargs`; fields cannot be verified".to_string()
            }
            CheckKind::LoggingStringFormat => "logging statement uses `str.format()`".to_string(),
            CheckKind::LoggingPercentFormat => "logging statement uses `%`".to_string(),
            CheckKind::LoggingStringConcat => "logging statement uses `+`".to_string(),
            CheckKind::LoggingFString => "logging statement uses an f-string".to_string(),
            CheckKind::LoggingWarn => {
                "logging statement uses deprecated `warn()`; use `warning()`".to_string()
            }
            CheckKind::MissingFutureImports(expected, found) => {
                format!("expected these `__future__` imports: {expected}; found: {found}")
            }
            CheckKind::NoFutureImports(expected) => {
                format!("expected these `__future__` imports: {expected}; found none")
            }
            CheckKind::GettextImportAlias(name) => {
                format!("gettext-style import of `{name}` bound to the alias `_`")
            }
            CheckKind::PrintFound => "`print` statement found".to_string(),
            CheckKind::OneElementTuple => "one-element tuple found".to_string(),
            CheckKind::MutableDefaultArgument(obj_type) => {
                format!("mutable default argument of type {obj_type}")
            }
            CheckKind::UnverifiedDefaultArgument(call) => {
                format!(
                    "default argument is a call to `{call}()`, which may return a mutable object"
                )
            }
            CheckKind::LineContinuation => {
                "use of line continuation (`\\`) outside `assert` and `with`".to_string()
            }
            CheckKind::CommentedCode => "commented code lines should be removed".to_string(),
            CheckKind::UnnecessaryReturnNone => "unnecessary explicit `return None`".to_string(),
            CheckKind::ImplicitReturnValue => {
                "bare `return` in a function that returns values; add an explicit value"
                    .to_string()
            }
            CheckKind::ImplicitReturn => {
                "control may reach the end of a function that returns values; add an explicit \
                 `return`"
                    .to_string()
            }
            CheckKind::UnnecessaryAssign(name) => {
                format!("unnecessary assignment to `{name}` immediately before `return`")
            }
            CheckKind::SyntaxError(error_type, message) => format!("{error_type}: {message}"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Check {
    pub kind: CheckKind,
    pub location: Location,
}

impl Check {
    pub fn new(kind: CheckKind, location: Location) -> Self {
        Self { kind, location }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::CheckCode;

    #[test]
    fn code_serialization_round_trips() {
        for code in CheckCode::iter() {
            assert_eq!(CheckCode::from_str(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn codes_share_the_m_prefix() {
        for code in CheckCode::iter() {
            assert!(code.as_str().starts_with('M'));
        }
    }
}
