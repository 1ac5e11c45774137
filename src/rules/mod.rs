pub mod bugbear;
pub mod builtins;
pub mod coding;
pub mod commented_code;
pub mod comprehensions;
pub mod copyrights;
pub mod datetimez;
pub mod format_string;
pub mod future_imports;
pub mod gettext;
pub mod line_continuation;
pub mod logging_calls;
pub mod mutable_defaults;
pub mod percent_format;
pub mod print_calls;
pub mod returns;
pub mod sort_keys;
pub mod sys_version;
pub mod tuples;
