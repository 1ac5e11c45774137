#![allow(clippy::collapsible_if, clippy::collapsible_else_if)]

use std::path::Path;

pub mod ast;
pub mod checker;
pub mod cli;
pub mod fs;
pub mod logging;
pub mod message;
pub mod noqa;
pub mod printer;
pub mod python;
pub mod registry;
pub mod rules;
pub mod settings;

use checker::{check_source, Checked};
use settings::Settings;

/// Run the checker over Python source code directly.
///
/// Codes named by in-source `# noqa: ...` markers are treated as expected:
/// counted, but never reported.
pub fn check(path: &Path, contents: &str, settings: &Settings) -> Checked {
    let lines: Vec<&str> = contents.lines().collect();
    let expected = noqa::extract_expected_codes(&lines);
    check_source(&path.to_string_lossy(), &lines, settings, &expected)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::check;
    use crate::registry::CheckCode;
    use crate::settings::Settings;

    #[test]
    fn noqa_markers_suppress_reporting() {
        let settings = Settings::for_code(CheckCode::M811);
        let checked = check(Path::new("test.py"), "x = (1,)  # noqa: M811\n", &settings);
        assert!(checked.checks.is_empty());
        assert_eq!(checked.counts[&CheckCode::M811], 1);
    }
}
