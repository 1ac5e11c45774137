//! Extraction of in-source suppression markers.

use once_cell::sync::Lazy;
use regex::Regex;

static NOQA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<noqa>\s*# noqa(?::\s?(?P<codes>([A-Z]+[0-9]+(?:[,\s]+)?)+))?)")
        .expect("Invalid regex")
});
static SPLIT_COMMA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]").expect("Invalid regex"));

#[derive(Debug)]
pub enum Directive<'a> {
    None,
    All(usize),
    Codes(usize, Vec<&'a str>),
}

/// Extract the `# noqa` directive from a line of source, if any.
pub fn extract_noqa_directive(line: &str) -> Directive {
    match NOQA_REGEX.captures(line) {
        Some(caps) => match caps.name("noqa") {
            Some(noqa) => match caps.name("codes") {
                Some(codes) => Directive::Codes(
                    noqa.start(),
                    SPLIT_COMMA_REGEX
                        .split(codes.as_str())
                        .map(str::trim)
                        .filter(|code| !code.is_empty())
                        .collect(),
                ),
                None => Directive::All(noqa.start()),
            },
            None => Directive::None,
        },
        None => Directive::None,
    }
}

/// Collect the codes named by `# noqa: ...` directives anywhere in the file.
///
/// These become the "expected" set: occurrences are counted but never
/// reported.
pub fn extract_expected_codes(lines: &[&str]) -> Vec<String> {
    let mut expected: Vec<String> = vec![];
    for line in lines {
        if let Directive::Codes(_, codes) = extract_noqa_directive(line) {
            for code in codes {
                if !expected.iter().any(|existing| existing == code) {
                    expected.push(code.to_string());
                }
            }
        }
    }
    expected
}

#[cfg(test)]
mod tests {
    use super::{extract_expected_codes, extract_noqa_directive, Directive};

    #[test]
    fn directives() {
        assert!(matches!(extract_noqa_directive("x = 1"), Directive::None));
        assert!(matches!(
            extract_noqa_directive("x = 1  # noqa"),
            Directive::All(_)
        ));
        match extract_noqa_directive("x = 1  # noqa: M811, M821") {
            Directive::Codes(_, codes) => assert_eq!(codes, vec!["M811", "M821"]),
            directive => panic!("unexpected directive: {directive:?}"),
        }
    }

    #[test]
    fn expected_codes() {
        let lines = vec!["x = (1,)  # noqa: M811", "y = 2", "z = []  # noqa: M811,M131"];
        assert_eq!(extract_expected_codes(&lines), vec!["M811", "M131"]);
    }
}
