use std::cmp::Ordering;
use std::fmt;

use colored::Colorize;
use rustpython_parser::ast::Location;

use crate::registry::{Check, CheckKind};

/// A diagnostic bound to the file it was found in.
#[derive(Debug, PartialEq, Eq)]
pub struct Message {
    pub kind: CheckKind,
    pub location: Location,
    pub filename: String,
}

impl Message {
    pub fn from_check(check: Check, filename: &str) -> Self {
        Self {
            kind: check.kind,
            location: check.location,
            filename: filename.to_string(),
        }
    }
}

impl Ord for Message {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.filename, self.location.row(), self.location.column()).cmp(&(
            &other.filename,
            other.location.row(),
            other.location.column(),
        ))
    }
}

impl PartialOrd for Message {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{} {} {}",
            self.filename.white().bold(),
            ":".cyan(),
            self.location.row(),
            ":".cyan(),
            self.location.column() + 1,
            ":".cyan(),
            self.kind.code().as_str().red().bold(),
            self.kind.body(),
        )
    }
}
