use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::message::Message;
use crate::registry::CheckCode;

#[derive(Clone, ValueEnum, PartialEq, Eq, Debug)]
pub enum SerializationFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct ExpandedMessage<'a> {
    path: &'a str,
    row: usize,
    column: usize,
    code: &'a str,
    message: String,
}

pub struct Printer<W> {
    writer: W,
    format: SerializationFormat,
}

impl<W: Write> Printer<W> {
    pub fn new(writer: W, format: SerializationFormat) -> Self {
        Self { writer, format }
    }

    pub fn write_once(&mut self, messages: &[Message]) -> Result<()> {
        match self.format {
            SerializationFormat::Json => {
                let expanded: Vec<ExpandedMessage> = messages
                    .iter()
                    .map(|message| ExpandedMessage {
                        path: &message.filename,
                        row: message.location.row(),
                        column: message.location.column(),
                        code: message.kind.code().as_str(),
                        message: message.kind.body(),
                    })
                    .collect();
                writeln!(self.writer, "{}", serde_json::to_string_pretty(&expanded)?)?;
            }
            SerializationFormat::Text => {
                writeln!(self.writer, "Found {} error(s).", messages.len())?;
                for message in messages {
                    writeln!(self.writer, "{message}")?;
                }
            }
        }
        Ok(())
    }

    pub fn write_statistics(&mut self, counts: &BTreeMap<CheckCode, usize>) -> Result<()> {
        for (code, count) in counts {
            writeln!(self.writer, "{count:>8}    {}", code.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rustpython_parser::ast::Location;

    use super::{Printer, SerializationFormat};
    use crate::message::Message;
    use crate::registry::{Check, CheckKind};

    #[test]
    fn text_output_includes_counts_and_messages() {
        let messages = vec![Message::from_check(
            Check::new(CheckKind::PrintFound, Location::new(3, 0)),
            "app.py",
        )];
        let mut buffer: Vec<u8> = vec![];
        Printer::new(&mut buffer, SerializationFormat::Text)
            .write_once(&messages)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with("Found 1 error(s)."));
        assert!(output.contains("M801"));
    }

    #[test]
    fn json_output_is_parseable() {
        let messages = vec![Message::from_check(
            Check::new(CheckKind::OneElementTuple, Location::new(1, 4)),
            "app.py",
        )];
        let mut buffer: Vec<u8> = vec![];
        Printer::new(&mut buffer, SerializationFormat::Json)
            .write_once(&messages)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["code"], "M811");
        assert_eq!(value[0]["row"], 1);
        assert_eq!(value[0]["column"], 4);
    }
}
