use indexmap::IndexMap;

use crate::error::{RelayError, Result};

/// Build parameters parsed from a `!runparams` message.
///
/// Keys keep first-seen order. A key given on several lines collects every
/// value, in message order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBlock {
    values: IndexMap<String, Vec<String>>,
}

impl ParameterBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flattened `(key, value)` pairs, one per value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }
}

/// Parses
///
/// ```text
/// !runparams
/// <pipeline name>
/// <key> <value>
/// <key> <value>
/// ```
///
/// into the pipeline name and its parameters. Blank parameter lines are
/// skipped; each other line is split on its first space.
pub fn parse(message: &str) -> Result<(String, ParameterBlock)> {
    let lines: Vec<&str> = message.lines().collect();
    if lines.len() < 3 {
        return Err(RelayError::Format(
            "expected a command line, a pipeline name and at least one parameter".to_string(),
        ));
    }

    let pipeline = lines[1].trim();
    if pipeline.is_empty() {
        return Err(RelayError::Format(
            "pipeline name must be on the second line".to_string(),
        ));
    }

    let mut block = ParameterBlock::new();
    for line in lines[2..].iter().map(|line| line.trim()) {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(' ').ok_or_else(|| {
            RelayError::Format(format!("invalid parameter format: '{line}'"))
        })?;
        block.push(key, value.trim_start());
    }

    if block.is_empty() {
        return Err(RelayError::Format("no parameters given".to_string()));
    }

    Ok((pipeline.to_string(), block))
}
