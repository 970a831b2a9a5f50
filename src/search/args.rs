// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Command arguments
//!
//! Every builder in this crate serializes into a [`Command`]: an ordered list
//! of [`Arg`] tokens that is sent to the server verbatim.
//!
//! ```text
//! Command ["FT.CREATE", "idx", "ON", "HASH", "PREFIX", 1, "drd:", ...]
//!     ├─→ Display  → "FT.CREATE idx ON HASH PREFIX 1 drd: ..."
//!     └─→ to_cmd() → redis::Cmd
//! ```

use std::fmt;

use redis::{RedisWrite, ToRedisArgs};

/// A single positional argument of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Keyword or free text
    Str(String),
    /// Counts, seconds, offsets
    Int(i64),
    /// Weights, scores, coordinates
    Float(f64),
}

impl Arg {
    /// The argument as text, when it is a string token.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(i) => write!(f, "{}", i),
            Arg::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Arg::Int(value as i64)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl ToRedisArgs for Arg {
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        // Same bytes as Display
        out.write_arg(self.to_string().as_bytes());
    }
}

/// An ordered, flattened command: command name first, then its arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Command {
    args: Vec<Arg>,
}

impl Command {
    /// Start a command with its name (e.g. `FT.SEARCH`).
    pub fn new(name: impl Into<Arg>) -> Self {
        Self {
            args: vec![name.into()],
        }
    }

    /// Append one argument.
    pub fn arg(&mut self, arg: impl Into<Arg>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Append a `count value...` block.
    pub fn counted<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: ExactSizeIterator,
        S: Into<Arg>,
    {
        let values = values.into_iter();
        self.args.push(Arg::from(values.len()));
        self.args.extend(values.map(Into::into));
        self
    }

    /// Command name (first token).
    pub fn name(&self) -> &str {
        self.args.first().and_then(Arg::as_str).unwrap_or("")
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn into_args(self) -> Vec<Arg> {
        self.args
    }

    /// Tokens rendered as strings, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.args.iter().map(ToString::to_string).collect()
    }

    /// Build the `redis` command for dispatch.
    pub fn to_cmd(&self) -> redis::Cmd {
        let mut cmd = redis::Cmd::new();
        for arg in &self.args {
            cmd.arg(arg);
        }
        cmd
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", arg)?;
        }
        Ok(())
    }
}

impl Extend<Arg> for Command {
    fn extend<T: IntoIterator<Item = Arg>>(&mut self, iter: T) {
        self.args.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_tokens() {
        let mut cmd = Command::new("FT.SEARCH");
        cmd.arg("idx").arg("hello").arg("LIMIT").arg(0i64).arg(10i64);
        assert_eq!(cmd.to_string(), "FT.SEARCH idx hello LIMIT 0 10");
        assert_eq!(cmd.name(), "FT.SEARCH");
        assert_eq!(cmd.len(), 6);
    }

    #[test]
    fn test_float_rendering() {
        assert_eq!(Arg::Float(2.5).to_string(), "2.5");
        assert_eq!(Arg::Float(2.0).to_string(), "2");
        assert_eq!(Arg::Float(-0.25).to_string(), "-0.25");
    }

    #[test]
    fn test_counted_block() {
        let mut cmd = Command::new("FT.CREATE");
        cmd.arg("PREFIX").counted(["a:", "b:"]);
        assert_eq!(cmd.to_string(), "FT.CREATE PREFIX 2 a: b:");
    }

    #[test]
    fn test_to_cmd_packs_every_token() {
        let mut cmd = Command::new("FT.SUGGET");
        cmd.arg("dic").arg("Dif").arg("MAX").arg(5usize);
        let packed = cmd.to_cmd().get_packed_command();
        let text = String::from_utf8(packed).unwrap();
        assert!(text.starts_with("*5\r\n"));
        assert!(text.contains("$9\r\nFT.SUGGET\r\n"));
        assert!(text.ends_with("$1\r\n5\r\n"));
    }
}
