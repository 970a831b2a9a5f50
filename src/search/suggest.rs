// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Auto-complete suggestion commands
//!
//! Suggestion dictionaries live outside index definitions.
//!
//! ```text
//! FT.SUGADD {key} {string} {score} [INCR] [PAYLOAD {payload}]
//! FT.SUGGET {key} {prefix} [FUZZY] [WITHSCORES] [WITHPAYLOADS] [MAX num]
//! ```

use super::args::Command;

/// `FT.SUGADD` builder
#[derive(Debug, Clone, PartialEq)]
pub struct SugAdd {
    key: String,
    string: String,
    score: f64,
    incr: bool,
    payload: Option<String>,
}

impl SugAdd {
    /// New suggestion with score 1.
    pub fn new(key: impl Into<String>, string: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            string: string.into(),
            score: 1.0,
            incr: false,
            payload: None,
        }
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Add to an existing score instead of replacing it
    pub fn incr(mut self, active: bool) -> Self {
        self.incr = active;
        self
    }

    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn serialize(&self) -> Command {
        let mut cmd = Command::new("FT.SUGADD");
        cmd.arg(&self.key).arg(&self.string).arg(self.score);
        if self.incr {
            cmd.arg("INCR");
        }
        if let Some(payload) = &self.payload {
            cmd.arg("PAYLOAD").arg(payload);
        }
        cmd
    }
}

/// `FT.SUGGET` builder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SugGet {
    key: String,
    prefix: String,
    fuzzy: bool,
    with_scores: bool,
    with_payloads: bool,
    max: Option<usize>,
}

impl SugGet {
    pub fn new(key: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Match prefixes within Levenshtein distance 1
    pub fn fuzzy(mut self) -> Self {
        self.fuzzy = true;
        self
    }

    pub fn with_scores(mut self) -> Self {
        self.with_scores = true;
        self
    }

    pub fn with_payloads(mut self) -> Self {
        self.with_payloads = true;
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn serialize(&self) -> Command {
        let mut cmd = Command::new("FT.SUGGET");
        cmd.arg(&self.key).arg(&self.prefix);
        if self.fuzzy {
            cmd.arg("FUZZY");
        }
        if self.with_scores {
            cmd.arg("WITHSCORES");
        }
        if self.with_payloads {
            cmd.arg("WITHPAYLOADS");
        }
        if let Some(max) = self.max {
            cmd.arg("MAX").arg(max);
        }
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sugadd_incr() {
        let cmd = SugAdd::new("dreamdic", "Dream").incr(true).serialize();
        assert_eq!(cmd.to_string(), "FT.SUGADD dreamdic Dream 1 INCR");
    }

    #[test]
    fn test_sugadd_score_and_payload() {
        let cmd = SugAdd::new("dic", "Test").score(2.5).payload("{\"id\":1}").serialize();
        assert_eq!(cmd.to_string(), "FT.SUGADD dic Test 2.5 PAYLOAD {\"id\":1}");
    }

    #[test]
    fn test_sugget_fuzzy_max() {
        let cmd = SugGet::new("dreamdic", "Dif").fuzzy().max(5).serialize();
        assert_eq!(cmd.to_string(), "FT.SUGGET dreamdic Dif FUZZY MAX 5");
    }

    #[test]
    fn test_sugget_all_flags() {
        let cmd = SugGet::new("dic", "te").with_payloads().with_scores().fuzzy().serialize();
        assert_eq!(cmd.to_string(), "FT.SUGGET dic te FUZZY WITHSCORES WITHPAYLOADS");
    }
}
