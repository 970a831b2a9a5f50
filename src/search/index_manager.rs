// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index Manager
//!
//! Builds RediSearch index definitions and keeps a named registry of them.
//!
//! # RediSearch Index Creation
//!
//! ```text
//! FT.CREATE {index}
//!     [ON {data_type}]
//!        [PREFIX {count} {prefix} ...]
//!        [FILTER {filter}]
//!        [LANGUAGE {default_lang}] [LANGUAGE_FIELD {lang_attribute}]
//!        [SCORE {default_score}] [SCORE_FIELD {score_attribute}]
//!        [PAYLOAD_FIELD {payload_attribute}]
//!     [MAXTEXTFIELDS] [TEMPORARY {seconds}] [NOOFFSETS] [NOFIELDS] [NOFREQS] [SKIPINITIALSCAN]
//!     [STOPWORDS {num} {stopword} ...]
//!     SCHEMA {identifier} [AS {attribute}]
//!         TEXT [NOSTEM] [SORTABLE [UNF]] [WEIGHT {weight}] [PHONETIC {matcher}]
//!       | NUMERIC [SORTABLE [UNF]]
//!       | TAG [SEPARATOR {sep}] [CASESENSITIVE] [SORTABLE [UNF]]
//!       | GEO
//!         [NOINDEX] ...
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::args::Command;
use crate::error::SearchError;

/// Record type an index watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataType {
    /// Redis hashes (`HSET`)
    #[default]
    Hash,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Hash => write!(f, "HASH"),
        }
    }
}

/// Search field types supported by RediSearch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Full-text searchable field
    Text,
    /// Numeric field (supports range queries)
    Numeric,
    /// Tag field (exact match, supports OR)
    Tag,
    /// Geographic field (longitude, latitude)
    Geo,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "TEXT"),
            FieldType::Numeric => write!(f, "NUMERIC"),
            FieldType::Tag => write!(f, "TAG"),
            FieldType::Geo => write!(f, "GEO"),
        }
    }
}

/// Phonetic matcher for text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhoneticMatcher {
    DoubleMetaphoneEnglish,
    DoubleMetaphoneFrench,
    DoubleMetaphonePortuguese,
    DoubleMetaphoneSpanish,
}

impl PhoneticMatcher {
    pub const fn as_str(self) -> &'static str {
        match self {
            PhoneticMatcher::DoubleMetaphoneEnglish => "dm:en",
            PhoneticMatcher::DoubleMetaphoneFrench => "dm:fr",
            PhoneticMatcher::DoubleMetaphonePortuguese => "dm:pt",
            PhoneticMatcher::DoubleMetaphoneSpanish => "dm:es",
        }
    }
}

/// Per-field options. Options that do not apply to a field's type are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// Keep the sortable value un-normalized (`UNF`)
    pub unf: bool,
    /// Text only: disable stemming
    pub nostem: bool,
    /// Exclude from indexing (useful for SORTABLE-only fields)
    pub noindex: bool,
    /// Text only
    pub phonetic: Option<PhoneticMatcher>,
    /// Text only: emitted unless 0 or 1
    pub weight: f64,
    /// Tag only
    pub separator: Option<String>,
    /// Tag only
    pub case_sensitive: bool,
}

impl FieldOptions {
    pub fn text(weight: f64, nostem: bool, noindex: bool, phonetic: Option<PhoneticMatcher>) -> Self {
        Self {
            nostem,
            noindex,
            phonetic,
            weight,
            ..Default::default()
        }
    }

    pub fn tag(noindex: bool, separator: Option<&str>) -> Self {
        Self {
            noindex,
            separator: separator.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn numeric(noindex: bool) -> Self {
        Self {
            noindex,
            ..Default::default()
        }
    }

    pub fn geo(noindex: bool) -> Self {
        Self {
            noindex,
            ..Default::default()
        }
    }

    pub fn with_unf(mut self) -> Self {
        self.unf = true;
        self
    }

    pub fn with_case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }
}

/// One attribute declaration in a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Source attribute name in the hash
    pub identifier: String,
    /// Optional name used in queries (`AS`)
    pub alias: Option<String>,
    pub field_type: FieldType,
    pub sortable: bool,
    pub options: FieldOptions,
}

impl SchemaField {
    pub fn new(field_type: FieldType, identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            alias: None,
            field_type,
            sortable: false,
            options: FieldOptions::default(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Append this field's declaration to a command.
    pub(crate) fn write_schema_args(&self, cmd: &mut Command) {
        cmd.arg(&self.identifier);

        if let Some(alias) = self.alias.as_deref().filter(|a| !a.is_empty()) {
            cmd.arg("AS").arg(alias);
        }

        cmd.arg(self.field_type.to_string());

        let opts = &self.options;
        match self.field_type {
            FieldType::Text => {
                if opts.nostem {
                    cmd.arg("NOSTEM");
                }
                self.write_sortable(cmd);
                if opts.weight != 0.0 && opts.weight != 1.0 {
                    cmd.arg("WEIGHT").arg(opts.weight);
                }
                if let Some(phonetic) = opts.phonetic {
                    cmd.arg("PHONETIC").arg(phonetic.as_str());
                }
            }
            FieldType::Numeric => {
                self.write_sortable(cmd);
            }
            FieldType::Tag => {
                if let Some(separator) = opts.separator.as_deref().filter(|s| !s.is_empty()) {
                    cmd.arg("SEPARATOR").arg(separator);
                }
                if opts.case_sensitive {
                    cmd.arg("CASESENSITIVE");
                }
                self.write_sortable(cmd);
            }
            FieldType::Geo => {}
        }

        if opts.noindex {
            cmd.arg("NOINDEX");
        }
    }

    fn write_sortable(&self, cmd: &mut Command) {
        if self.sortable {
            cmd.arg("SORTABLE");
            if self.options.unf {
                cmd.arg("UNF");
            }
        }
    }
}

/// Index definition builder (`FT.CREATE`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FtCreate {
    index_name: String,
    data_type: DataType,
    prefixes: Vec<String>,
    filter: Option<String>,
    language: Option<String>,
    language_field: Option<String>,
    score: Option<f64>,
    score_field: Option<String>,
    payload_field: Option<String>,
    max_text_fields: bool,
    temporary: bool,
    temporary_seconds: i64,
    no_offsets: bool,
    no_fields: bool,
    no_freqs: bool,
    skip_initial_scan: bool,
    stopwords: Vec<String>,
    fields: Vec<SchemaField>,
}

impl FtCreate {
    /// Create a new index definition
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            ..Default::default()
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn rename(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Add key prefixes the index watches. Repeated calls accumulate.
    pub fn prefix<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Only index records matching this aggregation expression
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filter = Some(expression.into());
        self
    }

    /// Default stemming language (arabic, basque, ..., turkish, chinese)
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn language_field(mut self, field: impl Into<String>) -> Self {
        self.language_field = Some(field.into());
        self
    }

    /// Default document score, emitted only when positive.
    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn score_field(mut self, field: impl Into<String>) -> Self {
        self.score_field = Some(field.into());
        self
    }

    pub fn payload_field(mut self, field: impl Into<String>) -> Self {
        self.payload_field = Some(field.into());
        self
    }

    pub fn max_text_fields(mut self, active: bool) -> Self {
        self.max_text_fields = active;
        self
    }

    /// Expire the index after `seconds` of inactivity; ignored unless `seconds > 0`.
    pub fn temporary(mut self, active: bool, seconds: i64) -> Self {
        self.temporary = active;
        self.temporary_seconds = seconds;
        self
    }

    pub fn no_offsets(mut self, active: bool) -> Self {
        self.no_offsets = active;
        self
    }

    pub fn no_fields(mut self, active: bool) -> Self {
        self.no_fields = active;
        self
    }

    pub fn no_freqs(mut self, active: bool) -> Self {
        self.no_freqs = active;
        self
    }

    pub fn skip_initial_scan(mut self, active: bool) -> Self {
        self.skip_initial_scan = active;
        self
    }

    /// Add stop words. Repeated calls accumulate.
    pub fn stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Append a fully described field
    pub fn field(mut self, field: SchemaField) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a field from its parts; an empty `alias` means none.
    pub fn schema(
        self,
        field_type: FieldType,
        identifier: impl Into<String>,
        alias: &str,
        sortable: bool,
        options: FieldOptions,
    ) -> Self {
        let mut field = SchemaField::new(field_type, identifier).options(options);
        if !alias.is_empty() {
            field = field.alias(alias);
        }
        field.sortable = sortable;
        self.field(field)
    }

    /// Add a text field
    pub fn text(self, identifier: impl Into<String>) -> Self {
        self.field(SchemaField::new(FieldType::Text, identifier))
    }

    /// Add a sortable text field
    pub fn text_sortable(self, identifier: impl Into<String>) -> Self {
        self.field(SchemaField::new(FieldType::Text, identifier).sortable())
    }

    /// Add a numeric field
    pub fn numeric(self, identifier: impl Into<String>) -> Self {
        self.field(SchemaField::new(FieldType::Numeric, identifier))
    }

    /// Add a sortable numeric field
    pub fn numeric_sortable(self, identifier: impl Into<String>) -> Self {
        self.field(SchemaField::new(FieldType::Numeric, identifier).sortable())
    }

    /// Add a tag field
    pub fn tag(self, identifier: impl Into<String>, separator: Option<&str>) -> Self {
        self.field(SchemaField::new(FieldType::Tag, identifier).options(FieldOptions::tag(false, separator)))
    }

    /// Add a geo field
    pub fn geo(self, identifier: impl Into<String>) -> Self {
        self.field(SchemaField::new(FieldType::Geo, identifier))
    }

    /// Generate the FT.CREATE command
    pub fn serialize(&self) -> Command {
        let mut cmd = Command::new("FT.CREATE");
        cmd.arg(&self.index_name);
        cmd.arg("ON").arg(self.data_type.to_string());

        if !self.prefixes.is_empty() {
            cmd.arg("PREFIX").counted(self.prefixes.iter());
        }

        if let Some(filter) = non_empty(&self.filter) {
            cmd.arg("FILTER").arg(filter);
        }

        if let Some(language) = non_empty(&self.language) {
            cmd.arg("LANGUAGE").arg(language);
        }

        if let Some(field) = non_empty(&self.language_field) {
            cmd.arg("LANGUAGE_FIELD").arg(field);
        }

        if let Some(score) = self.score.filter(|s| *s > 0.0) {
            cmd.arg("SCORE").arg(score);
        }

        if let Some(field) = non_empty(&self.score_field) {
            cmd.arg("SCORE_FIELD").arg(field);
        }

        if let Some(field) = non_empty(&self.payload_field) {
            cmd.arg("PAYLOAD_FIELD").arg(field);
        }

        if self.max_text_fields {
            cmd.arg("MAXTEXTFIELDS");
        }

        if self.temporary && self.temporary_seconds > 0 {
            cmd.arg("TEMPORARY").arg(self.temporary_seconds);
        }

        if self.no_offsets {
            cmd.arg("NOOFFSETS");
        }

        if self.no_fields {
            cmd.arg("NOFIELDS");
        }

        if self.no_freqs {
            cmd.arg("NOFREQS");
        }

        if self.skip_initial_scan {
            cmd.arg("SKIPINITIALSCAN");
        }

        if !self.stopwords.is_empty() {
            cmd.arg("STOPWORDS").counted(self.stopwords.iter());
        }

        if !self.fields.is_empty() {
            cmd.arg("SCHEMA");
            for field in &self.fields {
                field.write_schema_args(&mut cmd);
            }
        }

        cmd
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Registry of index definitions, keyed by index name
#[derive(Debug, Default)]
pub struct IndexManager {
    indexes: HashMap<String, FtCreate>,
}

impl IndexManager {
    /// Create a new index manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an index definition, replacing any previous one with the same name
    pub fn register(&mut self, index: FtCreate) {
        self.indexes.insert(index.index_name.clone(), index);
    }

    /// Get a registered index by name
    pub fn get(&self, name: &str) -> Option<&FtCreate> {
        self.indexes.get(name)
    }

    /// Registered index names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.indexes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Generate the FT.CREATE command for a registered index
    pub fn create_command(&self, name: &str) -> Result<Command, SearchError> {
        self.indexes
            .get(name)
            .map(FtCreate::serialize)
            .ok_or_else(|| SearchError::IndexNotFound(name.to_string()))
    }

    /// Find the index whose prefix covers `key`.
    ///
    /// The longest matching prefix wins; equal lengths fall back to the
    /// lexically smallest index name.
    pub fn find_by_prefix(&self, key: &str) -> Option<&FtCreate> {
        self.indexes
            .values()
            .filter_map(|idx| {
                idx.prefixes
                    .iter()
                    .filter(|p| key.starts_with(p.as_str()))
                    .map(|p| p.len())
                    .max()
                    .map(|len| (len, idx))
            })
            .max_by(|(a_len, a), (b_len, b)| {
                a_len.cmp(b_len).then_with(|| b.index_name().cmp(a.index_name()))
            })
            .map(|(_, idx)| idx)
    }
}
