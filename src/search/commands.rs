// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index administration commands
//!
//! ```text
//! FT.ALTER {index} SCHEMA ADD {attribute} {options} ...
//! FT.DROPINDEX {index} [DD]
//! FT.ALIASADD {name} {index}
//! FT.ALIASUPDATE {name} {index}
//! FT.ALIASDEL {name}
//! ```

use super::args::Command;
use super::index_manager::SchemaField;

/// Add attributes to an existing index.
///
/// Declarations use the same clause rules as `FT.CREATE ... SCHEMA`.
pub fn alter_schema_add(index_name: &str, fields: &[SchemaField]) -> Command {
    let mut cmd = Command::new("FT.ALTER");
    cmd.arg(index_name).arg("SCHEMA").arg("ADD");
    for field in fields {
        field.write_schema_args(&mut cmd);
    }
    cmd
}

/// Drop an index; `delete_documents` also removes the indexed hashes (`DD`).
pub fn drop_index(index_name: &str, delete_documents: bool) -> Command {
    let mut cmd = Command::new("FT.DROPINDEX");
    cmd.arg(index_name);
    if delete_documents {
        cmd.arg("DD");
    }
    cmd
}

pub fn alias_add(alias: &str, index_name: &str) -> Command {
    let mut cmd = Command::new("FT.ALIASADD");
    cmd.arg(alias).arg(index_name);
    cmd
}

/// Point an alias at another index, creating it if missing.
pub fn alias_update(alias: &str, index_name: &str) -> Command {
    let mut cmd = Command::new("FT.ALIASUPDATE");
    cmd.arg(alias).arg(index_name);
    cmd
}

pub fn alias_delete(alias: &str) -> Command {
    let mut cmd = Command::new("FT.ALIASDEL");
    cmd.arg(alias);
    cmd
}
