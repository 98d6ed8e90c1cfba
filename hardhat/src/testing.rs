//! Fake solc scripts for tests, unix only.

use std::{
    fs::{create_dir_all, set_permissions, write, Permissions},
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use crate::source::SourceFile;

/// Writes `<name>.abi` with a single view function named after the contract.
pub const WRITE_ABI: &str = r#"printf '[{"type":"function","name":"%s","inputs":[],"outputs":[],"stateMutability":"view"}]' "$name" > "$out/$name.abi""#;

/// Exits 1 like a solc parser error.
pub const FAIL: &str = r#"echo "Error: Expected pragma, import directive or contract/interface/library/struct/enum/constant/function/error definition." >&2
exit 1"#;

/// Exits 0 without writing anything.
pub const SILENT: &str = "exit 0";

/// Writes an abi file that is not json.
pub const MALFORMED: &str = r#"printf 'not json' > "$out/$name.abi""#;

/// Create executable `solc` script in `dir` running `body` for abi requests.
pub fn fake_solc(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("solc");

    let script = format!(
        r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "solc, the solidity compiler commandline interface"
    echo "Version: 0.8.21+commit.d9974bed.Linux.g++"
    exit 0
fi
out="$4"
src="$5"
name="${{src##*/}}"
name="${{name%.sol}}"
{}
"#,
        body
    );

    write(&path, script).expect("Write fake solc");

    set_permissions(&path, Permissions::from_mode(0o755)).expect("Chmod fake solc");

    path
}

/// Create empty source file at `dir/relative`.
pub fn write_source(dir: &Path, relative: &str) -> SourceFile {
    let path = dir.join(relative);

    if let Some(parent) = path.parent() {
        create_dir_all(parent).expect("Create source dir");
    }

    write(&path, "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.0;\n")
        .expect("Write source file");

    SourceFile::new(path)
}
