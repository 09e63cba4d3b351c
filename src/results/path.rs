//! Result file naming

use std::path::{Path, PathBuf};

/// Where the runner script writes the result document for a test file
///
/// The directory part of `file` keeps its components joined by dots, the
/// file name is cut at its first dot, e.g. `sub/dir/mytest.vim` becomes
/// `<todir>/TEST-sub.dir.mytest.xml`. Empty and `.` components are dropped,
/// the same way the runner script normalizes the name.
pub fn result_file_path(todir: &Path, file: &str) -> PathBuf {
    let file = file.replace('\\', "/");
    let mut parts: Vec<&str> = file
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();
    let name = parts.pop().unwrap_or_default();
    let stem = name.split_once('.').map(|(stem, _)| stem).unwrap_or(name);

    let prefix: String = parts.iter().map(|dir| format!("{dir}.")).collect();
    todir.join(format!("TEST-{prefix}{stem}.xml"))
}
