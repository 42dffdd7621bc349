// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{self, RollingFileAppender};

/// Splits `path` into the folder and file name that [`rolling::never`] wants. A bare
/// file name (like the default `log.txt`) lands in the current folder.
///
/// Don't wrap the result in `tracing_appender::non_blocking`: the guard it returns has to
/// outlive the subscriber, and nothing here keeps it alive.
///
/// # Errors
///
/// Returns an error if `path` has no file name (eg: it is empty, or ends in `..`).
pub fn try_create(path: impl AsRef<Path>) -> miette::Result<RollingFileAppender> {
    let path = path.as_ref();

    let Some(file_name) = path.file_name() else {
        miette::bail!("Log file path `{}` has no file name.", path.display());
    };

    let folder = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok(rolling::never(folder, file_name))
}
