//! Where a module's graph files go.

use std::path::{Path, PathBuf};

use crate::config::OutputConfig;

/// Output directory for a module whose sources are `files`.
///
/// The module root is the parent of the nearest `src` ancestor of any source
/// file, else the nearest ancestor holding one of the build markers, else the
/// configured fallback. The result is `<root>/build/<subdir>`.
pub fn resolve_output_dir<S: AsRef<str>>(files: &[S], config: &OutputConfig) -> PathBuf {
    let root = root_by_src(files)
        .or_else(|| root_by_build_marker(files, &config.build_markers))
        .unwrap_or_else(|| config.dir.clone());
    root.join("build").join(&config.subdir)
}

fn root_by_src<S: AsRef<str>>(files: &[S]) -> Option<PathBuf> {
    files.iter().find_map(|file| {
        Path::new(file.as_ref())
            .ancestors()
            .skip(1)
            .find(|dir| dir.file_name().is_some_and(|n| n == "src"))
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    })
}

fn root_by_build_marker<S: AsRef<str>>(files: &[S], markers: &[String]) -> Option<PathBuf> {
    files.iter().find_map(|file| {
        Path::new(file.as_ref())
            .ancestors()
            .skip(1)
            .find(|dir| markers.iter().any(|m| dir.join(m).exists()))
            .map(Path::to_path_buf)
    })
}
