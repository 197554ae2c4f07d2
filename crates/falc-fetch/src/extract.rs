use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use flate2::read::MultiGzDecoder;
use tokio_util::sync::CancellationToken;

use crate::download::{download_with_retry, stream_to_file};
use crate::{FetchError, FetchOptions, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    TarGz,
    Tar,
    Gz,
}

impl ArchiveKind {
    const EXTENSIONS: [(&'static str, ArchiveKind); 4] = [
        (".tar.gz", ArchiveKind::TarGz),
        (".tgz", ArchiveKind::TarGz),
        (".tar", ArchiveKind::Tar),
        (".gz", ArchiveKind::Gz),
    ];

    /// Longest matching extension wins, so ".tar.gz" is not a plain ".gz"
    pub fn detect(file_name: &str) -> Option<Self> {
        Self::EXTENSIONS
            .iter()
            .filter(|(ext, _)| file_name.ends_with(ext))
            .max_by_key(|(ext, _)| ext.len())
            .map(|&(_, kind)| kind)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Unpack `archive` into `output_dir` and return the top level items it produced.
///
/// Items are unpacked into a staging directory first and then moved over
/// whatever `output_dir` already holds under the same names.
pub fn extract(
    archive: &Path,
    output_dir: &Path,
    cancel: &CancellationToken,
) -> Result<Vec<PathBuf>> {
    let name = file_name(archive);
    let kind =
        ArchiveKind::detect(&name).ok_or_else(|| FetchError::UnsupportedArchive(name.clone()))?;

    fs::create_dir_all(output_dir)?;
    let staging = tempfile::Builder::new()
        .prefix(".extract-")
        .tempdir_in(output_dir)?;

    tracing::info!("Extracting {}", archive.display());
    match kind {
        ArchiveKind::TarGz => untar(MultiGzDecoder::new(File::open(archive)?), staging.path())?,
        ArchiveKind::Tar => untar(File::open(archive)?, staging.path())?,
        ArchiveKind::Gz => {
            let target = staging.path().join(name.strip_suffix(".gz").unwrap_or(&name));
            let decoder = MultiGzDecoder::new(File::open(archive)?);
            stream_to_file(decoder, &target, None, cancel)?;
        }
    }

    let mut outputs = Vec::new();
    for entry in fs::read_dir(staging.path())? {
        let entry = entry?;
        let target = output_dir.join(entry.file_name());
        move_with_overwrite(&entry.path(), &target)?;
        outputs.push(target);
    }
    outputs.sort();
    Ok(outputs)
}

/// Entries must stay inside the output directory
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn untar<R: Read>(reader: R, dest: &Path) -> Result<()> {
    let mut archive = tar::Archive::new(reader);
    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        if !is_contained(&path) {
            return Err(FetchError::PathTraversal(path.display().to_string()));
        }
        entry.unpack_in(dest)?;
    }
    Ok(())
}

/// Move `source` to `target`, replacing a file or directory already there
pub fn move_with_overwrite(source: &Path, target: &Path) -> Result<()> {
    if target.is_dir() {
        fs::remove_dir_all(target)?;
    } else if target.exists() {
        fs::remove_file(target)?;
    }
    fs::rename(source, target)?;
    Ok(())
}

/// Download `url` into `dir`, unpacking it when it is an archive.
///
/// Downloads land in a staging directory inside `dir`, so an interrupted
/// call never leaves a partial file behind. Returns the paths produced.
pub fn fetch_and_materialize(
    url: &str,
    dir: &Path,
    options: &FetchOptions,
    cancel: &CancellationToken,
) -> Result<Vec<PathBuf>> {
    let name = url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FetchError::UnsupportedArchive(url.to_string()))?;

    let target = dir.join(name);
    if !options.overwrite && target.exists() {
        return Ok(vec![target]);
    }

    fs::create_dir_all(dir)?;
    let staging = tempfile::Builder::new()
        .prefix(".download-")
        .tempdir_in(dir)?;
    let staged = staging.path().join(name);
    let downloaded = download_with_retry(url, &staged, true, options.attempts, cancel)?;

    if ArchiveKind::detect(name).is_some() {
        extract(&downloaded, dir, cancel)
    } else {
        move_with_overwrite(&downloaded, &target)?;
        Ok(vec![target])
    }
}
