//! Record staging and archive packaging
//!
//! Every invocation stages its JSON records in its own temporary directory,
//! so concurrent runs never share a working directory. The staged
//! `json_data/` folder is zipped, the staging directory removed, and the
//! archive deleted once it has been delivered.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tempfile::TempDir;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name of the staged record folder, also the top-level folder in the archive
pub const STAGING_DIR: &str = "json_data";

/// File name of the packaged archive
pub const ARCHIVE_NAME: &str = "json_data.zip";

/// Per-invocation staging directory for JSON records
#[derive(Debug)]
pub struct StagingArea {
    root: TempDir,
    records: Vec<String>,
}

impl StagingArea {
    pub fn new() -> Result<Self> {
        let root = tempfile::Builder::new()
            .prefix("protodok-")
            .tempdir()
            .context("Failed to create staging directory")?;
        fs::create_dir(root.path().join(STAGING_DIR))
            .context("Failed to create json_data directory")?;
        debug!("Staging records in {}", root.path().display());

        Ok(Self {
            root,
            records: Vec::new(),
        })
    }

    /// The `json_data/` folder records are written to
    pub fn data_dir(&self) -> PathBuf {
        self.root.path().join(STAGING_DIR)
    }

    /// File names written so far, in write order
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Write one record as `output{n}.json`, `n` counting from 0
    pub fn write_record<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<String> {
        let name = format!("output{}.json", self.records.len());
        let path = self.data_dir().join(&name);

        let mut writer = BufWriter::new(
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?,
        );
        serde_json::to_writer(&mut writer, value)
            .with_context(|| format!("Failed to write {}", name))?;
        writer.flush()?;

        self.records.push(name.clone());
        Ok(name)
    }

    /// Write each value as its own record; returns the new file names
    pub fn write_records<T: Serialize>(&mut self, values: &[T]) -> Result<Vec<String>> {
        values.iter().map(|value| self.write_record(value)).collect()
    }

    /// Zip `json_data/` and remove the staging directory
    pub fn into_archive(self) -> Result<PackagedArchive> {
        let dir = tempfile::Builder::new()
            .prefix("protodok-archive-")
            .tempdir()
            .context("Failed to create archive directory")?;
        let path = dir.path().join(ARCHIVE_NAME);

        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut names = self.records.clone();
        names.sort();

        zip.add_directory(format!("{}/", STAGING_DIR), options)?;
        for name in &names {
            let content = fs::read(self.data_dir().join(name))
                .with_context(|| format!("Failed to read staged record {}", name))?;
            zip.start_file(format!("{}/{}", STAGING_DIR, name), options)?;
            zip.write_all(&content)?;
        }
        zip.finish()?.flush()?;

        self.root
            .close()
            .context("Failed to remove staging directory")?;
        debug!("Packaged {} records into {}", names.len(), path.display());

        Ok(PackagedArchive {
            dir,
            path,
            entries: names,
        })
    }
}

/// A finished archive awaiting delivery
#[derive(Debug)]
pub struct PackagedArchive {
    dir: TempDir,
    path: PathBuf,
    entries: Vec<String>,
}

impl PackagedArchive {
    /// Location of the staged archive
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record file names inside `json_data/`
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Copy the archive to `destination`, then delete the staged copy
    pub fn deliver_to<P: AsRef<Path>>(self, destination: P) -> Result<PathBuf> {
        let destination = destination.as_ref();
        fs::copy(&self.path, destination)
            .with_context(|| format!("Failed to write archive to {}", destination.display()))?;
        self.dir.close().context("Failed to delete staged archive")?;
        Ok(destination.to_path_buf())
    }

    /// Stream the archive into `writer`, then delete the staged copy
    pub fn deliver<W: Write>(self, writer: &mut W) -> Result<u64> {
        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let written = io::copy(&mut file, writer)?;
        drop(file);
        self.dir.close().context("Failed to delete staged archive")?;
        Ok(written)
    }
}
