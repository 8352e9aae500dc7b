//! File and folder replies for `FILE_REQUEST`
//!
//! The robot advertises a short list of file definitions (identifier →
//! path). A request loads the file, or recursively every regular file
//! under a folder, optionally compressing each payload. Failures never
//! suppress the reply: the controller always gets a `Folder`, possibly
//! empty with the diagnostic in its identifier field.

use crate::messages::{File, FileRequest, Folder};
use std::fs;
use std::path::Path;

/// One advertised file or folder, looked up by identifier
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub identifier: String,
    pub path: String,
    pub is_folder: bool,
}

/// Build the `Folder` reply for a file request
pub(super) fn build_folder_reply(definitions: &[FileEntry], request: &FileRequest) -> Folder {
    let mut compressed = request.compressed;
    if compressed && !compression_available() {
        warn_no_compression();
        compressed = false;
    }

    let mut folder = Folder::default();
    // definitions are few, linear scan is fine
    let Some(entry) = definitions
        .iter()
        .find(|entry| entry.identifier == request.identifier)
    else {
        log::warn!(
            "requested file '{}' undefined, sending empty folder",
            request.identifier
        );
        folder.identifier = format!("file/folder :{} undefined", request.identifier);
        return folder;
    };

    let result = if entry.is_folder {
        load_folder(&mut folder, Path::new(&entry.path), compressed)
    } else {
        load_file(&entry.path, compressed).map(|file| folder.files.push(file))
    };

    match result {
        Ok(()) => folder.compressed = compressed,
        Err(e) => {
            log::warn!("file request '{}' failed: {}", request.identifier, e);
            folder = Folder {
                identifier: e.to_string(),
                ..Default::default()
            };
        }
    }
    folder
}

fn load_file(path: &str, compressed: bool) -> std::io::Result<File> {
    let data = fs::read(path)?;
    Ok(File {
        identifier: String::new(),
        path: path.to_string(),
        data: if compressed {
            compress_payload(&data)
        } else {
            data
        },
    })
}

fn load_folder(folder: &mut Folder, dir: &Path, compressed: bool) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            load_folder(folder, &path, compressed)?;
        } else {
            folder
                .files
                .push(load_file(&path.to_string_lossy(), compressed)?);
        }
    }
    Ok(())
}

#[cfg(feature = "compression")]
fn compression_available() -> bool {
    true
}

#[cfg(feature = "compression")]
fn compress_payload(data: &[u8]) -> Vec<u8> {
    crate::compress::compress(data)
}

#[cfg(feature = "compression")]
fn warn_no_compression() {}

#[cfg(not(feature = "compression"))]
fn compression_available() -> bool {
    false
}

#[cfg(not(feature = "compression"))]
fn compress_payload(data: &[u8]) -> Vec<u8> {
    data.to_vec()
}

#[cfg(not(feature = "compression"))]
fn warn_no_compression() {
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| {
        log::warn!("compression support not built in, sending uncompressed files");
    });
}
