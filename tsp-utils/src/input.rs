use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::{fs, io::Read, path::Path};

/// Resolves a CLI argument that is either inline JSON, a path to a `.json`
/// file, or `-` for stdin.
pub fn read_json_arg(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else if arg.ends_with(".json") {
        fs::read_to_string(arg).with_context(|| format!("Failed to read file: {}", arg))
    } else {
        Ok(arg.to_string())
    }
}

pub fn load_json_arg<T>(arg: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let json = read_json_arg(arg)?;
    serde_json::from_str::<T>(&json).with_context(|| format!("Failed to parse json: {}", arg))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileCodec {
    Plain,
    Gzip,
    Zlib,
}

impl FileCodec {
    /// `.gz` is gzip, `.zlib` is a raw zlib stream, anything else is plain json.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("gz") => FileCodec::Gzip,
            Some("zlib") => FileCodec::Zlib,
            _ => FileCodec::Plain,
        }
    }
}

pub fn is_compressed_path<P: AsRef<Path>>(path: P) -> bool {
    FileCodec::from_path(path) != FileCodec::Plain
}

/// Reads a JSON document from disk, gunzipping `.gz` and inflating `.zlib`
/// files first.
pub fn load_json_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let codec = FileCodec::from_path(path);
    if codec == FileCodec::Plain {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        return serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse json: {}", path.display()));
    }
    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    match codec {
        FileCodec::Gzip => crate::gunzip_obj(&bytes),
        _ => crate::decompress_obj(&bytes),
    }
    .with_context(|| format!("Failed to decode compressed json: {}", path.display()))
}

pub fn save_json_file<T, P>(obj: &T, path: P) -> Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = match FileCodec::from_path(path) {
        FileCodec::Plain => crate::jsonify(obj)?.into_bytes(),
        FileCodec::Gzip => crate::gzip_obj(obj)?,
        FileCodec::Zlib => crate::compress_obj(obj)?,
    };
    fs::write(path, bytes).with_context(|| format!("Failed to write file: {}", path.display()))
}
