use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ext::PathExt;

/// Resolves where the generated document goes and checks it is safe to write.
///
/// Without an explicit `output` the template path minus its `.dist` suffix is used.
pub fn get_output_path(template: &Path, output: Option<&Path>, force: bool) -> Result<PathBuf> {
    let output = match output {
        Some(output) => output.to_path_buf(),
        None => template.without_dist_suffix()?,
    };

    if output == template {
        return Err(Error::Other(anyhow::anyhow!(
            "Output '{}' would overwrite the template. Pass an explicit OUTPUT path.",
            output.display()
        )));
    }

    if output.exists() && !force {
        return Err(Error::OutputExists { output: output.display().to_string() });
    }
    Ok(output)
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    let base_path = std::env::current_dir().unwrap_or_default();
    let abs_path = if dest_path.is_absolute() {
        dest_path.to_path_buf()
    } else {
        base_path.join(dest_path)
    };

    if let Some(parent) = abs_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(abs_path, content).map_err(Error::IoError)
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    std::fs::read_to_string(path).map_err(Error::IoError)
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}
