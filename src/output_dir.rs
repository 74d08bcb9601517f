//! Output directory reset.

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Delete and recreate each directory so it is present and empty.
///
/// Directories that do not exist yet are simply created. A path that exists
/// but is not a directory is left alone and reported as an error.
pub fn reset<P: AsRef<Path>>(dirs: &[P]) -> Result<()> {
    for dir in dirs {
        let dir = dir.as_ref();
        if dir.exists() {
            if !dir.is_dir() {
                return Err(Error::NotADirectory(dir.to_path_buf()));
            }
            fs::remove_dir_all(dir)?;
            log::info!("Removed {:?}", dir);
        }
        fs::create_dir_all(dir)?;
        log::info!("Created {:?}", dir);
    }
    Ok(())
}
