//! Invocation Builder
//!
//! Turns the operator's mode selection, overwrite flag and output directory
//! into the token list handed to every downloader call.

use bomfetch_models::{DownloadMode, InvocationSpec};
use bomfetch_utils::{BomError, BomResult};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct InvocationBuilder {
    mode: DownloadMode,
    overwrite: bool,
    output_dir: Option<PathBuf>,
}

impl InvocationBuilder {
    pub fn new(mode: DownloadMode) -> Self {
        Self {
            mode,
            overwrite: false,
            output_dir: None,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Build the spec. The output directory is made absolute and created
    /// (with parents) when missing; the downloader does not create it.
    pub fn build(self) -> BomResult<InvocationSpec> {
        let output = match &self.output_dir {
            Some(dir) => Some(prepare_output_dir(dir)?),
            None => None,
        };

        Ok(InvocationSpec::new(self.mode, self.overwrite, output.as_deref()))
    }
}

/// The path travels inside a `--output=` token, so it must be valid UTF-8.
fn prepare_output_dir(dir: &Path) -> BomResult<String> {
    let absolute = std::path::absolute(dir)?;
    let text = absolute.to_str().ok_or_else(|| BomError::Io {
        message: format!(
            "output directory is not valid UTF-8: {}",
            absolute.display()
        ),
    })?;

    if !absolute.exists() {
        std::fs::create_dir_all(&absolute)?;
        info!(path = %absolute.display(), "Created output directory");
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bomfetch_models::ModeFlags;

    #[test]
    fn test_full_default_without_options() {
        let spec = InvocationBuilder::new(ModeFlags::default().resolve())
            .build()
            .unwrap();
        assert_eq!(spec.tokens(), ["--full"]);
    }

    #[test]
    fn test_overwrite_and_output_create_directory() {
        let root = tempfile::tempdir().unwrap();
        let libs = root.path().join("tmp").join("libs");
        assert!(!libs.exists());

        let spec = InvocationBuilder::new(DownloadMode::Full)
            .overwrite(true)
            .output_dir(Some(libs.clone()))
            .build()
            .unwrap();

        assert_eq!(
            spec.tokens(),
            [
                "--full".to_string(),
                "--overwrite".to_string(),
                format!("--output={}", libs.display()),
            ]
        );
        assert!(libs.is_dir());
    }

    #[test]
    fn test_existing_output_directory_is_reused() {
        let root = tempfile::tempdir().unwrap();

        let spec = InvocationBuilder::new(DownloadMode::FootprintOnly)
            .output_dir(Some(root.path().to_path_buf()))
            .build()
            .unwrap();

        assert_eq!(spec.tokens().len(), 2);
        assert_eq!(spec.tokens()[0], "--footprint");
    }

    #[test]
    fn test_relative_output_becomes_absolute() {
        let root = tempfile::tempdir().unwrap();
        let relative = Path::new("libs");
        let absolute = prepare_output_dir(&root.path().join(relative)).unwrap();
        assert!(Path::new(&absolute).is_absolute());

        let resolved = std::path::absolute(relative).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("libs"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_output_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = tempfile::tempdir().unwrap();
        let libs = root.path().join(OsStr::from_bytes(b"libs\xff"));

        let result = InvocationBuilder::new(DownloadMode::Full)
            .output_dir(Some(libs.clone()))
            .build();

        assert!(matches!(result, Err(BomError::Io { .. })));
        assert!(!libs.exists());
    }
}
