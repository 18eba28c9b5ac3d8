// imgconv/src/utils/mod.rs
use crate::core::{ConvertError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const VALID_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];
pub const OUTPUT_DIR_NAME: &str = "converted";
pub const OUTPUT_SUFFIX: &str = "converted";

pub fn is_supported_format(path: &Path) -> bool {
    get_file_extension(path)
        .map(|ext| VALID_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Regular files directly inside `dir` with a supported extension, sorted by name.
pub fn collect_image_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // a dangling link or unreadable entry only loses that entry
            Err(e) if e.depth() > 0 => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if entry.file_type().is_file() && is_supported_format(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}

/// `<output_dir>/<stem>_converted.<extension>`
pub fn generate_output_path(
    input_path: &Path,
    output_dir: &Path,
    extension: &str,
) -> Result<PathBuf> {
    let stem = input_path.file_stem().ok_or_else(|| {
        ConvertError::InvalidParameter(format!("Invalid file name: {}", input_path.display()))
    })?;

    let mut name = stem.to_os_string();
    name.push(format!("_{}.{}", OUTPUT_SUFFIX, extension));
    Ok(output_dir.join(name))
}

/// The directory holding the running executable.
pub fn default_source_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ConvertError::InvalidParameter(format!(
            "Executable has no parent directory: {}",
            exe.display()
        ))
    })
}

pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_supported_format(Path::new("a.JPG")));
        assert!(is_supported_format(Path::new("a.Jpeg")));
        assert!(is_supported_format(Path::new("dir/a.png")));
        assert!(is_supported_format(Path::new("a.bmp")));
        assert!(!is_supported_format(Path::new("a.gif")));
        assert!(!is_supported_format(Path::new("a.txt")));
        assert!(!is_supported_format(Path::new("png")));
    }

    #[test]
    fn output_path_uses_stem_and_target_extension() {
        let input = Path::new("/in/Holiday.Photo.PNG");
        let path = generate_output_path(input, Path::new("/out"), "jpg").unwrap();
        assert_eq!(path, PathBuf::from("/out/Holiday.Photo_converted.jpg"));
    }

    #[test]
    fn collect_skips_directories_and_other_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.PNG"), b"x").unwrap();
        std::fs::write(dir.path().join("a.jpeg"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("folder.png")).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("deep.jpg"), b"x").unwrap();

        let names: Vec<String> = collect_image_paths(dir.path())
            .unwrap()
            .iter()
            .map(|p| file_name_lossy(p))
            .collect();
        assert_eq!(names, vec!["a.jpeg", "b.PNG"]);
    }

    #[cfg(unix)]
    #[test]
    fn output_path_keeps_non_utf8_stem() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"/in/caf\xe9.png"));
        let path = generate_output_path(input, Path::new("/out"), "bmp").unwrap();
        assert_eq!(path.as_os_str().as_bytes(), b"/out/caf\xe9_converted.bmp");
    }

    #[cfg(unix)]
    #[test]
    fn collect_skips_dangling_links() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("good.png"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.png"), dir.path().join("dangling.png"))
            .unwrap();

        let names: Vec<String> = collect_image_paths(dir.path())
            .unwrap()
            .iter()
            .map(|p| file_name_lossy(p))
            .collect();
        assert_eq!(names, vec!["good.png"]);
    }

    #[test]
    fn collect_fails_for_missing_directory() {
        let dir = tempdir().unwrap();
        assert!(collect_image_paths(&dir.path().join("absent")).is_err());
    }
}
