//! Output file helpers: directories, formats, unique names and atomic saves.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use sheetforge_spec::DEFAULT_EXTENSION;
use tracing::debug;

use crate::error::{AssembleError, AssembleResult};

/// Upper bound on suffixes tried by [`unique_path`].
pub const MAX_UNIQUE_ATTEMPTS: u32 = 10_000;

/// Creates `dir` and all missing parents.
pub fn ensure_dir(dir: &Path) -> AssembleResult<()> {
    fs::create_dir_all(dir).map_err(|e| AssembleError::io(dir, e))
}

/// Normalizes a user-supplied extension: no leading dot, lowercase, `png` when empty.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
    if ext.is_empty() {
        DEFAULT_EXTENSION.to_string()
    } else {
        ext
    }
}

/// Resolves the encoder for a file extension.
pub fn format_for_extension(ext: &str) -> AssembleResult<ImageFormat> {
    let ext = normalize_extension(ext);
    match ImageFormat::from_extension(&ext) {
        Some(format) if format.writing_enabled() => Ok(format),
        _ => Err(AssembleError::configuration(format!(
            "unsupported output image extension '{}'",
            ext
        ))),
    }
}

/// Resolves the encoder for a path from its extension.
pub fn format_for_path(path: &Path) -> AssembleResult<ImageFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| {
            AssembleError::configuration(format!(
                "output path '{}' has no image extension",
                path.display()
            ))
        })?;
    format_for_extension(ext)
}

/// Returns `path`, or the first `<stem>_<n>.<ext>` sibling that does not exist yet.
pub fn unique_path(path: &Path) -> AssembleResult<PathBuf> {
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());

    for n in 1..=MAX_UNIQUE_ATTEMPTS {
        let name = match &ext {
            Some(ext) => format!("{}_{}.{}", stem, n, ext),
            None => format!("{}_{}", stem, n),
        };
        let candidate = path.with_file_name(name);
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(AssembleError::io(
        path,
        std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("no free name after {} attempts", MAX_UNIQUE_ATTEMPTS),
        ),
    ))
}

/// Encodes `image` to `path`, creating parent directories.
///
/// The image is written to a temporary file in the target directory and then
/// renamed over `path`, so a failed write never leaves a partial file there.
pub fn save_image(image: &DynamicImage, path: &Path) -> AssembleResult<()> {
    let format = format_for_path(path)?;
    save_image_as(image, path, format)
}

/// Like [`save_image`] with an explicit format.
pub fn save_image_as(image: &DynamicImage, path: &Path, format: ImageFormat) -> AssembleResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".sheetforge-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| AssembleError::io(dir, e))?;

    {
        let encodable = encodable_for(image, format);
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encodable
            .write_to(&mut writer, format)
            .map_err(|source| AssembleError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        writer.flush().map_err(|e| AssembleError::io(path, e))?;
    }

    tmp.persist(path)
        .map_err(|e| AssembleError::io(path, e.error))?;

    debug!(
        "Saved {}x{} {:?} to '{}'",
        image.width(),
        image.height(),
        format,
        path.display()
    );
    Ok(())
}

/// Converts `image` to a pixel layout the encoder for `format` accepts.
fn encodable_for(image: &DynamicImage, format: ImageFormat) -> std::borrow::Cow<'_, DynamicImage> {
    use std::borrow::Cow;

    let color = image.color();
    match format {
        ImageFormat::Png => match image {
            DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
                Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16()))
            }
            _ => Cow::Borrowed(image),
        },
        // JPEG has no alpha channel and no 16-bit support.
        ImageFormat::Jpeg => match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(image),
            _ if color.channel_count() <= 2 => Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8())),
            _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        },
        _ => match image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_) => Cow::Borrowed(image),
            _ if color.has_alpha() => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
            _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        },
    }
}
