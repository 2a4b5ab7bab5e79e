//! Transparent decompression for log files.
//!
//! Long simulation logs are routinely stored compressed, so every reader in
//! this crate goes through [`auto_detect_reader`] and every writer through
//! [`auto_detect_writer`]. Codecs are matched by file extension first (fast
//! path) with a magic-byte fallback for readers, so a gzipped log works even
//! when it was renamed without the `.gz` suffix.
//!
//! ## Built-in Codecs
//!
//! - **Gzip** (`.gz`) - via `flate2` crate (feature: `compression-gzip`, on by default)
//! - **Zstd** (`.zst`) - via `zstd` crate (feature: `compression-zstd`)
//! - **Bzip2** (`.bz2`) - via `bzip2` crate (feature: `compression-bzip2`)
//! - **Xz** (`.xz`) - via `xz2` crate (feature: `compression-xz`)
//!
//! With no compression features enabled the detection functions become plain
//! pass-throughs.
//!
//! ## Examples
//! ```no_run
//! use thermolog::io::compression::auto_detect_reader;
//! use std::fs::File;
//! # fn main() -> anyhow::Result<()> {
//!
//! // Automatically detects .gz and wraps with a decompressor
//! let file = File::open("log.lammps.gz")?;
//! let reader = auto_detect_reader(file, "log.lammps.gz")?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Compression codec interface.
///
/// Codecs are detected via file extensions (fast path) or magic bytes
/// (fallback). The built-in implementations cover the formats LAMMPS logs
/// are commonly archived in.
pub trait CompressionCodec: Send + Sync {
    /// Human-readable codec name (e.g., "gzip", "zstd").
    fn name(&self) -> &str;

    /// File extensions associated with this codec (e.g., `&[".gz", ".gzip"]`).
    ///
    /// Extensions should include the leading dot and be lowercase.
    fn extensions(&self) -> &[&str];

    /// Optional magic byte signature for content-based detection.
    ///
    /// Return `None` if the format has no reliable magic bytes.
    fn magic_bytes(&self) -> Option<&[u8]>;

    /// Wrap a reader with decompression.
    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>>;

    /// Wrap a writer with compression.
    fn wrap_writer(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>>;
}

#[cfg(feature = "compression-gzip")]
static GZIP: GzipCodec = GzipCodec;
#[cfg(feature = "compression-zstd")]
static ZSTD: ZstdCodec = ZstdCodec;
#[cfg(feature = "compression-bzip2")]
static BZIP2: Bzip2Codec = Bzip2Codec;
#[cfg(feature = "compression-xz")]
static XZ: XzCodec = XzCodec;

static BUILTIN: &[&dyn CompressionCodec] = &[
    #[cfg(feature = "compression-gzip")]
    &GZIP,
    #[cfg(feature = "compression-zstd")]
    &ZSTD,
    #[cfg(feature = "compression-bzip2")]
    &BZIP2,
    #[cfg(feature = "compression-xz")]
    &XZ,
];

/// Codecs compiled into this build, in detection order.
pub fn builtin_codecs() -> &'static [&'static dyn CompressionCodec] {
    BUILTIN
}

/// Detect a codec from the file path extension.
///
/// Matching is case-insensitive and works on multiple extensions
/// (e.g., `log.lammps.gz`).
fn detect_from_extension(path: impl AsRef<Path>) -> Option<&'static dyn CompressionCodec> {
    let path_str = path.as_ref().to_string_lossy().to_lowercase();

    for codec in builtin_codecs() {
        for ext in codec.extensions() {
            if path_str.ends_with(ext) {
                return Some(*codec);
            }
        }
    }
    None
}

/// Detect a codec from magic bytes at the start of a stream.
///
/// Peeks at the beginning of the buffered reader to match against codec
/// signatures. The reader is not advanced.
fn detect_from_magic<R: BufRead>(reader: &mut R) -> Option<&'static dyn CompressionCodec> {
    let buf = reader.fill_buf().ok()?;
    if buf.is_empty() {
        return None;
    }

    for codec in builtin_codecs() {
        if let Some(magic) = codec.magic_bytes()
            && buf.len() >= magic.len()
            && buf.starts_with(magic)
        {
            return Some(*codec);
        }
    }
    None
}

/// Automatically detect and wrap a reader with decompression if needed.
///
/// Detection strategy:
/// 1. Check file path extension (fast path)
/// 2. Fall back to magic byte detection if extension not recognized
/// 3. Return unwrapped reader if no compression detected
pub fn auto_detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<Box<dyn Read>> {
    // Try extension-based detection first
    if let Some(codec) = detect_from_extension(&path_hint) {
        return codec
            .wrap_reader(Box::new(reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    // Fall back to magic byte detection
    let mut buf_reader = BufReader::new(reader);
    if let Some(codec) = detect_from_magic(&mut buf_reader) {
        return codec
            .wrap_reader(Box::new(buf_reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    // No compression detected, return as-is
    Ok(Box::new(buf_reader))
}

/// Automatically detect and wrap a writer with compression if needed.
///
/// Detection is based solely on file path extension. If a matching codec is
/// found, the writer is wrapped with compression; otherwise it's returned as
/// a plain buffered writer.
pub fn auto_detect_writer<W: Write + 'static>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> Result<Box<dyn Write>> {
    if let Some(codec) = detect_from_extension(&path_hint) {
        return codec
            .wrap_writer(Box::new(writer))
            .with_context(|| format!("wrap writer with {} codec", codec.name()));
    }

    // No compression detected, return buffered writer
    Ok(Box::new(BufWriter::new(writer)))
}

// ============================================================================
// Built-in Codec Implementations
// ============================================================================

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz", ".gzip"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x1f, 0x8b])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        use flate2::read::GzDecoder;
        Ok(Box::new(GzDecoder::new(reader)))
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>> {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        Ok(Box::new(GzEncoder::new(writer, Compression::default())))
    }
}

#[cfg(feature = "compression-zstd")]
struct ZstdCodec;

#[cfg(feature = "compression-zstd")]
impl CompressionCodec for ZstdCodec {
    fn name(&self) -> &str {
        "zstd"
    }

    fn extensions(&self) -> &[&str] {
        &[".zst", ".zstd"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x28, 0xb5, 0x2f, 0xfd])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        zstd::stream::read::Decoder::new(reader).map(|d| Box::new(d) as Box<dyn Read>)
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>> {
        zstd::stream::write::Encoder::new(writer, 3)
            .map(|e| Box::new(e.auto_finish()) as Box<dyn Write>)
    }
}

#[cfg(feature = "compression-bzip2")]
struct Bzip2Codec;

#[cfg(feature = "compression-bzip2")]
impl CompressionCodec for Bzip2Codec {
    fn name(&self) -> &str {
        "bzip2"
    }

    fn extensions(&self) -> &[&str] {
        &[".bz2", ".bzip2"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x42, 0x5a])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        use bzip2::read::BzDecoder;
        Ok(Box::new(BzDecoder::new(reader)))
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>> {
        use bzip2::write::BzEncoder;
        use bzip2::Compression;
        Ok(Box::new(BzEncoder::new(writer, Compression::default())))
    }
}

#[cfg(feature = "compression-xz")]
struct XzCodec;

#[cfg(feature = "compression-xz")]
impl CompressionCodec for XzCodec {
    fn name(&self) -> &str {
        "xz"
    }

    fn extensions(&self) -> &[&str] {
        &[".xz"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        use xz2::read::XzDecoder;
        Ok(Box::new(XzDecoder::new(reader)))
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>> {
        use xz2::write::XzEncoder;
        Ok(Box::new(XzEncoder::new(writer, 6)))
    }
}
