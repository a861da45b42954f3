/// File size probing with the empty-versus-unreadable double check.
///
/// A first probe that fails or reports 0 bytes is followed by a second
/// probe. Only a second reading of exactly 0 counts as a genuinely empty
/// file. This is a heuristic: the file may change between the two reads,
/// so the distinction is approximate and never relied on for totals
/// (both outcomes contribute 0 bytes).
use std::fs;
use std::io;
use std::path::Path;

/// Source of file sizes. The scanner calls it once or twice per file.
pub trait SizeProbe {
    fn size_of(&self, path: &Path) -> io::Result<u64>;
}

/// Reads sizes from the filesystem without following symlinks.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl SizeProbe for FsProbe {
    fn size_of(&self, path: &Path) -> io::Result<u64> {
        fs::symlink_metadata(path).map(|meta| meta.len())
    }
}

impl<F> SizeProbe for F
where
    F: Fn(&Path) -> io::Result<u64>,
{
    fn size_of(&self, path: &Path) -> io::Result<u64> {
        self(path)
    }
}

/// Outcome of [`read_size`].
#[derive(Debug)]
pub enum SizeReading {
    /// A non-zero size.
    Sized(u64),
    /// Confirmed empty by a second probe.
    Empty,
    /// Neither probe produced a trustworthy size.
    Unreadable(io::Error),
}

impl SizeReading {
    /// Bytes this reading contributes to totals.
    pub fn bytes(&self) -> u64 {
        match self {
            Self::Sized(size) => *size,
            Self::Empty | Self::Unreadable(_) => 0,
        }
    }
}

/// Probe `path`, re-probing once when the first read fails or reports 0.
pub fn read_size<P: SizeProbe + ?Sized>(probe: &P, path: &Path) -> SizeReading {
    match probe.size_of(path) {
        Ok(size) if size > 0 => SizeReading::Sized(size),
        _ => match probe.size_of(path) {
            Ok(0) => SizeReading::Empty,
            Ok(size) => SizeReading::Unreadable(io::Error::other(format!(
                "size changed between reads (now {size} bytes)"
            ))),
            Err(err) => SizeReading::Unreadable(err),
        },
    }
}
