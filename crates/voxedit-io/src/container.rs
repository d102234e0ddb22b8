//! Document container: a fixed entry table pointing at independent blobs.
//!
//! ```text
//! u32 magic  u16 header_size  u16 entry_count
//! entry_count * { i32 offset, i32 size }      zero padding up to header_size
//! block 0 (volume)      u32 end marker
//! block 1 (light)       u32 end marker
//! block 2 (render)      u32 end marker
//! ```
//!
//! Files without the container magic are read as a bare volume blob.

use voxedit_volume::SparseVolume;

use crate::bytes::ByteReader;
use crate::error::{BlobError, BlockIssue, LoadError, SaveError};
use crate::light::LightState;
use crate::render_config::RenderConfig;
use crate::volume_blob::{VOLUME_MAGIC, decode_volume, encode_volume};

pub const CONTAINER_MAGIC: u32 = 0xCA50_4701;
pub const END_MARKER: u32 = 0x4A4A_4A4A;
pub const ENTRY_COUNT: u16 = 8;

const PREAMBLE_LEN: usize = 8;
const ENTRY_LEN: usize = 8;
const HEADER_ALIGN: usize = 16;

pub const BLOCK_VOLUME: usize = 0;
pub const BLOCK_LIGHT: usize = 1;
pub const BLOCK_RENDER: usize = 2;
const USED_BLOCKS: usize = 3;

/// Everything a document stores.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SaveBundle {
    pub volume: SparseVolume,
    pub light: LightState,
    pub render: RenderConfig,
}

/// Outcome for one container block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockReport {
    /// False when defaults were substituted.
    pub loaded: bool,
    pub issues: Vec<BlockIssue>,
}

impl BlockReport {
    fn loaded() -> Self {
        Self {
            loaded: true,
            issues: Vec::new(),
        }
    }

    fn defaulted(issue: BlockIssue) -> Self {
        Self {
            loaded: false,
            issues: vec![issue],
        }
    }
}

/// What happened while reading a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
    /// The file was a bare volume blob rather than a container.
    pub legacy: bool,
    pub volume: BlockReport,
    pub light: BlockReport,
    pub render: BlockReport,
    /// Voxel type ids the catalog does not know, with cell counts.
    pub unknown_types: Vec<(u8, usize)>,
}

impl LoadReport {
    /// True when nothing was defaulted and nothing looked off.
    pub fn is_clean(&self) -> bool {
        [&self.volume, &self.light, &self.render]
            .iter()
            .all(|b| b.loaded && b.issues.is_empty())
            && self.unknown_types.is_empty()
    }
}

#[inline]
fn header_size(entries: usize) -> usize {
    let raw = PREAMBLE_LEN + entries * ENTRY_LEN;
    raw.div_ceil(HEADER_ALIGN) * HEADER_ALIGN
}

/// Serialises a document into container bytes.
pub fn write_container(
    volume: &SparseVolume,
    light: &LightState,
    render: &RenderConfig,
) -> Result<Vec<u8>, SaveError> {
    let blobs = [encode_volume(volume)?, light.encode(), render.encode()];
    let hsize = header_size(ENTRY_COUNT as usize);
    let total = hsize + blobs.iter().map(|b| b.len() + 4).sum::<usize>();
    if i32::try_from(total).is_err() {
        return Err(SaveError::TooLarge(total));
    }

    let mut buf = Vec::with_capacity(total);
    buf.extend_from_slice(&CONTAINER_MAGIC.to_le_bytes());
    buf.extend_from_slice(&(hsize as u16).to_le_bytes());
    buf.extend_from_slice(&ENTRY_COUNT.to_le_bytes());
    let mut offset = hsize;
    for i in 0..ENTRY_COUNT as usize {
        let (o, s) = match blobs.get(i) {
            Some(b) => {
                let entry = (offset as i32, b.len() as i32);
                offset += b.len() + 4;
                entry
            }
            None => (0, 0),
        };
        buf.extend_from_slice(&o.to_le_bytes());
        buf.extend_from_slice(&s.to_le_bytes());
    }
    buf.resize(hsize, 0);
    for b in &blobs {
        buf.extend_from_slice(b);
        buf.extend_from_slice(&END_MARKER.to_le_bytes());
    }
    Ok(buf)
}

/// Raw entry payload or the reason it is unusable.
fn block_slice(data: &[u8], offset: i32, size: i32) -> Result<(&[u8], bool), BlockIssue> {
    if size == 0 {
        return Err(BlockIssue::Absent);
    }
    let violation = BlockIssue::BoundsViolation {
        offset,
        size,
        file_len: data.len(),
    };
    let (Ok(start), Ok(len)) = (usize::try_from(offset), usize::try_from(size)) else {
        return Err(violation);
    };
    let Some(payload) = start.checked_add(len).and_then(|end| data.get(start..end)) else {
        return Err(violation);
    };
    let marker_ok = data
        .get(start + len..start + len + 4)
        .is_some_and(|m| m == END_MARKER.to_le_bytes());
    Ok((payload, marker_ok))
}

// Decodes a sibling block, falling back to `T::default()` on any problem.
fn read_sibling<T: Default>(
    name: &str,
    entry: Result<(&[u8], bool), BlockIssue>,
    decode: impl Fn(&[u8]) -> Result<T, BlobError>,
) -> (T, BlockReport) {
    let (payload, marker_ok) = match entry {
        Ok(e) => e,
        Err(issue) => {
            if issue != BlockIssue::Absent {
                log::warn!("{} block unusable ({:?}); using defaults", name, issue);
            }
            return (T::default(), BlockReport::defaulted(issue));
        }
    };
    match decode(payload) {
        Ok(v) => {
            let mut rep = BlockReport::loaded();
            if !marker_ok {
                log::warn!("{} block: missing end marker", name);
                rep.issues.push(BlockIssue::MissingEndMarker);
            }
            (v, rep)
        }
        Err(BlobError::BadSignature { expected, found }) => {
            log::warn!("{} block: bad signature {:#010x}; using defaults", name, found);
            (
                T::default(),
                BlockReport::defaulted(BlockIssue::BadSignature { expected, found }),
            )
        }
        Err(e) => {
            log::warn!("{} block: {}; using defaults", name, e);
            (T::default(), BlockReport::defaulted(BlockIssue::Corrupt(e)))
        }
    }
}

/// Parses container (or legacy volume) bytes. Damage confined to one block
/// defaults that block; a broken header or corrupt volume fails the load.
pub fn read_container(data: &[u8]) -> Result<(SaveBundle, LoadReport), LoadError> {
    let magic = ByteReader::peek_magic(data);
    if magic != Some(CONTAINER_MAGIC) {
        return read_legacy(data);
    }

    let mut r = ByteReader::new(data);
    let _ = r.u32();
    let (Some(hsize), Some(count)) = (r.u16(), r.u16()) else {
        return Err(LoadError::CorruptHeader("truncated preamble".into()));
    };
    let (hsize, count) = (hsize as usize, count as usize);
    let table_end = PREAMBLE_LEN + count * ENTRY_LEN;
    if hsize < table_end {
        return Err(LoadError::CorruptHeader(format!(
            "header size {hsize} smaller than entry table ({table_end})"
        )));
    }
    if hsize > data.len() {
        return Err(LoadError::CorruptHeader(format!(
            "header size {hsize} exceeds file length {}",
            data.len()
        )));
    }

    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let (Some(offset), Some(size)) = (r.i32(), r.i32()) else {
            return Err(LoadError::CorruptHeader(format!("truncated entry {i}")));
        };
        if i >= USED_BLOCKS && size != 0 {
            log::debug!("ignoring reserved container entry {} ({} bytes)", i, size);
        }
        entries.push((offset, size));
    }
    let entry = |i: usize| match entries.get(i) {
        Some(&(o, s)) => block_slice(data, o, s),
        None => Err(BlockIssue::Absent),
    };

    let (volume, volume_rep) = match entry(BLOCK_VOLUME) {
        Err(issue) => {
            if issue != BlockIssue::Absent {
                log::warn!("volume block unusable ({:?}); using empty volume", issue);
            }
            (SparseVolume::new(), BlockReport::defaulted(issue))
        }
        Ok((payload, marker_ok)) => match decode_volume(payload) {
            Ok(v) => {
                let mut rep = BlockReport::loaded();
                if !marker_ok {
                    log::warn!("volume block: missing end marker");
                    rep.issues.push(BlockIssue::MissingEndMarker);
                }
                (v, rep)
            }
            Err(BlobError::BadSignature { expected, found }) => {
                log::warn!("volume block: bad signature {:#010x}; using empty volume", found);
                (
                    SparseVolume::new(),
                    BlockReport::defaulted(BlockIssue::BadSignature { expected, found }),
                )
            }
            Err(e) => return Err(LoadError::Volume(e)),
        },
    };
    let (light, light_rep) = read_sibling("light", entry(BLOCK_LIGHT), LightState::decode);
    let (render, render_rep) =
        read_sibling("render config", entry(BLOCK_RENDER), RenderConfig::decode);

    Ok((
        SaveBundle {
            volume,
            light,
            render,
        },
        LoadReport {
            legacy: false,
            volume: volume_rep,
            light: light_rep,
            render: render_rep,
            unknown_types: Vec::new(),
        },
    ))
}

fn read_legacy(data: &[u8]) -> Result<(SaveBundle, LoadReport), LoadError> {
    let volume = match decode_volume(data) {
        Ok(v) => v,
        Err(e @ BlobError::BadSignature { .. }) => return Err(LoadError::UnrecognizedFormat(e)),
        // Too short to carry any magic at all.
        Err(e) if ByteReader::peek_magic(data) != Some(VOLUME_MAGIC) => {
            return Err(LoadError::UnrecognizedFormat(e));
        }
        Err(e) => return Err(LoadError::Volume(e)),
    };
    log::info!("reading bare volume blob ({} bytes)", data.len());
    Ok((
        SaveBundle {
            volume,
            ..SaveBundle::default()
        },
        LoadReport {
            legacy: true,
            volume: BlockReport::loaded(),
            light: BlockReport::defaulted(BlockIssue::Absent),
            render: BlockReport::defaulted(BlockIssue::Absent),
            unknown_types: Vec::new(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_sixteen_byte_aligned() {
        assert_eq!(header_size(8), 80);
        assert_eq!(header_size(1), 16);
        assert_eq!(header_size(2), 32);
    }

    #[test]
    fn writer_layout() {
        let b = write_container(
            &SparseVolume::new(),
            &LightState::default(),
            &RenderConfig::default(),
        )
        .unwrap();
        let mut r = ByteReader::new(&b);
        assert_eq!(r.u32(), Some(CONTAINER_MAGIC));
        assert_eq!(r.u16(), Some(80));
        assert_eq!(r.u16(), Some(8));
        assert_eq!((r.i32(), r.i32()), (Some(80), Some(32)));
        assert_eq!((r.i32(), r.i32()), (Some(80 + 36), Some(20)));
        assert_eq!((r.i32(), r.i32()), (Some(80 + 36 + 24), Some(8)));
        for _ in 3..8 {
            assert_eq!((r.i32(), r.i32()), (Some(0), Some(0)));
        }
        assert_eq!(b.len(), 80 + 36 + 24 + 12);
        assert_eq!(&b[80 + 32..80 + 36], &END_MARKER.to_le_bytes());
    }

    #[test]
    fn empty_input_is_unrecognized() {
        assert!(matches!(
            read_container(&[]),
            Err(LoadError::UnrecognizedFormat(_))
        ));
    }
}
