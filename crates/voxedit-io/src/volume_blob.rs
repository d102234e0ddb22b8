//! Raw volume blob: a 32-byte header followed by one 2-byte record per cell.
//!
//! ```text
//! u32 magic  i32 size_x size_y size_z  i32 origin_x origin_y origin_z  i32 reserved
//! [type_id u8, orientation u8] * size_x*size_y*size_z   (z-major, then y, then x)
//! ```

use voxedit_blocks::Voxel;
use voxedit_volume::SparseVolume;

use crate::bytes::ByteReader;
use crate::error::{BlobError, SaveError};

pub const VOLUME_MAGIC: u32 = 0x4A6B_7900;
pub const VOLUME_HEADER_LEN: usize = 32;
const RECORD_LEN: usize = 2;

pub fn encode_volume(vol: &SparseVolume) -> Result<Vec<u8>, SaveError> {
    let size = vol.size();
    let cells = vol.cells();
    let total = VOLUME_HEADER_LEN + cells.len() * RECORD_LEN;
    let mut dims = [0i32; 3];
    for a in 0..3 {
        dims[a] = i32::try_from(size[a]).map_err(|_| SaveError::TooLarge(total))?;
    }
    let mut buf = Vec::with_capacity(total);
    buf.extend_from_slice(&VOLUME_MAGIC.to_le_bytes());
    for d in dims {
        buf.extend_from_slice(&d.to_le_bytes());
    }
    for o in vol.origin() {
        buf.extend_from_slice(&o.to_le_bytes());
    }
    buf.extend_from_slice(&0i32.to_le_bytes());
    for v in cells {
        buf.push(v.type_id);
        buf.push(v.orientation);
    }
    Ok(buf)
}

pub fn decode_volume(data: &[u8]) -> Result<SparseVolume, BlobError> {
    let mut r = ByteReader::new(data);
    let magic = r.u32().ok_or(BlobError::CorruptLength {
        expected: VOLUME_HEADER_LEN,
        actual: data.len(),
    })?;
    if magic != VOLUME_MAGIC {
        return Err(BlobError::BadSignature {
            expected: VOLUME_MAGIC,
            found: magic,
        });
    }
    if data.len() < VOLUME_HEADER_LEN {
        return Err(BlobError::CorruptLength {
            expected: VOLUME_HEADER_LEN,
            actual: data.len(),
        });
    }
    let mut read3 = || -> [i32; 3] {
        [
            r.i32().unwrap_or_default(),
            r.i32().unwrap_or_default(),
            r.i32().unwrap_or_default(),
        ]
    };
    let dims = read3();
    let origin = read3();
    let _reserved = r.i32();

    let size = dims_to_size(dims).ok_or(BlobError::BadDimensions { size: dims })?;
    let expected = size[0]
        .checked_mul(size[1])
        .and_then(|n| n.checked_mul(size[2]))
        .and_then(|n| n.checked_mul(RECORD_LEN))
        .and_then(|n| n.checked_add(VOLUME_HEADER_LEN))
        .ok_or(BlobError::BadDimensions { size: dims })?;
    if data.len() != expected {
        return Err(BlobError::CorruptLength {
            expected,
            actual: data.len(),
        });
    }
    if !origin_in_range(dims, origin) {
        return Err(BlobError::BadOrigin { origin, size: dims });
    }
    let cells: Vec<Voxel> = data[VOLUME_HEADER_LEN..]
        .chunks_exact(RECORD_LEN)
        .map(|c| Voxel {
            type_id: c[0],
            orientation: c[1],
        })
        .collect();
    SparseVolume::from_raw(size, origin, cells).ok_or(BlobError::CorruptLength {
        expected,
        actual: data.len(),
    })
}

// Every cell coordinate keeps one step of headroom so neighbour lookups cannot overflow.
fn origin_in_range(dims: [i32; 3], origin: [i32; 3]) -> bool {
    let lo = i32::MIN as i64 + 1;
    let hi = i32::MAX as i64 - 1;
    (0..3).all(|a| {
        let min = -(origin[a] as i64);
        let max = dims[a] as i64 - 1 - origin[a] as i64;
        // A zero-length axis holds no cells; only its origin must negate cleanly.
        min >= lo && min <= hi && (dims[a] == 0 || (max >= lo && max <= hi))
    })
}

fn dims_to_size(d: [i32; 3]) -> Option<[usize; 3]> {
    Some([
        usize::try_from(d[0]).ok()?,
        usize::try_from(d[1]).ok()?,
        usize::try_from(d[2]).ok()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxedit_blocks::Orientation;

    #[test]
    fn header_layout() {
        let mut vol = SparseVolume::with_extent(3);
        vol.set(1, 1, 1, Voxel::new(4, Orientation::new(3, true)));
        let b = encode_volume(&vol).unwrap();
        assert_eq!(b.len(), 32 + 27 * 2);
        assert_eq!(&b[0..4], &[0x00, 0x79, 0x6B, 0x4A]);
        assert_eq!(i32::from_le_bytes([b[4], b[5], b[6], b[7]]), 3);
        assert_eq!(i32::from_le_bytes([b[16], b[17], b[18], b[19]]), 1);
        assert_eq!(&b[28..32], &[0, 0, 0, 0]);
        // last cell is (1,1,1)
        assert_eq!(&b[b.len() - 2..], &[4, 0b111]);
    }

    #[test]
    fn signature_vs_length_errors() {
        assert_eq!(
            decode_volume(&[1, 2]),
            Err(BlobError::CorruptLength {
                expected: 32,
                actual: 2
            })
        );
        let mut junk = vec![0u8; 40];
        junk[0] = 0xFF;
        assert!(matches!(
            decode_volume(&junk),
            Err(BlobError::BadSignature { .. })
        ));
        let mut b = encode_volume(&SparseVolume::with_extent(2)).unwrap();
        b.pop();
        assert_eq!(
            decode_volume(&b),
            Err(BlobError::CorruptLength {
                expected: 32 + 16,
                actual: 32 + 15
            })
        );
    }

    #[test]
    fn negative_dimensions_are_corrupt() {
        let mut b = encode_volume(&SparseVolume::new()).unwrap();
        b[4..8].copy_from_slice(&(-1i32).to_le_bytes());
        let err = decode_volume(&b).unwrap_err();
        assert!(err.is_corrupt());
        assert_eq!(err, BlobError::BadDimensions { size: [-1, 0, 0] });
    }

    #[test]
    fn origin_without_neighbour_headroom_is_corrupt() {
        let mut vol = SparseVolume::new();
        vol.set(0, 0, 0, Voxel::new(1, Orientation::IDENTITY));
        let b = encode_volume(&vol).unwrap();
        for (origin, ok) in [
            (i32::MIN, false),
            (i32::MIN + 1, false),
            (i32::MIN + 2, true),
            (i32::MAX, true),
            (i32::MAX - 1, true),
        ] {
            let mut d = b.clone();
            d[16..20].copy_from_slice(&origin.to_le_bytes());
            let res = decode_volume(&d);
            assert_eq!(res.is_ok(), ok, "origin {origin}");
            if let Err(e) = res {
                assert!(e.is_corrupt());
                assert_eq!(
                    e,
                    BlobError::BadOrigin {
                        origin: [origin, 0, 0],
                        size: [1, 1, 1]
                    }
                );
            }
        }
    }
}
