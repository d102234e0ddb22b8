use crate::bytes::ByteReader;
use crate::error::BlobError;

pub const RENDER_MAGIC: u32 = 0x5243_4647;
pub const RENDER_VERSION: u16 = 1;
pub const RENDER_BLOB_LEN: usize = 8;
pub const MIN_PIXEL_SCALE: u8 = 1;
pub const MAX_PIXEL_SCALE: u8 = 8;

const FLAG_UI: u8 = 1 << 0;
const FLAG_GIZMOS: u8 = 1 << 1;

/// Viewport options saved with the document.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Screen pixels per rendered pixel.
    pub pixel_scale: u8,
    pub ui_visible: bool,
    pub gizmos_visible: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixel_scale: 2,
            ui_visible: true,
            gizmos_visible: true,
        }
    }
}

impl RenderConfig {
    pub fn pixels_up(&mut self) {
        self.pixel_scale = self.pixel_scale.saturating_add(1).min(MAX_PIXEL_SCALE);
    }

    pub fn pixels_down(&mut self) {
        self.pixel_scale = self.pixel_scale.saturating_sub(1).max(MIN_PIXEL_SCALE);
    }

    pub fn toggle_ui(&mut self) {
        self.ui_visible = !self.ui_visible;
    }

    pub fn toggle_gizmos(&mut self) {
        self.gizmos_visible = !self.gizmos_visible;
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut flags = 0u8;
        if self.ui_visible {
            flags |= FLAG_UI;
        }
        if self.gizmos_visible {
            flags |= FLAG_GIZMOS;
        }
        let mut buf = Vec::with_capacity(RENDER_BLOB_LEN);
        buf.extend_from_slice(&RENDER_MAGIC.to_le_bytes());
        buf.extend_from_slice(&RENDER_VERSION.to_le_bytes());
        buf.push(self.pixel_scale);
        buf.push(flags);
        buf
    }

    pub fn decode(data: &[u8]) -> Result<Self, BlobError> {
        let short = || BlobError::CorruptLength {
            expected: RENDER_BLOB_LEN,
            actual: data.len(),
        };
        let mut r = ByteReader::new(data);
        let magic = r.u32().ok_or_else(short)?;
        if magic != RENDER_MAGIC {
            return Err(BlobError::BadSignature {
                expected: RENDER_MAGIC,
                found: magic,
            });
        }
        let version = r.u16().ok_or_else(short)?;
        if version != RENDER_VERSION {
            return Err(BlobError::BadSignature {
                expected: RENDER_VERSION as u32,
                found: version as u32,
            });
        }
        let raw_scale = r.u8().ok_or_else(short)?;
        let flags = r.u8().ok_or_else(short)?;
        let pixel_scale = raw_scale.clamp(MIN_PIXEL_SCALE, MAX_PIXEL_SCALE);
        if pixel_scale != raw_scale {
            log::warn!("render config: pixel scale {} clamped to {}", raw_scale, pixel_scale);
        }
        Ok(Self {
            pixel_scale,
            ui_visible: flags & FLAG_UI != 0,
            gizmos_visible: flags & FLAG_GIZMOS != 0,
        })
    }
}
