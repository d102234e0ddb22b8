use crate::bytes::ByteReader;
use crate::error::BlobError;

pub const LIGHT_MAGIC: u32 = 0x4C49_4748;
pub const LIGHT_VERSION: u16 = 1;
pub const LIGHT_BLOB_LEN: usize = 20;
/// Step used by the snapping rotations, in degrees.
pub const SNAP_ANGLE_DEG: f32 = 45.0;

const FLAG_SUN: u16 = 1 << 0;
const FLAG_SHADOWS: u16 = 1 << 1;

/// Scene lighting saved next to the volume.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightState {
    pub sun_yaw_deg: f32,
    pub sun_pitch_deg: f32,
    pub ambient_energy: f32,
    pub sun_visible: bool,
    pub shadows: bool,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            sun_yaw_deg: 0.0,
            sun_pitch_deg: -45.0,
            ambient_energy: 1.0,
            sun_visible: true,
            shadows: true,
        }
    }
}

// Keeps angles in [-180, 180).
fn wrap_deg(a: f32) -> f32 {
    (a + 180.0).rem_euclid(360.0) - 180.0
}

impl LightState {
    pub fn rotate_yaw(&mut self, deg: f32) {
        self.sun_yaw_deg = wrap_deg(self.sun_yaw_deg + deg);
    }

    pub fn rotate_pitch(&mut self, deg: f32) {
        self.sun_pitch_deg = wrap_deg(self.sun_pitch_deg + deg);
    }

    /// Rotates by whole snap steps; the sign of `dir` picks the direction.
    pub fn snap_yaw(&mut self, dir: i32) {
        self.rotate_yaw(dir.signum() as f32 * SNAP_ANGLE_DEG);
    }

    pub fn snap_pitch(&mut self, dir: i32) {
        self.rotate_pitch(dir.signum() as f32 * SNAP_ANGLE_DEG);
    }

    pub fn toggle_sun(&mut self) {
        self.sun_visible = !self.sun_visible;
    }

    pub fn toggle_shadows(&mut self) {
        self.shadows = !self.shadows;
    }

    /// Switches ambient light between off and full.
    pub fn toggle_ambient(&mut self) {
        self.ambient_energy = if self.ambient_energy > 0.0 { 0.0 } else { 1.0 };
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut flags = 0u16;
        if self.sun_visible {
            flags |= FLAG_SUN;
        }
        if self.shadows {
            flags |= FLAG_SHADOWS;
        }
        let mut buf = Vec::with_capacity(LIGHT_BLOB_LEN);
        buf.extend_from_slice(&LIGHT_MAGIC.to_le_bytes());
        buf.extend_from_slice(&LIGHT_VERSION.to_le_bytes());
        buf.extend_from_slice(&flags.to_le_bytes());
        buf.extend_from_slice(&self.sun_yaw_deg.to_le_bytes());
        buf.extend_from_slice(&self.sun_pitch_deg.to_le_bytes());
        buf.extend_from_slice(&self.ambient_energy.to_le_bytes());
        buf
    }

    pub fn decode(data: &[u8]) -> Result<Self, BlobError> {
        let short = || BlobError::CorruptLength {
            expected: LIGHT_BLOB_LEN,
            actual: data.len(),
        };
        let mut r = ByteReader::new(data);
        let magic = r.u32().ok_or_else(short)?;
        if magic != LIGHT_MAGIC {
            return Err(BlobError::BadSignature {
                expected: LIGHT_MAGIC,
                found: magic,
            });
        }
        let version = r.u16().ok_or_else(short)?;
        if version != LIGHT_VERSION {
            return Err(BlobError::BadSignature {
                expected: LIGHT_VERSION as u32,
                found: version as u32,
            });
        }
        let flags = r.u16().ok_or_else(short)?;
        let yaw = r.f32().ok_or_else(short)?;
        let pitch = r.f32().ok_or_else(short)?;
        let ambient = r.f32().ok_or_else(short)?;
        if r.remaining() > 0 {
            log::debug!("light blob: ignoring {} trailing bytes", r.remaining());
        }
        Ok(Self {
            sun_yaw_deg: yaw,
            sun_pitch_deg: pitch,
            ambient_energy: ambient,
            sun_visible: flags & FLAG_SUN != 0,
            shadows: flags & FLAG_SHADOWS != 0,
        })
    }
}
