//! The six interior walls of a rectangular box.
//!
//! Walls are a fixed table: each one knows which two box axes span its
//! face, which axis it is perpendicular to, and which side of the box it
//! sits on. Sensors are mounted facing inward, so a wall's inward normal
//! points opposite its fixed-axis sign.
//!
//! ```text
//!            +Y
//!             │   +Z
//!             │  ╱
//!             │ ╱
//!   −X ───────┼─────── +X
//!            ╱│
//!           ╱ │
//!         −Z  │
//!            −Y
//! ```

use serde::{Deserialize, Serialize};

/// Box axis indices.
pub mod axes {
    pub const X: usize = 0;
    pub const Y: usize = 1;
    pub const Z: usize = 2;
}

/// Identifies one of the six walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WallId {
    #[serde(rename = "+X Wall")]
    PosX = 0,
    #[serde(rename = "-X Wall")]
    NegX = 1,
    #[serde(rename = "+Y Wall")]
    PosY = 2,
    #[serde(rename = "-Y Wall")]
    NegY = 3,
    #[serde(rename = "+Z Wall")]
    PosZ = 4,
    #[serde(rename = "-Z Wall")]
    NegZ = 5,
}

impl WallId {
    /// Human-readable label, e.g. `"+X Wall"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::PosX => "+X Wall",
            Self::NegX => "-X Wall",
            Self::PosY => "+Y Wall",
            Self::NegY => "-Y Wall",
            Self::PosZ => "+Z Wall",
            Self::NegZ => "-Z Wall",
        }
    }

    /// The wall's descriptor from [`WALLS`].
    pub fn descriptor(self) -> &'static WallDescriptor {
        &WALLS[self as usize]
    }
}

impl std::fmt::Display for WallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Axis and orientation data for one wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallDescriptor {
    pub id: WallId,
    /// Box axes spanning the face, in (u, v) order.
    pub face_axes: [usize; 2],
    /// Axis the wall is perpendicular to.
    pub fixed_axis: usize,
    /// Which side of the box along `fixed_axis` (+1 or −1).
    pub sign: i8,
    /// Unit normal pointing into the box interior.
    pub inward_normal: [i8; 3],
}

impl WallDescriptor {
    /// Inward normal as a floating-point unit vector.
    pub fn normal(&self) -> [f64; 3] {
        self.inward_normal.map(f64::from)
    }

    /// Fixed-axis sign as a float.
    pub fn sign_f64(&self) -> f64 {
        f64::from(self.sign)
    }
}

/// All six walls in enumeration order: +X, −X, +Y, −Y, +Z, −Z.
pub static WALLS: [WallDescriptor; 6] = [
    WallDescriptor {
        id: WallId::PosX,
        face_axes: [axes::Y, axes::Z],
        fixed_axis: axes::X,
        sign: 1,
        inward_normal: [-1, 0, 0],
    },
    WallDescriptor {
        id: WallId::NegX,
        face_axes: [axes::Y, axes::Z],
        fixed_axis: axes::X,
        sign: -1,
        inward_normal: [1, 0, 0],
    },
    WallDescriptor {
        id: WallId::PosY,
        face_axes: [axes::X, axes::Z],
        fixed_axis: axes::Y,
        sign: 1,
        inward_normal: [0, -1, 0],
    },
    WallDescriptor {
        id: WallId::NegY,
        face_axes: [axes::X, axes::Z],
        fixed_axis: axes::Y,
        sign: -1,
        inward_normal: [0, 1, 0],
    },
    WallDescriptor {
        id: WallId::PosZ,
        face_axes: [axes::X, axes::Y],
        fixed_axis: axes::Z,
        sign: 1,
        inward_normal: [0, 0, -1],
    },
    WallDescriptor {
        id: WallId::NegZ,
        face_axes: [axes::X, axes::Y],
        fixed_axis: axes::Z,
        sign: -1,
        inward_normal: [0, 0, 1],
    },
];
