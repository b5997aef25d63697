//! PMTINFO result set: the positions and orientations consumed by
//! detector simulation geometry.
//!
//! The table is a set of parallel arrays, one entry per sensor. It is built
//! through [`PmtInfoBuilder`] and frozen once all walls are emitted.

use serde::{Deserialize, Serialize};

/// Table name expected by downstream geometry loaders.
pub const PMTINFO_NAME: &str = "PMTINFO";

/// Type tag for an active (instrumented) sensor.
pub const ACTIVE_PMT_TYPE: i32 = 1;

/// One placed sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedSensor {
    pub position: [f64; 3],
    /// Unit vector the sensor faces.
    pub direction: [f64; 3],
    pub sensor_type: i32,
}

/// Parallel-array sensor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmtInfo {
    pub name: String,
    pub valid_begin: [i32; 2],
    pub valid_end: [i32; 2],
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub dir_x: Vec<f64>,
    pub dir_y: Vec<f64>,
    pub dir_z: Vec<f64>,
    #[serde(rename = "type")]
    pub sensor_type: Vec<i32>,
}

impl PmtInfo {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The `i`th sensor, if present.
    pub fn sensor(&self, i: usize) -> Option<PlacedSensor> {
        Some(PlacedSensor {
            position: [*self.x.get(i)?, *self.y.get(i)?, *self.z.get(i)?],
            direction: [*self.dir_x.get(i)?, *self.dir_y.get(i)?, *self.dir_z.get(i)?],
            sensor_type: *self.sensor_type.get(i)?,
        })
    }

    /// Iterate over all sensors in emission order.
    pub fn sensors(&self) -> impl Iterator<Item = PlacedSensor> + '_ {
        (0..self.len()).filter_map(|i| self.sensor(i))
    }

    /// Serialize in the RATDB-style layout: one key per line, the per-sensor
    /// arrays written compactly on a single line each.
    pub fn to_ratdb_json(&self) -> serde_json::Result<String> {
        use serde_json::to_string as json;

        let fields = [
            ("name", json(&self.name)?),
            ("valid_begin", json(&self.valid_begin)?),
            ("valid_end", json(&self.valid_end)?),
            ("x", json(&self.x)?),
            ("y", json(&self.y)?),
            ("z", json(&self.z)?),
            ("dir_x", json(&self.dir_x)?),
            ("dir_y", json(&self.dir_y)?),
            ("dir_z", json(&self.dir_z)?),
            ("type", json(&self.sensor_type)?),
        ];

        let body = fields
            .iter()
            .map(|(key, value)| format!("  \"{key}\": {value}"))
            .collect::<Vec<_>>()
            .join(",\n");
        Ok(format!("{{\n{body}\n}}\n"))
    }
}

/// Append-only builder for [`PmtInfo`].
#[derive(Debug, Default)]
pub struct PmtInfoBuilder {
    table: PmtInfo,
}

impl Default for PmtInfo {
    fn default() -> Self {
        Self {
            name: PMTINFO_NAME.to_string(),
            valid_begin: [0, 0],
            valid_end: [0, 0],
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
            dir_x: Vec::new(),
            dir_y: Vec::new(),
            dir_z: Vec::new(),
            sensor_type: Vec::new(),
        }
    }
}

impl PmtInfoBuilder {
    pub fn with_capacity(n: usize) -> Self {
        let column = || Vec::with_capacity(n);
        Self {
            table: PmtInfo {
                x: column(),
                y: column(),
                z: column(),
                dir_x: column(),
                dir_y: column(),
                dir_z: column(),
                sensor_type: Vec::with_capacity(n),
                ..PmtInfo::default()
            },
        }
    }

    pub fn push(&mut self, sensor: PlacedSensor) {
        let t = &mut self.table;
        let [x, y, z] = sensor.position;
        let [dx, dy, dz] = sensor.direction;
        t.x.push(x);
        t.y.push(y);
        t.z.push(z);
        t.dir_x.push(dx);
        t.dir_y.push(dy);
        t.dir_z.push(dz);
        t.sensor_type.push(sensor.sensor_type);
    }

    pub fn finish(self) -> PmtInfo {
        self.table
    }
}
