//! Stateless generator for simulated sensor readings.
//!
//! Every call produces a fresh snapshot with randomized values inside fixed
//! domain ranges. Nothing is cached; the broadcaster and the pull endpoints
//! both call straight into this module.

use std::collections::HashMap;

use chrono::Local;
use rand::Rng;

use crate::model::{BlastZoneReading, MonitoringData, SensorReading};

/// The fixed set of process instruments covered by every snapshot.
pub const PROCESS_SENSORS: [&str; 4] = ["reactor_1", "pipeline_a", "tank_main", "pump_primary"];

/// The fixed set of blast-zone safety sensors.
pub const BLAST_ZONES: [&str; 4] = [
    "blast_zone_1",
    "blast_zone_2",
    "blast_zone_3",
    "blast_zone_4",
];

/// Builds one snapshot across all process instruments.
pub fn process_snapshot() -> HashMap<String, MonitoringData> {
    let mut rng = rand::rng();
    let mut snapshot = HashMap::with_capacity(PROCESS_SENSORS.len());

    for sensor_id in PROCESS_SENSORS {
        snapshot.insert(
            sensor_id.to_string(),
            MonitoringData {
                sensor_id: sensor_id.to_string(),
                data: random_reading(&mut rng),
                status: "normal".to_string(),
            },
        );
    }

    snapshot
}

/// Builds one snapshot across all blast-zone sensors.
pub fn blast_snapshot() -> HashMap<String, BlastZoneReading> {
    let mut rng = rand::rng();
    let mut snapshot = HashMap::with_capacity(BLAST_ZONES.len());

    for zone_id in BLAST_ZONES {
        snapshot.insert(zone_id.to_string(), random_blast_reading(&mut rng));
    }

    snapshot
}

fn random_reading(rng: &mut impl Rng) -> SensorReading {
    SensorReading {
        timestamp: Local::now().naive_local(),
        temperature: rng.random_range(20.0..50.0), // 20-50 deg C
        pressure: rng.random_range(1.0..5.0),      // 1-5 bar
        flow_rate: rng.random_range(10.0..100.0),  // 10-100 L/min
        ph: rng.random_range(6.0..8.0),            // 6-8 pH
        turbidity: rng.random_range(0.0..10.0),    // 0-10 NTU
        conductivity: rng.random_range(100.0..1000.0), // 100-1000 uS/cm
    }
}

fn random_blast_reading(rng: &mut impl Rng) -> BlastZoneReading {
    BlastZoneReading {
        timestamp: Local::now().naive_local(),
        vibration_level: rng.random_range(0.0..100.0), // 0-100 mm/s
        noise_level: rng.random_range(60.0..100.0),    // 60-100 dB
        air_quality: rng.random_range(50.0..100.0),    // 50-100 AQI
        personnel_count: rng.random_range(0..20),      // 0-20 people
        safety_status: "safe".to_string(),
        explosive_gas: rng.random_range(0.0..10.0),    // 0-10 ppm
        distance_to_blast: rng.random_range(100.0..1000.0), // 100-1000 meters
    }
}
