use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Serde adapter for the `yyyy-MM-dd HH:mm:ss` timestamp format expected by
/// the monitoring dashboards.
pub mod ts_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// One simulated reading from a process instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    #[serde(with = "ts_format")]
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub pressure: f64,
    pub flow_rate: f64,
    pub ph: f64,
    pub turbidity: f64,
    pub conductivity: f64,
}

/// One simulated reading from a blast-zone safety sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlastZoneReading {
    #[serde(with = "ts_format")]
    pub timestamp: NaiveDateTime,
    pub vibration_level: f64,
    pub noise_level: f64,
    pub air_quality: f64,
    pub personnel_count: u32,
    pub safety_status: String,
    pub explosive_gas: f64,
    pub distance_to_blast: f64,
}

/// Wire record for one process instrument: the reading plus its identity and
/// a status label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringData {
    pub sensor_id: String,
    pub data: SensorReading,
    pub status: String,
}
