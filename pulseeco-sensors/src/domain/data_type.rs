//! Measurement data types and their host classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A category of measurement reported by a station.
///
/// Serialized as the exact string the API uses (`"pm10"`, `"noise_dba"`,
/// `"gasResistance"`, ...). Types this crate does not know are kept
/// verbatim in [`DataValueType::Other`] so that new upstream pollutants
/// still produce sensors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataValueType {
    Pm10,
    Pm25,
    Pm1,
    Temperature,
    Humidity,
    Pressure,
    Noise,
    NoiseDba,
    O3,
    No2,
    So2,
    Co,
    GasResistance,
    Other(String),
}

impl DataValueType {
    /// The upstream string for this type.
    pub fn as_str(&self) -> &str {
        match self {
            DataValueType::Pm10 => "pm10",
            DataValueType::Pm25 => "pm25",
            DataValueType::Pm1 => "pm1",
            DataValueType::Temperature => "temperature",
            DataValueType::Humidity => "humidity",
            DataValueType::Pressure => "pressure",
            DataValueType::Noise => "noise",
            DataValueType::NoiseDba => "noise_dba",
            DataValueType::O3 => "o3",
            DataValueType::No2 => "no2",
            DataValueType::So2 => "so2",
            DataValueType::Co => "co",
            DataValueType::GasResistance => "gasResistance",
            DataValueType::Other(s) => s,
        }
    }

    /// Host device class for this type, if the host has one.
    pub fn device_class(&self) -> Option<DeviceClass> {
        match self {
            DataValueType::Pm10 => Some(DeviceClass::Pm10),
            DataValueType::Pm25 => Some(DeviceClass::Pm25),
            DataValueType::Pm1 => Some(DeviceClass::Pm1),
            DataValueType::Temperature => Some(DeviceClass::Temperature),
            DataValueType::Humidity => Some(DeviceClass::Humidity),
            DataValueType::Pressure => Some(DeviceClass::Pressure),
            DataValueType::Noise | DataValueType::NoiseDba => Some(DeviceClass::SoundPressure),
            DataValueType::O3 => Some(DeviceClass::Ozone),
            DataValueType::No2 => Some(DeviceClass::NitrogenDioxide),
            DataValueType::So2 => Some(DeviceClass::SulphurDioxide),
            DataValueType::Co => Some(DeviceClass::CarbonMonoxide),
            DataValueType::GasResistance => Some(DeviceClass::Gas),
            DataValueType::Other(_) => None,
        }
    }
}

impl From<&str> for DataValueType {
    fn from(s: &str) -> Self {
        match s {
            "pm10" => DataValueType::Pm10,
            "pm25" => DataValueType::Pm25,
            "pm1" => DataValueType::Pm1,
            "temperature" => DataValueType::Temperature,
            "humidity" => DataValueType::Humidity,
            "pressure" => DataValueType::Pressure,
            "noise" => DataValueType::Noise,
            "noise_dba" => DataValueType::NoiseDba,
            "o3" => DataValueType::O3,
            "no2" => DataValueType::No2,
            "so2" => DataValueType::So2,
            "co" => DataValueType::Co,
            "gasResistance" => DataValueType::GasResistance,
            other => DataValueType::Other(other.to_string()),
        }
    }
}

impl From<String> for DataValueType {
    fn from(s: String) -> Self {
        DataValueType::from(s.as_str())
    }
}

impl From<DataValueType> for String {
    fn from(t: DataValueType) -> Self {
        match t {
            DataValueType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DataValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host device class used to pick units and icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Pm10,
    Pm25,
    Pm1,
    Temperature,
    Humidity,
    Pressure,
    SoundPressure,
    Ozone,
    NitrogenDioxide,
    SulphurDioxide,
    CarbonMonoxide,
    Gas,
}

/// Host state class. Every Pulse.eco reading is an instantaneous measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateClass {
    Measurement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_roundtrip_through_strings() {
        for s in [
            "pm10",
            "pm25",
            "pm1",
            "temperature",
            "humidity",
            "pressure",
            "noise",
            "noise_dba",
            "o3",
            "no2",
            "so2",
            "co",
            "gasResistance",
        ] {
            let t = DataValueType::from(s);
            assert!(!matches!(t, DataValueType::Other(_)), "{s} should be known");
            assert_eq!(t.as_str(), s);
        }
    }

    #[test]
    fn unknown_type_is_kept_verbatim() {
        let t = DataValueType::from("nh3");
        assert_eq!(t, DataValueType::Other("nh3".to_string()));
        assert_eq!(t.to_string(), "nh3");
        assert_eq!(t.device_class(), None);
    }

    #[test]
    fn serde_uses_upstream_strings() {
        let t: DataValueType = serde_json::from_str("\"gasResistance\"").unwrap();
        assert_eq!(t, DataValueType::GasResistance);
        assert_eq!(serde_json::to_string(&DataValueType::NoiseDba).unwrap(), "\"noise_dba\"");
    }

    #[test]
    fn device_class_mapping() {
        assert_eq!(DataValueType::Pm10.device_class(), Some(DeviceClass::Pm10));
        assert_eq!(DataValueType::O3.device_class(), Some(DeviceClass::Ozone));
        assert_eq!(
            DataValueType::Noise.device_class(),
            DataValueType::NoiseDba.device_class()
        );
        assert_eq!(
            DataValueType::So2.device_class(),
            Some(DeviceClass::SulphurDioxide)
        );
        assert_eq!(DataValueType::GasResistance.device_class(), Some(DeviceClass::Gas));
    }
}
