use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category hint shown to controllers during pairing.
///
/// Persisted as the protocol-level numeric code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AccessoryCategory {
    #[default]
    Other = 1,
    Bridge = 2,
    Fan = 3,
    GarageDoorOpener = 4,
    Lightbulb = 5,
    DoorLock = 6,
    Outlet = 7,
    Switch = 8,
    Thermostat = 9,
    Sensor = 10,
    SecuritySystem = 11,
    Door = 12,
    Window = 13,
    WindowCovering = 14,
    ProgrammableSwitch = 15,
    RangeExtender = 16,
    IpCamera = 17,
    VideoDoorbell = 18,
    AirPurifier = 19,
    Heater = 20,
    AirConditioner = 21,
    Humidifier = 22,
    Dehumidifier = 23,
    Speaker = 26,
    Sprinkler = 28,
    Faucet = 29,
    ShowerHead = 30,
    Television = 31,
    TargetController = 32,
}

/// A persisted category code this core does not know.
#[derive(Debug, Error)]
#[error("unknown accessory category code {0}")]
pub struct UnknownCategory(pub u8);

impl From<AccessoryCategory> for u8 {
    fn from(category: AccessoryCategory) -> Self {
        category as u8
    }
}

impl TryFrom<u8> for AccessoryCategory {
    type Error = UnknownCategory;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        use AccessoryCategory::*;
        Ok(match code {
            1 => Other,
            2 => Bridge,
            3 => Fan,
            4 => GarageDoorOpener,
            5 => Lightbulb,
            6 => DoorLock,
            7 => Outlet,
            8 => Switch,
            9 => Thermostat,
            10 => Sensor,
            11 => SecuritySystem,
            12 => Door,
            13 => Window,
            14 => WindowCovering,
            15 => ProgrammableSwitch,
            16 => RangeExtender,
            17 => IpCamera,
            18 => VideoDoorbell,
            19 => AirPurifier,
            20 => Heater,
            21 => AirConditioner,
            22 => Humidifier,
            23 => Dehumidifier,
            26 => Speaker,
            28 => Sprinkler,
            29 => Faucet,
            30 => ShowerHead,
            31 => Television,
            32 => TargetController,
            other => return Err(UnknownCategory(other)),
        })
    }
}
