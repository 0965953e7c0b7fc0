//! The closed set of service categories a customer message can be routed to.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    WaterHeaters,
    ToiletRepairInstall,
    LeakDetection,
    GarbageDisposal,
    FaucetFixture,
    WholeHouseRepiping,
    GasLine,
    HoseBib,
    WaterShutoffValve,
    Pumps,
    Emergency,
    DrainCleaning,
    VideoCameraInspection,
    TrenchlessRepairs,
    LineRepairs,
    ElectricalGeneral,
    ApplianceRepair,
    #[default]
    Other,
}

impl Category {
    /// Every category, in the fixed order used for prompts and fallback scans.
    pub const ALL: [Category; 18] = [
        Category::WaterHeaters,
        Category::ToiletRepairInstall,
        Category::LeakDetection,
        Category::GarbageDisposal,
        Category::FaucetFixture,
        Category::WholeHouseRepiping,
        Category::GasLine,
        Category::HoseBib,
        Category::WaterShutoffValve,
        Category::Pumps,
        Category::Emergency,
        Category::DrainCleaning,
        Category::VideoCameraInspection,
        Category::TrenchlessRepairs,
        Category::LineRepairs,
        Category::ElectricalGeneral,
        Category::ApplianceRepair,
        Category::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::WaterHeaters => "plumbing:water_heaters",
            Category::ToiletRepairInstall => "plumbing:toilet_repair_install",
            Category::LeakDetection => "plumbing:leak_detection",
            Category::GarbageDisposal => "plumbing:garbage_disposal",
            Category::FaucetFixture => "plumbing:faucet_fixture",
            Category::WholeHouseRepiping => "plumbing:whole_house_repiping",
            Category::GasLine => "plumbing:gas_line",
            Category::HoseBib => "plumbing:hose_bib",
            Category::WaterShutoffValve => "plumbing:water_shutoff_valve",
            Category::Pumps => "plumbing:pumps",
            Category::Emergency => "plumbing:emergency",
            Category::DrainCleaning => "sewer_drains:drain_cleaning",
            Category::VideoCameraInspection => "sewer_drains:video_camera_inspection",
            Category::TrenchlessRepairs => "sewer_drains:trenchless_repairs",
            Category::LineRepairs => "sewer_drains:line_repairs",
            Category::ElectricalGeneral => "electrical:general",
            Category::ApplianceRepair => "appliances:repair",
            Category::Other => "other",
        }
    }

    /// The part after the namespace separator, e.g. `toilet_repair_install`.
    /// `None` for un-namespaced members such as `other`.
    pub fn tail(self) -> Option<&'static str> {
        self.as_str().split_once(':').map(|(_, tail)| tail)
    }

    /// Exact, case-sensitive lookup of a taxonomy string.
    pub fn from_code(code: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Comma-separated whitelist as embedded in the routing prompt.
    pub fn whitelist() -> String {
        Self::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
