//! Cargo type catalog
//!
//! This module defines the fixed catalog of cargo categories and the
//! display/handling metadata attached to each one. The catalog is a static
//! lookup table, not runtime state.

use serde::{Deserialize, Serialize};

/// Enumeration of all cargo categories that can occupy a grid cell
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CargoKind {
    /// Refrigerated cargo (2-6°C band)
    Cold,

    /// Hot cargo (60-80°C band)
    Hot,

    /// Dry goods
    Dry,

    /// Fragile cargo requiring careful handling
    Fragile,

    /// Hazardous cargo (ADR classed)
    Hazmat,

    /// General cargo with no special regime
    General,
}

/// Temperature regime a cargo kind imposes on the hold
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TempZone {
    Cold,
    Hot,
    Neutral,
}

/// Static display and handling metadata for one cargo kind
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CargoSpec {
    /// Human-readable category label
    pub label: &'static str,

    /// Hex accent color used by the host for cell styling
    pub color: &'static str,

    /// Icon name (Font Awesome id on the host side)
    pub icon: &'static str,

    /// Displayed temperature band
    pub temp_label: &'static str,

    /// Unit weight factor per occupied cell (tons)
    pub weight_factor: f32,

    /// Base per-cell weight used for rendered weight labels (kg)
    pub base_weight_kg: u32,

    /// Temperature regime this kind imposes
    pub temp_zone: TempZone,
}

impl CargoKind {
    /// All kinds in catalog order
    pub const ALL: [CargoKind; 6] = [
        CargoKind::Cold,
        CargoKind::Hot,
        CargoKind::Dry,
        CargoKind::Fragile,
        CargoKind::Hazmat,
        CargoKind::General,
    ];

    /// Stable lowercase key, matching the persisted representation
    pub fn key(self) -> &'static str {
        match self {
            CargoKind::Cold => "cold",
            CargoKind::Hot => "hot",
            CargoKind::Dry => "dry",
            CargoKind::Fragile => "fragile",
            CargoKind::Hazmat => "hazmat",
            CargoKind::General => "general",
        }
    }

    /// Parse a lowercase key back into a kind
    pub fn from_key(key: &str) -> Option<CargoKind> {
        CargoKind::ALL.iter().copied().find(|k| k.key() == key)
    }

    /// Catalog metadata for this kind
    pub fn spec(self) -> &'static CargoSpec {
        match self {
            CargoKind::Cold => &CargoSpec {
                label: "Refrigerated",
                color: "#38bdf8",
                icon: "snowflake",
                temp_label: "2-6°C",
                weight_factor: 0.8,
                base_weight_kg: 400,
                temp_zone: TempZone::Cold,
            },
            CargoKind::Hot => &CargoSpec {
                label: "Hot",
                color: "#ef4444",
                icon: "fire",
                temp_label: "60-80°C",
                weight_factor: 0.7,
                base_weight_kg: 350,
                temp_zone: TempZone::Hot,
            },
            CargoKind::Dry => &CargoSpec {
                label: "Dry",
                color: "#f97316",
                icon: "box",
                temp_label: "18-22°C",
                weight_factor: 0.6,
                base_weight_kg: 350,
                temp_zone: TempZone::Neutral,
            },
            CargoKind::Fragile => &CargoSpec {
                label: "Fragile",
                color: "#a855f7",
                icon: "wine-glass",
                temp_label: "15-20°C",
                weight_factor: 0.4,
                base_weight_kg: 300,
                temp_zone: TempZone::Neutral,
            },
            CargoKind::Hazmat => &CargoSpec {
                label: "Hazardous (ADR)",
                color: "#ef4444",
                icon: "radiation",
                temp_label: "Controlled",
                weight_factor: 1.0,
                base_weight_kg: 500,
                temp_zone: TempZone::Neutral,
            },
            CargoKind::General => &CargoSpec {
                label: "General cargo",
                color: "#6b7280",
                icon: "cubes",
                temp_label: "Any",
                weight_factor: 0.5,
                base_weight_kg: 400,
                temp_zone: TempZone::Neutral,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for kind in CargoKind::ALL {
            assert_eq!(CargoKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(CargoKind::from_key("frozen"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&CargoKind::Hazmat).unwrap();
        assert_eq!(json, "\"hazmat\"");
        let back: CargoKind = serde_json::from_str("\"cold\"").unwrap();
        assert_eq!(back, CargoKind::Cold);
    }

    #[test]
    fn test_temp_zones() {
        assert_eq!(CargoKind::Cold.spec().temp_zone, TempZone::Cold);
        assert_eq!(CargoKind::Hot.spec().temp_zone, TempZone::Hot);
        assert_eq!(CargoKind::Hazmat.spec().temp_zone, TempZone::Neutral);
    }
}
