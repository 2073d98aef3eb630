//! Sample cargo manifests for the read-only detail view
//!
//! Occupied cells open an inspection dialog showing a manifest record looked
//! up from a static catalog. This is flavor data, not live sensor data: the
//! only contract is determinism, the same (cell index, kind, block size)
//! always resolves to the same record. Merged blocks draw from a separate
//! large-cargo catalog.

use serde::Serialize;

use super::catalog::CargoKind;
use super::grid::{cell_label, CargoGrid, CellIndex, GRID_COLS};

/// One manifest record displayed in the detail dialog
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CargoManifest {
    pub name: &'static str,
    pub weight: &'static str,
    pub temp: &'static str,
    pub expiry: &'static str,
    pub sender: &'static str,
    pub receiver: &'static str,
    pub conditions: &'static str,
}

const COLD_CARGO: &[CargoManifest] = &[
    CargoManifest {
        name: "Beef, chilled",
        weight: "850 kg",
        temp: "2-4°C",
        expiry: "2026-01-15",
        sender: "MeatTrade LLC",
        receiver: "ProdMarket LLC",
        conditions: "Do not thaw, keep temperature regime",
    },
    CargoManifest {
        name: "Frozen fish",
        weight: "620 kg",
        temp: "-18°C",
        expiry: "2026-03-20",
        sender: "Rybkin & Co",
        receiver: "Ocean retail chain",
        conditions: "Deep frozen, fragile",
    },
    CargoManifest {
        name: "Dairy products",
        weight: "480 kg",
        temp: "2-6°C",
        expiry: "2026-01-28",
        sender: "Dairy Plant No. 1",
        receiver: "Freshness store",
        conditions: "Temperature regime, urgent delivery",
    },
    CargoManifest {
        name: "Ice cream",
        weight: "320 kg",
        temp: "-25°C",
        expiry: "2026-06-01",
        sender: "Ice Factory",
        receiver: "Mega mall",
        conditions: "Strict temperature regime",
    },
];

const DRY_CARGO: &[CargoManifest] = &[
    CargoManifest {
        name: "Chipboard sheets",
        weight: "1200 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "LesProm",
        receiver: "BuildMarket",
        conditions: "Keep away from moisture",
    },
    CargoManifest {
        name: "Wheat flour",
        weight: "950 kg",
        temp: "15-20°C",
        expiry: "2026-08-15",
        sender: "Mill Combine",
        receiver: "Bakery No. 3",
        conditions: "Dry storage",
    },
    CargoManifest {
        name: "Assorted grains",
        weight: "780 kg",
        temp: "10-25°C",
        expiry: "2026-12-01",
        sender: "GrainTrade",
        receiver: "Wholesale base",
        conditions: "Dry place, protect from rodents",
    },
    CargoManifest {
        name: "Textiles",
        weight: "450 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "FabricOpt",
        receiver: "Sewing factory",
        conditions: "Keep away from moisture and sunlight",
    },
];

const FRAGILE_CARGO: &[CargoManifest] = &[
    CargoManifest {
        name: "Glass units",
        weight: "680 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "GlassProm",
        receiver: "WindowService",
        conditions: "Do not tilt! Fragile!",
    },
    CargoManifest {
        name: "Consumer electronics",
        weight: "280 kg",
        temp: "10-25°C",
        expiry: "n/a",
        sender: "TechnoImport",
        receiver: "DNS store",
        conditions: "Fragile, keep dry, do not drop",
    },
    CargoManifest {
        name: "Ceramics",
        weight: "520 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "CeramArt",
        receiver: "BuildHome",
        conditions: "Extra fragile, store upright",
    },
    CargoManifest {
        name: "Glassware",
        weight: "390 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "Bohemia Import",
        receiver: "Tableware Center",
        conditions: "Fragile, handle with care when loading",
    },
];

const HAZMAT_CARGO: &[CargoManifest] = &[
    CargoManifest {
        name: "Chemical reagents",
        weight: "560 kg",
        temp: "5-15°C",
        expiry: "2027-01-01",
        sender: "ChemProm",
        receiver: "Chemistry Institute",
        conditions: "ADR class 8, acids, special permit",
    },
    CargoManifest {
        name: "Aviation fuel",
        weight: "1800 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "Oil depot",
        receiver: "Airport",
        conditions: "ADR class 3, flammable",
    },
    CargoManifest {
        name: "Li-ion batteries",
        weight: "420 kg",
        temp: "15-25°C",
        expiry: "n/a",
        sender: "BatteryTech",
        receiver: "ElectroWarehouse",
        conditions: "ADR class 9, lithium, do not short",
    },
];

const GENERAL_CARGO: &[CargoManifest] = &[
    CargoManifest {
        name: "Seasonal clothing",
        weight: "380 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "FashionOpt",
        receiver: "Europa mall",
        conditions: "Keep away from moisture",
    },
    CargoManifest {
        name: "Flat-pack furniture",
        weight: "890 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "IKEA warehouse",
        receiver: "IKEA store",
        conditions: "Do not stack heavy items on top",
    },
    CargoManifest {
        name: "Office supplies",
        weight: "240 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "OfficeMag",
        receiver: "School No. 15",
        conditions: "Standard conditions",
    },
    CargoManifest {
        name: "Children's toys",
        weight: "310 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "ToysOpt",
        receiver: "Kids World",
        conditions: "Certified, keep dry",
    },
];

const COLD_LARGE: &[CargoManifest] = &[
    CargoManifest {
        name: "Reefer container",
        weight: "2400 kg",
        temp: "-20°C",
        expiry: "n/a",
        sender: "",
        receiver: "",
        conditions: "Large volume, frozen",
    },
    CargoManifest {
        name: "Ice cream consignment",
        weight: "1800 kg",
        temp: "-25°C",
        expiry: "n/a",
        sender: "",
        receiver: "",
        conditions: "Strict temperature control",
    },
];

const DRY_LARGE: &[CargoManifest] = &[
    CargoManifest {
        name: "Chipboard pallet, 50 sheets",
        weight: "3200 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "",
        receiver: "",
        conditions: "Oversized cargo",
    },
    CargoManifest {
        name: "Flour container",
        weight: "2800 kg",
        temp: "15-20°C",
        expiry: "n/a",
        sender: "",
        receiver: "",
        conditions: "Dry storage",
    },
];

const FRAGILE_LARGE: &[CargoManifest] = &[CargoManifest {
    name: "LCD monitor consignment",
    weight: "1600 kg",
    temp: "10-25°C",
    expiry: "n/a",
    sender: "",
    receiver: "",
    conditions: "Extra fragile, do not tilt",
}];

const HAZMAT_LARGE: &[CargoManifest] = &[CargoManifest {
    name: "Fuel tank",
    weight: "5000 kg",
    temp: "n/a",
    expiry: "n/a",
    sender: "",
    receiver: "",
    conditions: "ADR class 3, flammable",
}];

const GENERAL_LARGE: &[CargoManifest] = &[
    CargoManifest {
        name: "Furniture set",
        weight: "1500 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "",
        receiver: "",
        conditions: "Oversized",
    },
    CargoManifest {
        name: "Industrial equipment",
        weight: "2200 kg",
        temp: "n/a",
        expiry: "n/a",
        sender: "",
        receiver: "",
        conditions: "Heavy cargo",
    },
];

/// Single-cell catalog for a kind. Hot cargo has no catalog of its own and
/// falls back to the general entries.
fn single_catalog(kind: CargoKind) -> &'static [CargoManifest] {
    match kind {
        CargoKind::Cold => COLD_CARGO,
        CargoKind::Dry => DRY_CARGO,
        CargoKind::Fragile => FRAGILE_CARGO,
        CargoKind::Hazmat => HAZMAT_CARGO,
        CargoKind::Hot | CargoKind::General => GENERAL_CARGO,
    }
}

/// Large-cargo catalog for merged blocks, same fallback rule
fn large_catalog(kind: CargoKind) -> &'static [CargoManifest] {
    match kind {
        CargoKind::Cold => COLD_LARGE,
        CargoKind::Dry => DRY_LARGE,
        CargoKind::Fragile => FRAGILE_LARGE,
        CargoKind::Hazmat => HAZMAT_LARGE,
        CargoKind::Hot | CargoKind::General => GENERAL_LARGE,
    }
}

/// Deterministic manifest lookup keyed by (cell index, kind, block size)
pub fn manifest_for(index: CellIndex, kind: CargoKind, block_size: usize) -> CargoManifest {
    let seed = index * 7 + kind.key().as_bytes()[0] as usize;
    if block_size >= 2 {
        let catalog = large_catalog(kind);
        let mut manifest = catalog[seed % catalog.len()].clone();
        manifest.expiry = "n/a";
        manifest.sender = "Wholesale depot";
        manifest.receiver = "Distribution hub";
        manifest
    } else {
        let catalog = single_catalog(kind);
        catalog[seed % catalog.len()].clone()
    }
}

/// Everything the host needs to fill the detail dialog for one cell
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CargoDetail {
    pub index: CellIndex,
    pub cell_id: String,

    /// 1-based row/column as displayed to the user
    pub row: usize,
    pub col: usize,

    pub kind: CargoKind,
    pub kind_label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,

    pub merged: bool,
    pub size: usize,

    pub manifest: CargoManifest,
}

/// Build the detail record for an occupied or merged cell; `None` when empty
pub fn detail_for(grid: &CargoGrid, index: CellIndex) -> Option<CargoDetail> {
    let kind = grid.kind_at(index)?;
    let size = grid.group_for_cell(index).map(|g| g.size).unwrap_or(1);
    let spec = kind.spec();
    Some(CargoDetail {
        index,
        cell_id: cell_label(index),
        row: index / GRID_COLS + 1,
        col: index % GRID_COLS + 1,
        kind,
        kind_label: spec.label,
        color: spec.color,
        icon: spec.icon,
        merged: size >= 2,
        size,
        manifest: manifest_for(index, kind, size),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_is_deterministic() {
        let a = manifest_for(5, CargoKind::Cold, 1);
        let b = manifest_for(5, CargoKind::Cold, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_merged_blocks_use_large_catalog() {
        let manifest = manifest_for(0, CargoKind::Dry, 4);
        assert_eq!(manifest.sender, "Wholesale depot");
        assert_eq!(manifest.receiver, "Distribution hub");
        assert_eq!(manifest.expiry, "n/a");
    }

    #[test]
    fn test_hot_falls_back_to_general() {
        let hot = manifest_for(0, CargoKind::Hot, 1);
        assert!(GENERAL_CARGO.contains(&hot));
    }

    #[test]
    fn test_detail_for_empty_cell_is_none() {
        let grid = CargoGrid::new(0);
        assert!(detail_for(&grid, 0).is_none());
    }

    #[test]
    fn test_detail_reports_merge_size() {
        let mut grid = CargoGrid::new(0);
        grid.merge(0, 9, CargoKind::Fragile).unwrap();
        let detail = detail_for(&grid, 9).unwrap();
        assert!(detail.merged);
        assert_eq!(detail.size, 4);
        assert_eq!(detail.cell_id, "BX-10");
        assert_eq!(detail.row, 2);
        assert_eq!(detail.col, 2);
    }
}
