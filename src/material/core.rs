use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of material categories the suggestion catalog is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialCategory {
    Structural,
    Foam,
    Film,
    Textile,
    Fastener,
    Electrical,
    Chemical,
    Composite,
    Polymer,
    Other,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 10] = [
        MaterialCategory::Structural,
        MaterialCategory::Foam,
        MaterialCategory::Film,
        MaterialCategory::Textile,
        MaterialCategory::Fastener,
        MaterialCategory::Electrical,
        MaterialCategory::Chemical,
        MaterialCategory::Composite,
        MaterialCategory::Polymer,
        MaterialCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::Structural => "Structural",
            MaterialCategory::Foam => "Foam",
            MaterialCategory::Film => "Film",
            MaterialCategory::Textile => "Textile",
            MaterialCategory::Fastener => "Fastener",
            MaterialCategory::Electrical => "Electrical",
            MaterialCategory::Chemical => "Chemical",
            MaterialCategory::Composite => "Composite",
            MaterialCategory::Polymer => "Polymer",
            MaterialCategory::Other => "Other",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle position of a material.
///
/// `new → planned → placed`, with `archived` reachable from any state and
/// terminal. Transition rules live in the planner's action layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialStatus {
    New,
    Planned,
    Placed,
    Archived,
}

/// A reusable resource unit logged by the crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: String,
    pub category: MaterialCategory,
    pub mass_kg: f64,
    pub qty: u32,
    pub status: MaterialStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Material {
    /// Combined mass of every unit in the lot.
    pub fn lot_mass(&self) -> f64 {
        self.mass_kg * f64::from(self.qty)
    }

    pub fn is_archived(&self) -> bool {
        self.status == MaterialStatus::Archived
    }
}

/// The inventory a fresh plan starts from, matching the packaging and
/// structural stock left over after habitat inflation.
pub fn seed_materials() -> Vec<Material> {
    fn entry(
        id: &str,
        name: &str,
        category: MaterialCategory,
        mass_kg: f64,
        qty: u32,
        status: MaterialStatus,
    ) -> Material {
        Material {
            id: id.to_string(),
            name: name.to_string(),
            category,
            mass_kg,
            qty,
            status,
            notes: None,
        }
    }

    use MaterialCategory::*;
    use MaterialStatus::{Archived, New};

    vec![
        entry("m1", "Aluminum cube strut", Structural, 25.0, 12, New),
        entry("m2", "Zotek F30 foam", Foam, 18.0, 6, New),
        entry("m3", "Bubble wrap", Film, 3.2, 10, New),
        entry("m4", "Carbon fiber panel", Structural, 12.0, 8, Archived),
        entry("m5", "Polycarbonate sheet", Film, 7.5, 15, New),
        entry("m6", "Titanium bolts", Fastener, 0.5, 100, New),
        entry("m7", "Kevlar fabric roll", Textile, 22.0, 4, New),
        entry("m8", "PVC insulation sheet", Polymer, 9.0, 14, New),
        entry("m9", "Copper wiring spool", Electrical, 30.0, 3, New),
        entry("m10", "Stainless steel rod", Structural, 40.0, 7, New),
        entry("m11", "Glass fiber mesh", Composite, 5.5, 11, Archived),
        entry("m12", "Silicone sealant", Chemical, 2.5, 25, New),
        entry("m13", "Lithium battery pack", Electrical, 15.0, 9, New),
        entry("m14", "Acrylic panel", Film, 6.0, 13, New),
        entry("m15", "Epoxy resin barrel", Chemical, 50.0, 2, New),
        entry("m16", "Nylon zip ties", Fastener, 1.2, 200, New),
        entry("m17", "Thermal insulation blanket", Foam, 14.0, 5, New),
        entry("m18", "Steel hinge set", Fastener, 3.0, 30, Archived),
        entry("m19", "Magnesium alloy plate", Structural, 28.0, 6, New),
        entry("m20", "Ceramic tiles", Composite, 35.0, 20, New),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_inventory_shape() {
        let seed = seed_materials();
        assert_eq!(seed.len(), 20);
        assert_eq!(seed.iter().filter(|m| m.is_archived()).count(), 3);
        assert!(seed.iter().all(|m| m.mass_kg >= 0.0 && m.qty > 0));
    }

    #[test]
    fn lot_mass_multiplies_by_quantity() {
        let seed = seed_materials();
        let strut = seed.iter().find(|m| m.id == "m1").unwrap();
        assert_eq!(strut.lot_mass(), 300.0);
    }

    #[test]
    fn status_round_trips_lowercase() {
        let json = serde_json::to_string(&MaterialStatus::Planned).unwrap();
        assert_eq!(json, "\"planned\"");
        let parsed: MaterialStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(parsed, MaterialStatus::Archived);
    }

    #[test]
    fn material_serializes_with_original_field_names() {
        let material = seed_materials().remove(0);
        let value = serde_json::to_value(&material).unwrap();
        assert_eq!(value["massKg"], serde_json::json!(25.0));
        assert_eq!(value["category"], serde_json::json!("Structural"));
        assert!(value.get("notes").is_none());
    }
}
