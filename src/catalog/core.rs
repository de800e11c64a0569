use serde::{Deserialize, Serialize};

use crate::grid::Footprint;
use crate::material::{Material, MaterialCategory};

/// Crew effort a reuse proposal demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Med,
    High,
}

/// Primary benefit a reuse proposal delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Benefit {
    Thermal,
    Structural,
    Storage,
    Safety,
    Acoustic,
    Electrical,
}

/// A reuse proposal bound to a specific material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub material_id: String,
    pub title: String,
    pub rationale: String,
    pub effort: Effort,
    pub benefit: Benefit,
    pub footprint: Footprint,
}

/// A pre-authored, category-scoped reuse blueprint with no material bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Template {
    pub id: &'static str,
    pub title: &'static str,
    pub rationale: &'static str,
    pub effort: Effort,
    pub benefit: Benefit,
    pub footprint: Footprint,
}

impl Template {
    /// Bind the template to a material. The composite id keeps suggestion
    /// ids unique across materials sharing a template.
    pub fn stamp(&self, material_id: &str) -> Suggestion {
        Suggestion {
            id: format!("{}-{}", self.id, material_id),
            material_id: material_id.to_string(),
            title: self.title.to_string(),
            rationale: self.rationale.to_string(),
            effort: self.effort,
            benefit: self.benefit,
            footprint: self.footprint,
        }
    }
}

const fn template(
    id: &'static str,
    title: &'static str,
    rationale: &'static str,
    effort: Effort,
    benefit: Benefit,
    w: u16,
    h: u16,
) -> Template {
    Template {
        id,
        title,
        rationale,
        effort,
        benefit,
        footprint: Footprint::new(w, h),
    }
}

use Benefit::*;
use Effort::*;

const STRUCTURAL: [Template; 6] = [
    template("s1", "Hydroponic Rack", "Vertical farming support structure", Med, Storage, 2, 3),
    template("s2", "Storage Shelf", "Organize tools and supplies", Low, Storage, 3, 1),
    template("s3", "Instrument Frame", "Mount scientific equipment", Med, Structural, 2, 2),
    template(
        "s11",
        "Work Bench",
        "Durable workspace for repairs and experiments",
        High,
        Structural,
        3,
        2,
    ),
    template(
        "s12",
        "Exercise Frame",
        "Support structure for crew exercise equipment",
        Med,
        Safety,
        2,
        2,
    ),
    template(
        "s13",
        "Habitat Divider",
        "Repurpose struts to section off living zones",
        Med,
        Acoustic,
        3,
        1,
    ),
];

const FOAM: [Template; 5] = [
    template(
        "s4",
        "Wall Insulation",
        "Reduce thermal loss in sleeping quarters",
        Low,
        Thermal,
        3,
        1,
    ),
    template(
        "s5",
        "Sleeping Mat",
        "Comfort and thermal barrier for crew rest",
        Low,
        Thermal,
        2,
        1,
    ),
    template("s6", "Equipment Padding", "Protect sensitive instruments", Low, Safety, 1, 1),
    template(
        "s14",
        "Soundproof Panel",
        "Line walls to reduce noise in shared areas",
        Low,
        Acoustic,
        2,
        2,
    ),
    template(
        "s15",
        "Emergency Float",
        "Improvised flotation or cushion for water tanks",
        Med,
        Safety,
        2,
        1,
    ),
];

const FILM: [Template; 5] = [
    template("s7", "Drawer Liner", "Cushion and organize small items", Low, Storage, 1, 1),
    template("s8", "Temp Insulation", "Quick thermal barrier for experiments", Low, Thermal, 2, 1),
    template("s16", "Moisture Barrier", "Wrap around sensitive electronics", Low, Safety, 2, 1),
    template(
        "s17",
        "Light Diffuser",
        "Scatter LED light for hydroponic plants",
        Low,
        Structural,
        2,
        1,
    ),
    template("s18", "Storage Bag", "Convert wrap into resealable pouches", Med, Storage, 1, 1),
];

const TEXTILE: [Template; 5] = [
    template("s9", "Privacy Curtain", "Personal space dividers", Low, Acoustic, 1, 2),
    template(
        "s19",
        "Rag/Filter Cloth",
        "Repurposed as cleaning rags or air filters",
        Low,
        Safety,
        1,
        1,
    ),
    template("s20", "Exercise Mat", "Folded textiles for workouts", Low, Safety, 2, 1),
    template(
        "s21",
        "Thermal Blanket",
        "Layered fabric as emergency insulation",
        Med,
        Thermal,
        2,
        2,
    ),
    template("s22", "Acoustic Baffle", "Hanging cloth to dampen echoes", Med, Acoustic, 2, 1),
];

const FASTENER: [Template; 2] = [
    template(
        "s27",
        "Tool Mounts",
        "Secure tools to walls using bolts/hinges",
        Low,
        Structural,
        1,
        1,
    ),
    template(
        "s28",
        "Safety Rail",
        "Bolt struts together for a secure railing",
        Med,
        Safety,
        3,
        1,
    ),
];

const ELECTRICAL: [Template; 2] = [
    template(
        "s29",
        "Power Extension",
        "Repurpose wiring spools for added circuits",
        Med,
        Electrical,
        2,
        1,
    ),
    template("s30", "Battery Backup", "Lithium pack used as emergency power", Med, Safety, 2, 2),
];

const CHEMICAL: [Template; 2] = [
    template("s31", "Seal Repairs", "Sealant used to fix small leaks", Low, Safety, 1, 1),
    template(
        "s32",
        "Composite Resin",
        "Epoxy resin combined with fibers for panels",
        Med,
        Structural,
        2,
        2,
    ),
];

const COMPOSITE: [Template; 2] = [
    template(
        "s33",
        "Protective Shield",
        "Fiber mesh layered for impact protection",
        Med,
        Safety,
        3,
        1,
    ),
    template(
        "s34",
        "Tile Flooring",
        "Ceramic tiles used for flooring in habitat",
        High,
        Structural,
        3,
        2,
    ),
];

const POLYMER: [Template; 2] = [
    template(
        "s35",
        "Cable Insulation",
        "Repurposed PVC sheets to insulate wiring",
        Low,
        Electrical,
        2,
        1,
    ),
    template("s36", "Waterproof Layer", "Polymer used to waterproof surfaces", Med, Safety, 3, 1),
];

const OTHER: [Template; 5] = [
    template("s10", "Custom Solution", "Adapt material for specific need", High, Structural, 1, 1),
    template(
        "s23",
        "3D Print Feedstock",
        "Shred waste to use in additive manufacturing",
        High,
        Structural,
        1,
        1,
    ),
    template(
        "s24",
        "Regolith Reinforcement",
        "Mix shredded materials into Martian soil bricks",
        High,
        Structural,
        3,
        2,
    ),
    template(
        "s25",
        "Prototype Molds",
        "Use packaging as molds for casting regolith composites",
        Med,
        Structural,
        2,
        2,
    ),
    template(
        "s26",
        "Art/Decor",
        "Repurpose materials for morale-boosting art projects",
        Low,
        Acoustic,
        1,
        1,
    ),
];

/// The pre-authored template list for a category.
pub fn templates_for(category: MaterialCategory) -> &'static [Template] {
    match category {
        MaterialCategory::Structural => &STRUCTURAL,
        MaterialCategory::Foam => &FOAM,
        MaterialCategory::Film => &FILM,
        MaterialCategory::Textile => &TEXTILE,
        MaterialCategory::Fastener => &FASTENER,
        MaterialCategory::Electrical => &ELECTRICAL,
        MaterialCategory::Chemical => &CHEMICAL,
        MaterialCategory::Composite => &COMPOSITE,
        MaterialCategory::Polymer => &POLYMER,
        MaterialCategory::Other => &OTHER,
    }
}

/// Produce the suggestion list for one material.
///
/// Pure and deterministic: identical inputs always yield the same output.
/// Unknown ids and archived materials yield an empty list rather than an
/// error; archived materials are no longer eligible for new proposals.
pub fn generate(materials: &[Material], material_id: &str) -> Vec<Suggestion> {
    let Some(material) = materials.iter().find(|m| m.id == material_id) else {
        return Vec::new();
    };
    if material.is_archived() {
        return Vec::new();
    }
    templates_for(material.category)
        .iter()
        .map(|t| t.stamp(material_id))
        .collect()
}

/// Rebuild a suggestion from its composite id via the owning material's
/// category templates. Used when a placement is removed and its suggestion
/// returns to the toolbox.
pub fn resolve(materials: &[Material], suggestion_id: &str) -> Option<Suggestion> {
    let (template_id, material_id) = suggestion_id.split_once('-')?;
    let material = materials.iter().find(|m| m.id == material_id)?;
    templates_for(material.category)
        .iter()
        .find(|t| t.id == template_id)
        .map(|t| t.stamp(material_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::seed_materials;

    #[test]
    fn every_category_has_templates() {
        for category in MaterialCategory::ALL {
            assert!(
                !templates_for(category).is_empty(),
                "no templates for {category}"
            );
        }
    }

    #[test]
    fn template_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for category in MaterialCategory::ALL {
            for t in templates_for(category) {
                assert!(seen.insert(t.id), "duplicate template id {}", t.id);
                assert!(t.footprint.w > 0 && t.footprint.h > 0);
            }
        }
        assert_eq!(seen.len(), 36);
    }

    #[test]
    fn generate_stamps_material_onto_templates() {
        let materials = seed_materials();
        let suggestions = generate(&materials, "m3");
        assert_eq!(suggestions.len(), templates_for(MaterialCategory::Film).len());
        assert!(suggestions.iter().all(|s| s.material_id == "m3"));
        assert!(suggestions.iter().any(|s| s.id == "s7-m3"));
    }

    #[test]
    fn generate_is_deterministic() {
        let materials = seed_materials();
        assert_eq!(generate(&materials, "m1"), generate(&materials, "m1"));
    }

    #[test]
    fn unknown_material_yields_empty() {
        assert!(generate(&seed_materials(), "m999").is_empty());
    }

    #[test]
    fn archived_material_yields_empty() {
        // m4 is archived in the seed set.
        assert!(generate(&seed_materials(), "m4").is_empty());
    }

    #[test]
    fn resolve_round_trips_generated_ids() {
        let materials = seed_materials();
        let generated = generate(&materials, "m1");
        for suggestion in &generated {
            let resolved = resolve(&materials, &suggestion.id).unwrap();
            assert_eq!(&resolved, suggestion);
        }
    }

    #[test]
    fn resolve_misses_degrade_to_none() {
        let materials = seed_materials();
        assert!(resolve(&materials, "s1-m999").is_none());
        assert!(resolve(&materials, "s999-m1").is_none());
        assert!(resolve(&materials, "garbage").is_none());
    }
}
