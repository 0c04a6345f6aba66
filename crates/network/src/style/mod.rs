//! Presentation styles for status and product codes.
//!
//! Backend codes are free-form in practice (`CRUDE_OIL`, `Pétrole brut`,
//! `oil`), so classification goes through an ordered [`RuleSet`] and never
//! fails: unknown codes get the neutral style.

pub mod rules;

use palette::Srgb;

use crate::models::entities::Pipeline;
use rules::RuleSet;

pub use rules::normalize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleAttributes {
    pub color: Srgb<u8>,
    pub weight: f32,
    pub opacity: f32,
    /// SVG-style dash array, `None` for a solid line
    pub dash_pattern: Option<&'static str>,
}

impl StyleAttributes {
    fn solid(red: u8, green: u8, blue: u8, weight: f32) -> Self {
        Self {
            color: Srgb::new(red, green, blue),
            weight,
            opacity: 0.9,
            dash_pattern: None,
        }
    }

    fn dashed(mut self, pattern: &'static str) -> Self {
        self.dash_pattern = Some(pattern);
        self
    }

    fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// `#rrggbb`
    pub fn color_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            self.color.red, self.color.green, self.color.blue
        )
    }
}

impl Default for StyleAttributes {
    fn default() -> Self {
        Self::solid(0x7f, 0x8c, 0x8d, 2.0)
    }
}

// ============================================================================
// Operational status
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StatusCategory {
    Operational,
    Maintenance,
    UnderConstruction,
    Decommissioned,
    Planned,
    Other,
}

const STATUS_RULES: RuleSet<StatusCategory> = RuleSet {
    domain: "operational_status",
    codes: &[
        ("OPERATIONAL", StatusCategory::Operational),
        ("ACTIVE", StatusCategory::Operational),
        ("IN_SERVICE", StatusCategory::Operational),
        ("MAINTENANCE", StatusCategory::Maintenance),
        ("UNDER_MAINTENANCE", StatusCategory::Maintenance),
        ("UNDER_CONSTRUCTION", StatusCategory::UnderConstruction),
        ("CONSTRUCTION", StatusCategory::UnderConstruction),
        ("DECOMMISSIONED", StatusCategory::Decommissioned),
        ("INACTIVE", StatusCategory::Decommissioned),
        ("OUT_OF_SERVICE", StatusCategory::Decommissioned),
        ("PLANNED", StatusCategory::Planned),
        ("PROJECTED", StatusCategory::Planned),
    ],
    // Order matters: "inactive" contains "active", "horsservice" contains "service".
    fuzzy: &[
        ("mainten", StatusCategory::Maintenance),
        ("repair", StatusCategory::Maintenance),
        ("repar", StatusCategory::Maintenance),
        ("construct", StatusCategory::UnderConstruction),
        ("travaux", StatusCategory::UnderConstruction),
        ("decommission", StatusCategory::Decommissioned),
        ("inacti", StatusCategory::Decommissioned),
        ("horsservice", StatusCategory::Decommissioned),
        ("outofservice", StatusCategory::Decommissioned),
        ("abandon", StatusCategory::Decommissioned),
        ("shutdown", StatusCategory::Decommissioned),
        ("arret", StatusCategory::Decommissioned),
        ("plan", StatusCategory::Planned),
        ("project", StatusCategory::Planned),
        ("projet", StatusCategory::Planned),
        ("prevu", StatusCategory::Planned),
        ("operation", StatusCategory::Operational),
        ("actif", StatusCategory::Operational),
        ("active", StatusCategory::Operational),
        ("service", StatusCategory::Operational),
    ],
    fallback: StatusCategory::Other,
};

pub fn status_category(code: &str) -> StatusCategory {
    STATUS_RULES.classify(code)
}

pub fn status_style(category: StatusCategory) -> StyleAttributes {
    match category {
        StatusCategory::Operational => StyleAttributes::solid(0x27, 0xae, 0x60, 3.0),
        StatusCategory::Maintenance => StyleAttributes::solid(0xf3, 0x9c, 0x12, 3.0).dashed("8 4"),
        StatusCategory::UnderConstruction => {
            StyleAttributes::solid(0x29, 0x80, 0xb9, 3.0).dashed("4 4")
        }
        StatusCategory::Decommissioned => StyleAttributes::solid(0x95, 0xa5, 0xa6, 2.0)
            .dashed("2 6")
            .with_opacity(0.5),
        StatusCategory::Planned => StyleAttributes::solid(0x8e, 0x44, 0xad, 2.0)
            .dashed("1 6")
            .with_opacity(0.7),
        StatusCategory::Other => StyleAttributes::default(),
    }
}

/// Style for an operational status code. Unknown codes get the default style.
pub fn classify_status(code: &str) -> StyleAttributes {
    status_style(status_category(code))
}

// ============================================================================
// Transported product
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ProductCategory {
    CrudeOil,
    NaturalGas,
    Condensate,
    Lpg,
    RefinedProducts,
    Water,
    Other,
}

const PRODUCT_RULES: RuleSet<ProductCategory> = RuleSet {
    domain: "product",
    codes: &[
        ("CRUDE_OIL", ProductCategory::CrudeOil),
        ("CRUDE", ProductCategory::CrudeOil),
        ("OIL", ProductCategory::CrudeOil),
        ("NATURAL_GAS", ProductCategory::NaturalGas),
        ("GAS", ProductCategory::NaturalGas),
        ("CONDENSATE", ProductCategory::Condensate),
        ("LPG", ProductCategory::Lpg),
        ("REFINED_PRODUCTS", ProductCategory::RefinedProducts),
        ("WATER", ProductCategory::Water),
    ],
    // Order matters: "gasoil" and "gasoline" must not land on crude or gas.
    fuzzy: &[
        ("lpg", ProductCategory::Lpg),
        ("gpl", ProductCategory::Lpg),
        ("propane", ProductCategory::Lpg),
        ("butane", ProductCategory::Lpg),
        ("gasoil", ProductCategory::RefinedProducts),
        ("gazole", ProductCategory::RefinedProducts),
        ("gasoline", ProductCategory::RefinedProducts),
        ("diesel", ProductCategory::RefinedProducts),
        ("kerosen", ProductCategory::RefinedProducts),
        ("essence", ProductCategory::RefinedProducts),
        ("naphta", ProductCategory::RefinedProducts),
        ("naphtha", ProductCategory::RefinedProducts),
        ("fuel", ProductCategory::RefinedProducts),
        ("refin", ProductCategory::RefinedProducts),
        ("raffin", ProductCategory::RefinedProducts),
        ("condensat", ProductCategory::Condensate),
        ("crude", ProductCategory::CrudeOil),
        ("brut", ProductCategory::CrudeOil),
        ("oil", ProductCategory::CrudeOil),
        ("petrol", ProductCategory::CrudeOil),
        ("gas", ProductCategory::NaturalGas),
        ("gaz", ProductCategory::NaturalGas),
        ("methan", ProductCategory::NaturalGas),
        ("water", ProductCategory::Water),
        ("eau", ProductCategory::Water),
    ],
    fallback: ProductCategory::Other,
};

pub fn product_category(code: &str) -> ProductCategory {
    PRODUCT_RULES.classify(code)
}

pub fn product_style(category: ProductCategory) -> StyleAttributes {
    match category {
        ProductCategory::CrudeOil => StyleAttributes::solid(0x1a, 0x1a, 0x1a, 4.0),
        ProductCategory::NaturalGas => StyleAttributes::solid(0xf2, 0xb6, 0x00, 4.0),
        ProductCategory::Condensate => StyleAttributes::solid(0x8e, 0x44, 0xad, 3.0),
        ProductCategory::Lpg => StyleAttributes::solid(0xe6, 0x7e, 0x22, 3.0),
        ProductCategory::RefinedProducts => StyleAttributes::solid(0xc0, 0x39, 0x2b, 3.0),
        ProductCategory::Water => StyleAttributes::solid(0x29, 0x80, 0xb9, 2.0),
        ProductCategory::Other => StyleAttributes::default(),
    }
}

/// Style for a product code. Unknown codes get the default style.
pub fn classify_product(code: &str) -> StyleAttributes {
    product_style(product_category(code))
}

/// Line style for a pipeline: colour and weight from the product, dash
/// pattern and opacity from the operational status.
pub fn pipeline_style(pipeline: &Pipeline) -> StyleAttributes {
    let product = pipeline
        .product
        .as_deref()
        .map_or(ProductCategory::Other, product_category);
    let status = pipeline
        .operational_status
        .as_deref()
        .map_or(StatusCategory::Other, status_category);

    let status_attributes = status_style(status);
    StyleAttributes {
        dash_pattern: status_attributes.dash_pattern,
        opacity: status_attributes.opacity,
        ..product_style(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::PipelineId;

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(classify_status("UNKNOWN_CODE_XYZ"), StyleAttributes::default());
        assert_eq!(classify_product("UNKNOWN_CODE_XYZ"), StyleAttributes::default());
        assert_eq!(product_category(""), ProductCategory::Other);
    }

    #[test]
    fn test_product_codes() {
        assert_eq!(product_category("CRUDE_OIL"), ProductCategory::CrudeOil);
        assert_eq!(product_category("crude_oil"), ProductCategory::CrudeOil);
        assert_eq!(product_category("Pétrole Brut"), ProductCategory::CrudeOil);
        assert_eq!(product_category("heavy-oil"), ProductCategory::CrudeOil);
        assert_eq!(product_category("Gaz naturel"), ProductCategory::NaturalGas);
        assert_eq!(product_category("GPL"), ProductCategory::Lpg);
        assert_eq!(product_category("Gasoil"), ProductCategory::RefinedProducts);
        assert_eq!(product_category("condensat"), ProductCategory::Condensate);
        assert_eq!(product_category("Eau injectée"), ProductCategory::Water);
    }

    #[test]
    fn test_refined_names_containing_oil_are_not_crude() {
        assert_eq!(product_category("GASOIL"), ProductCategory::RefinedProducts);
        assert_eq!(product_category("Fuel Oil"), ProductCategory::RefinedProducts);
        assert_eq!(product_category("HEAVY_FUEL_OIL"), ProductCategory::RefinedProducts);
        assert_eq!(product_category("Gas oil"), ProductCategory::RefinedProducts);
        assert_eq!(product_category("Oil"), ProductCategory::CrudeOil);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status_category("OPERATIONAL"), StatusCategory::Operational);
        assert_eq!(status_category("Opérationnel"), StatusCategory::Operational);
        assert_eq!(status_category("inactive"), StatusCategory::Decommissioned);
        assert_eq!(status_category("Hors service"), StatusCategory::Decommissioned);
        assert_eq!(status_category("En maintenance"), StatusCategory::Maintenance);
        assert_eq!(status_category("under-construction"), StatusCategory::UnderConstruction);
        assert_eq!(status_category("PLANNED"), StatusCategory::Planned);
    }

    #[test]
    fn test_status_styles_differ_by_dash() {
        assert_eq!(classify_status("OPERATIONAL").dash_pattern, None);
        assert!(classify_status("PLANNED").dash_pattern.is_some());
        assert!(classify_status("DECOMMISSIONED").opacity < 0.9);
    }

    #[test]
    fn test_pipeline_style_combines_product_and_status() {
        let mut pipeline = Pipeline::new(PipelineId::new(1));
        pipeline.product = Some("NATURAL_GAS".into());
        pipeline.operational_status = Some("UNDER_CONSTRUCTION".into());

        let style = pipeline_style(&pipeline);
        assert_eq!(style.color_hex(), "#f2b600");
        assert_eq!(style.dash_pattern, Some("4 4"));
        assert_eq!(style.weight, 4.0);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ProductCategory::CrudeOil.to_string(), "crude_oil");
        let name: &'static str = StatusCategory::UnderConstruction.into();
        assert_eq!(name, "under_construction");
    }
}
