// datasheet fields a conversation may be scoped to
const TAG_DATA_PROPERTIES: &[&str] = &[
    "tagNumber",
    "description",
    "category",
    "area",
    "discipline",
    "projectId",
    "version",
];

const PURCHASER_REQUIREMENT_PROPERTIES: &[&str] = &[
    "designPressure",
    "designTemperature",
    "operatingPressure",
    "operatingTemperature",
    "material",
    "connectionSize",
    "flangeRating",
    "signalType",
    "powerSupply",
    "ipRating",
];

const SUPPLIER_OFFERED_PRODUCT_PROPERTIES: &[&str] = &[
    "manufacturer",
    "modelNumber",
    "offeredPressureRating",
    "offeredTemperatureRating",
    "offeredMaterial",
    "certification",
    "deliveryWeeks",
];

// case-insensitive, property names arrive from clients with inconsistent casing
pub fn recognized_property(property: &str) -> bool {
    [
        TAG_DATA_PROPERTIES,
        PURCHASER_REQUIREMENT_PROPERTIES,
        SUPPLIER_OFFERED_PRODUCT_PROPERTIES,
    ]
    .iter()
    .flat_map(|schema| schema.iter())
    .any(|field| field.eq_ignore_ascii_case(property))
}
