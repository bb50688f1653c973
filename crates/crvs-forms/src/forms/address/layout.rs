use super::mapping::{line, AddressTarget, BranchIgnoreLists, FhirAddressProperty};
use super::messages::{self, Label};
use super::use_case::{AddressLocation, AddressUseCase, AdminLevelDepth};

/// Free-text field of the urban, rural or international branch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BranchFieldTemplate {
    pub name: &'static str,
    pub location: AddressLocation,
    pub target: AddressTarget,
    pub label: Label,
    pub required: bool,
}

const fn branch_field(
    name: &'static str,
    location: AddressLocation,
    target: AddressTarget,
    label: Label,
    required: bool,
) -> BranchFieldTemplate {
    BranchFieldTemplate {
        name,
        location,
        target,
        label,
        required,
    }
}

pub(crate) const RURAL_OR_URBAN: &str = "ruralOrUrban";

pub(crate) const URBAN_FIELDS: [BranchFieldTemplate; 5] = [
    branch_field(
        "city",
        AddressLocation::Urban,
        AddressTarget::Property(FhirAddressProperty::City),
        messages::TOWN,
        false,
    ),
    branch_field(
        "addressLine2UrbanOption",
        AddressLocation::Urban,
        AddressTarget::Line(line::STREET),
        messages::STREET,
        false,
    ),
    branch_field(
        "addressLine3UrbanOption",
        AddressLocation::Urban,
        AddressTarget::Line(line::NUMBER),
        messages::NUMBER,
        false,
    ),
    branch_field(
        "addressLine1UrbanOption",
        AddressLocation::Urban,
        AddressTarget::Line(line::RESIDENTIAL_AREA),
        messages::RESIDENTIAL_AREA,
        false,
    ),
    branch_field(
        "postalCode",
        AddressLocation::Urban,
        AddressTarget::Property(FhirAddressProperty::PostalCode),
        messages::POSTCODE,
        false,
    ),
];

pub(crate) const RURAL_FIELDS: [BranchFieldTemplate; 1] = [branch_field(
    "addressLine1RuralOption",
    AddressLocation::Rural,
    AddressTarget::Line(line::VILLAGE),
    messages::VILLAGE,
    false,
)];

pub(crate) const INTERNATIONAL_FIELDS: [BranchFieldTemplate; 7] = [
    branch_field(
        "internationalState",
        AddressLocation::International,
        AddressTarget::Property(FhirAddressProperty::State),
        messages::INTERNATIONAL_STATE,
        true,
    ),
    branch_field(
        "internationalDistrict",
        AddressLocation::International,
        AddressTarget::Property(FhirAddressProperty::District),
        messages::INTERNATIONAL_DISTRICT,
        true,
    ),
    branch_field(
        "internationalCity",
        AddressLocation::International,
        AddressTarget::Property(FhirAddressProperty::City),
        messages::INTERNATIONAL_CITY,
        false,
    ),
    branch_field(
        "internationalAddressLine1",
        AddressLocation::International,
        AddressTarget::Line(line::INTERNATIONAL[0]),
        messages::INTERNATIONAL_LINES[0],
        false,
    ),
    branch_field(
        "internationalAddressLine2",
        AddressLocation::International,
        AddressTarget::Line(line::INTERNATIONAL[1]),
        messages::INTERNATIONAL_LINES[1],
        false,
    ),
    branch_field(
        "internationalAddressLine3",
        AddressLocation::International,
        AddressTarget::Line(line::INTERNATIONAL[2]),
        messages::INTERNATIONAL_LINES[2],
        false,
    ),
    branch_field(
        "internationalPostalCode",
        AddressLocation::International,
        AddressTarget::Property(FhirAddressProperty::PostalCode),
        messages::INTERNATIONAL_POSTCODE,
        false,
    ),
];

/// Branch fields in output order: urban, rural, international.
pub(crate) fn branch_fields() -> impl Iterator<Item = &'static BranchFieldTemplate> {
    URBAN_FIELDS
        .iter()
        .chain(RURAL_FIELDS.iter())
        .chain(INTERNATIONAL_FIELDS.iter())
}

/// Local fields are skipped when reading back an international address and
/// the other way around.
pub(crate) fn branch_ignore_lists(
    use_case: AddressUseCase,
    admin_levels: AdminLevelDepth,
) -> BranchIgnoreLists {
    let local = admin_levels
        .tiers()
        .iter()
        .map(|tier| tier.as_str())
        .chain(std::iter::once(RURAL_OR_URBAN))
        .chain(URBAN_FIELDS.iter().map(|field| field.name))
        .chain(RURAL_FIELDS.iter().map(|field| field.name))
        .map(|name| use_case.field_name(name))
        .collect();
    let international = INTERNATIONAL_FIELDS
        .iter()
        .map(|field| use_case.field_name(field.name))
        .collect();

    BranchIgnoreLists {
        for_local_address: international,
        for_international_address: local,
    }
}
