mod operations;

pub use operations::{
    paired_mutations, paired_query, AddressFhirPropertyToField, AddressLineToField,
    AddressMapping, AddressReference, BranchIgnoreLists, CopyAddress, EventLocationField,
    EventLocationMutation, EventLocationQuery, FhirAddressProperty, FieldToAddressFhirProperty,
    FieldToAddressLine, Invertible, MutationOperation, Operation, QueryOperation,
    SameAddressField, TemplateMapping, TemplateOperation, OPERATION_PAIRS,
};

use super::use_case::{capitalize, AddressUseCase, AdminTier, UseCaseFamily};

/// Positions in the FHIR `address.line` array.
pub mod line {
    pub const NUMBER: u8 = 0;
    pub const STREET: u8 = 1;
    pub const RESIDENTIAL_AREA: u8 = 2;
    pub const VILLAGE: u8 = 4;
    pub const RURAL_OR_URBAN: u8 = 5;
    pub const INTERNATIONAL: [u8; 3] = [6, 7, 8];
    pub const LOCATION_LEVEL_3: u8 = 10;
    pub const LOCATION_LEVEL_4: u8 = 11;
    pub const LOCATION_LEVEL_5: u8 = 12;
}

/// Where a field's value is stored in the record's address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressTarget {
    Property(FhirAddressProperty),
    Line(u8),
}

impl AddressTarget {
    pub const fn for_tier(tier: AdminTier) -> Self {
        match tier {
            AdminTier::State => Self::Property(FhirAddressProperty::State),
            AdminTier::District => Self::Property(FhirAddressProperty::District),
            AdminTier::LocationLevel3 => Self::Line(line::LOCATION_LEVEL_3),
            AdminTier::LocationLevel4 => Self::Line(line::LOCATION_LEVEL_4),
            AdminTier::LocationLevel5 => Self::Line(line::LOCATION_LEVEL_5),
        }
    }

    /// Properties written by both the local and the international branch.
    pub const fn is_shared_between_branches(self) -> bool {
        matches!(
            self,
            Self::Property(
                FhirAddressProperty::State
                    | FhirAddressProperty::District
                    | FhirAddressProperty::City
                    | FhirAddressProperty::PostalCode
            )
        )
    }
}

/// Certificate placeholder name: `placeOfBirthState`, `motherPrimaryState`.
pub fn template_field_name(use_case: AddressUseCase, section: &str, field_name: &str) -> String {
    match use_case.family() {
        UseCaseFamily::EventLocation(_) => {
            format!("{}{}", use_case.as_str(), capitalize(field_name))
        }
        UseCaseFamily::Person(_) => format!(
            "{section}{}{}",
            use_case.field_suffix(),
            capitalize(field_name)
        ),
    }
}

/// Builds the mutation, its inverse query and the certificate template for a
/// generated address field. `field_name` is the unsuffixed base name.
pub fn field_mapping(
    target: AddressTarget,
    use_case: AddressUseCase,
    section: &str,
    field_name: &str,
    ignore: Option<&BranchIgnoreLists>,
) -> AddressMapping {
    let ignore = if target.is_shared_between_branches() {
        ignore.cloned()
    } else {
        None
    };
    let template_name = template_field_name(use_case, section, field_name);

    match use_case.family() {
        UseCaseFamily::EventLocation(event) => {
            let (field, template) = match target {
                AddressTarget::Property(property) => (
                    EventLocationField {
                        transformed_field_name: property.as_str().to_string(),
                        line_number: None,
                        ignore,
                    },
                    TemplateOperation::EventLocationFhirProperty { property },
                ),
                AddressTarget::Line(line) => (
                    EventLocationField {
                        transformed_field_name: field_name.to_string(),
                        line_number: Some(line),
                        ignore,
                    },
                    TemplateOperation::EventLocationLine {
                        line,
                        transformed_field_name: field_name.to_string(),
                    },
                ),
            };
            AddressMapping::new(
                MutationOperation::EventLocation(EventLocationMutation { event, field }),
                Some(TemplateMapping {
                    field_name: template_name,
                    operation: template,
                }),
            )
        }
        UseCaseFamily::Person(address_type) => {
            let (mutation, template) = match target {
                AddressTarget::Property(property) => (
                    MutationOperation::FieldToAddressFhirProperty(FieldToAddressFhirProperty {
                        address_type,
                        property,
                        ignore,
                    }),
                    TemplateOperation::AddressFhirProperty {
                        address_type,
                        property,
                    },
                ),
                AddressTarget::Line(line) => (
                    MutationOperation::FieldToAddressLine(FieldToAddressLine {
                        address_type,
                        line,
                        transformed_field_name: field_name.to_string(),
                    }),
                    TemplateOperation::AddressLine {
                        address_type,
                        line,
                        transformed_field_name: field_name.to_string(),
                    },
                ),
            };
            AddressMapping::new(
                mutation,
                Some(TemplateMapping {
                    field_name: template_name,
                    operation: template,
                }),
            )
        }
    }
}
