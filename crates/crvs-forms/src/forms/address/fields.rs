use super::admin_levels::admin_level_fields;
use super::conditionals::{location_conditionals, RURAL, URBAN};
use super::configuration::{FieldSetKind, FieldSetSpec};
use super::layout::{self, branch_ignore_lists, BranchFieldTemplate, RURAL_OR_URBAN};
use super::mapping::{
    field_mapping, line, AddressMapping, AddressReference, AddressTarget, BranchIgnoreLists,
    CopyAddress, FhirAddressProperty, MutationOperation,
};
use super::messages;
use super::use_case::{AddressLocation, AddressSettings, AddressUseCase, PersonAddressType, UseCaseFamily};
use crate::forms::domain::{
    Conditional, DynamicOptions, Event, Expression, FieldDescriptor, FieldType,
    MessageDescriptor, PreviewGroup, SelectOption,
};
use crate::forms::error::FormConfigError;
use serde_json::Value;

pub const COUNTRIES_RESOURCE: &str = "countries";
const EVENT_PREVIEW_DELIMITER: &str = ", ";

/// Fields and review-page groups produced by one field set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedFieldSet {
    pub fields: Vec<FieldDescriptor>,
    pub preview_groups: Vec<PreviewGroup>,
}

/// The complete address block of one use case: country, tiers, rural/urban
/// switch, then the urban, rural and international branches.
pub fn address_fields(
    use_case: AddressUseCase,
    section: &str,
    settings: &AddressSettings,
    conditional_case: Option<&Expression>,
) -> Result<Vec<FieldDescriptor>, FormConfigError> {
    let ignore = branch_ignore_lists(use_case, settings.admin_levels);

    let mut fields = Vec::with_capacity(16);
    fields.push(country_field(use_case, section, settings)?);
    fields.extend(admin_level_fields(
        settings.admin_levels.get(),
        use_case,
        section,
    )?);
    fields.push(rural_or_urban_field(use_case, section, settings)?);
    for template in layout::branch_fields() {
        fields.push(branch_field(template, use_case, section, settings, &ignore)?);
    }

    let preview_group = address_preview_group(use_case).id;
    for field in &mut fields {
        field.preview_group = Some(preview_group.clone());
    }
    if let Some(expression) = conditional_case {
        append_conditional_case(&mut fields, expression);
    }

    Ok(fields)
}

/// Adds `expression` as a hide rule to every field that lacks it.
pub fn append_conditional_case(fields: &mut [FieldDescriptor], expression: &Expression) {
    for field in fields {
        field.push_conditional(Conditional::hide(expression.clone()));
    }
}

pub fn address_preview_group(use_case: AddressUseCase) -> PreviewGroup {
    let (id, delimiter) = match use_case.family() {
        UseCaseFamily::EventLocation(_) => (
            use_case.as_str().to_string(),
            Some(EVENT_PREVIEW_DELIMITER.to_string()),
        ),
        UseCaseFamily::Person(_) => (format!("{}Address", use_case.as_str()), None),
    };
    PreviewGroup {
        id,
        label: messages::preview(use_case).descriptor(),
        field_to_redirect: use_case.field_name("country"),
        delimiter,
    }
}

fn country_field(
    use_case: AddressUseCase,
    section: &str,
    settings: &AddressSettings,
) -> Result<FieldDescriptor, FormConfigError> {
    let conditionals =
        location_conditionals(AddressLocation::Country, use_case, settings.admin_levels)?;
    let mapping = field_mapping(
        AddressTarget::Property(FhirAddressProperty::Country),
        use_case,
        section,
        "country",
        None,
    );

    Ok(FieldDescriptor::new(
        use_case.field_name("country"),
        FieldType::SelectWithDynamicOptions,
        messages::COUNTRY.descriptor(),
    )
    .required(true)
    .with_initial_value(settings.default_country.clone())
    .with_dynamic_options(DynamicOptions {
        resource: COUNTRIES_RESOURCE.to_string(),
        dependency: None,
        initial_value: Some(settings.default_country.clone()),
    })
    .with_conditionals(conditionals)
    .with_mapping(mapping))
}

fn rural_or_urban_field(
    use_case: AddressUseCase,
    section: &str,
    settings: &AddressSettings,
) -> Result<FieldDescriptor, FormConfigError> {
    let conditionals =
        location_conditionals(AddressLocation::RuralOrUrban, use_case, settings.admin_levels)?;
    let mapping = field_mapping(
        AddressTarget::Line(line::RURAL_OR_URBAN),
        use_case,
        section,
        RURAL_OR_URBAN,
        None,
    );

    Ok(FieldDescriptor::new(
        use_case.field_name(RURAL_OR_URBAN),
        FieldType::RadioGroup,
        messages::RURAL_OR_URBAN.descriptor(),
    )
    .with_initial_value(URBAN)
    .with_options(vec![
        option(Value::from(URBAN), messages::URBAN.descriptor()),
        option(Value::from(RURAL), messages::RURAL.descriptor()),
    ])
    .with_flex_direction("row")
    .hidden_in_preview()
    .with_conditionals(conditionals)
    .with_mapping(mapping))
}

fn branch_field(
    template: &BranchFieldTemplate,
    use_case: AddressUseCase,
    section: &str,
    settings: &AddressSettings,
    ignore: &BranchIgnoreLists,
) -> Result<FieldDescriptor, FormConfigError> {
    let conditionals = location_conditionals(template.location, use_case, settings.admin_levels)?;
    let mapping = field_mapping(template.target, use_case, section, template.name, Some(ignore));

    Ok(FieldDescriptor::new(
        use_case.field_name(template.name),
        FieldType::Text,
        template.label.descriptor(),
    )
    .required(template.required)
    .with_conditionals(conditionals)
    .with_mapping(mapping))
}

fn option(value: Value, label: MessageDescriptor) -> SelectOption {
    SelectOption { value, label }
}

fn required_label(spec: &FieldSetSpec) -> Result<MessageDescriptor, FormConfigError> {
    spec.label
        .clone()
        .ok_or_else(|| FormConfigError::MissingAttribute {
            config: spec.config.to_string(),
            attribute: "label",
        })
}

fn required_section<'a>(
    spec: &FieldSetSpec,
    section: Option<&'a String>,
    attribute: &'static str,
) -> Result<&'a str, FormConfigError> {
    section
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| FormConfigError::MissingAttribute {
            config: spec.config.to_string(),
            attribute,
        })
}

fn conditional_case(spec: &FieldSetSpec) -> Vec<Conditional> {
    spec.conditional_case
        .iter()
        .map(|expression| Conditional::hide(expression.clone()))
        .collect()
}

/// Yes/no toggle copying the primary address of the y section into the x
/// section.
pub fn same_as_other_primary_field(spec: &FieldSetSpec) -> Result<FieldDescriptor, FormConfigError> {
    let label = required_label(spec)?;
    let to = required_section(spec, spec.x_comparison_section.as_ref(), "xComparisonSection")?;
    let from = required_section(spec, spec.y_comparison_section.as_ref(), "yComparisonSection")?;
    let copy = CopyAddress {
        from: AddressReference {
            address_type: PersonAddressType::PrimaryAddress,
            section: from.to_string(),
        },
        to: AddressReference {
            address_type: PersonAddressType::PrimaryAddress,
            section: to.to_string(),
        },
    };

    Ok(FieldDescriptor::new(
        FieldSetKind::SameAsOtherPrimary.as_str(),
        FieldType::RadioGroup,
        label,
    )
    .required(true)
    .with_initial_value(true)
    .with_options(vec![
        option(Value::Bool(true), messages::YES.descriptor()),
        option(Value::Bool(false), messages::NO.descriptor()),
    ])
    .with_flex_direction("row")
    .with_conditionals(conditional_case(spec))
    .with_mapping(AddressMapping::new(MutationOperation::CopyAddress(copy), None)))
}

pub fn subsection_field(
    spec: &FieldSetSpec,
    address_type: PersonAddressType,
) -> Result<FieldDescriptor, FormConfigError> {
    let label = required_label(spec)?;
    let name = match address_type {
        PersonAddressType::PrimaryAddress => "primaryAddress",
        PersonAddressType::SecondaryAddress => "secondaryAddress",
    };

    Ok(
        FieldDescriptor::new(name, FieldType::SubsectionHeader, label)
            .with_conditionals(conditional_case(spec)),
    )
}

/// Builds one configured field set for a group of `section` in an `event`
/// form.
pub fn build_field_set(
    spec: &FieldSetSpec,
    event: Event,
    section: &str,
    settings: &AddressSettings,
) -> Result<GeneratedFieldSet, FormConfigError> {
    match spec.config {
        FieldSetKind::Address(use_case) => {
            if let Some(owner) = use_case.event() {
                if owner != event {
                    return Err(FormConfigError::EventMismatch {
                        use_case: use_case.as_str(),
                        event,
                    });
                }
            }
            let fields = address_fields(use_case, section, settings, spec.conditional_case.as_ref())?;
            Ok(GeneratedFieldSet {
                fields,
                preview_groups: vec![address_preview_group(use_case)],
            })
        }
        FieldSetKind::Subsection(address_type) => Ok(GeneratedFieldSet {
            fields: vec![subsection_field(spec, address_type)?],
            preview_groups: Vec::new(),
        }),
        FieldSetKind::SameAsOtherPrimary => Ok(GeneratedFieldSet {
            fields: vec![same_as_other_primary_field(spec)?],
            preview_groups: Vec::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::address::use_case::AdminLevelDepth;
    use crate::forms::domain::ConditionalAction;

    fn settings(levels: u8) -> AddressSettings {
        AddressSettings::new(AdminLevelDepth::new(levels).expect("valid depth"), "FAR")
    }

    fn names(fields: &[FieldDescriptor]) -> Vec<&str> {
        fields.iter().map(|field| field.name.as_str()).collect()
    }

    fn expressions(field: &FieldDescriptor) -> Vec<&str> {
        field
            .conditionals
            .iter()
            .map(|conditional| conditional.expression.as_str())
            .collect()
    }

    #[test]
    fn primary_address_with_two_levels() {
        let fields =
            address_fields(AddressUseCase::Primary, "mother", &settings(2), None).expect("builds");

        assert_eq!(
            &names(&fields)[..4],
            &["countryPrimary", "statePrimary", "districtPrimary", "ruralOrUrbanPrimary"]
        );
        assert_eq!(fields.len(), 1 + 2 + 1 + 5 + 1 + 7);

        let state = &fields[1];
        let state_rules = expressions(state);
        assert!(state_rules.contains(&"!values.countryPrimary"));
        assert!(state_rules.contains(&"!isDefaultCountry(values.countryPrimary)"));
        assert!(state
            .conditionals
            .iter()
            .all(|conditional| conditional.action == ConditionalAction::Hide));
    }

    #[test]
    fn branch_fields_follow_a_fixed_order() {
        let fields =
            address_fields(AddressUseCase::Secondary, "deceased", &settings(1), None).expect("builds");

        assert_eq!(
            names(&fields),
            vec![
                "countrySecondary",
                "stateSecondary",
                "ruralOrUrbanSecondary",
                "citySecondary",
                "addressLine2UrbanOptionSecondary",
                "addressLine3UrbanOptionSecondary",
                "addressLine1UrbanOptionSecondary",
                "postalCodeSecondary",
                "addressLine1RuralOptionSecondary",
                "internationalStateSecondary",
                "internationalDistrictSecondary",
                "internationalCitySecondary",
                "internationalAddressLine1Secondary",
                "internationalAddressLine2Secondary",
                "internationalAddressLine3Secondary",
                "internationalPostalCodeSecondary",
            ]
        );
        assert!(fields
            .iter()
            .all(|field| field.preview_group.as_deref() == Some("secondaryAddress")));
    }

    #[test]
    fn urban_and_rural_fields_hide_on_the_other_branch() {
        let fields =
            address_fields(AddressUseCase::Primary, "mother", &settings(2), None).expect("builds");
        let town = fields
            .iter()
            .find(|field| field.name == "cityPrimary")
            .expect("town field");
        let village = fields
            .iter()
            .find(|field| field.name == "addressLine1RuralOptionPrimary")
            .expect("village field");
        let international = fields
            .iter()
            .find(|field| field.name == "internationalCityPrimary")
            .expect("international city");

        assert_eq!(
            expressions(town).last(),
            Some(&"values.ruralOrUrbanPrimary !== \"URBAN\"")
        );
        assert_eq!(
            expressions(village).last(),
            Some(&"values.ruralOrUrbanPrimary !== \"RURAL\"")
        );
        assert_eq!(
            expressions(international),
            vec!["isDefaultCountry(values.countryPrimary)"]
        );
    }

    #[test]
    fn conditional_case_is_appended_once() {
        let case = Expression::new("!values.detailsExist");
        let mut fields = address_fields(AddressUseCase::Primary, "mother", &settings(2), Some(&case))
            .expect("builds");
        let before: Vec<usize> = fields.iter().map(|field| field.conditionals.len()).collect();

        append_conditional_case(&mut fields, &case);

        let after: Vec<usize> = fields.iter().map(|field| field.conditionals.len()).collect();
        assert_eq!(before, after);
        assert!(fields
            .iter()
            .all(|field| expressions(field).last() == Some(&"!values.detailsExist")));
    }

    #[test]
    fn event_location_sets_use_the_event_preview_group() {
        let spec = FieldSetSpec::address(AddressUseCase::PlaceOfBirth);
        let set = build_field_set(&spec, Event::Birth, "child", &settings(2)).expect("builds");

        assert_eq!(set.fields[0].name, "country");
        assert_eq!(set.preview_groups.len(), 1);
        let group = &set.preview_groups[0];
        assert_eq!(group.id, "placeOfBirth");
        assert_eq!(group.field_to_redirect, "country");
        assert_eq!(group.delimiter.as_deref(), Some(", "));
    }

    #[test]
    fn event_location_outside_its_event_is_rejected() {
        let spec = FieldSetSpec::address(AddressUseCase::PlaceOfDeath);
        match build_field_set(&spec, Event::Birth, "child", &settings(2)) {
            Err(FormConfigError::EventMismatch { use_case, event }) => {
                assert_eq!(use_case, "placeOfDeath");
                assert_eq!(event, Event::Birth);
            }
            other => panic!("expected EventMismatch, got {other:?}"),
        }
    }

    #[test]
    fn copy_toggle_requires_both_sections() {
        let spec = FieldSetSpec::new(FieldSetKind::SameAsOtherPrimary)
            .with_label(MessageDescriptor::new("same", "Same?", ""));
        match build_field_set(&spec, Event::Birth, "father", &settings(2)) {
            Err(FormConfigError::MissingAttribute { config, attribute }) => {
                assert_eq!(config, "primaryAddressSameAsOtherPrimary");
                assert_eq!(attribute, "xComparisonSection");
            }
            other => panic!("expected MissingAttribute, got {other:?}"),
        }
    }

    #[test]
    fn copy_toggle_copies_from_y_into_x() {
        let spec = FieldSetSpec::new(FieldSetKind::SameAsOtherPrimary)
            .with_label(MessageDescriptor::new("same", "Same?", ""))
            .comparing("father", "mother");
        let set = build_field_set(&spec, Event::Birth, "father", &settings(2)).expect("builds");
        let toggle = &set.fields[0];

        assert_eq!(toggle.name, "primaryAddressSameAsOtherPrimary");
        assert_eq!(toggle.initial_value, Some(Value::Bool(true)));
        let mapping = toggle.mapping.as_ref().expect("mapping");
        let mutation = mapping.mutation.as_ref().expect("mutation");
        assert_eq!(mutation.operation, "copyAddressTransformer");
        assert_eq!(
            mutation.parameters,
            vec![
                Value::from("PRIMARY_ADDRESS"),
                Value::from("mother"),
                Value::from("PRIMARY_ADDRESS"),
                Value::from("father"),
            ]
        );
        assert_eq!(
            mapping.query.as_ref().map(|query| query.operation.as_str()),
            Some("sameAddressFieldTransformer")
        );
        assert!(set.preview_groups.is_empty());
    }

    #[test]
    fn subsection_requires_a_label() {
        let spec = FieldSetSpec::new(FieldSetKind::Subsection(PersonAddressType::SecondaryAddress));
        match build_field_set(&spec, Event::Death, "deceased", &settings(2)) {
            Err(FormConfigError::MissingAttribute { attribute, .. }) => {
                assert_eq!(attribute, "label")
            }
            other => panic!("expected MissingAttribute, got {other:?}"),
        }

        let labelled = spec.with_label(MessageDescriptor::new("secondary", "Secondary", ""));
        let set = build_field_set(&labelled, Event::Death, "deceased", &settings(2)).expect("builds");
        assert_eq!(set.fields[0].name, "secondaryAddress");
        assert_eq!(set.fields[0].field_type, FieldType::SubsectionHeader);
    }
}
