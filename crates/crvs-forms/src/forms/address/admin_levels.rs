use super::conditionals::location_conditionals;
use super::layout::branch_ignore_lists;
use super::mapping::{field_mapping, AddressTarget, BranchIgnoreLists};
use super::messages;
use super::use_case::{AddressLocation, AddressUseCase, AdminLevelDepth, AdminTier};
use crate::forms::domain::{DynamicOptions, FieldDescriptor, FieldType};
use crate::forms::error::FormConfigError;

pub const LOCATIONS_RESOURCE: &str = "locations";
/// Preselects the registration agent's own office location.
pub const AGENT_DEFAULT: &str = "agentDefault";

/// One dynamic select per configured tier, shallow to deep.
pub fn admin_level_fields(
    depth: u8,
    use_case: AddressUseCase,
    section: &str,
) -> Result<Vec<FieldDescriptor>, FormConfigError> {
    let admin_levels = AdminLevelDepth::new(depth)?;
    let ignore = branch_ignore_lists(use_case, admin_levels);

    admin_levels
        .tiers()
        .iter()
        .map(|tier| tier_field(*tier, use_case, section, admin_levels, &ignore))
        .collect()
}

fn tier_field(
    tier: AdminTier,
    use_case: AddressUseCase,
    section: &str,
    admin_levels: AdminLevelDepth,
    ignore: &BranchIgnoreLists,
) -> Result<FieldDescriptor, FormConfigError> {
    let parent = tier
        .ancestors()
        .last()
        .map_or("country", |parent| parent.as_str());
    let conditionals = location_conditionals(AddressLocation::Admin(tier), use_case, admin_levels)?;
    let mapping = field_mapping(
        AddressTarget::for_tier(tier),
        use_case,
        section,
        tier.as_str(),
        Some(ignore),
    );

    Ok(FieldDescriptor::new(
        use_case.field_name(tier.as_str()),
        FieldType::SelectWithDynamicOptions,
        messages::tier(tier).descriptor(),
    )
    .required(true)
    .with_dynamic_options(DynamicOptions {
        resource: LOCATIONS_RESOURCE.to_string(),
        dependency: Some(use_case.field_name(parent)),
        initial_value: Some(AGENT_DEFAULT.to_string()),
    })
    .with_conditionals(conditionals)
    .with_mapping(mapping))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::domain::Expression;

    #[test]
    fn depth_truncates_the_tier_sequence() {
        let names = ["state", "district", "locationLevel3", "locationLevel4", "locationLevel5"];
        for depth in 1..=5u8 {
            let fields = admin_level_fields(depth, AddressUseCase::Secondary, "mother")
                .expect("valid depth");
            let actual: Vec<&str> = fields.iter().map(|field| field.name.as_str()).collect();
            let expected: Vec<String> = names[..usize::from(depth)]
                .iter()
                .map(|name| format!("{name}Secondary"))
                .collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn out_of_range_depth_is_rejected() {
        for depth in [0u8, 6, 42] {
            match admin_level_fields(depth, AddressUseCase::Primary, "mother") {
                Err(FormConfigError::InvalidAdminLevels(value)) => assert_eq!(value, depth),
                other => panic!("expected InvalidAdminLevels, got {other:?}"),
            }
        }
    }

    #[test]
    fn each_tier_depends_on_its_parent() {
        let fields =
            admin_level_fields(3, AddressUseCase::Primary, "informant").expect("valid depth");
        let dependencies: Vec<Option<&str>> = fields
            .iter()
            .map(|field| {
                field
                    .dynamic_options
                    .as_ref()
                    .and_then(|options| options.dependency.as_deref())
            })
            .collect();

        assert_eq!(
            dependencies,
            vec![
                Some("countryPrimary"),
                Some("statePrimary"),
                Some("districtPrimary")
            ]
        );
        assert!(fields.iter().all(|field| field.required));
    }

    #[test]
    fn event_location_tiers_stay_unsuffixed() {
        let fields =
            admin_level_fields(2, AddressUseCase::PlaceOfDeath, "deathEvent").expect("valid depth");
        let district = &fields[1];

        assert_eq!(district.name, "district");
        let expressions: Vec<&Expression> = district
            .conditionals
            .iter()
            .map(|conditional| &conditional.expression)
            .collect();
        assert_eq!(expressions[0].as_str(), "!values.country");
        assert_eq!(expressions[1].as_str(), "!values.state");
        assert!(expressions
            .iter()
            .any(|expression| expression.as_str().contains("values.placeOfDeath !== \"OTHER\"")));
    }
}
