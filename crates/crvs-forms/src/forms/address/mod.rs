//! Generated address field sets: country, administrative tiers, rural/urban
//! branch and international branch, with their visibility rules and record
//! mappings.

pub mod admin_levels;
pub mod conditionals;
pub mod configuration;
pub mod fields;
mod layout;
pub mod mapping;
pub mod messages;
pub mod use_case;

pub use admin_levels::admin_level_fields;
pub use conditionals::location_conditionals;
pub use configuration::{
    default_address_configuration, parse_address_configuration, FieldPath, FieldSetKind,
    FieldSetSpec, InsertionSpec,
};
pub use fields::{
    address_fields, address_preview_group, append_conditional_case, build_field_set,
    GeneratedFieldSet,
};
pub use mapping::{field_mapping, AddressMapping, AddressTarget, Invertible, Operation};
pub use use_case::{
    AddressLocation, AddressSettings, AddressUseCase, AdminLevelDepth, AdminTier,
    PersonAddressType,
};
