pub mod address;
pub mod bootstrap;
mod decorator;
pub mod domain;
mod error;

pub use bootstrap::{build_forms, decorate_all, FormCatalog};
pub use decorator::decorate;
pub use domain::{
    Conditional, ConditionalAction, Event, Expression, FieldDescriptor, FieldType, FormGroup,
    FormSection, MappingDescriptor, MessageDescriptor, PreviewGroup, RegisterForm,
};
pub use error::FormConfigError;
