//! The four-step onboarding wizard: state machine, form, and submitter.

pub mod form;
pub mod state;
pub mod step;
pub mod submit;

pub use form::{CPU_OPTIONS, FormFields, MEMORY_OPTIONS, sanitize_app_name};
pub use state::{FrameworkOption, WizardState};
pub use step::WizardStep;
pub use submit::{build_request, submit};
