//! Project Wizard: configuration resolution for template-generated game projects
//!
//! A template host asks the wizard to resolve where the game binaries live, where build
//! output goes and which optional template items to include. Every failure is offered
//! back to the user as retry or cancel. Once the project exists, the wizard copies the
//! shared template cache file into it.

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod init;
pub mod logging;
pub mod platform;
pub mod prompt;
pub mod recovery;
pub mod resolver;
pub mod settings;
pub mod snapshot;
pub mod sync;
pub mod wizard;

pub use error::{RunCancelled, WizardError};
pub use resolver::ConfigResolver;
pub use snapshot::ConfigurationSnapshot;
pub use sync::ResourceSync;
pub use wizard::{GenerationWizard, TemplateWizard};
