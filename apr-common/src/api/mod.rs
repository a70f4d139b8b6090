//! Business codes and localized messages shared by APR services
//!
//! Pure lookups only; HTTP envelopes are built by each service.

pub mod codes;
pub mod messages;

pub use codes::BusinessCode;
pub use messages::{Locale, MessageCatalog};
