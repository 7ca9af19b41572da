//! The Widevine descriptor persisted inside the Chrome profile.
//!
//! The descriptor is a tiny JSON document written once when a CDM is
//! provisioned and read by the host on every startup:
//!
//! ```json
//! {
//!   "path": "/home/me/.config/mediacenter/chrome-profile/widevine-cdm",
//!   "version": "1.4.9.1088"
//! }
//! ```
//!
//! A missing or broken descriptor simply means no CDM is configured.

mod store;
mod types;

pub use store::{DESCRIPTOR_FILE_NAME, DescriptorStore};
pub use types::CdmDescriptor;
