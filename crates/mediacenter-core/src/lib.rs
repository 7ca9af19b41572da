pub mod descriptor;
pub mod error;

pub use descriptor::{CdmDescriptor, DESCRIPTOR_FILE_NAME, DescriptorStore};
pub use error::{Error, Result};
