pub mod identity;
pub mod manifest;

pub use identity::{DEFAULT_TAG, IdentityError, ReleaseIdentity};
pub use manifest::{MANIFEST_FILE, Manifest, ManifestError};
