//! Avatar blob store adapters.

mod cloudinary;
mod disabled;

pub use cloudinary::{CloudinaryAvatarStore, CloudinaryConfigError, CloudinaryCredentials};
pub use disabled::DisabledAvatarStore;
