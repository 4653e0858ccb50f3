pub mod hash;
pub mod load;
pub mod model;

pub use load::load_profile;
pub use model::{LoadedProfile, ProfileDocument, ProfileInfo};
