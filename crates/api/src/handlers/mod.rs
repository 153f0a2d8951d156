pub mod access_status;
pub mod confirmation;
pub mod feature;
pub mod location;
