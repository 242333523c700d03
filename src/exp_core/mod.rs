pub mod branch;
pub mod draft;
pub mod validate;
pub mod variant;
