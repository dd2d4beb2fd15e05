pub mod draft;
pub mod tone;
