// Candidate search: natural-language query, result page, selection, save.

pub mod selection;
pub mod session;
