#![forbid(unsafe_code)]

pub mod french;
pub mod model;

pub use french::french_course;
