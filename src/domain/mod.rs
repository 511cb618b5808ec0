//! Value records produced by repository queries.

pub mod entities;
pub mod value_objects;
