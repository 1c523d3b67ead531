pub mod branches;
pub mod contacts;
pub mod map;
