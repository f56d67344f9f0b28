pub mod guard;
pub mod identity;
