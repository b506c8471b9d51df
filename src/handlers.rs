pub mod inventory;
pub mod families;
