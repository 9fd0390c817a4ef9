pub mod inventory;
pub mod player;
