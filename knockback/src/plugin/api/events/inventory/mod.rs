pub mod inventory_click;
pub mod inventory_close;

pub use inventory_click::InventoryClickEvent;
pub use inventory_close::InventoryCloseEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickType {
    Left,
    Right,
}
