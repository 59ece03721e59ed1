pub mod canvas;

// Re-export commonly used items
pub use crate::canvas::{add_item, connect, disconnect, remove_item, ItemTemplate};
pub use crate::canvas::{find_dangling_connections, find_duplicate_connection_ids};
