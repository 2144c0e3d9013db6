//! Table indexing and document linearization.

mod index;
mod linearize;

pub use index::{Anchor, IndexedTable, TableCell, TableIndex};
pub use linearize::{reconstruct, Linearizer, BLOCK_SEPARATOR};
