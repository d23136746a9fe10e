pub mod errors;
pub mod index_node;
pub mod properties;

pub use errors::StoreError;
pub use index_node::{ChildInfo, IndexNode};
pub use properties::Properties;
