//! Entity types: boxes, recognized text and their aggregates

pub mod arena;
pub mod block;
pub mod field;
pub mod group;
pub mod kind;
pub mod table;
pub mod textbox;

pub use arena::{TextBoxArena, TextBoxId};
pub use block::{round_coord, Block, Extent, COORD_DECIMALS};
pub use field::Field;
pub use group::{Key, Line, TextGroup, Value, ValueId, DEFAULT_GROUP_SCORE};
pub use kind::{EntityKind, Tagged};
pub use table::TableRegion;
pub use textbox::{Character, Classification, TextBox};
