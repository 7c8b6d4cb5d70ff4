//! Framework-free core: data model, filtering, layout and interaction.

pub mod filter;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod selection;

pub use filter::{TypeCounts, VisibleTypes, filter_visible, search};
pub use interaction::{InteractionController, InteractionEvent, ViewTransform};
pub use layout::Simulation;
pub use model::{GraphData, Link, Node, NodeKind, Relationship};
pub use selection::{PanelWidth, Selection};
