//! # Switchwire: descriptor-driven component factory for Rust
//!
//! Components are described by name: what they are built from, which other
//! components they need, how long they live and which lifecycle hooks run.
//! The factory wires them together, starts eager singletons in priority
//! order and tears everything down in reverse.
//!
//! ```rust
//! use switchwire::prelude::*;
//! use std::sync::Arc;
//!
//! struct DataSource;
//! struct PersonDao {
//!     source: Arc<DataSource>,
//! }
//!
//! let context = ComponentContext::builder()
//!     .component(ComponentDescriptor::builder("DataSource").constructor(|_| Ok(DataSource)))
//!     .component(
//!         ComponentDescriptor::builder("PersonDAO")
//!             .constructor(|args| Ok(PersonDao { source: args.get(0)? }))
//!             .constructor_arg(OrderedArg::reference("DataSource")),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let dao = context.get::<PersonDao>("PersonDAO").unwrap();
//! assert!(Arc::ptr_eq(&dao.source, &context.get::<DataSource>("DataSource").unwrap()));
//! ```

pub use switchwire_container::*;
pub use switchwire_support::*;
