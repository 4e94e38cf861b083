//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `splat-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Stat, listing, hashing, reading, writing, copying
//!   - `Prompt`: Interactive yes/no confirmation
//!   - `Reporter`: Status lines for each write
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{EntryKind, Filesystem, Prompt, Reporter};
