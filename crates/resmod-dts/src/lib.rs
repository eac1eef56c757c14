//! TypeScript declaration generation for resource modules.
//!
//! Scans css, scss, sass and svg files and writes `.d.ts` files declaring the
//! extracted identifiers, either one declaration per file or one merged
//! declaration per directory.

pub mod declaration;
pub mod generator;
pub mod group;
pub mod loader;
pub mod options;
pub mod tsconfig;

pub use declaration::{serialize_module, serialize_module_as_variable, Declaration};
pub use generator::{GenerateError, GenerateResult, Generator};
pub use group::{group_files, ResourceGroup};
pub use options::{Alias, GenerateOptions};
