//! SVG module scanner.
//!
//! Builds an element tree from raw SVG markup and indexes the ids of reusable
//! elements (shapes, groups, masks, filters) into a resource module. The tree
//! can be written back out with [`serialize_svg`], optionally wrapping shapes
//! in `<symbol>` elements for merged icon sprites.

pub mod attr;
pub mod metadata;
pub mod options;
pub mod scanner;
pub mod serialize;
pub mod types;

pub use attr::SvgAttributeScanner;
pub use metadata::SvgMetadata;
pub use options::{ElementPrefixFn, VectorParseOptions};
pub use scanner::{parse_vector, SvgModuleScanner, VectorResources};
pub use serialize::{serialize_svg, wrap_merged_svg, SerializeError, SerializeOptions};
pub use types::{ElementMeta, SvgElementType, VectorType};
