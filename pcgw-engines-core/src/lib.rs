//! Records, engine-name normalization and tabular file I/O for the
//! PCGamingWiki engine catalog.
//!
//! Nothing in this crate touches the network. The wiki crate produces
//! [`Engine`] and [`Game`] records; this crate persists them and collapses
//! versioned engine names into their family.

pub mod error;
pub mod normalize;
pub mod records;
pub mod release;
pub mod synonyms;
pub mod tabular;

pub use error::CoreError;
pub use normalize::{SortOrder, SortOrderParseError, normalize_file, normalize_games};
pub use records::{Engine, Game, NormalizedGame};
pub use synonyms::{ENGINE_FAMILIES, canonical_engine, engine_family};
pub use tabular::{Row, read_rows, write_rows};
