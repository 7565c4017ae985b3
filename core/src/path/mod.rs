//! Property paths and declared-type resolution
//!
//! A property path names a field buried inside nested serialized data, in the
//! host's string encoding (`items.Array.data[1].target`). [`PropertyPath`]
//! is the parsed form; [`resolver::PathResolver`] walks one against the type
//! registry, preferring live runtime types over declared ones where an
//! instance is inspectable.

mod parse;
mod resolver;

pub use resolver::{PathResolver, resolve_path};

/// One step of a parsed property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Look up a named field on the current type
    Field(String),
    /// Step into a collection element at a fixed index
    Element(usize),
}

/// A parsed property path
///
/// Ephemeral: parsed once per resolution from the host encoding and
/// discarded after the walk. Resolution never mutates anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<Segment>,
}

impl PropertyPath {
    /// The parsed segments in walk order
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl std::fmt::Display for PropertyPath {
    /// Renders back into the host encoding
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                f.write_str(".")?;
            }
            match segment {
                Segment::Field(name) => f.write_str(name)?,
                Segment::Element(index) => write!(f, "Array.data[{index}]")?,
            }
            first = false;
        }
        Ok(())
    }
}
