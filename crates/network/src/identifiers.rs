//! Type-safe identifiers for network entities.
//!
//! The backend keys every record with a plain numeric id. Wrapping each kind
//! in its own newtype keeps a terminal id from being passed where a pipeline
//! id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self::new(id)
            }
        }
    };
}

impl_identifier!(StationId);
impl_identifier!(TerminalId);
impl_identifier!(ProductionFieldId);
impl_identifier!(PipelineId);
impl_identifier!(SegmentId);
impl_identifier!(CoordinateId);
impl_identifier!(LocationId);
