//! The four lookups of the cascading selector.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of the make → model → year → seat rows cascade.
///
/// Each stage knows its endpoint and the response field carrying its
/// payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStage {
    Makes,
    Models,
    Years,
    SeatRows,
}

impl LookupStage {
    /// All stages, upstream first.
    pub const ALL: [LookupStage; 4] = [Self::Makes, Self::Models, Self::Years, Self::SeatRows];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Makes => "makes",
            Self::Models => "models",
            Self::Years => "years",
            Self::SeatRows => "seat_rows",
        }
    }

    /// Response field holding the payload.
    pub fn field(&self) -> &'static str {
        self.name()
    }

    /// Fixed path segments below the API base.
    pub fn path(&self) -> [&'static str; 2] {
        match self {
            Self::Makes => ["car_type_options", "makes"],
            Self::Models => ["car_type_options", "models"],
            Self::Years => ["car_type_options", "years"],
            Self::SeatRows => ["car_type", "seat_rows"],
        }
    }

    /// Number of selection values the request carries in its path.
    pub fn arity(&self) -> usize {
        match self {
            Self::Makes => 0,
            Self::Models => 1,
            Self::Years => 2,
            Self::SeatRows => 3,
        }
    }

    /// Position in the cascade, 0 for makes.
    pub fn depth(&self) -> usize {
        self.arity()
    }

    /// The stage fed by this one's selection.
    pub fn downstream(&self) -> Option<LookupStage> {
        match self {
            Self::Makes => Some(Self::Models),
            Self::Models => Some(Self::Years),
            Self::Years => Some(Self::SeatRows),
            Self::SeatRows => None,
        }
    }
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
