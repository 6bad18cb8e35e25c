use serde::Serialize;
use std::fmt;

/// Direction of a punch.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PunchKind {
    In,
    Out,
}

impl PunchKind {
    /// Value of the `punches.kind` column.
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchKind::In => "in",
            PunchKind::Out => "out",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(PunchKind::In),
            "out" => Some(PunchKind::Out),
            _ => None,
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, PunchKind::In)
    }
}

impl fmt::Display for PunchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PunchKind::In => "IN",
            PunchKind::Out => "OUT",
        })
    }
}
