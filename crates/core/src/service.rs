//! Offered service categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A service category a prospective client can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    #[serde(rename = "concept-design")]
    ConceptDesign,
    #[serde(rename = "schematic-design")]
    SchematicDesign,
    #[serde(rename = "construction-documentation")]
    ConstructionDocumentation,
    #[serde(rename = "3d-visualization")]
    Visualization3d,
    #[serde(rename = "interior-design")]
    InteriorDesign,
}

impl ServiceCategory {
    /// All categories, in the order the contact form lists them.
    pub const ALL: [ServiceCategory; 5] = [
        Self::ConceptDesign,
        Self::SchematicDesign,
        Self::ConstructionDocumentation,
        Self::Visualization3d,
        Self::InteriorDesign,
    ];

    /// Wire value submitted by the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConceptDesign => "concept-design",
            Self::SchematicDesign => "schematic-design",
            Self::ConstructionDocumentation => "construction-documentation",
            Self::Visualization3d => "3d-visualization",
            Self::InteriorDesign => "interior-design",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ConceptDesign => "Concept Design",
            Self::SchematicDesign => "Schematic Design",
            Self::ConstructionDocumentation => "Construction Documentation",
            Self::Visualization3d => "3D Visualization",
            Self::InteriorDesign => "Interior Design",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no offered service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownService(pub String);

impl fmt::Display for UnknownService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown service category: {:?}", self.0)
    }
}

impl std::error::Error for UnknownService {}

impl FromStr for ServiceCategory {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}
