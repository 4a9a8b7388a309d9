//! ACRIS datasets and their descriptors.
//!
//! ACRIS publishes ten datasets on the NYC open-data portal: five record kinds
//! (master, legals, parties, references, remarks) for each of real and personal
//! property. All five kinds of a property type share the `document_id` join key.
//!
//! Each [`Dataset`] resolves to a static [`DatasetDescriptor`] through a lookup table;
//! the descriptor knows the dataset's filter vocabulary and turns caller criteria into
//! predicates.

mod descriptor;
mod registry;
mod vocabulary;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

pub use descriptor::*;
pub use registry::*;

/// Property type of an ACRIS dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// Real property (deeds, mortgages, ...).
    RealProperty,
    /// Personal property (UCC filings, federal liens, ...).
    PersonalProperty,
}

/// Record kind of an ACRIS dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Master,
    Legals,
    Parties,
    References,
    Remarks,
}

impl RecordKind {
    /// All record kinds, in the order composite records list them.
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Master,
        RecordKind::Legals,
        RecordKind::Parties,
        RecordKind::References,
        RecordKind::Remarks,
    ];
}

/// One of the ten logical ACRIS datasets.
///
/// The discriminant indexes the descriptor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    RealPropertyMaster = 0,
    RealPropertyLegals = 1,
    RealPropertyParties = 2,
    RealPropertyReferences = 3,
    RealPropertyRemarks = 4,
    PersonalPropertyMaster = 5,
    PersonalPropertyLegals = 6,
    PersonalPropertyParties = 7,
    PersonalPropertyReferences = 8,
    PersonalPropertyRemarks = 9,
}

impl Dataset {
    const ALL: [Dataset; 10] = [
        Dataset::RealPropertyMaster,
        Dataset::RealPropertyLegals,
        Dataset::RealPropertyParties,
        Dataset::RealPropertyReferences,
        Dataset::RealPropertyRemarks,
        Dataset::PersonalPropertyMaster,
        Dataset::PersonalPropertyLegals,
        Dataset::PersonalPropertyParties,
        Dataset::PersonalPropertyReferences,
        Dataset::PersonalPropertyRemarks,
    ];

    /// Returns the dataset for a property type and record kind.
    pub const fn new(property: PropertyType, kind: RecordKind) -> Self {
        match (property, kind) {
            (PropertyType::RealProperty, RecordKind::Master) => Dataset::RealPropertyMaster,
            (PropertyType::RealProperty, RecordKind::Legals) => Dataset::RealPropertyLegals,
            (PropertyType::RealProperty, RecordKind::Parties) => Dataset::RealPropertyParties,
            (PropertyType::RealProperty, RecordKind::References) => Dataset::RealPropertyReferences,
            (PropertyType::RealProperty, RecordKind::Remarks) => Dataset::RealPropertyRemarks,
            (PropertyType::PersonalProperty, RecordKind::Master) => Dataset::PersonalPropertyMaster,
            (PropertyType::PersonalProperty, RecordKind::Legals) => Dataset::PersonalPropertyLegals,
            (PropertyType::PersonalProperty, RecordKind::Parties) => Dataset::PersonalPropertyParties,
            (PropertyType::PersonalProperty, RecordKind::References) => {
                Dataset::PersonalPropertyReferences
            }
            (PropertyType::PersonalProperty, RecordKind::Remarks) => Dataset::PersonalPropertyRemarks,
        }
    }

    /// Returns all ten datasets.
    pub fn all() -> &'static [Dataset] {
        &Self::ALL
    }

    /// Returns the five datasets of a property type, master first.
    pub fn for_property(property: PropertyType) -> [Dataset; 5] {
        RecordKind::ALL.map(|kind| Dataset::new(property, kind))
    }

    /// Returns the static descriptor for this dataset.
    pub fn descriptor(self) -> &'static DatasetDescriptor {
        &vocabulary::DESCRIPTORS[self as usize]
    }

    /// Returns the property type.
    pub fn property_type(self) -> PropertyType {
        if (self as usize) < 5 {
            PropertyType::RealProperty
        } else {
            PropertyType::PersonalProperty
        }
    }

    /// Returns the record kind.
    pub fn kind(self) -> RecordKind {
        RecordKind::ALL[self as usize % 5]
    }

    /// Returns the snake-case dispatch key, e.g. `personal_property_master`.
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

impl FromStr for Dataset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dataset::all()
            .iter()
            .copied()
            .find(|d| d.key() == s)
            .ok_or_else(|| ConfigError::UnknownDataset { name: s.to_string() })
    }
}
