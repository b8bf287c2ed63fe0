//! Finished, labeled product assembled from harvested plants.
//!
//! Perfumes are written once, in bulk, by the fulfillment run that produced them. The perfume
//! actor assigns the id and the canonical serial in the same write, see [`Perfume::assemble`].

use crate::model::PlantId;
use crate::perfume_actor::PerfumeError;
use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Months between creation and expiry.
pub const SHELF_LIFE_MONTHS: u32 = 24;

/// Type-safe identifier for Perfumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerfumeId(pub u32);

impl From<u32> for PerfumeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PerfumeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "perfume_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Parfum,
    Cologne,
}

/// Net bottle volume in millilitres. Only two sizes are bottled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BottleVolume {
    Ml150,
    Ml250,
}

impl BottleVolume {
    pub fn millilitres(self) -> u32 {
        match self {
            BottleVolume::Ml150 => 150,
            BottleVolume::Ml250 => 250,
        }
    }
}

impl TryFrom<u32> for BottleVolume {
    type Error = String;

    fn try_from(ml: u32) -> Result<Self, Self::Error> {
        match ml {
            150 => Ok(BottleVolume::Ml150),
            250 => Ok(BottleVolume::Ml250),
            other => Err(format!("bottle volume must be 150 or 250, got {other}")),
        }
    }
}

impl From<BottleVolume> for u32 {
    fn from(volume: BottleVolume) -> Self {
        volume.millilitres()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Perfume {
    pub id: PerfumeId,
    pub name: String,
    pub category: Category,
    pub volume: BottleVolume,
    pub serial: String,
    pub source_plant: PlantId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Perfume {
    /// Turns a draft into a stored perfume, stamping the canonical serial.
    pub fn assemble(id: PerfumeId, draft: PerfumeDraft) -> Result<Self, PerfumeError> {
        if draft.name.trim().is_empty() {
            return Err(PerfumeError::ValidationError("name must not be empty".into()));
        }
        Ok(Self {
            serial: serial_for(draft.created_at.year(), id),
            id,
            name: draft.name,
            category: draft.category,
            volume: draft.volume,
            source_plant: draft.source_plant,
            created_at: draft.created_at,
            expires_at: draft.expires_at,
        })
    }
}

/// `PP-<year>-<id>`
pub fn serial_for(year: i32, id: PerfumeId) -> String {
    format!("PP-{}-{}", year, id.0)
}

/// A perfume before it has an identity.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfumeDraft {
    pub name: String,
    pub category: Category,
    pub volume: BottleVolume,
    pub source_plant: PlantId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PerfumeDraft {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        volume: BottleVolume,
        source_plant: PlantId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let expires_at = created_at
            .checked_add_months(Months::new(SHELF_LIFE_MONTHS))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            name: name.into(),
            category,
            volume,
            source_plant,
            created_at,
            expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bottle_volume_from_millilitres() {
        assert_eq!(BottleVolume::try_from(150), Ok(BottleVolume::Ml150));
        assert_eq!(BottleVolume::try_from(250), Ok(BottleVolume::Ml250));
        assert!(BottleVolume::try_from(200).is_err());

        let parsed: BottleVolume = serde_json::from_str("250").unwrap();
        assert_eq!(parsed, BottleVolume::Ml250);
        assert_eq!(serde_json::to_string(&BottleVolume::Ml150).unwrap(), "150");
    }

    #[test]
    fn test_draft_expires_two_years_later() {
        let created = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let draft =
            PerfumeDraft::new("Noir", Category::Parfum, BottleVolume::Ml150, PlantId(1), created);
        assert_eq!(draft.expires_at, Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_assemble_stamps_serial() {
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let draft =
            PerfumeDraft::new("Noir", Category::Cologne, BottleVolume::Ml250, PlantId(4), created);
        let perfume = Perfume::assemble(PerfumeId(17), draft).unwrap();
        assert_eq!(perfume.serial, "PP-2025-17");
        assert_eq!(perfume.source_plant, PlantId(4));
    }
}
