//! ActorEntity implementation for the Perfume domain type.
//!
//! Perfumes are immutable once written. The id comes from the store and the serial is derived
//! from it inside the same message, so a batch needs exactly one write.

use super::actions::{PerfumeCommand, PerfumeCommandResult};
use super::error::PerfumeError;
use crate::model::{Perfume, PerfumeDraft, PerfumeId};
use actor_framework::{ActorEntity, EntityStore};
use async_trait::async_trait;
use tracing::info;

#[async_trait]
impl ActorEntity for Perfume {
    type Id = PerfumeId;
    type Create = PerfumeDraft;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Command = PerfumeCommand;
    type CommandResult = PerfumeCommandResult;
    type Context = ();
    type Error = PerfumeError;

    fn from_create_params(id: PerfumeId, draft: PerfumeDraft) -> Result<Self, Self::Error> {
        Perfume::assemble(id, draft)
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(PerfumeError::ValidationError(format!(
            "{} is immutable",
            self.id
        )))
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(PerfumeError::ValidationError(format!(
            "{} is immutable",
            self.id
        )))
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(PerfumeError::ValidationError(
            "perfumes have no per-perfume actions".into(),
        ))
    }

    async fn handle_command(
        store: &mut EntityStore<Self>,
        command: PerfumeCommand,
        _ctx: &(),
    ) -> Result<PerfumeCommandResult, Self::Error> {
        match command {
            PerfumeCommand::Assemble(drafts) => {
                if drafts.is_empty() {
                    return Err(PerfumeError::ValidationError("empty batch".into()));
                }
                // Build everything first so a bad draft leaves the store untouched.
                let mut batch = Vec::with_capacity(drafts.len());
                for draft in drafts {
                    batch.push(Perfume::assemble(store.allocate_id(), draft)?);
                }
                for perfume in &batch {
                    store.insert(perfume.id, perfume.clone());
                }
                info!(count = batch.len(), "Batch assembled");
                Ok(PerfumeCommandResult::Assemble(batch))
            }
            PerfumeCommand::FindBySerial(serial) => Ok(PerfumeCommandResult::FindBySerial(
                store.values().find(|p| p.serial == serial).cloned(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BottleVolume, Category, PlantId};
    use chrono::{Datelike, Utc};
    use std::collections::HashSet;

    fn drafts(n: u32) -> Vec<PerfumeDraft> {
        let now = Utc::now();
        (0..n)
            .map(|i| {
                let source = PlantId(i % 3 + 1);
                PerfumeDraft::new("Noir", Category::Parfum, BottleVolume::Ml150, source, now)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_assemble_assigns_unique_serials() {
        let mut store = EntityStore::new();
        let result = Perfume::handle_command(&mut store, PerfumeCommand::Assemble(drafts(4)), &())
            .await
            .unwrap();
        let PerfumeCommandResult::Assemble(batch) = result else {
            panic!("expected Assemble result");
        };

        let year = Utc::now().year();
        let serials: HashSet<&str> = batch.iter().map(|p| p.serial.as_str()).collect();
        assert_eq!(serials.len(), 4);
        for perfume in &batch {
            assert_eq!(perfume.serial, format!("PP-{}-{}", year, perfume.id.0));
        }
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn test_bad_draft_writes_nothing() {
        let mut store = EntityStore::new();
        let mut batch = drafts(3);
        batch[2].name = " ".into();
        let result =
            Perfume::handle_command(&mut store, PerfumeCommand::Assemble(batch), &()).await;
        assert!(matches!(result, Err(PerfumeError::ValidationError(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_serial() {
        let mut store = EntityStore::new();
        Perfume::handle_command(&mut store, PerfumeCommand::Assemble(drafts(2)), &())
            .await
            .unwrap();
        let serial = store.get(&PerfumeId(2)).unwrap().serial.clone();

        let found = Perfume::handle_command(&mut store, PerfumeCommand::FindBySerial(serial), &())
            .await
            .unwrap();
        assert!(matches!(
            found,
            PerfumeCommandResult::FindBySerial(Some(p)) if p.id == PerfumeId(2)
        ));
    }
}
