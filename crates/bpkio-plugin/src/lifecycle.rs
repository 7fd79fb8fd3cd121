//! Resource lifecycle state machine
//!
//! ```text
//! Absent ──create──▶ Created ──read──▶ Synced ⇄ Drifted
//!                                        │  update (+ re-read)
//!                                        └──delete──▶ Deleted
//! ```
//!
//! Every mutation is followed by a read so the resulting state always mirrors
//! the service. A resource that disappeared remotely reads as removed, and
//! deleting it again is not an error.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{ConversionError, LifecycleError, Operation};
use crate::resource::Resource;
use crate::value::resolve_unknowns;
use serde::Serialize;
use serde_json::Value as Json;
use tracing::{debug, info, warn};

/// New state plus the diagnostics produced while computing it.
///
/// `state: None` means the resource does not exist (never created, deleted,
/// or removed outside of the provider).
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub state: Option<T>,
    pub diagnostics: Diagnostics,
}

impl<T> Outcome<T> {
    pub fn ok(state: T) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn removed() -> Self {
        Self {
            state: None,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn failed(error: impl Into<Diagnostic>) -> Self {
        Self {
            state: None,
            diagnostics: Diagnostics::from(error.into()),
        }
    }

    /// A usable state that still comes with an error
    pub fn partial(state: T, error: impl Into<Diagnostic>) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::from(error.into()),
        }
    }

    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}

impl<T: Serialize> Outcome<T> {
    pub(crate) fn into_json(self) -> Outcome<Json> {
        let Outcome {
            state,
            mut diagnostics,
        } = self;
        let state = match state.map(serde_json::to_value).transpose() {
            Ok(state) => state,
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Invalid Resource State",
                    format!("could not encode state: {e}"),
                ));
                None
            }
        };
        Outcome { state, diagnostics }
    }
}

impl Outcome<Json> {
    /// Replaces the state with `state`, keeping diagnostics
    pub(crate) fn keep(mut self, state: &Json) -> Self {
        self.state = Some(state.clone());
        self
    }
}

fn id_of<R: Resource>(model: &R::Model) -> Result<u64, LifecycleError> {
    match R::id(model) {
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err(LifecycleError::MissingId { entity: R::ENTITY }),
        Err(e) => Err(LifecycleError::conversion(R::ENTITY, e)),
    }
}

/// Fetches and flattens the record with `id`; errors are rendered as text
async fn refresh<R: Resource>(resource: &R, id: u64) -> Result<R::Model, String> {
    let record = resource.get_remote(id).await.map_err(|e| e.to_string())?;
    R::flatten(record).map_err(|e| e.to_string())
}

/// Absent → Created
pub async fn create<R: Resource>(resource: &R, planned: &R::Model) -> Outcome<R::Model> {
    debug!(resource = R::NAME, "creating");

    let input = match R::expand(planned) {
        Ok(input) => input,
        Err(e) => return Outcome::failed(LifecycleError::conversion(R::ENTITY, e)),
    };

    let record = match resource.create_remote(&input).await {
        Ok(record) => record,
        Err(e) => return Outcome::failed(LifecycleError::api(R::ENTITY, Operation::Create, &e)),
    };
    let id = R::record_id(&record);
    info!(resource = R::NAME, id, "created");

    match refresh(resource, id).await {
        Ok(model) => Outcome::ok(model),
        Err(message) => {
            warn!(resource = R::NAME, id, error = %message, "read after create failed");
            let error = LifecycleError::ReadAfterCreate {
                entity: R::ENTITY,
                id,
                message,
            };
            match R::flatten(record) {
                Ok(model) => Outcome::partial(model, error),
                Err(e) => {
                    let mut outcome = Outcome::failed(error);
                    outcome
                        .diagnostics
                        .push(LifecycleError::conversion(R::ENTITY, e));
                    outcome
                }
            }
        }
    }
}

/// Created/Synced → Synced, or removed when the service no longer has it
pub async fn read<R: Resource>(resource: &R, state: &R::Model) -> Outcome<R::Model> {
    let id = match id_of::<R>(state) {
        Ok(id) => id,
        Err(e) => return Outcome::partial(state.clone(), e),
    };
    debug!(resource = R::NAME, id, "reading");

    match resource.get_remote(id).await {
        Ok(record) => match R::flatten(record) {
            Ok(model) => Outcome::ok(model),
            Err(e) => Outcome::partial(state.clone(), LifecycleError::conversion(R::ENTITY, e)),
        },
        Err(e) if R::is_not_found(&e) => {
            warn!(resource = R::NAME, id, "not found, removing from state");
            Outcome::removed()
        }
        Err(e) => Outcome::partial(
            state.clone(),
            LifecycleError::api(R::ENTITY, Operation::Read, &e),
        ),
    }
}

/// Synced → Drifted → Synced
pub async fn update<R: Resource>(
    resource: &R,
    prior: &R::Model,
    planned: &R::Model,
) -> Outcome<R::Model> {
    let id = match id_of::<R>(prior) {
        Ok(id) => id,
        Err(e) => return Outcome::partial(prior.clone(), e),
    };
    debug!(resource = R::NAME, id, "updating");

    let input = match R::expand(planned) {
        Ok(input) => input,
        Err(e) => return Outcome::partial(prior.clone(), LifecycleError::conversion(R::ENTITY, e)),
    };

    if let Err(e) = resource.update_remote(id, &input).await {
        return Outcome::partial(
            prior.clone(),
            LifecycleError::api(R::ENTITY, Operation::Update, &e),
        );
    }
    info!(resource = R::NAME, id, "updated");

    match refresh(resource, id).await {
        Ok(model) => Outcome::ok(model),
        Err(message) => {
            warn!(resource = R::NAME, id, error = %message, "read after update failed");
            let error = LifecycleError::ReadAfterUpdate {
                entity: R::ENTITY,
                id,
                message,
            };
            match planned_with_prior::<R>(planned, prior) {
                Ok(model) => Outcome::partial(model, error),
                Err(e) => {
                    let mut outcome = Outcome::partial(prior.clone(), error);
                    outcome
                        .diagnostics
                        .push(LifecycleError::conversion(R::ENTITY, e));
                    outcome
                }
            }
        }
    }
}

/// Planned state with its unknowns filled from the prior state
fn planned_with_prior<R: Resource>(
    planned: &R::Model,
    prior: &R::Model,
) -> Result<R::Model, ConversionError> {
    let planned = serde_json::to_value(planned)?;
    let prior = serde_json::to_value(prior)?;
    Ok(serde_json::from_value(resolve_unknowns(
        &planned,
        Some(&prior),
    ))?)
}

/// Synced → Deleted; an already deleted resource counts as success
pub async fn delete<R: Resource>(resource: &R, state: &R::Model) -> Outcome<R::Model> {
    let id = match id_of::<R>(state) {
        Ok(id) => id,
        Err(e) => return Outcome::partial(state.clone(), e),
    };
    debug!(resource = R::NAME, id, "deleting");

    match resource.delete_remote(id).await {
        Ok(()) => {
            info!(resource = R::NAME, id, "deleted");
            Outcome::removed()
        }
        Err(e) if R::is_not_found(&e) => {
            debug!(resource = R::NAME, id, "already deleted");
            Outcome::removed()
        }
        Err(e) => Outcome::partial(
            state.clone(),
            LifecycleError::api(R::ENTITY, Operation::Delete, &e),
        ),
    }
}

/// Imports by textual identifier; the text must parse before anything is
/// sent to the service.
pub async fn import<R: Resource>(resource: &R, id: &str) -> Outcome<R::Model> {
    let id = match id.parse::<u64>() {
        Ok(id) => id,
        Err(source) => {
            return Outcome::failed(LifecycleError::ImportFormat {
                id: id.to_string(),
                source,
            });
        }
    };
    debug!(resource = R::NAME, id, "importing");

    match resource.get_remote(id).await {
        Ok(record) => match R::flatten(record) {
            Ok(model) => {
                info!(resource = R::NAME, id, "imported");
                Outcome::ok(model)
            }
            Err(e) => Outcome::failed(LifecycleError::conversion(R::ENTITY, e)),
        },
        Err(e) if R::is_not_found(&e) => Outcome::failed(LifecycleError::ImportNotFound {
            entity: R::ENTITY,
            id,
        }),
        Err(e) => Outcome::failed(LifecycleError::api(R::ENTITY, Operation::Import, &e)),
    }
}
