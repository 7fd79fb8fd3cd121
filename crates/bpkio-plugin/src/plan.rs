//! Plan computation
//!
//! Produces the planned state for a resource from its configuration and the
//! prior state. Values the service will compute are planned as unknown unless
//! the attribute asks to keep the prior value.

use crate::schema::{AttributeKind, Schema};
use crate::value::{is_unknown_json, resolve_unknowns, unknown_json};
use serde_json::Value as Json;

static NULL: Json = Json::Null;

impl Schema {
    /// Computes the planned state. A null configuration plans a destroy.
    ///
    /// When nothing but computed values would differ from `prior`, the prior
    /// state is planned as is, so an unchanged resource never shows a diff.
    pub fn plan(&self, prior: Option<&Json>, config: &Json) -> Json {
        let planned = self.plan_object(prior, config);
        match prior {
            Some(prior)
                if planned.is_object()
                    && prior.is_object()
                    && resolve_unknowns(&planned, Some(prior)) == *prior =>
            {
                prior.clone()
            }
            _ => planned,
        }
    }

    fn plan_object(&self, prior: Option<&Json>, config: &Json) -> Json {
        if config.is_null() {
            return Json::Null;
        }
        if is_unknown_json(config) {
            return config.clone();
        }
        let prior = prior.filter(|p| p.is_object());

        let planned = self
            .attributes
            .iter()
            .map(|(name, attr)| {
                let configured = config.get(name).unwrap_or(&NULL);
                let prior_value = prior.and_then(|p| p.get(name)).filter(|v| !v.is_null());

                let value = if !configured.is_null() {
                    match (&attr.kind, configured) {
                        (AttributeKind::SingleNested { nested }, Json::Object(_)) => {
                            nested.plan_object(prior_value, configured)
                        }
                        (AttributeKind::ListNested { nested }, Json::Array(items)) => Json::Array(
                            items
                                .iter()
                                .enumerate()
                                .map(|(i, item)| {
                                    nested.plan_object(prior_value.and_then(|p| p.get(i)), item)
                                })
                                .collect(),
                        ),
                        _ => configured.clone(),
                    }
                } else if let Some(default) = &attr.default {
                    default.clone()
                } else if attr.computed {
                    match prior_value {
                        Some(prior) if attr.use_state_for_unknown && !is_unknown_json(prior) => {
                            prior.clone()
                        }
                        _ => unknown_json(),
                    }
                } else {
                    Json::Null
                };
                (name.clone(), value)
            })
            .collect();

        Json::Object(planned)
    }
}
