//! Request dispatch
//!
//! The host talks to the provider with one JSON request per line and expects
//! one JSON response per line in return:
//!
//! ```text
//! {"method":"read_resource","params":{"type_name":"bpkio_source_slate","current_state":{...}}}
//! ```

use crate::action::ActionType;
use crate::data_source::DynDataSource;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::lifecycle::Outcome;
use crate::provider::{Provider, full_name};
use crate::resource::DynResource;
use crate::schema::ProviderSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum Request {
    GetSchema,
    ValidateProviderConfig {
        config: Json,
    },
    ConfigureProvider {
        config: Json,
    },
    ValidateResourceConfig {
        type_name: String,
        config: Json,
    },
    ValidateDataSourceConfig {
        type_name: String,
        config: Json,
    },
    PlanResourceChange {
        type_name: String,
        #[serde(default)]
        prior_state: Json,
        config: Json,
    },
    ApplyResourceChange {
        type_name: String,
        #[serde(default)]
        prior_state: Json,
        #[serde(default)]
        planned_state: Json,
    },
    ReadResource {
        type_name: String,
        current_state: Json,
    },
    ImportResourceState {
        type_name: String,
        id: String,
    },
    ReadDataSource {
        type_name: String,
        config: Json,
    },
}

impl Request {
    pub fn method(&self) -> &'static str {
        match self {
            Request::GetSchema => "get_schema",
            Request::ValidateProviderConfig { .. } => "validate_provider_config",
            Request::ConfigureProvider { .. } => "configure_provider",
            Request::ValidateResourceConfig { .. } => "validate_resource_config",
            Request::ValidateDataSourceConfig { .. } => "validate_data_source_config",
            Request::PlanResourceChange { .. } => "plan_resource_change",
            Request::ApplyResourceChange { .. } => "apply_resource_change",
            Request::ReadResource { .. } => "read_resource",
            Request::ImportResourceState { .. } => "import_resource_state",
            Request::ReadDataSource { .. } => "read_data_source",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<ProviderSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_state: Option<Json>,
    /// Present for every state-returning call; `null` when the object is gone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_state: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionType>,
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

impl Response {
    fn diagnostics(diagnostics: impl Into<Diagnostics>) -> Self {
        Self {
            diagnostics: diagnostics.into(),
            ..Self::default()
        }
    }

    fn from_outcome(outcome: Outcome<Json>) -> Self {
        Self {
            new_state: Some(outcome.state.unwrap_or(Json::Null)),
            diagnostics: outcome.diagnostics,
            ..Self::default()
        }
    }
}

/// Resources and data sources bound to one configured client
struct Registry {
    resources: HashMap<String, Box<dyn DynResource>>,
    data_sources: HashMap<String, Box<dyn DynDataSource>>,
}

pub struct ProviderServer<P: Provider> {
    provider: P,
    schema: ProviderSchema,
    registry: OnceLock<Registry>,
}

impl<P: Provider> ProviderServer<P> {
    pub fn new(provider: P) -> Self {
        let schema = provider.provider_schema();
        Self {
            provider,
            schema,
            registry: OnceLock::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.registry.get().is_some()
    }

    pub async fn handle(&self, request: Request) -> Response {
        debug!(method = request.method(), "request");
        match request {
            Request::GetSchema => Response {
                schema: Some(self.schema.clone()),
                ..Response::default()
            },
            Request::ValidateProviderConfig { config } => {
                Response::diagnostics(self.schema.provider.validate_config(&config))
            }
            Request::ConfigureProvider { config } => self.configure(&config).await,
            Request::ValidateResourceConfig { type_name, config } => {
                match self.schema.resources.get(&type_name) {
                    Some(schema) => Response::diagnostics(schema.validate_config(&config)),
                    None => Response::diagnostics(unknown_type("resource", &type_name)),
                }
            }
            Request::ValidateDataSourceConfig { type_name, config } => {
                match self.schema.data_sources.get(&type_name) {
                    Some(schema) => Response::diagnostics(schema.validate_config(&config)),
                    None => Response::diagnostics(unknown_type("data source", &type_name)),
                }
            }
            Request::PlanResourceChange {
                type_name,
                prior_state,
                config,
            } => self.plan(&type_name, &prior_state, &config),
            Request::ApplyResourceChange {
                type_name,
                prior_state,
                planned_state,
            } => self.apply(&type_name, &prior_state, &planned_state).await,
            Request::ReadResource {
                type_name,
                current_state,
            } => match self.resource(&type_name) {
                Ok(resource) if current_state.is_null() => {
                    debug!(resource = resource.name(), "nothing to read");
                    Response::from_outcome(Outcome::removed())
                }
                Ok(resource) => Response::from_outcome(resource.read(&current_state).await),
                Err(diag) => Response::diagnostics(diag),
            },
            Request::ImportResourceState { type_name, id } => match self.resource(&type_name) {
                Ok(resource) => Response::from_outcome(resource.import(&id).await),
                Err(diag) => Response::diagnostics(diag),
            },
            Request::ReadDataSource { type_name, config } => {
                match self.data_source(&type_name) {
                    Ok(data_source) => Response::from_outcome(data_source.read(&config).await),
                    Err(diag) => Response::diagnostics(diag),
                }
            }
        }
    }

    async fn configure(&self, config: &Json) -> Response {
        if self.is_configured() {
            return Response::diagnostics(Diagnostic::error(
                "Provider Already Configured",
                "configure_provider may only be called once per provider process.",
            ));
        }

        let mut diagnostics = self.schema.provider.validate_config(config);
        if diagnostics.has_error() {
            return Response::diagnostics(diagnostics);
        }

        let client = match self.provider.configure(config).await {
            Ok(client) => client,
            Err(diags) => {
                diagnostics.extend(diags);
                return Response::diagnostics(diagnostics);
            }
        };

        let type_name = self.provider.type_name();
        let registry = Registry {
            resources: self
                .provider
                .resources()
                .into_iter()
                .map(|f| (full_name(type_name, f.name), (f.build)(Arc::clone(&client))))
                .collect(),
            data_sources: self
                .provider
                .data_sources()
                .into_iter()
                .map(|f| (full_name(type_name, f.name), (f.build)(Arc::clone(&client))))
                .collect(),
        };
        if self.registry.set(registry).is_err() {
            diagnostics.push(Diagnostic::error(
                "Provider Already Configured",
                "configure_provider may only be called once per provider process.",
            ));
        } else {
            info!(provider = type_name, "provider configured");
        }
        Response::diagnostics(diagnostics)
    }

    fn plan(&self, type_name: &str, prior_state: &Json, config: &Json) -> Response {
        let Some(schema) = self.schema.resources.get(type_name) else {
            return Response::diagnostics(unknown_type("resource", type_name));
        };
        let prior = Some(prior_state).filter(|p| !p.is_null());
        let planned = schema.plan(prior, config);
        let action = ActionType::classify(prior, Some(&planned));
        Response {
            action: Some(action),
            planned_state: Some(planned),
            ..Response::default()
        }
    }

    async fn apply(&self, type_name: &str, prior_state: &Json, planned_state: &Json) -> Response {
        let resource = match self.resource(type_name) {
            Ok(resource) => resource,
            Err(diag) => return Response::diagnostics(diag),
        };
        let action = ActionType::classify(Some(prior_state), Some(planned_state));
        let outcome = match action {
            ActionType::Create => resource.create(planned_state).await,
            ActionType::Update => resource.update(prior_state, planned_state).await,
            ActionType::Delete => resource.delete(prior_state).await,
            ActionType::NoOp => Outcome {
                state: Some(prior_state.clone()).filter(|s| !s.is_null()),
                diagnostics: Diagnostics::new(),
            },
        };
        if outcome.has_error() {
            error!(resource = type_name, %action, "apply failed");
        }
        Response {
            action: Some(action),
            ..Response::from_outcome(outcome)
        }
    }

    fn registry(&self) -> Result<&Registry, Diagnostic> {
        self.registry.get().ok_or_else(|| {
            Diagnostic::error(
                "Provider Not Configured",
                "configure_provider must succeed before resources or data sources can be used.",
            )
        })
    }

    fn resource(&self, type_name: &str) -> Result<&dyn DynResource, Diagnostic> {
        if !self.schema.resources.contains_key(type_name) {
            return Err(unknown_type("resource", type_name));
        }
        self.registry()?
            .resources
            .get(type_name)
            .map(|r| r.as_ref())
            .ok_or_else(|| unknown_type("resource", type_name))
    }

    fn data_source(&self, type_name: &str) -> Result<&dyn DynDataSource, Diagnostic> {
        if !self.schema.data_sources.contains_key(type_name) {
            return Err(unknown_type("data source", type_name));
        }
        self.registry()?
            .data_sources
            .get(type_name)
            .map(|d| d.as_ref())
            .ok_or_else(|| unknown_type("data source", type_name))
    }
}

fn unknown_type(kind: &str, type_name: &str) -> Diagnostic {
    Diagnostic::error(
        format!("Unknown {kind} type"),
        format!("This provider has no {kind} named {type_name:?}."),
    )
}

/// Serves JSON-line requests from `reader` until end of input
pub async fn serve_io<P, R, W>(
    server: &ProviderServer<P>,
    reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    P: Provider,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => server.handle(request).await,
            Err(e) => Response::diagnostics(Diagnostic::error(
                "Invalid Request",
                format!("could not decode request: {e}"),
            )),
        };
        let mut encoded = serde_json::to_string(&response).map_err(std::io::Error::other)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }
    debug!("input closed, stopping");
    Ok(())
}
