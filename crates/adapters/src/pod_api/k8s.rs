// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes pod access via `kube-rs`.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future;
use futures_util::StreamExt;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DeleteParams, ListParams};
use kube::config::{InferConfigError, KubeConfigOptions, Kubeconfig, KubeconfigError};
use kube::{Client, Config};
use reaper_core::{PodKey, ResourceVersion};
use thiserror::Error;

use super::convert::{self, Decoded};
use super::{ApiError, DeleteError, PodApi, PodList, WatchStream};

/// Errors building the API client.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to load kubeconfig: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    #[error("failed to infer cluster configuration: {0}")]
    Infer(#[from] InferConfigError),

    #[error("invalid master url {url}: {source}")]
    InvalidMaster {
        url: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("failed to create kube client: {0}")]
    Client(#[from] kube::Error),
}

/// Connection parameters supplied at process start.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// API server URL, overriding the one from the kubeconfig.
    pub master: Option<String>,
    /// Kubeconfig file. When absent, in-cluster config then the default
    /// kubeconfig are tried.
    pub kubeconfig: Option<PathBuf>,
    /// Idle read timeout for the HTTP connection. Must exceed the longest
    /// watch window, otherwise quiet watches are cut by the client.
    pub read_timeout: Option<Duration>,
}

/// [`PodApi`] over a live cluster.
#[derive(Clone)]
pub struct KubePodApi {
    client: Client,
}

impl KubePodApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the bootstrap options.
    pub async fn connect(options: &ConnectOptions) -> Result<Self, ConnectError> {
        let mut config = match &options.kubeconfig {
            Some(path) => {
                let kubeconfig = Kubeconfig::read_from(path)?;
                Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?
            }
            None => Config::infer().await?,
        };

        if let Some(url) = &options.master {
            config.cluster_url = url
                .parse()
                .map_err(|source| ConnectError::InvalidMaster { url: url.clone(), source })?;
        }
        config.read_timeout = options.read_timeout;

        tracing::info!(cluster_url = %config.cluster_url, "connecting to API server");
        let client = Client::try_from(config)?;
        Ok(Self::new(client))
    }
}

/// Path and query for a cluster-wide pod watch.
///
/// Built by hand because `WatchParams` refuses timeouts of 295s and above.
pub(super) fn watch_uri(from: &ResourceVersion, timeout: Duration) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("watch", "true")
        .append_pair("resourceVersion", from.as_str())
        .append_pair("timeoutSeconds", &timeout.as_secs().to_string())
        .finish();
    format!("/api/v1/pods?{}", query)
}

#[async_trait]
impl PodApi for KubePodApi {
    async fn list_pods(&self) -> Result<PodList, ApiError> {
        let pods: Api<Pod> = Api::all(self.client.clone());
        let list = pods.list(&ListParams::default()).await?;
        let resource_version = convert::list_checkpoint(&list.metadata)?;

        let mut snapshots = Vec::with_capacity(list.items.len());
        for pod in &list.items {
            match convert::snapshot(pod) {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => tracing::warn!(error = %e, "skipping listed pod"),
            }
        }
        Ok(PodList { pods: snapshots, resource_version })
    }

    async fn watch_pods(
        &self,
        from: &ResourceVersion,
        timeout: Duration,
    ) -> Result<WatchStream, ApiError> {
        let request = http::Request::get(watch_uri(from, timeout))
            .body(Vec::new())
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let events = self.client.request_events::<Pod>(request).await?;

        let stream = events
            .map(convert::decode)
            .take_while(|decoded| {
                if let Decoded::Disconnected(reason) = decoded {
                    tracing::warn!(%reason, "watch connection lost, closing window");
                }
                future::ready(matches!(decoded, Decoded::Item(_)))
            })
            .filter_map(|decoded| {
                future::ready(match decoded {
                    Decoded::Item(item) => Some(item),
                    Decoded::Disconnected(_) => None,
                })
            })
            .boxed();
        Ok(stream)
    }

    async fn delete_pod(&self, key: &PodKey) -> Result<(), DeleteError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), &key.namespace);
        match pods.delete(&key.name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(resp)) if resp.code == 404 => Err(DeleteError::NotFound),
            Err(e) => Err(DeleteError::Api(e.into())),
        }
    }
}

#[cfg(test)]
#[path = "k8s_tests.rs"]
mod tests;
