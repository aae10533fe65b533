//! Client facade
//!
//! [`AmbitClient`] owns the transport shared by every operation and runs the
//! workflows on behalf of the caller's subject. Closing the client releases
//! the transport; calls still in flight keep their own handle and finish.

use std::sync::Arc;

use ambit_client::{AmbitApi, AmbitHttpClient};
use ambit_core::domain::bundle::{BundleProperties, BundleSpecification, BundleSubstances};
use ambit_core::domain::dataset::Dataset;
use ambit_core::domain::study::Studies;
use ambit_core::domain::subject::Subject;
use anyhow::Context;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{Result, WorkflowError};
use crate::input::{HttpInputFetcher, InputFetcher};
use crate::scheduler::{Orchestrator, TaskPoller};
use crate::workflow::{BundleCreationWorkflow, DescriptorWorkflow};

#[derive(Clone)]
struct Transport {
    api: Arc<dyn AmbitApi>,
    fetcher: Arc<dyn InputFetcher>,
}

/// Entry point for callers of the Ambit service
pub struct AmbitClient {
    transport: RwLock<Option<Transport>>,
    config: ClientConfig,
}

impl AmbitClient {
    /// Connects to the configured service
    ///
    /// A single HTTP client is shared by the API transport and the input
    /// fetcher.
    pub fn connect(config: ClientConfig) -> anyhow::Result<Self> {
        config.validate().context("Invalid client configuration")?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let api = Arc::new(AmbitHttpClient::with_client(&config.base_url, http.clone()));
        let fetcher = Arc::new(HttpInputFetcher::new(http));

        info!(base_url = %config.base_url, "Ambit client ready");
        Ok(Self::with_transport(api, fetcher, config))
    }

    /// Creates a client over the given collaborators
    pub fn with_transport(
        api: Arc<dyn AmbitApi>,
        fetcher: Arc<dyn InputFetcher>,
        config: ClientConfig,
    ) -> Self {
        Self {
            transport: RwLock::new(Some(Transport { api, fetcher })),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn transport(&self) -> Result<Transport> {
        self.transport
            .read()
            .await
            .clone()
            .ok_or(WorkflowError::ClientClosed)
    }

    fn orchestrator(&self, transport: &Transport, subject: &Subject) -> Orchestrator {
        let poller = TaskPoller::new(transport.api.clone(), self.config.poll_policy());
        Orchestrator::new(poller, subject.clone())
    }

    /// Computes descriptors for a structure file
    ///
    /// `input` is either an inline `data:` reference or an http(s) URL.
    pub async fn generate_descriptors(&self, input: &str, subject: &Subject) -> Result<Dataset> {
        let transport = self.transport().await?;
        let orchestrator = self.orchestrator(&transport, subject);

        DescriptorWorkflow::from_config(transport.api, transport.fetcher, &self.config)
            .run(input, &orchestrator)
            .await
    }

    /// Creates a bundle and returns its URI
    pub async fn create_bundle(
        &self,
        spec: BundleSpecification,
        username: &str,
        subject: &Subject,
    ) -> Result<String> {
        let bundle = self.create_bundle_detailed(spec, username, subject).await?;
        Ok(bundle.bundle_uri.unwrap_or_default())
    }

    /// Creates a bundle and returns the resolved specification
    pub async fn create_bundle_detailed(
        &self,
        spec: BundleSpecification,
        username: &str,
        subject: &Subject,
    ) -> Result<BundleSpecification> {
        let transport = self.transport().await?;
        let orchestrator = self.orchestrator(&transport, subject);

        BundleCreationWorkflow::new(transport.api)
            .run(spec, username, &orchestrator)
            .await
    }

    pub async fn get_dataset(&self, dataset_id: &str, subject: &Subject) -> Result<Dataset> {
        let transport = self.transport().await?;
        Ok(transport.api.get_dataset(dataset_id, subject).await?)
    }

    pub async fn get_dataset_structures(
        &self,
        dataset_id: &str,
        subject: &Subject,
    ) -> Result<Dataset> {
        let transport = self.transport().await?;
        Ok(transport.api.get_dataset_structures(dataset_id, subject).await?)
    }

    pub async fn get_bundle_substances(
        &self,
        bundle_id: &str,
        subject: &Subject,
    ) -> Result<BundleSubstances> {
        let transport = self.transport().await?;
        Ok(transport.api.get_bundle_substances(bundle_id, subject).await?)
    }

    pub async fn get_bundle_properties(
        &self,
        bundle_id: &str,
        subject: &Subject,
    ) -> Result<BundleProperties> {
        let transport = self.transport().await?;
        Ok(transport.api.get_bundle_properties(bundle_id, subject).await?)
    }

    pub async fn get_substance_studies(
        &self,
        substance_id: &str,
        subject: &Subject,
    ) -> Result<Studies> {
        let transport = self.transport().await?;
        Ok(transport.api.get_substance_studies(substance_id, subject).await?)
    }

    /// Bundle specification pre-filled with every substance of an owner
    pub async fn get_owner_substances(
        &self,
        owner_id: &str,
        subject: &Subject,
    ) -> Result<BundleSpecification> {
        let transport = self.transport().await?;
        let substances = transport.api.get_owner_substances(owner_id, subject).await?;

        Ok(BundleSpecification::new(owner_id, "").with_substances(substances))
    }

    /// Releases the transport
    ///
    /// Every later operation fails with `ClientClosed`. Closing twice is a no-op.
    pub async fn close(&self) {
        if self.transport.write().await.take().is_some() {
            info!("Ambit client closed");
        } else {
            debug!("Ambit client already closed");
        }
    }

    pub async fn is_closed(&self) -> bool {
        self.transport.read().await.is_none()
    }
}
