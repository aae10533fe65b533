//! Remote operation contract
//!
//! [`AmbitApi`] lists every call the workflow engine makes against the
//! service. Submissions answer with a [`Task`] handle that may still be
//! running; lookups answer with the resource itself.

use std::collections::BTreeMap;

use ambit_core::domain::bundle::{BundleProperties, BundleSubstances};
use ambit_core::domain::dataset::Dataset;
use ambit_core::domain::study::Studies;
use ambit_core::domain::subject::Subject;
use ambit_core::domain::task::Task;
use async_trait::async_trait;

use crate::AmbitHttpClient;
use crate::error::Result;

/// Algorithm training parameters; each key may carry several values
pub type TrainParameters = BTreeMap<String, Vec<String>>;

/// Remote operations offered by the service
#[async_trait]
pub trait AmbitApi: Send + Sync {
    /// Submits a structure file as a new dataset
    async fn create_dataset(&self, file: Vec<u8>, subject: &Subject) -> Result<Task>;

    async fn get_dataset(&self, dataset_id: &str, subject: &Subject) -> Result<Dataset>;

    async fn get_dataset_structures(&self, dataset_id: &str, subject: &Subject)
    -> Result<Dataset>;

    /// Starts training `algorithm` with the given parameters
    async fn train_algorithm(
        &self,
        algorithm: &str,
        parameters: &TrainParameters,
        subject: &Subject,
    ) -> Result<Task>;

    /// Fetches the current status snapshot of a task
    async fn poll_task(&self, task_id: &str, subject: &Subject) -> Result<Task>;

    async fn create_bundle(
        &self,
        description: &str,
        username: &str,
        substance_owner_id: &str,
        subject: &Subject,
    ) -> Result<Task>;

    async fn attach_substance(
        &self,
        bundle_id: &str,
        substance_id: &str,
        subject: &Subject,
    ) -> Result<Task>;

    async fn attach_property(
        &self,
        bundle_id: &str,
        top_category: &str,
        sub_category: &str,
        subject: &Subject,
    ) -> Result<Task>;

    async fn get_bundle_substances(
        &self,
        bundle_id: &str,
        subject: &Subject,
    ) -> Result<BundleSubstances>;

    async fn get_bundle_properties(
        &self,
        bundle_id: &str,
        subject: &Subject,
    ) -> Result<BundleProperties>;

    /// Lists the identifiers of every substance owned by `owner_id`
    async fn get_owner_substances(&self, owner_id: &str, subject: &Subject)
    -> Result<Vec<String>>;

    async fn get_substance_studies(&self, substance_id: &str, subject: &Subject)
    -> Result<Studies>;
}

#[async_trait]
impl AmbitApi for AmbitHttpClient {
    async fn create_dataset(&self, file: Vec<u8>, subject: &Subject) -> Result<Task> {
        AmbitHttpClient::create_dataset(self, file, subject).await
    }

    async fn get_dataset(&self, dataset_id: &str, subject: &Subject) -> Result<Dataset> {
        AmbitHttpClient::get_dataset(self, dataset_id, subject).await
    }

    async fn get_dataset_structures(
        &self,
        dataset_id: &str,
        subject: &Subject,
    ) -> Result<Dataset> {
        AmbitHttpClient::get_dataset_structures(self, dataset_id, subject).await
    }

    async fn train_algorithm(
        &self,
        algorithm: &str,
        parameters: &TrainParameters,
        subject: &Subject,
    ) -> Result<Task> {
        AmbitHttpClient::train_algorithm(self, algorithm, parameters, subject).await
    }

    async fn poll_task(&self, task_id: &str, subject: &Subject) -> Result<Task> {
        AmbitHttpClient::get_task(self, task_id, subject).await
    }

    async fn create_bundle(
        &self,
        description: &str,
        username: &str,
        substance_owner_id: &str,
        subject: &Subject,
    ) -> Result<Task> {
        AmbitHttpClient::create_bundle(self, description, username, substance_owner_id, subject)
            .await
    }

    async fn attach_substance(
        &self,
        bundle_id: &str,
        substance_id: &str,
        subject: &Subject,
    ) -> Result<Task> {
        AmbitHttpClient::attach_substance(self, bundle_id, substance_id, subject).await
    }

    async fn attach_property(
        &self,
        bundle_id: &str,
        top_category: &str,
        sub_category: &str,
        subject: &Subject,
    ) -> Result<Task> {
        AmbitHttpClient::attach_property(self, bundle_id, top_category, sub_category, subject)
            .await
    }

    async fn get_bundle_substances(
        &self,
        bundle_id: &str,
        subject: &Subject,
    ) -> Result<BundleSubstances> {
        AmbitHttpClient::get_bundle_substances(self, bundle_id, subject).await
    }

    async fn get_bundle_properties(
        &self,
        bundle_id: &str,
        subject: &Subject,
    ) -> Result<BundleProperties> {
        AmbitHttpClient::get_bundle_properties(self, bundle_id, subject).await
    }

    async fn get_owner_substances(
        &self,
        owner_id: &str,
        subject: &Subject,
    ) -> Result<Vec<String>> {
        AmbitHttpClient::get_owner_substances(self, owner_id, subject).await
    }

    async fn get_substance_studies(
        &self,
        substance_id: &str,
        subject: &Subject,
    ) -> Result<Studies> {
        AmbitHttpClient::get_substance_studies(self, substance_id, subject).await
    }
}
