//! Descriptor generation
//!
//! Uploads a structure file as a dataset, runs the descriptor algorithm on
//! it and fetches the dataset the algorithm produced.

use std::sync::Arc;

use ambit_client::{AmbitApi, TrainParameters};
use ambit_core::domain::dataset::Dataset;
use tracing::{info, instrument};

use crate::config::ClientConfig;
use crate::error::{Result, WorkflowError};
use crate::input::{InputFetcher, InputReference};
use crate::locator::{DATASET, resource_id};
use crate::scheduler::{Orchestrator, SequenceStep, StepOutcome};

/// Parameters handed to the descriptor algorithm
pub fn training_parameters(dataset_uri: String, commands: &str) -> TrainParameters {
    let mut parameters = TrainParameters::new();
    parameters.insert("dataset_uri".to_string(), vec![dataset_uri]);
    parameters.insert("mopac_commands".to_string(), vec![commands.to_string()]);
    parameters
}

pub struct DescriptorWorkflow {
    api: Arc<dyn AmbitApi>,
    fetcher: Arc<dyn InputFetcher>,
    algorithm: String,
    commands: String,
}

impl DescriptorWorkflow {
    pub fn new(
        api: Arc<dyn AmbitApi>,
        fetcher: Arc<dyn InputFetcher>,
        algorithm: impl Into<String>,
        commands: impl Into<String>,
    ) -> Self {
        Self {
            api,
            fetcher,
            algorithm: algorithm.into(),
            commands: commands.into(),
        }
    }

    /// Creates a workflow using the configured algorithm and commands
    pub fn from_config(
        api: Arc<dyn AmbitApi>,
        fetcher: Arc<dyn InputFetcher>,
        config: &ClientConfig,
    ) -> Self {
        Self::new(
            api,
            fetcher,
            config.descriptor_algorithm.clone(),
            config.descriptor_commands.clone(),
        )
    }

    /// Computes descriptors for the structure behind `input`
    ///
    /// # Arguments
    /// * `input` - inline `data:` reference or http(s) URL of the structure file
    /// * `orchestrator` - execution the steps run in
    ///
    /// # Returns
    /// The dataset produced by the descriptor algorithm
    #[instrument(
        name = "generate_descriptors",
        skip_all,
        fields(execution_id = %orchestrator.execution_id())
    )]
    pub async fn run(&self, input: &str, orchestrator: &Orchestrator) -> Result<Dataset> {
        let file = InputReference::parse(input)?
            .into_bytes(self.fetcher.as_ref())
            .await?;

        let api = self.api.as_ref();
        let subject = orchestrator.subject();
        let algorithm = self.algorithm.as_str();
        let commands = self.commands.as_str();

        let steps = vec![
            SequenceStep::new("create_dataset", move |_| async move {
                StepOutcome::submitted(api.create_dataset(file, subject).await)
            }),
            SequenceStep::new("train_algorithm", move |input| async move {
                let Some(dataset_uri) = input else {
                    return Err(WorkflowError::MissingInput {
                        step: "train_algorithm".to_string(),
                    });
                };

                let parameters = training_parameters(dataset_uri, commands);
                StepOutcome::submitted(api.train_algorithm(algorithm, &parameters, subject).await)
            }),
        ];

        let locator = orchestrator
            .sequence(steps)
            .await?
            .ok_or_else(|| WorkflowError::MissingInput {
                step: "get_dataset".to_string(),
            })?;

        let dataset_id = resource_id(&locator, DATASET)?;
        info!(dataset_id = %dataset_id, "Descriptors computed");

        Ok(api.get_dataset(&dataset_id, subject).await?)
    }
}
