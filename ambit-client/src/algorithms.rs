//! Algorithm-related API endpoints

use ambit_core::domain::subject::Subject;
use ambit_core::domain::task::Task;
use reqwest::Method;

use crate::AmbitHttpClient;
use crate::api::TrainParameters;
use crate::error::{ClientError, Result};

impl AmbitHttpClient {
    /// Train an algorithm
    ///
    /// Parameters are sent as a form; keys with several values are repeated.
    ///
    /// # Arguments
    /// * `algorithm` - Algorithm name (e.g., "ambit2.mopac.MopacOriginalStructure")
    /// * `parameters` - Training parameters
    /// * `subject` - Subject the call is made for
    ///
    /// # Returns
    /// The training task; its result is the produced resource URI
    pub async fn train_algorithm(
        &self,
        algorithm: &str,
        parameters: &TrainParameters,
        subject: &Subject,
    ) -> Result<Task> {
        if algorithm.is_empty() {
            return Err(ClientError::InvalidRequest(
                "algorithm name cannot be empty".to_string(),
            ));
        }

        let form: Vec<(&str, &str)> = parameters
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key.as_str(), value.as_str())))
            .collect();

        let path = format!("algorithm/{}", algorithm);
        let response = self
            .request(Method::POST, &path, subject)
            .form(&form)
            .send()
            .await?;

        self.handle_task_response(response).await
    }
}
