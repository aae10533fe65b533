//! Dataset-related API endpoints

use ambit_core::domain::dataset::Dataset;
use ambit_core::domain::subject::Subject;
use ambit_core::domain::task::Task;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::AmbitHttpClient;
use crate::error::Result;

/// File name reported for uploaded structure files
const STRUCTURE_FILE_NAME: &str = "structure.pdb";

impl AmbitHttpClient {
    // =============================================================================
    // Dataset Management
    // =============================================================================

    /// Upload a structure file as a new dataset
    ///
    /// # Arguments
    /// * `file` - Raw bytes of the structure file
    /// * `subject` - Subject the call is made for
    ///
    /// # Returns
    /// The task creating the dataset; its result is the dataset URI
    pub async fn create_dataset(&self, file: Vec<u8>, subject: &Subject) -> Result<Task> {
        let part = Part::bytes(file)
            .file_name(STRUCTURE_FILE_NAME)
            .mime_str("chemical/x-pdb")?;
        let form = Form::new().part("file", part);

        let response = self
            .request(Method::POST, "dataset", subject)
            .multipart(form)
            .send()
            .await?;

        self.handle_task_response(response).await
    }

    /// Get a dataset by ID
    pub async fn get_dataset(&self, dataset_id: &str, subject: &Subject) -> Result<Dataset> {
        let path = format!("dataset/{}", dataset_id);
        let response = self.request(Method::GET, &path, subject).send().await?;

        self.handle_response(response).await
    }

    /// Get the structures (compounds) of a dataset
    pub async fn get_dataset_structures(
        &self,
        dataset_id: &str,
        subject: &Subject,
    ) -> Result<Dataset> {
        let path = format!("dataset/{}/structures", dataset_id);
        let response = self.request(Method::GET, &path, subject).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambit_core::domain::task::TaskStatus;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_dataset_returns_task() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dataset"))
            .and(header("subjectid", "alice"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "task": [{"id": "t-1", "status": "Queued"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AmbitHttpClient::new(server.uri());
        let task = client
            .create_dataset(b"ATOM 1".to_vec(), &Subject::new("alice"))
            .await
            .unwrap();

        assert_eq!(task.id, "t-1");
        assert_eq!(task.status, TaskStatus::Queued);
    }

    #[tokio::test]
    async fn test_get_dataset_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dataset/99"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such dataset"))
            .mount(&server)
            .await;

        let client = AmbitHttpClient::new(server.uri());
        let err = client
            .get_dataset("99", &Subject::new("alice"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("no such dataset"));
    }

    #[tokio::test]
    async fn test_get_dataset_structures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dataset/12/structures"))
            .and(header("subjectid", "alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "dataEntry": [
                    {"compound": {"URI": "http://host/compound/1"}},
                    {"compound": {"URI": "http://host/compound/2"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AmbitHttpClient::new(server.uri());
        let dataset = client
            .get_dataset_structures("12", &Subject::new("alice"))
            .await
            .unwrap();

        assert_eq!(dataset.len(), 2);
    }
}
