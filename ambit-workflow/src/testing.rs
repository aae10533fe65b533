//! In-memory service used by the unit tests
//!
//! Every call is recorded as a label. Submissions answer with a queued task
//! that reports Running once and then its terminal snapshot.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ambit_client::{AmbitApi, ClientError, Result, TrainParameters};
use ambit_core::domain::bundle::{BundleProperties, BundleSubstances, SubstanceRecord};
use ambit_core::domain::dataset::Dataset;
use ambit_core::domain::study::Studies;
use ambit_core::domain::subject::Subject;
use ambit_core::domain::task::{Task, TaskStatus};
use async_trait::async_trait;
use url::Url;

use crate::error::WorkflowError;
use crate::input::InputFetcher;

pub const DATASET_RESULT: &str = "http://ambit.test/dataset/7";
pub const TRAINED_RESULT: &str = "http://ambit.test/dataset/8";
pub const BUNDLE_RESULT: &str = "http://ambit.test/bundle/42";

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<String>>,
    scripts: Mutex<HashMap<String, VecDeque<Task>>>,
    next_id: AtomicUsize,
    owner_substances: Vec<String>,
    failing: HashSet<String>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner_substances(mut self, substances: &[&str]) -> Self {
        self.owner_substances = substances.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Submissions recorded under `label` end in Error
    pub fn failing(mut self, label: &str) -> Self {
        self.failing.insert(label.to_string());
        self
    }

    /// Snapshots returned by successive polls of `task_id`; the last repeats
    pub fn script(&self, task_id: &str, snapshots: Vec<Task>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(task_id.to_string(), snapshots.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    pub fn record(&self, label: impl Into<String>) {
        self.calls.lock().unwrap().push(label.into());
    }

    fn submit(&self, label: String, result: Option<&str>) -> Task {
        let id = format!("task-{}", self.next_id.fetch_add(1, Ordering::SeqCst));

        let terminal = if self.failing.contains(&label) {
            Task::failed(&id, format!("{} rejected", label))
        } else {
            let mut task = Task::new(&id, TaskStatus::Completed);
            task.result = Some(result.unwrap_or("http://ambit.test/ok").to_string());
            task
        };

        self.script(&id, vec![Task::new(&id, TaskStatus::Running), terminal]);
        self.record(label);

        Task::new(id, TaskStatus::Queued)
    }
}

#[async_trait]
impl AmbitApi for FakeApi {
    async fn create_dataset(&self, _file: Vec<u8>, _subject: &Subject) -> Result<Task> {
        Ok(self.submit("create_dataset".to_string(), Some(DATASET_RESULT)))
    }

    async fn get_dataset(&self, dataset_id: &str, _subject: &Subject) -> Result<Dataset> {
        self.record(format!("get_dataset:{}", dataset_id));
        Ok(Dataset {
            dataset_uri: Some(format!("http://ambit.test/dataset/{}", dataset_id)),
            ..Dataset::default()
        })
    }

    async fn get_dataset_structures(
        &self,
        dataset_id: &str,
        _subject: &Subject,
    ) -> Result<Dataset> {
        self.record(format!("get_dataset_structures:{}", dataset_id));
        Ok(Dataset::default())
    }

    async fn train_algorithm(
        &self,
        algorithm: &str,
        parameters: &TrainParameters,
        _subject: &Subject,
    ) -> Result<Task> {
        let dataset_uri = parameters
            .get("dataset_uri")
            .and_then(|values| values.first())
            .cloned()
            .unwrap_or_default();
        Ok(self.submit(
            format!("train:{}:{}", algorithm, dataset_uri),
            Some(TRAINED_RESULT),
        ))
    }

    async fn poll_task(&self, task_id: &str, _subject: &Subject) -> Result<Task> {
        self.record(format!("poll:{}", task_id));

        let mut scripts = self.scripts.lock().unwrap();
        let snapshots = scripts
            .get_mut(task_id)
            .ok_or_else(|| ClientError::NotFound(format!("task {}", task_id)))?;

        if snapshots.len() > 1 {
            Ok(snapshots.pop_front().unwrap())
        } else {
            Ok(snapshots.front().cloned().unwrap())
        }
    }

    async fn create_bundle(
        &self,
        _description: &str,
        _username: &str,
        substance_owner_id: &str,
        _subject: &Subject,
    ) -> Result<Task> {
        Ok(self.submit(
            format!("create_bundle:{}", substance_owner_id),
            Some(BUNDLE_RESULT),
        ))
    }

    async fn attach_substance(
        &self,
        _bundle_id: &str,
        substance_id: &str,
        _subject: &Subject,
    ) -> Result<Task> {
        Ok(self.submit(format!("attach_substance:{}", substance_id), None))
    }

    async fn attach_property(
        &self,
        _bundle_id: &str,
        top_category: &str,
        sub_category: &str,
        _subject: &Subject,
    ) -> Result<Task> {
        Ok(self.submit(
            format!("attach_property:{}/{}", top_category, sub_category),
            None,
        ))
    }

    async fn get_bundle_substances(
        &self,
        bundle_id: &str,
        _subject: &Subject,
    ) -> Result<BundleSubstances> {
        self.record(format!("get_bundle_substances:{}", bundle_id));
        Ok(BundleSubstances {
            substance: vec![SubstanceRecord {
                uri: Some("http://ambit.test/substance/S-1".to_string()),
                ..SubstanceRecord::default()
            }],
            ..BundleSubstances::default()
        })
    }

    async fn get_bundle_properties(
        &self,
        bundle_id: &str,
        _subject: &Subject,
    ) -> Result<BundleProperties> {
        self.record(format!("get_bundle_properties:{}", bundle_id));
        Ok(BundleProperties::default())
    }

    async fn get_owner_substances(
        &self,
        owner_id: &str,
        _subject: &Subject,
    ) -> Result<Vec<String>> {
        self.record(format!("get_owner_substances:{}", owner_id));
        Ok(self.owner_substances.clone())
    }

    async fn get_substance_studies(
        &self,
        substance_id: &str,
        _subject: &Subject,
    ) -> Result<Studies> {
        self.record(format!("get_substance_studies:{}", substance_id));
        Ok(Studies::default())
    }
}

/// Fetcher that logs into the fake service's call list
pub struct FakeFetcher {
    api: Arc<FakeApi>,
    body: Vec<u8>,
    fail: bool,
}

impl FakeFetcher {
    pub fn new(api: Arc<FakeApi>) -> Self {
        Self {
            api,
            body: b"HEADER    PROTEIN".to_vec(),
            fail: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl InputFetcher for FakeFetcher {
    async fn fetch(&self, url: &Url) -> crate::error::Result<Vec<u8>> {
        self.api.record(format!("fetch:{}", url));

        if self.fail {
            return Err(WorkflowError::InputFetchFailed {
                url: url.to_string(),
                message: "server answered 404 Not Found".to_string(),
            });
        }

        Ok(self.body.clone())
    }
}
