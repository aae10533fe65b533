//! Bundle creation
//!
//! Creates a bundle for a substance owner, then attaches substances and
//! property categories to it. Attachments are fanned out as two consecutive
//! groups: substances first, properties second. Items attached before a
//! failure stay attached.

use std::collections::HashSet;
use std::sync::Arc;

use ambit_client::AmbitApi;
use ambit_core::domain::bundle::BundleSpecification;
use ambit_core::domain::protocol::{PropertyMap, default_properties, pair_count};
use ambit_core::domain::subject::Subject;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, WorkflowError};
use crate::locator::{BUNDLE, resource_id};
use crate::scheduler::{GroupStep, Orchestrator, StepOutcome};

pub struct BundleCreationWorkflow {
    api: Arc<dyn AmbitApi>,
}

impl BundleCreationWorkflow {
    pub fn new(api: Arc<dyn AmbitApi>) -> Self {
        Self { api }
    }

    /// Creates and fills a bundle
    ///
    /// Substances default to everything the owner holds and properties to
    /// the full protocol category taxonomy when the specification leaves
    /// them empty. A substance listed more than once is attached once.
    ///
    /// # Returns
    /// The specification with bundle URI, id, substances and properties filled in
    ///
    /// # Errors
    /// * `InvalidBundleSpecification` - blank owner id, nothing is sent
    /// * `BundleAttachFailed` - the bundle exists but resolving or attaching
    ///   its content failed; carries the bundle URI and id
    #[instrument(
        name = "create_bundle",
        skip_all,
        fields(execution_id = %orchestrator.execution_id(), owner = %spec.substance_owner_id)
    )]
    pub async fn run(
        &self,
        mut spec: BundleSpecification,
        username: &str,
        orchestrator: &Orchestrator,
    ) -> Result<BundleSpecification> {
        let owner = spec.substance_owner_id.trim().to_string();
        if owner.is_empty() {
            return Err(WorkflowError::InvalidBundleSpecification(
                "substance owner id is required".to_string(),
            ));
        }

        let api = self.api.as_ref();
        let subject = orchestrator.subject();

        let bundle_uri = orchestrator
            .run_step("create_bundle", async {
                StepOutcome::submitted(
                    api.create_bundle(&spec.description, username, &owner, subject)
                        .await,
                )
            })
            .await?;
        let bundle_id = resource_id(&bundle_uri, BUNDLE)?;
        info!(bundle_id = %bundle_id, "Bundle created");

        spec.bundle_uri = Some(bundle_uri.clone());
        spec.bundle_id = Some(bundle_id.clone());

        let attach_failed = |substances: Vec<String>, source: WorkflowError| {
            warn!(bundle_id = %bundle_id, error = %source, "Bundle left partially filled");
            WorkflowError::BundleAttachFailed {
                bundle_uri: bundle_uri.clone(),
                bundle_id: bundle_id.clone(),
                substances,
                source: Box::new(source),
            }
        };

        let substances = match spec.explicit_substances() {
            Some(substances) => substances.to_vec(),
            None => {
                debug!("No substances given, using every substance of the owner");
                api.get_owner_substances(&owner, subject)
                    .await
                    .map_err(|e| attach_failed(Vec::new(), e.into()))?
            }
        };
        let substances = distinct(substances);

        let properties = match spec.explicit_properties() {
            Some(properties) => properties.clone(),
            None => default_properties().clone(),
        };

        if let Err(source) = attach_all(
            api,
            subject,
            &bundle_id,
            &substances,
            &properties,
            orchestrator,
        )
        .await
        {
            return Err(attach_failed(substances, source));
        }

        spec.substances = Some(substances);
        spec.properties = Some(properties);

        Ok(spec)
    }
}

/// Attaches substances, then properties, as two consecutive groups
async fn attach_all(
    api: &dyn AmbitApi,
    subject: &Subject,
    bundle_id: &str,
    substances: &[String],
    properties: &PropertyMap,
    orchestrator: &Orchestrator,
) -> Result<()> {
    let substance_steps: Vec<GroupStep<'_>> = substances
        .iter()
        .map(move |substance| {
            GroupStep::new(format!("substance:{}", substance), async move {
                StepOutcome::submitted(api.attach_substance(bundle_id, substance, subject).await)
            })
        })
        .collect();
    orchestrator.group(substance_steps).await?;
    debug!(count = substances.len(), "Substances attached");

    let property_steps: Vec<GroupStep<'_>> = properties
        .iter()
        .flat_map(|(top, subs)| subs.iter().map(move |sub| (top.as_str(), sub.as_str())))
        .map(move |(top, sub)| {
            GroupStep::new(format!("property:{}/{}", top, sub), async move {
                StepOutcome::submitted(api.attach_property(bundle_id, top, sub, subject).await)
            })
        })
        .collect();
    orchestrator.group(property_steps).await?;
    debug!(count = pair_count(properties), "Properties attached");

    Ok(())
}

/// Drops repeated substances, keeping the first occurrence
fn distinct(substances: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(substances.len());
    substances
        .into_iter()
        .filter(|substance| seen.insert(substance.clone()))
        .collect()
}
