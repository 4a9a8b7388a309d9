//! Cross-reference orchestration
//!
//! A cross-reference finds the documents matching criteria on an anchor dataset, restricts
//! them to those also matching criteria on a filter dataset, then assembles every row the
//! property type's five datasets hold for each surviving document.
//!
//! The anchor lookup and the cross-reference are mandatory: a failure in either aborts the
//! call with a [`CrossReferenceError`]. The final fan-out tolerates per-dataset failures and
//! marks the affected record kinds as unavailable.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::info;

use crate::AcrisClient;
use crate::api::query::PageWindow;
use crate::api::query::Projection;
use crate::dataset::Dataset;
use crate::dataset::PropertyType;
use crate::error::ConfigError;
use crate::error::CrossReferenceError;
use crate::error::Error;
use crate::error::FetchError;
use crate::error::Stage;
use crate::model::CompositeRecord;
use crate::model::FilterCriteria;
use crate::model::group_by_document;

/// A fixed pairing of anchor and filter datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossReferencePlan {
    /// Name used in logs.
    pub name: &'static str,
    /// Dataset whose matches seed the identifier set.
    pub anchor: Dataset,
    /// Dataset the anchor identifiers are checked against.
    pub filter: Dataset,
    /// Criteria keys the anchor lookup cannot run without.
    pub required: &'static [&'static str],
}

/// UCC and federal lien filings by lien file number, restricted by parcel.
pub const UCC_FEDERAL_LIEN: CrossReferencePlan = CrossReferencePlan::new(
    "ucc_federal_lien",
    Dataset::PersonalPropertyMaster,
    Dataset::PersonalPropertyLegals,
    &["ssn_lien_file_number"],
);

/// Real property documents by party name, restricted by parcel.
pub const REAL_PROPERTY_PARTY: CrossReferencePlan = CrossReferencePlan::new(
    "real_property_party",
    Dataset::RealPropertyParties,
    Dataset::RealPropertyLegals,
    &["name"],
);

/// Real property documents on a parcel, restricted by document attributes.
pub const REAL_PROPERTY_PARCEL: CrossReferencePlan = CrossReferencePlan::new(
    "real_property_parcel",
    Dataset::RealPropertyLegals,
    Dataset::RealPropertyMaster,
    &["borough", "block"],
);

/// Personal property documents by party name, restricted by parcel.
pub const PERSONAL_PROPERTY_PARTY: CrossReferencePlan = CrossReferencePlan::new(
    "personal_property_party",
    Dataset::PersonalPropertyParties,
    Dataset::PersonalPropertyLegals,
    &["name"],
);

impl CrossReferencePlan {
    /// Creates a plan.
    ///
    /// Both datasets must belong to the same property type.
    pub const fn new(
        name: &'static str,
        anchor: Dataset,
        filter: Dataset,
        required: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            anchor,
            filter,
            required,
        }
    }

    /// Returns the property type whose datasets take part in the fan-out.
    pub fn property_type(&self) -> PropertyType {
        self.anchor.property_type()
    }

    /// Returns the datasets every composite record draws from.
    pub fn participants(&self) -> [Dataset; 5] {
        Dataset::for_property(self.property_type())
    }

    /// Checks that every required anchor field is present.
    pub fn validate(&self, anchor_criteria: &FilterCriteria) -> Result<(), ConfigError> {
        match self.required.iter().find(|key| !anchor_criteria.contains(key)) {
            Some(key) => Err(ConfigError::missing_field(*key)),
            None => Ok(()),
        }
    }

    fn stage_error(&self, stage: Stage, source: FetchError) -> CrossReferenceError {
        CrossReferenceError::new(stage, self.anchor, self.filter, source)
    }
}

impl AcrisClient {
    /// Runs a cross-reference and assembles one composite record per surviving document.
    ///
    /// Records come out in the order the anchor dataset returned the documents.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let anchor = FilterCriteria::new().with("ssn_lien_file_number", "12345");
    /// let filter = FilterCriteria::new().with("borough", "1");
    ///
    /// let records = client.cross_reference(&UCC_FEDERAL_LIEN, &anchor, &filter).await?;
    /// for record in &records {
    ///     println!("{}: {} parties", record.document_id, record.parties_records.len());
    /// }
    /// ```
    pub async fn cross_reference(
        &self,
        plan: &CrossReferencePlan,
        anchor_criteria: &FilterCriteria,
        filter_criteria: &FilterCriteria,
    ) -> Result<Vec<CompositeRecord>, Error> {
        let ids = self
            .cross_reference_ids(plan, anchor_criteria, filter_criteria)
            .await?;
        Ok(self.composite_records(plan.property_type(), &ids).await)
    }

    /// Runs a cross-reference with one set of criteria for both datasets.
    ///
    /// Each dataset picks the keys its vocabulary recognizes.
    pub async fn cross_reference_with(
        &self,
        plan: &CrossReferencePlan,
        criteria: &FilterCriteria,
    ) -> Result<Vec<CompositeRecord>, Error> {
        self.cross_reference(plan, criteria, criteria).await
    }

    /// Returns the documents matching the anchor criteria that also match the filter
    /// criteria, in anchor order.
    pub async fn cross_reference_ids(
        &self,
        plan: &CrossReferencePlan,
        anchor_criteria: &FilterCriteria,
        filter_criteria: &FilterCriteria,
    ) -> Result<Vec<String>, Error> {
        plan.validate(anchor_criteria)?;

        let anchor_request = self.request(
            plan.anchor,
            anchor_criteria,
            Projection::field(plan.anchor.descriptor().id_column),
            PageWindow::default(),
        )?;
        // Resolved before any request goes out so a bad filter never costs an anchor fetch.
        let base = plan.filter.descriptor().build_predicates(filter_criteria)?;

        info!(plan = plan.name, anchor = %plan.anchor, "collecting anchor identifiers");
        let anchor_ids = self
            .fetch_ids(&anchor_request)
            .await
            .map_err(|e| plan.stage_error(Stage::Anchor, e))?;

        if anchor_ids.is_empty() {
            info!(plan = plan.name, "anchor matched no documents");
            return Ok(Vec::new());
        }

        let requests = self.plan_id_batches(
            plan.filter,
            &base,
            &anchor_ids,
            Projection::field(plan.filter.descriptor().id_column),
        )?;
        info!(
            plan = plan.name,
            filter = %plan.filter,
            candidates = anchor_ids.len(),
            batches = requests.len(),
            "cross-referencing"
        );

        let matched: HashSet<String> = self
            .fetch_batched_ids(&requests)
            .await
            .map_err(|e| plan.stage_error(Stage::CrossReference, e))?
            .into_iter()
            .collect();

        let ids: Vec<String> = anchor_ids
            .into_iter()
            .filter(|id| matched.contains(id))
            .collect();
        info!(plan = plan.name, documents = ids.len(), "cross-reference complete");
        Ok(ids)
    }

    /// Fetches every row of the given documents from the five datasets of a property type
    /// and groups them per document.
    ///
    /// The five fetches run concurrently. A dataset that fails contributes no rows and is
    /// listed in each record's `unavailable` kinds.
    pub async fn composite_records(&self, property: PropertyType, ids: &[String]) -> Vec<CompositeRecord> {
        if ids.is_empty() {
            return Vec::new();
        }

        let fetches = Dataset::for_property(property).map(|dataset| async move {
            (dataset, self.fetch_records_by_ids(dataset, ids).await)
        });
        let results = join_all(fetches).await;

        let records = group_by_document(ids, results);
        info!(
            documents = records.len(),
            incomplete = records.iter().filter(|r| !r.is_complete()).count(),
            "assembled composite records"
        );
        records
    }
}
