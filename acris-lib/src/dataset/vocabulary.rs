//! Filter vocabularies of the ten ACRIS datasets.

use super::Attribute;
use super::Comparison::Exact;
use super::Comparison::Membership;
use super::Comparison::Prefix;
use super::Comparison::Range;
use super::Comparison::Substring;
use super::Dataset;
use super::DatasetDescriptor;
use crate::model::DOCUMENT_ID;

const REAL_MASTER: &[Attribute] = &[
    Attribute::new("document_id", Prefix),
    Attribute::new("record_type", Exact),
    Attribute::new("crfn", Exact),
    Attribute::new("recorded_borough", Exact).numeric(),
    Attribute::new("doc_type", Membership),
    Attribute::new("document_date", Range),
    Attribute::new("document_amt", Range).numeric(),
    Attribute::new("recorded_datetime", Range),
    Attribute::new("modified_date", Range),
    Attribute::new("reel_yr", Exact).numeric(),
    Attribute::new("reel_nbr", Exact).numeric(),
    Attribute::new("reel_pg", Exact).numeric(),
    Attribute::new("percent_trans", Exact).numeric(),
    Attribute::new("good_through_date", Range),
];

const PERSONAL_MASTER: &[Attribute] = &[
    Attribute::new("document_id", Prefix),
    Attribute::new("record_type", Exact),
    Attribute::new("crfn", Exact),
    Attribute::new("recorded_borough", Exact).numeric(),
    Attribute::new("doc_type", Membership),
    Attribute::new("document_amt", Range).numeric(),
    Attribute::new("recorded_datetime", Range),
    Attribute::new("ucc_collateral", Exact),
    Attribute::mapped("ssn_lien_file_number", "file_nbr", Exact),
    Attribute::new("file_nbr", Exact),
    Attribute::new("fedtax_serial_nbr", Exact),
    Attribute::new("fedtax_assessment_date", Range),
    Attribute::new("rpttl_nbr", Exact).numeric(),
    Attribute::new("modified_date", Range),
    Attribute::new("reel_yr", Exact).numeric(),
    Attribute::new("reel_nbr", Exact).numeric(),
    Attribute::new("reel_pg", Exact).numeric(),
    Attribute::new("good_through_date", Range),
];

const REAL_LEGALS: &[Attribute] = &[
    Attribute::new("borough", Exact).numeric(),
    Attribute::new("block", Exact).numeric(),
    Attribute::new("lot", Exact).numeric(),
    Attribute::new("record_type", Exact),
    Attribute::new("easement", Exact),
    Attribute::new("partial_lot", Exact),
    Attribute::new("air_rights", Exact),
    Attribute::new("subterranean_rights", Exact),
    Attribute::new("property_type", Membership),
    Attribute::new("street_number", Exact),
    Attribute::new("street_name", Substring),
    Attribute::new("unit", Exact),
    Attribute::new("good_through_date", Range),
];

const PERSONAL_LEGALS: &[Attribute] = &[
    Attribute::new("borough", Exact).numeric(),
    Attribute::new("block", Exact).numeric(),
    Attribute::new("lot", Exact).numeric(),
    Attribute::new("record_type", Exact),
    Attribute::new("easement", Exact),
    Attribute::new("partial_lot", Exact),
    Attribute::new("air_rights", Exact),
    Attribute::new("subterranean_rights", Exact),
    Attribute::new("property_type", Membership),
    Attribute::new("street_number", Exact),
    Attribute::new("street_name", Substring),
    Attribute::mapped("unit", "addr_unit", Exact),
    Attribute::new("good_through_date", Range),
];

const PARTIES: &[Attribute] = &[
    Attribute::new("record_type", Exact),
    Attribute::new("party_type", Exact).numeric(),
    Attribute::new("name", Substring),
    Attribute::new("address_1", Substring),
    Attribute::new("address_2", Substring),
    Attribute::new("country", Exact),
    Attribute::new("city", Exact),
    Attribute::new("state", Exact),
    Attribute::new("zip", Exact),
    Attribute::new("good_through_date", Range),
];

const REFERENCES: &[Attribute] = &[
    Attribute::new("record_type", Exact),
    Attribute::new("reference_by_crfn_", Exact),
    Attribute::new("reference_by_doc_id", Exact),
    Attribute::new("reference_by_reel_year", Exact).numeric(),
    Attribute::new("reference_by_reel_borough", Exact).numeric(),
    Attribute::new("reference_by_reel_nbr", Exact).numeric(),
    Attribute::new("reference_by_reel_page", Exact).numeric(),
    Attribute::new("good_through_date", Range),
];

const REMARKS: &[Attribute] = &[
    Attribute::new("record_type", Exact),
    Attribute::new("sequence_number", Exact).numeric(),
    Attribute::new("remark_text", Substring),
    Attribute::new("good_through_date", Range),
];

const fn descriptor(
    dataset: Dataset,
    key: &'static str,
    name: &'static str,
    resource_id: &'static str,
    vocabulary: &'static [Attribute],
) -> DatasetDescriptor {
    DatasetDescriptor {
        dataset,
        key,
        name,
        resource_id,
        id_column: DOCUMENT_ID,
        vocabulary,
    }
}

/// Indexed by `Dataset as usize`.
pub(super) static DESCRIPTORS: [DatasetDescriptor; 10] = [
    descriptor(
        Dataset::RealPropertyMaster,
        "real_property_master",
        "Real Property Master",
        "bnx9-e6tj",
        REAL_MASTER,
    ),
    descriptor(
        Dataset::RealPropertyLegals,
        "real_property_legals",
        "Real Property Legals",
        "8h5j-fqxa",
        REAL_LEGALS,
    ),
    descriptor(
        Dataset::RealPropertyParties,
        "real_property_parties",
        "Real Property Parties",
        "636b-3b5g",
        PARTIES,
    ),
    descriptor(
        Dataset::RealPropertyReferences,
        "real_property_references",
        "Real Property References",
        "pwkr-dpni",
        REFERENCES,
    ),
    descriptor(
        Dataset::RealPropertyRemarks,
        "real_property_remarks",
        "Real Property Remarks",
        "9p4w-7npp",
        REMARKS,
    ),
    descriptor(
        Dataset::PersonalPropertyMaster,
        "personal_property_master",
        "Personal Property Master",
        "sv7x-dduq",
        PERSONAL_MASTER,
    ),
    descriptor(
        Dataset::PersonalPropertyLegals,
        "personal_property_legals",
        "Personal Property Legals",
        "uqqa-hym2",
        PERSONAL_LEGALS,
    ),
    descriptor(
        Dataset::PersonalPropertyParties,
        "personal_property_parties",
        "Personal Property Parties",
        "nbbg-wtuz",
        PARTIES,
    ),
    descriptor(
        Dataset::PersonalPropertyReferences,
        "personal_property_references",
        "Personal Property References",
        "6y3e-jcrc",
        REFERENCES,
    ),
    descriptor(
        Dataset::PersonalPropertyRemarks,
        "personal_property_remarks",
        "Personal Property Remarks",
        "fuzi-5ks9",
        REMARKS,
    ),
];
