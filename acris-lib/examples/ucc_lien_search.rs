//! Federal lien search example.
//!
//! Run with: cargo run --example ucc_lien_search -- <lien file number> [borough]
//!
//! Requires .env file with:
//! - NYC_OPEN_DATA_APP_TOKEN
//!
//! Set RUST_LOG=acris_lib=debug to see every page request.

use std::env;

use acris_lib::AcrisClient;
use acris_lib::api::UCC_FEDERAL_LIEN;
use acris_lib::dataset::RecordKind;
use acris_lib::model::FilterCriteria;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut args = env::args().skip(1);
    let file_number = args.next().expect("usage: ucc_lien_search <lien file number> [borough]");

    let mut criteria = FilterCriteria::new().with("ssn_lien_file_number", file_number);
    if let Some(borough) = args.next() {
        criteria.insert("borough", borough);
    }

    let client = AcrisClient::from_env()?;

    println!("Searching federal liens...\n");

    let records = client.cross_reference_with(&UCC_FEDERAL_LIEN, &criteria).await?;

    if records.is_empty() {
        println!("No matching documents.");
        return Ok(());
    }

    for record in &records {
        println!("Document {}", record.document_id);
        for kind in RecordKind::ALL {
            if record.is_unavailable(kind) {
                println!("  {:?}: unavailable", kind);
            } else {
                println!("  {:?}: {} rows", kind, record.rows(kind).len());
            }
        }
        for party in &record.parties_records {
            if let Ok(Some(name)) = party.get_str("name") {
                println!("  party: {}", name);
            }
        }
        println!();
    }

    println!("{} documents", records.len());

    Ok(())
}
