use std::path::{Path, PathBuf};

use chrono::Local;
use uuid::Uuid;

use crate::domain::PlaceRecord;

pub const OUTPUT_DIR: &str = "data";

const COLUMNS: [&str; 11] = [
    "keyword",
    "country",
    "business_status",
    "formatted_address",
    "formatted_phone_number",
    "international_phone_number",
    "icon",
    "name",
    "place_id",
    "rating",
    "website",
];

// The filename carries a timestamp and a random suffix so concurrent jobs
// never collide
pub fn save_workbook(results: &[PlaceRecord], label: &str) -> anyhow::Result<PathBuf> {
    save_workbook_in(Path::new(OUTPUT_DIR), results, label)
}

pub fn save_workbook_in(
    dir: &Path,
    results: &[PlaceRecord],
    label: &str,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let filename = format!(
        "{}_{}_{}.csv",
        label,
        Local::now().format("%Y%m%d%H%M%S"),
        Uuid::new_v4()
    );
    let path = dir.join(filename);

    let mut writer = csv::WriterBuilder::new().from_path(&path)?;
    writer.write_record(COLUMNS)?;
    for record in results {
        let rating = record.rating.map(|r| r.to_string()).unwrap_or_default();
        writer.write_record([
            label,
            record.country.as_deref().unwrap_or_default(),
            record.business_status.as_deref().unwrap_or_default(),
            record.formatted_address.as_deref().unwrap_or_default(),
            record.formatted_phone_number.as_deref().unwrap_or_default(),
            record.international_phone_number.as_deref().unwrap_or_default(),
            record.icon.as_deref().unwrap_or_default(),
            record.name.as_deref().unwrap_or_default(),
            record.place_id.as_str(),
            rating.as_str(),
            record.website.as_deref().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    Ok(path)
}
