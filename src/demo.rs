//! Guided walk through every facade operation against a throwaway bucket.

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;

use crate::facade::StorageFacade;
use crate::interfaces::ObjectStore;

pub const BUCKET_PREFIX: &str = "aws-cloudpractitioner-demo";
pub const SAMPLE_FILE: &str = "sample.txt";
pub const DOWNLOAD_FILE: &str = "downloaded_sample.txt";

const STORAGE_CLASSES: [&str; 5] = [
    "STANDARD - For frequently accessed data",
    "STANDARD_IA - For infrequently accessed data",
    "ONEZONE_IA - For non-critical, infrequently accessed data",
    "GLACIER - For archive data (minutes to hours retrieval)",
    "DEEP_ARCHIVE - For long-term archive (12+ hours retrieval)",
];

const BEST_PRACTICES: [&str; 7] = [
    "Use meaningful bucket and object names",
    "Enable versioning for important data",
    "Use lifecycle policies to manage costs",
    "Enable server-side encryption",
    "Use CloudFront for global content delivery",
    "Monitor access with CloudTrail",
    "Implement proper IAM policies",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoOutcome {
    Completed { bucket: String },
    /// Stopped after step 2; nothing was created
    BucketNotCreated { bucket: String },
    /// A step failed part way; `cleaned_up` says whether the bucket was removed afterwards
    Failed { bucket: String, cleaned_up: bool },
}

/// Bucket names must be globally unique, so the demo stamps them with the time.
pub fn demo_bucket_name(now: DateTime<Utc>) -> String {
    format!("{BUCKET_PREFIX}-{}", now.timestamp())
}

pub fn sample_contents(now: DateTime<Utc>) -> String {
    format!(
        "Hello from AWS S3!\n\
         This is a demo file for Cloud Practitioner certification study.\n\
         Created on: {}\n",
        now.to_rfc3339()
    )
}

/// Run the full demonstration, writing progress to `out`.
///
/// Sample files are created in `work_dir` and removed again whatever the outcome.
pub fn run_demo<S, W>(
    facade: &StorageFacade<S>,
    work_dir: &Path,
    out: &mut W,
) -> anyhow::Result<DemoOutcome>
where
    S: ObjectStore,
    W: Write,
{
    let now = Utc::now();
    let bucket = demo_bucket_name(now);

    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "AWS S3 DEMO - Cloud Practitioner Lab")?;
    writeln!(out, "{}", "=".repeat(50))?;

    match run_steps(facade, &bucket, work_dir, now, out) {
        Ok(true) => Ok(DemoOutcome::Completed { bucket }),
        Ok(false) => Ok(DemoOutcome::BucketNotCreated { bucket }),
        Err(e) => {
            writeln!(out, "\nDemo failed: {e:#}")?;
            writeln!(out, "Please check your AWS credentials and permissions.")?;
            let cleaned_up = cleanup_bucket(facade, &bucket, out)?;
            remove_local_files(work_dir)?;
            Ok(DemoOutcome::Failed { bucket, cleaned_up })
        }
    }
}

fn run_steps<S, W>(
    facade: &StorageFacade<S>,
    bucket: &str,
    work_dir: &Path,
    now: DateTime<Utc>,
    out: &mut W,
) -> anyhow::Result<bool>
where
    S: ObjectStore,
    W: Write,
{
    writeln!(out, "\n1. Listing existing buckets...")?;
    facade.list_buckets();

    writeln!(out, "\n2. Creating bucket: {bucket}")?;
    if !facade.create_bucket(bucket) {
        writeln!(out, "Bucket could not be created, skipping the remaining steps.")?;
        return Ok(false);
    }

    let sample = work_dir.join(SAMPLE_FILE);
    std::fs::write(&sample, sample_contents(now))
        .with_context(|| format!("Failed to write sample file {}", sample.display()))?;
    writeln!(out, "Sample file created: {}", sample.display())?;

    writeln!(out, "\n3. Uploading file: {SAMPLE_FILE}")?;
    let key = facade.try_upload_object(&sample, bucket, None)?;

    writeln!(out, "\n4. Listing objects in bucket: {bucket}")?;
    facade.list_objects(bucket, None);

    let download = work_dir.join(DOWNLOAD_FILE);
    writeln!(out, "\n5. Downloading file as: {DOWNLOAD_FILE}")?;
    facade.try_download_object(bucket, &key, &download)?;

    let content = std::fs::read_to_string(&download)
        .with_context(|| format!("Failed to read back {}", download.display()))?;
    writeln!(out, "Downloaded file content preview:")?;
    writeln!(out, "{}", content.lines().next().unwrap_or_default())?;

    writeln!(out, "\n6. Cleaning up resources...")?;
    facade.delete_object(bucket, &key);
    if !facade.delete_bucket(bucket) {
        bail!("bucket '{bucket}' could not be deleted");
    }

    remove_local_files(work_dir)?;
    writeln!(out, "Local files cleaned up")?;
    writeln!(out, "\nDemo completed successfully!")?;
    Ok(true)
}

/// Best-effort removal of a bucket left behind by a failed run.
fn cleanup_bucket<S, W>(
    facade: &StorageFacade<S>,
    bucket: &str,
    out: &mut W,
) -> anyhow::Result<bool>
where
    S: ObjectStore,
    W: Write,
{
    if !facade.bucket_exists(bucket) {
        return Ok(true);
    }

    writeln!(out, "Attempting cleanup...")?;
    if facade.delete_bucket(bucket) {
        writeln!(out, "Cleanup completed")?;
        Ok(true)
    } else {
        writeln!(out, "Manual cleanup may be required for bucket '{bucket}'")?;
        Ok(false)
    }
}

fn remove_local_files(work_dir: &Path) -> anyhow::Result<()> {
    for name in [SAMPLE_FILE, DOWNLOAD_FILE] {
        let path = work_dir.join(name);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to remove {}", path.display()));
            }
        }
    }
    Ok(())
}

/// Reference material printed after the demo: storage classes and habits worth keeping.
pub fn print_reference_notes<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "Additional S3 Notes")?;
    writeln!(out, "{}", "=".repeat(50))?;

    writeln!(out, "\nS3 Storage Classes:")?;
    for class in STORAGE_CLASSES {
        writeln!(out, "  - {class}")?;
    }

    writeln!(out, "\nS3 Best Practices:")?;
    for practice in BEST_PRACTICES {
        writeln!(out, "  - {practice}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bucket_name_uses_unix_seconds() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            demo_bucket_name(now),
            "aws-cloudpractitioner-demo-1704164645"
        );
    }

    #[test]
    fn notes_list_every_storage_class() {
        let mut out = Vec::new();
        print_reference_notes(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("DEEP_ARCHIVE"));
        assert!(text.contains("Enable server-side encryption"));
    }

    #[test]
    fn sample_contents_has_three_lines() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let text = sample_contents(now);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Hello from AWS S3!");
        assert_eq!(
            lines[1],
            "This is a demo file for Cloud Practitioner certification study."
        );
        assert_eq!(lines[2], "Created on: 2024-01-02T03:04:05+00:00");
    }

    #[test]
    fn removing_missing_local_files_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        remove_local_files(dir.path()).unwrap();
    }
}
