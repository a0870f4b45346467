//! JSONL metadata records for training slices.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::errors::SegResult;
use crate::dataset::split::DatasetSplit;

/// One metadata record: a slice image file and its wrapped ground truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceRecord {
    /// File name of the cropped slice image, relative to its split directory.
    pub file_name: String,
    /// Ground truth in the parse-template wrapping the downstream trainer
    /// expects: `{"gt_parse": {"text_sequence": …}}`, serialized to a string.
    pub ground_truth: String,
}

impl SliceRecord {
    /// Creates a record, wrapping the transcription in the ground-truth
    /// template.
    ///
    /// The template is built as a JSON value so the transcription is escaped
    /// properly whatever characters the handwriting contains.
    pub fn new(file_name: impl Into<String>, transcription: &str) -> Self {
        let ground_truth = json!({ "gt_parse": { "text_sequence": transcription } }).to_string();
        Self {
            file_name: file_name.into(),
            ground_truth,
        }
    }
}

/// Writes slice images and metadata records into a split-per-directory
/// dataset layout.
///
/// ```text
/// <root>/train/metadata.jsonl
/// <root>/train/<page>_<i>.jpg
/// <root>/validation/…
/// <root>/test/…
/// ```
#[derive(Debug)]
pub struct MetadataWriter {
    root: PathBuf,
}

impl MetadataWriter {
    /// Creates the writer and the split directories under `root`.
    pub fn new(root: impl Into<PathBuf>) -> SegResult<Self> {
        let root = root.into();
        for split in DatasetSplit::ALL {
            fs::create_dir_all(root.join(split.dir_name()))?;
        }
        Ok(Self { root })
    }

    /// The dataset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where a slice image with the given file name belongs.
    pub fn image_path(&self, split: DatasetSplit, file_name: &str) -> PathBuf {
        self.root.join(split.dir_name()).join(file_name)
    }

    /// Appends one record to the split's `metadata.jsonl`.
    pub fn append(&self, split: DatasetSplit, record: &SliceRecord) -> SegResult<()> {
        let path = self.root.join(split.dir_name()).join("metadata.jsonl");
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wraps_transcription() {
        let record = SliceRecord::new("folio_042_0.jpg", "some handwriting");
        let parsed: serde_json::Value = serde_json::from_str(&record.ground_truth).unwrap();
        assert_eq!(parsed["gt_parse"]["text_sequence"], "some handwriting");
    }

    #[test]
    fn test_record_escapes_quotes() {
        let record = SliceRecord::new("a.jpg", r#"he said "stop""#);
        let parsed: serde_json::Value = serde_json::from_str(&record.ground_truth).unwrap();
        assert_eq!(parsed["gt_parse"]["text_sequence"], r#"he said "stop""#);
    }

    #[test]
    fn test_record_field_names() {
        let record = SliceRecord::new("a.jpg", "text");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("file_name").is_some());
        assert!(value.get("ground_truth").is_some());
    }

    #[test]
    fn test_writer_creates_split_directories() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MetadataWriter::new(dir.path()).unwrap();

        for split in DatasetSplit::ALL {
            assert!(writer.root().join(split.dir_name()).is_dir());
        }
    }

    #[test]
    fn test_append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MetadataWriter::new(dir.path()).unwrap();

        writer
            .append(DatasetSplit::Train, &SliceRecord::new("a.jpg", "first"))
            .unwrap();
        writer
            .append(DatasetSplit::Train, &SliceRecord::new("b.jpg", "second"))
            .unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("train").join("metadata.jsonl")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: SliceRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.file_name, "a.jpg");
    }
}
