use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::StoreError;

const LAST_ID_KEY: &str = "lastId";

/// A persistable entity whose identifier is assigned by its store.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// JSON key the record collection serializes under in the backing file,
    /// e.g. `"products"` in `{ "lastId": 3, "products": [...] }`.
    const COLLECTION: &'static str;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
}

/// Generic in-memory collection of records backed by a single JSON file.
///
/// The store owns id allocation: `last_id` is persisted next to the records,
/// so identifiers stay monotonic across restarts and are never recomputed by
/// scanning the collection (a max-existing-id scan would regress after
/// deleting the highest-id record).
pub struct EntityStore<T: Record> {
    path: PathBuf,
    last_id: u64,
    records: Vec<T>,
}

impl<T: Record> EntityStore<T> {
    /// Open the store at `path`, loading persisted state when the file exists.
    ///
    /// A missing file yields an empty collection and a zero counter. A file
    /// that exists but does not parse as `{lastId, <collection>}` surfaces as
    /// [`StoreError::CorruptPersist`] rather than aborting the process.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                last_id: 0,
                records: Vec::new(),
            });
        }

        let raw = fs::read_to_string(&path)?;
        let (last_id, records) = parse_persisted(&path, &raw)?;
        Ok(Self {
            path,
            last_id,
            records,
        })
    }

    /// Append `record` under a freshly allocated id, flush, and return the id.
    ///
    /// The counter only moves forward; deleted ids are never reissued.
    pub fn add(&mut self, mut record: T) -> Result<u64, StoreError> {
        let id = self.last_id + 1;
        record.set_id(id);
        self.records.push(record);
        self.last_id = id;
        self.flush()?;
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Result<&T, StoreError> {
        self.records
            .iter()
            .find(|record| record.id() == id)
            .ok_or(StoreError::NotFound)
    }

    pub(crate) fn get_mut(&mut self, id: u64) -> Result<&mut T, StoreError> {
        self.records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(StoreError::NotFound)
    }

    /// Full collection in insertion order. Pagination is the caller's job.
    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recently allocated id.
    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    /// Replace every field of the record with `id` except the id itself.
    pub fn update(&mut self, id: u64, mut record: T) -> Result<(), StoreError> {
        let index = self.index_of(id)?;
        record.set_id(id);
        self.records[index] = record;
        self.flush()
    }

    /// Remove the record with `id`, flush, and return the new collection size.
    pub fn delete(&mut self, id: u64) -> Result<usize, StoreError> {
        let index = self.index_of(id)?;
        self.records.remove(index);
        self.flush()?;
        Ok(self.records.len())
    }

    fn index_of(&self, id: u64) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(StoreError::NotFound)
    }

    /// Overwrite the backing file with the full `{lastId, <collection>}` state.
    ///
    /// Writes a sibling temp file and renames it over the target, so a reader
    /// in the same process never observes a partial write.
    pub(crate) fn flush(&self) -> Result<(), StoreError> {
        let mut doc = serde_json::Map::new();
        doc.insert(LAST_ID_KEY.to_string(), Value::from(self.last_id));
        doc.insert(
            T::COLLECTION.to_string(),
            serde_json::to_value(&self.records).map_err(StoreError::Encode)?,
        );
        let body =
            serde_json::to_string_pretty(&Value::Object(doc)).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension(format!("tmp-{}", Uuid::new_v4()));
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn parse_persisted<T: Record>(path: &Path, raw: &str) -> Result<(u64, Vec<T>), StoreError> {
    let corrupt = |reason: String| StoreError::CorruptPersist {
        path: path.to_path_buf(),
        reason,
    };

    let doc: Value = serde_json::from_str(raw).map_err(|err| corrupt(err.to_string()))?;
    let last_id = doc
        .get(LAST_ID_KEY)
        .and_then(Value::as_u64)
        .ok_or_else(|| corrupt(format!("missing or non-integer {LAST_ID_KEY}")))?;
    let records = doc
        .get(T::COLLECTION)
        .cloned()
        .ok_or_else(|| corrupt(format!("missing {} array", T::COLLECTION)))?;
    let records: Vec<T> =
        serde_json::from_value(records).map_err(|err| corrupt(err.to_string()))?;
    Ok((last_id, records))
}
