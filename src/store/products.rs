use std::path::PathBuf;

use crate::error::StoreError;
use crate::models::Product;

use super::entity::{EntityStore, Record};

impl Record for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Product codes compare trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Validated input for creating or replacing a product. All fields except
/// `category` and `status` are mandatory.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub code: String,
    pub stock: u32,
    pub category: Option<String>,
    pub status: Option<bool>,
}

impl ProductDraft {
    fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Validation("title must not be empty".into()));
        }
        if self.code.trim().is_empty() {
            return Err(StoreError::Validation("code must not be empty".into()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(StoreError::Validation(
                "price must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    fn into_product(self) -> Product {
        let code = normalize_code(&self.code);
        Product {
            id: 0,
            title: self.title,
            description: self.description,
            price: self.price,
            thumbnail: self.thumbnail,
            code,
            stock: self.stock,
            category: self.category,
            status: self.status,
        }
    }
}

/// File-backed product collection enforcing code uniqueness.
pub struct ProductStore {
    inner: EntityStore<Product>,
}

impl ProductStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: EntityStore::open(path)?,
        })
    }

    /// Validate and add a product, returning the assigned id.
    ///
    /// The duplicate-code check runs before allocation, so a rejected add
    /// consumes no id and writes nothing to the backing file.
    pub fn add(&mut self, draft: ProductDraft) -> Result<u64, StoreError> {
        draft.validate()?;
        let code = normalize_code(&draft.code);
        if self.find_by_code(&code).is_ok() {
            return Err(StoreError::DuplicateCode(code));
        }
        self.inner.add(draft.into_product())
    }

    /// Equality lookup on the normalized code.
    pub fn find_by_code(&self, code: &str) -> Result<&Product, StoreError> {
        let code = normalize_code(code);
        self.inner
            .all()
            .iter()
            .find(|product| product.code == code)
            .ok_or(StoreError::NotFound)
    }

    pub fn get(&self, id: u64) -> Result<&Product, StoreError> {
        self.inner.get(id)
    }

    pub fn all(&self) -> &[Product] {
        self.inner.all()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn last_id(&self) -> u64 {
        self.inner.last_id()
    }

    /// Replace every field of the product with `id` except the id itself.
    /// The code-uniqueness invariant holds across updates as well: moving a
    /// product onto another product's code is rejected.
    pub fn update(&mut self, id: u64, draft: ProductDraft) -> Result<(), StoreError> {
        self.inner.get(id)?;
        draft.validate()?;
        let code = normalize_code(&draft.code);
        if self
            .inner
            .all()
            .iter()
            .any(|product| product.code == code && product.id != id)
        {
            return Err(StoreError::DuplicateCode(code));
        }
        self.inner.update(id, draft.into_product())
    }

    pub fn delete(&mut self, id: u64) -> Result<usize, StoreError> {
        self.inner.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(code: &str) -> ProductDraft {
        ProductDraft {
            title: "producto prueba".to_string(),
            description: "Este es un producto prueba".to_string(),
            price: 200.0,
            thumbnail: "Sin imagen".to_string(),
            code: code.to_string(),
            stock: 25,
            category: None,
            status: None,
        }
    }

    fn open_store(dir: &tempfile::TempDir) -> ProductStore {
        ProductStore::open(dir.path().join("products.json")).expect("open store")
    }

    #[test]
    fn first_add_in_an_empty_store_gets_id_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        assert!(store.is_empty());

        let id = store.add(draft("abc123")).unwrap();
        assert_eq!(id, 1);

        let all = store.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 1);
        assert_eq!(all[0].code, "ABC123");
    }

    #[test]
    fn duplicate_code_is_rejected_without_consuming_an_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        store.add(draft("abc123")).unwrap();

        let result = store.add(draft("abc123"));
        assert!(matches!(result, Err(StoreError::DuplicateCode(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(store.last_id(), 1);

        // The next successful add continues where allocation left off.
        assert_eq!(store.add(draft("xyz789")).unwrap(), 2);
    }

    #[test]
    fn codes_are_compared_after_trim_and_uppercase() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        store.add(draft("abc123")).unwrap();

        assert!(matches!(
            store.add(draft("  ABC123  ")),
            Err(StoreError::DuplicateCode(_))
        ));
        assert_eq!(store.find_by_code(" abc123 ").unwrap().id, 1);
        assert!(store.find_by_code("missing").is_err());
    }

    #[test]
    fn missing_mandatory_fields_fail_before_any_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);

        let mut no_title = draft("aaa111");
        no_title.title = "   ".to_string();
        assert!(matches!(
            store.add(no_title),
            Err(StoreError::Validation(_))
        ));

        let mut negative_price = draft("bbb222");
        negative_price.price = -1.0;
        assert!(matches!(
            store.add(negative_price),
            Err(StoreError::Validation(_))
        ));

        assert!(store.is_empty());
        assert_eq!(store.last_id(), 0);
    }

    #[test]
    fn update_preserves_id_and_enforces_code_uniqueness() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let first = store.add(draft("aaa111")).unwrap();
        let second = store.add(draft("bbb222")).unwrap();

        let mut patch = draft("aaa111");
        patch.title = "Producto actualizado".to_string();
        patch.price = 111.0;
        store.update(first, patch).unwrap();

        let updated = store.get(first).unwrap();
        assert_eq!(updated.id, first);
        assert_eq!(updated.title, "Producto actualizado");
        assert_eq!(updated.price, 111.0);

        // Moving the second product onto the first one's code is a collision.
        assert!(matches!(
            store.update(second, draft("aaa111")),
            Err(StoreError::DuplicateCode(_))
        ));
        // Re-submitting a product under its own code is not.
        store.update(first, draft("aaa111")).unwrap();
    }

    #[test]
    fn delete_then_add_never_reissues_the_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let id = store.add(draft("aaa111")).unwrap();
        assert_eq!(store.delete(id).unwrap(), 0);

        let next = store.add(draft("bbb222")).unwrap();
        assert_ne!(next, id);
        assert_eq!(next, 2);
        assert!(matches!(store.delete(id), Err(StoreError::NotFound)));
    }

    #[test]
    fn reload_preserves_products_and_counter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        let mut store = ProductStore::open(&path).unwrap();
        store.add(draft("aaa111")).unwrap();
        store.add(draft("bbb222")).unwrap();
        store.delete(2).unwrap();

        let mut reloaded = ProductStore::open(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.last_id(), 2);
        assert_eq!(reloaded.add(draft("ccc333")).unwrap(), 3);
        assert!(matches!(
            reloaded.add(draft("aaa111")),
            Err(StoreError::DuplicateCode(_))
        ));
    }
}
