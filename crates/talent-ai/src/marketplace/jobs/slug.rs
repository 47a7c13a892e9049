use super::super::store::{MarketplaceStore, StorageError};
use super::domain::JobId;

/// Lowercases the title and collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, trimming hyphens at the ends.
pub fn derive_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Derives a unique slug by probing the job table for exact matches,
/// appending `-1`, `-2`, ... until a free candidate is found. The probe
/// recomputes from scratch every call, so it stays correct when earlier
/// suffixes have been deleted.
pub struct SlugAllocator<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> SlugAllocator<'a, S>
where
    S: MarketplaceStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// `exclude` identifies the record being re-slugged during an edit so a
    /// job keeps its own slug when the title is unchanged in normalization.
    pub fn allocate(&self, title: &str, exclude: Option<&JobId>) -> Result<String, StorageError> {
        let base = derive_slug(title);
        let mut candidate = base.clone();
        let mut counter = 1u32;

        while self.store.slug_in_use(&candidate, exclude)? {
            candidate = format!("{base}-{counter}");
            counter += 1;
        }

        Ok(candidate)
    }
}
