//! The owning pairing of a container and its pagination controller.

use std::sync::Arc;

use crate::collections::ObservableVec;
use crate::error::Result;
use crate::pager::Pager;
use crate::source::CollectionSource;

/// A container together with a [`Pager`] bound to it.
///
/// `Paged` performs the one-time binding between the two in its
/// constructor; for the pager's lifetime the container cannot be swapped
/// out. Mutations go through [`collection`](Self::collection) and
/// pagination queries and navigation through [`pager`](Self::pager).
///
/// # Example
///
/// ```
/// use folio::{Paged, ObservableSortedSet};
///
/// let set = ObservableSortedSet::new();
/// set.insert(3);
/// set.insert(1);
/// set.insert(2);
///
/// let paged = Paged::new(2, set).unwrap();
/// assert_eq!(paged.pager().page_view(), vec![1, 2]);
/// ```
pub struct Paged<T, C>
where
    C: CollectionSource<T> + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    collection: Arc<C>,
    pager: Pager<T>,
}

impl<T, C> Paged<T, C>
where
    C: CollectionSource<T> + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates a paged view over `collection` with the given page size.
    ///
    /// Returns [`Error::InvalidPageSize`](crate::Error::InvalidPageSize)
    /// if `page_size` is zero.
    pub fn new(page_size: usize, collection: C) -> Result<Self> {
        Self::from_arc(page_size, Arc::new(collection))
    }

    /// Creates a paged view over an already shared container.
    ///
    /// The container may keep being mutated through other clones of the
    /// `Arc`; the pager stays synchronized regardless of which handle the
    /// mutation goes through.
    pub fn from_arc(page_size: usize, collection: Arc<C>) -> Result<Self> {
        let pager = Pager::new(page_size)?;
        pager.bind(collection.clone());
        Ok(Self { collection, pager })
    }

    /// The underlying container.
    pub fn collection(&self) -> &Arc<C> {
        &self.collection
    }

    /// The pagination controller bound to the container.
    pub fn pager(&self) -> &Pager<T> {
        &self.pager
    }
}

/// A paged [`ObservableVec`], the most common pairing.
pub type PagedVec<T> = Paged<T, ObservableVec<T>>;

impl<T> PagedVec<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates a paged vector seeded with `items`.
    ///
    /// # Example
    ///
    /// ```
    /// use folio::PagedVec;
    ///
    /// let paged = PagedVec::from_items(3, vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(paged.pager().page_count(), 2);
    /// assert_eq!(paged.pager().page_view(), vec![1, 2, 3]);
    /// ```
    pub fn from_items(page_size: usize, items: Vec<T>) -> Result<Self> {
        Self::new(page_size, ObservableVec::from_vec(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_container_stays_synchronized() {
        let shared = Arc::new(ObservableVec::from_vec(vec![1, 2]));
        let paged = Paged::from_arc(2, shared.clone()).unwrap();

        // Mutate through the outside handle, not through the Paged.
        shared.push(3);
        assert_eq!(paged.pager().page_count(), 2);
    }

    #[test]
    fn test_paged_vec_from_items() {
        let paged = PagedVec::from_items(2, vec!["a", "b", "c"]).unwrap();
        assert_eq!(paged.pager().page_count(), 2);
        assert_eq!(paged.pager().page_view(), vec!["a", "b"]);
        assert_eq!(paged.collection().len(), 3);
    }
}
