//! Page-of-results envelope.

use serde::Serialize;

/// The paged result wrapper returned to callers, built by adapting whatever
/// paging primitive the store adapter produces. Purely structural; the engine
/// never creates one itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub page_size: u32,
    pub page_number: u32,
}

impl<T> Page<T> {
    /// Wrap one page of content. `total_pages` is derived by ceiling
    /// division; a zero page size yields zero pages.
    pub fn new(content: Vec<T>, total_elements: u64, page_size: u32, page_number: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            u32::try_from(total_elements.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
        };
        Self {
            content,
            total_elements,
            total_pages,
            page_size,
            page_number,
        }
    }

    pub fn empty(page_size: u32, page_number: u32) -> Self {
        Self::new(Vec::new(), 0, page_size, page_number)
    }

    /// Adapt the content items through a per-entity mapping function,
    /// keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page_size: self.page_size,
            page_number: self.page_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Page::new(vec![1, 2, 3], 7, 3, 0).total_pages, 3);
        assert_eq!(Page::new(vec![1, 2, 3], 9, 3, 0).total_pages, 3);
        assert_eq!(Page::<i32>::new(vec![], 0, 3, 0).total_pages, 0);
    }

    #[test]
    fn zero_page_size_does_not_divide() {
        assert_eq!(Page::<i32>::new(vec![], 10, 0, 0).total_pages, 0);
    }

    #[test]
    fn map_preserves_metadata() {
        let page = Page::new(vec![1, 2], 5, 2, 1).map(|n| n.to_string());
        assert_eq!(page.content, vec!["1".to_owned(), "2".to_owned()]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page_number, 1);
    }

    #[test]
    fn serializes_with_flat_field_names() {
        let page = Page::new(vec!["a"], 1, 10, 0);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["total_elements"], 1);
        assert_eq!(json["content"][0], "a");
    }
}
