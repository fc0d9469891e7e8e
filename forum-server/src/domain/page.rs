use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Ascending only for a case-insensitive "asc"; anything else sorts descending.
    pub(crate) fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PostSortField {
    Id,
    Title,
    CreatedAt,
    UpdatedAt,
}

impl PostSortField {
    pub(crate) fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.trim() {
            "id" => Ok(PostSortField::Id),
            "title" => Ok(PostSortField::Title),
            "createdAt" | "created_at" => Ok(PostSortField::CreatedAt),
            "updatedAt" | "updated_at" => Ok(PostSortField::UpdatedAt),
            other => Err(DomainError::BadRequest(format!(
                "Unsupported sort field '{other}'. Use one of: id, title, createdAt, updatedAt."
            ))),
        }
    }

    pub(crate) fn column(self) -> &'static str {
        match self {
            PostSortField::Id => "id",
            PostSortField::Title => "title",
            PostSortField::CreatedAt => "created_at",
            PostSortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostSort {
    pub(crate) field: PostSortField,
    pub(crate) direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub(crate) page_no: u32,
    pub(crate) page_size: u32,
    pub(crate) sort: PostSort,
}

impl PageRequest {
    pub(crate) fn new(
        page_no: u32,
        page_size: u32,
        sort_by: &str,
        sort_dir: &str,
    ) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::Validation {
                field: "pageSize",
                message: "must be > 0",
            });
        }
        Ok(Self {
            page_no,
            page_size,
            sort: PostSort {
                field: PostSortField::parse(sort_by)?,
                direction: SortDirection::parse(sort_dir),
            },
        })
    }

    pub(crate) fn offset(&self) -> u64 {
        u64::from(self.page_no) * u64::from(self.page_size)
    }
}

/// One page of results plus the metadata clients need to walk the rest.
#[derive(Debug, Clone)]
pub(crate) struct Page<T> {
    pub(crate) content: Vec<T>,
    pub(crate) page_no: u32,
    pub(crate) page_size: u32,
    pub(crate) total_elements: u64,
    pub(crate) total_pages: u32,
    pub(crate) last: bool,
}

impl<T> Page<T> {
    pub(crate) fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let page_size = u64::from(request.page_size);
        let total_pages = u32::try_from(total_elements.div_ceil(page_size)).unwrap_or(u32::MAX);
        let last = u64::from(request.page_no) + 1 >= u64::from(total_pages);

        Self {
            content,
            page_no: request.page_no,
            page_size: request.page_size,
            total_elements,
            total_pages,
            last,
        }
    }

    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_no: self.page_no,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, PageRequest, PostSortField, SortDirection};
    use crate::domain::error::DomainError;

    #[test]
    fn sort_direction_is_ascending_only_for_asc() {
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("ascending"), SortDirection::Desc);
        assert_eq!(SortDirection::parse(""), SortDirection::Desc);
    }

    #[test]
    fn sort_field_accepts_camel_and_snake_case() {
        assert_eq!(
            PostSortField::parse("createdAt").expect("known field"),
            PostSortField::CreatedAt
        );
        assert_eq!(
            PostSortField::parse("updated_at").expect("known field"),
            PostSortField::UpdatedAt
        );
    }

    #[test]
    fn sort_field_rejects_unknown_columns() {
        let err = PostSortField::parse("password_hash").expect_err("must be rejected");
        assert!(matches!(err, DomainError::BadRequest(_)));
    }

    #[test]
    fn page_request_rejects_zero_page_size() {
        assert!(PageRequest::new(0, 0, "id", "desc").is_err());
    }

    #[test]
    fn twelve_items_in_pages_of_five() {
        let first = PageRequest::new(0, 5, "id", "asc").expect("valid request");
        let page = Page::new(vec![0; 5], &first, 12);
        assert_eq!(page.total_pages, 3);
        assert!(!page.last);
        assert_eq!(first.offset(), 0);

        let third = PageRequest::new(2, 5, "id", "asc").expect("valid request");
        let page = Page::new(vec![0; 2], &third, 12);
        assert_eq!(page.total_pages, 3);
        assert!(page.last);
        assert_eq!(third.offset(), 10);
    }

    #[test]
    fn empty_result_is_last_page() {
        let request = PageRequest::new(0, 10, "id", "desc").expect("valid request");
        let page: Page<u8> = Page::new(Vec::new(), &request, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.last);
    }
}
