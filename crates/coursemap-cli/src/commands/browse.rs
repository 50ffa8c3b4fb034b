//! Catalog search and listing.

use crate::cli::{PageArgs, SearchArgs};
use crate::error::Result;
use crate::output::Formatter;
use coursemap_store::{CoursePage, SqliteStore};

/// Execute the search command.
pub fn execute_search(args: SearchArgs, store: &SqliteStore, formatter: &Formatter) -> Result<CoursePage> {
    let text = args.text.trim();
    let query = (!text.is_empty()).then_some(text);
    show_page(query, args.paging, store, formatter)
}

/// Execute the list command.
pub fn execute_list(args: PageArgs, store: &SqliteStore, formatter: &Formatter) -> Result<CoursePage> {
    show_page(None, args, store, formatter)
}

fn show_page(query: Option<&str>, paging: PageArgs, store: &SqliteStore, formatter: &Formatter) -> Result<CoursePage> {
    let page = store.search_courses(query, paging.page as usize, paging.page_size as usize)?;
    tracing::debug!("Page {} of {} for {:?}", page.page, page.page_count(), query);

    println!("{}", formatter.format_course_page(&page)?);

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn store() -> SqliteStore {
        let mut store = SqliteStore::new(":memory:").unwrap();
        store
            .import_catalog(
                r#"[
                    {"code": "MATH1051", "title": "Calculus & Linear Algebra I"},
                    {"code": "CSSE1001", "title": "Introduction to Software Engineering"},
                    {"code": "CSSE2002", "title": "Programming in the Large"},
                    {"code": "COMP3506", "title": "Algorithms & Data Structures"}
                ]"#,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_list_second_page() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let page = execute_list(PageArgs { page: 2, page_size: 3 }, &store(), &formatter).unwrap();

        assert_eq!(page.total, 4);
        assert_eq!(page.page_count(), 2);
        let ids: Vec<&str> = page.courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["MATH1051"]);
    }

    #[test]
    fn test_search_by_code_prefix() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = SearchArgs { text: "csse".to_string(), paging: PageArgs { page: 1, page_size: 12 } };
        let page = execute_search(args, &store(), &formatter).unwrap();

        let ids: Vec<&str> = page.courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["CSSE1001", "CSSE2002"]);
    }

    #[test]
    fn test_blank_search_lists_everything() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = SearchArgs { text: "  ".to_string(), paging: PageArgs { page: 1, page_size: 12 } };
        assert_eq!(execute_search(args, &store(), &formatter).unwrap().total, 4);
    }
}
