//! Query Module
//!
//! Read-side logic over a snapshot of the store: pagination, sorting and
//! substring search. Nothing here touches the store's locks or file; the
//! API layer runs these functions inside `PostStore::with_posts`.

mod pagination;
mod search;
mod sort;

pub use pagination::{paginate, Page, PageRequest};
pub use search::{search_posts, SearchFilter};
pub use sort::{sort_posts, SortDirection, SortSpec};

use crate::model::Post;

/// Sort (optionally) then cut one page out of `posts`
///
/// Without a sort the page is sliced straight from store order.
pub fn list_page(posts: &[Post], sort: Option<SortSpec>, request: PageRequest) -> Page {
    match sort {
        None => paginate(posts, request),
        Some(spec) => {
            let mut ordered: Vec<&Post> = posts.iter().collect();
            sort_posts(&mut ordered, spec);
            paginate(&ordered, request)
        }
    }
}
