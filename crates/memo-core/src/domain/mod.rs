//! Domain entities - the core business objects.

mod excerpt;
mod page;
mod post;

pub use excerpt::{EXCERPT_LIMIT, EXCERPT_MARKER, shorten};
pub use page::{MAX_PAGE, PAGE_SIZE, PageRequest, last_page};
pub use post::{Post, PostAuthor, PostFilter, PostPatch};
