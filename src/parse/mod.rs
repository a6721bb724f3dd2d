pub mod archive;
pub mod comment_codec;
pub mod line_classifier;
pub mod task_codec;

pub use archive::{collapse_archive, expand_archive};
pub use comment_codec::{is_comment_line, make_comment, parse_comment};
pub use line_classifier::classify;
pub use task_codec::{parse_task, render_task, task_prefix, try_parse_task};
