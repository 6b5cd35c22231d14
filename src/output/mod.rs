//! Terminal rendering: query echo, framed answers, sources and errors.

mod citations;
mod formatter;
mod frame;
mod markdown;
mod spinner;


#[allow(unused_imports)]
pub use citations::{hyperlink, render_citation_lines, shorten_url};
#[allow(unused_imports)]
pub use formatter::{
    display_error, display_error_message, display_info, display_query, display_response,
    render_error, render_info, render_query, render_response,
};
#[allow(unused_imports)]
pub use frame::{model_color, render_frame};
#[allow(unused_imports)]
pub use markdown::render_markdown;
pub use spinner::ThinkingSpinner;
