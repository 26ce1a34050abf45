pub mod extractor;
pub mod merger;
pub mod renderer;

pub use extractor::SummaryExtractor;
pub use merger::merge;
pub use renderer::render_grouped_table;
