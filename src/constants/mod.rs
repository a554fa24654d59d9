pub mod embeds;
pub mod scoring;
