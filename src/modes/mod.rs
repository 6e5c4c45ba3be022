pub mod page;

pub use page::PageMode;
