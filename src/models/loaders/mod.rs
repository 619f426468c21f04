pub mod reply_loader;

pub use reply_loader::{load_reply_file, load_reply_payload};
