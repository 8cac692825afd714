mod path;

pub use path::{absolutize, normalize_lexically, relative_slash_path};
