mod async_conversion;
mod path_ext;

pub use async_conversion::{AsyncTryFrom, AsyncTryInto};
pub use path_ext::{PathExt, normalize_path, resolve_against};
