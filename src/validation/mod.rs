mod validator;

pub use validator::{ValidationError, compare_walked, validate, validate_in};
