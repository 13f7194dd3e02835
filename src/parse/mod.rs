pub mod redirect;
pub mod tokenize;
pub mod types;

pub use redirect::parse_redirection;
pub use tokenize::{tokenize, try_tokenize};
pub use types::{RedirectOperator, RedirectTarget, Redirection, Stream};
