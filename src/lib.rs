//! Compiles Google-style docstrings into JSON-Schema-shaped tool
//! declarations for LLM function calling.
//!
//! ```
//! use toolspec::prelude::*;
//!
//! let doc = "Sends an email message.\n\
//!            \n\
//!            Args:\n\
//!            \x20   to (str): Recipient address.\n\
//!            \x20   cc (list, optional): CC list.\n";
//! let container = compile(doc, "send_email").unwrap();
//! assert_eq!(container.tool[0].name, "send_email");
//! ```

pub mod compile;
pub mod docstring;
pub mod error;
pub mod nested;
pub mod prelude;
pub mod schema;
pub mod typemap;
pub mod validate;

pub use compile::{ToolContainer, ToolDeclaration, compile};
pub use error::{Error, Result};
