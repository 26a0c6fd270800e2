//! Built-in tokenizers
//!
//! One scanner per supported language. Each is a pure function from
//! text to a lazy token iterator with no state shared between calls.

pub mod css;
pub mod html;
pub mod javascript;
pub mod python;

pub use css::CssTokens;
pub use html::HtmlTokens;
pub use javascript::JavaScriptTokens;
pub use python::PythonTokens;
