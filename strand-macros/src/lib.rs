//! Procedural macros for the strand runtime.
//!
//! - `#[strand::main]` turns an `async fn main` into a synchronous one that
//!   builds a runtime and blocks on the body,
//! - `#[strand::test]` does the same for `#[test]` functions,
//! - `join!` awaits several futures concurrently and returns a tuple of
//!   their outputs.

mod entry;
mod join;

use proc_macro::TokenStream;

/// Runs an `async fn main` on a strand runtime.
///
/// Accepts `worker_threads = N` to size the worker pool.
///
/// ```rust,ignore
/// #[strand::main(worker_threads = 2)]
/// async fn main() {
///     println!("hello from a strand task");
/// }
/// ```
#[proc_macro_attribute]
pub fn main(attr: TokenStream, item: TokenStream) -> TokenStream {
    entry::expand(attr, item, entry::Kind::Main)
}

/// Runs an `async` test function on a fresh strand runtime.
///
/// Accepts the same arguments as [`macro@main`].
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    entry::expand(attr, item, entry::Kind::Test)
}

/// Awaits every future and returns their outputs as a tuple, in argument
/// order.
///
/// Each poll polls every unfinished future once, left to right. Must be used
/// inside an async context.
///
/// ```rust,ignore
/// let (a, b) = strand::join!(async { 1 }, async { 2 });
/// ```
#[proc_macro]
pub fn join(input: TokenStream) -> TokenStream {
    join::expand(input)
}
