//! Procedural macros for the keyspace workspace


use proc_macro::TokenStream;

/// Attribute macro for test functions that need a keyspace
///
/// Automatically creates an in-memory keyspace, passes it to the test as
/// `keyspace: Arc<dyn Keyspace>`, and ensures cleanup via `close()`.
///
/// # Basic usage
///
/// ```ignore
/// #[keyspace_macros::keyspace_test]
/// async fn my_test(keyspace: Arc<dyn Keyspace>) {
///     // test body
/// }
/// ```
///
/// # With a custom backend
///
/// ```ignore
/// #[keyspace_macros::keyspace_test(backend = InMemoryKeyspace::new())]
/// async fn my_test(keyspace: Arc<dyn Keyspace>) {
///     // test body
/// }
/// ```
#[proc_macro_attribute]
pub fn keyspace_test(args: TokenStream, input: TokenStream) -> TokenStream {
    test::keyspace::test_impl(args.into(), input.into()).into()
}
