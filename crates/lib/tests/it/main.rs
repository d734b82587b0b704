/*! Integration tests for Recall.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - entry: Tests for Entry hashing and the operation record format
 * - log: Tests for InMemoryLog appends, traversals and file persistence
 * - store: Tests for the Feed, Set and OrderedKeyValue facades, including
 *   bounded reads and comparison against a forward reference fold
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recall=info")),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod log;
