/*! Integration tests for roz.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - doc: Tests for the path engine over whole documents
 * - action: Tests for Action/Event wire shapes
 * - store: Tests for the Store lifecycle and the action pipeline
 * - loader: Tests for loading the initial document from disk
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("roz=info".parse().unwrap()))
        .with_test_writer()
        .try_init();
}

mod action;
mod helpers;
mod loader;
