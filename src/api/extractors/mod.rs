/*!
 * Request extractors
 *
 * Public API:
 * - Viewer: identity middleware が extensions に入れた AuthState
 */

mod viewer;

pub use viewer::Viewer;
