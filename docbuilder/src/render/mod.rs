//! Doc rendering.
//!
//! Turns committed [`EndpointRecord`]s into apidoc comment blocks. The
//! output of [`render`] depends only on its input, so rendering the same
//! records twice yields the same text and never duplicates blocks.
//!
//! ## Output
//!
//! ```text
//! /**
//! * @api {get} /api/user
//! * @apiName GetCSRF
//! * @apiGroup User
//! * @apiSuccess {String} csrfToken
//! * @apiSuccessExample {json} Success-Response:
//! *     HTTP/1.1 200 OK
//! * {
//! * "csrfToken":"abc"
//! * }
//! */
//! ```

mod block;
mod pretty;

use tracing::debug;

use crate::error::RenderError;
use crate::record::EndpointRecord;

pub use block::BlockRenderer;
pub use pretty::pretty_json;

/// Renders `records` in order, one block per record.
///
/// The first record that fails aborts the render; no partial text is
/// returned.
///
/// ## Examples
///
/// ```rust
/// use docbuilder::{render, EndpointRecord, RestMethod};
///
/// let records = vec![EndpointRecord::new(RestMethod::Get, "/health")];
/// assert_eq!(render(&records).unwrap(), "/**\n* @api {get} /health\n*/\n");
/// ```
pub fn render(records: &[EndpointRecord]) -> Result<String, RenderError> {
    let mut out = String::new();
    for record in records {
        BlockRenderer::new(record).render_into(&mut out)?;
    }
    debug!(blocks = records.len(), bytes = out.len(), "Rendered doc blocks");
    Ok(out)
}
