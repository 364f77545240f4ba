//! Pass-through post-processing: each component is deployed on its own.

use super::{PostProcess, PostProcessContext};
use crate::artifact::MavenArtifact;
use crate::error::Result;

/// Leaves the working set untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Independent;

impl PostProcess for Independent {
    fn name(&self) -> &'static str {
        "independent"
    }

    fn apply(
        &self,
        _context: &PostProcessContext<'_>,
        artifacts: Vec<MavenArtifact>,
    ) -> Result<Vec<MavenArtifact>> {
        Ok(artifacts)
    }
}
