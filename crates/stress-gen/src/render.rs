//! Assembly of a single Terraform-language file.
//!
//! Objects append their own [`hcl::Block`]s to the root [`Body`] of a
//! [`Document`], which is then rendered by `hcl`. Nothing here validates the
//! language: a caller that appends inconsistent blocks gets inconsistent
//! text, and it is up to the consuming tool to reject it.

use crate::error::Result;

/// The top-level blocks of a document, in the order they were appended.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
    blocks: Vec<hcl::Block>,
}

impl Body {
    /// Append a top-level block.
    pub fn append_block(&mut self, block: hcl::Block) {
        self.blocks.push(block);
    }
}

/// One configuration file under construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    body: Body,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to the root body, for appending top-level blocks.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Render the document as bytes ready to write to a `.tf` file.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let body = hcl::Body::builder()
            .add_blocks(self.body.blocks.iter().cloned())
            .build();
        Ok(hcl::to_string(&body)?.into_bytes())
    }
}
