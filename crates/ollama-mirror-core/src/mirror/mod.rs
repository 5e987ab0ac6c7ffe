//! LM Studio side of the mirror: directory and symlink creation.

mod materializer;
mod types;

pub use materializer::LinkMaterializer;
pub use types::{
    AuxiliaryLink, AuxiliaryStatus, LinkAction, MaterializeOutcome, MirrorSummary, ModelReport,
};
