pub mod patch;
pub mod templates;

pub use patch::{splice_blocks, write_new_acf, AcfError, AcfPatcher, PatchState, Spliced};
