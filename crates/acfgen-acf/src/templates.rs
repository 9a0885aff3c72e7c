//! Bundled template assets.
//!
//! The front ends pass these to the pipeline unless the user supplies
//! override files; the core never loads templates itself.

pub const BODY_BLOCK: &str = include_str!("../templates/body_block_template.txt");
pub const WING_BLOCK: &str = include_str!("../templates/wing_block_template.txt");
pub const NEW_ACF: &str = include_str!("../templates/acfnew.acf");
