//! Chart data builders and layout geometry
//! Builds flow-diagram and radar data from match results, then places them
//! on a canvas independent of any rendering surface

pub mod sankey;
pub mod radar;
pub mod layout;
