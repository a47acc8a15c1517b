//! Charts module - state accident maps

mod renderer;
mod state_map;

pub use renderer::{MapRenderer, PngMapRenderer};
pub use state_map::{
    clean_coordinates, MapBounds, MapOutcome, StateCode, StateMap, StateMapper, LATITUDE_COL,
    LONGITUDE_COL, STATE_COL,
};
