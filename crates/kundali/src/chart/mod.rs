pub mod houses;
pub mod sign;

pub use houses::{assemble, assemble_varga, houses_to_markdown, ChartHouse, HouseChart, Varga};
pub use sign::{degree_in_sign, sign_index, Sign, ALL_SIGNS};
