mod flat;

pub use flat::FlatWorldSource;
