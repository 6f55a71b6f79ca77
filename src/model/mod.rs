pub use mycelia_core::DnaLogic;
pub mod cell {
    pub use mycelia_core::cell::*;
}
pub mod config {
    pub use mycelia_core::config::*;
}
pub mod dna {
    pub use mycelia_core::dna::*;
}
pub mod environment {
    pub use mycelia_core::environment::*;
}
pub mod ledger {
    pub use mycelia_core::ledger::*;
}
pub mod metrics {
    pub use mycelia_core::metrics::*;
}
pub mod organism {
    pub use mycelia_core::organism::*;
}
pub mod spore {
    pub use mycelia_core::spore::*;
}
pub mod tile {
    pub use mycelia_core::tile::*;
}

pub mod state {
    pub use mycelia_data::*;
}

pub mod world;
