pub mod sequence;
pub mod operators;
pub mod population;
pub mod evolution_engine;
pub mod progress;

pub use sequence::Sequence;
pub use operators::{
    apply_mutation, mutate, pmx_crossover, pmx_crossover_at, tournament_selection, MutationKind,
};
pub use population::{BreedStats, PopulationManager};
pub use evolution_engine::{
    EnginePhase, EvolutionEngine, EvolutionResult, GenerationRecord, ProgressCallback,
};
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, ProgressMessage};
