//! Simulation of nondeterministic finite automata with epsilon transitions.

mod automaton;
mod description;
mod nfa;

pub use automaton::{Automaton, AutomatonError};
pub use description::{Description, StateSet, Transitions};
pub use nfa::NFA;
