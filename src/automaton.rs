use std::{borrow::Borrow, fmt};
use thiserror::Error;

/// Trait representing an abstract automaton.
///
/// Automata are read-only once built.
/// The configuration a run passes through is a value owned by the caller,
/// so a single automaton can be run from several threads at once.
pub trait Automaton<I> {
	/// Configuration type the automaton moves through while consuming input.
	type State;

	/// Returns the configuration before any input has been consumed.
	fn start(&self) -> Self::State;

	/// Performs a single transition on one input symbol.
	fn step(&self, state: &Self::State, input: &I) -> Self::State;

	/// Checks whether a configuration is accepting.
	fn accepts(&self, state: &Self::State) -> bool;

	/// Checks whether a configuration can never become accepting again.
	fn is_dead(&self, _state: &Self::State) -> bool {
		false
	}

	/// Runs the automaton on a sequence of inputs, given either by value or by reference.
	/// Stops early once the configuration is dead.
	fn run<V>(&self, inputs: V) -> bool
	where
		V: IntoIterator,
		V::Item: Borrow<I>,
	{
		let mut state = self.start();
		for (index, input) in inputs.into_iter().enumerate() {
			if self.is_dead(&state) {
				tracing::trace!(index, "dead configuration, rejecting");
				return false;
			}
			tracing::trace!(index, "consuming symbol");
			state = self.step(&state, input.borrow());
		}
		self.accepts(&state)
	}
}

/// Enum representing an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError<S>
where
	S: fmt::Debug,
{
	/// A transition or accept state refers to an undeclared state.
	#[error("Inexistent State ID \"{0:?}\"")]
	InexistentState(S),

	/// The start state is not declared in the transition table.
	#[error("Start State ID \"{0:?}\" has no entry in the transition table")]
	MissingStart(S),
}
