use super::{Automaton, Description, StateSet};
use serde::{Deserialize, Deserializer, Serialize};
use std::{borrow::Borrow, collections::HashSet, fmt, hash::Hash};

/// A nondeterministic finite state automaton with epsilon transitions.
///
/// The engine never mutates its description.
/// Undeclared states and unknown input symbols have no transitions,
/// so a path reaching them simply dies instead of causing an error.
///
/// Serializes as its description.
/// Deserializing goes through [`NFA::new`] like any other construction.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct NFA<S, I>
where
	S: Eq + Hash,
	I: Eq + Hash,
{
	description: Description<S, I>,
}

impl<S, I> NFA<S, I>
where
	S: Clone + Eq + Hash + fmt::Debug,
	I: Eq + Hash,
{
	/// Creates a new NFA from a description.
	/// Malformed descriptions are accepted, see [`Description::validate`].
	pub fn new(description: Description<S, I>) -> Self {
		tracing::debug!(
			start = ?description.start(),
			states = description.states().count(),
			accept = description.accept_states().len(),
			"constructing nfa"
		);
		if let Err(err) = description.validate() {
			tracing::warn!(%err, "nfa description references undeclared states");
		}
		Self { description }
	}

	pub fn description(&self) -> &Description<S, I> {
		&self.description
	}

	/// Returns every state reachable from `states` through zero or more epsilon transitions.
	pub fn epsilon_closure(&self, states: &StateSet<S>) -> StateSet<S> {
		let mut closure = states.clone();
		let mut pending: Vec<&S> = states.iter().collect();
		while let Some(state) = pending.pop() {
			let next = match self.description.transitions(state) {
				Some(transitions) => transitions.epsilon(),
				None => continue,
			};
			for id in next {
				if closure.insert(id.clone()) {
					pending.push(id);
				}
			}
		}
		closure
	}

	/// Consumes a single input symbol from every state of the epsilon closure of `states`.
	/// Returns the epsilon closure of all destinations, empty if no path survives.
	pub fn step(&self, states: &StateSet<S>, input: &I) -> StateSet<S> {
		let closure = self.epsilon_closure(states);
		let mut next = HashSet::with_capacity(closure.len());
		for state in &closure {
			if let Some(targets) = self
				.description
				.transitions(state)
				.and_then(|transitions| transitions.on(input))
			{
				next.extend(targets.iter().cloned());
			}
		}
		let next = self.epsilon_closure(&next);
		tracing::trace!(from = closure.len(), to = next.len(), "step");
		next
	}

	/// Checks whether the NFA accepts a sequence of inputs.
	pub fn accept<V>(&self, inputs: V) -> bool
	where
		V: IntoIterator,
		V::Item: Borrow<I>,
	{
		self.run(inputs)
	}
}

impl<S> NFA<S, char>
where
	S: Clone + Eq + Hash + fmt::Debug,
{
	/// Checks whether the NFA accepts the characters of a string.
	pub fn accept_str(&self, input: &str) -> bool {
		self.accept(input.chars())
	}
}

impl<'de, S, I> Deserialize<'de> for NFA<S, I>
where
	S: Clone + Eq + Hash + fmt::Debug + Deserialize<'de>,
	I: Eq + Hash + Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Description::deserialize(deserializer).map(Self::new)
	}
}

impl<S, I> From<Description<S, I>> for NFA<S, I>
where
	S: Clone + Eq + Hash + fmt::Debug,
	I: Eq + Hash,
{
	fn from(description: Description<S, I>) -> Self {
		Self::new(description)
	}
}

impl<S, I> Automaton<I> for NFA<S, I>
where
	S: Clone + Eq + Hash + fmt::Debug,
	I: Eq + Hash,
{
	type State = StateSet<S>;

	fn start(&self) -> Self::State {
		let mut start = HashSet::with_capacity(1);
		start.insert(self.description.start().clone());
		self.epsilon_closure(&start)
	}

	fn step(&self, state: &Self::State, input: &I) -> Self::State {
		NFA::step(self, state, input)
	}

	fn accepts(&self, state: &Self::State) -> bool {
		state.iter().any(|id| self.description.is_accepting(id))
	}

	fn is_dead(&self, state: &Self::State) -> bool {
		state.is_empty()
	}
}
