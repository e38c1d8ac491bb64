use super::AutomatonError;
use serde::{Deserialize, Serialize};
use std::{
	collections::{HashMap, HashSet},
	fmt,
	hash::Hash,
};

/// Set of states an automaton may currently occupy.
pub type StateSet<S> = HashSet<S>;

/// Outgoing transitions of a single state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Transitions<S, I>
where
	S: Eq + Hash,
	I: Eq + Hash,
{
	symbols: HashMap<I, StateSet<S>>,
	epsilon: StateSet<S>,
}

impl<S, I> Default for Transitions<S, I>
where
	S: Eq + Hash,
	I: Eq + Hash,
{
	fn default() -> Self {
		Self {
			symbols: HashMap::new(),
			epsilon: HashSet::new(),
		}
	}
}

impl<S, I> Transitions<S, I>
where
	S: Eq + Hash,
	I: Eq + Hash,
{
	pub fn new(symbols: HashMap<I, StateSet<S>>, epsilon: StateSet<S>) -> Self {
		Self { symbols, epsilon }
	}

	/// Returns the destinations on a given input symbol, if there are any.
	pub fn on(&self, input: &I) -> Option<&StateSet<S>> {
		self.symbols.get(input)
	}

	/// Returns the destinations reachable without consuming input.
	pub fn epsilon(&self) -> &StateSet<S> {
		&self.epsilon
	}

	/// Iterates over every state this entry points to.
	fn destinations(&self) -> impl Iterator<Item = &S> {
		self.symbols.values().flatten().chain(&self.epsilon)
	}
}

/// Immutable description of a nondeterministic finite automaton.
///
/// States are keys of the transition table.
/// A description may reference states it does not declare,
/// [`validate`](Description::validate) reports these,
/// while the engine treats them as states without outgoing transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Description<S, I>
where
	S: Eq + Hash,
	I: Eq + Hash,
{
	start: S,
	#[serde(default = "HashSet::new")]
	accept: StateSet<S>,
	#[serde(default = "HashMap::new")]
	transitions: HashMap<S, Transitions<S, I>>,
}

impl<S, I> Description<S, I>
where
	S: Clone + Eq + Hash + fmt::Debug,
	I: Eq + Hash,
{
	/// Creates a new description containing only a non-accepting start state.
	pub fn new(start: S) -> Self {
		let mut description = Self {
			start: start.clone(),
			accept: HashSet::new(),
			transitions: HashMap::new(),
		};
		description.add_state(start, false);
		description
	}

	/// Creates a new description from its raw parts without any validation.
	pub fn from_parts(
		transitions: HashMap<S, Transitions<S, I>>,
		start: S,
		accept: StateSet<S>,
	) -> Self {
		Self {
			start,
			accept,
			transitions,
		}
	}

	/// Creates a new description with a given set of states & transitions.
	/// Transitions with a `None` input are epsilon transitions.
	pub fn from_transitions<V, T>(
		start: S,
		states: V,
		transitions: T,
	) -> Result<Self, AutomatonError<S>>
	where
		V: IntoIterator<Item = (S, bool)>,
		T: IntoIterator<Item = (S, Option<I>, S)>,
	{
		let mut description = Self::new(start);
		for (id, accept) in states {
			description.add_state(id, accept);
		}
		for (prev, input, next) in transitions {
			match input {
				Some(input) => description.add_transition(prev, input, next)?,
				None => description.add_epsilon(prev, next)?,
			}
		}
		Ok(description)
	}

	/// Adds a state to the description.
	/// Adding a state twice keeps its transitions, it accepts if either call said so.
	pub fn add_state(&mut self, id: S, accept: bool) {
		if accept {
			self.accept.insert(id.clone());
		}
		self.transitions.entry(id).or_default();
	}

	/// Adds a new transition on an input symbol.
	/// Returns an `AutomatonError::InexistentState` error if one of the states is inexistent.
	pub fn add_transition(&mut self, prev: S, input: I, next: S) -> Result<(), AutomatonError<S>> {
		let transitions = self.get_declared_mut(&prev, &next)?;
		transitions
			.symbols
			.entry(input)
			.or_insert_with(HashSet::new)
			.insert(next);
		Ok(())
	}

	/// Adds a new epsilon transition.
	/// Returns an `AutomatonError::InexistentState` error if one of the states is inexistent.
	pub fn add_epsilon(&mut self, prev: S, next: S) -> Result<(), AutomatonError<S>> {
		self.get_declared_mut(&prev, &next)?.epsilon.insert(next);
		Ok(())
	}

	/// Returns the transitions of `prev` if both `prev` and `next` are declared.
	fn get_declared_mut(
		&mut self,
		prev: &S,
		next: &S,
	) -> Result<&mut Transitions<S, I>, AutomatonError<S>> {
		if !self.has_state(next) {
			return Err(AutomatonError::InexistentState(next.clone()));
		}
		self.transitions
			.get_mut(prev)
			.ok_or_else(|| AutomatonError::InexistentState(prev.clone()))
	}

	/// Checks that every referenced state is declared.
	pub fn validate(&self) -> Result<(), AutomatonError<S>> {
		if !self.has_state(&self.start) {
			return Err(AutomatonError::MissingStart(self.start.clone()));
		}
		let referenced = self
			.accept
			.iter()
			.chain(self.transitions.values().flat_map(Transitions::destinations));
		for id in referenced {
			if !self.has_state(id) {
				return Err(AutomatonError::InexistentState(id.clone()));
			}
		}
		Ok(())
	}
}

impl<S, I> Description<S, I>
where
	S: Eq + Hash,
	I: Eq + Hash,
{
	pub fn start(&self) -> &S {
		&self.start
	}

	pub fn accept_states(&self) -> &StateSet<S> {
		&self.accept
	}

	pub fn is_accepting(&self, id: &S) -> bool {
		self.accept.contains(id)
	}

	/// Checks whether the transition table declares a state.
	pub fn has_state(&self, id: &S) -> bool {
		self.transitions.contains_key(id)
	}

	/// Iterates over the declared states.
	pub fn states(&self) -> impl Iterator<Item = &S> {
		self.transitions.keys()
	}

	/// Returns the outgoing transitions of a state, `None` for undeclared states.
	pub fn transitions(&self, id: &S) -> Option<&Transitions<S, I>> {
		self.transitions.get(id)
	}

	/// Collects every input symbol used by a transition.
	pub fn alphabet(&self) -> HashSet<&I> {
		self.transitions
			.values()
			.flat_map(|transitions| transitions.symbols.keys())
			.collect()
	}
}
