//! Scenario builder API.
//!
//! Provides a declarative API for constructing codec scenarios that enforce
//! the Oracle Pattern: a scenario cannot run until an oracle is attached.

use std::{any::type_name, fmt::Debug};

use shapewire::{Decode, Encode};

use crate::{
    faults::FaultySource,
    scenario::{OracleFn, World, world::CaseRecord},
};

type Exercise = Box<dyn Fn(&str) -> CaseRecord>;

/// Scenario builder.
///
/// Add labelled values with [`case`](Self::case), then call
/// [`oracle`](Self::oracle) to get a [`RunnableScenario`].
pub struct Scenario {
    name: String,
    cases: Vec<(String, Exercise)>,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), cases: Vec::new() }
    }

    /// Add a value to exercise.
    ///
    /// Running the scenario encodes the value, decodes it back, and decodes
    /// every strict prefix of the encoding.
    pub fn case<T>(mut self, label: impl Into<String>, value: T) -> Self
    where
        T: Encode + Decode + PartialEq + Debug + 'static,
    {
        self.cases.push((label.into(), Box::new(move |label: &str| exercise(label, &value))));
        self
    }

    /// Set the oracle function and return a runnable scenario.
    ///
    /// The oracle is mandatory - you cannot run a scenario without
    /// verification.
    pub fn oracle(self, oracle: OracleFn) -> RunnableScenario {
        RunnableScenario { scenario: self, oracle }
    }
}

/// A scenario with an oracle function that can be executed.
pub struct RunnableScenario {
    scenario: Scenario,
    oracle: OracleFn,
}

impl RunnableScenario {
    /// Execute the scenario.
    ///
    /// Exercises every case, records the results in a [`World`], then runs the
    /// oracle over it.
    pub fn run(self) -> Result<(), String> {
        let mut world = World::new();

        if self.scenario.cases.is_empty() {
            return Err(format!("Scenario '{}': no cases to exercise", self.scenario.name));
        }

        for (label, exercise) in &self.scenario.cases {
            let record = exercise(label);
            tracing::debug!(
                scenario = %self.scenario.name,
                case = %label,
                ty = record.type_name,
                bytes = record.encoded.len(),
                round_trip = record.round_trip,
                "case exercised"
            );
            world.add_case(record);
        }

        (self.oracle)(&world).map_err(|e| format!("Scenario '{}': {}", self.scenario.name, e))
    }
}

fn exercise<T>(label: &str, value: &T) -> CaseRecord
where
    T: Encode + Decode + PartialEq + Debug,
{
    let encoded = shapewire::to_vec(value);

    let mut source = FaultySource::new(&encoded);
    let decoded = T::decode(&mut source);
    if let Err(err) = &decoded {
        tracing::debug!(case = %label, %err, "full decode failed");
    }
    let round_trip = decoded.as_ref().is_ok_and(|decoded| decoded == value);
    let consumed_exactly = decoded.is_ok() && source.remaining() == 0;

    let mut truncation_successes = Vec::new();
    let mut reads_after_failure = Vec::new();
    for cut in 0..encoded.len() {
        let mut source = FaultySource::truncated(&encoded, cut);
        if T::decode(&mut source).is_ok() {
            truncation_successes.push(cut);
        }
        if source.fills_after_failure() > 0 {
            reads_after_failure.push(cut);
        }
    }

    CaseRecord {
        label: label.to_string(),
        type_name: type_name::<T>(),
        shape: T::SHAPE,
        predicted_len: shapewire::encoded_len(value),
        encoded,
        round_trip,
        consumed_exactly,
        truncation_successes,
        reads_after_failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_requires_oracle() {
        // This should compile - oracle provided
        let _scenario = Scenario::new("test").case("n", 1u8).oracle(Box::new(|_world| Ok(())));

        // This should NOT compile - no oracle
        // let scenario = Scenario::new("test").case("n", 1u8);
        // scenario.run(); // ERROR: no method `run` on type `Scenario`
    }

    #[test]
    fn scenario_records_cases() {
        let scenario = Scenario::new("test").case("number", 993i32).case("word", String::from("brown")).oracle(
            Box::new(|world| {
                assert_eq!(world.labels(), ["number", "word"]);
                assert_eq!(world.case("number").map(CaseRecord::encoded_len), Some(4));
                assert_eq!(world.total_encoded_bytes(), 4 + size_of::<usize>() + 5);
                assert!(world.all_round_trip());
                Ok(())
            }),
        );

        scenario.run().expect("scenario should succeed");
    }

    #[test]
    fn empty_scenario_is_an_error() {
        let result = Scenario::new("empty").oracle(Box::new(|_world| Ok(()))).run();
        assert!(result.is_err());
    }

    #[test]
    fn oracle_error_names_scenario() {
        let result =
            Scenario::new("named").case("x", 0u8).oracle(Box::new(|_world| Err("nope".to_string()))).run();
        assert_eq!(result, Err("Scenario 'named': nope".to_string()));
    }
}
