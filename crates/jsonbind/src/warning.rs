//! Non-fatal outcomes of a parse or serialization.

use std::fmt;

/// Something that did not abort the call but was handled by substitution.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A property in the input has no field on the target type; its value
    /// was read and dropped.
    MissingField { type_name: String, field: String },
    /// `null` was given for a non-nullable field, which keeps its default.
    NullIntoNonNullable { type_name: String, field: String },
    /// An object was reached again while it was being written; `null` was
    /// written in its place. `chain` lists the types of the objects in flight.
    CircularReference { type_name: String, chain: Vec<String> },
    /// A NaN or infinite float was written as `null`.
    NonFiniteNumber { value: f64 },
    /// An arguments stream was empty; every argument is `null`.
    EmptyArguments { expected: usize },
    /// An arguments stream held more values than requested types.
    ExtraArguments { expected: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingField { type_name, field } => {
                write!(f, "field '{}' not found in {}", field, type_name)
            }
            Warning::NullIntoNonNullable { type_name, field } => {
                write!(
                    f,
                    "null assigned to non-nullable field '{}' of {}",
                    field, type_name
                )
            }
            Warning::CircularReference { type_name, chain } => {
                write!(
                    f,
                    "circular reference to {} through {}",
                    type_name,
                    chain.join(" -> ")
                )
            }
            Warning::NonFiniteNumber { value } => {
                write!(f, "non-finite number {} written as null", value)
            }
            Warning::EmptyArguments { expected } => {
                write!(f, "empty arguments stream, {} argument(s) set to null", expected)
            }
            Warning::ExtraArguments { expected } => {
                write!(f, "arguments beyond the {} requested were ignored", expected)
            }
        }
    }
}
