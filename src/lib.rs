//! Classrules: fluent registration of validation rules for Rust types.
//!
//! A [`ClassValidationRules`] builder collects per-property rules (required,
//! length, numeric bounds, patterns, conditions) and per-class rules (field
//! equality) for one target type. Registering the builder writes the field
//! rules into a shared [`ValidationGraph`] keyed by owner type and property,
//! and publishes the class rules as a rule source the graph can query.
//!
//! ```
//! use classrules::{ClassValidationRules, ValidationGraph};
//!
//! struct Signup { password: String, confirm: String, newsletter: bool }
//!
//! let mut rules = ClassValidationRules::<Signup>::new();
//! rules.require(&["password", "confirm"]);
//! rules
//!     .property("email")
//!     .email()
//!     .required()
//!     .when_fn(|signup: &Signup| signup.newsletter)?;
//! rules.property("password").matches("confirm");
//!
//! let mut graph = ValidationGraph::new();
//! rules.register(&mut graph);
//! assert_eq!(graph.class_rules_for_type::<Signup>().len(), 1);
//! # Ok::<(), classrules::error::RulesError>(())
//! ```

pub mod accessor;
pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod rules;
pub mod tokens;

pub use builder::ClassValidationRules;
pub use error::{Result, RulesError};
pub use graph::ValidationGraph;
