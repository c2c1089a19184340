//! Seed facts loaded by [`crate::FoundationFactsStore::with_default_facts`].

use serde_json::json;

use veritas_core::constants::{
    CONFIDENCE_AXIOMATIC, CONFIDENCE_ESTABLISHED, CONFIDENCE_NEAR_CERTAIN, CONFIDENCE_RELIABLE,
};
use veritas_core::models::{FactCategory, FoundationFact};

/// The curated default fact set, at least one fact per category.
pub fn default_facts() -> Vec<FoundationFact> {
    use FactCategory::*;
    vec![
        FoundationFact::new("pi", json!("3.14159265358979"), Mathematics, CONFIDENCE_AXIOMATIC,
            "Ratio of a circle's circumference to its diameter", "mathematical constant"),
        FoundationFact::new("pythagorean_theorem", json!("a^2 + b^2 = c^2"), Mathematics, CONFIDENCE_AXIOMATIC,
            "In a right triangle the square of the hypotenuse equals the sum of the squares of the other sides", "Euclidean geometry"),
        FoundationFact::new("speed_of_light", json!("299792458"), Physics, CONFIDENCE_AXIOMATIC,
            "Speed of light in vacuum in metres per second", "SI definition of the metre"),
        FoundationFact::new("standard_gravity", json!("9.80665"), Physics, CONFIDENCE_AXIOMATIC,
            "Standard acceleration due to gravity at the Earth's surface in m/s^2", "CGPM 1901"),
        FoundationFact::new("energy_conservation", json!("energy is conserved in an isolated system"), Physics, CONFIDENCE_NEAR_CERTAIN,
            "Energy cannot be created or destroyed, only transformed", "first law of thermodynamics"),
        FoundationFact::new("law_of_non_contradiction", json!("a proposition cannot be both true and false"), Logic, CONFIDENCE_AXIOMATIC,
            "Contradictory propositions cannot both be true in the same sense at the same time", "classical logic"),
        FoundationFact::new("law_of_excluded_middle", json!("every proposition is either true or false"), Logic, CONFIDENCE_AXIOMATIC,
            "For any proposition, either it or its negation is true", "classical logic"),
        FoundationFact::new("seconds_per_day", json!(86400), Time, CONFIDENCE_AXIOMATIC,
            "Number of seconds in a mean solar day", "SI"),
        FoundationFact::new("spatial_dimensions", json!(3), Space, CONFIDENCE_ESTABLISHED,
            "Number of macroscopic spatial dimensions", "classical physics"),
        FoundationFact::new("law_of_identity", json!("everything is identical to itself"), Identity, CONFIDENCE_AXIOMATIC,
            "Each thing is the same as itself", "classical logic"),
        FoundationFact::new("temporal_causality", json!("a cause precedes its effect"), Causality, CONFIDENCE_NEAR_CERTAIN,
            "Causes occur before the effects they produce", "physics and philosophy of causation"),
        FoundationFact::new("informed_consent", json!("medical treatment requires informed consent"), Ethics, CONFIDENCE_RELIABLE,
            "Patients must agree to treatment with understanding of its risks", "medical ethics"),
        FoundationFact::new("knowledge_requires_truth", json!(true), Epistemology, CONFIDENCE_ESTABLISHED,
            "A belief that is false cannot count as knowledge", "epistemology"),
        FoundationFact::new("halting_problem_undecidable", json!(true), Computation, CONFIDENCE_AXIOMATIC,
            "No general algorithm decides whether an arbitrary program halts", "Turing 1936"),
        FoundationFact::new("bits_per_byte", json!(8), Computation, CONFIDENCE_NEAR_CERTAIN,
            "Number of bits in a byte on modern architectures", "ISO/IEC 2382"),
        FoundationFact::new("dna_base_count", json!(4), Biology, CONFIDENCE_NEAR_CERTAIN,
            "Number of nucleotide bases in DNA (adenine, cytosine, guanine, thymine)", "molecular biology"),
        FoundationFact::new("water_formula", json!("H2O"), Chemistry, CONFIDENCE_AXIOMATIC,
            "Chemical formula of water", "IUPAC"),
        FoundationFact::new("water_is_wet", json!(true), Chemistry, CONFIDENCE_ESTABLISHED,
            "Liquid water wets most surfaces it touches", "common observation"),
        FoundationFact::new("english_alphabet_letters", json!(26), Language, CONFIDENCE_AXIOMATIC,
            "Number of letters in the modern English alphabet", "orthography"),
        FoundationFact::new("probability_bounds", json!("probabilities lie between 0 and 1"), Probability, CONFIDENCE_AXIOMATIC,
            "Every probability is at least 0 and at most 1", "Kolmogorov axioms"),
        FoundationFact::new("scarcity", json!("resources are finite relative to wants"), Economics, CONFIDENCE_RELIABLE,
            "Economic resources are limited relative to demand for them", "economics"),
    ]
}
