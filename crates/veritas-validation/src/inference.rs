//! Propositional inference over statements.
//!
//! A statement is read as a proposition:
//! - a boolean value is a literal over its key (`not_` prefix negates),
//! - `{"antecedent": "a", "consequent": "b"}` is an implication,
//! - `{"disjuncts": ["a", "b"]}` is a disjunction,
//! - anything else is a plain claim that only restatement can use.
//!
//! Literals inside implications and disjunctions may be negated with a
//! leading `not `, `!` or `¬`.

use std::collections::{BTreeMap, HashSet, VecDeque};

use serde_json::Value;

use veritas_core::models::{InferenceRule, Statement};
use veritas_core::text::canonical_value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Literal {
    atom: String,
    positive: bool,
}

impl Literal {
    fn parse(raw: &str) -> Self {
        let mut text = raw.trim().to_lowercase();
        let mut positive = true;
        loop {
            let stripped = text
                .strip_prefix("not ")
                .or_else(|| text.strip_prefix("not_"))
                .or_else(|| text.strip_prefix('!'))
                .or_else(|| text.strip_prefix('¬'))
                .map(|rest| rest.trim_start().to_string());
            match stripped {
                Some(rest) => {
                    positive = !positive;
                    text = rest;
                }
                None => break,
            }
        }
        Self {
            atom: text.split_whitespace().collect::<Vec<_>>().join("_"),
            positive,
        }
    }

    fn negated(&self) -> Self {
        Self {
            atom: self.atom.clone(),
            positive: !self.positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Proposition {
    Atom(Literal),
    Implication(Literal, Literal),
    Disjunction(Vec<Literal>),
    Claim,
}

impl Proposition {
    fn of(statement: &Statement) -> Self {
        match &statement.value {
            Value::Bool(holds) => {
                let literal = Literal::parse(&statement.key);
                Self::Atom(if *holds { literal } else { literal.negated() })
            }
            Value::Object(map) => {
                if let (Some(a), Some(c)) = (
                    map.get("antecedent").and_then(Value::as_str),
                    map.get("consequent").and_then(Value::as_str),
                ) {
                    return Self::Implication(Literal::parse(a), Literal::parse(c));
                }
                match map.get("disjuncts").and_then(Value::as_array) {
                    Some(items) => {
                        let disjuncts: Vec<Literal> =
                            items.iter().filter_map(Value::as_str).map(Literal::parse).collect();
                        if disjuncts.len() >= 2 {
                            Self::Disjunction(disjuncts)
                        } else {
                            Self::Claim
                        }
                    }
                    None => Self::Claim,
                }
            }
            _ => Self::Claim,
        }
    }
}

/// The first rule (ponens, tollens, hypothetical syllogism, disjunctive
/// syllogism, restatement) under which `premises` entail `conclusion`.
pub fn derive(premises: &[Statement], conclusion: &Statement) -> Option<InferenceRule> {
    let propositions: Vec<Proposition> = premises.iter().map(Proposition::of).collect();
    let known: HashSet<&Literal> = propositions
        .iter()
        .filter_map(|p| match p {
            Proposition::Atom(l) => Some(l),
            _ => None,
        })
        .collect();
    let implications: Vec<(&Literal, &Literal)> = propositions
        .iter()
        .filter_map(|p| match p {
            Proposition::Implication(a, c) => Some((a, c)),
            _ => None,
        })
        .collect();

    match Proposition::of(conclusion) {
        Proposition::Atom(target) => {
            let ponens = implications
                .iter()
                .any(|(a, c)| *c == &target && known.contains(a));
            if ponens {
                return Some(InferenceRule::ModusPonens);
            }
            let tollens = implications
                .iter()
                .any(|(a, c)| a.negated() == target && known.contains(&c.negated()));
            if tollens {
                return Some(InferenceRule::ModusTollens);
            }
            let disjunctive = propositions.iter().any(|p| match p {
                Proposition::Disjunction(options) => {
                    options.contains(&target)
                        && options
                            .iter()
                            .filter(|o| **o != target)
                            .all(|o| known.contains(&o.negated()))
                }
                _ => false,
            });
            if disjunctive {
                return Some(InferenceRule::DisjunctiveSyllogism);
            }
        }
        Proposition::Implication(from, to) => {
            if reachable(&implications, &from, &to) {
                return Some(InferenceRule::HypotheticalSyllogism);
            }
        }
        Proposition::Disjunction(_) | Proposition::Claim => {}
    }

    let restated = premises.iter().any(|p| {
        p.key == conclusion.key && canonical_value(&p.value) == canonical_value(&conclusion.value)
    });
    restated.then_some(InferenceRule::Restatement)
}

/// Keys of the statements that, read forward through their implications,
/// assert some literal together with its negation.
///
/// `[rain, rain -> wet, not_wet]` conflicts; `[rain -> wet, wet -> slippery]`
/// does not.
pub fn conflicting_premises(statements: &[Statement]) -> Option<Vec<String>> {
    let propositions: Vec<Proposition> = statements.iter().map(Proposition::of).collect();
    // Literal -> indices of the statements it follows from.
    let mut support: BTreeMap<Literal, Vec<usize>> = BTreeMap::new();
    for (i, p) in propositions.iter().enumerate() {
        if let Proposition::Atom(l) = p {
            support.entry(l.clone()).or_insert_with(|| vec![i]);
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for (i, p) in propositions.iter().enumerate() {
            let Proposition::Implication(a, c) = p else { continue };
            if support.contains_key(c) {
                continue;
            }
            if let Some(mut chain) = support.get(a).cloned() {
                chain.push(i);
                support.insert(c.clone(), chain);
                changed = true;
            }
        }
    }

    support
        .iter()
        .filter(|(literal, _)| literal.positive)
        .find_map(|(literal, chain)| {
            let opposed = support.get(&literal.negated())?;
            let mut indices: Vec<usize> = chain.iter().chain(opposed).copied().collect();
            indices.sort_unstable();
            indices.dedup();
            Some(indices.into_iter().map(|i| statements[i].key.clone()).collect())
        })
}

/// Whether a chain of two or more implications leads from `from` to `to`.
fn reachable(implications: &[(&Literal, &Literal)], from: &Literal, to: &Literal) -> bool {
    let mut seen: HashSet<&Literal> = HashSet::new();
    let mut queue: VecDeque<(&Literal, usize)> = VecDeque::from([(from, 0)]);
    while let Some((current, depth)) = queue.pop_front() {
        for (a, c) in implications {
            if *a != current {
                continue;
            }
            if *c == to && depth + 1 >= 2 {
                return true;
            }
            if seen.insert(*c) {
                queue.push_back((*c, depth + 1));
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule(key: &str, a: &str, c: &str) -> Statement {
        Statement::new(key, json!({ "antecedent": a, "consequent": c }))
    }

    fn atom(key: &str, holds: bool) -> Statement {
        Statement::new(key, json!(holds))
    }

    #[test]
    fn modus_ponens() {
        let premises = [rule("r1", "rain", "wet"), atom("rain", true)];
        assert_eq!(derive(&premises, &atom("wet", true)), Some(InferenceRule::ModusPonens));
    }

    #[test]
    fn modus_tollens_with_negated_key() {
        let premises = [rule("r1", "rain", "wet"), atom("not_wet", true)];
        assert_eq!(derive(&premises, &atom("rain", false)), Some(InferenceRule::ModusTollens));
        assert_eq!(derive(&premises, &atom("not_rain", true)), Some(InferenceRule::ModusTollens));
    }

    #[test]
    fn hypothetical_syllogism_chains() {
        let premises = [rule("r1", "rain", "wet"), rule("r2", "wet", "slippery")];
        assert_eq!(
            derive(&premises, &rule("c", "rain", "slippery")),
            Some(InferenceRule::HypotheticalSyllogism)
        );
    }

    #[test]
    fn disjunctive_syllogism() {
        let premises = [
            Statement::new("drink", json!({ "disjuncts": ["tea", "coffee"] })),
            atom("tea", false),
        ];
        assert_eq!(derive(&premises, &atom("coffee", true)), Some(InferenceRule::DisjunctiveSyllogism));
    }

    #[test]
    fn forward_chained_literal_against_its_negation_conflicts() {
        let premises = vec![
            atom("rain", true),
            rule("implication", "rain", "wet"),
            rule("implication", "sun", "dry"),
            atom("wet", false),
        ];
        let keys = conflicting_premises(&premises).unwrap();
        assert_eq!(keys, vec!["rain", "implication", "wet"]);
    }

    #[test]
    fn chained_rules_alone_do_not_conflict() {
        let premises = vec![rule("implication", "rain", "wet"), rule("implication", "wet", "slippery")];
        assert_eq!(conflicting_premises(&premises), None);
        assert!(conflicting_premises(&[atom("rain", true), atom("not_rain", true)]).is_some());
    }

    #[test]
    fn affirming_the_consequent_derives_nothing() {
        let premises = [rule("r1", "rain", "wet"), atom("wet", true)];
        assert_eq!(derive(&premises, &atom("rain", true)), None);
    }

    #[test]
    fn restatement_of_a_plain_claim() {
        let premises = [Statement::new("capital", json!("Paris"))];
        assert_eq!(
            derive(&premises, &Statement::new("capital", json!("paris"))),
            Some(InferenceRule::Restatement)
        );
    }

    #[test]
    fn literal_parsing_handles_negation_forms() {
        assert_eq!(Literal::parse("not rain"), Literal::parse("!rain"));
        assert_eq!(Literal::parse("¬rain"), Literal::parse("rain").negated());
        assert_eq!(Literal::parse("not not rain"), Literal::parse("rain"));
    }
}
