//! Built-in fallacy definitions.
//!
//! Patterns are matched case-insensitively against normalized text
//! (lowercased, contractions expanded, punctuation removed). Definitions
//! with no patterns are reported only by structural analysis.

use veritas_core::models::{FallacyCategory, FallacyDefinition};

struct Def {
    id: &'static str,
    name: &'static str,
    category: FallacyCategory,
    patterns: &'static [&'static str],
    description: &'static str,
    explanation: &'static str,
    remediation: &'static str,
    severity: f64,
    example: &'static str,
    can_repeat: bool,
}

const BUILTIN: &[Def] = &[
    Def {
        id: "ad_hominem",
        name: "Ad Hominem",
        category: FallacyCategory::Relevance,
        patterns: &[
            r"\b(he|she|they|you) (is|are) (not qualified|unqualified|an idiot|stupid|ignorant|incompetent|a liar|biased)\b",
            r"\bdo not (listen to|trust|believe) (him|her|them|that \w+)\b",
            r"\bwhat (would|does|do) (he|she|they) (know|understand)\b",
            r"\b(you|they|he|she) (do|does) not (know|understand) (anything|what)\b",
            r"\b\w+ is (stupid|ignorant|an idiot|a liar|incompetent)\b",
        ],
        description: "Attacking the person making an argument rather than the argument itself",
        explanation: "The character or qualifications of a speaker do not determine whether their claim is true.",
        remediation: "Address the substance of the claim and the evidence offered for it.",
        severity: 0.8,
        example: "Don't listen to her; she's not qualified.",
        can_repeat: false,
    },
    Def {
        id: "tu_quoque",
        name: "Tu Quoque",
        category: FallacyCategory::Relevance,
        patterns: &[
            r"\b(you|they) (do|did) (it|the same) (too|yourself|themselves)\b",
            r"\bwho are you to (talk|say|judge|lecture)\b",
        ],
        description: "Dismissing a claim because the speaker acts inconsistently with it",
        explanation: "Hypocrisy of the speaker does not make their claim false.",
        remediation: "Evaluate the claim independently of the speaker's conduct.",
        severity: 0.6,
        example: "Who are you to talk about diet? You eat junk food too.",
        can_repeat: false,
    },
    Def {
        id: "appeal_to_authority",
        name: "Appeal to Authority",
        category: FallacyCategory::Relevance,
        patterns: &[
            r"\b(experts?|scientists?|doctors?|authorities|professors?) (say|says|agree|agrees|claim|claims) (so|it is true|that it is true)\b",
            r"\baccording to (an? )?(celebrity|famous \w+)\b",
            r"\bbecause (a|an|the|some) (famous|celebrity|well known|respected) \w+ (said|says|claimed|claims) so\b",
            r"\bbecause (he|she|they) (is|are) (an? )?(expert|doctor|professor|famous|celebrity)\b",
        ],
        description: "Treating a claim as true because an authority asserts it",
        explanation: "Authority is evidence only within the authority's expertise and alongside supporting reasons.",
        remediation: "Cite the evidence the authority relies on, and check the authority is relevant.",
        severity: 0.5,
        example: "It must be true because a famous actor said so.",
        can_repeat: false,
    },
    Def {
        id: "appeal_to_emotion",
        name: "Appeal to Emotion",
        category: FallacyCategory::Relevance,
        patterns: &[
            r"\bthink of the children\b",
            r"\b(imagine|picture) how (you|they|she|he) would feel\b",
            r"\bif you (really )?cared you would\b",
        ],
        description: "Using emotional manipulation in place of reasons",
        explanation: "How a claim makes us feel does not bear on whether it is true.",
        remediation: "Separate the emotional framing from the factual claim and support the latter.",
        severity: 0.6,
        example: "Think of the children! We must ban it.",
        can_repeat: false,
    },
    Def {
        id: "appeal_to_popularity",
        name: "Appeal to Popularity",
        category: FallacyCategory::Relevance,
        patterns: &[
            r"\b(everyone|everybody|most people|millions of people) (knows?|believes?|agrees?|thinks?) (that|it|so)\b",
            r"\b(so|therefore) it must be (true|right|correct)\b",
        ],
        description: "Concluding a claim is true because many people believe it",
        explanation: "Popularity of a belief is not evidence of its truth.",
        remediation: "Give the reasons people hold the belief rather than counting believers.",
        severity: 0.6,
        example: "Everyone believes it, so it must be true.",
        can_repeat: false,
    },
    Def {
        id: "appeal_to_tradition",
        name: "Appeal to Tradition",
        category: FallacyCategory::Relevance,
        patterns: &[
            r"\b(always|has always|have always) been (done )?(this|that) way\b",
            r"\bwe have always done it\b",
        ],
        description: "Claiming something is right because it is traditional",
        explanation: "Age or customary use of a practice does not establish that it is correct.",
        remediation: "Justify the practice on its present merits.",
        severity: 0.5,
        example: "It has always been done this way.",
        can_repeat: false,
    },
    Def {
        id: "appeal_to_nature",
        name: "Appeal to Nature",
        category: FallacyCategory::Relevance,
        patterns: &[
            r"\bbecause it is natural\b",
            r"\bnatural (so|therefore|and thus) (it is )?(good|safe|better|healthy)\b",
            r"\bit is (unnatural|not natural) (so|therefore) (it is )?(bad|wrong|unsafe)\b",
        ],
        description: "Arguing that what is natural is good or what is unnatural is bad",
        explanation: "Natural origin says nothing by itself about safety, value or correctness.",
        remediation: "Assess the actual effects rather than whether something is natural.",
        severity: 0.5,
        example: "This remedy is safe because it is natural.",
        can_repeat: false,
    },
    Def {
        id: "circular_reasoning",
        name: "Circular Reasoning",
        category: FallacyCategory::Presumption,
        patterns: &[
            r"\b(is )?true because it is true\b",
            r"\bbecause (it|the \w+) says so\b",
            r"\b(is|are) (right|correct) because (it|they) (is|are) never wrong\b",
        ],
        description: "Using the conclusion as a premise",
        explanation: "An argument that assumes what it sets out to prove gives no independent support.",
        remediation: "Support the conclusion with premises that do not presuppose it.",
        severity: 0.7,
        example: "The book is true because the book says so.",
        can_repeat: false,
    },
    Def {
        id: "false_dilemma",
        name: "False Dilemma",
        category: FallacyCategory::Presumption,
        patterns: &[
            r"\beither with us or against us\b",
            r"\bthere are only two (options|choices|possibilities|ways)\b",
            r"\beither\b.+\bor\b.+\b(no other (option|choice|way)|nothing else)\b",
        ],
        description: "Presenting two options as the only possibilities",
        explanation: "Other alternatives are usually available and have been left out.",
        remediation: "Consider the full range of options before concluding.",
        severity: 0.6,
        example: "You are either with us or against us.",
        can_repeat: false,
    },
    Def {
        id: "hasty_generalization",
        name: "Hasty Generalization",
        category: FallacyCategory::Presumption,
        patterns: &[
            r"\b(i|my \w+) (met|saw|knew|know) (one|a|an|two) \w+.*\b(so|therefore) (all|every)\b",
            r"\bone time\b.*\b(so|therefore) (all|every|always)\b",
        ],
        description: "Drawing a general conclusion from too few cases",
        explanation: "A handful of examples cannot represent a whole population.",
        remediation: "Gather a larger, representative sample before generalizing.",
        severity: 0.5,
        example: "I met one rude tourist, so all tourists are rude.",
        can_repeat: true,
    },
    Def {
        id: "slippery_slope",
        name: "Slippery Slope",
        category: FallacyCategory::Causal,
        patterns: &[
            r"\bif we (allow|let|permit)\b.+\b(next|then|eventually|soon)\b.+\b(will|would)\b",
            r"\bwhere (will|does) it (end|stop)\b",
        ],
        description: "Asserting a small step inevitably leads to an extreme outcome",
        explanation: "Each link in the chain needs its own support; inevitability is assumed, not shown.",
        remediation: "Show evidence for each step of the claimed chain of consequences.",
        severity: 0.6,
        example: "If we allow this, next they will take everything.",
        can_repeat: false,
    },
    Def {
        id: "straw_man",
        name: "Straw Man",
        category: FallacyCategory::Relevance,
        patterns: &[
            r"\bso (you are|you re) saying\b",
            r"\b(you|they) (want|wants) to (destroy|ban|abolish|eliminate) (all|every|everything)\b",
        ],
        description: "Misrepresenting an argument to make it easier to attack",
        explanation: "Refuting a distorted version leaves the actual argument untouched.",
        remediation: "Restate the opposing position accurately before responding.",
        severity: 0.6,
        example: "So you are saying we should have no rules at all?",
        can_repeat: false,
    },
    Def {
        id: "post_hoc",
        name: "Post Hoc Ergo Propter Hoc",
        category: FallacyCategory::Causal,
        patterns: &[
            r"\b(after|ever since)\b.+\b(so|therefore)\b.+\b(caused|causes|must have caused)\b",
            r"\bhappened (right )?after\b.+\b(so|therefore) it (caused|must have caused)\b",
        ],
        description: "Assuming that because B followed A, A caused B",
        explanation: "Temporal sequence alone does not establish causation.",
        remediation: "Look for a mechanism and rule out coincidence and common causes.",
        severity: 0.6,
        example: "Ever since I wore this shirt we win, so the shirt caused the wins.",
        can_repeat: false,
    },
    Def {
        id: "correlation_causation",
        name: "Correlation Implies Causation",
        category: FallacyCategory::Statistical,
        patterns: &[
            r"\b(correlated|associated|correlates) with\b.+\b(so|therefore|thus)\b.+\b(causes?|leads? to)\b",
            r"\bcorrelation\b.+\bproves?\b.+\bcaus",
        ],
        description: "Inferring causation from correlation alone",
        explanation: "Correlated variables may share a cause, be coincidental, or run in the opposite direction.",
        remediation: "Use controlled comparisons or a causal mechanism before claiming causation.",
        severity: 0.6,
        example: "Ice cream sales are correlated with drownings, so ice cream causes drowning.",
        can_repeat: false,
    },
    Def {
        id: "gamblers_fallacy",
        name: "Gambler's Fallacy",
        category: FallacyCategory::Statistical,
        patterns: &[
            r"\b(due|bound) (for|to) (a |an )?(win|hit|change|success|heads|tails)\b",
            r"\b(lost|failed|missed|landed on \w+) \w+ times in a row\b.+\b(must|will|bound)\b",
        ],
        description: "Believing independent events are influenced by past outcomes",
        explanation: "Independent trials have no memory; past results do not change future odds.",
        remediation: "Treat each independent event with its own unchanged probability.",
        severity: 0.6,
        example: "It landed on red five times in a row, so black is due for a win.",
        can_repeat: false,
    },
    Def {
        id: "affirming_consequent",
        name: "Affirming the Consequent",
        category: FallacyCategory::Formal,
        patterns: &[],
        description: "Inferring the antecedent from the consequent of a conditional",
        explanation: "If P then Q, and Q, does not establish P; Q may have other causes.",
        remediation: "Establish the antecedent directly or use modus ponens.",
        severity: 0.9,
        example: "If it rains, the ground is wet. The ground is wet. Therefore it rained.",
        can_repeat: false,
    },
    Def {
        id: "denying_antecedent",
        name: "Denying the Antecedent",
        category: FallacyCategory::Formal,
        patterns: &[],
        description: "Inferring the negated consequent from the negated antecedent",
        explanation: "If P then Q, and not P, does not establish not Q; Q may hold for other reasons.",
        remediation: "Use modus tollens: from not Q, infer not P.",
        severity: 0.9,
        example: "If it rains, the ground is wet. It does not rain. Therefore the ground is not wet.",
        can_repeat: false,
    },
    Def {
        id: "non_sequitur",
        name: "Non Sequitur",
        category: FallacyCategory::Formal,
        patterns: &[],
        description: "A conclusion that does not follow from its premises",
        explanation: "The premises share little or nothing with the conclusion they are offered for.",
        remediation: "Add the missing premises that connect the evidence to the conclusion.",
        severity: 0.7,
        example: "The sky is blue, therefore the stock market will rise.",
        can_repeat: false,
    },
];

/// The built-in catalogue as owned definitions.
pub fn builtin_definitions() -> Vec<FallacyDefinition> {
    BUILTIN
        .iter()
        .map(|d| FallacyDefinition {
            id: d.id.to_string(),
            name: d.name.to_string(),
            category: d.category,
            patterns: d.patterns.iter().map(|p| p.to_string()).collect(),
            description: d.description.to_string(),
            explanation: d.explanation.to_string(),
            remediation: d.remediation.to_string(),
            severity: d.severity,
            example: d.example.to_string(),
            can_repeat: d.can_repeat,
        })
        .collect()
}
