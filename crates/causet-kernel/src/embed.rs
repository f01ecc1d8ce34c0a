//! The embeddability engine.
//!
//! Given an implementation, a spacetime, an optional theory, and an
//! optional boundary localisation, decide whether an order-preserving
//! assignment of every FPO element to a spacetime point exists:
//! for every precedence edge `u -> v` of the FPO,
//! `spacetime.is_earlier(assignment[u], assignment[v])` must hold.
//!
//! The decision is three-valued: embeddable (with a witness),
//! not embeddable, or timed out. A timeout is a first-class outcome,
//! never folded into either boolean answer.
//!
//! The search is a complete backtracking constraint search. Elements
//! may share a spacetime point — the causal order does not require
//! injectivity, and two elements on the same point satisfy any edge
//! between them reflexively.

use crate::error::CausetError;
use crate::fpo::FramedPartialOrder;
use crate::process::Implementation;
use crate::spacetime::Spacetime;
use crate::theory::Theory;
use crate::witness::compute_witness_id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// A partial mapping from FPO labels to spacetime points, fixed before
/// the internal search begins.
///
/// Usually this pins the boundary; entries for internal labels are
/// accepted and treated as pins too. It lives only for the duration of
/// one embeddability query.
pub type Localisation = BTreeMap<String, String>;

/// Interval, in search expansions, between wall-clock polls.
const DEADLINE_POLL_INTERVAL: u64 = 64;

/// A search budget: a step (node-expansion) cap, a wall-clock deadline,
/// or neither.
///
/// Cancellation is cooperative: the search charges the meter once per
/// expansion and polls the clock at a bounded interval, so a deadline
/// can be overrun by at most `DEADLINE_POLL_INTERVAL` expansions.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    max_steps: Option<u64>,
    deadline: Option<Instant>,
}

impl Budget {
    /// No cap: the search runs to completion.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Cap the search at `max_steps` node expansions.
    pub fn steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
            deadline: None,
        }
    }

    /// Cap the search at a wall-clock duration from now.
    pub fn timeout(limit: Duration) -> Self {
        Self {
            max_steps: None,
            deadline: Instant::now().checked_add(limit),
        }
    }
}

struct BudgetMeter {
    max_steps: Option<u64>,
    deadline: Option<Instant>,
    steps: u64,
}

impl BudgetMeter {
    fn new(budget: &Budget) -> Self {
        Self {
            max_steps: budget.max_steps,
            deadline: budget.deadline,
            steps: 0,
        }
    }

    /// Whether the budget is already gone before any work.
    fn expired(&self) -> bool {
        self.max_steps.is_some_and(|max| self.steps >= max)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Charge one expansion. Returns true when the budget is exhausted.
    fn charge(&mut self) -> bool {
        self.steps += 1;
        if self.max_steps.is_some_and(|max| self.steps > max) {
            return true;
        }
        if self.steps % DEADLINE_POLL_INTERVAL == 0 {
            return self.deadline.is_some_and(|d| Instant::now() >= d);
        }
        false
    }
}

/// A witness of embeddability: the total assignment of FPO elements to
/// spacetime points, with its deterministic identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedWitness {
    /// Deterministic witness ID (`e1_…`).
    pub witness_id: String,

    /// Element label → spacetime point, for every FPO element.
    pub assignment: BTreeMap<String, String>,
}

impl EmbedWitness {
    fn new(assignment: BTreeMap<String, String>) -> Self {
        let witness_id = compute_witness_id(&assignment);
        Self {
            witness_id,
            assignment,
        }
    }
}

/// The three-valued embeddability verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Embeddability {
    /// An order-preserving total assignment exists; the witness is
    /// independently re-verifiable via [`verify_assignment`].
    Embeddable(EmbedWitness),

    /// The search space is exhausted: no assignment extends the fixed
    /// localisation. A normal outcome, not a fault.
    NotEmbeddable,

    /// The budget ran out before a definitive answer. Callers may retry
    /// with a larger budget or treat the question as unknown.
    TimedOut,
}

impl Embeddability {
    pub fn is_embeddable(&self) -> bool {
        matches!(self, Embeddability::Embeddable(_))
    }

    pub fn witness(&self) -> Option<&EmbedWitness> {
        match self {
            Embeddability::Embeddable(witness) => Some(witness),
            _ => None,
        }
    }

    /// Stable string form of the verdict kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Embeddability::Embeddable(_) => "embeddable",
            Embeddability::NotEmbeddable => "not_embeddable",
            Embeddability::TimedOut => "timed_out",
        }
    }
}

enum SearchOutcome {
    Found,
    Exhausted,
    TimedOut,
}

/// Decide whether `implementation` order-embeds into `spacetime`.
///
/// Step 1: if a theory is supplied and vetoes the implementation, the
/// verdict is `NotEmbeddable` and no search is attempted.
///
/// Step 2: the boundary localisation is taken from the caller or
/// synthesized by [`synthesize_localisation`]. A caller-supplied
/// localisation naming a label unknown to the FPO or a point unknown to
/// the spacetime fails fast with [`CausetError::UnknownLabel`].
///
/// Step 3: a complete backtracking search assigns every remaining
/// element, in declaration order, trying spacetime points in
/// declaration order and pruning on any violated edge against an
/// already-assigned neighbor.
///
/// Never mutates its inputs; the engine holds no state across calls,
/// so concurrent calls over shared read-only structures are safe.
pub fn embed(
    implementation: &Implementation,
    spacetime: &Spacetime,
    theory: Option<&dyn Theory>,
    localisation: Option<&Localisation>,
    budget: &Budget,
) -> Result<Embeddability, CausetError> {
    let fpo = &implementation.fpo;

    // Step 1: admissibility gate. A vetoed implementation is not
    // embeddable in any spacetime.
    if let Some(theory) = theory {
        if !theory.allows_implementation(implementation) {
            return Ok(Embeddability::NotEmbeddable);
        }
    }

    let mut meter = BudgetMeter::new(budget);
    if meter.expired() {
        return Ok(Embeddability::TimedOut);
    }

    if let Some(localisation) = localisation {
        for (label, point) in localisation {
            if !fpo.contains(label) {
                return Err(CausetError::UnknownLabel {
                    label: label.clone(),
                });
            }
            if !spacetime.contains(point) {
                return Err(CausetError::UnknownLabel {
                    label: point.clone(),
                });
            }
        }
    }

    if spacetime.is_empty() && !fpo.is_empty() {
        return Ok(Embeddability::NotEmbeddable);
    }

    // Step 2: boundary localisation.
    let seed: Localisation = match localisation {
        Some(localisation) => localisation.clone(),
        None => synthesize_localisation(fpo, spacetime),
    };

    // Edges with both endpoints pinned are settled now; the search
    // never revisits a pinned element.
    for (u, v) in fpo.relations() {
        if let (Some(a), Some(b)) = (seed.get(u), seed.get(v)) {
            if !spacetime.is_earlier(a, b) {
                return Ok(Embeddability::NotEmbeddable);
            }
        }
    }

    // Step 3: backtracking search over the unassigned elements.
    let variables: Vec<String> = fpo
        .nodes()
        .filter(|n| !seed.contains_key(*n))
        .map(str::to_string)
        .collect();
    let points: Vec<String> = spacetime.points().map(str::to_string).collect();

    let mut assignment = seed;
    match assign_from(
        &variables,
        0,
        &points,
        fpo,
        spacetime,
        &mut assignment,
        &mut meter,
    ) {
        SearchOutcome::TimedOut => Ok(Embeddability::TimedOut),
        SearchOutcome::Exhausted => Ok(Embeddability::NotEmbeddable),
        SearchOutcome::Found => {
            // Soundness contract: a returned witness must re-verify
            // against every FPO edge.
            if !verify_assignment(fpo, spacetime, &assignment) {
                return Ok(Embeddability::NotEmbeddable);
            }
            Ok(Embeddability::Embeddable(EmbedWitness::new(assignment)))
        }
    }
}

fn assign_from(
    variables: &[String],
    depth: usize,
    points: &[String],
    fpo: &FramedPartialOrder,
    spacetime: &Spacetime,
    assignment: &mut Localisation,
    meter: &mut BudgetMeter,
) -> SearchOutcome {
    if depth == variables.len() {
        return SearchOutcome::Found;
    }
    let element = &variables[depth];
    for point in points {
        if meter.charge() {
            return SearchOutcome::TimedOut;
        }
        if !candidate_consistent(fpo, spacetime, assignment, element, point) {
            continue;
        }
        assignment.insert(element.clone(), point.clone());
        match assign_from(
            variables,
            depth + 1,
            points,
            fpo,
            spacetime,
            assignment,
            meter,
        ) {
            SearchOutcome::Exhausted => {
                assignment.remove(element);
            }
            outcome => return outcome,
        }
    }
    SearchOutcome::Exhausted
}

/// Whether placing `element` on `point` violates any edge against an
/// already-assigned direct neighbor, in either direction.
fn candidate_consistent(
    fpo: &FramedPartialOrder,
    spacetime: &Spacetime,
    assignment: &Localisation,
    element: &str,
    point: &str,
) -> bool {
    for pred in fpo.predecessors(element) {
        if let Some(assigned) = assignment.get(pred) {
            if !spacetime.is_earlier(assigned, point) {
                return false;
            }
        }
    }
    for succ in fpo.successors(element) {
        if let Some(assigned) = assignment.get(succ) {
            if !spacetime.is_earlier(point, assigned) {
                return false;
            }
        }
    }
    true
}

/// Synthesize a boundary localisation: frame inputs round-robin onto
/// the spacetime's sources, frame outputs round-robin onto its sinks,
/// in the frame lists' declared order.
///
/// When the spacetime has no source (resp. sink), the first (resp.
/// last) point stands in. This is a heuristic seed biasing the search
/// toward plausible assignments, not a guarantee that an embedding
/// extending it exists.
pub fn synthesize_localisation(fpo: &FramedPartialOrder, spacetime: &Spacetime) -> Localisation {
    let points: Vec<&str> = spacetime.points().collect();
    let mut localisation = Localisation::new();
    let Some((&first, &last)) = points.first().zip(points.last()) else {
        return localisation;
    };

    let mut sources = spacetime.sources();
    if sources.is_empty() {
        sources = vec![first];
    }
    let mut sinks = spacetime.sinks();
    if sinks.is_empty() {
        sinks = vec![last];
    }

    for (i, input) in fpo.frame_inputs().iter().enumerate() {
        localisation.insert(input.clone(), sources[i % sources.len()].to_string());
    }
    for (i, output) in fpo.frame_outputs().iter().enumerate() {
        localisation.insert(output.clone(), sinks[i % sinks.len()].to_string());
    }
    localisation
}

/// Independently re-check a total assignment against every FPO edge,
/// in O(E) `is_earlier` queries. False if any element is unassigned.
pub fn verify_assignment(
    fpo: &FramedPartialOrder,
    spacetime: &Spacetime,
    assignment: &Localisation,
) -> bool {
    if !fpo.nodes().all(|n| assignment.contains_key(n)) {
        return false;
    }
    fpo.relations()
        .iter()
        .all(|(u, v)| match (assignment.get(*u), assignment.get(*v)) {
            (Some(a), Some(b)) => spacetime.is_earlier(a, b),
            _ => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;

    struct Rejecting;

    impl Theory for Rejecting {
        fn name(&self) -> &str {
            "rejecting"
        }

        fn allows_implementation(&self, _implementation: &Implementation) -> bool {
            false
        }
    }

    fn implementation(fpo: FramedPartialOrder) -> Implementation {
        let process = Process::new(
            "p",
            fpo.frame_inputs().to_vec(),
            fpo.frame_outputs().to_vec(),
        );
        Implementation::new(process, fpo)
    }

    fn localisation(pairs: &[(&str, &str)]) -> Localisation {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn chain_spacetime(labels: &[&str]) -> Spacetime {
        let mut st = Spacetime::new();
        for pair in labels.windows(2) {
            st.add_relation(pair[0], pair[1]).expect("chain must build");
        }
        st
    }

    #[test]
    fn identity_chain_is_embeddable() {
        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_order("in", "out").expect("must insert");
        let st = chain_spacetime(&["a", "b"]);

        let verdict = embed(&implementation(fpo), &st, None, None, &Budget::unbounded())
            .expect("well-formed query");
        let witness = verdict.witness().expect("chain must embed");
        assert_eq!(witness.assignment["in"], "a");
        assert_eq!(witness.assignment["out"], "b");
        assert!(witness.witness_id.starts_with("e1_"));
    }

    #[test]
    fn disconnected_frame_is_embeddable() {
        let fpo = FramedPartialOrder::new(["x", "y"], ["a", "b"]);
        let st = chain_spacetime(&["p", "q"]);

        let verdict = embed(&implementation(fpo), &st, None, None, &Budget::unbounded())
            .expect("well-formed query");
        assert!(verdict.is_embeddable());
    }

    #[test]
    fn theory_veto_short_circuits_before_any_search() {
        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_order("in", "out").expect("must insert");
        let st = chain_spacetime(&["a", "b"]);

        // Zero budget: had the veto not preceded the search, the
        // verdict would be TimedOut.
        let verdict = embed(
            &implementation(fpo),
            &st,
            Some(&Rejecting),
            None,
            &Budget::steps(0),
        )
        .expect("well-formed query");
        assert_eq!(verdict, Embeddability::NotEmbeddable);
    }

    #[test]
    fn zero_step_budget_times_out() {
        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_order("in", "out").expect("must insert");
        let st = chain_spacetime(&["a", "b"]);

        let verdict = embed(&implementation(fpo), &st, None, None, &Budget::steps(0))
            .expect("well-formed query");
        assert_eq!(verdict, Embeddability::TimedOut);
    }

    #[test]
    fn expired_deadline_times_out_even_when_not_embeddable() {
        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_order("in", "out").expect("must insert");
        // Empty spacetime: no embedding exists, yet the verdict must
        // still be TimedOut, never NotEmbeddable.
        let st = Spacetime::new();

        let verdict = embed(
            &implementation(fpo),
            &st,
            None,
            None,
            &Budget::timeout(Duration::ZERO),
        )
        .expect("well-formed query");
        assert_eq!(verdict, Embeddability::TimedOut);
    }

    #[test]
    fn generous_deadline_completes() {
        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_order("in", "out").expect("must insert");
        let st = chain_spacetime(&["a", "b"]);

        let verdict = embed(
            &implementation(fpo),
            &st,
            None,
            None,
            &Budget::timeout(Duration::from_secs(60)),
        )
        .expect("well-formed query");
        assert!(verdict.is_embeddable());
    }

    #[test]
    fn empty_spacetime_is_not_embeddable() {
        let fpo = FramedPartialOrder::new(["in"], ["out"]);
        let st = Spacetime::new();

        let verdict = embed(&implementation(fpo), &st, None, None, &Budget::unbounded())
            .expect("well-formed query");
        assert_eq!(verdict, Embeddability::NotEmbeddable);
    }

    #[test]
    fn empty_fpo_embeds_trivially() {
        let fpo = FramedPartialOrder::new(Vec::<String>::new(), Vec::<String>::new());
        let st = chain_spacetime(&["a", "b"]);

        let verdict = embed(&implementation(fpo), &st, None, None, &Budget::unbounded())
            .expect("well-formed query");
        let witness = verdict.witness().expect("nothing to violate");
        assert!(witness.assignment.is_empty());
    }

    #[test]
    fn single_point_absorbs_a_whole_chain() {
        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_internal("f").expect("must register");
        fpo.add_order("in", "f").expect("must insert");
        fpo.add_order("f", "out").expect("must insert");
        let mut st = Spacetime::new();
        st.add_point("p");

        let verdict = embed(&implementation(fpo), &st, None, None, &Budget::unbounded())
            .expect("well-formed query");
        let witness = verdict.witness().expect("reflexivity absorbs the chain");
        assert!(witness.assignment.values().all(|p| p == "p"));
    }

    #[test]
    fn contradictory_localisation_is_not_embeddable() {
        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_order("in", "out").expect("must insert");
        let st = chain_spacetime(&["a", "b"]);

        let pinned = localisation(&[("in", "b"), ("out", "a")]);
        let verdict = embed(
            &implementation(fpo),
            &st,
            None,
            Some(&pinned),
            &Budget::unbounded(),
        )
        .expect("well-formed query");
        assert_eq!(verdict, Embeddability::NotEmbeddable);
    }

    #[test]
    fn localisation_with_unknown_element_fails_fast() {
        let fpo = FramedPartialOrder::new(["in"], ["out"]);
        let st = chain_spacetime(&["a", "b"]);

        let pinned = localisation(&[("ghost", "a")]);
        let err = embed(
            &implementation(fpo),
            &st,
            None,
            Some(&pinned),
            &Budget::unbounded(),
        )
        .expect_err("ghost is not an FPO label");
        assert_eq!(
            err,
            CausetError::UnknownLabel {
                label: "ghost".to_string()
            }
        );
    }

    #[test]
    fn localisation_with_unknown_point_fails_fast() {
        let fpo = FramedPartialOrder::new(["in"], ["out"]);
        let st = chain_spacetime(&["a", "b"]);

        let pinned = localisation(&[("in", "nowhere")]);
        let err = embed(
            &implementation(fpo),
            &st,
            None,
            Some(&pinned),
            &Budget::unbounded(),
        )
        .expect_err("nowhere is not a point");
        assert_eq!(
            err,
            CausetError::UnknownLabel {
                label: "nowhere".to_string()
            }
        );
    }

    // Spacetime: an isolated point p plus the chain q -> r, with p
    // declared first. Placing x on p is locally consistent but strands
    // y, so the search must revisit x. The original's shortcut
    // strategies (sequential fill, collapse onto the first point) both
    // misreport this instance as not embeddable.
    #[test]
    fn search_revisits_an_earlier_choice() {
        let mut st = Spacetime::new();
        st.add_point("p");
        st.add_relation("q", "r").expect("must insert");

        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_internal("x").expect("must register");
        fpo.add_internal("y").expect("must register");
        fpo.add_order("x", "y").expect("must insert");
        fpo.add_order("y", "out").expect("must insert");

        let pinned = localisation(&[("in", "p"), ("out", "r")]);
        let verdict = embed(
            &implementation(fpo),
            &st,
            None,
            Some(&pinned),
            &Budget::unbounded(),
        )
        .expect("well-formed query");
        let witness = verdict.witness().expect("x -> q, y -> q embeds");
        assert_eq!(witness.assignment["x"], "q");
        assert_eq!(witness.assignment["y"], "q");
    }

    #[test]
    fn tight_step_budget_interrupts_the_search() {
        let mut st = Spacetime::new();
        st.add_point("p");
        st.add_relation("q", "r").expect("must insert");

        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_internal("x").expect("must register");
        fpo.add_internal("y").expect("must register");
        fpo.add_order("x", "y").expect("must insert");
        fpo.add_order("y", "out").expect("must insert");

        let pinned = localisation(&[("in", "p"), ("out", "r")]);
        let verdict = embed(
            &implementation(fpo),
            &st,
            None,
            Some(&pinned),
            &Budget::steps(3),
        )
        .expect("well-formed query");
        assert_eq!(verdict, Embeddability::TimedOut);
    }

    #[test]
    fn witness_re_verifies_against_every_edge() {
        let mut st = Spacetime::new();
        st.add_relation("a", "b").expect("must insert");
        st.add_relation("a", "c").expect("must insert");
        st.add_relation("b", "d").expect("must insert");
        st.add_relation("c", "d").expect("must insert");

        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_internal("f").expect("must register");
        fpo.add_internal("g").expect("must register");
        fpo.add_order("in", "f").expect("must insert");
        fpo.add_order("f", "g").expect("must insert");
        fpo.add_order("g", "out").expect("must insert");

        let implementation = implementation(fpo);
        let verdict = embed(&implementation, &st, None, None, &Budget::unbounded())
            .expect("well-formed query");
        let witness = verdict.witness().expect("diamond admits the chain");
        assert!(verify_assignment(
            &implementation.fpo,
            &st,
            &witness.assignment
        ));
    }

    #[test]
    fn synthesized_localisation_is_round_robin() {
        let mut st = Spacetime::new();
        st.add_relation("s1", "t1").expect("must insert");
        st.add_relation("s2", "t2").expect("must insert");

        let fpo = FramedPartialOrder::new(["i1", "i2", "i3"], ["o1"]);
        let seed = synthesize_localisation(&fpo, &st);

        // Sources in insertion order: s1, s2. Inputs wrap around them.
        assert_eq!(seed["i1"], "s1");
        assert_eq!(seed["i2"], "s2");
        assert_eq!(seed["i3"], "s1");
        assert_eq!(seed["o1"], "t1");
    }

    #[test]
    fn synthesized_localisation_of_empty_spacetime_is_empty() {
        let fpo = FramedPartialOrder::new(["in"], ["out"]);
        let seed = synthesize_localisation(&fpo, &Spacetime::new());
        assert!(seed.is_empty());
    }

    #[test]
    fn embed_never_mutates_its_inputs() {
        let mut st = Spacetime::new();
        st.add_relation("a", "b").expect("must insert");
        let mut fpo = FramedPartialOrder::new(["in"], ["out"]);
        fpo.add_order("in", "out").expect("must insert");
        let implementation = implementation(fpo);

        let relations_before = st
            .relations()
            .iter()
            .map(|(u, v)| (u.to_string(), v.to_string()))
            .collect::<Vec<_>>();
        let nodes_before = implementation
            .fpo
            .nodes()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let _ = embed(&implementation, &st, None, None, &Budget::unbounded())
            .expect("well-formed query");

        let relations_after = st
            .relations()
            .iter()
            .map(|(u, v)| (u.to_string(), v.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(relations_before, relations_after);
        assert_eq!(
            nodes_before,
            implementation.fpo.nodes().map(str::to_string).collect::<Vec<_>>()
        );
    }
}
