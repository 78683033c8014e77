//! LALR(1) table construction.
//!
//! Builds the canonical LR(1) item collection, merges item sets that share
//! the same core (the set of `(production, dot)` pairs, ignoring
//! lookaheads), and emits an action/goto table over the merged states.
//! Conflicts are reported rather than resolved; this builder has no
//! precedence table.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt;

use crate::grammar::{Grammar, NonTerminalId, Symbol, TerminalId};

/// A `(production, dot)` pair, the unit LALR merging operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct ItemCore {
    production: usize,
    dot: usize,
}

type ItemSet<T> = BTreeMap<ItemCore, BTreeSet<T>>;

/// A single unresolved shift/reduce or reduce/reduce conflict.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub state: usize,
    pub lookahead_name: &'static str,
    pub description: String,
}

/// The table builder failed: the grammar is not LALR(1) with this
/// construction. This is never part of the user-visible contract; a caller
/// encountering it has a bug in the grammar, not in its input.
#[derive(Debug, Clone)]
pub struct ConflictReport {
    pub conflicts: Vec<Conflict>,
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "grammar is not LALR(1): {} conflict(s)", self.conflicts.len())?;
        for c in &self.conflicts {
            writeln!(f, "  state {}, lookahead {}: {}", c.state, c.lookahead_name, c.description)?;
        }
        Ok(())
    }
}

/// A tagged action in the parse table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

/// The action/goto table produced by [`build`].
pub struct ParseTable<T, N> {
    action: HashMap<(usize, T), Action>,
    goto: HashMap<(usize, N), usize>,
    expected: HashMap<usize, Vec<T>>,
    start_state: usize,
}

impl<T: TerminalId, N: NonTerminalId> ParseTable<T, N> {
    pub fn start_state(&self) -> usize {
        self.start_state
    }

    pub fn action(&self, state: usize, terminal: T) -> Option<Action> {
        self.action.get(&(state, terminal)).copied()
    }

    pub fn goto(&self, state: usize, nonterminal: N) -> Option<usize> {
        self.goto.get(&(state, nonterminal)).copied()
    }

    /// Terminals with a defined action in `state`, for expected-token
    /// diagnostics. Unordered; callers sort by whatever key they need
    /// (typically [`TerminalId::symbol_name`]).
    pub fn expected_terminals(&self, state: usize) -> &[T] {
        self.expected.get(&state).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

fn first_of_sequence<T: TerminalId, N: NonTerminalId, V>(
    grammar: &Grammar<T, N, V>,
    symbols: &[Symbol<T, N>],
    first_sets: &HashMap<N, BTreeSet<T>>,
    nullable: &HashMap<N, bool>,
    trailing: &BTreeSet<T>,
) -> BTreeSet<T> {
    let mut result = BTreeSet::new();
    for symbol in symbols {
        match symbol {
            Symbol::Terminal(t) => {
                result.insert(*t);
                return result;
            }
            Symbol::NonTerminal(n) => {
                result.extend(first_sets.get(n).into_iter().flatten().copied());
                if !*nullable.get(n).unwrap_or(&false) {
                    return result;
                }
            }
        }
    }
    result.extend(trailing.iter().copied());
    result
}

fn compute_first_sets<T: TerminalId, N: NonTerminalId, V>(
    grammar: &Grammar<T, N, V>,
) -> (HashMap<N, BTreeSet<T>>, HashMap<N, bool>) {
    let mut first_sets: HashMap<N, BTreeSet<T>> =
        grammar.nonterminals.iter().map(|n| (*n, BTreeSet::new())).collect();
    let mut nullable: HashMap<N, bool> =
        grammar.nonterminals.iter().map(|n| (*n, false)).collect();

    loop {
        let mut changed = false;
        for production in &grammar.productions {
            let mut prefix_nullable = true;
            let mut additions: BTreeSet<T> = BTreeSet::new();
            for symbol in &production.body {
                match symbol {
                    Symbol::Terminal(t) => {
                        additions.insert(*t);
                        prefix_nullable = false;
                        break;
                    }
                    Symbol::NonTerminal(n) => {
                        additions.extend(first_sets[n].iter().copied());
                        if !nullable[n] {
                            prefix_nullable = false;
                            break;
                        }
                    }
                }
            }
            let entry = first_sets.get_mut(&production.head).unwrap();
            let before = entry.len();
            entry.extend(additions);
            if entry.len() != before {
                changed = true;
            }
            if production.body.is_empty() {
                prefix_nullable = true;
            }
            if prefix_nullable {
                let was = nullable.insert(production.head, true);
                if was != Some(true) {
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    (first_sets, nullable)
}

fn closure<T: TerminalId, N: NonTerminalId, V>(
    grammar: &Grammar<T, N, V>,
    first_sets: &HashMap<N, BTreeSet<T>>,
    nullable: &HashMap<N, bool>,
    mut items: ItemSet<T>,
) -> ItemSet<T> {
    loop {
        let mut additions: Vec<(ItemCore, BTreeSet<T>)> = Vec::new();
        for (core, lookaheads) in &items {
            let production = &grammar.productions[core.production];
            if core.dot >= production.body.len() {
                continue;
            }
            if let Symbol::NonTerminal(after_dot) = production.body[core.dot] {
                let beta = &production.body[core.dot + 1..];
                let new_lookaheads =
                    first_of_sequence(grammar, beta, first_sets, nullable, lookaheads);
                for (index, candidate) in grammar.productions.iter().enumerate() {
                    if candidate.head == after_dot {
                        additions.push((ItemCore { production: index, dot: 0 }, new_lookaheads.clone()));
                    }
                }
            }
        }
        let mut changed = false;
        for (core, lookaheads) in additions {
            let entry = items.entry(core).or_insert_with(BTreeSet::new);
            let before = entry.len();
            entry.extend(lookaheads);
            if entry.len() != before {
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    items
}

fn goto<T: TerminalId, N: NonTerminalId, V>(
    grammar: &Grammar<T, N, V>,
    first_sets: &HashMap<N, BTreeSet<T>>,
    nullable: &HashMap<N, bool>,
    items: &ItemSet<T>,
    symbol: Symbol<T, N>,
) -> ItemSet<T> {
    let mut kernel: ItemSet<T> = BTreeMap::new();
    for (core, lookaheads) in items {
        let production = &grammar.productions[core.production];
        if core.dot < production.body.len() && production.body[core.dot] == symbol {
            kernel
                .entry(ItemCore { production: core.production, dot: core.dot + 1 })
                .or_insert_with(BTreeSet::new)
                .extend(lookaheads.iter().copied());
        }
    }
    closure(grammar, first_sets, nullable, kernel)
}

fn symbols_after_dot<T: TerminalId, N: NonTerminalId, V>(
    grammar: &Grammar<T, N, V>,
    items: &ItemSet<T>,
) -> BTreeSet<Symbol<T, N>> {
    let mut symbols = BTreeSet::new();
    for core in items.keys() {
        let production = &grammar.productions[core.production];
        if core.dot < production.body.len() {
            symbols.insert(production.body[core.dot]);
        }
    }
    symbols
}

fn core_of<T>(items: &ItemSet<T>) -> BTreeSet<ItemCore> {
    items.keys().copied().collect()
}

/// Build a [`ParseTable`] for `grammar`, or report the conflicts that make
/// it fail to be LALR(1).
pub fn build<T: TerminalId, N: NonTerminalId, V>(
    grammar: &Grammar<T, N, V>,
) -> Result<ParseTable<T, N>, ConflictReport> {
    let (first_sets, nullable) = compute_first_sets(grammar);

    let mut start_kernel: ItemSet<T> = BTreeMap::new();
    start_kernel.insert(
        ItemCore { production: 0, dot: 0 },
        BTreeSet::from([grammar.end_terminal]),
    );
    let start_state = closure(grammar, &first_sets, &nullable, start_kernel);

    let mut states: Vec<ItemSet<T>> = vec![start_state.clone()];
    let mut exact_index: HashMap<ItemSet<T>, usize> = HashMap::new();
    exact_index.insert(start_state, 0);
    let mut transitions: Vec<BTreeMap<Symbol<T, N>, usize>> = vec![BTreeMap::new()];
    let mut queue: VecDeque<usize> = VecDeque::from([0]);

    while let Some(state_id) = queue.pop_front() {
        let symbols = symbols_after_dot(grammar, &states[state_id]);
        for symbol in symbols {
            let target = goto(grammar, &first_sets, &nullable, &states[state_id], symbol);
            if target.is_empty() {
                continue;
            }
            let target_id = if let Some(&existing) = exact_index.get(&target) {
                existing
            } else {
                let id = states.len();
                exact_index.insert(target.clone(), id);
                states.push(target);
                transitions.push(BTreeMap::new());
                queue.push_back(id);
                id
            };
            transitions[state_id].insert(symbol, target_id);
        }
    }

    // Merge canonical states sharing the same core (LALR collapsing).
    let mut merged_id_of_core: HashMap<BTreeSet<ItemCore>, usize> = HashMap::new();
    let mut old_to_new: Vec<usize> = Vec::with_capacity(states.len());
    let mut merged_states: Vec<ItemSet<T>> = Vec::new();
    for state in &states {
        let core = core_of(state);
        let merged_id = *merged_id_of_core.entry(core).or_insert_with(|| {
            merged_states.push(BTreeMap::new());
            merged_states.len() - 1
        });
        old_to_new.push(merged_id);
        let merged = &mut merged_states[merged_id];
        for (item_core, lookaheads) in state {
            merged.entry(*item_core).or_insert_with(BTreeSet::new).extend(lookaheads.iter().copied());
        }
    }

    let mut merged_transitions: Vec<BTreeMap<Symbol<T, N>, usize>> =
        vec![BTreeMap::new(); merged_states.len()];
    for (old_id, trans) in transitions.iter().enumerate() {
        let new_id = old_to_new[old_id];
        for (symbol, old_target) in trans {
            merged_transitions[new_id].insert(*symbol, old_to_new[*old_target]);
        }
    }

    let merged_start = old_to_new[0];

    let mut action: HashMap<(usize, T), Action> = HashMap::new();
    let mut goto_table: HashMap<(usize, N), usize> = HashMap::new();
    let mut expected: HashMap<usize, Vec<T>> = HashMap::new();
    let mut conflicts: Vec<Conflict> = Vec::new();

    for (state_id, item_set) in merged_states.iter().enumerate() {
        let mut record = |t: T, new_action: Action, conflicts: &mut Vec<Conflict>| {
            match action.entry((state_id, t)) {
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(new_action);
                    expected.entry(state_id).or_insert_with(Vec::new).push(t);
                }
                std::collections::hash_map::Entry::Occupied(slot) => {
                    if *slot.get() != new_action {
                        conflicts.push(Conflict {
                            state: state_id,
                            lookahead_name: t.symbol_name(),
                            description: format!("{:?} vs {:?}", slot.get(), new_action),
                        });
                    }
                }
            }
        };

        for (core, lookaheads) in item_set {
            let production = &grammar.productions[core.production];
            if core.dot < production.body.len() {
                if core.production == 0 && core.dot == 1 {
                    // (start' -> start . end, _): accept on end_terminal.
                    record(grammar.end_terminal, Action::Accept, &mut conflicts);
                    continue;
                }
                if let Symbol::Terminal(t) = production.body[core.dot] {
                    if let Some(&target) = merged_transitions[state_id].get(&Symbol::Terminal(t)) {
                        record(t, Action::Shift(target), &mut conflicts);
                    }
                }
            } else {
                for lookahead in lookaheads {
                    record(*lookahead, Action::Reduce(core.production), &mut conflicts);
                }
            }
        }

        for (symbol, target) in &merged_transitions[state_id] {
            if let Symbol::NonTerminal(n) = symbol {
                goto_table.insert((state_id, *n), *target);
            }
        }
    }

    if !conflicts.is_empty() {
        return Err(ConflictReport { conflicts });
    }

    Ok(ParseTable {
        action,
        goto: goto_table,
        expected,
        start_state: merged_start,
    })
}
