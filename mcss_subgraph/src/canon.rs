//! Canonical labelling of molecular graphs.
//!
//! Atoms are ranked by iterative neighbourhood refinement (Morgan style): an
//! atom's rank is refined by the sorted ranks of its neighbours and the
//! orders of the bonds to them until the partition stops splitting. Ranks are
//! compressed to `0..k` after every round, so they depend only on graph
//! structure and never on atom numbering.
//!
//! Where refinement leaves ties, [`canonical_order`] individualizes each atom
//! of the first tied class in turn, re-refines and recurses. Every leaf of
//! that search is a total order; the one whose relabelled graph encodes
//! smallest wins. Swapping two interchangeable atoms (same atom, same
//! neighbours) cannot change the result, so only one of them is tried.
//!
//! [`canonical_key`] is the winning encoding and is what fragments are
//! ordered and deduplicated by: two graphs share a key exactly when they are
//! isomorphic. [`to_canonical_string`] writes a SMILES-like string in the
//! same order for log output.

use std::fmt::Write as _;

use itertools::Itertools;

use crate::error::CanonicalError;
use crate::model::{Atom, BondOrder, MolecularGraph};

/// Highest ring-closure label the string writer emits.
const MAX_RING_LABEL: usize = 99;

/// Initial atom invariant. Implicit hydrogens are not part of it, matching
/// the comparators, which never look at them.
fn atom_invariant(graph: &MolecularGraph, index: usize, atom: &Atom) -> (String, i8, u16, bool, usize) {
    (
        atom.symbol.clone(),
        atom.charge,
        atom.isotope.unwrap_or(0),
        atom.aromatic,
        graph.degree(index),
    )
}

/// Map each item to its position among the sorted distinct items.
fn compress<T: Ord>(items: &[T]) -> Vec<usize> {
    let sorted: Vec<&T> = items.iter().sorted().dedup().collect();
    items
        .iter()
        .map(|item| sorted.binary_search(&item).unwrap_or_default())
        .collect()
}

fn class_count(ranks: &[usize]) -> usize {
    ranks.iter().unique().count()
}

fn refine(graph: &MolecularGraph, mut ranks: Vec<usize>) -> Vec<usize> {
    let mut classes = class_count(&ranks);
    loop {
        let signatures: Vec<(usize, Vec<(usize, u8)>)> = (0..graph.atom_count())
            .map(|i| {
                let mut around: Vec<(usize, u8)> = graph
                    .bonds_of(i)
                    .map(|(j, order)| (ranks[j], order.rank()))
                    .collect();
                around.sort_unstable();
                (ranks[i], around)
            })
            .collect();
        let next = compress(&signatures);
        let next_classes = class_count(&next);
        ranks = next;
        if next_classes == classes {
            return ranks;
        }
        classes = next_classes;
    }
}

/// Refined, numbering-independent atom ranks. Symmetric atoms share a rank.
pub fn canonical_ranks(graph: &MolecularGraph) -> Vec<usize> {
    let invariants: Vec<_> = graph
        .atoms()
        .enumerate()
        .map(|(i, atom)| atom_invariant(graph, i, atom))
        .collect();
    refine(graph, compress(&invariants))
}

/// Atom labels in label order and `(label, label, order)` bond triples.
type Encoding = (Vec<String>, Vec<(usize, usize, u8)>);

fn encode(graph: &MolecularGraph, labels: &[usize]) -> Encoding {
    let mut atoms = vec![String::new(); graph.atom_count()];
    for (i, atom) in graph.atoms().enumerate() {
        atoms[labels[i]] = atom.to_string();
    }
    let bonds = graph
        .bonds()
        .map(|(a, b, order)| {
            let (x, y) = (labels[a], labels[b]);
            (x.min(y), x.max(y), order.rank())
        })
        .sorted()
        .collect();
    (atoms, bonds)
}

/// Exchanging `a` and `b` is an automorphism.
fn interchangeable(graph: &MolecularGraph, a: usize, b: usize) -> bool {
    let around = |x: usize, skip: usize| -> Vec<(usize, u8)> {
        graph
            .bonds_of(x)
            .filter(|(other, _)| *other != skip)
            .map(|(other, order)| (other, order.rank()))
            .sorted()
            .collect()
    };
    graph.atom(a) == graph.atom(b) && around(a, b) == around(b, a)
}

fn search(graph: &MolecularGraph, ranks: Vec<usize>, best: &mut Option<(Encoding, Vec<usize>)>) {
    let counts = ranks.iter().counts();
    let Some(tied) = counts
        .iter()
        .filter(|(_, n)| **n > 1)
        .map(|(rank, _)| **rank)
        .min()
    else {
        let encoding = encode(graph, &ranks);
        let better = match best {
            Some((current, _)) => encoding < *current,
            None => true,
        };
        if better {
            *best = Some((encoding, ranks));
        }
        return;
    };

    let cell: Vec<usize> = (0..ranks.len()).filter(|&i| ranks[i] == tied).collect();
    let branches = if cell[1..].iter().all(|&i| interchangeable(graph, cell[0], i)) {
        &cell[..1]
    } else {
        &cell[..]
    };
    for &chosen in branches {
        let split: Vec<(usize, bool)> = ranks
            .iter()
            .enumerate()
            .map(|(i, &r)| (r, i != chosen))
            .collect();
        search(graph, refine(graph, compress(&split)), best);
    }
}

fn best_labelling(graph: &MolecularGraph) -> (Encoding, Vec<usize>) {
    let mut best = None;
    search(graph, canonical_ranks(graph), &mut best);
    best.unwrap_or_default()
}

/// A total atom order, identical for isomorphic graphs up to their
/// automorphisms.
pub fn canonical_order(graph: &MolecularGraph) -> Vec<usize> {
    best_labelling(graph).1
}

/// Structural key used to order and deduplicate fragments.
pub fn canonical_key(graph: &MolecularGraph) -> String {
    let (atoms, bonds) = best_labelling(graph).0;
    let bonds = bonds
        .into_iter()
        .map(|(lo, hi, order)| format!("{lo}-{hi}:{order}"))
        .join(",");
    format!("{}|{bonds}", atoms.join(","))
}

fn atom_token(atom: &Atom) -> String {
    if atom.is_organic_subset() {
        return atom.to_string();
    }
    let mut token = String::from("[");
    if let Some(iso) = atom.isotope {
        let _ = write!(token, "{iso}");
    }
    if atom.aromatic {
        token.push_str(&atom.symbol.to_ascii_lowercase());
    } else {
        token.push_str(&atom.symbol);
    }
    match atom.hydrogens {
        0 => {}
        1 => token.push('H'),
        n => {
            let _ = write!(token, "H{n}");
        }
    }
    match atom.charge {
        0 => {}
        1 => token.push('+'),
        -1 => token.push('-'),
        c if c > 0 => {
            let _ = write!(token, "+{c}");
        }
        c => {
            let _ = write!(token, "{c}");
        }
    }
    token.push(']');
    token
}

fn bond_token(graph: &MolecularGraph, a: usize, b: usize, order: BondOrder) -> &'static str {
    let both_aromatic = graph.atom(a).is_some_and(|x| x.aromatic)
        && graph.atom(b).is_some_and(|x| x.aromatic);
    match order {
        BondOrder::Aromatic if both_aromatic => "",
        other => other.symbol(),
    }
}

/// Depth-first layout of one component: tree children and ring closures.
struct Layout {
    children: Vec<Vec<(usize, BondOrder)>>,
    /// Per atom, closures in the order they are written: `(closure id, other atom, order)`.
    closures: Vec<Vec<(usize, usize, BondOrder)>>,
    closure_count: usize,
}

impl Layout {
    fn new(n: usize) -> Self {
        Self {
            children: vec![Vec::new(); n],
            closures: vec![Vec::new(); n],
            closure_count: 0,
        }
    }

    fn build(&mut self, graph: &MolecularGraph, order: &[usize], visited: &mut [bool], start: usize) {
        let mut on_path = vec![false; graph.atom_count()];
        self.visit(graph, order, visited, &mut on_path, start, None);
    }

    fn visit(
        &mut self,
        graph: &MolecularGraph,
        order: &[usize],
        visited: &mut [bool],
        on_path: &mut [bool],
        atom: usize,
        parent: Option<usize>,
    ) {
        visited[atom] = true;
        on_path[atom] = true;
        let neighbours: Vec<(usize, BondOrder)> = graph
            .bonds_of(atom)
            .filter(|(other, _)| Some(*other) != parent)
            .sorted_by_key(|(other, _)| order[*other])
            .collect();
        for (other, bond) in neighbours {
            if on_path[other] {
                // Back edge to an ancestor: opened at the ancestor, closed here.
                let id = self.closure_count;
                self.closure_count += 1;
                self.closures[other].push((id, atom, bond));
                self.closures[atom].push((id, other, bond));
            } else if !visited[other] {
                self.children[atom].push((other, bond));
                self.visit(graph, order, visited, on_path, other, Some(atom));
            }
        }
        on_path[atom] = false;
    }
}

struct Writer<'g> {
    graph: &'g MolecularGraph,
    layout: Layout,
    labels: Vec<Option<usize>>,
    in_use: Vec<bool>,
    out: String,
}

impl Writer<'_> {
    fn label_text(label: usize) -> String {
        if label < 10 {
            label.to_string()
        } else {
            format!("%{label}")
        }
    }

    fn write(&mut self, atom: usize) -> Result<(), CanonicalError> {
        if let Some(a) = self.graph.atom(atom) {
            self.out.push_str(&atom_token(a));
        }
        let closures = self.layout.closures[atom].clone();
        for (id, other, bond) in closures {
            match self.labels[id] {
                Some(label) => {
                    self.in_use[label] = false;
                    self.out.push_str(&Self::label_text(label));
                }
                None => {
                    let label = (1..=MAX_RING_LABEL)
                        .find(|&l| !self.in_use[l])
                        .ok_or(CanonicalError::TooManyRingClosures)?;
                    self.in_use[label] = true;
                    self.labels[id] = Some(label);
                    self.out.push_str(bond_token(self.graph, atom, other, bond));
                    self.out.push_str(&Self::label_text(label));
                }
            }
        }
        let children = self.layout.children[atom].clone();
        let last = children.len().saturating_sub(1);
        for (i, (child, bond)) in children.into_iter().enumerate() {
            let branch = i < last;
            if branch {
                self.out.push('(');
            }
            self.out.push_str(bond_token(self.graph, atom, child, bond));
            self.write(child)?;
            if branch {
                self.out.push(')');
            }
        }
        Ok(())
    }
}

/// Write a SMILES-like canonical string.
///
/// Components are separated by `.` and written in order of their
/// lowest-ranked atom. Each component starts at that atom and visits
/// neighbours in rank order.
///
/// # Errors
///
/// Returns [`CanonicalError::TooManyRingClosures`] if more than 99 ring
/// closures would be open at once.
pub fn to_canonical_string(graph: &MolecularGraph) -> Result<String, CanonicalError> {
    let order = canonical_order(graph);
    let mut visited = vec![false; graph.atom_count()];
    let mut parts = Vec::new();

    let starts: Vec<usize> = (0..graph.atom_count())
        .sorted_by_key(|&i| order[i])
        .collect();
    for start in starts {
        if visited[start] {
            continue;
        }
        let mut layout = Layout::new(graph.atom_count());
        layout.build(graph, &order, &mut visited, start);
        let mut writer = Writer {
            graph,
            labels: vec![None; layout.closure_count],
            layout,
            in_use: vec![false; MAX_RING_LABEL + 1],
            out: String::new(),
        };
        writer.write(start)?;
        parts.push(writer.out);
    }
    Ok(parts.join("."))
}
