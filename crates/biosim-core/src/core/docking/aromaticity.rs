use crate::core::catalog::LigandProfile;
use std::collections::{HashMap, VecDeque};

/// Minimum LogP at which a ligand is considered to carry aromatic character.
pub const AROMATIC_LOGP_THRESHOLD: f64 = 1.0;

const KEKULE_RING_SIZE: usize = 6;
const AROMATIC_RING_SIZES: std::ops::RangeInclusive<usize> = 5..=7;

/// Lower-case organic-subset symbols denote aromatic atoms in SMILES.
#[inline]
fn is_aromatic_symbol(c: char) -> bool {
    matches!(c, 'b' | 'c' | 'n' | 'o' | 'p' | 's')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '-' | '/' | '\\' => Some(Self::Single),
            '=' => Some(Self::Double),
            '#' => Some(Self::Triple),
            ':' => Some(Self::Aromatic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bond {
    from: usize,
    to: usize,
    order: BondOrder,
}

/// Heavy-atom graph of a SMILES string, keeping the bonds that close rings.
#[derive(Debug, Default)]
struct MoleculeGraph {
    aromatic: Vec<bool>,
    bonds: Vec<Bond>,
    ring_closures: Vec<usize>,
}

impl MoleculeGraph {
    fn parse(smiles: &str) -> Self {
        let mut graph = Self::default();
        let mut previous: Option<usize> = None;
        let mut branches: Vec<Option<usize>> = Vec::new();
        let mut pending: Option<BondOrder> = None;
        let mut open_rings: HashMap<u32, (usize, Option<BondOrder>)> = HashMap::new();
        let mut chars = smiles.chars().peekable();

        while let Some(c) = chars.next() {
            let atom_aromatic = match c {
                '[' => {
                    // isotope digits precede the element symbol
                    let mut symbol = None;
                    for inner in chars.by_ref() {
                        if inner == ']' {
                            break;
                        }
                        if symbol.is_none() && inner.is_ascii_alphabetic() {
                            symbol = Some(inner);
                        }
                    }
                    Some(symbol.is_some_and(is_aromatic_symbol))
                }
                'B' | 'C' => {
                    // Br and Cl are single atoms
                    if matches!((c, chars.peek()), ('B', Some('r')) | ('C', Some('l'))) {
                        chars.next();
                    }
                    Some(false)
                }
                'N' | 'O' | 'P' | 'S' | 'F' | 'I' => Some(false),
                c if is_aromatic_symbol(c) => Some(true),
                _ => None,
            };

            if let Some(aromatic) = atom_aromatic {
                let atom = graph.aromatic.len();
                graph.aromatic.push(aromatic);
                if let Some(prev) = previous {
                    let order = pending.take().unwrap_or_else(|| graph.implicit_order(prev, atom));
                    graph.bonds.push(Bond {
                        from: prev,
                        to: atom,
                        order,
                    });
                }
                pending = None;
                previous = Some(atom);
                continue;
            }

            let ring_label = match c {
                '0'..='9' => c.to_digit(10),
                '%' => {
                    let tens = chars.next().and_then(|d| d.to_digit(10));
                    let units = chars.next().and_then(|d| d.to_digit(10));
                    tens.zip(units).map(|(t, u)| t * 10 + u)
                }
                _ => None,
            };
            if let Some(label) = ring_label {
                let Some(atom) = previous else { continue };
                match open_rings.remove(&label) {
                    Some((partner, opening_order)) => {
                        let order = pending
                            .take()
                            .or(opening_order)
                            .unwrap_or_else(|| graph.implicit_order(partner, atom));
                        graph.ring_closures.push(graph.bonds.len());
                        graph.bonds.push(Bond {
                            from: partner,
                            to: atom,
                            order,
                        });
                    }
                    None => {
                        open_rings.insert(label, (atom, pending.take()));
                    }
                }
                continue;
            }

            match c {
                '(' => branches.push(previous),
                ')' => previous = branches.pop().flatten(),
                '.' => {
                    previous = None;
                    pending = None;
                }
                _ => {
                    if let Some(order) = BondOrder::from_symbol(c) {
                        pending = Some(order);
                    }
                }
            }
        }

        graph
    }

    fn implicit_order(&self, a: usize, b: usize) -> BondOrder {
        if self.aromatic[a] && self.aromatic[b] {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn adjacency(&self) -> Vec<Vec<(usize, usize)>> {
        let mut adjacency = vec![Vec::new(); self.aromatic.len()];
        for (index, bond) in self.bonds.iter().enumerate() {
            adjacency[bond.from].push((bond.to, index));
            adjacency[bond.to].push((bond.from, index));
        }
        adjacency
    }

    /// The smallest ring closed by each ring-closure bond, as bonds in cycle order.
    fn rings(&self) -> Vec<Vec<usize>> {
        let adjacency = self.adjacency();
        self.ring_closures
            .iter()
            .filter_map(|&closure| {
                let Bond { from, to, .. } = self.bonds[closure];
                let mut path = shortest_path(&adjacency, to, from, closure)?;
                path.push(closure);
                Some(path)
            })
            .collect()
    }

    fn ring_is_aromatic(&self, ring: &[usize]) -> bool {
        if !AROMATIC_RING_SIZES.contains(&ring.len()) {
            return false;
        }
        let all_aromatic = ring.iter().all(|&b| {
            let bond = self.bonds[b];
            self.aromatic[bond.from] && self.aromatic[bond.to]
        });
        all_aromatic || self.ring_is_kekule(ring)
    }

    /// Six-membered ring of strictly alternating single and double bonds.
    fn ring_is_kekule(&self, ring: &[usize]) -> bool {
        if ring.len() != KEKULE_RING_SIZE {
            return false;
        }
        let orders: Vec<BondOrder> = ring.iter().map(|&b| self.bonds[b].order).collect();
        let starts_double = orders[0] == BondOrder::Double;
        orders.iter().enumerate().all(|(i, &order)| {
            let expect_double = (i % 2 == 0) == starts_double;
            match order {
                BondOrder::Double => expect_double,
                BondOrder::Single => !expect_double,
                BondOrder::Triple | BondOrder::Aromatic => false,
            }
        })
    }
}

/// Breadth-first path from `start` to `goal` that avoids bond `excluded`.
fn shortest_path(
    adjacency: &[Vec<(usize, usize)>],
    start: usize,
    goal: usize,
    excluded: usize,
) -> Option<Vec<usize>> {
    let mut via: Vec<Option<(usize, usize)>> = vec![None; adjacency.len()];
    let mut visited = vec![false; adjacency.len()];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(atom) = queue.pop_front() {
        if atom == goal {
            let mut path = Vec::new();
            let mut current = goal;
            while let Some((parent, bond)) = via[current] {
                path.push(bond);
                current = parent;
            }
            path.reverse();
            return Some(path);
        }
        for &(next, bond) in &adjacency[atom] {
            if bond != excluded && !visited[next] {
                visited[next] = true;
                via[next] = Some((atom, bond));
                queue.push_back(next);
            }
        }
    }
    None
}

/// Counts aromatic atoms in a SMILES string, including bracket atoms such as `[nH]`.
pub fn aromatic_atom_count(smiles: &str) -> usize {
    MoleculeGraph::parse(smiles)
        .aromatic
        .iter()
        .filter(|&&a| a)
        .count()
}

/// Number of aromatic rings in a SMILES string.
///
/// A ring is aromatic when all of its atoms are written in aromatic (lower-case) form or,
/// for Kekulé structures, when it is six-membered with alternating single and double bonds.
pub fn aromatic_ring_count(smiles: &str) -> u32 {
    let graph = MoleculeGraph::parse(smiles);
    graph
        .rings()
        .iter()
        .filter(|ring| graph.ring_is_aromatic(ring))
        .count() as u32
}

/// A ligand is aromatic when its LogP reaches [`AROMATIC_LOGP_THRESHOLD`] and its
/// structure contains at least one aromatic ring.
pub fn ligand_is_aromatic(ligand: &LigandProfile) -> bool {
    ligand.log_p >= AROMATIC_LOGP_THRESHOLD && aromatic_ring_count(&ligand.smiles) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lower_case_aromatic_atoms() {
        assert_eq!(aromatic_atom_count("CC(=O)Oc1ccccc1C(=O)O"), 6);
        assert_eq!(aromatic_atom_count("c1ccc2ccccc2c1"), 10);
        assert_eq!(aromatic_atom_count("CCO"), 0);
    }

    #[test]
    fn halogens_are_not_mistaken_for_aromatic_atoms() {
        assert_eq!(aromatic_atom_count("ClCCBr"), 0);
        assert_eq!(aromatic_atom_count("Clc1ccccc1"), 6);
    }

    #[test]
    fn bracket_atoms_are_inspected_by_element_symbol() {
        assert_eq!(aromatic_atom_count("c1cc[nH]c1"), 5);
        assert_eq!(aromatic_atom_count("[13c]1ccccc1"), 6);
        assert_eq!(aromatic_atom_count("[NH4+]"), 0);
        assert_eq!(aromatic_atom_count("[Na+].[Cl-]"), 0);
    }

    #[test]
    fn aromatic_form_rings_are_counted_per_ring_closure() {
        assert_eq!(aromatic_ring_count("c1ccoc1"), 1);
        assert_eq!(aromatic_ring_count("c1cc[nH]c1"), 1);
        assert_eq!(aromatic_ring_count("c1ccc2ccccc2c1"), 2);
        assert_eq!(aromatic_ring_count("CC(C)Cc1ccc(cc1)C(C)C(=O)O"), 1);
        assert_eq!(aromatic_ring_count("C1CCCCC1"), 0);
        assert_eq!(aromatic_ring_count("CCO"), 0);
    }

    #[test]
    fn kekule_rings_with_alternating_bonds_are_aromatic() {
        assert_eq!(aromatic_ring_count("C1=CC=CC=C1"), 1);
        assert_eq!(aromatic_ring_count("OC1=CC=CC=C1"), 1);
        assert_eq!(aromatic_ring_count("C=1C=CC=CC=1"), 1);
        // fused bicycle written with ring-closure bonds in both rings
        assert_eq!(aromatic_ring_count("OC2=CC=CC3=C2N=CN=C3N"), 2);
    }

    #[test]
    fn partially_unsaturated_rings_are_not_aromatic() {
        assert_eq!(aromatic_ring_count("C1=CCCCC1"), 0);
        assert_eq!(aromatic_ring_count("C1=CC=CCC1"), 0);
        assert_eq!(aromatic_ring_count("C1CC=CC=C1C"), 0);
        // ribose-like ring of the nucleoside part carries no double bonds
        assert_eq!(aromatic_ring_count("OCC1C(C(C(O1)C#N)O)O"), 0);
    }

    #[test]
    fn builtin_remdesivir_has_two_kekule_aromatic_rings() {
        let smiles =
            "CCC(CC)COC(=O)C(C)NP(=O)(OCC1C(C(C(O1)C#N)(C(=O)OC)C)O)OC2=CC=CC3=C2N=CN=C3N";
        assert_eq!(aromatic_ring_count(smiles), 2);
    }

    fn ligand(smiles: &str, log_p: f64) -> LigandProfile {
        LigandProfile {
            id: "l".to_string(),
            name: "L".to_string(),
            smiles: smiles.to_string(),
            molecular_weight: 100.0,
            log_p,
            h_bond_donors: 0,
            h_bond_acceptors: 0,
            rotatable_bonds: 0,
        }
    }

    #[test]
    fn aromatic_character_requires_logp_at_threshold() {
        assert!(ligand_is_aromatic(&ligand("c1ccccc1", AROMATIC_LOGP_THRESHOLD)));
        assert!(!ligand_is_aromatic(&ligand(
            "c1ccccc1",
            AROMATIC_LOGP_THRESHOLD - 1e-9
        )));
        assert!(!ligand_is_aromatic(&ligand("CCCCCC", 4.0)));
        assert!(ligand_is_aromatic(&ligand("C1=CC=CC=C1", 2.0)));
    }
}
