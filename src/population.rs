//! # Population
//!
//! An ordered collection of genomes together with the [`Objective`] that defines what
//! "better" means for it. Selectors read a population; only the evolutionary loop
//! replaces it.

use rayon::prelude::*;

use crate::genome::Genome;
use crate::objective::Objective;

#[derive(Debug, Clone)]
pub struct Population<G: Genome> {
    members: Vec<G>,
    objective: Objective,
}

impl<G: Genome> Population<G> {
    pub fn new(members: Vec<G>, objective: Objective) -> Self {
        Self { members, objective }
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn members(&self) -> &[G] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&G> {
        self.members.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, G> {
        self.members.iter()
    }

    pub fn into_members(self) -> Vec<G> {
        self.members
    }

    /// Number of members without a valid cached score.
    pub fn pending(&self) -> usize {
        self.members.iter().filter(|g| !g.is_scored()).count()
    }

    /// Scores every member that has no valid cached score and returns how many were
    /// scored.
    ///
    /// With `parallel` set, scoring is spread over the rayon thread pool; the call
    /// returns only after every member is scored.
    pub fn evaluate(&self, parallel: bool) -> usize {
        let pending = self.pending();
        if pending == 0 {
            return 0;
        }

        if parallel {
            self.members
                .par_iter()
                .filter(|g| !g.is_scored())
                .for_each(|g| {
                    g.score();
                });
        } else {
            self.members.iter().filter(|g| !g.is_scored()).for_each(|g| {
                g.score();
            });
        }
        pending
    }

    /// Sorts the members best first.
    pub fn sort(&mut self) {
        let objective = self.objective;
        self.members
            .sort_by(|a, b| objective.compare(a.score(), b.score()));
    }

    /// Keeps the first `len` members.
    pub fn truncate(&mut self, len: usize) {
        self.members.truncate(len);
    }

    /// The best member, if any.
    pub fn best(&self) -> Option<&G> {
        let objective = self.objective;
        self.members
            .iter()
            .min_by(|a, b| objective.compare(a.score(), b.score()))
    }

    /// The `n` best members, best first.
    pub fn top(&self, n: usize) -> Vec<&G> {
        let objective = self.objective;
        let mut ranked: Vec<&G> = self.members.iter().collect();
        ranked.sort_by(|a, b| objective.compare(a.score(), b.score()));
        ranked.truncate(n);
        ranked
    }
}

impl<'a, G: Genome> IntoIterator for &'a Population<G> {
    type Item = &'a G;
    type IntoIter = std::slice::Iter<'a, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
