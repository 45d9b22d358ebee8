use std::collections::{BTreeMap, BTreeSet};

use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

use crate::{
  registers::{Palette, Register},
  utils::{DegreeBuckets, MinHeap},
};

use super::{InterferenceGraph, RegAllocError, SpillReport, Value};

/// How simplify picks among several nodes with degree < k.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TieBreak {
  /// Lowest current degree first, then lowest value.
  #[default]
  LowestDegree,
  /// Lowest value first, whatever its degree.
  LowestValue,
}

/// A complete assignment of one register per value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<Value, Register>);

impl Allocation {
  pub fn get(&self, value: &Value) -> Option<&Register> {
    self.0.get(value)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Values with their registers, in value order
  pub fn iter(&self) -> impl Iterator<Item = (&Value, &Register)> {
    self.0.iter()
  }

  /// Registers actually handed out
  pub fn used_registers(&self) -> BTreeSet<&Register> {
    self.0.values().collect()
  }

  /// Interfering pairs that ended up in the same register. Empty for every
  /// allocation produced by the allocator.
  pub fn conflicts<'a>(&self, igraph: &'a InterferenceGraph) -> Vec<(&'a Value, &'a Value)> {
    igraph
      .edges()
      .filter(|(u, v)| match (self.get(u), self.get(v)) {
        (Some(ru), Some(rv)) => ru == rv,
        _ => false,
      })
      .collect()
  }
}

/// Outcome of one allocation attempt: either every value got a register, or
/// simplify got stuck and the residual values are reported. Never both.
#[derive(Clone, Debug, PartialEq, Eq, EnumAsInner)]
pub enum AllocationResult {
  Allocated(Allocation),
  Spilled(SpillReport),
}

enum Simplified {
  Stack(Vec<usize>),
  Stuck(SpillReport),
}

/// The simplify/select graph coloring allocator.
/// There is one allocator per interference graph.
pub struct Allocator<'a> {
  palette: &'a Palette,
  tie_break: TieBreak,
  /// Arena of values, indexed in value order.
  values: Vec<&'a Value>,
  /// Neighbors of each arena node, by index.
  adjacency: Vec<Vec<usize>>,
}

impl<'a> Allocator<'a> {
  pub fn new(igraph: &'a InterferenceGraph, palette: &'a Palette) -> Result<Self, RegAllocError> {
    let values = igraph.values().collect::<Vec<_>>();
    let index = values
      .iter()
      .enumerate()
      .map(|(i, value)| (*value, i))
      .collect::<BTreeMap<_, _>>();

    let adjacency = igraph
      .adjacency()
      .map(|(_, neighbors)| {
        neighbors
          .iter()
          .map(|n| {
            index
              .get(n)
              .copied()
              .ok_or_else(|| RegAllocError::UnknownValue(n.clone()))
          })
          .collect::<Result<Vec<_>, _>>()
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Allocator {
      palette,
      tie_break: TieBreak::default(),
      values,
      adjacency,
    })
  }

  pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
    self.tie_break = tie_break;
    self
  }

  /// Simplify, then select if simplify emptied the graph.
  pub fn allocate(&self) -> Result<AllocationResult, RegAllocError> {
    match self.simplify() {
      Simplified::Stack(stack) => {
        let allocation = self.select(stack)?;
        log::info!(
          "allocated {} values to {} of {} registers",
          allocation.len(),
          allocation.used_registers().len(),
          self.palette.len()
        );
        Ok(AllocationResult::Allocated(allocation))
      }
      Simplified::Stuck(report) => {
        log::warn!(
          "Spill detected! Simplification failed with {} values left",
          report.len()
        );
        Ok(AllocationResult::Spilled(report))
      }
    }
  }

  /// Repeatedly remove a node of degree < k and push it on the stack.
  /// Stops, reporting every node left, as soon as no such node exists.
  fn simplify(&self) -> Simplified {
    let k = self.palette.len();
    let degrees = self.adjacency.iter().map(Vec::len).collect::<Vec<_>>();
    let mut worklist = DegreeBuckets::from_degrees(&degrees);
    let mut stack = Vec::with_capacity(self.values.len());

    while !worklist.is_empty() {
      let picked = match self.tie_break {
        TieBreak::LowestDegree => worklist.pop_min_degree_below(k),
        TieBreak::LowestValue => worklist.pop_min_index_below(k),
      };

      let Some(node) = picked else {
        let residual_degree = worklist
          .remaining()
          .map(|(node, degree)| (self.values[node].clone(), degree))
          .collect();
        let simplified = stack.iter().map(|node: &usize| self.values[*node].clone()).collect();
        return Simplified::Stuck(SpillReport::new(k, residual_degree, simplified));
      };

      log::debug!("simplify: {}", self.values[node]);
      for neigh in &self.adjacency[node] {
        worklist.decrement(*neigh);
      }
      stack.push(node);
    }

    Simplified::Stack(stack)
  }

  /// Pop the stack, giving each node the lowest palette index not used by
  /// an already colored neighbor.
  fn select(&self, mut stack: Vec<usize>) -> Result<Allocation, RegAllocError> {
    let mut node_to_color: Vec<Option<usize>> = vec![None; self.values.len()];
    let mut allocation = BTreeMap::new();

    while let Some(node) = stack.pop() {
      let mut neighbor_colors = MinHeap::new();
      self.adjacency[node]
        .iter()
        .filter_map(|neigh| node_to_color[*neigh])
        .for_each(|color| neighbor_colors.push(color));

      let color = neighbor_colors.find_smallest_absent();
      let value = self.values[node];
      let reg = self.palette.reg_from_color(color).ok_or_else(|| {
        RegAllocError::AllocationExhausted {
          value: value.clone(),
          num_registers: self.palette.len(),
        }
      })?;

      log::debug!("select: {} -> {}", value, reg);
      node_to_color[node] = Some(color);
      allocation.insert(value.clone(), reg.clone());
    }

    Ok(Allocation(allocation))
  }
}
